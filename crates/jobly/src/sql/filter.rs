use super::clause::ClauseResult;
use super::fields::Fields;
use super::translation::{FilterExpr, FilterMap};
use super::value::FieldValue;
use crate::error::{JoblyError, JoblyResult};
use std::fmt::Write;

/// One filter that survived flag handling.
enum Entry<'a> {
    /// Fixed predicate, no parameter.
    Predicate(&'a str),
    /// Comparison prefix plus the (already transformed) value it binds.
    Compare(&'a str, FieldValue),
}

/// Build an AND-joined `WHERE` clause from filter fields.
///
/// - [`FilterExpr::Compare`] fields render as `<expr> $n`. Text that is not numeric is
///   turned into a case-insensitive substring pattern `%text%` (lower-cased); every
///   other value is bound as-is.
/// - [`FilterExpr::Flag`] fields take a boolean: `true` renders the predicate without a
///   placeholder, `false` drops the filter altogether.
///
/// Clauses keep the payload order, and `$n` numbering counts only the clauses that bind a
/// value, so placeholder `n` always matches `params[n - 1]`.
///
/// Fails with [`JoblyError::InvalidInput`] for unknown fields, non-boolean flag values,
/// or when nothing is left to filter on.
pub fn sql_for_filter(filters: &Fields, exprs: &FilterMap) -> JoblyResult<ClauseResult> {
    let mut entries = Vec::with_capacity(filters.len());

    for (field, value) in filters.iter() {
        match exprs.resolve(field)? {
            FilterExpr::Flag(predicate) => {
                let enabled = value.as_flag().ok_or_else(|| {
                    JoblyError::invalid_input(format!("{field} must be true or false"))
                })?;
                if enabled {
                    entries.push(Entry::Predicate(predicate));
                }
            }
            FilterExpr::Compare(prefix) => {
                entries.push(Entry::Compare(prefix, search_value(value)));
            }
        }
    }

    if entries.is_empty() {
        return Err(JoblyError::invalid_input("No data"));
    }

    let mut clause = String::new();
    let mut params = Vec::new();

    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            clause.push_str(" AND ");
        }
        match entry {
            Entry::Predicate(predicate) => clause.push_str(predicate),
            Entry::Compare(prefix, value) => {
                params.push(value);
                // Writing to a String cannot fail.
                let _ = write!(clause, "{prefix} ${}", params.len());
            }
        }
    }

    Ok(ClauseResult { clause, params })
}

/// `%text%` for non-numeric text, the value unchanged otherwise.
fn search_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) if !value.is_numeric() => {
            FieldValue::Text(format!("%{}%", s.to_lowercase()))
        }
        _ => value.clone(),
    }
}
