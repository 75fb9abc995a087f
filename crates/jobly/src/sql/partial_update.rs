use super::clause::ClauseResult;
use super::fields::Fields;
use super::translation::ColumnMap;
use crate::error::{JoblyError, JoblyResult};
use crate::ident::Ident;
use std::fmt::Write;

/// Build the `SET` list of a partial update.
///
/// Each field becomes `"<column>"=$n` in payload order, joined with `, `; the values
/// are returned unchanged in the same order.
///
/// ```ignore
/// const USER_COLUMNS: ColumnMap = ColumnMap::new(&[("firstName", "first_name")]);
///
/// let update = Fields::new().with("firstName", "Aliya").with("age", 32);
/// let set = sql_for_partial_update(&update, &USER_COLUMNS)?;
/// assert_eq!(set.clause, r#""first_name"=$1, "age"=$2"#);
/// ```
///
/// Fails with [`JoblyError::InvalidInput`] when `update` is empty, or when a field is
/// missing from a strict `columns` table.
pub fn sql_for_partial_update(update: &Fields, columns: &ColumnMap) -> JoblyResult<ClauseResult> {
    if update.is_empty() {
        return Err(JoblyError::invalid_input("No data"));
    }

    let mut clause = String::new();
    let mut params = Vec::with_capacity(update.len());

    for (position, (field, value)) in update.iter().enumerate() {
        let column = Ident::quoted(columns.resolve(field)?)?;
        if position > 0 {
            clause.push_str(", ");
        }
        column.write_sql(&mut clause);
        // Writing to a String cannot fail.
        let _ = write!(clause, "=${}", position + 1);
        params.push(value.clone());
    }

    Ok(ClauseResult { clause, params })
}
