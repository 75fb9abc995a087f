//! Typed translation tables from application field names to SQL.

use crate::error::{JoblyError, JoblyResult};

/// What a [`ColumnMap`] does with a field it has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownField {
    /// Use the field name itself as the column name.
    ///
    /// The name is still emitted as a quoted identifier, but any field the caller lets
    /// through becomes a column reference. Only use this for trusted payloads.
    #[default]
    RawKey,
    /// Fail with [`JoblyError::InvalidInput`].
    Reject,
}

/// Field name → column name table for `SET` lists.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    columns: &'static [(&'static str, &'static str)],
    unknown: UnknownField,
}

impl ColumnMap {
    /// A table that falls back to the raw field name.
    pub const fn new(columns: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            columns,
            unknown: UnknownField::RawKey,
        }
    }

    /// A table that rejects fields it does not list.
    pub const fn strict(columns: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            columns,
            unknown: UnknownField::Reject,
        }
    }

    pub const fn unknown_field(&self) -> UnknownField {
        self.unknown
    }

    /// Resolve the column for `field`, applying the [`UnknownField`] policy.
    pub fn resolve<'a>(&self, field: &'a str) -> JoblyResult<&'a str> {
        if let Some((_, column)) = self.columns.iter().find(|(name, _)| *name == field) {
            return Ok(*column);
        }
        match self.unknown {
            UnknownField::RawKey => Ok(field),
            UnknownField::Reject => Err(JoblyError::invalid_input(format!(
                "Field cannot be updated: {field}"
            ))),
        }
    }
}

/// SQL produced for one filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterExpr {
    /// Comparison prefix followed by a placeholder, e.g. `"salary >="` → `salary >= $1`.
    Compare(&'static str),
    /// Self-contained predicate gated by a boolean value, e.g. `"equity != 0.0"`.
    ///
    /// `true` emits the predicate with no parameter; `false` drops the filter.
    Flag(&'static str),
}

/// Field name → filter expression table for `WHERE` clauses.
#[derive(Debug, Clone, Copy)]
pub struct FilterMap {
    exprs: &'static [(&'static str, FilterExpr)],
}

impl FilterMap {
    pub const fn new(exprs: &'static [(&'static str, FilterExpr)]) -> Self {
        Self { exprs }
    }

    pub fn get(&self, field: &str) -> Option<FilterExpr> {
        self.exprs
            .iter()
            .find_map(|(name, expr)| (*name == field).then_some(*expr))
    }

    /// Like [`FilterMap::get`] but unknown fields are an error.
    pub fn resolve(&self, field: &str) -> JoblyResult<FilterExpr> {
        self.get(field)
            .ok_or_else(|| JoblyError::invalid_input(format!("Unknown filter: {field}")))
    }
}
