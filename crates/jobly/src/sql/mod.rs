//! SQL clause builders.
//!
//! Two pure helpers turn loosely-typed request payloads into parameterized SQL fragments:
//! - [`sql_for_partial_update`] renders the `SET` list of an `UPDATE`.
//! - [`sql_for_filter`] renders the `WHERE` condition of a search.
//!
//! Both return a [`ClauseResult`] whose parameters line up with the `$1, $2, ...`
//! placeholders in its text, ready to splice into a statement:
//!
//! ```ignore
//! use jobly::sql::{sql_for_filter, FilterExpr, FilterMap, Fields};
//!
//! const FILTERS: FilterMap = FilterMap::new(&[
//!     ("title", FilterExpr::Compare("LOWER(title) LIKE")),
//!     ("hasEquity", FilterExpr::Flag("equity != 0.0")),
//! ]);
//!
//! let filters = Fields::new().with("title", "Eng").with("hasEquity", true);
//! let found = sql_for_filter(&filters, &FILTERS)?;
//! let sql = format!("SELECT * FROM jobs WHERE {}", found.clause);
//! let rows = conn.query(&sql, &found.param_refs()).await?;
//! ```

mod clause;
mod fields;
mod filter;
mod partial_update;
mod translation;
mod value;

#[cfg(test)]
mod tests;

pub use clause::{ClauseResult, placeholders};
pub use fields::Fields;
pub use filter::sql_for_filter;
pub use partial_update::sql_for_partial_update;
pub use translation::{ColumnMap, FilterExpr, FilterMap, UnknownField};
pub use value::FieldValue;
