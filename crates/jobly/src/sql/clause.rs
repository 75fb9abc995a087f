use super::value::FieldValue;
use tokio_postgres::types::ToSql;

/// A SQL fragment and the parameters its `$1, $2, ...` placeholders bind.
///
/// Placeholder `$n` always refers to `params[n - 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseResult {
    pub clause: String,
    pub params: Vec<FieldValue>,
}

impl ClauseResult {
    /// Index of the next free placeholder, for statements that append their own
    /// parameters after the clause (e.g. `WHERE id = $n` after a `SET` list).
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// Parameters as references for tokio-postgres.
    pub fn param_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
    }

    /// Count of `$n` markers in the clause text.
    pub fn placeholder_count(&self) -> usize {
        placeholders(&self.clause).len()
    }
}

/// Positional placeholder numbers appearing in `sql`, in textual order.
pub fn placeholders(sql: &str) -> Vec<usize> {
    let bytes = sql.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = sql[start..end].parse() {
                    found.push(n);
                }
                i = end;
                continue;
            }
        }
        i += 1;
    }
    found
}
