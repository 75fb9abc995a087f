//! Quoted SQL identifiers.
//!
//! Column names in a `SET` list are always emitted in quoted form (`"first_name"`),
//! so any character except NUL is allowed and an embedded `"` is escaped as `""`.

use crate::error::{JoblyError, JoblyResult};

/// A single quoted SQL identifier (column name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    /// Create a quoted identifier.
    pub fn quoted(name: &str) -> JoblyResult<Self> {
        if name.is_empty() {
            return Err(JoblyError::invalid_input("Empty column name"));
        }
        if name.contains('\0') {
            return Err(JoblyError::invalid_input(
                "Column name cannot contain NUL character",
            ));
        }
        Ok(Self(name.to_string()))
    }

    /// The unquoted name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('"');
        for ch in self.0.chars() {
            if ch == '"' {
                out.push('"');
                out.push('"');
            } else {
                out.push(ch);
            }
        }
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::quoted("first_name").unwrap();
        assert_eq!(ident.to_sql(), r#""first_name""#);
        assert_eq!(ident.name(), "first_name");
    }

    #[test]
    fn ident_keeps_case() {
        let ident = Ident::quoted("logoUrl").unwrap();
        assert_eq!(ident.to_sql(), r#""logoUrl""#);
    }

    #[test]
    fn ident_escapes_quote() {
        let ident = Ident::quoted(r#"a"; DROP TABLE jobs; --"#).unwrap();
        assert_eq!(ident.to_sql(), r#""a""; DROP TABLE jobs; --""#);
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Ident::quoted("").is_err());
    }

    #[test]
    fn ident_rejects_nul() {
        assert!(Ident::quoted("na\0me").is_err());
    }
}
