//! Scalar values carried by update payloads and filters.
//!
//! Values arrive from JSON bodies and query strings, so a column's Postgres type is only
//! known when the statement is bound. [`FieldValue`] therefore implements [`ToSql`] by
//! looking at the parameter type the server inferred and converting on the fly: query
//! string text such as `"20000"` binds to an `integer` column, a JSON number binds to
//! `numeric`, and so on.

use crate::error::{JoblyError, JoblyResult};
use bytes::BytesMut;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// A scalar bound as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL `NULL`
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

impl FieldValue {
    /// Convert a JSON scalar. Arrays and objects are rejected.
    pub fn from_json(value: &serde_json::Value) -> JoblyResult<Self> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().ok_or_else(|| {
                    JoblyError::invalid_input(format!("Unsupported number: {n}"))
                })?),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                return Err(JoblyError::invalid_input(
                    "Only scalar values can be bound",
                ));
            }
        })
    }

    /// Whether the value reads as a number.
    ///
    /// Numbers are numeric; text is numeric when it parses to a finite float after
    /// trimming (so `"20000"` and `" 1.5 "` are, `""`, `"NaN"` and `"abc"` are not).
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::Decimal(_) => true,
            Self::Float(f) => f.is_finite(),
            Self::Text(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::Null | Self::Bool(_) => false,
        }
    }

    /// Interpret the value as a boolean flag.
    ///
    /// Query strings carry booleans as text, so `"true"` and `"false"` are accepted too.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Integer view of the value, parsing numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 => f.to_i64(),
            Self::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

fn is_text_type(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn mismatch(value: &FieldValue, ty: &Type) -> BoxError {
    format!("cannot bind {value:?} to a parameter of type {ty}").into()
}

fn encode_int(n: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(n)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(n)?.to_sql(ty, out),
        Type::INT8 => n.to_sql(ty, out),
        Type::FLOAT4 => (n as f32).to_sql(ty, out),
        Type::FLOAT8 => (n as f64).to_sql(ty, out),
        Type::NUMERIC => Decimal::from(n).to_sql(ty, out),
        ref t if is_text_type(t) => n.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch(&FieldValue::Int(n), ty)),
    }
}

fn encode_float(x: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => (x as f32).to_sql(ty, out),
        Type::FLOAT8 => x.to_sql(ty, out),
        Type::NUMERIC => Decimal::try_from(x)?.to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 if x.fract() == 0.0 => match x.to_i64() {
            Some(n) => encode_int(n, ty, out),
            None => Err(mismatch(&FieldValue::Float(x), ty)),
        },
        ref t if is_text_type(t) => x.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch(&FieldValue::Float(x), ty)),
    }
}

fn encode_decimal(d: Decimal, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::NUMERIC => d.to_sql(ty, out),
        Type::FLOAT4 | Type::FLOAT8 => match d.to_f64() {
            Some(x) => encode_float(x, ty, out),
            None => Err(mismatch(&FieldValue::Decimal(d), ty)),
        },
        Type::INT2 | Type::INT4 | Type::INT8 if d.fract().is_zero() => match d.to_i64() {
            Some(n) => encode_int(n, ty, out),
            None => Err(mismatch(&FieldValue::Decimal(d), ty)),
        },
        ref t if is_text_type(t) => d.to_string().as_str().to_sql(ty, out),
        _ => Err(mismatch(&FieldValue::Decimal(d), ty)),
    }
}

fn encode_text(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 | Type::INT4 | Type::INT8 => encode_int(s.trim().parse::<i64>()?, ty, out),
        Type::FLOAT4 | Type::FLOAT8 => encode_float(s.trim().parse::<f64>()?, ty, out),
        Type::NUMERIC => s.trim().parse::<Decimal>()?.to_sql(ty, out),
        Type::BOOL => match s.trim() {
            "true" => true.to_sql(ty, out),
            "false" => false.to_sql(ty, out),
            _ => Err(mismatch(&FieldValue::Text(s.to_string()), ty)),
        },
        ref t if is_text_type(t) => s.to_sql(ty, out),
        _ => Err(mismatch(&FieldValue::Text(s.to_string()), ty)),
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Self::Bool(_) => Err(mismatch(self, ty)),
            Self::Int(n) => encode_int(*n, ty, out),
            Self::Float(x) => encode_float(*x, ty, out),
            Self::Decimal(d) => encode_decimal(*d, ty, out),
            Self::Text(s) => encode_text(s, ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
        ) || is_text_type(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}
