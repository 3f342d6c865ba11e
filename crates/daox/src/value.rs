//! Bound argument values.
//!
//! The builders never talk to a database, so arguments are carried as a
//! small closed set of scalar values instead of driver-specific trait objects.
//! Whatever executes the rendered SQL converts [`Value`] into its own
//! parameter type.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A single argument bound to a `?` (or `:name`) placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Bytes(Bytes),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Uuid(Uuid),
    Json(serde_json::Value),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as an inline SQL literal.
    ///
    /// Strings are single-quoted with `'` and `\` escaped (MySQL rules), bytes
    /// are rendered as a hex literal.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::I64(v) => v.to_string(),
            Value::U64(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::String(s) => crate::quote::quote_string(s),
            Value::Bytes(b) => {
                let mut out = String::with_capacity(b.len() * 2 + 3);
                out.push_str("X'");
                for byte in b.iter() {
                    out.push_str(&format!("{byte:02X}"));
                }
                out.push('\'');
                out
            }
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::Time(t) => format!("'{}'", t.format("%H:%M:%S%.f")),
            Value::Uuid(u) => format!("'{u}'"),
            Value::Json(j) => crate::quote::quote_string(&j.to_string()),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => d.to_string(),
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),+ $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v.into())
            }
        })+
    };
}

value_from!(Bool: bool);
value_from!(I64: i8, i16, i32, i64);
value_from!(U64: u8, u16, u32, u64);
value_from!(F64: f32, f64);
value_from!(String: String, &str, &String);
value_from!(Bytes: Bytes, Vec<u8>);
value_from!(DateTime: NaiveDateTime);
value_from!(Timestamp: DateTime<Utc>);
value_from!(Date: NaiveDate);
value_from!(Time: NaiveTime);
value_from!(Uuid: Uuid);
value_from!(Json: serde_json::Value);

#[cfg(feature = "rust_decimal")]
value_from!(Decimal: rust_decimal::Decimal);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::I64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::U64(v as u64)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use daox::{args, Value};
///
/// let args = args![1, "alice", true];
/// assert_eq!(args, vec![Value::I64(1), Value::from("alice"), Value::Bool(true)]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
