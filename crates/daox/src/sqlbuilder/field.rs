//! Column assignments used by INSERT / UPDATE / ON DUPLICATE KEY UPDATE.

use crate::error::{SqlError, SqlResult};
use crate::quote::quote_ident;
use crate::value::Value;
use std::fmt;

/// A numeric increment, inlined into the SQL text as a literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    Int(i64),
    Float(f64),
}

impl Delta {
    /// `false` for NaN and infinite floats, which have no SQL literal.
    pub fn is_finite(self) -> bool {
        match self {
            Delta::Int(_) => true,
            Delta::Float(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Int(v) => write!(f, "{v}"),
            Delta::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! delta_from {
    ($variant:ident as $target:ty: $($t:ty),+ $(,)?) => {
        $(impl From<$t> for Delta {
            fn from(v: $t) -> Self {
                Delta::$variant(v as $target)
            }
        })+
    };
}

delta_from!(Int as i64: i8, i16, i32, i64, u8, u16, u32);
delta_from!(Float as f64: f32, f64);

#[derive(Debug, Clone, PartialEq)]
pub enum FieldMode {
    /// Bind the operand to a placeholder.
    Value(Value),
    /// `col = col + delta`, delta inlined.
    Incr(Delta),
}

/// One `column = ...` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOp {
    column: String,
    mode: FieldMode,
}

impl FieldOp {
    /// `column = ?` with `value` bound.
    pub fn val(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            mode: FieldMode::Value(value.into()),
        }
    }

    /// `column = column + delta`.
    ///
    /// The delta is written into the SQL text, not bound, so it contributes no
    /// argument. Only numeric deltas are accepted.
    pub fn incr(column: impl Into<String>, delta: impl Into<Delta>) -> Self {
        Self {
            column: column.into(),
            mode: FieldMode::Incr(delta.into()),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn mode(&self) -> &FieldMode {
        &self.mode
    }

    /// Reject an increment whose delta cannot be written as a literal.
    pub(crate) fn check(&self) -> SqlResult<()> {
        match &self.mode {
            FieldMode::Incr(delta) if !delta.is_finite() => Err(SqlError::non_finite_number(
                format!("increment of `{}`", self.column),
            )),
            _ => Ok(()),
        }
    }

    /// Write the assignment; `named` selects `:column` over `?`.
    pub(crate) fn write_assign(&self, sql: &mut String, args: &mut Vec<Value>, named: bool) {
        let column = quote_ident(&self.column);
        sql.push_str(&column);
        sql.push_str(" = ");
        match &self.mode {
            FieldMode::Value(v) => {
                write_placeholder(sql, &self.column, named);
                args.push(v.clone());
            }
            FieldMode::Incr(delta) => {
                sql.push_str(&column);
                sql.push_str(" + ");
                sql.push_str(&delta.to_string());
            }
        }
    }

    /// Write only the VALUES slot for this field.
    pub(crate) fn write_value_slot(&self, sql: &mut String, args: &mut Vec<Value>, named: bool) {
        match &self.mode {
            FieldMode::Value(v) => {
                write_placeholder(sql, &self.column, named);
                args.push(v.clone());
            }
            FieldMode::Incr(delta) => sql.push_str(&delta.to_string()),
        }
    }
}

pub(crate) fn write_placeholder(sql: &mut String, column: &str, named: bool) {
    if named {
        sql.push(':');
        sql.push_str(column);
    } else {
        sql.push('?');
    }
}
