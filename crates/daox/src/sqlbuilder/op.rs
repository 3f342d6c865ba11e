//! Operator table.

use std::fmt;

/// Comparison and logical operators understood by the builders.
///
/// The set is closed: rendering matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `column = value`
    Eq,
    /// `column != value`
    NotEq,
    /// `column < value`
    Lt,
    /// `column <= value`
    Lte,
    /// `column > value`
    Gt,
    /// `column >= value`
    Gte,
    /// `column LIKE pattern`
    Like,
    /// `column NOT LIKE pattern`
    NotLike,
    /// `column IN (values...)`
    In,
    /// `column NOT IN (values...)`
    NotIn,
    /// Conjunction between predicates
    And,
    /// Disjunction between predicates
    Or,
    /// Negation of a grouped condition
    Not,
    /// Sub-query existence test
    Exists,
}

impl Op {
    /// Short symbolic name of the operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::NotEq => "!=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::And => "AND",
            Op::Or => "OR",
            Op::Not => "NOT",
            Op::Exists => "EXISTS",
        }
    }

    /// Text fragment written into the rendered SQL.
    pub const fn text(self) -> &'static str {
        match self {
            Op::Eq => " = ",
            Op::NotEq => " != ",
            Op::Lt => " < ",
            Op::Lte => " <= ",
            Op::Gt => " > ",
            Op::Gte => " >= ",
            Op::Like => " LIKE ",
            Op::NotLike => " NOT LIKE ",
            Op::In => " IN ",
            Op::NotIn => " NOT IN ",
            Op::And => " AND ",
            Op::Or => " OR ",
            Op::Not => "NOT ",
            Op::Exists => "EXISTS ",
        }
    }

    /// `true` for IN / NOT IN, which expand one placeholder per value.
    pub const fn is_list(self) -> bool {
        matches!(self, Op::In | Op::NotIn)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
