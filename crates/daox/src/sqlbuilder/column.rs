//! Column expressions: a column bound to an operator and its value(s).

use super::op::Op;
use crate::quote::quote_ident_with_alias;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum Arg {
    None,
    One(Value),
    List(Vec<Value>),
}

/// A single comparison against a column, built with [`col`].
///
/// Every method takes `&self` and returns a new value, so one expression can
/// be reused across several condition trees.
///
/// # Example
/// ```
/// use daox::sqlbuilder::col;
///
/// let expr = col("id").in_list([100, 101]);
/// assert_eq!(expr.express(), "`id` IN (?, ?)");
/// assert_eq!(expr.args().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    alias: Option<String>,
    op: Option<Op>,
    arg: Arg,
    enabled: bool,
}

/// Start an expression on column `name`.
pub fn col(name: impl Into<String>) -> Column {
    Column {
        name: name.into(),
        alias: None,
        op: None,
        arg: Arg::None,
        enabled: true,
    }
}

impl Column {
    fn with_op(&self, op: Op, arg: Arg) -> Column {
        Column {
            op: Some(op),
            arg,
            ..self.clone()
        }
    }

    fn with_one(&self, op: Op, value: impl Into<Value>) -> Column {
        self.with_op(op, Arg::One(value.into()))
    }

    fn with_list<I, T>(&self, op: Op, values: I) -> Column
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.with_op(op, Arg::List(values.into_iter().map(Into::into).collect()))
    }

    /// Qualify the column with a table alias (`alias.`column``).
    pub fn alias(&self, alias: impl Into<String>) -> Column {
        Column {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Enable or disable this expression.
    ///
    /// A disabled expression is dropped by condition trees: it renders no
    /// text, no join operator and no argument.
    pub fn enable(&self, enabled: bool) -> Column {
        Column {
            enabled,
            ..self.clone()
        }
    }

    /// `column = value`
    pub fn eq(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::Eq, value)
    }

    /// `column != value`
    pub fn not_eq(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::NotEq, value)
    }

    /// `column < value`
    pub fn lt(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::Lt, value)
    }

    /// `column <= value`
    pub fn lte(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::Lte, value)
    }

    /// `column > value`
    pub fn gt(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::Gt, value)
    }

    /// `column >= value`
    pub fn gte(&self, value: impl Into<Value>) -> Column {
        self.with_one(Op::Gte, value)
    }

    /// `column LIKE pattern`
    pub fn like(&self, pattern: impl Into<Value>) -> Column {
        self.with_one(Op::Like, pattern)
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(&self, pattern: impl Into<Value>) -> Column {
        self.with_one(Op::NotLike, pattern)
    }

    /// `column IN (values...)`
    pub fn in_list<I, T>(&self, values: I) -> Column
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.with_list(Op::In, values)
    }

    /// `column NOT IN (values...)`
    pub fn not_in<I, T>(&self, values: I) -> Column
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.with_list(Op::NotIn, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> Option<Op> {
        self.op
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render the SQL fragment with `?` placeholders.
    ///
    /// An empty IN list renders `1=0` and an empty NOT IN list renders `1=1`,
    /// neither with a placeholder.
    pub fn express(&self) -> String {
        let column = quote_ident_with_alias(self.alias.as_deref(), &self.name);
        let Some(op) = self.op else {
            return column;
        };
        match &self.arg {
            Arg::List(values) if values.is_empty() => match op {
                Op::NotIn => "1=1".to_string(),
                _ => "1=0".to_string(),
            },
            Arg::List(values) => {
                let mut sql = String::with_capacity(column.len() + 8 + values.len() * 3);
                sql.push_str(&column);
                sql.push_str(op.text());
                sql.push('(');
                for i in 0..values.len() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push('?');
                }
                sql.push(')');
                sql
            }
            Arg::One(_) => format!("{column}{}?", op.text()),
            Arg::None => format!("{column}{}", op.text().trim_end()),
        }
    }

    /// Arguments in placeholder order.
    pub fn args(&self) -> Vec<Value> {
        match &self.arg {
            Arg::None => Vec::new(),
            Arg::One(v) => vec![v.clone()],
            Arg::List(values) => values.clone(),
        }
    }

    /// An empty NOT IN list, rendered as `1=1`.
    pub(crate) fn is_always_true(&self) -> bool {
        self.op == Some(Op::NotIn) && matches!(&self.arg, Arg::List(values) if values.is_empty())
    }

    pub(crate) fn has_list_op(&self) -> bool {
        self.op.is_some_and(Op::is_list)
    }
}
