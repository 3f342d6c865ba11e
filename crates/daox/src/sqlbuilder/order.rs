//! ORDER BY clauses.

use crate::quote::quote_ident_with_alias;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry: every column in it sorts in the same direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    columns: Vec<String>,
    alias: Option<String>,
    direction: Direction,
}

/// Ascending order on `columns`.
pub fn asc<I, S>(columns: I) -> OrderBy
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OrderBy::new(Direction::Asc, columns)
}

/// Descending order on `columns`.
pub fn desc<I, S>(columns: I) -> OrderBy
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OrderBy::new(Direction::Desc, columns)
}

impl OrderBy {
    pub fn new<I, S>(direction: Direction, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            alias: None,
            direction,
        }
    }

    /// Qualify every column with a table alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn write(&self, sql: &mut String) {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&quote_ident_with_alias(self.alias.as_deref(), column));
            sql.push(' ');
            sql.push_str(self.direction.as_sql());
        }
    }
}

/// Write ` ORDER BY a ASC, b DESC`, skipping entries without columns.
pub(crate) fn write_order_by(sql: &mut String, orders: &[OrderBy]) {
    let mut first = true;
    for order in orders.iter().filter(|o| !o.columns.is_empty()) {
        sql.push_str(if first { " ORDER BY " } else { ", " });
        order.write(sql);
        first = false;
    }
}
