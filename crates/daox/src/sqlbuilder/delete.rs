//! DELETE statement builder.

use super::condition::{ConditionBuilder, WhereClause};
use super::order::{OrderBy, write_order_by};
use super::traits::SqlBuilder;
use super::{StatementKind, finish};
use crate::error::{SqlError, SqlResult};
use crate::quote::push_ident;
use crate::value::Value;

/// DELETE builder.
///
/// A DELETE is never rendered without a restricting predicate: an unset
/// condition, one whose expressions were all disabled, or one that matches
/// every row (such as an empty NOT IN list) fails with
/// [`SqlError::DeleteMissingWhere`].
#[derive(Debug, Clone)]
pub struct Deleter {
    table: String,
    where_clause: WhereClause,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
}

impl Deleter {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_clause: WhereClause::default(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(&mut self, cond: impl ConditionBuilder) -> &mut Self {
        self.where_clause = WhereClause::from_builder(&cond);
        self
    }

    pub fn order_by<I>(&mut self, orders: I) -> &mut Self
    where
        I: IntoIterator<Item = OrderBy>,
    {
        self.order_by.extend(orders);
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    fn render(&self) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::TableNameRequired);
        }
        self.where_clause.check()?;
        if self.where_clause.is_empty() || self.where_clause.is_unrestricted() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "daox.sql",
                table = %self.table,
                "rejected DELETE without WHERE"
            );
            return Err(SqlError::delete_missing_where(&self.table));
        }

        let mut sql = String::with_capacity(64);
        let mut args = Vec::new();

        sql.push_str("DELETE FROM ");
        push_ident(&mut sql, &self.table);
        self.where_clause.write(" WHERE ", &mut sql, &mut args);
        write_order_by(&mut sql, &self.order_by);
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql.push(';');
        Ok((sql, args))
    }

    /// Rendered SQL text with `?` placeholders.
    pub fn sql(&self) -> SqlResult<String> {
        self.sql_args().map(|(sql, _)| sql)
    }

    /// Rendered SQL text and its WHERE arguments.
    pub fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render()
            .map(|(sql, args)| finish(StatementKind::Delete, sql, args))
    }
}

impl SqlBuilder for Deleter {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        Deleter::sql_args(self)
    }
}
