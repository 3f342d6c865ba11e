//! SELECT statement builder.

use super::condition::{ConditionBuilder, WhereClause};
use super::order::{OrderBy, write_order_by};
use super::traits::SqlBuilder;
use super::{StatementKind, finish};
use crate::error::{SqlError, SqlResult};
use crate::mapper::{MapperRegistry, Tagged, default_registry};
use crate::quote::{push_ident, quote_ident, quote_ident_with_alias};
use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Projection {
    alias: Option<String>,
    column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::Left => " LEFT JOIN ",
            JoinKind::Right => " RIGHT JOIN ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    kind: JoinKind,
    table: String,
    alias: String,
    on: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Select,
    Count,
    Subquery,
}

/// SELECT builder.
///
/// # Example
/// ```
/// use daox::sqlbuilder::{c, col, desc, select};
///
/// let mut selector = select("user");
/// selector
///     .columns(["id", "name"])
///     .where_(c().and([col("age").gte(18)]))
///     .order_by([desc(["id"])])
///     .limit(10);
/// let (sql, args) = selector.sql_args()?;
/// assert_eq!(
///     sql,
///     "SELECT `id`, `name` FROM `user` WHERE `age` >= ? ORDER BY `id` DESC LIMIT 10;"
/// );
/// assert_eq!(args.len(), 1);
/// # Ok::<(), daox::SqlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Selector {
    table: String,
    alias: Option<String>,
    distinct: bool,
    projections: Vec<Projection>,
    query_string: Option<String>,
    if_null: HashMap<String, String>,
    joins: Vec<Join>,
    where_clause: WhereClause,
    group_by: Vec<String>,
    having: WhereClause,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: bool,
}

impl Selector {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            distinct: false,
            projections: Vec::new(),
            query_string: None,
            if_null: HashMap::new(),
            joins: Vec::new(),
            where_clause: WhereClause::default(),
            group_by: Vec::new(),
            having: WhereClause::default(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            for_update: false,
        }
    }

    // ==================== Projection ====================

    /// Append projected columns.
    pub fn columns<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections
            .extend(cols.into_iter().map(|column| Projection {
                alias: None,
                column: column.into(),
            }));
        self
    }

    /// Append the tagged columns of `T` (default registry).
    pub fn struct_columns<T: Tagged>(&mut self, tag: &str, omit: &[&str]) -> &mut Self {
        self.struct_columns_in::<T>(default_registry(), tag, omit)
    }

    /// Append the tagged columns of `T` resolved through `registry`.
    pub fn struct_columns_in<T: Tagged>(
        &mut self,
        registry: &MapperRegistry,
        tag: &str,
        omit: &[&str],
    ) -> &mut Self {
        let cols = registry.columns::<T>(tag, omit);
        self.columns(cols)
    }

    /// Append columns qualified by a table alias (`alias.`col``), for joins.
    pub fn column_alias<I, S>(&mut self, alias: &str, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections
            .extend(cols.into_iter().map(|column| Projection {
                alias: Some(alias.to_string()),
                column: column.into(),
            }));
        self
    }

    /// Alias the main table (`FROM `t` AS alias`).
    pub fn as_(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    /// SELECT DISTINCT.
    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Replace the projection with a raw fragment such as `count(*)`.
    pub fn query_string(&mut self, raw: impl Into<String>) -> &mut Self {
        self.query_string = Some(raw.into());
        self
    }

    /// Project `col` as `IFNULL(`col`, default) AS `col``.
    ///
    /// `default` is written verbatim.
    pub fn if_null_val(&mut self, col: impl Into<String>, default: impl Into<String>) -> &mut Self {
        self.if_null.insert(col.into(), default.into());
        self
    }

    /// [`Selector::if_null_val`] for several columns.
    pub fn if_null_vals<I, K, V>(&mut self, vals: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (col, default) in vals {
            self.if_null_val(col, default);
        }
        self
    }

    // ==================== FROM / JOIN ====================

    fn join(&mut self, kind: JoinKind, table: &str, alias: &str, on: &str) -> &mut Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            alias: alias.to_string(),
            on: on.to_string(),
        });
        self
    }

    /// `LEFT JOIN `table` AS alias ON <on>`; `on` is written verbatim.
    pub fn left_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join(JoinKind::Left, table, alias, on)
    }

    /// `INNER JOIN `table` AS alias ON <on>`.
    pub fn inner_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join(JoinKind::Inner, table, alias, on)
    }

    /// `RIGHT JOIN `table` AS alias ON <on>`.
    pub fn right_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join(JoinKind::Right, table, alias, on)
    }

    // ==================== Clauses ====================

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(&mut self, cond: impl ConditionBuilder) -> &mut Self {
        self.where_clause = WhereClause::from_builder(&cond);
        self
    }

    pub fn group_by<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Set the HAVING condition (rendered only with GROUP BY).
    pub fn having(&mut self, cond: impl ConditionBuilder) -> &mut Self {
        self.having = WhereClause::from_builder(&cond);
        self
    }

    /// Append ORDER BY entries.
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

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// LIMIT/OFFSET for a 1-based page number.
    ///
    /// Page 0 is treated as page 1; an offset past `u64::MAX` saturates.
    pub fn page(&mut self, page: u64, page_size: u64) -> &mut Self {
        let page = page.max(1);
        self.limit = Some(page_size);
        self.offset = Some((page - 1).saturating_mul(page_size));
        self
    }

    pub fn for_update(&mut self, for_update: bool) -> &mut Self {
        self.for_update = for_update;
        self
    }

    // ==================== Rendering ====================

    fn write_projection(&self, sql: &mut String) {
        if let Some(raw) = &self.query_string {
            sql.push_str(raw);
            return;
        }
        if self.projections.is_empty() {
            sql.push('*');
            return;
        }
        for (i, p) in self.projections.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            let column = quote_ident_with_alias(p.alias.as_deref(), &p.column);
            match self.if_null.get(&p.column) {
                Some(default) => {
                    sql.push_str("IFNULL(");
                    sql.push_str(&column);
                    sql.push_str(", ");
                    sql.push_str(default);
                    sql.push_str(") AS ");
                    push_ident(sql, &p.column);
                }
                None => sql.push_str(&column),
            }
        }
    }

    fn render(&self, mode: Mode) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::TableNameRequired);
        }
        self.where_clause.check()?;
        if mode != Mode::Count {
            self.having.check()?;
        }

        let mut sql = String::with_capacity(128);
        let mut args = Vec::new();

        sql.push_str("SELECT ");
        if mode == Mode::Count {
            sql.push_str("COUNT(*)");
        } else {
            if self.distinct {
                sql.push_str("DISTINCT ");
            }
            self.write_projection(&mut sql);
        }

        sql.push_str(" FROM ");
        push_ident(&mut sql, &self.table);
        if let Some(alias) = &self.alias {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        for join in &self.joins {
            sql.push_str(join.kind.as_sql());
            push_ident(&mut sql, &join.table);
            if !join.alias.is_empty() {
                sql.push_str(" AS ");
                sql.push_str(&join.alias);
            }
            sql.push_str(" ON ");
            sql.push_str(&join.on);
        }

        self.where_clause.write(" WHERE ", &mut sql, &mut args);

        if mode != Mode::Count {
            if !self.group_by.is_empty() {
                sql.push_str(" GROUP BY ");
                let cols: Vec<String> = self.group_by.iter().map(|c| quote_ident(c)).collect();
                sql.push_str(&cols.join(", "));
                self.having.write(" HAVING ", &mut sql, &mut args);
            }
            write_order_by(&mut sql, &self.order_by);
            if let Some(limit) = self.limit {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
            if let Some(offset) = self.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
            if self.for_update {
                sql.push_str(" FOR UPDATE");
            }
        }

        if mode != Mode::Subquery {
            sql.push(';');
        }
        Ok((sql, args))
    }

    /// Render for embedding in another statement (no trailing `;`).
    pub(crate) fn render_subquery(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render(Mode::Subquery)
    }

    /// Rendered SQL text with `?` placeholders.
    pub fn sql(&self) -> SqlResult<String> {
        self.sql_args().map(|(sql, _)| sql)
    }

    /// Rendered SQL text and its arguments.
    pub fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render(Mode::Select)
            .map(|(sql, args)| finish(StatementKind::Select, sql, args))
    }

    /// `SELECT COUNT(*)` over the same FROM / JOIN / WHERE.
    pub fn count_sql(&self) -> SqlResult<String> {
        self.count_sql_args().map(|(sql, _)| sql)
    }

    /// [`Selector::count_sql`] plus the WHERE arguments.
    pub fn count_sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render(Mode::Count)
            .map(|(sql, args)| finish(StatementKind::Count, sql, args))
    }
}

impl SqlBuilder for Selector {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        Selector::sql_args(self)
    }
}
