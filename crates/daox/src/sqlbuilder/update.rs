//! UPDATE statement builder.

use super::condition::{ConditionBuilder, WhereClause};
use super::field::{Delta, FieldOp, write_placeholder};
use super::traits::SqlBuilder;
use super::{StatementKind, finish};
use crate::error::{SqlError, SqlResult};
use crate::mapper::{MapperRegistry, Tagged, default_registry};
use crate::quote::{placeholder_count, push_ident};
use crate::value::Value;

/// UPDATE builder.
///
/// SET arguments always precede WHERE arguments in [`Updater::sql_args`].
///
/// # Example
/// ```
/// use daox::sqlbuilder::{c, col, update};
///
/// let mut updater = update("user");
/// updater
///     .set("nickname", "bob")
///     .incr("version", 1)
///     .where_(c().and([col("id").eq(42)]));
/// let (sql, args) = updater.sql_args()?;
/// assert_eq!(
///     sql,
///     "UPDATE `user` SET `nickname` = ?, `version` = `version` + 1 WHERE `id` = ?;"
/// );
/// assert_eq!(args.len(), 2);
/// # Ok::<(), daox::SqlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Updater {
    table: String,
    columns: Vec<String>,
    fields: Vec<FieldOp>,
    where_clause: WhereClause,
}

impl Updater {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            fields: Vec::new(),
            where_clause: WhereClause::default(),
        }
    }

    /// Append unbound columns (`col = ?` / `col = :col`).
    ///
    /// Names already bound through [`Self::fields`] are skipped.
    pub fn columns<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in cols {
            let column: String = column.into();
            if !self.fields.iter().any(|f| f.column() == column) {
                self.columns.push(column);
            }
        }
        self
    }

    pub fn struct_columns<T: Tagged>(&mut self, tag: &str, omit: &[&str]) -> &mut Self {
        self.struct_columns_in::<T>(default_registry(), tag, omit)
    }

    pub fn struct_columns_in<T: Tagged>(
        &mut self,
        registry: &MapperRegistry,
        tag: &str,
        omit: &[&str],
    ) -> &mut Self {
        let cols = registry.columns::<T>(tag, omit);
        self.columns(cols)
    }

    /// Bind every tagged field of `model`.
    pub fn model<T: Tagged>(&mut self, model: &T, tag: &str, omit: &[&str]) -> &mut Self {
        self.model_in(default_registry(), model, tag, omit)
    }

    pub fn model_in<T: Tagged>(
        &mut self,
        registry: &MapperRegistry,
        model: &T,
        tag: &str,
        omit: &[&str],
    ) -> &mut Self {
        let values = registry.mapper(tag).values(model, omit);
        self.fields(
            values
                .into_iter()
                .map(|(column, value)| FieldOp::val(column, value)),
        )
    }

    /// Append bound assignments; each replaces an unbound column of the same name.
    pub fn fields<I>(&mut self, ops: I) -> &mut Self
    where
        I: IntoIterator<Item = FieldOp>,
    {
        for op in ops {
            self.columns.retain(|c| c != op.column());
            self.fields.push(op);
        }
        self
    }

    /// `col = ?` with `value` bound.
    pub fn set(&mut self, col: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields([FieldOp::val(col, value)])
    }

    /// `col = col + delta`, delta inlined.
    pub fn incr(&mut self, col: impl Into<String>, delta: impl Into<Delta>) -> &mut Self {
        self.fields([FieldOp::incr(col, delta)])
    }

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(&mut self, cond: impl ConditionBuilder) -> &mut Self {
        self.where_clause = WhereClause::from_builder(&cond);
        self
    }

    fn render(&self, named: bool) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::TableNameRequired);
        }
        if self.columns.is_empty() && self.fields.is_empty() {
            return Err(SqlError::columns_required("update"));
        }
        for field in &self.fields {
            field.check()?;
        }
        self.where_clause.check()?;

        let mut sql = String::with_capacity(128);
        let mut args = Vec::with_capacity(self.fields.len());

        sql.push_str("UPDATE ");
        push_ident(&mut sql, &self.table);
        sql.push_str(" SET ");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            push_ident(&mut sql, column);
            sql.push_str(" = ");
            write_placeholder(&mut sql, column, named);
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 || !self.columns.is_empty() {
                sql.push_str(", ");
            }
            field.write_assign(&mut sql, &mut args, named);
        }

        self.where_clause.write(" WHERE ", &mut sql, &mut args);
        sql.push(';');
        Ok((sql, args))
    }

    /// Rendered SQL text with `?` placeholders.
    pub fn sql(&self) -> SqlResult<String> {
        self.render(false)
            .map(|(sql, args)| finish(StatementKind::Update, sql, args).0)
    }

    /// Rendered SQL text, SET arguments followed by WHERE arguments.
    ///
    /// Unbound columns mixed with bound assignments are reported as
    /// [`SqlError::ArgsMismatch`]; with unbound columns only, the caller binds
    /// the SET values ahead of the returned WHERE arguments.
    pub fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        let (sql, args) = self.render(false)?;
        if !self.columns.is_empty() && !self.fields.is_empty() {
            return Err(SqlError::ArgsMismatch {
                placeholders: placeholder_count(&sql),
                args: args.len(),
                sql,
            });
        }
        Ok(finish(StatementKind::Update, sql, args))
    }

    /// Rendered SQL text with `:column` placeholders in SET.
    ///
    /// WHERE predicates keep their `?` placeholders.
    pub fn name_sql(&self) -> SqlResult<String> {
        self.render(true)
            .map(|(sql, args)| finish(StatementKind::Update, sql, args).0)
    }
}

impl SqlBuilder for Updater {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        Updater::sql_args(self)
    }
}
