//! INSERT / REPLACE / INSERT IGNORE statement builder.

use super::field::{FieldOp, write_placeholder};
use super::traits::SqlBuilder;
use super::{StatementKind, finish};
use crate::error::{SqlError, SqlResult};
use crate::mapper::{MapperRegistry, Tagged, default_registry};
use crate::quote::push_ident;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InsertMode {
    #[default]
    Insert,
    Replace,
    Ignore,
}

impl InsertMode {
    fn as_sql(self) -> &'static str {
        match self {
            InsertMode::Insert => "INSERT INTO ",
            InsertMode::Replace => "REPLACE INTO ",
            InsertMode::Ignore => "INSERT IGNORE INTO ",
        }
    }
}

#[derive(Debug, Clone, Default)]
enum OnDuplicate {
    #[default]
    None,
    Raw(String),
    Fields(Vec<FieldOp>),
}

/// INSERT builder.
///
/// Columns come in two flavours:
/// - unbound columns ([`Inserter::columns`]) whose values the caller binds,
///   typically by name through [`Inserter::name_sql`];
/// - bound fields ([`Inserter::fields`], [`Inserter::model`]) that carry their
///   own argument and show up in [`Inserter::sql_args`].
///
/// Binding a field removes the unbound column of the same name.
#[derive(Debug, Clone)]
pub struct Inserter {
    table: String,
    mode: InsertMode,
    columns: Vec<String>,
    fields: Vec<FieldOp>,
    on_duplicate: OnDuplicate,
}

impl Inserter {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            mode: InsertMode::Insert,
            columns: Vec::new(),
            fields: Vec::new(),
            on_duplicate: OnDuplicate::None,
        }
    }

    /// Append unbound columns.
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

    /// Append the tagged columns of `T` as unbound columns.
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

    /// Bind every tagged field of `model` as a value field.
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

    /// Append bound fields.
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

    /// Use `REPLACE INTO`.
    pub fn replace_into(&mut self, replace: bool) -> &mut Self {
        self.mode = if replace {
            InsertMode::Replace
        } else {
            InsertMode::Insert
        };
        self
    }

    /// Use `INSERT IGNORE INTO`.
    pub fn ignore_into(&mut self, ignore: bool) -> &mut Self {
        self.mode = if ignore {
            InsertMode::Ignore
        } else {
            InsertMode::Insert
        };
        self
    }

    /// `ON DUPLICATE KEY UPDATE <raw>`, written verbatim.
    pub fn on_duplicate_key_update_string(&mut self, raw: impl Into<String>) -> &mut Self {
        self.on_duplicate = OnDuplicate::Raw(raw.into());
        self
    }

    /// `ON DUPLICATE KEY UPDATE` from field assignments.
    pub fn on_duplicate_key_update<I>(&mut self, ops: I) -> &mut Self
    where
        I: IntoIterator<Item = FieldOp>,
    {
        self.on_duplicate = OnDuplicate::Fields(ops.into_iter().collect());
        self
    }

    fn render(&self, named: bool) -> SqlResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(SqlError::TableNameRequired);
        }
        if self.columns.is_empty() && self.fields.is_empty() {
            return Err(SqlError::columns_required("insert"));
        }
        for field in &self.fields {
            field.check()?;
        }
        if let OnDuplicate::Fields(ops) = &self.on_duplicate {
            for op in ops {
                op.check()?;
            }
        }

        let mut sql = String::with_capacity(128);
        let mut args = Vec::with_capacity(self.fields.len());

        sql.push_str(self.mode.as_sql());
        push_ident(&mut sql, &self.table);
        sql.push('(');
        let names = self
            .columns
            .iter()
            .map(String::as_str)
            .chain(self.fields.iter().map(FieldOp::column));
        for (i, name) in names.enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            push_ident(&mut sql, name);
        }

        sql.push_str(") VALUES (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            write_placeholder(&mut sql, column, named);
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 || !self.columns.is_empty() {
                sql.push_str(", ");
            }
            field.write_value_slot(&mut sql, &mut args, named);
        }
        sql.push(')');

        match &self.on_duplicate {
            OnDuplicate::None => {}
            OnDuplicate::Raw(raw) => {
                sql.push_str(" ON DUPLICATE KEY UPDATE ");
                sql.push_str(raw);
            }
            OnDuplicate::Fields(ops) if ops.is_empty() => {}
            OnDuplicate::Fields(ops) => {
                sql.push_str(" ON DUPLICATE KEY UPDATE ");
                for (i, op) in ops.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    op.write_assign(&mut sql, &mut args, named);
                }
            }
        }

        sql.push(';');
        Ok((sql, args))
    }

    /// Rendered SQL text with `?` placeholders.
    pub fn sql(&self) -> SqlResult<String> {
        self.render(false)
            .map(|(sql, args)| finish(StatementKind::Insert, sql, args).0)
    }

    /// Rendered SQL text and the bound field arguments.
    ///
    /// Unbound columns cannot be paired with arguments, so mixing them with
    /// bound fields is reported as [`SqlError::ArgsMismatch`]. With only
    /// unbound columns the argument list is empty and the caller binds them.
    pub fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        let (sql, args) = self.render(false)?;
        if !self.columns.is_empty() && !self.fields.is_empty() {
            return Err(SqlError::ArgsMismatch {
                placeholders: crate::quote::placeholder_count(&sql),
                args: args.len(),
                sql,
            });
        }
        Ok(finish(StatementKind::Insert, sql, args))
    }

    /// Rendered SQL text with `:column` placeholders.
    pub fn name_sql(&self) -> SqlResult<String> {
        self.render(true)
            .map(|(sql, args)| finish(StatementKind::Insert, sql, args).0)
    }
}

impl SqlBuilder for Inserter {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn sql_args(&self) -> SqlResult<(String, Vec<Value>)> {
        Inserter::sql_args(self)
    }
}
