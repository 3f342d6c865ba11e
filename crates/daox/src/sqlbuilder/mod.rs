//! Fluent SQL statement builder.
//!
//! Statements render to MySQL-style SQL with back-tick quoted identifiers and
//! positional `?` (or named `:column`) placeholders, terminated by `;`.
//!
//! # Usage
//!
//! ```
//! use daox::sqlbuilder::{Builder, c, col, desc};
//!
//! let b = Builder::new("user");
//!
//! let (sql, args) = b
//!     .select()
//!     .columns(["id", "username"])
//!     .where_(c().and([col("id").in_list([100, 101])]))
//!     .order_by([desc(["id"])])
//!     .sql_args()?;
//! assert_eq!(sql, "SELECT `id`, `username` FROM `user` WHERE `id` IN (?, ?) ORDER BY `id` DESC;");
//! assert_eq!(args.len(), 2);
//!
//! let sql = b.insert().columns(["username", "age"]).name_sql()?;
//! assert_eq!(sql, "INSERT INTO `user`(`username`, `age`) VALUES (:username, :age);");
//!
//! assert!(b.delete().sql().unwrap_err().is_delete_missing_where());
//! # Ok::<(), daox::SqlError>(())
//! ```

mod column;
mod condition;
mod delete;
mod field;
mod insert;
mod op;
mod order;
mod select;
mod traits;
mod update;

pub use column::{Column, col};
pub use condition::{Condition, ConditionBuilder, Predicate, RawCondition, c, raw};
pub use delete::Deleter;
pub use field::{Delta, FieldMode, FieldOp};
pub use insert::Inserter;
pub use op::Op;
pub use order::{Direction, OrderBy, asc, desc};
pub use select::Selector;
pub use traits::SqlBuilder;
pub use update::Updater;

use crate::meta::TableMeta;
use crate::value::Value;
use std::fmt;

/// Kind of rendered statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Count,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Count => "COUNT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        })
    }
}

/// Hand a rendered statement back to the caller, logging it when enabled.
pub(crate) fn finish(kind: StatementKind, sql: String, args: Vec<Value>) -> (String, Vec<Value>) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "daox.sql",
        kind = %kind,
        arg_count = args.len(),
        sql = %sql,
    );
    #[cfg(not(feature = "tracing"))]
    let _ = kind;
    (sql, args)
}

/// Table-bound entry point for the statement builders.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    table: String,
    insert_columns: Vec<String>,
    update_columns: Vec<String>,
}

impl Builder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Builder whose insert / update statements start from the table's columns.
    pub fn from_meta(meta: &TableMeta) -> Self {
        Self {
            table: meta.table_name.clone(),
            insert_columns: meta.insert_columns(),
            update_columns: meta.update_columns(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn select(&self) -> Selector {
        Selector::new(self.table.clone())
    }

    pub fn insert(&self) -> Inserter {
        let mut inserter = Inserter::new(self.table.clone());
        inserter.columns(self.insert_columns.iter().cloned());
        inserter
    }

    pub fn update(&self) -> Updater {
        let mut updater = Updater::new(self.table.clone());
        updater.columns(self.update_columns.iter().cloned());
        updater
    }

    pub fn delete(&self) -> Deleter {
        Deleter::new(self.table.clone())
    }
}

/// Create a SELECT builder for `table`.
pub fn select(table: impl Into<String>) -> Selector {
    Selector::new(table)
}

/// Create an INSERT builder for `table`.
pub fn insert(table: impl Into<String>) -> Inserter {
    Inserter::new(table)
}

/// Create an UPDATE builder for `table`.
pub fn update(table: impl Into<String>) -> Updater {
    Updater::new(table)
}

/// Create a DELETE builder for `table`.
///
/// Rendering fails with [`crate::SqlError::DeleteMissingWhere`] until a
/// condition with at least one predicate is set.
pub fn delete(table: impl Into<String>) -> Deleter {
    Deleter::new(table)
}

#[cfg(test)]
mod tests;
