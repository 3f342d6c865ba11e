//! Error types for daox

use thiserror::Error;

/// Result type alias for statement rendering
pub type SqlResult<T> = Result<T, SqlError>;

/// Misuse errors reported while rendering a statement.
///
/// None of these are I/O failures: the builder never talks to a database, so
/// every variant means the caller has to fix the statement before running it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// The builder was created with an empty table name
    #[error("table name required")]
    TableNameRequired,

    /// INSERT / UPDATE rendered without any column or field
    #[error("{statement}: columns required")]
    ColumnsRequired { statement: &'static str },

    /// DELETE rendered without a single enabled predicate
    #[error("delete from `{table}` requires a where condition")]
    DeleteMissingWhere { table: String },

    /// A NaN or infinite float that would have been inlined into the SQL text
    #[error("non-finite number in {context}")]
    NonFiniteNumber { context: String },

    /// A raw predicate whose `?` count differs from its bound arguments
    #[error("param mismatch: '{sql}' has {placeholders} '?', but {args} args provided")]
    ArgsMismatch {
        sql: String,
        placeholders: usize,
        args: usize,
    },
}

impl SqlError {
    /// Create a columns-required error for the given statement kind
    pub fn columns_required(statement: &'static str) -> Self {
        Self::ColumnsRequired { statement }
    }

    /// Create a delete-missing-where error for a table
    pub fn delete_missing_where(table: impl Into<String>) -> Self {
        Self::DeleteMissingWhere {
            table: table.into(),
        }
    }

    /// Create a non-finite-number error
    pub fn non_finite_number(context: impl Into<String>) -> Self {
        Self::NonFiniteNumber {
            context: context.into(),
        }
    }

    /// Check if this is a table-name-required error
    pub fn is_table_name_required(&self) -> bool {
        matches!(self, Self::TableNameRequired)
    }

    /// Check if this is a columns-required error
    pub fn is_columns_required(&self) -> bool {
        matches!(self, Self::ColumnsRequired { .. })
    }

    /// Check if this is a non-finite-number error
    pub fn is_non_finite_number(&self) -> bool {
        matches!(self, Self::NonFiniteNumber { .. })
    }

    /// Check if this is a delete-missing-where error
    pub fn is_delete_missing_where(&self) -> bool {
        matches!(self, Self::DeleteMissingWhere { .. })
    }
}
