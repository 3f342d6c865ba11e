use super::StatementKind;
use crate::error::SqlResult;
use crate::quote::interpolate;
use crate::value::Value;

/// Common surface of the statement builders.
pub trait SqlBuilder {
    /// Statement kind, used for logging.
    fn kind(&self) -> StatementKind;

    /// Render the SQL text and its arguments.
    fn sql_args(&self) -> SqlResult<(String, Vec<Value>)>;

    /// Render the SQL text only.
    fn sql(&self) -> SqlResult<String> {
        self.sql_args().map(|(sql, _)| sql)
    }

    /// Debug helper: SQL with every argument inlined as a literal.
    fn interpolated(&self) -> SqlResult<String> {
        let (sql, args) = self.sql_args()?;
        interpolate(&sql, &args)
    }
}
