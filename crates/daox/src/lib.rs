//! # daox
//!
//! A fluent SQL statement builder for MySQL-style databases.
//!
//! ## Features
//!
//! - **Deterministic rendering**: every terminal call re-renders from scratch
//! - **Aligned arguments**: argument order always follows `?` placeholder order
//! - **Optional predicates**: `col("x").eq(v).enable(cond)` drops cleanly, no stray `AND`
//! - **Safe defaults**: DELETE requires WHERE, INSERT/UPDATE require columns
//! - **Tag-driven columns**: `#[derive(Tagged)]` lists a struct's columns per tag key
//!
//! ## Statement builder
//!
//! ```
//! use daox::sqlbuilder::{c, col, delete, insert, select, update};
//!
//! // SELECT
//! let (sql, args) = select("user")
//!     .where_(c().and([col("age").gt(20), col("sex").eq("male").enable(false)]))
//!     .sql_args()?;
//! assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ?;");
//! assert_eq!(args.len(), 1);
//!
//! // INSERT
//! let sql = insert("user").columns(["username", "age", "sex"]).sql()?;
//! assert_eq!(sql, "INSERT INTO `user`(`username`, `age`, `sex`) VALUES (?, ?, ?);");
//!
//! // UPDATE
//! let sql = update("user")
//!     .set("age", 21)
//!     .where_(c().and([col("id").eq(1)]))
//!     .sql()?;
//! assert_eq!(sql, "UPDATE `user` SET `age` = ? WHERE `id` = ?;");
//!
//! // DELETE without WHERE is refused
//! assert!(delete("user").sql().unwrap_err().is_delete_missing_where());
//! # Ok::<(), daox::SqlError>(())
//! ```

pub mod error;
pub mod mapper;
pub mod meta;
pub mod prelude;
pub mod quote;
pub mod sqlbuilder;
pub mod value;

pub use error::{SqlError, SqlResult};
pub use mapper::{Mapper, MapperRegistry, Tagged, TaggedField, columns_for_struct, default_registry};
pub use meta::{ColumnMeta, TableMeta};
pub use sqlbuilder::{Builder, SqlBuilder};
pub use value::Value;

#[cfg(feature = "derive")]
pub use daox_derive::Tagged;
