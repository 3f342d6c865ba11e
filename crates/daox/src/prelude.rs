//! Convenient imports for typical `daox` usage.
//!
//! ```
//! use daox::prelude::*;
//! ```

pub use crate::sqlbuilder::{
    Builder, Condition, ConditionBuilder, FieldOp, OrderBy, RawCondition, SqlBuilder, asc, c, col,
    delete, desc, insert, raw, select, update,
};
pub use crate::{SqlError, SqlResult, Tagged, Value, args};
