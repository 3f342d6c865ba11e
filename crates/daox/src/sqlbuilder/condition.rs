//! Condition trees for WHERE / HAVING clauses.
//!
//! Two builders produce the same [`Predicate`] list:
//! - [`Condition`] collects [`Column`] expressions and drops disabled ones.
//! - [`RawCondition`] collects caller-written SQL fragments with `?` args.
//!
//! Statement builders accept either through [`ConditionBuilder`].

use super::column::Column;
use super::op::Op;
use super::select::Selector;
use crate::error::{SqlError, SqlResult};
use crate::quote::placeholder_count;
use crate::value::Value;

/// One rendered boolean fragment, its join operator and bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    join: Option<Op>,
    text: String,
    args: Vec<Value>,
    has_list_op: bool,
    always_true: bool,
}

impl Predicate {
    fn new(join: Option<Op>, text: String, args: Vec<Value>) -> Self {
        Self {
            join,
            text,
            args,
            has_list_op: false,
            always_true: false,
        }
    }

    fn from_column(join: Option<Op>, column: &Column) -> Self {
        Self {
            join,
            text: column.express(),
            args: column.args(),
            has_list_op: column.has_list_op(),
            always_true: column.is_always_true(),
        }
    }

    /// AND / OR in front of this predicate; `None` for a base predicate.
    pub fn join(&self) -> Option<Op> {
        self.join
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// `true` when the predicate came from an IN / NOT IN expression.
    pub fn has_list_op(&self) -> bool {
        self.has_list_op
    }

    /// `true` when the predicate matches every row, e.g. an empty NOT IN.
    pub fn is_always_true(&self) -> bool {
        self.always_true
    }
}

/// `true` when the predicates match every row.
///
/// AND binds tighter than OR, so the list is a disjunction of AND runs; one
/// run made only of always-true predicates makes the whole clause true.
pub(crate) fn is_unrestricted(predicates: &[Predicate]) -> bool {
    let mut run_true = false;
    for (i, p) in predicates.iter().enumerate() {
        if i == 0 || p.join == Some(Op::Or) {
            if run_true {
                return true;
            }
            run_true = true;
        }
        run_true &= p.always_true;
    }
    run_true
}

/// Anything that can feed predicates into a statement's WHERE clause.
pub trait ConditionBuilder {
    /// Predicates in render order.
    fn predicates(&self) -> &[Predicate];

    /// An error recorded while the condition was assembled.
    fn build_error(&self) -> Option<&SqlError> {
        None
    }
}

impl<C: ConditionBuilder + ?Sized> ConditionBuilder for &C {
    fn predicates(&self) -> &[Predicate] {
        (**self).predicates()
    }

    fn build_error(&self) -> Option<&SqlError> {
        (**self).build_error()
    }
}

/// Write predicates joined by their operators; the first one never gets a
/// leading join.
fn write_predicates(sql: &mut String, args: &mut Vec<Value>, predicates: &[Predicate]) {
    for (i, p) in predicates.iter().enumerate() {
        if i > 0 {
            sql.push_str(p.join.unwrap_or(Op::And).text());
        }
        sql.push_str(&p.text);
        args.extend(p.args.iter().cloned());
    }
}

/// Render a condition into `(text, args)` without any keyword.
fn render_condition(cond: &dyn ConditionBuilder) -> SqlResult<(String, Vec<Value>)> {
    if let Some(err) = cond.build_error() {
        return Err(err.clone());
    }
    let mut sql = String::new();
    let mut args = Vec::new();
    write_predicates(&mut sql, &mut args, cond.predicates());
    Ok((sql, args))
}

// ==================== Condition: expression builder ====================

/// Condition tree built from [`Column`] expressions.
///
/// # Example
/// ```
/// use daox::sqlbuilder::{c, col, select};
///
/// let cond = c()
///     .and([col("age").gt(20), col("sex").eq("male").enable(false)]);
/// let (sql, args) = select("user").where_(cond).sql_args()?;
/// assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ?;");
/// assert_eq!(args.len(), 1);
/// # Ok::<(), daox::SqlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Condition {
    predicates: Vec<Predicate>,
    build_error: Option<SqlError>,
}

/// Start an empty [`Condition`].
pub fn c() -> Condition {
    Condition::new()
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a condition whose initial expressions are joined with AND.
    pub fn with<I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        Self::new().and(exprs)
    }

    /// Join for the next predicate; the first one never carries a join.
    fn next_join(&self, join: Op) -> Option<Op> {
        if self.predicates.is_empty() {
            None
        } else {
            Some(join)
        }
    }

    fn push_exprs<I>(mut self, join: Op, exprs: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        for expr in exprs.into_iter().filter(Column::is_enabled) {
            let predicate = Predicate::from_column(self.next_join(join), &expr);
            self.predicates.push(predicate);
        }
        self
    }

    /// Append enabled expressions, each joined with AND.
    pub fn and<I>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.push_exprs(Op::And, exprs)
    }

    /// Append enabled expressions, each joined with OR.
    pub fn or<I>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.push_exprs(Op::Or, exprs)
    }

    fn push_nested(
        mut self,
        join: Op,
        prefix: &str,
        rendered: SqlResult<(String, Vec<Value>)>,
        always_true: bool,
    ) -> Self {
        match rendered {
            Ok((text, _)) if text.is_empty() => {}
            Ok((text, args)) => {
                let mut predicate =
                    Predicate::new(self.next_join(join), format!("{prefix}({text})"), args);
                predicate.always_true = always_true;
                self.predicates.push(predicate);
            }
            Err(err) => {
                if self.build_error.is_none() {
                    self.build_error = Some(err);
                }
            }
        }
        self
    }

    /// Append a parenthesised sub-condition joined with AND.
    ///
    /// A sub-condition without predicates is dropped.
    pub fn and_group(self, cond: impl ConditionBuilder) -> Self {
        let always_true = is_unrestricted(cond.predicates());
        self.push_nested(Op::And, "", render_condition(&cond), always_true)
    }

    /// Append a parenthesised sub-condition joined with OR.
    pub fn or_group(self, cond: impl ConditionBuilder) -> Self {
        let always_true = is_unrestricted(cond.predicates());
        self.push_nested(Op::Or, "", render_condition(&cond), always_true)
    }

    /// Append `NOT (sub-condition)` joined with AND.
    pub fn and_not(self, cond: impl ConditionBuilder) -> Self {
        self.push_nested(Op::And, Op::Not.text(), render_condition(&cond), false)
    }

    /// Append `EXISTS (sub-select)` joined with AND.
    pub fn and_exists(self, sub: &Selector) -> Self {
        self.push_nested(Op::And, Op::Exists.text(), sub.render_subquery(), false)
    }

    /// Append `NOT EXISTS (sub-select)` joined with AND.
    pub fn and_not_exists(self, sub: &Selector) -> Self {
        let prefix = format!("{}{}", Op::Not.text(), Op::Exists.text());
        self.push_nested(Op::And, &prefix, sub.render_subquery(), false)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl ConditionBuilder for Condition {
    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }
}

// ==================== RawCondition: raw-text builder ====================

/// Condition tree built from raw SQL fragments.
///
/// Fragments are written verbatim, so identifiers must be quoted by the
/// caller. The number of `?` in each fragment must match its arguments.
///
/// # Example
/// ```
/// use daox::args;
/// use daox::sqlbuilder::{raw, select};
///
/// let name: Option<&str> = None;
/// let cond = raw()
///     .where_("`age` > ?", args![18])
///     .and_if(name.is_some(), "`name` = ?", args![name])
///     .or("`vip` = ?", args![true]);
/// let sql = select("user").where_(cond).sql()?;
/// assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ? OR `vip` = ?;");
/// # Ok::<(), daox::SqlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawCondition {
    predicates: Vec<Predicate>,
    build_error: Option<SqlError>,
}

/// Start an empty [`RawCondition`].
pub fn raw() -> RawCondition {
    RawCondition::default()
}

impl RawCondition {
    fn push(mut self, join: Option<Op>, sql: impl Into<String>, args: Vec<Value>) -> Self {
        let sql = sql.into();
        let placeholders = placeholder_count(&sql);
        if placeholders != args.len() {
            if self.build_error.is_none() {
                self.build_error = Some(SqlError::ArgsMismatch {
                    sql,
                    placeholders,
                    args: args.len(),
                });
            }
            return self;
        }
        let join = if self.predicates.is_empty() { None } else { join };
        self.predicates.push(Predicate::new(join, sql, args));
        self
    }

    /// Add the base predicate.
    pub fn where_(self, sql: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(None, sql, args)
    }

    /// Add the base predicate only when `meet` is true.
    pub fn where_if(self, meet: bool, sql: impl Into<String>, args: Vec<Value>) -> Self {
        if meet { self.where_(sql, args) } else { self }
    }

    /// Add a predicate joined with AND.
    pub fn and(self, sql: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Some(Op::And), sql, args)
    }

    /// Add a predicate joined with AND only when `meet` is true.
    pub fn and_if(self, meet: bool, sql: impl Into<String>, args: Vec<Value>) -> Self {
        if meet { self.and(sql, args) } else { self }
    }

    /// Add a predicate joined with OR.
    pub fn or(self, sql: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Some(Op::Or), sql, args)
    }

    /// Add a predicate joined with OR only when `meet` is true.
    pub fn or_if(self, meet: bool, sql: impl Into<String>, args: Vec<Value>) -> Self {
        if meet { self.or(sql, args) } else { self }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl ConditionBuilder for RawCondition {
    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }
}

// ==================== WhereClause: shared by statement builders ====================

/// Snapshot of a condition held by a statement builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct WhereClause {
    predicates: Vec<Predicate>,
    build_error: Option<SqlError>,
}

impl WhereClause {
    pub(crate) fn from_builder(cond: &dyn ConditionBuilder) -> Self {
        Self {
            predicates: cond.predicates().to_vec(),
            build_error: cond.build_error().cloned(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// No predicates, or predicates that match every row anyway.
    pub(crate) fn is_unrestricted(&self) -> bool {
        is_unrestricted(&self.predicates)
    }

    pub(crate) fn check(&self) -> SqlResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Write `<keyword><predicates>`; nothing at all when empty.
    pub(crate) fn write(&self, keyword: &str, sql: &mut String, args: &mut Vec<Value>) {
        if self.predicates.is_empty() {
            return;
        }
        sql.push_str(keyword);
        write_predicates(sql, args, &self.predicates);
    }
}
