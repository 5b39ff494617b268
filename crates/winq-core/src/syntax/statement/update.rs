//! UPDATE statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::{
    Assignment, CommonTableExpression, JoinClause, OrderingTerm, QualifiedTableName,
};
use crate::syntax::enums::ConflictAction;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::{Column, Schema};
use crate::syntax::{
    walk_all, walk_opt, Comma, Identifier, Node, SchemaRender, Visitor, WithoutSchema,
};

use super::same_table;
use super::select::{
    set_limit, set_limit_parameter, write_order_and_limit, write_with, Limit, LimitParameter,
};

/// An UPDATE statement.
///
/// ```rust
/// use winq_core::{BindParameter, Column, ExpressionOperable, UpdateStatement};
///
/// let update = UpdateStatement::new("testTable")
///     .set(["content"], BindParameter::new(1))
///     .where_clause(Column::new("id").gt(0));
/// assert_eq!(
///     update.to_string(),
///     "UPDATE testTable SET content = ?1 WHERE id > 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateStatement {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
    pub conflict: Option<ConflictAction>,
    pub table: QualifiedTableName,
    pub assignments: Vec<Assignment>,
    pub from: Option<JoinClause>,
    pub condition: Option<Expression>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Limit>,
}

impl UpdateStatement {
    /// Creates an update of `table` with no assignment yet.
    #[must_use]
    pub fn new(table: impl Into<QualifiedTableName>) -> Self {
        Self {
            recursive: false,
            ctes: Vec::new(),
            conflict: None,
            table: table.into(),
            assignments: Vec::new(),
            from: None,
            condition: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Appends a common table expression.
    #[must_use]
    pub fn with(mut self, cte: CommonTableExpression) -> Self {
        self.ctes.push(cte);
        self
    }

    /// Appends a common table expression and marks the WITH clause
    /// `RECURSIVE`.
    #[must_use]
    pub fn with_recursive(mut self, cte: CommonTableExpression) -> Self {
        self.recursive = true;
        self.ctes.push(cte);
        self
    }

    /// Qualifies the target table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.table.schema = Some(schema.into());
        self
    }

    /// Sets the `OR <action>` conflict resolution.
    #[must_use]
    pub const fn or(mut self, action: ConflictAction) -> Self {
        self.conflict = Some(action);
        self
    }

    /// `UPDATE OR REPLACE`
    #[must_use]
    pub const fn or_replace(self) -> Self {
        self.or(ConflictAction::Replace)
    }

    /// `UPDATE OR IGNORE`
    #[must_use]
    pub const fn or_ignore(self) -> Self {
        self.or(ConflictAction::Ignore)
    }

    /// Appends `columns = value` to the SET list.
    #[must_use]
    pub fn set<I>(mut self, columns: I, value: impl Into<Expression>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.assignments.push(Assignment::columns(columns, value));
        self
    }

    /// Sets the `FROM` clause.
    #[must_use]
    pub fn from(mut self, from: impl Into<JoinClause>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Expression>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Appends ORDER BY terms.
    #[must_use]
    pub fn order_by<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderingTerm>,
    {
        self.order_by.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Sets `LIMIT count`.
    #[must_use]
    pub fn limit(mut self, count: impl Into<Expression>) -> Self {
        set_limit(&mut self.limit, count.into());
        self
    }

    /// Sets `OFFSET offset` on the limit.
    ///
    /// # Panics
    ///
    /// In debug builds, when no limit is set.
    #[must_use]
    #[track_caller]
    pub fn offset(mut self, offset: impl Into<Expression>) -> Self {
        set_limit_parameter(&mut self.limit, LimitParameter::Offset(offset.into()));
        self
    }

    /// Returns `true` when the statement may write more than one row, that
    /// is unless it carries a literal `LIMIT 1`.
    #[must_use]
    pub fn is_multi_write(&self) -> bool {
        !self.limit.as_ref().is_some_and(Limit::is_single_row)
    }

    /// Returns `true` when both statements update the same table.
    #[must_use]
    pub fn is_targeting_same_table(&self, other: &Self) -> bool {
        same_table(
            (self.table.schema.as_ref(), &self.table.table),
            (other.table.schema.as_ref(), &other.table.table),
        )
    }

    /// Renders the statement without the target schema, as required inside
    /// a trigger body.
    #[must_use]
    pub const fn without_schema(&self) -> WithoutSchema<'_, Self> {
        WithoutSchema(self)
    }
}

impl SchemaRender for UpdateStatement {
    fn render(&self, f: &mut fmt::Formatter<'_>, skip_schema: bool) -> fmt::Result {
        write_with(f, self.recursive, &self.ctes)?;
        f.write_str("UPDATE ")?;
        if let Some(action) = self.conflict {
            write!(f, "OR {action} ")?;
        }
        self.table.render(f, skip_schema)?;
        write!(f, " SET {}", Comma(&self.assignments))?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        write_order_and_limit(f, &self.order_by, self.limit.as_ref())
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

impl Identifier for UpdateStatement {
    fn node(&self) -> Node<'_> {
        Node::UpdateStatement(self)
    }

    fn is_valid(&self) -> bool {
        !self.assignments.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.ctes, visitor)?;
        self.table.iterate(visitor)?;
        walk_all(&self.assignments, visitor)?;
        walk_opt(self.from.as_ref(), visitor)?;
        walk_opt(self.condition.as_ref(), visitor)?;
        walk_all(&self.order_by, visitor)?;
        self.limit
            .as_ref()
            .map_or(ControlFlow::Continue(()), |limit| limit.walk(visitor))
    }
}
