//! DELETE statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::{CommonTableExpression, OrderingTerm, QualifiedTableName};
use crate::syntax::expression::Expression;
use crate::syntax::identifier::Schema;
use crate::syntax::{walk_all, walk_opt, Identifier, Node, SchemaRender, Visitor, WithoutSchema};

use super::same_table;
use super::select::{
    set_limit, set_limit_parameter, write_order_and_limit, write_with, Limit, LimitParameter,
};

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteStatement {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
    pub table: QualifiedTableName,
    pub condition: Option<Expression>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Limit>,
}

impl DeleteStatement {
    /// Creates a delete of every row of `table`.
    #[must_use]
    pub fn new(table: impl Into<QualifiedTableName>) -> Self {
        Self {
            recursive: false,
            ctes: Vec::new(),
            table: table.into(),
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

    /// Returns `true` when both statements delete from the same table.
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

impl SchemaRender for DeleteStatement {
    fn render(&self, f: &mut fmt::Formatter<'_>, skip_schema: bool) -> fmt::Result {
        write_with(f, self.recursive, &self.ctes)?;
        f.write_str("DELETE FROM ")?;
        self.table.render(f, skip_schema)?;
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        write_order_and_limit(f, &self.order_by, self.limit.as_ref())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

impl Identifier for DeleteStatement {
    fn node(&self) -> Node<'_> {
        Node::DeleteStatement(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.ctes, visitor)?;
        self.table.iterate(visitor)?;
        walk_opt(self.condition.as_ref(), visitor)?;
        walk_all(&self.order_by, visitor)?;
        self.limit
            .as_ref()
            .map_or(ControlFlow::Continue(()), |limit| limit.walk(visitor))
    }
}
