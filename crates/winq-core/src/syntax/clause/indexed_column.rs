//! Indexed columns and ordering terms.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::{NullOrdering, Order};
use crate::syntax::expression::Expression;
use crate::syntax::identifier::Column;
use crate::syntax::{Identifier, Node, Visitor};

/// A column or expression in an index, primary key or conflict target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedColumn {
    pub target: IndexedTarget,
    pub collation: Option<String>,
    pub order: Option<Order>,
}

/// What an [`IndexedColumn`] indexes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexedTarget {
    Column(Column),
    Expression(Expression),
}

impl IndexedColumn {
    /// Indexes a bare column.
    #[must_use]
    pub fn column(column: impl Into<Column>) -> Self {
        Self {
            target: IndexedTarget::Column(column.into()),
            collation: None,
            order: None,
        }
    }

    /// Indexes an expression.
    #[must_use]
    pub fn expression(expression: impl Into<Expression>) -> Self {
        Self {
            target: IndexedTarget::Expression(expression.into()),
            collation: None,
            order: None,
        }
    }

    /// Sets `COLLATE collation`.
    #[must_use]
    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

impl From<Column> for IndexedColumn {
    fn from(column: Column) -> Self {
        Self::column(column)
    }
}

impl From<&str> for IndexedColumn {
    fn from(column: &str) -> Self {
        Self::column(column)
    }
}

impl From<Expression> for IndexedColumn {
    fn from(expression: Expression) -> Self {
        Self::expression(expression)
    }
}

impl fmt::Display for IndexedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            IndexedTarget::Column(column) => write!(f, "{column}")?,
            IndexedTarget::Expression(expression) => write!(f, "{expression}")?,
        }
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {collation}")?;
        }
        if let Some(order) = self.order {
            write!(f, " {order}")?;
        }
        Ok(())
    }
}

impl Identifier for IndexedColumn {
    fn node(&self) -> Node<'_> {
        Node::IndexedColumn(self)
    }

    fn is_valid(&self) -> bool {
        !matches!(&self.collation, Some(collation) if collation.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match &self.target {
            IndexedTarget::Column(column) => column.iterate(visitor),
            IndexedTarget::Expression(expression) => expression.iterate(visitor),
        }
    }
}

/// An `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderingTerm {
    pub expression: Expression,
    pub collation: Option<String>,
    pub order: Option<Order>,
    pub nulls: Option<NullOrdering>,
}

impl OrderingTerm {
    /// Orders by `expression`, in the default direction.
    #[must_use]
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            collation: None,
            order: None,
            nulls: None,
        }
    }

    /// Sets `COLLATE collation`.
    #[must_use]
    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets `NULLS FIRST` or `NULLS LAST`.
    #[must_use]
    pub const fn nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = Some(nulls);
        self
    }
}

impl From<Expression> for OrderingTerm {
    fn from(expression: Expression) -> Self {
        Self::new(expression)
    }
}

impl From<Column> for OrderingTerm {
    fn from(column: Column) -> Self {
        Self::new(column)
    }
}

impl fmt::Display for OrderingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)?;
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {collation}")?;
        }
        if let Some(order) = self.order {
            write!(f, " {order}")?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {nulls}")?;
        }
        Ok(())
    }
}

impl Identifier for OrderingTerm {
    fn node(&self) -> Node<'_> {
        Node::OrderingTerm(self)
    }

    fn is_valid(&self) -> bool {
        !matches!(&self.collation, Some(collation) if collation.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.expression.iterate(visitor)
    }
}
