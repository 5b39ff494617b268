//! Window definitions and aggregate filters.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::expression::Expression;
use crate::syntax::{walk_all, walk_opt, Comma, Identifier, Node, Visitor};

use super::{FrameSpec, OrderingTerm};

/// `FILTER(WHERE condition)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    pub condition: Expression,
}

impl Filter {
    /// Creates a filter.
    #[must_use]
    pub fn new(condition: impl Into<Expression>) -> Self {
        Self {
            condition: condition.into(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FILTER(WHERE {})", self.condition)
    }
}

impl Identifier for Filter {
    fn node(&self) -> Node<'_> {
        Node::Filter(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.condition.iterate(visitor)
    }
}

/// A parenthesized window definition,
/// `([base ][PARTITION BY ..][ ORDER BY ..][ frame])`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowDef {
    /// Name of a window this definition extends.
    pub base: Option<String>,
    pub partitions: Vec<Expression>,
    pub order_by: Vec<OrderingTerm>,
    pub frame: Option<FrameSpec>,
}

impl WindowDef {
    /// Creates an empty window definition, `()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the named window.
    #[must_use]
    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.base = Some(name.into());
        self
    }

    /// Appends `PARTITION BY` expressions.
    #[must_use]
    pub fn partition<I>(mut self, partitions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.partitions.extend(partitions.into_iter().map(Into::into));
        self
    }

    /// Appends `ORDER BY` terms.
    #[must_use]
    pub fn order_by<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderingTerm>,
    {
        self.order_by.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Sets the frame.
    #[must_use]
    pub fn frame(mut self, frame: FrameSpec) -> Self {
        self.frame = Some(frame);
        self
    }
}

impl fmt::Display for WindowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        f.write_str("(")?;
        if let Some(base) = &self.base {
            f.write_str(base)?;
            separator = " ";
        }
        if !self.partitions.is_empty() {
            write!(f, "{separator}PARTITION BY {}", Comma(&self.partitions))?;
            separator = " ";
        }
        if !self.order_by.is_empty() {
            write!(f, "{separator}ORDER BY {}", Comma(&self.order_by))?;
            separator = " ";
        }
        if let Some(frame) = &self.frame {
            write!(f, "{separator}{frame}")?;
        }
        f.write_str(")")
    }
}

impl Identifier for WindowDef {
    fn node(&self) -> Node<'_> {
        Node::WindowDef(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.partitions, visitor)?;
        walk_all(&self.order_by, visitor)?;
        walk_opt(self.frame.as_ref(), visitor)
    }
}
