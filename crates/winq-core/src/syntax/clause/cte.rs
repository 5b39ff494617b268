//! Common table expressions of a `WITH` clause.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::identifier::Column;
use crate::syntax::statement::SelectStatement;
use crate::syntax::{walk_all, Comma, Identifier, Node, Visitor};

/// `name[(columns)] AS (select)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonTableExpression {
    pub name: String,
    pub columns: Vec<Column>,
    pub select: SelectStatement,
}

impl CommonTableExpression {
    /// Creates a table expression named `name` over `select`.
    #[must_use]
    pub fn new(name: impl Into<String>, select: SelectStatement) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            select,
        }
    }

    /// Appends explicit column names.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommonTableExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.columns.is_empty() {
            write!(f, "({})", Comma(&self.columns))?;
        }
        write!(f, " AS ({})", self.select)
    }
}

impl Identifier for CommonTableExpression {
    fn node(&self) -> Node<'_> {
        Node::CommonTableExpression(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.columns, visitor)?;
        self.select.iterate(visitor)
    }
}
