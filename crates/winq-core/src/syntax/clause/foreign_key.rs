//! Foreign key clauses.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::{Deferrable, ForeignKeyAction, MatchType};
use crate::syntax::identifier::Column;
use crate::syntax::{walk_all, Comma, Identifier, Node, Visitor};

/// `REFERENCES table[(columns)] [actions][ MATCH type][ deferrable]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKeyClause {
    /// Referenced table.
    pub table: String,
    /// Referenced columns. Empty means the parent's primary key.
    pub columns: Vec<Column>,
    /// ON DELETE / ON UPDATE actions, in declaration order.
    pub triggers: Vec<ForeignKeyTrigger>,
    pub match_type: Option<MatchType>,
    pub deferrable: Option<Deferrable>,
}

/// One `ON DELETE` or `ON UPDATE` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForeignKeyTrigger {
    OnDelete(ForeignKeyAction),
    OnUpdate(ForeignKeyAction),
}

impl ForeignKeyClause {
    /// Creates a clause referencing `table`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            triggers: Vec::new(),
            match_type: None,
            deferrable: None,
        }
    }

    /// Appends a referenced column.
    #[must_use]
    pub fn column(mut self, column: impl Into<Column>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Appends several referenced columns.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds `ON DELETE action`.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.triggers.push(ForeignKeyTrigger::OnDelete(action));
        self
    }

    /// Adds `ON UPDATE action`.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.triggers.push(ForeignKeyTrigger::OnUpdate(action));
        self
    }

    /// Sets `MATCH type`.
    #[must_use]
    pub const fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    /// Sets the deferrable mode.
    #[must_use]
    pub const fn deferrable(mut self, deferrable: Deferrable) -> Self {
        self.deferrable = Some(deferrable);
        self
    }
}

impl fmt::Display for ForeignKeyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnDelete(action) => write!(f, "ON DELETE {action}"),
            Self::OnUpdate(action) => write!(f, "ON UPDATE {action}"),
        }
    }
}

impl fmt::Display for ForeignKeyClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({})", Comma(&self.columns))?;
        }
        for trigger in &self.triggers {
            write!(f, " {trigger}")?;
        }
        if let Some(match_type) = self.match_type {
            write!(f, " MATCH {match_type}")?;
        }
        if let Some(deferrable) = self.deferrable {
            write!(f, " {deferrable}")?;
        }
        Ok(())
    }
}

impl Identifier for ForeignKeyClause {
    fn node(&self) -> Node<'_> {
        Node::ForeignKeyClause(self)
    }

    fn is_valid(&self) -> bool {
        !self.table.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.columns, visitor)
    }
}
