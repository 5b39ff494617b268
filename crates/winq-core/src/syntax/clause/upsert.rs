//! `ON CONFLICT` clauses of INSERT and SET lists of UPDATE.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::expression::Expression;
use crate::syntax::identifier::Column;
use crate::syntax::{misuse, walk_all, walk_opt, Comma, Identifier, Node, Visitor};

use super::IndexedColumn;

/// `column = value` or `(a, b) = value`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub columns: Vec<Column>,
    pub value: Expression,
}

impl Assignment {
    /// Assigns `value` to a single column.
    #[must_use]
    pub fn new(column: impl Into<Column>, value: impl Into<Expression>) -> Self {
        Self {
            columns: vec![column.into()],
            value: value.into(),
        }
    }

    /// Assigns `value` to a parenthesized column list.
    #[must_use]
    pub fn columns<I>(columns: I, value: impl Into<Expression>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.columns.as_slice() {
            [column] => write!(f, "{column}")?,
            columns => write!(f, "({})", Comma(columns))?,
        }
        write!(f, " = {}", self.value)
    }
}

impl Identifier for Assignment {
    fn node(&self) -> Node<'_> {
        Node::Assignment(self)
    }

    fn is_valid(&self) -> bool {
        !self.columns.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.columns, visitor)?;
        self.value.iterate(visitor)
    }
}

/// What an upsert does on conflict.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpsertAction {
    #[default]
    Nothing,
    Update {
        assignments: Vec<Assignment>,
        condition: Option<Expression>,
    },
}

/// `ON CONFLICT[(target)[ WHERE ..]] DO NOTHING|DO UPDATE SET ..[ WHERE ..]`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Upsert {
    pub target: Vec<IndexedColumn>,
    /// Only rendered with a non-empty target.
    pub target_condition: Option<Expression>,
    pub action: UpsertAction,
}

impl Upsert {
    /// Creates `ON CONFLICT DO NOTHING`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends columns to the conflict target.
    #[must_use]
    pub fn indexed_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        self.target.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sets the `WHERE` of the conflict target.
    #[must_use]
    pub fn target_condition(mut self, condition: impl Into<Expression>) -> Self {
        self.target_condition = Some(condition.into());
        self
    }

    /// Switches the action to `DO NOTHING`, dropping any assignment.
    #[must_use]
    pub fn do_nothing(mut self) -> Self {
        self.action = UpsertAction::Nothing;
        self
    }

    /// Appends a `SET` assignment, switching the action to `DO UPDATE`.
    #[must_use]
    pub fn set<I>(mut self, columns: I, value: impl Into<Expression>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        let assignment = Assignment::columns(columns, value);
        match &mut self.action {
            UpsertAction::Update { assignments, .. } => assignments.push(assignment),
            UpsertAction::Nothing => {
                self.action = UpsertAction::Update {
                    assignments: vec![assignment],
                    condition: None,
                };
            }
        }
        self
    }

    /// Sets the `WHERE` of `DO UPDATE`.
    ///
    /// # Panics
    ///
    /// In debug builds, when the action is `DO NOTHING`.
    #[must_use]
    pub fn update_condition(mut self, condition: impl Into<Expression>) -> Self {
        if let UpsertAction::Update { condition: slot, .. } = &mut self.action {
            *slot = Some(condition.into());
        } else {
            misuse("Update condition applied to DO NOTHING");
        }
        self
    }
}

impl fmt::Display for Upsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ON CONFLICT")?;
        if !self.target.is_empty() {
            write!(f, "({})", Comma(&self.target))?;
            if let Some(condition) = &self.target_condition {
                write!(f, " WHERE {condition}")?;
            }
        }
        match &self.action {
            UpsertAction::Nothing => f.write_str(" DO NOTHING"),
            UpsertAction::Update {
                assignments,
                condition,
            } => {
                write!(f, " DO UPDATE SET {}", Comma(assignments))?;
                if let Some(condition) = condition {
                    write!(f, " WHERE {condition}")?;
                }
                Ok(())
            }
        }
    }
}

impl Identifier for Upsert {
    fn node(&self) -> Node<'_> {
        Node::Upsert(self)
    }

    fn is_valid(&self) -> bool {
        match &self.action {
            UpsertAction::Nothing => true,
            UpsertAction::Update { assignments, .. } => !assignments.is_empty(),
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.target, visitor)?;
        if !self.target.is_empty() {
            walk_opt(self.target_condition.as_ref(), visitor)?;
        }
        match &self.action {
            UpsertAction::Nothing => ControlFlow::Continue(()),
            UpsertAction::Update {
                assignments,
                condition,
            } => {
                walk_all(assignments, visitor)?;
                walk_opt(condition.as_ref(), visitor)
            }
        }
    }
}
