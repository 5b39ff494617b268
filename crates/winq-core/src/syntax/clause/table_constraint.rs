//! Table constraints.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::ConflictAction;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::Column;
use crate::syntax::{misuse, walk_all, Comma, Identifier, Node, Visitor};

use super::column_def::write_conflict;
use super::{ForeignKeyClause, IndexedColumn};

/// A table constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConstraint {
    /// Constraint name, rendered as `CONSTRAINT name`.
    pub name: Option<String>,
    pub kind: TableConstraintKind,
}

/// The forms a table constraint takes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableConstraintKind {
    PrimaryKey {
        columns: Vec<IndexedColumn>,
        conflict: Option<ConflictAction>,
    },
    Unique {
        columns: Vec<IndexedColumn>,
        conflict: Option<ConflictAction>,
    },
    Check(Expression),
    ForeignKey {
        columns: Vec<Column>,
        clause: ForeignKeyClause,
    },
}

fn indexed<I>(columns: I) -> Vec<IndexedColumn>
where
    I: IntoIterator,
    I::Item: Into<IndexedColumn>,
{
    columns.into_iter().map(Into::into).collect()
}

impl TableConstraint {
    const fn unnamed(kind: TableConstraintKind) -> Self {
        Self { name: None, kind }
    }

    /// `PRIMARY KEY(columns)`
    #[must_use]
    pub fn primary_key<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        Self::unnamed(TableConstraintKind::PrimaryKey {
            columns: indexed(columns),
            conflict: None,
        })
    }

    /// `UNIQUE(columns)`
    #[must_use]
    pub fn unique<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        Self::unnamed(TableConstraintKind::Unique {
            columns: indexed(columns),
            conflict: None,
        })
    }

    /// `CHECK(condition)`
    #[must_use]
    pub fn check(condition: impl Into<Expression>) -> Self {
        Self::unnamed(TableConstraintKind::Check(condition.into()))
    }

    /// `FOREIGN KEY(columns) REFERENCES ...`
    #[must_use]
    pub fn foreign_key<I>(columns: I, clause: ForeignKeyClause) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        Self::unnamed(TableConstraintKind::ForeignKey {
            columns: columns.into_iter().map(Into::into).collect(),
            clause,
        })
    }

    /// Names the constraint.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `ON CONFLICT` action of a primary key or unique constraint.
    ///
    /// # Panics
    ///
    /// In debug builds, for CHECK and FOREIGN KEY constraints.
    #[must_use]
    pub fn conflict(mut self, action: ConflictAction) -> Self {
        match &mut self.kind {
            TableConstraintKind::PrimaryKey { conflict, .. }
            | TableConstraintKind::Unique { conflict, .. } => *conflict = Some(action),
            TableConstraintKind::Check(_) | TableConstraintKind::ForeignKey { .. } => {
                misuse("ON CONFLICT applied to a constraint that does not take one");
            }
        }
        self
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey { columns, conflict } => {
                write!(f, "PRIMARY KEY({})", Comma(columns))?;
                write_conflict(f, *conflict)
            }
            TableConstraintKind::Unique { columns, conflict } => {
                write!(f, "UNIQUE({})", Comma(columns))?;
                write_conflict(f, *conflict)
            }
            TableConstraintKind::Check(condition) => write!(f, "CHECK({condition})"),
            TableConstraintKind::ForeignKey { columns, clause } => {
                write!(f, "FOREIGN KEY({}) {clause}", Comma(columns))
            }
        }
    }
}

impl Identifier for TableConstraint {
    fn node(&self) -> Node<'_> {
        Node::TableConstraint(self)
    }

    fn is_valid(&self) -> bool {
        let named = !matches!(&self.name, Some(name) if name.is_empty());
        named
            && match &self.kind {
                TableConstraintKind::PrimaryKey { columns, .. }
                | TableConstraintKind::Unique { columns, .. } => !columns.is_empty(),
                TableConstraintKind::ForeignKey { columns, .. } => !columns.is_empty(),
                TableConstraintKind::Check(_) => true,
            }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match &self.kind {
            TableConstraintKind::PrimaryKey { columns, .. }
            | TableConstraintKind::Unique { columns, .. } => walk_all(columns, visitor),
            TableConstraintKind::Check(condition) => condition.iterate(visitor),
            TableConstraintKind::ForeignKey { columns, clause } => {
                walk_all(columns, visitor)?;
                clause.iterate(visitor)
            }
        }
    }
}
