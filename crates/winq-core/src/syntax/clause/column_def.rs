//! Column definitions and column constraints.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::{ColumnType, ConflictAction, Order};
use crate::syntax::expression::Expression;
use crate::syntax::identifier::Column;
use crate::syntax::{misuse, walk_all, Identifier, Node, Visitor};

use super::ForeignKeyClause;

/// A column definition for CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDef {
    /// Column being defined.
    pub column: Column,
    /// Optional type affinity.
    pub column_type: Option<ColumnType>,
    /// Constraints, in declaration order.
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    /// Creates a typed column definition.
    #[must_use]
    pub fn new(column: impl Into<Column>, column_type: ColumnType) -> Self {
        Self {
            column: column.into(),
            column_type: Some(column_type),
            constraints: Vec::new(),
        }
    }

    /// Creates a column definition without a type.
    #[must_use]
    pub fn untyped(column: impl Into<Column>) -> Self {
        Self {
            column: column.into(),
            column_type: None,
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds `PRIMARY KEY`.
    #[must_use]
    pub fn primary_key(self) -> Self {
        self.constraint(ColumnConstraint::primary_key())
    }

    /// Adds `NOT NULL`.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.constraint(ColumnConstraint::not_null())
    }

    /// Adds `UNIQUE`.
    #[must_use]
    pub fn unique(self) -> Self {
        self.constraint(ColumnConstraint::unique())
    }

    /// Adds `DEFAULT value`.
    #[must_use]
    pub fn default(self, value: impl Into<Expression>) -> Self {
        self.constraint(ColumnConstraint::default(value))
    }

    /// Returns `true` if any constraint is a primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::PrimaryKey { .. }))
    }

    /// Returns `true` if the primary key constraint auto-increments.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.constraints.iter().any(|c| {
            matches!(
                c.kind,
                ColumnConstraintKind::PrimaryKey {
                    auto_increment: true,
                    ..
                }
            )
        })
    }

    /// Returns `true` if any constraint is a unique constraint.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::Unique { .. }))
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(column_type) = self.column_type {
            write!(f, " {column_type}")?;
        }
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl Identifier for ColumnDef {
    fn node(&self) -> Node<'_> {
        Node::ColumnDef(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.column.iterate(visitor)?;
        walk_all(&self.constraints, visitor)
    }
}

/// A column constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnConstraint {
    /// Constraint name, rendered as `CONSTRAINT name`.
    pub name: Option<String>,
    pub kind: ColumnConstraintKind,
}

/// The forms a column constraint takes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnConstraintKind {
    PrimaryKey {
        order: Option<Order>,
        conflict: Option<ConflictAction>,
        auto_increment: bool,
    },
    NotNull {
        conflict: Option<ConflictAction>,
    },
    Unique {
        conflict: Option<ConflictAction>,
    },
    Check(Expression),
    Default(Expression),
    Collate(String),
    ForeignKey(ForeignKeyClause),
    /// FTS `UNINDEXED` column option.
    UnIndexed,
}

impl ColumnConstraint {
    const fn unnamed(kind: ColumnConstraintKind) -> Self {
        Self { name: None, kind }
    }

    /// `PRIMARY KEY`
    #[must_use]
    pub const fn primary_key() -> Self {
        Self::unnamed(ColumnConstraintKind::PrimaryKey {
            order: None,
            conflict: None,
            auto_increment: false,
        })
    }

    /// `NOT NULL`
    #[must_use]
    pub const fn not_null() -> Self {
        Self::unnamed(ColumnConstraintKind::NotNull { conflict: None })
    }

    /// `UNIQUE`
    #[must_use]
    pub const fn unique() -> Self {
        Self::unnamed(ColumnConstraintKind::Unique { conflict: None })
    }

    /// `CHECK(condition)`
    #[must_use]
    pub fn check(condition: impl Into<Expression>) -> Self {
        Self::unnamed(ColumnConstraintKind::Check(condition.into()))
    }

    /// `DEFAULT value`
    #[must_use]
    pub fn default(value: impl Into<Expression>) -> Self {
        Self::unnamed(ColumnConstraintKind::Default(value.into()))
    }

    /// `COLLATE collation`
    #[must_use]
    pub fn collate(collation: impl Into<String>) -> Self {
        Self::unnamed(ColumnConstraintKind::Collate(collation.into()))
    }

    /// `REFERENCES ...`
    #[must_use]
    pub const fn foreign_key(clause: ForeignKeyClause) -> Self {
        Self::unnamed(ColumnConstraintKind::ForeignKey(clause))
    }

    /// `UNINDEXED`
    #[must_use]
    pub const fn un_indexed() -> Self {
        Self::unnamed(ColumnConstraintKind::UnIndexed)
    }

    /// Names the constraint.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the sort order of a primary key.
    ///
    /// # Panics
    ///
    /// In debug builds, when this is not a primary key.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        if let ColumnConstraintKind::PrimaryKey { order: slot, .. } = &mut self.kind {
            *slot = Some(order);
        } else {
            misuse("Order applied to a constraint that is not a primary key");
        }
        self
    }

    /// Sets `AUTOINCREMENT` on a primary key.
    ///
    /// # Panics
    ///
    /// In debug builds, when this is not a primary key.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        if let ColumnConstraintKind::PrimaryKey { auto_increment, .. } = &mut self.kind {
            *auto_increment = true;
        } else {
            misuse("AUTOINCREMENT applied to a constraint that is not a primary key");
        }
        self
    }

    /// Sets the `ON CONFLICT` action of a primary key, NOT NULL or UNIQUE
    /// constraint.
    ///
    /// # Panics
    ///
    /// In debug builds, for the other constraint kinds.
    #[must_use]
    pub fn conflict(mut self, action: ConflictAction) -> Self {
        match &mut self.kind {
            ColumnConstraintKind::PrimaryKey { conflict, .. }
            | ColumnConstraintKind::NotNull { conflict }
            | ColumnConstraintKind::Unique { conflict } => *conflict = Some(action),
            _ => misuse("ON CONFLICT applied to a constraint that does not take one"),
        }
        self
    }
}

pub(super) fn write_conflict(
    f: &mut fmt::Formatter<'_>,
    conflict: Option<ConflictAction>,
) -> fmt::Result {
    match conflict {
        Some(action) => write!(f, " ON CONFLICT {action}"),
        None => Ok(()),
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        match &self.kind {
            ColumnConstraintKind::PrimaryKey {
                order,
                conflict,
                auto_increment,
            } => {
                f.write_str("PRIMARY KEY")?;
                if let Some(order) = order {
                    write!(f, " {order}")?;
                }
                write_conflict(f, *conflict)?;
                if *auto_increment {
                    f.write_str(" AUTOINCREMENT")?;
                }
                Ok(())
            }
            ColumnConstraintKind::NotNull { conflict } => {
                f.write_str("NOT NULL")?;
                write_conflict(f, *conflict)
            }
            ColumnConstraintKind::Unique { conflict } => {
                f.write_str("UNIQUE")?;
                write_conflict(f, *conflict)
            }
            ColumnConstraintKind::Check(condition) => write!(f, "CHECK({condition})"),
            ColumnConstraintKind::Default(value @ Expression::LiteralValue(_)) => {
                write!(f, "DEFAULT {value}")
            }
            ColumnConstraintKind::Default(value) => write!(f, "DEFAULT ({value})"),
            ColumnConstraintKind::Collate(collation) => write!(f, "COLLATE {collation}"),
            ColumnConstraintKind::ForeignKey(clause) => write!(f, "{clause}"),
            ColumnConstraintKind::UnIndexed => f.write_str("UNINDEXED"),
        }
    }
}

impl Identifier for ColumnConstraint {
    fn node(&self) -> Node<'_> {
        Node::ColumnConstraint(self)
    }

    fn is_valid(&self) -> bool {
        let named = !matches!(&self.name, Some(name) if name.is_empty());
        match &self.kind {
            ColumnConstraintKind::Collate(collation) => named && !collation.is_empty(),
            _ => named,
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match &self.kind {
            ColumnConstraintKind::Check(expression) | ColumnConstraintKind::Default(expression) => {
                expression.iterate(visitor)
            }
            ColumnConstraintKind::ForeignKey(clause) => clause.iterate(visitor),
            _ => ControlFlow::Continue(()),
        }
    }
}
