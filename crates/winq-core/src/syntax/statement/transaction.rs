//! Transaction control statements.

use core::fmt;

use crate::syntax::enums::TransactionType;
use crate::syntax::{Identifier, Node};

/// `BEGIN[ DEFERRED|IMMEDIATE|EXCLUSIVE]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginStatement {
    pub transaction_type: Option<TransactionType>,
}

impl BeginStatement {
    /// `BEGIN`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            transaction_type: None,
        }
    }

    /// `BEGIN DEFERRED`
    #[must_use]
    pub const fn deferred() -> Self {
        Self::with_type(TransactionType::Deferred)
    }

    /// `BEGIN IMMEDIATE`
    #[must_use]
    pub const fn immediate() -> Self {
        Self::with_type(TransactionType::Immediate)
    }

    /// `BEGIN EXCLUSIVE`
    #[must_use]
    pub const fn exclusive() -> Self {
        Self::with_type(TransactionType::Exclusive)
    }

    const fn with_type(transaction_type: TransactionType) -> Self {
        Self {
            transaction_type: Some(transaction_type),
        }
    }
}

impl fmt::Display for BeginStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BEGIN")?;
        if let Some(transaction_type) = self.transaction_type {
            write!(f, " {transaction_type}")?;
        }
        Ok(())
    }
}

impl Identifier for BeginStatement {
    fn node(&self) -> Node<'_> {
        Node::BeginStatement(self)
    }
}

/// `COMMIT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitStatement;

impl fmt::Display for CommitStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("COMMIT")
    }
}

impl Identifier for CommitStatement {
    fn node(&self) -> Node<'_> {
        Node::CommitStatement(self)
    }
}

/// `ROLLBACK[ TO savepoint]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollbackStatement {
    pub savepoint: Option<String>,
}

impl RollbackStatement {
    /// `ROLLBACK`
    #[must_use]
    pub const fn new() -> Self {
        Self { savepoint: None }
    }

    /// `ROLLBACK TO savepoint`
    #[must_use]
    pub fn to(savepoint: impl Into<String>) -> Self {
        Self {
            savepoint: Some(savepoint.into()),
        }
    }
}

impl fmt::Display for RollbackStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ROLLBACK")?;
        if let Some(savepoint) = &self.savepoint {
            write!(f, " TO {savepoint}")?;
        }
        Ok(())
    }
}

impl Identifier for RollbackStatement {
    fn node(&self) -> Node<'_> {
        Node::RollbackStatement(self)
    }

    fn is_valid(&self) -> bool {
        !matches!(&self.savepoint, Some(savepoint) if savepoint.is_empty())
    }
}
