//! The RAISE function, used inside trigger bodies.

use core::fmt;

use crate::syntax::enums::RaiseKind;
use crate::syntax::identifier::write_quoted;
use crate::syntax::{Identifier, Node};

/// `RAISE(IGNORE)` or `RAISE(ROLLBACK|ABORT|FAIL, 'message')`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaiseFunction {
    Ignore,
    Rollback(String),
    Abort(String),
    Fail(String),
}

impl RaiseFunction {
    /// `RAISE(ROLLBACK, message)`
    #[must_use]
    pub fn rollback(message: impl Into<String>) -> Self {
        Self::Rollback(message.into())
    }

    /// `RAISE(ABORT, message)`
    #[must_use]
    pub fn abort(message: impl Into<String>) -> Self {
        Self::Abort(message.into())
    }

    /// `RAISE(FAIL, message)`
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    /// Returns the kind keyword of this call.
    #[must_use]
    pub const fn kind(&self) -> RaiseKind {
        match self {
            Self::Ignore => RaiseKind::Ignore,
            Self::Rollback(_) => RaiseKind::Rollback,
            Self::Abort(_) => RaiseKind::Abort,
            Self::Fail(_) => RaiseKind::Fail,
        }
    }

    /// Returns the error message, if this kind takes one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ignore => None,
            Self::Rollback(message) | Self::Abort(message) | Self::Fail(message) => Some(message),
        }
    }
}

impl fmt::Display for RaiseFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAISE({}", self.kind())?;
        if let Some(message) = self.message() {
            f.write_str(", ")?;
            write_quoted(f, message)?;
        }
        f.write_str(")")
    }
}

impl Identifier for RaiseFunction {
    fn node(&self) -> Node<'_> {
        Node::RaiseFunction(self)
    }
}
