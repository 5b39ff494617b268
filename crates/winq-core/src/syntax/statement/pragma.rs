//! PRAGMA statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::identifier::{LiteralValue, Schema};
use crate::syntax::pragma::Pragma;
use crate::syntax::{walk_opt, Identifier, Node, Qualifier, Visitor};

/// The argument of a pragma, in either of its two spellings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PragmaValue {
    /// `name = value`
    Assign(LiteralValue),
    /// `name(value)`
    Call(LiteralValue),
}

impl PragmaValue {
    /// Returns the literal regardless of spelling.
    #[must_use]
    pub const fn literal(&self) -> &LiteralValue {
        match self {
            Self::Assign(value) | Self::Call(value) => value,
        }
    }
}

/// `PRAGMA [schema.]name[ = value]` or `PRAGMA [schema.]name(value)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PragmaStatement {
    pub schema: Option<Schema>,
    pub pragma: Option<Pragma>,
    pub value: Option<PragmaValue>,
}

impl PragmaStatement {
    /// Creates an empty statement. A pragma must be set before rendering.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema: None,
            pragma: None,
            value: None,
        }
    }

    /// Sets the pragma to query or change.
    #[must_use]
    pub fn pragma(mut self, pragma: impl Into<Pragma>) -> Self {
        self.pragma = Some(pragma.into());
        self
    }

    /// Qualifies the pragma with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Assigns a value: `name = value`.
    #[must_use]
    pub fn to_value(mut self, value: impl Into<LiteralValue>) -> Self {
        self.value = Some(PragmaValue::Assign(value.into()));
        self
    }

    /// Passes an argument: `name(value)`.
    #[must_use]
    pub fn with(mut self, value: impl Into<LiteralValue>) -> Self {
        self.value = Some(PragmaValue::Call(value.into()));
        self
    }
}

impl Default for PragmaStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Pragma> for PragmaStatement {
    fn from(pragma: Pragma) -> Self {
        Self::new().pragma(pragma)
    }
}

impl fmt::Display for PragmaStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PRAGMA ")?;
        write!(f, "{}", Qualifier(self.schema.as_ref()))?;
        if let Some(pragma) = &self.pragma {
            write!(f, "{pragma}")?;
        }
        match &self.value {
            Some(PragmaValue::Assign(value)) => write!(f, " = {value}"),
            Some(PragmaValue::Call(value)) => write!(f, "({value})"),
            None => Ok(()),
        }
    }
}

impl Identifier for PragmaStatement {
    fn node(&self) -> Node<'_> {
        Node::PragmaStatement(self)
    }

    // Pragma arguments are limited to a signed number, a name or a string.
    fn is_valid(&self) -> bool {
        let value_ok = self.value.as_ref().is_none_or(|value| match value.literal() {
            LiteralValue::Bool(_) | LiteralValue::Integer(_) | LiteralValue::String(_) => true,
            LiteralValue::Float(value) => value.is_finite(),
            _ => false,
        });
        self.pragma.is_some() && value_ok
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)?;
        walk_opt(self.pragma.as_ref(), visitor)?;
        walk_opt(self.value.as_ref().map(PragmaValue::literal), visitor)
    }
}
