//! Target tables of UPDATE and DELETE.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::identifier::Schema;
use crate::syntax::{walk_opt, Identifier, Node, Qualifier, Visitor};

/// Index hint on a table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Indexed {
    /// `INDEXED BY name`
    By(String),
    /// `NOT INDEXED`
    NotIndexed,
}

impl fmt::Display for Indexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::By(index) => write!(f, "INDEXED BY {index}"),
            Self::NotIndexed => f.write_str("NOT INDEXED"),
        }
    }
}

/// `[schema.]table[ AS alias][ INDEXED BY index| NOT INDEXED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualifiedTableName {
    pub schema: Option<Schema>,
    pub table: String,
    pub alias: Option<String>,
    pub indexed: Option<Indexed>,
}

impl QualifiedTableName {
    /// Creates an unqualified table reference.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            alias: None,
            indexed: None,
        }
    }

    /// Qualifies the table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets `AS alias`.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets `INDEXED BY index`.
    #[must_use]
    pub fn indexed_by(mut self, index: impl Into<String>) -> Self {
        self.indexed = Some(Indexed::By(index.into()));
        self
    }

    /// Sets `NOT INDEXED`.
    #[must_use]
    pub fn not_indexed(mut self) -> Self {
        self.indexed = Some(Indexed::NotIndexed);
        self
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, skip_schema: bool) -> fmt::Result {
        let schema = if skip_schema { None } else { self.schema.as_ref() };
        write!(f, "{}{}", Qualifier(schema), self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        if let Some(indexed) = &self.indexed {
            write!(f, " {indexed}")?;
        }
        Ok(())
    }
}

impl From<&str> for QualifiedTableName {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

impl From<String> for QualifiedTableName {
    fn from(table: String) -> Self {
        Self::new(table)
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

impl Identifier for QualifiedTableName {
    fn node(&self) -> Node<'_> {
        Node::QualifiedTableName(self)
    }

    fn is_valid(&self) -> bool {
        !self.table.is_empty()
            && !matches!(&self.indexed, Some(Indexed::By(index)) if index.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)
    }
}
