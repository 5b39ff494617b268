//! CREATE INDEX statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::IndexedColumn;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::Schema;
use crate::syntax::{walk_all, walk_opt, Comma, Identifier, Node, Qualifier, Visitor};

/// A CREATE INDEX statement.
///
/// The indexed table is never schema-qualified; the index lives in the
/// schema of its name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateIndexStatement {
    pub unique: bool,
    pub if_not_exists: bool,
    pub schema: Option<Schema>,
    pub name: String,
    pub table: String,
    pub columns: Vec<IndexedColumn>,
    /// Makes the index partial.
    pub condition: Option<Expression>,
}

impl CreateIndexStatement {
    /// Creates an index named `name` on `table`; it is invalid until a
    /// column is added.
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    /// Makes the index `UNIQUE`.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Qualifies the index name with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Appends indexed columns.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sets the `WHERE` of a partial index.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Expression>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(
            f,
            "{}{} ON {}({})",
            Qualifier(self.schema.as_ref()),
            self.name,
            self.table,
            Comma(&self.columns)
        )?;
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        Ok(())
    }
}

impl Identifier for CreateIndexStatement {
    fn node(&self) -> Node<'_> {
        Node::CreateIndexStatement(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.table.is_empty() && !self.columns.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)?;
        walk_all(&self.columns, visitor)?;
        walk_opt(self.condition.as_ref(), visitor)
    }
}
