//! DROP statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::DropKind;
use crate::syntax::identifier::Schema;
use crate::syntax::{walk_opt, Identifier, Node, Qualifier, Visitor};

/// `DROP TABLE|INDEX|VIEW|TRIGGER [IF EXISTS ][schema.]name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropStatement {
    pub kind: DropKind,
    pub if_exists: bool,
    pub schema: Option<Schema>,
    pub name: String,
}

impl DropStatement {
    /// Drops the object `name` of the given kind.
    #[must_use]
    pub fn new(kind: DropKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            if_exists: false,
            schema: None,
            name: name.into(),
        }
    }

    /// `DROP TABLE name`
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::new(DropKind::Table, name)
    }

    /// `DROP INDEX name`
    #[must_use]
    pub fn index(name: impl Into<String>) -> Self {
        Self::new(DropKind::Index, name)
    }

    /// `DROP VIEW name`
    #[must_use]
    pub fn view(name: impl Into<String>) -> Self {
        Self::new(DropKind::View, name)
    }

    /// `DROP TRIGGER name`
    #[must_use]
    pub fn trigger(name: impl Into<String>) -> Self {
        Self::new(DropKind::Trigger, name)
    }

    /// Adds `IF EXISTS`.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Qualifies the name with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.kind)?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}{}", Qualifier(self.schema.as_ref()), self.name)
    }
}

impl Identifier for DropStatement {
    fn node(&self) -> Node<'_> {
        Node::DropStatement(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_rendering() {
        assert_eq!(DropStatement::table("t").to_string(), "DROP TABLE t");
        assert_eq!(
            DropStatement::index("idx")
                .if_exists()
                .schema("main")
                .to_string(),
            "DROP INDEX IF EXISTS main.idx"
        );
        assert_eq!(DropStatement::view("v").to_string(), "DROP VIEW v");
        assert_eq!(DropStatement::trigger("tr").to_string(), "DROP TRIGGER tr");
    }
}
