//! Statement nodes.

mod create_index;
mod create_table;
mod create_trigger;
mod delete;
mod drop;
mod insert;
mod pragma;
mod select;
mod transaction;
mod update;

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::identifier::Schema;
use crate::syntax::{Identifier, Node, Visitor};

pub use create_index::CreateIndexStatement;
pub use create_table::{CreateTableStatement, TableDefinition};
pub use create_trigger::{CreateTriggerStatement, TriggerEvent, TriggerStatement};
pub use delete::DeleteStatement;
pub use drop::DropStatement;
pub use insert::{InsertSource, InsertStatement};
pub use pragma::{PragmaStatement, PragmaValue};
pub use select::{CompoundSelect, Limit, LimitParameter, SelectStatement};
pub use transaction::{BeginStatement, CommitStatement, RollbackStatement};
pub use update::UpdateStatement;

/// Compares two table references, taking an unqualified table to live in
/// `main`.
fn same_table(left: (Option<&Schema>, &str), right: (Option<&Schema>, &str)) -> bool {
    fn schema_name(schema: Option<&Schema>) -> &str {
        schema.map_or("main", |schema| schema.name.as_str())
    }
    left.1 == right.1 && schema_name(left.0) == schema_name(right.0)
}

/// Any statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateTable(CreateTableStatement),
    CreateIndex(CreateIndexStatement),
    CreateTrigger(CreateTriggerStatement),
    Drop(DropStatement),
    Pragma(PragmaStatement),
    Begin(BeginStatement),
    Commit(CommitStatement),
    Rollback(RollbackStatement),
}

macro_rules! statement_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Statement {
                fn from(statement: $ty) -> Self {
                    Self::$variant(statement)
                }
            }
        )*
    };
}

statement_from!(
    SelectStatement => Select,
    InsertStatement => Insert,
    UpdateStatement => Update,
    DeleteStatement => Delete,
    CreateTableStatement => CreateTable,
    CreateIndexStatement => CreateIndex,
    CreateTriggerStatement => CreateTrigger,
    DropStatement => Drop,
    PragmaStatement => Pragma,
    BeginStatement => Begin,
    CommitStatement => Commit,
    RollbackStatement => Rollback,
);

impl Statement {
    /// Returns the wrapped statement as a trait object.
    #[must_use]
    pub fn inner(&self) -> &dyn Identifier {
        match self {
            Self::Select(statement) => statement,
            Self::Insert(statement) => statement,
            Self::Update(statement) => statement,
            Self::Delete(statement) => statement,
            Self::CreateTable(statement) => statement,
            Self::CreateIndex(statement) => statement,
            Self::CreateTrigger(statement) => statement,
            Self::Drop(statement) => statement,
            Self::Pragma(statement) => statement,
            Self::Begin(statement) => statement,
            Self::Commit(statement) => statement,
            Self::Rollback(statement) => statement,
        }
    }

    /// Returns `true` for INSERT and UPDATE statements that may write more
    /// than one row. Other statements answer `false`.
    #[must_use]
    pub fn is_multi_write(&self) -> bool {
        match self {
            Self::Insert(insert) => insert.is_multi_write(),
            Self::Update(update) => update.is_multi_write(),
            _ => false,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

/// A statement is transparent: it reports and visits the wrapped node
/// rather than a node of its own.
impl Identifier for Statement {
    fn node(&self) -> Node<'_> {
        self.inner().node()
    }

    fn is_valid(&self) -> bool {
        self.inner().is_valid()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.inner().walk_children(visitor)
    }
}
