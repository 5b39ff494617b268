//! CREATE TABLE statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::{ColumnDef, TableConstraint};
use crate::syntax::identifier::Schema;
use crate::syntax::{misuse, walk_all, walk_opt, Comma, Identifier, Node, Qualifier, Visitor};

use super::SelectStatement;

/// What a new table is defined by.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableDefinition {
    /// `(column-defs[, table-constraints])[ WITHOUT ROWID]`
    Columns {
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
        without_rowid: bool,
    },
    /// `AS select`
    Select(Box<SelectStatement>),
}

impl Default for TableDefinition {
    fn default() -> Self {
        Self::Columns {
            columns: Vec::new(),
            constraints: Vec::new(),
            without_rowid: false,
        }
    }
}

/// A CREATE TABLE statement.
///
/// ```rust
/// use winq_core::{ColumnDef, ColumnType, CreateTableStatement};
///
/// let create = CreateTableStatement::new("testTable")
///     .if_not_exists()
///     .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
///     .column(ColumnDef::new("content", ColumnType::Text));
/// assert_eq!(
///     create.to_string(),
///     "CREATE TABLE IF NOT EXISTS testTable(id INTEGER PRIMARY KEY, content TEXT)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTableStatement {
    pub temp: bool,
    pub if_not_exists: bool,
    pub schema: Option<Schema>,
    pub table: String,
    pub definition: TableDefinition,
}

impl CreateTableStatement {
    /// Creates a statement for `table`; it is invalid until a column or a
    /// select is added.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Makes the table `TEMP`.
    #[must_use]
    pub const fn temp(mut self) -> Self {
        self.temp = true;
        self
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Qualifies the table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Appends a column definition.
    ///
    /// # Panics
    ///
    /// In debug builds, when the table is defined by a select.
    #[must_use]
    #[track_caller]
    pub fn column(mut self, column: ColumnDef) -> Self {
        if let TableDefinition::Columns { columns, .. } = &mut self.definition {
            columns.push(column);
        } else {
            misuse("Column definition applied to CREATE TABLE AS");
        }
        self
    }

    /// Appends a table constraint.
    ///
    /// # Panics
    ///
    /// In debug builds, when the table is defined by a select.
    #[must_use]
    #[track_caller]
    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        if let TableDefinition::Columns { constraints, .. } = &mut self.definition {
            constraints.push(constraint);
        } else {
            misuse("Table constraint applied to CREATE TABLE AS");
        }
        self
    }

    /// Adds `WITHOUT ROWID`.
    ///
    /// # Panics
    ///
    /// In debug builds, when the table is defined by a select.
    #[must_use]
    #[track_caller]
    pub fn without_rowid(mut self) -> Self {
        if let TableDefinition::Columns { without_rowid, .. } = &mut self.definition {
            *without_rowid = true;
        } else {
            misuse("WITHOUT ROWID applied to CREATE TABLE AS");
        }
        self
    }

    /// Defines the table by a select, dropping any column definition.
    #[must_use]
    pub fn as_select(mut self, select: SelectStatement) -> Self {
        self.definition = TableDefinition::Select(Box::new(select));
        self
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temp {
            f.write_str("TEMP ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}{}", Qualifier(self.schema.as_ref()), self.table)?;
        match &self.definition {
            TableDefinition::Columns {
                columns,
                constraints,
                without_rowid,
            } => {
                write!(f, "({}", Comma(columns))?;
                if !constraints.is_empty() {
                    write!(f, ", {}", Comma(constraints))?;
                }
                f.write_str(")")?;
                if *without_rowid {
                    f.write_str(" WITHOUT ROWID")?;
                }
                Ok(())
            }
            TableDefinition::Select(select) => write!(f, " AS {select}"),
        }
    }
}

impl Identifier for CreateTableStatement {
    fn node(&self) -> Node<'_> {
        Node::CreateTableStatement(self)
    }

    fn is_valid(&self) -> bool {
        let defined = match &self.definition {
            TableDefinition::Columns { columns, .. } => !columns.is_empty(),
            TableDefinition::Select(_) => true,
        };
        defined && !self.table.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)?;
        match &self.definition {
            TableDefinition::Columns {
                columns,
                constraints,
                ..
            } => {
                walk_all(columns, visitor)?;
                walk_all(constraints, visitor)
            }
            TableDefinition::Select(select) => select.iterate(visitor),
        }
    }
}
