//! CREATE TRIGGER statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::TriggerTiming;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::{Column, Schema};
use crate::syntax::{walk_all, walk_opt, Comma, Identifier, Node, Qualifier, Visitor};

use super::{DeleteStatement, InsertStatement, SelectStatement, UpdateStatement};

/// The change that fires a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerEvent {
    Delete,
    Insert,
    /// `UPDATE[ OF columns]`
    Update(Vec<Column>),
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("DELETE"),
            Self::Insert => f.write_str("INSERT"),
            Self::Update(columns) if columns.is_empty() => f.write_str("UPDATE"),
            Self::Update(columns) => write!(f, "UPDATE OF {}", Comma(columns)),
        }
    }
}

/// One statement of a trigger body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerStatement {
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Select(SelectStatement),
}

impl From<InsertStatement> for TriggerStatement {
    fn from(statement: InsertStatement) -> Self {
        Self::Insert(statement)
    }
}

impl From<UpdateStatement> for TriggerStatement {
    fn from(statement: UpdateStatement) -> Self {
        Self::Update(statement)
    }
}

impl From<DeleteStatement> for TriggerStatement {
    fn from(statement: DeleteStatement) -> Self {
        Self::Delete(statement)
    }
}

impl From<SelectStatement> for TriggerStatement {
    fn from(statement: SelectStatement) -> Self {
        Self::Select(statement)
    }
}

impl TriggerStatement {
    fn as_identifier(&self) -> &dyn Identifier {
        match self {
            Self::Insert(statement) => statement,
            Self::Update(statement) => statement,
            Self::Delete(statement) => statement,
            Self::Select(statement) => statement,
        }
    }
}

impl fmt::Display for TriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(statement) => write!(f, "{}", statement.without_schema()),
            Self::Update(statement) => write!(f, "{}", statement.without_schema()),
            Self::Delete(statement) => write!(f, "{}", statement.without_schema()),
            Self::Select(statement) => write!(f, "{statement}"),
        }
    }
}

/// A CREATE TRIGGER statement.
///
/// DML statements in the body are rendered without their target schema.
///
/// ```rust
/// use winq_core::{Column, CreateTriggerStatement, DeleteStatement, ExpressionOperable};
///
/// let trigger = CreateTriggerStatement::new("cleanup")
///     .after()
///     .delete()
///     .on("parent")
///     .for_each_row()
///     .execute(
///         DeleteStatement::new("child")
///             .schema("main")
///             .where_clause(Column::new("parent").eq(Column::new("id").table("old"))),
///     );
/// assert_eq!(
///     trigger.to_string(),
///     "CREATE TRIGGER cleanup AFTER DELETE ON parent FOR EACH ROW \
///      BEGIN DELETE FROM child WHERE parent == old.id; END"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTriggerStatement {
    pub temp: bool,
    pub if_not_exists: bool,
    pub schema: Option<Schema>,
    pub name: String,
    pub timing: Option<TriggerTiming>,
    pub event: Option<TriggerEvent>,
    pub table: String,
    pub for_each_row: bool,
    pub condition: Option<Expression>,
    pub body: Vec<TriggerStatement>,
}

impl CreateTriggerStatement {
    /// Creates a trigger named `name`; it is invalid until an event, a
    /// table and a body are set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Makes the trigger `TEMP`.
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

    /// Qualifies the trigger name with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the timing.
    #[must_use]
    pub const fn timing(mut self, timing: TriggerTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// `BEFORE`
    #[must_use]
    pub const fn before(self) -> Self {
        self.timing(TriggerTiming::Before)
    }

    /// `AFTER`
    #[must_use]
    pub const fn after(self) -> Self {
        self.timing(TriggerTiming::After)
    }

    /// `INSTEAD OF`
    #[must_use]
    pub const fn instead_of(self) -> Self {
        self.timing(TriggerTiming::InsteadOf)
    }

    /// Fires on `DELETE`.
    #[must_use]
    pub fn delete(mut self) -> Self {
        self.event = Some(TriggerEvent::Delete);
        self
    }

    /// Fires on `INSERT`.
    #[must_use]
    pub fn insert(mut self) -> Self {
        self.event = Some(TriggerEvent::Insert);
        self
    }

    /// Fires on any `UPDATE`.
    #[must_use]
    pub fn update(mut self) -> Self {
        self.event = Some(TriggerEvent::Update(Vec::new()));
        self
    }

    /// Fires on `UPDATE OF columns`.
    #[must_use]
    pub fn update_of<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.event = Some(TriggerEvent::Update(
            columns.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Sets the table the trigger watches.
    #[must_use]
    pub fn on(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Adds `FOR EACH ROW`.
    #[must_use]
    pub const fn for_each_row(mut self) -> Self {
        self.for_each_row = true;
        self
    }

    /// Sets the `WHEN` condition.
    #[must_use]
    pub fn when(mut self, condition: impl Into<Expression>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Appends a statement to the body.
    #[must_use]
    pub fn execute(mut self, statement: impl Into<TriggerStatement>) -> Self {
        self.body.push(statement.into());
        self
    }
}

impl fmt::Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temp {
            f.write_str("TEMP ")?;
        }
        f.write_str("TRIGGER ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}{}", Qualifier(self.schema.as_ref()), self.name)?;
        if let Some(timing) = self.timing {
            write!(f, " {timing}")?;
        }
        if let Some(event) = &self.event {
            write!(f, " {event}")?;
        }
        write!(f, " ON {}", self.table)?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHEN {condition}")?;
        }
        f.write_str(" BEGIN ")?;
        for statement in &self.body {
            write!(f, "{statement}; ")?;
        }
        f.write_str("END")
    }
}

impl Identifier for CreateTriggerStatement {
    fn node(&self) -> Node<'_> {
        Node::CreateTriggerStatement(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && self.event.is_some()
            && !self.table.is_empty()
            && !self.body.is_empty()
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_opt(self.schema.as_ref(), visitor)?;
        if let Some(TriggerEvent::Update(columns)) = &self.event {
            walk_all(columns, visitor)?;
        }
        walk_opt(self.condition.as_ref(), visitor)?;
        self.body
            .iter()
            .try_for_each(|statement| statement.as_identifier().iterate(visitor))
    }
}
