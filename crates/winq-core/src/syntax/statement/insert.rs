//! INSERT statements.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::{CommonTableExpression, Upsert};
use crate::syntax::enums::ConflictAction;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::{Column, Schema};
use crate::syntax::{
    misuse, walk_all, walk_opt, Comma, Identifier, Node, Qualifier, SchemaRender, Visitor,
    WithoutSchema,
};

use super::select::{write_with, Limit};
use super::{same_table, SelectStatement};

/// Where the inserted rows come from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertSource {
    /// `VALUES(..), (..)`, one inner vector per row.
    Values(Vec<Vec<Expression>>),
    Select(Box<SelectStatement>),
    /// `DEFAULT VALUES`
    DefaultValues,
}

impl Default for InsertSource {
    fn default() -> Self {
        Self::Values(Vec::new())
    }
}

/// An INSERT statement.
///
/// ```rust
/// use winq_core::{BindParameter, InsertStatement};
///
/// let insert = InsertStatement::new()
///     .or_replace()
///     .insert_into("testTable")
///     .columns(["id", "content"])
///     .values(BindParameter::sequence(2));
/// assert_eq!(
///     insert.to_string(),
///     "INSERT OR REPLACE INTO testTable(id, content) VALUES(?1, ?2)"
/// );
/// assert!(!insert.is_multi_write());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertStatement {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
    pub conflict: Option<ConflictAction>,
    pub schema: Option<Schema>,
    pub table: String,
    pub alias: Option<String>,
    pub columns: Vec<Column>,
    pub source: InsertSource,
    pub upsert: Option<Upsert>,
}

impl InsertStatement {
    /// Creates an empty statement; it is invalid until a table and rows
    /// are set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a common table expression.
    #[must_use]
    pub fn with(mut self, cte: CommonTableExpression) -> Self {
        self.ctes.push(cte);
        self
    }

    /// Appends a common table expression and marks the WITH clause
    /// `RECURSIVE`.
    #[must_use]
    pub fn with_recursive(mut self, cte: CommonTableExpression) -> Self {
        self.recursive = true;
        self.ctes.push(cte);
        self
    }

    /// Sets the target table.
    #[must_use]
    pub fn insert_into(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Qualifies the target table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets `AS alias` on the target table.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the `OR <action>` conflict resolution.
    #[must_use]
    pub const fn or(mut self, action: ConflictAction) -> Self {
        self.conflict = Some(action);
        self
    }

    /// `INSERT OR REPLACE`
    #[must_use]
    pub const fn or_replace(self) -> Self {
        self.or(ConflictAction::Replace)
    }

    /// `INSERT OR IGNORE`
    #[must_use]
    pub const fn or_ignore(self) -> Self {
        self.or(ConflictAction::Ignore)
    }

    /// Appends target columns.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Appends a row of values.
    ///
    /// # Panics
    ///
    /// In debug builds, when the rows come from a SELECT or DEFAULT VALUES.
    #[must_use]
    #[track_caller]
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        if let InsertSource::Values(rows) = &mut self.source {
            rows.push(row.into_iter().map(Into::into).collect());
        } else {
            misuse("VALUES applied to an INSERT with another row source");
        }
        self
    }

    /// Takes the rows from a SELECT, replacing any values.
    #[must_use]
    pub fn select(mut self, select: SelectStatement) -> Self {
        self.source = InsertSource::Select(Box::new(select));
        self
    }

    /// Inserts a single row of defaults, replacing any values.
    #[must_use]
    pub fn default_values(mut self) -> Self {
        self.source = InsertSource::DefaultValues;
        self
    }

    /// Sets the `ON CONFLICT` clause.
    #[must_use]
    pub fn upsert(mut self, upsert: Upsert) -> Self {
        self.upsert = Some(upsert);
        self
    }

    /// Returns `true` when the statement may write more than one row.
    ///
    /// VALUES with a single row and DEFAULT VALUES write one row. A SELECT
    /// source writes one row only under a literal `LIMIT 1`.
    #[must_use]
    pub fn is_multi_write(&self) -> bool {
        match &self.source {
            InsertSource::Values(rows) => rows.len() > 1,
            InsertSource::Select(select) => {
                !select.limit.as_ref().is_some_and(Limit::is_single_row)
            }
            InsertSource::DefaultValues => false,
        }
    }

    /// Returns `true` when both statements insert into the same table. An
    /// unqualified table is taken to live in `main`.
    #[must_use]
    pub fn is_targeting_same_table(&self, other: &Self) -> bool {
        same_table(
            (self.schema.as_ref(), &self.table),
            (other.schema.as_ref(), &other.table),
        )
    }

    /// Renders the statement without the target schema, as required inside
    /// a trigger body.
    #[must_use]
    pub const fn without_schema(&self) -> WithoutSchema<'_, Self> {
        WithoutSchema(self)
    }
}

impl SchemaRender for InsertStatement {
    fn render(&self, f: &mut fmt::Formatter<'_>, skip_schema: bool) -> fmt::Result {
        write_with(f, self.recursive, &self.ctes)?;
        f.write_str("INSERT")?;
        if let Some(action) = self.conflict {
            write!(f, " OR {action}")?;
        }
        let schema = if skip_schema { None } else { self.schema.as_ref() };
        write!(f, " INTO {}{}", Qualifier(schema), self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        if !self.columns.is_empty() {
            write!(f, "({})", Comma(&self.columns))?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", Comma(row))?;
                }
            }
            InsertSource::Select(select) => write!(f, " {select}")?,
            InsertSource::DefaultValues => f.write_str(" DEFAULT VALUES")?,
        }
        if let Some(upsert) = &self.upsert {
            write!(f, " {upsert}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

impl Identifier for InsertStatement {
    fn node(&self) -> Node<'_> {
        Node::InsertStatement(self)
    }

    fn is_valid(&self) -> bool {
        let rows_valid = match &self.source {
            InsertSource::Values(rows) => {
                !rows.is_empty() && rows.iter().all(|row| !row.is_empty())
            }
            InsertSource::Select(_) => true,
            InsertSource::DefaultValues => self.upsert.is_none(),
        };
        rows_valid
            && !self.table.is_empty()
            && !matches!(&self.alias, Some(alias) if alias.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.ctes, visitor)?;
        walk_opt(self.schema.as_ref(), visitor)?;
        walk_all(&self.columns, visitor)?;
        match &self.source {
            InsertSource::Values(rows) => rows.iter().try_for_each(|row| walk_all(row, visitor))?,
            InsertSource::Select(select) => select.iterate(visitor)?,
            InsertSource::DefaultValues => {}
        }
        walk_opt(self.upsert.as_ref(), visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::identifier::BindParameter;

    fn insert_from(select: SelectStatement) -> InsertStatement {
        InsertStatement::new().insert_into("t").select(select)
    }

    #[test]
    fn test_insert_rendering() {
        let insert = InsertStatement::new()
            .insert_into("testTable")
            .schema(Schema::main())
            .values([1, 2])
            .values([3, 4]);
        assert_eq!(
            insert.to_string(),
            "INSERT INTO main.testTable VALUES(1, 2), (3, 4)"
        );
        assert_eq!(
            insert.without_schema().to_string(),
            "INSERT INTO testTable VALUES(1, 2), (3, 4)"
        );
    }

    #[test]
    fn test_default_values_and_upsert() {
        let insert = InsertStatement::new().insert_into("t").default_values();
        assert_eq!(insert.to_string(), "INSERT INTO t DEFAULT VALUES");
        assert!(insert.is_valid());
        let insert = insert.upsert(Upsert::new());
        assert!(!insert.is_valid());
    }

    #[test]
    fn test_multi_write_values() {
        let single = InsertStatement::new().insert_into("t").values([1]);
        assert!(!single.is_multi_write());
        let double = single.values([2]);
        assert!(double.is_multi_write());
    }

    #[test]
    fn test_multi_write_select() {
        let select = SelectStatement::new().select([Column::all()]).from("s");
        assert!(!insert_from(select.clone().limit(1)).is_multi_write());
        assert!(insert_from(select.clone().limit(2)).is_multi_write());
        assert!(insert_from(select.clone()).is_multi_write());
        assert!(insert_from(select.limit(BindParameter::colon("p"))).is_multi_write());
    }

    #[test]
    fn test_targeting_same_table() {
        let plain = InsertStatement::new().insert_into("t");
        let main = InsertStatement::new().insert_into("t").schema(Schema::main());
        let temp = InsertStatement::new().insert_into("t").schema(Schema::temp());
        assert!(plain.is_targeting_same_table(&main));
        assert!(!plain.is_targeting_same_table(&temp));
    }
}
