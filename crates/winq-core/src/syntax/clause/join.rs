//! Join clauses and the table references they join.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::JoinOperator;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::{Column, Schema};
use crate::syntax::statement::SelectStatement;
use crate::syntax::{misuse, walk_all, walk_opt, Comma, Identifier, Node, Qualifier, Visitor};

use super::Indexed;

/// A table reference in a FROM clause or join.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableOrSubquery {
    /// `[schema.]table[ AS alias][ INDEXED BY ..| NOT INDEXED]`
    Table {
        schema: Option<Schema>,
        table: String,
        alias: Option<String>,
        indexed: Option<Indexed>,
    },
    /// A table-valued function, `[schema.]function(args)[ AS alias]`.
    Function {
        schema: Option<Schema>,
        function: String,
        arguments: Vec<Expression>,
        alias: Option<String>,
    },
    /// `(select)[ AS alias]`
    Select {
        select: Box<SelectStatement>,
        alias: Option<String>,
    },
    /// `(a, b)`
    List(Vec<TableOrSubquery>),
    /// `(join)`
    Join(Box<JoinClause>),
}

impl TableOrSubquery {
    /// A table reference.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            table: table.into(),
            alias: None,
            indexed: None,
        }
    }

    /// A table-valued function call.
    #[must_use]
    pub fn function<I>(function: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        Self::Function {
            schema: None,
            function: function.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            alias: None,
        }
    }

    /// A parenthesized sub-select.
    #[must_use]
    pub fn select(select: SelectStatement) -> Self {
        Self::Select {
            select: Box::new(select),
            alias: None,
        }
    }

    /// Qualifies a table or function with a schema.
    ///
    /// # Panics
    ///
    /// In debug builds, for sub-selects, lists and joins.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        match &mut self {
            Self::Table { schema: slot, .. } | Self::Function { schema: slot, .. } => {
                *slot = Some(schema.into());
            }
            Self::Select { .. } | Self::List(_) | Self::Join(_) => {
                misuse("Schema applied to a table reference without a name");
            }
        }
        self
    }

    /// Sets `AS alias` on a table, function or sub-select.
    ///
    /// # Panics
    ///
    /// In debug builds, for lists and joins.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        match &mut self {
            Self::Table { alias: slot, .. }
            | Self::Function { alias: slot, .. }
            | Self::Select { alias: slot, .. } => *slot = Some(alias.into()),
            Self::List(_) | Self::Join(_) => {
                misuse("Alias applied to a parenthesized list or join");
            }
        }
        self
    }

    /// Sets `INDEXED BY index` on a table.
    ///
    /// # Panics
    ///
    /// In debug builds, for anything but a table.
    #[must_use]
    pub fn indexed_by(self, index: impl Into<String>) -> Self {
        self.indexed(Indexed::By(index.into()))
    }

    /// Sets `NOT INDEXED` on a table.
    ///
    /// # Panics
    ///
    /// In debug builds, for anything but a table.
    #[must_use]
    pub fn not_indexed(self) -> Self {
        self.indexed(Indexed::NotIndexed)
    }

    fn indexed(mut self, hint: Indexed) -> Self {
        if let Self::Table { indexed, .. } = &mut self {
            *indexed = Some(hint);
        } else {
            misuse("Index hint applied to something other than a table");
        }
        self
    }
}

impl From<&str> for TableOrSubquery {
    fn from(table: &str) -> Self {
        Self::table(table)
    }
}

impl From<String> for TableOrSubquery {
    fn from(table: String) -> Self {
        Self::table(table)
    }
}

impl From<SelectStatement> for TableOrSubquery {
    fn from(select: SelectStatement) -> Self {
        Self::select(select)
    }
}

impl From<JoinClause> for TableOrSubquery {
    fn from(join: JoinClause) -> Self {
        Self::Join(Box::new(join))
    }
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: Option<&String>) -> fmt::Result {
    match alias {
        Some(alias) => write!(f, " AS {alias}"),
        None => Ok(()),
    }
}

impl fmt::Display for TableOrSubquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                schema,
                table,
                alias,
                indexed,
            } => {
                write!(f, "{}{table}", Qualifier(schema.as_ref()))?;
                write_alias(f, alias.as_ref())?;
                if let Some(indexed) = indexed {
                    write!(f, " {indexed}")?;
                }
                Ok(())
            }
            Self::Function {
                schema,
                function,
                arguments,
                alias,
            } => {
                write!(
                    f,
                    "{}{function}({})",
                    Qualifier(schema.as_ref()),
                    Comma(arguments)
                )?;
                write_alias(f, alias.as_ref())
            }
            Self::Select { select, alias } => {
                write!(f, "({select})")?;
                write_alias(f, alias.as_ref())
            }
            Self::List(tables) => write!(f, "({})", Comma(tables)),
            Self::Join(join) => write!(f, "({join})"),
        }
    }
}

impl Identifier for TableOrSubquery {
    fn node(&self) -> Node<'_> {
        Node::TableOrSubquery(self)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Table { table: name, .. } | Self::Function { function: name, .. } => {
                !name.is_empty()
            }
            Self::List(tables) => !tables.is_empty(),
            Self::Select { .. } | Self::Join(_) => true,
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match self {
            Self::Table { schema, .. } => walk_opt(schema.as_ref(), visitor),
            Self::Function {
                schema, arguments, ..
            } => {
                walk_opt(schema.as_ref(), visitor)?;
                walk_all(arguments, visitor)
            }
            Self::Select { select, .. } => select.iterate(visitor),
            Self::List(tables) => walk_all(tables, visitor),
            Self::Join(join) => join.iterate(visitor),
        }
    }
}

/// `ON condition` or `USING(columns)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinConstraint {
    On(Expression),
    Using(Vec<Column>),
}

impl fmt::Display for JoinConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(condition) => write!(f, "ON {condition}"),
            Self::Using(columns) => write!(f, "USING({})", Comma(columns)),
        }
    }
}

impl Identifier for JoinConstraint {
    fn node(&self) -> Node<'_> {
        Node::JoinConstraint(self)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::On(_) => true,
            Self::Using(columns) => !columns.is_empty(),
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match self {
            Self::On(condition) => condition.iterate(visitor),
            Self::Using(columns) => walk_all(columns, visitor),
        }
    }
}

/// One joined operand after the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinStep {
    pub operator: JoinOperator,
    pub operand: TableOrSubquery,
    pub constraint: Option<JoinConstraint>,
}

/// `first [<operator> <operand>[ <constraint>]]...`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinClause {
    pub first: TableOrSubquery,
    pub steps: Vec<JoinStep>,
}

impl JoinClause {
    /// Starts a join from its first operand.
    #[must_use]
    pub fn new(first: impl Into<TableOrSubquery>) -> Self {
        Self {
            first: first.into(),
            steps: Vec::new(),
        }
    }

    /// Joins `operand` with an explicit operator.
    #[must_use]
    pub fn join_with(
        mut self,
        operator: JoinOperator,
        operand: impl Into<TableOrSubquery>,
    ) -> Self {
        self.steps.push(JoinStep {
            operator,
            operand: operand.into(),
            constraint: None,
        });
        self
    }

    /// `, operand`
    #[must_use]
    pub fn comma(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Comma, operand)
    }

    /// `JOIN operand`
    #[must_use]
    pub fn join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Join, operand)
    }

    /// `LEFT JOIN operand`
    #[must_use]
    pub fn left_join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Left, operand)
    }

    /// `LEFT OUTER JOIN operand`
    #[must_use]
    pub fn left_outer_join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::LeftOuter, operand)
    }

    /// `INNER JOIN operand`
    #[must_use]
    pub fn inner_join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Inner, operand)
    }

    /// `CROSS JOIN operand`
    #[must_use]
    pub fn cross_join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Cross, operand)
    }

    /// `NATURAL JOIN operand`
    #[must_use]
    pub fn natural_join(self, operand: impl Into<TableOrSubquery>) -> Self {
        self.join_with(JoinOperator::Natural, operand)
    }

    /// Sets `ON condition` on the last joined operand.
    ///
    /// # Panics
    ///
    /// In debug builds, when nothing has been joined yet.
    #[must_use]
    pub fn on(self, condition: impl Into<Expression>) -> Self {
        self.constrain(JoinConstraint::On(condition.into()))
    }

    /// Sets `USING(columns)` on the last joined operand.
    ///
    /// # Panics
    ///
    /// In debug builds, when nothing has been joined yet.
    #[must_use]
    pub fn using<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.constrain(JoinConstraint::Using(
            columns.into_iter().map(Into::into).collect(),
        ))
    }

    fn constrain(mut self, constraint: JoinConstraint) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.constraint = Some(constraint);
        } else {
            misuse("Join constraint applied before any operand was joined");
        }
        self
    }
}

impl From<TableOrSubquery> for JoinClause {
    fn from(first: TableOrSubquery) -> Self {
        Self::new(first)
    }
}

impl From<&str> for JoinClause {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

impl fmt::Display for JoinStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator != JoinOperator::Comma {
            f.write_str(" ")?;
        }
        write!(f, "{} {}", self.operator, self.operand)?;
        if let Some(constraint) = &self.constraint {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl Identifier for JoinClause {
    fn node(&self) -> Node<'_> {
        Node::JoinClause(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.first.iterate(visitor)?;
        for step in &self.steps {
            step.operand.iterate(visitor)?;
            walk_opt(step.constraint.as_ref(), visitor)?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::operators::ExpressionOperable;

    #[test]
    fn test_join_operators() {
        let join = JoinClause::new("testTable1").left_outer_join("testTable2");
        assert_eq!(join.to_string(), "testTable1 LEFT OUTER JOIN testTable2");
        let join = JoinClause::new("testTable1").comma("testTable2");
        assert_eq!(join.to_string(), "testTable1, testTable2");
    }

    #[test]
    fn test_join_constraints() {
        let join = JoinClause::new("a")
            .join("b")
            .on(Column::new("column1").eq(Column::new("column2")));
        assert_eq!(join.to_string(), "a JOIN b ON column1 == column2");
        let join = JoinClause::new("a")
            .inner_join("b")
            .using(["column1", "column2"]);
        assert_eq!(join.to_string(), "a INNER JOIN b USING(column1, column2)");
    }

    #[test]
    fn test_table_or_subquery_forms() {
        let table = TableOrSubquery::table("t")
            .schema(Schema::main())
            .alias("x")
            .not_indexed();
        assert_eq!(table.to_string(), "main.t AS x NOT INDEXED");
        let function = TableOrSubquery::function("json_each", ["[1, 2]"]).alias("j");
        assert_eq!(function.to_string(), "json_each('[1, 2]') AS j");
        let list = TableOrSubquery::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.to_string(), "(a, b)");
        let nested = TableOrSubquery::from(JoinClause::new("a").cross_join("b"));
        assert_eq!(nested.to_string(), "(a CROSS JOIN b)");
    }

    #[test]
    #[should_panic(expected = "Join constraint applied")]
    #[cfg(debug_assertions)]
    fn test_constraint_without_step_panics_in_debug() {
        let _ = JoinClause::new("a").using(["id"]);
    }
}
