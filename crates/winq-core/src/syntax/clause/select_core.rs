//! The body of a SELECT: either a SELECT clause or a VALUES list.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::expression::{CaseExpression, Expression, FunctionCall, WindowFunction};
use crate::syntax::identifier::{BindParameter, Column, LiteralValue};
use crate::syntax::{walk_all, walk_opt, Comma, Identifier, Node, Visitor};

use super::{JoinClause, WindowDef};

/// One entry of a result column list, `<expr>[ AS <alias>]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultColumn {
    pub expression: Expression,
    pub alias: Option<String>,
}

impl ResultColumn {
    /// Creates an unaliased result column.
    #[must_use]
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    /// Sets `AS alias`.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

macro_rules! result_column_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ResultColumn {
                fn from(value: $ty) -> Self {
                    Self::new(value)
                }
            }
        )*
    };
}

result_column_from!(
    Expression,
    Column,
    LiteralValue,
    BindParameter,
    FunctionCall,
    WindowFunction,
    CaseExpression,
);

macro_rules! result_column_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ResultColumn {
                fn from(value: $ty) -> Self {
                    Self::new(LiteralValue::from(value))
                }
            }
        )*
    };
}

result_column_from_number!(bool, i32, i64, u32, f64);

/// A bare string names a column, not a text literal.
impl From<&str> for ResultColumn {
    fn from(column: &str) -> Self {
        Self::new(Column::new(column))
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl Identifier for ResultColumn {
    fn node(&self) -> Node<'_> {
        Node::ResultColumn(self)
    }

    fn is_valid(&self) -> bool {
        !matches!(&self.alias, Some(alias) if alias.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.expression.iterate(visitor)
    }
}

/// `name AS (definition)` in a WINDOW clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedWindow {
    pub name: String,
    pub definition: WindowDef,
}

/// `SELECT [DISTINCT ]<columns>[ FROM ..][ WHERE ..][ GROUP BY ..[ HAVING ..]][ WINDOW ..]`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectClause {
    pub distinct: bool,
    pub result_columns: Vec<ResultColumn>,
    pub from: Option<JoinClause>,
    pub condition: Option<Expression>,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
    pub windows: Vec<NamedWindow>,
}

/// A select core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectCore {
    Select(SelectClause),
    /// `VALUES(..), (..)`, one inner vector per row.
    Values(Vec<Vec<Expression>>),
}

impl Default for SelectCore {
    fn default() -> Self {
        Self::Select(SelectClause::default())
    }
}

impl SelectCore {
    /// A SELECT clause over `columns`.
    #[must_use]
    pub fn select<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ResultColumn>,
    {
        Self::Select(SelectClause {
            result_columns: columns.into_iter().map(Into::into).collect(),
            ..SelectClause::default()
        })
    }

    /// A VALUES list holding a single row.
    #[must_use]
    pub fn values<I>(row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        Self::Values(vec![row.into_iter().map(Into::into).collect()])
    }
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", Comma(&self.result_columns))?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", Comma(&self.group_by))?;
            if let Some(having) = &self.having {
                write!(f, " HAVING {having}")?;
            }
        }
        for (i, window) in self.windows.iter().enumerate() {
            f.write_str(if i == 0 { " WINDOW " } else { ", " })?;
            write!(f, "{} AS {}", window.name, window.definition)?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(clause) => write!(f, "{clause}"),
            Self::Values(rows) => {
                f.write_str("VALUES")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", Comma(row))?;
                }
                Ok(())
            }
        }
    }
}

impl Identifier for SelectCore {
    fn node(&self) -> Node<'_> {
        Node::SelectCore(self)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Select(clause) => {
                !clause.result_columns.is_empty()
                    && (clause.having.is_none() || !clause.group_by.is_empty())
                    && clause.windows.iter().all(|window| !window.name.is_empty())
            }
            Self::Values(rows) => !rows.is_empty() && rows.iter().all(|row| !row.is_empty()),
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match self {
            Self::Select(clause) => {
                walk_all(&clause.result_columns, visitor)?;
                walk_opt(clause.from.as_ref(), visitor)?;
                walk_opt(clause.condition.as_ref(), visitor)?;
                walk_all(&clause.group_by, visitor)?;
                if !clause.group_by.is_empty() {
                    walk_opt(clause.having.as_ref(), visitor)?;
                }
                clause
                    .windows
                    .iter()
                    .try_for_each(|window| window.definition.iterate(visitor))
            }
            Self::Values(rows) => rows.iter().try_for_each(|row| walk_all(row, visitor)),
        }
    }
}
