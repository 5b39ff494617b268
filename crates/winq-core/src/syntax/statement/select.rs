//! SELECT statements, compound selects and LIMIT clauses.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::clause::{
    CommonTableExpression, JoinClause, NamedWindow, OrderingTerm, ResultColumn, SelectClause,
    SelectCore, WindowDef,
};
use crate::syntax::enums::CompoundOperator;
use crate::syntax::expression::Expression;
use crate::syntax::identifier::LiteralValue;
use crate::syntax::{misuse, walk_all, Comma, Identifier, Node, Visitor};

/// What the second number of a LIMIT clause means.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LimitParameter {
    #[default]
    NotSet,
    /// `LIMIT count OFFSET offset`
    Offset(Expression),
    /// `LIMIT count, end`
    End(Expression),
}

/// A LIMIT clause, shared by SELECT, UPDATE and DELETE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limit {
    pub count: Expression,
    pub parameter: LimitParameter,
}

impl Limit {
    /// Creates `LIMIT count`.
    #[must_use]
    pub fn new(count: impl Into<Expression>) -> Self {
        Self {
            count: count.into(),
            parameter: LimitParameter::NotSet,
        }
    }

    /// Returns `true` only for a literal `LIMIT 1` with no second number.
    ///
    /// Bind parameters, computed limits and the two-number forms all count
    /// as possibly matching several rows.
    #[must_use]
    pub const fn is_single_row(&self) -> bool {
        matches!(
            (&self.count, &self.parameter),
            (
                Expression::LiteralValue(LiteralValue::Integer(1)),
                LimitParameter::NotSet
            )
        )
    }

    pub(crate) fn walk(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        self.count.iterate(visitor)?;
        match &self.parameter {
            LimitParameter::NotSet => ControlFlow::Continue(()),
            LimitParameter::Offset(second) | LimitParameter::End(second) => {
                second.iterate(visitor)
            }
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.count)?;
        match &self.parameter {
            LimitParameter::NotSet => Ok(()),
            LimitParameter::Offset(offset) => write!(f, " OFFSET {offset}"),
            LimitParameter::End(end) => write!(f, ", {end}"),
        }
    }
}

/// Writes the ` ORDER BY ..` and ` LIMIT ..` tail of a statement.
pub(crate) fn write_order_and_limit(
    f: &mut fmt::Formatter<'_>,
    order_by: &[OrderingTerm],
    limit: Option<&Limit>,
) -> fmt::Result {
    if !order_by.is_empty() {
        write!(f, " ORDER BY {}", Comma(order_by))?;
    }
    if let Some(limit) = limit {
        write!(f, " {limit}")?;
    }
    Ok(())
}

/// Writes the `WITH [RECURSIVE ]..` prefix of a statement, with its
/// trailing space.
pub(crate) fn write_with(
    f: &mut fmt::Formatter<'_>,
    recursive: bool,
    ctes: &[CommonTableExpression],
) -> fmt::Result {
    if ctes.is_empty() {
        return Ok(());
    }
    f.write_str("WITH ")?;
    if recursive {
        f.write_str("RECURSIVE ")?;
    }
    write!(f, "{} ", Comma(ctes))
}

/// Sets the count of an optional LIMIT, keeping its second number.
pub(crate) fn set_limit(limit: &mut Option<Limit>, count: Expression) {
    match limit {
        Some(limit) => limit.count = count,
        None => *limit = Some(Limit::new(count)),
    }
}

/// Sets the second number of an existing LIMIT.
#[track_caller]
pub(crate) fn set_limit_parameter(limit: &mut Option<Limit>, parameter: LimitParameter) {
    match limit {
        Some(limit) => limit.parameter = parameter,
        None => misuse("Offset applied before a limit was set"),
    }
}

/// A select core joined to the previous one by a set operator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompoundSelect {
    pub operator: CompoundOperator,
    pub core: SelectCore,
}

/// A SELECT statement.
///
/// Clause builders such as [`SelectStatement::select`] and
/// [`SelectStatement::where_clause`] apply to the last select core, which
/// is the one opened by the most recent compound operator.
///
/// ```rust
/// use winq_core::{Column, ExpressionOperable, SelectStatement};
///
/// let select = SelectStatement::new()
///     .select([Column::new("id")])
///     .from("a")
///     .union()
///     .select([Column::new("id")])
///     .from("b")
///     .order_by([Column::new("id").desc()])
///     .limit(10);
/// assert_eq!(
///     select.to_string(),
///     "SELECT id FROM a UNION SELECT id FROM b ORDER BY id DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectStatement {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
    pub core: SelectCore,
    pub compounds: Vec<CompoundSelect>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Limit>,
}

impl SelectStatement {
    /// Creates an empty statement; it is invalid until result columns or
    /// values are added.
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

    fn last_core(&mut self) -> &mut SelectCore {
        match self.compounds.last_mut() {
            Some(compound) => &mut compound.core,
            None => &mut self.core,
        }
    }

    #[track_caller]
    fn clause(&mut self) -> Option<&mut SelectClause> {
        match self.last_core() {
            SelectCore::Select(clause) => Some(clause),
            SelectCore::Values(_) => {
                misuse("SELECT clause applied to a VALUES core");
                None
            }
        }
    }

    /// Appends result columns to the last core.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ResultColumn>,
    {
        if let Some(clause) = self.clause() {
            clause
                .result_columns
                .extend(columns.into_iter().map(Into::into));
        }
        self
    }

    /// Marks the last core `DISTINCT`.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn distinct(mut self) -> Self {
        if let Some(clause) = self.clause() {
            clause.distinct = true;
        }
        self
    }

    /// Sets the FROM clause of the last core.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn from(mut self, from: impl Into<JoinClause>) -> Self {
        if let Some(clause) = self.clause() {
            clause.from = Some(from.into());
        }
        self
    }

    /// Sets the WHERE condition of the last core.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn where_clause(mut self, condition: impl Into<Expression>) -> Self {
        if let Some(clause) = self.clause() {
            clause.condition = Some(condition.into());
        }
        self
    }

    /// Appends GROUP BY expressions to the last core.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn group_by<I>(mut self, expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        if let Some(clause) = self.clause() {
            clause
                .group_by
                .extend(expressions.into_iter().map(Into::into));
        }
        self
    }

    /// Sets the HAVING condition of the last core. It only renders along
    /// with a GROUP BY.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn having(mut self, condition: impl Into<Expression>) -> Self {
        if let Some(clause) = self.clause() {
            clause.having = Some(condition.into());
        }
        self
    }

    /// Appends a named window to the last core.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core is a VALUES list.
    #[must_use]
    #[track_caller]
    pub fn window(mut self, name: impl Into<String>, definition: WindowDef) -> Self {
        if let Some(clause) = self.clause() {
            clause.windows.push(NamedWindow {
                name: name.into(),
                definition,
            });
        }
        self
    }

    /// Appends a row to the last core, turning an empty core into a
    /// VALUES list.
    ///
    /// # Panics
    ///
    /// In debug builds, when the last core already is a SELECT clause with
    /// content.
    #[must_use]
    #[track_caller]
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let row: Vec<Expression> = row.into_iter().map(Into::into).collect();
        let core = self.last_core();
        if let SelectCore::Values(rows) = &mut *core {
            rows.push(row);
        } else if *core == SelectCore::default() {
            *core = SelectCore::Values(vec![row]);
        } else {
            misuse("VALUES applied to a SELECT core");
        }
        self
    }

    /// Opens a new select core after `operator`.
    #[must_use]
    pub fn compound(mut self, operator: CompoundOperator) -> Self {
        self.compounds.push(CompoundSelect {
            operator,
            core: SelectCore::default(),
        });
        self
    }

    /// Opens a new select core after `UNION`.
    #[must_use]
    pub fn union(self) -> Self {
        self.compound(CompoundOperator::Union)
    }

    /// Opens a new select core after `UNION ALL`.
    #[must_use]
    pub fn union_all(self) -> Self {
        self.compound(CompoundOperator::UnionAll)
    }

    /// Opens a new select core after `INTERSECT`.
    #[must_use]
    pub fn intersect(self) -> Self {
        self.compound(CompoundOperator::Intersect)
    }

    /// Opens a new select core after `EXCEPT`.
    #[must_use]
    pub fn except(self) -> Self {
        self.compound(CompoundOperator::Except)
    }

    /// Appends ORDER BY terms.
    #[must_use]
    pub fn order_by<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderingTerm>,
    {
        self.order_by.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Sets `LIMIT count`.
    #[must_use]
    pub fn limit(mut self, count: impl Into<Expression>) -> Self {
        set_limit(&mut self.limit, count.into());
        self
    }

    /// Sets `OFFSET offset` on the limit.
    ///
    /// # Panics
    ///
    /// In debug builds, when no limit is set.
    #[must_use]
    #[track_caller]
    pub fn offset(mut self, offset: impl Into<Expression>) -> Self {
        set_limit_parameter(&mut self.limit, LimitParameter::Offset(offset.into()));
        self
    }

    /// Sets the two-number form, `LIMIT from, to`.
    #[must_use]
    pub fn limit_range(mut self, from: impl Into<Expression>, to: impl Into<Expression>) -> Self {
        self.limit = Some(Limit {
            count: from.into(),
            parameter: LimitParameter::End(to.into()),
        });
        self
    }

    /// Iterates over every select core, first to last.
    pub fn cores(&self) -> impl Iterator<Item = &SelectCore> {
        core::iter::once(&self.core).chain(self.compounds.iter().map(|compound| &compound.core))
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with(f, self.recursive, &self.ctes)?;
        write!(f, "{}", self.core)?;
        for compound in &self.compounds {
            write!(f, " {} {}", compound.operator, compound.core)?;
        }
        write_order_and_limit(f, &self.order_by, self.limit.as_ref())
    }
}

impl Identifier for SelectStatement {
    fn node(&self) -> Node<'_> {
        Node::SelectStatement(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        walk_all(&self.ctes, visitor)?;
        self.cores().try_for_each(|core| core.iterate(visitor))?;
        walk_all(&self.order_by, visitor)?;
        self.limit
            .as_ref()
            .map_or(ControlFlow::Continue(()), |limit| limit.walk(visitor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::identifier::{BindParameter, Column};
    use crate::syntax::operators::ExpressionOperable;

    #[test]
    fn test_simple_select() {
        let select = SelectStatement::new()
            .select([Column::all()])
            .from("testTable")
            .where_clause(Column::new("id").gt(1));
        assert_eq!(select.to_string(), "SELECT * FROM testTable WHERE id > 1");
    }

    #[test]
    fn test_limit_forms() {
        let base = SelectStatement::new().select([1]);
        assert_eq!(base.clone().limit(1).to_string(), "SELECT 1 LIMIT 1");
        assert_eq!(
            base.clone().limit(1).offset(2).to_string(),
            "SELECT 1 LIMIT 1 OFFSET 2"
        );
        assert_eq!(
            base.limit_range(1, 2).to_string(),
            "SELECT 1 LIMIT 1, 2"
        );
    }

    #[test]
    fn test_single_row_limit() {
        assert!(Limit::new(1).is_single_row());
        assert!(!Limit::new(2).is_single_row());
        assert!(!Limit::new(0).is_single_row());
        assert!(!Limit::new(BindParameter::colon("p")).is_single_row());
        let with_offset = Limit {
            count: Expression::from(1),
            parameter: LimitParameter::Offset(Expression::from(1)),
        };
        assert!(!with_offset.is_single_row());
    }

    #[test]
    fn test_values_core() {
        let select = SelectStatement::new().values([1, 2]).values([3, 4]);
        assert_eq!(select.to_string(), "VALUES(1, 2), (3, 4)");
    }

    #[test]
    fn test_with_clause() {
        let cte = CommonTableExpression::new("c", SelectStatement::new().select([1]));
        let select = SelectStatement::new()
            .with_recursive(cte)
            .select([Column::all()])
            .from("c");
        assert_eq!(
            select.to_string(),
            "WITH RECURSIVE c AS (SELECT 1) SELECT * FROM c"
        );
    }

    #[test]
    fn test_builders_target_last_core() {
        let select = SelectStatement::new()
            .select(["a"])
            .from("t1")
            .except()
            .select(["a"])
            .from("t2")
            .where_clause(Column::new("a").is_not_null());
        assert_eq!(
            select.to_string(),
            "SELECT a FROM t1 EXCEPT SELECT a FROM t2 WHERE a NOTNULL"
        );
    }

    #[test]
    #[should_panic(expected = "Offset applied before a limit")]
    #[cfg(debug_assertions)]
    fn test_offset_without_limit_panics_in_debug() {
        let _ = SelectStatement::new().select([1]).offset(1);
    }
}
