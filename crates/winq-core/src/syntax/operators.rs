//! Builder API for expressions.
//!
//! [`ExpressionOperable`] gives every expression-like value (columns,
//! literals, bind parameters, function calls, ...) the SQL operators as
//! chainable methods. Forms with their own options (IN, CASE, function
//! calls, window functions, CAST) are built through typed handles that
//! convert into [`Expression`].

use super::clause::{Filter, OrderingTerm, RaiseFunction, ResultColumn, WindowDef};
use super::enums::{BinaryOperator, ColumnType, Order, UnaryOperator};
use super::expression::{
    BetweenExpression, BinaryOperation, CaseExpression, CastExpression, CollateExpression,
    ExistsExpression, Expression, FunctionCall, InExpression, InTarget, Over, UnaryOperation,
    WhenThen, WindowFunction,
};
use super::identifier::{BindParameter, Column, LiteralValue, Schema};
use super::misuse;
use super::statement::SelectStatement;

/// SQL operators available on every expression-like value.
pub trait ExpressionOperable: Into<Expression> + Sized {
    /// Applies a unary operator.
    #[must_use]
    fn unary_operate(self, operator: UnaryOperator) -> Expression {
        Expression::UnaryOperation(UnaryOperation {
            operator,
            operand: Box::new(self.into()),
            is_not: false,
        })
    }

    /// `-self`
    #[must_use]
    fn negative(self) -> Expression {
        self.unary_operate(UnaryOperator::Negative)
    }

    /// `+self`
    #[must_use]
    fn positive(self) -> Expression {
        self.unary_operate(UnaryOperator::Positive)
    }

    /// `~self`
    #[must_use]
    fn bit_not(self) -> Expression {
        self.unary_operate(UnaryOperator::Tilde)
    }

    /// `NOT self`
    #[must_use]
    fn not(self) -> Expression {
        self.unary_operate(UnaryOperator::Not)
    }

    /// `self ISNULL`
    #[must_use]
    fn is_null(self) -> Expression {
        self.unary_operate(UnaryOperator::Null)
    }

    /// `self NOTNULL`
    #[must_use]
    fn is_not_null(self) -> Expression {
        Expression::UnaryOperation(UnaryOperation {
            operator: UnaryOperator::Null,
            operand: Box::new(self.into()),
            is_not: true,
        })
    }

    /// Applies a binary operator. `is_not` only affects IS and the pattern
    /// matching operators.
    #[must_use]
    fn binary_operate(
        self,
        operator: BinaryOperator,
        right: impl Into<Expression>,
        is_not: bool,
    ) -> Expression {
        Expression::BinaryOperation(BinaryOperation {
            operator,
            left: Box::new(self.into()),
            right: Box::new(right.into()),
            is_not,
            escape: None,
        })
    }

    /// `self || right`
    #[must_use]
    fn concat(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Concatenate, right, false)
    }

    /// `self * right`
    #[must_use]
    fn multiply(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Multiply, right, false)
    }

    /// `self / right`
    #[must_use]
    fn divide(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Divide, right, false)
    }

    /// `self % right`
    #[must_use]
    fn modulo(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Modulo, right, false)
    }

    /// `self + right`
    #[must_use]
    fn plus(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Plus, right, false)
    }

    /// `self - right`
    #[must_use]
    fn minus(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Minus, right, false)
    }

    /// `self << right`
    #[must_use]
    fn left_shift(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::LeftShift, right, false)
    }

    /// `self >> right`
    #[must_use]
    fn right_shift(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::RightShift, right, false)
    }

    /// `self & right`
    #[must_use]
    fn bit_and(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::BitwiseAnd, right, false)
    }

    /// `self | right`
    #[must_use]
    fn bit_or(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::BitwiseOr, right, false)
    }

    /// `self < right`
    #[must_use]
    fn lt(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Less, right, false)
    }

    /// `self <= right`
    #[must_use]
    fn lt_eq(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::LessOrEqual, right, false)
    }

    /// `self > right`
    #[must_use]
    fn gt(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Greater, right, false)
    }

    /// `self >= right`
    #[must_use]
    fn gt_eq(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::GreaterOrEqual, right, false)
    }

    /// `self == right`
    #[must_use]
    fn eq(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Equal, right, false)
    }

    /// `self != right`
    #[must_use]
    fn not_eq(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::NotEqual, right, false)
    }

    /// `self IS right`
    #[must_use]
    fn is(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Is, right, false)
    }

    /// `self IS NOT right`
    #[must_use]
    fn is_not(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Is, right, true)
    }

    /// `self AND right`
    #[must_use]
    fn and(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::And, right, false)
    }

    /// `self OR right`
    #[must_use]
    fn or(self, right: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Or, right, false)
    }

    /// `self LIKE pattern`
    #[must_use]
    fn like(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Like, pattern, false)
    }

    /// `self NOT LIKE pattern`
    #[must_use]
    fn not_like(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Like, pattern, true)
    }

    /// `self GLOB pattern`
    #[must_use]
    fn glob(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Glob, pattern, false)
    }

    /// `self NOT GLOB pattern`
    #[must_use]
    fn not_glob(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Glob, pattern, true)
    }

    /// `self REGEXP pattern`
    #[must_use]
    fn regexp(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::RegExp, pattern, false)
    }

    /// `self NOT REGEXP pattern`
    #[must_use]
    fn not_regexp(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::RegExp, pattern, true)
    }

    /// `self MATCH pattern`
    #[must_use]
    fn matches(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Match, pattern, false)
    }

    /// `self NOT MATCH pattern`
    #[must_use]
    fn not_matches(self, pattern: impl Into<Expression>) -> Expression {
        self.binary_operate(BinaryOperator::Match, pattern, true)
    }

    /// `self BETWEEN low AND high`
    #[must_use]
    fn between(self, low: impl Into<Expression>, high: impl Into<Expression>) -> Expression {
        between(self.into(), low.into(), high.into(), false)
    }

    /// `self NOT BETWEEN low AND high`
    #[must_use]
    fn not_between(self, low: impl Into<Expression>, high: impl Into<Expression>) -> Expression {
        between(self.into(), low.into(), high.into(), true)
    }

    /// `self COLLATE collation`
    #[must_use]
    fn collate(self, collation: impl Into<String>) -> Expression {
        Expression::Collate(CollateExpression {
            expression: Box::new(self.into()),
            collation: collation.into(),
        })
    }

    /// `self [NOT ]IN()`
    #[must_use]
    fn in_empty(self, is_not: bool) -> InExpression {
        in_target(self.into(), InTarget::Empty, is_not)
    }

    /// `self [NOT ]IN table`
    #[must_use]
    fn in_table(self, table: impl Into<String>, is_not: bool) -> InExpression {
        in_target(
            self.into(),
            InTarget::Table {
                schema: None,
                table: table.into(),
            },
            is_not,
        )
    }

    /// `self [NOT ]IN(select)`
    #[must_use]
    fn in_select(self, select: SelectStatement, is_not: bool) -> InExpression {
        in_target(self.into(), InTarget::Select(Box::new(select)), is_not)
    }

    /// `self [NOT ]IN(a, b, ...)`
    #[must_use]
    fn in_expressions<I>(self, expressions: I, is_not: bool) -> InExpression
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let expressions = expressions.into_iter().map(Into::into).collect();
        in_target(self.into(), InTarget::Expressions(expressions), is_not)
    }

    /// `self [NOT ]IN function(args)`
    #[must_use]
    fn in_function(self, function: impl Into<String>, is_not: bool) -> InExpression {
        in_target(
            self.into(),
            InTarget::Function {
                schema: None,
                function: function.into(),
                arguments: Vec::new(),
            },
            is_not,
        )
    }

    /// `self IN(a, b, ...)`
    #[must_use]
    fn in_list<I>(self, expressions: I) -> InExpression
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.in_expressions(expressions, false)
    }

    /// `self NOT IN(a, b, ...)`
    #[must_use]
    fn not_in_list<I>(self, expressions: I) -> InExpression
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.in_expressions(expressions, true)
    }

    /// An ordering term sorting by this expression.
    #[must_use]
    fn order(self, order: Order) -> OrderingTerm {
        OrderingTerm::new(self).order(order)
    }

    /// `self ASC`
    #[must_use]
    fn asc(self) -> OrderingTerm {
        self.order(Order::Asc)
    }

    /// `self DESC`
    #[must_use]
    fn desc(self) -> OrderingTerm {
        self.order(Order::Desc)
    }

    /// `self AS alias`, as a result column.
    #[must_use]
    fn alias(self, alias: impl Into<String>) -> ResultColumn {
        ResultColumn::new(self).alias(alias)
    }
}

fn between(operand: Expression, low: Expression, high: Expression, is_not: bool) -> Expression {
    Expression::Between(BetweenExpression {
        operand: Box::new(operand),
        low: Box::new(low),
        high: Box::new(high),
        is_not,
    })
}

fn in_target(operand: Expression, target: InTarget, is_not: bool) -> InExpression {
    InExpression {
        operand: Box::new(operand),
        is_not,
        target,
    }
}

impl ExpressionOperable for Expression {}
impl ExpressionOperable for Column {}
impl ExpressionOperable for LiteralValue {}
impl ExpressionOperable for BindParameter {}
impl ExpressionOperable for FunctionCall {}
impl ExpressionOperable for WindowFunction {}
impl ExpressionOperable for CaseExpression {}
impl ExpressionOperable for InExpression {}
impl ExpressionOperable for RaiseFunction {}

impl Expression {
    /// `NULL`
    #[must_use]
    pub const fn null() -> Self {
        Self::LiteralValue(LiteralValue::Null)
    }

    /// A function call. Add arguments with [`FunctionCall::argument`].
    #[must_use]
    pub fn function(name: impl Into<String>) -> FunctionCall {
        FunctionCall {
            name: name.into(),
            arguments: Vec::new(),
            distinct: false,
            wildcard: false,
        }
    }

    /// A window function call. Add the window with [`WindowFunction::over`].
    #[must_use]
    pub fn window_function(name: impl Into<String>) -> WindowFunction {
        WindowFunction {
            name: name.into(),
            arguments: Vec::new(),
            wildcard: false,
            filter: None,
            over: None,
        }
    }

    /// A CASE expression with no leading operand.
    #[must_use]
    pub const fn case() -> CaseExpression {
        CaseExpression {
            operand: None,
            branches: Vec::new(),
            otherwise: None,
        }
    }

    /// A CASE expression comparing `operand` against each WHEN value.
    #[must_use]
    pub fn case_with(operand: impl Into<Self>) -> CaseExpression {
        CaseExpression {
            operand: Some(Box::new(operand.into())),
            branches: Vec::new(),
            otherwise: None,
        }
    }

    /// `CAST(expression AS ...)`. Finish with [`CastTarget::as_type`].
    #[must_use]
    pub fn cast(expression: impl Into<Self>) -> CastTarget {
        CastTarget {
            expression: expression.into(),
        }
    }

    /// A scalar subquery, `(select)`.
    #[must_use]
    pub fn select(select: SelectStatement) -> Self {
        Self::Select(Box::new(select))
    }

    /// `EXISTS(select)`
    #[must_use]
    pub fn exists(select: SelectStatement) -> Self {
        Self::Exists(ExistsExpression {
            select: Box::new(select),
            is_not: false,
        })
    }

    /// `NOT EXISTS(select)`
    #[must_use]
    pub fn not_exists(select: SelectStatement) -> Self {
        Self::Exists(ExistsExpression {
            select: Box::new(select),
            is_not: true,
        })
    }

    /// A parenthesized expression list, `(a, b)`.
    #[must_use]
    pub fn list<I>(expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Expressions(expressions.into_iter().map(Into::into).collect())
    }

    /// Adds an `ESCAPE` operand to a LIKE, GLOB, REGEXP or MATCH operation.
    ///
    /// Any other expression is returned unchanged.
    ///
    /// # Panics
    ///
    /// In debug builds, when applied to any other expression.
    #[must_use]
    pub fn escape(mut self, escape: impl Into<Self>) -> Self {
        match &mut self {
            Self::BinaryOperation(operation) if operation.operator.is_pattern_match() => {
                operation.escape = Some(Box::new(escape.into()));
            }
            other => misuse(&format!(
                "ESCAPE applied to a {} expression",
                other.variant_name()
            )),
        }
        self
    }

    // Core functions

    /// `COUNT(expression)`
    #[must_use]
    pub fn count(expression: impl Into<Self>) -> FunctionCall {
        Self::function("COUNT").argument(expression)
    }

    /// `COUNT(*)`
    #[must_use]
    pub fn count_all() -> FunctionCall {
        Self::function("COUNT").wildcard()
    }

    /// `AVG(expression)`
    #[must_use]
    pub fn avg(expression: impl Into<Self>) -> FunctionCall {
        Self::function("AVG").argument(expression)
    }

    /// `SUM(expression)`
    #[must_use]
    pub fn sum(expression: impl Into<Self>) -> FunctionCall {
        Self::function("SUM").argument(expression)
    }

    /// `TOTAL(expression)`
    #[must_use]
    pub fn total(expression: impl Into<Self>) -> FunctionCall {
        Self::function("TOTAL").argument(expression)
    }

    /// `MAX(expression)`
    #[must_use]
    pub fn max(expression: impl Into<Self>) -> FunctionCall {
        Self::function("MAX").argument(expression)
    }

    /// `MIN(expression)`
    #[must_use]
    pub fn min(expression: impl Into<Self>) -> FunctionCall {
        Self::function("MIN").argument(expression)
    }

    /// `GROUP_CONCAT(expression)`
    #[must_use]
    pub fn group_concat(expression: impl Into<Self>) -> FunctionCall {
        Self::function("GROUP_CONCAT").argument(expression)
    }

    /// `ABS(expression)`
    #[must_use]
    pub fn abs(expression: impl Into<Self>) -> FunctionCall {
        Self::function("ABS").argument(expression)
    }

    /// `HEX(expression)`
    #[must_use]
    pub fn hex(expression: impl Into<Self>) -> FunctionCall {
        Self::function("HEX").argument(expression)
    }

    /// `LENGTH(expression)`
    #[must_use]
    pub fn length(expression: impl Into<Self>) -> FunctionCall {
        Self::function("LENGTH").argument(expression)
    }

    /// `LOWER(expression)`
    #[must_use]
    pub fn lower(expression: impl Into<Self>) -> FunctionCall {
        Self::function("LOWER").argument(expression)
    }

    /// `UPPER(expression)`
    #[must_use]
    pub fn upper(expression: impl Into<Self>) -> FunctionCall {
        Self::function("UPPER").argument(expression)
    }

    /// `ROUND(expression)`
    #[must_use]
    pub fn round(expression: impl Into<Self>) -> FunctionCall {
        Self::function("ROUND").argument(expression)
    }

    /// `SUBSTR(expression, start, length)`
    #[must_use]
    pub fn substr(
        expression: impl Into<Self>,
        start: impl Into<Self>,
        length: impl Into<Self>,
    ) -> FunctionCall {
        Self::function("SUBSTR")
            .argument(expression)
            .argument(start)
            .argument(length)
    }

    /// `COALESCE(a, b, ...)`
    #[must_use]
    pub fn coalesce<I>(expressions: I) -> FunctionCall
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::function("COALESCE").arguments(expressions)
    }

    /// `IFNULL(expression, fallback)`
    #[must_use]
    pub fn if_null(expression: impl Into<Self>, fallback: impl Into<Self>) -> FunctionCall {
        Self::function("IFNULL").argument(expression).argument(fallback)
    }
}

impl FunctionCall {
    /// Appends an argument.
    #[must_use]
    pub fn argument(mut self, argument: impl Into<Expression>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Renders `DISTINCT` before the arguments.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Renders `*` when there are no arguments.
    #[must_use]
    pub const fn wildcard(mut self) -> Self {
        self.wildcard = true;
        self
    }
}

impl WindowFunction {
    /// Appends an argument.
    #[must_use]
    pub fn argument(mut self, argument: impl Into<Expression>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Renders `*` when there are no arguments.
    #[must_use]
    pub const fn wildcard(mut self) -> Self {
        self.wildcard = true;
        self
    }

    /// `FILTER(WHERE condition)`
    #[must_use]
    pub fn filter(mut self, condition: impl Into<Expression>) -> Self {
        self.filter = Some(Box::new(Filter::new(condition)));
        self
    }

    /// `OVER(definition)`, replacing any named window.
    #[must_use]
    pub fn over(mut self, definition: WindowDef) -> Self {
        self.over = Some(Over::Definition(Box::new(definition)));
        self
    }

    /// `OVER name`, replacing any inline window definition.
    #[must_use]
    pub fn over_window(mut self, name: impl Into<String>) -> Self {
        self.over = Some(Over::Name(name.into()));
        self
    }
}

impl CaseExpression {
    /// Appends a `WHEN condition THEN result` pair.
    #[must_use]
    pub fn when_then(mut self, when: impl Into<Expression>, then: impl Into<Expression>) -> Self {
        self.branches.push(WhenThen {
            when: when.into(),
            then: then.into(),
        });
        self
    }

    /// Sets the `ELSE` result.
    #[must_use]
    pub fn otherwise(mut self, otherwise: impl Into<Expression>) -> Self {
        self.otherwise = Some(Box::new(otherwise.into()));
        self
    }
}

impl InExpression {
    /// Qualifies the table or function with a schema.
    ///
    /// Other IN forms are returned unchanged.
    ///
    /// # Panics
    ///
    /// In debug builds, when applied to another IN form.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        match &mut self.target {
            InTarget::Table { schema: slot, .. } | InTarget::Function { schema: slot, .. } => {
                *slot = Some(schema.into());
            }
            InTarget::Empty | InTarget::Select(_) | InTarget::Expressions(_) => {
                misuse("Schema applied to an IN form without a name");
            }
        }
        self
    }

    /// Appends an argument to an IN function call.
    ///
    /// Other IN forms are returned unchanged.
    ///
    /// # Panics
    ///
    /// In debug builds, when applied to another IN form.
    #[must_use]
    pub fn argument(mut self, argument: impl Into<Expression>) -> Self {
        if let InTarget::Function { arguments, .. } = &mut self.target {
            arguments.push(argument.into());
        } else {
            misuse("Argument applied to an IN form that is not a function");
        }
        self
    }
}

/// The pending `CAST` created by [`Expression::cast`].
#[derive(Debug, Clone, PartialEq)]
pub struct CastTarget {
    expression: Expression,
}

impl CastTarget {
    /// `CAST(expression AS column_type)`
    #[must_use]
    pub fn as_type(self, column_type: ColumnType) -> Expression {
        Expression::Cast(CastExpression {
            expression: Box::new(self.expression),
            column_type,
        })
    }
}

macro_rules! expression_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

expression_from!(
    LiteralValue => LiteralValue,
    BindParameter => BindParameter,
    Column => Column,
    FunctionCall => Function,
    InExpression => In,
    CaseExpression => Case,
    RaiseFunction => RaiseFunction,
    WindowFunction => Window,
);

macro_rules! expression_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Self::LiteralValue(LiteralValue::from(value))
                }
            }
        )*
    };
}

expression_from_literal!(bool, i32, i64, u32, f32, f64, &str, String, Vec<u8>);

impl From<SelectStatement> for Expression {
    fn from(select: SelectStatement) -> Self {
        Self::select(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literal_inference() {
        let expression = Column::new("a").eq(1);
        assert_eq!(expression.to_string(), "a == 1");
        let expression = Column::new("a").eq(1.5);
        assert_eq!(expression.to_string(), "a == 1.5");
    }

    #[test]
    fn test_case_arity() {
        let case = Expression::case_with(1)
            .when_then(2, 3)
            .when_then(4, 5)
            .otherwise(6);
        assert_eq!(case.operands().len(), 1 + 2 * 2 + 1);
        let case = Expression::case().when_then(1, 2);
        assert_eq!(case.operands().len(), 2);
    }

    #[test]
    fn test_over_is_exclusive() {
        let window = Expression::window_function("ROW_NUMBER")
            .over(WindowDef::new())
            .over_window("w");
        assert_eq!(window.over, Some(Over::Name(String::from("w"))));
        let window = window.over(WindowDef::new());
        assert_eq!(window.over, Some(Over::Definition(Box::new(WindowDef::new()))));
    }

    #[test]
    #[should_panic(expected = "ESCAPE applied to a Between expression")]
    #[cfg(debug_assertions)]
    fn test_escape_on_between_panics_in_debug() {
        let _ = Column::new("a").between(1, 2).escape("!");
    }

    #[test]
    #[should_panic(expected = "Argument applied")]
    #[cfg(debug_assertions)]
    fn test_argument_on_in_table_panics_in_debug() {
        let _ = Column::new("a").in_table("t", false).argument(1);
    }
}
