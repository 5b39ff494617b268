//! The expression node.
//!
//! [`Expression`] is a sum type over every SQL expression form. Operator
//! applications ([`Expression::needs_parentheses`]) are wrapped in
//! parentheses whenever they appear as the operand of another expression;
//! every other form is self-delimiting and renders bare.

use core::fmt;
use core::ops::ControlFlow;

use super::clause::{Filter, RaiseFunction, WindowDef};
use super::enums::{BinaryOperator, ColumnType, UnaryOperator};
use super::identifier::{BindParameter, Column, LiteralValue, Schema};
use super::statement::SelectStatement;
use super::{walk_all, walk_opt, Comma, Identifier, Node, Qualifier, Visitor};

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    LiteralValue(LiteralValue),
    BindParameter(BindParameter),
    Column(Column),
    UnaryOperation(UnaryOperation),
    BinaryOperation(BinaryOperation),
    Function(FunctionCall),
    /// A parenthesized expression list, `(a, b)`.
    Expressions(Vec<Expression>),
    Cast(CastExpression),
    Collate(CollateExpression),
    Between(BetweenExpression),
    In(InExpression),
    Exists(ExistsExpression),
    /// A scalar subquery.
    Select(Box<SelectStatement>),
    Case(CaseExpression),
    RaiseFunction(RaiseFunction),
    Window(WindowFunction),
}

/// `-x`, `+x`, `~x`, `NOT x`, `x ISNULL` or `x NOTNULL`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    /// Selects `NOTNULL` over `ISNULL`. Ignored by the other operators.
    pub is_not: bool,
}

/// `left <op> right`, with an optional `ESCAPE` operand for pattern
/// matching operators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    /// Negates IS and the pattern matching operators.
    pub is_not: bool,
    pub escape: Option<Box<Expression>>,
}

/// A function call, `name([DISTINCT ]args)` or `name(*)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub distinct: bool,
    pub wildcard: bool,
}

/// `CAST(expression AS type)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastExpression {
    pub expression: Box<Expression>,
    pub column_type: ColumnType,
}

/// `expression COLLATE name`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollateExpression {
    pub expression: Box<Expression>,
    pub collation: String,
}

/// `operand [NOT ]BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetweenExpression {
    pub operand: Box<Expression>,
    pub low: Box<Expression>,
    pub high: Box<Expression>,
    pub is_not: bool,
}

/// `operand [NOT ]IN <target>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InExpression {
    pub operand: Box<Expression>,
    pub is_not: bool,
    pub target: InTarget,
}

/// The right-hand side of an IN expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InTarget {
    /// `IN()`
    Empty,
    /// `IN(select)`
    Select(Box<SelectStatement>),
    /// `IN(a, b, c)`
    Expressions(Vec<Expression>),
    /// `IN [schema.]table`
    Table {
        schema: Option<Schema>,
        table: String,
    },
    /// `IN [schema.]function(args)`
    Function {
        schema: Option<Schema>,
        function: String,
        arguments: Vec<Expression>,
    },
}

/// `[NOT ]EXISTS(select)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExistsExpression {
    pub select: Box<SelectStatement>,
    pub is_not: bool,
}

/// `CASE [operand ]WHEN c THEN r [...][ELSE e ]END`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseExpression {
    pub operand: Option<Box<Expression>>,
    pub branches: Vec<WhenThen>,
    pub otherwise: Option<Box<Expression>>,
}

/// One `WHEN condition THEN result` pair of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhenThen {
    pub when: Expression,
    pub then: Expression,
}

/// A window function call,
/// `name(args)[ FILTER(WHERE ..)][ OVER(..)| OVER name]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFunction {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub wildcard: bool,
    pub filter: Option<Box<Filter>>,
    pub over: Option<Over>,
}

/// The window a window function runs over.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Over {
    /// An inline window definition.
    Definition(Box<WindowDef>),
    /// A window declared in the SELECT's WINDOW clause.
    Name(String),
}

impl Expression {
    /// Returns `true` for the operator applications that must be wrapped in
    /// parentheses when nested as an operand.
    #[must_use]
    pub const fn needs_parentheses(&self) -> bool {
        matches!(
            self,
            Self::UnaryOperation(_) | Self::BinaryOperation(_) | Self::Collate(_) | Self::Between(_)
        )
    }

    /// Returns the name of the active variant.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::LiteralValue(_) => "LiteralValue",
            Self::BindParameter(_) => "BindParameter",
            Self::Column(_) => "Column",
            Self::UnaryOperation(_) => "UnaryOperation",
            Self::BinaryOperation(_) => "BinaryOperation",
            Self::Function(_) => "Function",
            Self::Expressions(_) => "Expressions",
            Self::Cast(_) => "Cast",
            Self::Collate(_) => "Collate",
            Self::Between(_) => "Between",
            Self::In(_) => "In",
            Self::Exists(_) => "Exists",
            Self::Select(_) => "Select",
            Self::Case(_) => "Case",
            Self::RaiseFunction(_) => "RaiseFunction",
            Self::Window(_) => "Window",
        }
    }

    /// Returns the direct expression operands, in rendering order.
    ///
    /// Sub-selects, filters and window definitions are not expressions and
    /// are not included.
    #[must_use]
    pub fn operands(&self) -> Vec<&Self> {
        match self {
            Self::LiteralValue(_)
            | Self::BindParameter(_)
            | Self::Column(_)
            | Self::Exists(_)
            | Self::Select(_)
            | Self::RaiseFunction(_) => Vec::new(),
            Self::UnaryOperation(operation) => vec![operation.operand.as_ref()],
            Self::BinaryOperation(operation) => {
                let mut operands = vec![operation.left.as_ref(), operation.right.as_ref()];
                operands.extend(operation.escape.as_deref());
                operands
            }
            Self::Function(function) => function.arguments.iter().collect(),
            Self::Expressions(expressions) => expressions.iter().collect(),
            Self::Cast(cast) => vec![cast.expression.as_ref()],
            Self::Collate(collate) => vec![collate.expression.as_ref()],
            Self::Between(between) => vec![
                between.operand.as_ref(),
                between.low.as_ref(),
                between.high.as_ref(),
            ],
            Self::In(in_expression) => {
                let mut operands = vec![in_expression.operand.as_ref()];
                match &in_expression.target {
                    InTarget::Expressions(expressions)
                    | InTarget::Function {
                        arguments: expressions,
                        ..
                    } => operands.extend(expressions),
                    InTarget::Empty | InTarget::Select(_) | InTarget::Table { .. } => {}
                }
                operands
            }
            Self::Case(case) => case.operands(),
            Self::Window(window) => window.arguments.iter().collect(),
        }
    }
}

impl CaseExpression {
    /// Returns `true` if the CASE has a leading operand.
    #[must_use]
    pub const fn has_case(&self) -> bool {
        self.operand.is_some()
    }

    /// Returns `true` if the CASE has an ELSE branch.
    #[must_use]
    pub const fn has_else(&self) -> bool {
        self.otherwise.is_some()
    }

    /// Operands in rendering order: case operand, then each condition and
    /// result, then the ELSE result.
    #[must_use]
    pub fn operands(&self) -> Vec<&Expression> {
        let mut operands: Vec<&Expression> = self.operand.as_deref().into_iter().collect();
        for branch in &self.branches {
            operands.push(&branch.when);
            operands.push(&branch.then);
        }
        operands.extend(self.otherwise.as_deref());
        operands
    }
}

/// Renders an operand, parenthesized when it is an operator application.
struct Operand<'a>(&'a Expression);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.needs_parentheses() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operand = Operand(&self.operand);
        let negative_literal =
            matches!(self.operand.as_ref(), Expression::LiteralValue(v) if v.is_negative());
        match self.operator {
            UnaryOperator::Null if self.is_not => write!(f, "{operand} NOTNULL"),
            UnaryOperator::Null => write!(f, "{operand} ISNULL"),
            UnaryOperator::Not => write!(f, "NOT {operand}"),
            UnaryOperator::Negative if negative_literal => {
                // "--" would start a comment.
                write!(f, "-({})", self.operand)
            }
            operator => write!(f, "{operator}{operand}"),
        }
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = Operand(&self.left);
        let right = Operand(&self.right);
        match self.operator {
            BinaryOperator::Is => {
                let not = if self.is_not { " NOT" } else { "" };
                write!(f, "{left} IS{not} {right}")
            }
            operator if operator.is_pattern_match() => {
                let not = if self.is_not { " NOT" } else { "" };
                write!(f, "{left}{not} {operator} {right}")?;
                if let Some(escape) = &self.escape {
                    write!(f, " ESCAPE {}", Operand(escape))?;
                }
                Ok(())
            }
            operator => write!(f, "{left} {operator} {right}"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_arguments(f, &self.arguments, self.distinct, self.wildcard)?;
        f.write_str(")")
    }
}

fn write_arguments(
    f: &mut fmt::Formatter<'_>,
    arguments: &[Expression],
    distinct: bool,
    wildcard: bool,
) -> fmt::Result {
    if arguments.is_empty() {
        if wildcard {
            f.write_str("*")?;
        }
        return Ok(());
    }
    if distinct {
        f.write_str("DISTINCT ")?;
    }
    write!(f, "{}", Comma(arguments))
}

impl fmt::Display for InExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let not = if self.is_not { " NOT" } else { "" };
        write!(f, "{}{not} IN", Operand(&self.operand))?;
        match &self.target {
            InTarget::Empty => f.write_str("()"),
            InTarget::Select(select) => write!(f, "({select})"),
            InTarget::Expressions(expressions) => write!(f, "({})", Comma(expressions)),
            InTarget::Table { schema, table } => {
                write!(f, " {}{table}", Qualifier(schema.as_ref()))
            }
            InTarget::Function {
                schema,
                function,
                arguments,
            } => write!(
                f,
                " {}{function}({})",
                Qualifier(schema.as_ref()),
                Comma(arguments)
            ),
        }
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE ")?;
        if let Some(operand) = &self.operand {
            write!(f, "{operand} ")?;
        }
        for branch in &self.branches {
            write!(f, "WHEN {} THEN {} ", branch.when, branch.then)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, "ELSE {otherwise} ")?;
        }
        f.write_str("END")
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_arguments(f, &self.arguments, false, self.wildcard)?;
        f.write_str(")")?;
        if let Some(filter) = &self.filter {
            write!(f, " {filter}")?;
        }
        match &self.over {
            Some(Over::Definition(window)) => write!(f, " OVER{window}"),
            Some(Over::Name(name)) => write!(f, " OVER {name}"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiteralValue(value) => write!(f, "{value}"),
            Self::BindParameter(parameter) => write!(f, "{parameter}"),
            Self::Column(column) => write!(f, "{column}"),
            Self::UnaryOperation(operation) => write!(f, "{operation}"),
            Self::BinaryOperation(operation) => write!(f, "{operation}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Expressions(expressions) => write!(f, "({})", Comma(expressions)),
            Self::Cast(cast) => write!(f, "CAST({} AS {})", cast.expression, cast.column_type),
            Self::Collate(collate) => write!(
                f,
                "{} COLLATE {}",
                Operand(&collate.expression),
                collate.collation
            ),
            Self::Between(between) => {
                let not = if between.is_not { " NOT" } else { "" };
                write!(
                    f,
                    "{}{not} BETWEEN {} AND {}",
                    Operand(&between.operand),
                    Operand(&between.low),
                    Operand(&between.high)
                )
            }
            Self::In(in_expression) => write!(f, "{in_expression}"),
            Self::Exists(exists) => {
                let not = if exists.is_not { "NOT " } else { "" };
                write!(f, "{not}EXISTS({})", exists.select)
            }
            Self::Select(select) => write!(f, "({select})"),
            Self::Case(case) => write!(f, "{case}"),
            Self::RaiseFunction(raise) => write!(f, "{raise}"),
            Self::Window(window) => write!(f, "{window}"),
        }
    }
}

impl Identifier for Expression {
    fn node(&self) -> Node<'_> {
        Node::Expression(self)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Function(function) => !function.name.is_empty(),
            Self::Collate(collate) => !collate.collation.is_empty(),
            Self::In(in_expression) => match &in_expression.target {
                InTarget::Table { table: name, .. }
                | InTarget::Function { function: name, .. } => !name.is_empty(),
                InTarget::Empty | InTarget::Select(_) | InTarget::Expressions(_) => true,
            },
            Self::Case(case) => !case.branches.is_empty(),
            Self::Window(window) => {
                !window.name.is_empty()
                    && !matches!(&window.over, Some(Over::Name(name)) if name.is_empty())
            }
            Self::Expressions(expressions) => !expressions.is_empty(),
            _ => true,
        }
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        match self {
            Self::LiteralValue(value) => value.iterate(visitor),
            Self::BindParameter(parameter) => parameter.iterate(visitor),
            Self::Column(column) => column.iterate(visitor),
            Self::UnaryOperation(operation) => operation.operand.iterate(visitor),
            Self::BinaryOperation(operation) => {
                operation.left.iterate(visitor)?;
                operation.right.iterate(visitor)?;
                walk_opt(operation.escape.as_deref(), visitor)
            }
            Self::Function(function) => walk_all(&function.arguments, visitor),
            Self::Expressions(expressions) => walk_all(expressions, visitor),
            Self::Cast(cast) => cast.expression.iterate(visitor),
            Self::Collate(collate) => collate.expression.iterate(visitor),
            Self::Between(between) => {
                between.operand.iterate(visitor)?;
                between.low.iterate(visitor)?;
                between.high.iterate(visitor)
            }
            Self::In(in_expression) => {
                in_expression.operand.iterate(visitor)?;
                match &in_expression.target {
                    InTarget::Empty => ControlFlow::Continue(()),
                    InTarget::Select(select) => select.iterate(visitor),
                    InTarget::Expressions(expressions) => walk_all(expressions, visitor),
                    InTarget::Table { schema, .. } => walk_opt(schema.as_ref(), visitor),
                    InTarget::Function {
                        schema, arguments, ..
                    } => {
                        walk_opt(schema.as_ref(), visitor)?;
                        walk_all(arguments, visitor)
                    }
                }
            }
            Self::Exists(exists) => exists.select.iterate(visitor),
            Self::Select(select) => select.iterate(visitor),
            Self::Case(case) => {
                walk_opt(case.operand.as_deref(), visitor)?;
                for branch in &case.branches {
                    branch.when.iterate(visitor)?;
                    branch.then.iterate(visitor)?;
                }
                walk_opt(case.otherwise.as_deref(), visitor)
            }
            Self::RaiseFunction(raise) => raise.iterate(visitor),
            Self::Window(window) => {
                walk_all(&window.arguments, visitor)?;
                walk_opt(window.filter.as_deref(), visitor)?;
                match &window.over {
                    Some(Over::Definition(definition)) => definition.iterate(visitor),
                    Some(Over::Name(_)) | None => ControlFlow::Continue(()),
                }
            }
        }
    }
}
