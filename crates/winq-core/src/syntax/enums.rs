//! Keyword and symbol tables for the closed enums of the grammar.
//!
//! Every enum maps to its canonical SQL text through a `const fn as_str`,
//! and `Display` writes exactly that text.

use core::fmt;

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    UnaryOperator,
    BinaryOperator,
    ConflictAction,
    JoinOperator,
    Order,
    NullOrdering,
    CompoundOperator,
    MatchType,
    ColumnType,
    TransactionType,
    ForeignKeyAction,
    Deferrable,
    FrameKind,
    FrameBound,
    RaiseKind,
    TriggerTiming,
    DropKind,
);

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    /// Arithmetic negation (`-`).
    Negative,
    /// Unary plus (`+`).
    Positive,
    /// Bitwise complement (`~`).
    Tilde,
    /// Logical NOT.
    Not,
    /// Null test, rendered postfix as `ISNULL` or `NOTNULL`.
    Null,
}

impl UnaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "-",
            Self::Positive => "+",
            Self::Tilde => "~",
            Self::Not => "NOT",
            Self::Null => "NULL",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    // String
    Concatenate,

    // Arithmetic
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,

    // Bitwise
    LeftShift,
    RightShift,
    BitwiseAnd,
    BitwiseOr,

    // Comparison
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Is,

    // Logical
    And,
    Or,

    // Pattern matching
    Like,
    Glob,
    RegExp,
    Match,
}

impl BinaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Concatenate => "||",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Is => "IS",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::RegExp => "REGEXP",
            Self::Match => "MATCH",
        }
    }

    /// Returns `true` for LIKE, GLOB, REGEXP and MATCH, the operators that
    /// accept an `ESCAPE` operand and place `NOT` before the keyword.
    #[must_use]
    pub const fn is_pattern_match(&self) -> bool {
        matches!(self, Self::Like | Self::Glob | Self::RegExp | Self::Match)
    }
}

/// Conflict resolution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConflictAction {
    Replace,
    Rollback,
    Abort,
    Fail,
    Ignore,
}

impl ConflictAction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "REPLACE",
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
        }
    }
}

/// Join operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinOperator {
    /// Comma-separated operands (implicit cross join).
    Comma,
    Join,
    Left,
    LeftOuter,
    Inner,
    Cross,
    Natural,
    NaturalLeft,
    NaturalLeftOuter,
    NaturalInner,
    NaturalCross,
}

impl JoinOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Join => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::Inner => "INNER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::NaturalLeft => "NATURAL LEFT JOIN",
            Self::NaturalLeftOuter => "NATURAL LEFT OUTER JOIN",
            Self::NaturalInner => "NATURAL INNER JOIN",
            Self::NaturalCross => "NATURAL CROSS JOIN",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of NULLs in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NullOrdering {
    First,
    Last,
}

impl NullOrdering {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// Set operators joining select cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl CompoundOperator {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// Foreign key `MATCH` types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchType {
    Simple,
    Full,
    Partial,
}

impl MatchType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
        }
    }
}

/// Column type affinities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Blob,
    Numeric,
}

impl ColumnType {
    /// Returns the SQL type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Numeric => "NUMERIC",
        }
    }
}

/// Transaction modes for `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionType {
    Deferred,
    Immediate,
    Exclusive,
}

impl TransactionType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

/// Actions a foreign key takes when the parent row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForeignKeyAction {
    SetNull,
    SetDefault,
    Cascade,
    Restrict,
    NoAction,
}

impl ForeignKeyAction {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Deferrable modes of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deferrable {
    Deferrable,
    DeferrableInitiallyDeferred,
    DeferrableInitiallyImmediate,
    NotDeferrable,
    NotDeferrableInitiallyDeferred,
    NotDeferrableInitiallyImmediate,
}

impl Deferrable {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deferrable => "DEFERRABLE",
            Self::DeferrableInitiallyDeferred => "DEFERRABLE INITIALLY DEFERRED",
            Self::DeferrableInitiallyImmediate => "DEFERRABLE INITIALLY IMMEDIATE",
            Self::NotDeferrable => "NOT DEFERRABLE",
            Self::NotDeferrableInitiallyDeferred => "NOT DEFERRABLE INITIALLY DEFERRED",
            Self::NotDeferrableInitiallyImmediate => "NOT DEFERRABLE INITIALLY IMMEDIATE",
        }
    }
}

/// Window frame units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameKind {
    Range,
    Rows,
}

impl FrameKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "RANGE",
            Self::Rows => "ROWS",
        }
    }
}

/// Window frame boundary keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding,
    CurrentRow,
    Following,
    UnboundedFollowing,
}

impl FrameBound {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnboundedPreceding => "UNBOUNDED PRECEDING",
            Self::Preceding => "PRECEDING",
            Self::CurrentRow => "CURRENT ROW",
            Self::Following => "FOLLOWING",
            Self::UnboundedFollowing => "UNBOUNDED FOLLOWING",
        }
    }
}

/// Kinds of the `RAISE` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaiseKind {
    Ignore,
    Rollback,
    Abort,
    Fail,
}

impl RaiseKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
        }
    }
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// Object kinds removed by `DROP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropKind {
    Table,
    Index,
    View,
    Trigger,
}

impl DropKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Trigger => "TRIGGER",
        }
    }
}
