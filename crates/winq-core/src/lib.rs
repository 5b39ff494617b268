//! # winq-core
//!
//! A SQLite syntax tree with canonical SQL rendering and generic traversal.
//!
//! This crate provides:
//! - One node type per grammar production, from columns and literals up to
//!   complete statements
//! - Builders mirroring the grammar, one mutator per grammar option
//! - Canonical rendering through `Display`, and a validated
//!   [`Identifier::to_sql`] that refuses trees with missing mandatory parts
//! - Depth-first traversal of any tree with a [`syntax::Visitor`]
//!
//! ## Building Statements
//!
//! ```rust
//! use winq_core::{BindParameter, Column, ExpressionOperable, Identifier, SelectStatement};
//!
//! let select = SelectStatement::new()
//!     .select([Column::new("id"), Column::new("content")])
//!     .from("testTable")
//!     .where_clause(
//!         Column::new("id")
//!             .gt(BindParameter::new(1))
//!             .and(Column::new("content").not_like("%draft%")),
//!     )
//!     .order_by([Column::new("id").desc()])
//!     .limit(10);
//!
//! assert_eq!(
//!     select.to_sql().unwrap(),
//!     "SELECT id, content FROM testTable \
//!      WHERE (id > ?1) AND (content NOT LIKE '%draft%') ORDER BY id DESC LIMIT 10"
//! );
//! ```
//!
//! ## Parenthesization
//!
//! Operator applications (unary, binary, `COLLATE`, `BETWEEN`) are wrapped
//! in parentheses whenever they appear as an operand. Every other form is
//! self-delimiting and renders bare:
//!
//! ```rust
//! use winq_core::{Column, Expression, ExpressionOperable};
//!
//! let nested = Column::new("a").plus(1).multiply(Expression::count_all());
//! assert_eq!(nested.to_string(), "(a + 1) * COUNT(*)");
//! ```

pub mod config;
pub mod error;
pub mod syntax;

pub use config::RenderConfig;
pub use error::{Result, SyntaxError};
pub use syntax::clause::{
    Assignment, ColumnConstraint, ColumnDef, CommonTableExpression, Filter, ForeignKeyClause,
    FrameEnd, FrameSpec, FrameStart, IndexedColumn, JoinClause, OrderingTerm, QualifiedTableName,
    RaiseFunction, ResultColumn, TableConstraint, TableOrSubquery, Upsert, WindowDef,
};
pub use syntax::enums::{
    BinaryOperator, ColumnType, CompoundOperator, ConflictAction, JoinOperator, Order,
    UnaryOperator,
};
pub use syntax::expression::Expression;
pub use syntax::identifier::{BindParameter, Column, LiteralValue, Schema};
pub use syntax::operators::ExpressionOperable;
pub use syntax::pragma::Pragma;
pub use syntax::statement::{
    BeginStatement, CommitStatement, CreateIndexStatement, CreateTableStatement,
    CreateTriggerStatement, DeleteStatement, DropStatement, InsertStatement, PragmaStatement,
    PragmaValue, RollbackStatement, SelectStatement, Statement, UpdateStatement,
};
pub use syntax::{Identifier, Node, NodeKind, Phase, Visitor};
