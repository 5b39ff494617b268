//! Clause nodes composing expressions into the parts of a statement.

mod column_def;
mod cte;
mod foreign_key;
mod frame_spec;
mod indexed_column;
mod join;
mod qualified_table;
mod raise;
mod select_core;
mod table_constraint;
mod upsert;
mod window;

pub use column_def::{ColumnConstraint, ColumnConstraintKind, ColumnDef};
pub use cte::CommonTableExpression;
pub use foreign_key::{ForeignKeyClause, ForeignKeyTrigger};
pub use frame_spec::{FrameEnd, FrameSpec, FrameStart};
pub use indexed_column::{IndexedColumn, IndexedTarget, OrderingTerm};
pub use join::{JoinClause, JoinConstraint, JoinStep, TableOrSubquery};
pub use qualified_table::{Indexed, QualifiedTableName};
pub use raise::RaiseFunction;
pub use select_core::{NamedWindow, ResultColumn, SelectClause, SelectCore};
pub use table_constraint::{TableConstraint, TableConstraintKind};
pub use upsert::{Assignment, Upsert, UpsertAction};
pub use window::{Filter, WindowDef};
