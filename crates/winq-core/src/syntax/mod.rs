//! SQL syntax tree nodes, rendering and traversal.
//!
//! Every node implements [`Identifier`]: rendering goes through
//! [`fmt::Display`] (infallible) or [`Identifier::to_sql`] (validated), and
//! traversal goes through [`Identifier::iterate`], which calls a [`Visitor`]
//! before and after descending into each node's live children.

pub mod clause;
pub mod enums;
pub mod expression;
pub mod identifier;
pub mod operators;
pub mod pragma;
pub mod statement;

use core::fmt;
use core::ops::ControlFlow;

use tracing::{debug, trace, warn};

use crate::config::RenderConfig;
use crate::error::{Result, SyntaxError};

use clause::{
    Assignment, ColumnConstraint, ColumnDef, CommonTableExpression, Filter, ForeignKeyClause,
    FrameSpec, IndexedColumn, JoinClause, JoinConstraint, OrderingTerm, QualifiedTableName,
    RaiseFunction, ResultColumn, SelectCore, TableConstraint, TableOrSubquery, Upsert, WindowDef,
};
use expression::Expression;
use identifier::{BindParameter, Column, LiteralValue, Schema};
use pragma::Pragma;
use statement::{
    BeginStatement, CommitStatement, CreateIndexStatement, CreateTableStatement,
    CreateTriggerStatement, DeleteStatement, DropStatement, InsertStatement, PragmaStatement,
    RollbackStatement, SelectStatement, UpdateStatement,
};

macro_rules! node_kinds {
    ($($kind:ident => $name:literal,)*) => {
        /// A borrowed view of any node in a syntax tree, as handed to a
        /// [`Visitor`].
        #[derive(Debug, Clone, Copy)]
        pub enum Node<'a> {
            $(
                #[allow(missing_docs)]
                $kind(&'a $kind),
            )*
        }

        /// The grammar production a node represents.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $(
                #[allow(missing_docs)]
                $kind,
            )*
        }

        impl NodeKind {
            /// Returns the name of the production.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$kind => $name,)*
                }
            }
        }

        impl<'a> Node<'a> {
            /// Returns the kind of the node.
            #[must_use]
            pub const fn kind(&self) -> NodeKind {
                match self {
                    $(Self::$kind(_) => NodeKind::$kind,)*
                }
            }

            /// Returns the node as a trait object.
            #[must_use]
            pub fn identifier(&self) -> &'a dyn Identifier {
                match *self {
                    $(Self::$kind(node) => node,)*
                }
            }
        }
    };
}

node_kinds! {
    Schema => "Schema",
    Column => "Column",
    BindParameter => "BindParameter",
    LiteralValue => "LiteralValue",
    Pragma => "Pragma",
    Expression => "Expression",
    ColumnDef => "ColumnDef",
    ColumnConstraint => "ColumnConstraint",
    TableConstraint => "TableConstraint",
    ForeignKeyClause => "ForeignKeyClause",
    IndexedColumn => "IndexedColumn",
    OrderingTerm => "OrderingTerm",
    FrameSpec => "FrameSpec",
    RaiseFunction => "RaiseFunction",
    Filter => "Filter",
    WindowDef => "WindowDef",
    JoinClause => "JoinClause",
    TableOrSubquery => "TableOrSubquery",
    JoinConstraint => "JoinConstraint",
    QualifiedTableName => "QualifiedTableName",
    ResultColumn => "ResultColumn",
    CommonTableExpression => "CommonTableExpression",
    Assignment => "Assignment",
    Upsert => "Upsert",
    SelectCore => "SelectCore",
    SelectStatement => "SelectStatement",
    InsertStatement => "InsertStatement",
    UpdateStatement => "UpdateStatement",
    DeleteStatement => "DeleteStatement",
    CreateTriggerStatement => "CreateTriggerStatement",
    CreateTableStatement => "CreateTableStatement",
    CreateIndexStatement => "CreateIndexStatement",
    DropStatement => "DropStatement",
    PragmaStatement => "PragmaStatement",
    BeginStatement => "BeginStatement",
    CommitStatement => "CommitStatement",
    RollbackStatement => "RollbackStatement",
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a visitor is called before or after a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before descending into the node's children.
    Enter,
    /// After all of the node's children have been visited.
    Exit,
}

/// Receives every node of a tree during [`Identifier::iterate`].
///
/// Returning [`ControlFlow::Break`] stops the whole traversal: no further
/// node is visited, at any level.
pub trait Visitor {
    /// Called once with [`Phase::Enter`] and once with [`Phase::Exit`] for
    /// every node.
    fn visit(&mut self, node: Node<'_>, phase: Phase) -> ControlFlow<()>;
}

/// A [`Visitor`] backed by a closure. Created by [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnVisitor<F>(F);

/// Creates a [`Visitor`] from a closure.
///
/// ```rust
/// use core::ops::ControlFlow;
/// use winq_core::syntax::{from_fn, Identifier, NodeKind, Phase};
/// use winq_core::{Column, ExpressionOperable};
///
/// let condition = Column::new("a").eq(1).and(Column::new("b").eq(2));
/// let mut columns = Vec::new();
/// let _ = condition.iterate(&mut from_fn(|node, phase| {
///     if phase == Phase::Enter && node.kind() == NodeKind::Column {
///         columns.push(node.identifier().to_string());
///     }
///     ControlFlow::Continue(())
/// }));
/// assert_eq!(columns, ["a", "b"]);
/// ```
pub const fn from_fn<F>(visit: F) -> FnVisitor<F>
where
    F: FnMut(Node<'_>, Phase) -> ControlFlow<()>,
{
    FnVisitor(visit)
}

impl<F> Visitor for FnVisitor<F>
where
    F: FnMut(Node<'_>, Phase) -> ControlFlow<()>,
{
    fn visit(&mut self, node: Node<'_>, phase: Phase) -> ControlFlow<()> {
        (self.0)(node, phase)
    }
}

/// Behaviour shared by every syntax tree node.
pub trait Identifier: fmt::Display {
    /// Returns a borrowed view of this node.
    fn node(&self) -> Node<'_>;

    /// Returns `false` when a mandatory field of this node is missing.
    ///
    /// Only this node is checked, not its children.
    fn is_valid(&self) -> bool {
        true
    }

    /// Visits the live children of this node, in rendering order.
    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        let _ = visitor;
        ControlFlow::Continue(())
    }

    /// Walks this node and all of its descendants depth first.
    fn iterate(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        visitor.visit(self.node(), Phase::Enter)?;
        self.walk_children(visitor)?;
        visitor.visit(self.node(), Phase::Exit)
    }

    /// Checks the whole tree against `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid node, in traversal order, or
    /// [`SyntaxError::TooDeep`] when the tree nests deeper than allowed.
    fn validate(&self, config: &RenderConfig) -> Result<()> {
        let mut validator = Validator {
            config,
            depth: 0,
            failure: None,
        };
        let _ = self.iterate(&mut validator);
        validator.failure.map_or(Ok(()), Err)
    }

    /// Renders the tree after checking it with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`Identifier::validate`].
    fn to_sql(&self) -> Result<String> {
        self.to_sql_with(&RenderConfig::default())
    }

    /// Renders the tree after checking it against `config`.
    ///
    /// # Errors
    ///
    /// See [`Identifier::validate`].
    fn to_sql_with(&self, config: &RenderConfig) -> Result<String> {
        let kind = self.node().kind();
        if let Err(error) = self.validate(config) {
            debug!(kind = %kind, error = %error, "Refusing to render syntax tree");
            return Err(error);
        }
        let sql = self.to_string();
        trace!(kind = %kind, sql = %sql, "Rendered syntax tree");
        Ok(sql)
    }
}

struct Validator<'c> {
    config: &'c RenderConfig,
    depth: usize,
    failure: Option<SyntaxError>,
}

impl Visitor for Validator<'_> {
    fn visit(&mut self, node: Node<'_>, phase: Phase) -> ControlFlow<()> {
        match phase {
            Phase::Enter => {
                self.depth += 1;
                if let Some(limit) = self.config.max_depth {
                    if self.depth > limit {
                        self.failure = Some(SyntaxError::TooDeep { limit });
                        return ControlFlow::Break(());
                    }
                }
                if self.config.validate && !node.identifier().is_valid() {
                    self.failure = Some(SyntaxError::Invalid(node.kind()));
                    return ControlFlow::Break(());
                }
            }
            Phase::Exit => self.depth -= 1,
        }
        ControlFlow::Continue(())
    }
}

/// Reports a builder call on a form it does not apply to. The call is
/// ignored in release builds.
#[track_caller]
pub(crate) fn misuse(message: &str) {
    warn!(reason = message, "Ignoring misapplied builder call");
    if cfg!(debug_assertions) {
        panic!("{message}");
    }
}

/// Visits every item of a list in order.
pub(crate) fn walk_all<T: Identifier>(items: &[T], visitor: &mut dyn Visitor) -> ControlFlow<()> {
    items.iter().try_for_each(|item| item.iterate(visitor))
}

/// Visits an optional child.
pub(crate) fn walk_opt<T: Identifier>(
    item: Option<&T>,
    visitor: &mut dyn Visitor,
) -> ControlFlow<()> {
    item.map_or(ControlFlow::Continue(()), |item| item.iterate(visitor))
}

/// Renders a list separated by `", "`.
pub(crate) struct Comma<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Comma<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Renders an optional schema qualifier followed by a dot.
pub(crate) struct Qualifier<'a>(pub Option<&'a Schema>);

impl fmt::Display for Qualifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(schema) => write!(f, "{schema}."),
            None => Ok(()),
        }
    }
}

/// Rendering of statements that may appear inside a trigger body, where
/// the target table must not be schema-qualified.
pub trait SchemaRender {
    /// Renders the statement, omitting the target schema when `skip_schema`
    /// is set.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    fn render(&self, f: &mut fmt::Formatter<'_>, skip_schema: bool) -> fmt::Result;
}

/// Renders a statement without its target schema. Created by the
/// `without_schema` method of each DML statement.
#[derive(Debug, Clone, Copy)]
pub struct WithoutSchema<'a, T>(pub(crate) &'a T);

impl<T: SchemaRender> fmt::Display for WithoutSchema<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExpressionOperable;

    #[test]
    fn test_comma_rendering() {
        assert_eq!(Comma::<i32>(&[]).to_string(), "");
        assert_eq!(Comma(&[1]).to_string(), "1");
        assert_eq!(Comma(&[1, 2, 3]).to_string(), "1, 2, 3");
    }

    #[test]
    fn test_enter_and_exit_are_balanced() {
        let expression = Column::new("a").eq(1);
        let mut events = Vec::new();
        let _ = expression.iterate(&mut from_fn(|node, phase| {
            events.push((node.kind(), phase));
            ControlFlow::Continue(())
        }));
        assert_eq!(
            events,
            [
                (NodeKind::Expression, Phase::Enter),
                (NodeKind::Expression, Phase::Enter),
                (NodeKind::Column, Phase::Enter),
                (NodeKind::Column, Phase::Exit),
                (NodeKind::Expression, Phase::Exit),
                (NodeKind::Expression, Phase::Enter),
                (NodeKind::LiteralValue, Phase::Enter),
                (NodeKind::LiteralValue, Phase::Exit),
                (NodeKind::Expression, Phase::Exit),
                (NodeKind::Expression, Phase::Exit),
            ]
        );
    }

    #[test]
    fn test_to_sql_rejects_invalid_node() {
        let expression = Column::new("").eq(1);
        assert_eq!(
            expression.to_sql(),
            Err(SyntaxError::Invalid(NodeKind::Column))
        );
    }

    #[test]
    fn test_to_sql_honours_max_depth() {
        let expression = Column::new("a").eq(1);
        let shallow = RenderConfig::new().max_depth(2);
        assert_eq!(
            expression.to_sql_with(&shallow),
            Err(SyntaxError::TooDeep { limit: 2 })
        );
        let deep = RenderConfig::new().max_depth(3);
        assert_eq!(expression.to_sql_with(&deep).as_deref(), Ok("a == 1"));
    }

    #[test]
    fn test_skip_validation_renders_anyway() {
        let expression = Column::new("").eq(1);
        let config = RenderConfig::new().skip_validation();
        assert_eq!(expression.to_sql_with(&config).as_deref(), Ok(" == 1"));
    }
}
