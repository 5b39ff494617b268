//! Window frame specifications.

use core::fmt;
use core::ops::ControlFlow;

use crate::syntax::enums::{FrameBound, FrameKind};
use crate::syntax::expression::Expression;
use crate::syntax::{Identifier, Node, Visitor};

/// `RANGE|ROWS <start>` or `RANGE|ROWS BETWEEN <start> AND <end>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSpec {
    pub kind: FrameKind,
    pub start: FrameStart,
    /// When set, the frame renders with `BETWEEN`.
    pub end: Option<FrameEnd>,
}

/// The first frame boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameStart {
    UnboundedPreceding,
    Preceding(Expression),
    CurrentRow,
    Following(Expression),
}

/// The second frame boundary of a `BETWEEN` frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameEnd {
    Preceding(Expression),
    CurrentRow,
    Following(Expression),
    UnboundedFollowing,
}

impl FrameStart {
    const fn parts(&self) -> (Option<&Expression>, FrameBound) {
        match self {
            Self::UnboundedPreceding => (None, FrameBound::UnboundedPreceding),
            Self::Preceding(offset) => (Some(offset), FrameBound::Preceding),
            Self::CurrentRow => (None, FrameBound::CurrentRow),
            Self::Following(offset) => (Some(offset), FrameBound::Following),
        }
    }
}

impl FrameEnd {
    const fn parts(&self) -> (Option<&Expression>, FrameBound) {
        match self {
            Self::Preceding(offset) => (Some(offset), FrameBound::Preceding),
            Self::CurrentRow => (None, FrameBound::CurrentRow),
            Self::Following(offset) => (Some(offset), FrameBound::Following),
            Self::UnboundedFollowing => (None, FrameBound::UnboundedFollowing),
        }
    }
}

fn write_bound(
    f: &mut fmt::Formatter<'_>,
    (offset, bound): (Option<&Expression>, FrameBound),
) -> fmt::Result {
    match offset {
        Some(offset) => write!(f, "{offset} {bound}"),
        None => write!(f, "{bound}"),
    }
}

impl FrameSpec {
    /// `RANGE <start>`
    #[must_use]
    pub const fn range(start: FrameStart) -> Self {
        Self {
            kind: FrameKind::Range,
            start,
            end: None,
        }
    }

    /// `ROWS <start>`
    #[must_use]
    pub const fn rows(start: FrameStart) -> Self {
        Self {
            kind: FrameKind::Rows,
            start,
            end: None,
        }
    }

    /// Turns the frame into `BETWEEN <start> AND <end>`.
    #[must_use]
    pub fn and(mut self, end: FrameEnd) -> Self {
        self.end = Some(end);
        self
    }
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.kind)?;
        match &self.end {
            Some(end) => {
                f.write_str("BETWEEN ")?;
                write_bound(f, self.start.parts())?;
                f.write_str(" AND ")?;
                write_bound(f, end.parts())
            }
            None => write_bound(f, self.start.parts()),
        }
    }
}

impl Identifier for FrameSpec {
    fn node(&self) -> Node<'_> {
        Node::FrameSpec(self)
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        if let (Some(offset), _) = self.start.parts() {
            offset.iterate(visitor)?;
        }
        if let Some((Some(offset), _)) = self.end.as_ref().map(FrameEnd::parts) {
            offset.iterate(visitor)?;
        }
        ControlFlow::Continue(())
    }
}
