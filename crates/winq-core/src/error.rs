//! Error types for rendering syntax trees.

use crate::syntax::NodeKind;

/// Errors that can occur when rendering a syntax tree to SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A node is missing one of its mandatory fields.
    #[error("Invalid {0} node: a mandatory field is not set")]
    Invalid(NodeKind),

    /// The tree nests deeper than the configured limit.
    #[error("Syntax tree exceeds the maximum depth of {limit}")]
    TooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// Result type for syntax tree operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;
