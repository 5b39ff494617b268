//! Render configuration.

/// Options controlling how [`Identifier::to_sql_with`] checks a tree
/// before rendering it.
///
/// [`Identifier::to_sql_with`]: crate::syntax::Identifier::to_sql_with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum nesting depth accepted. `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Whether every node's validity predicate is checked before rendering.
    pub validate: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            validate: true,
        }
    }
}

impl RenderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects trees nesting deeper than `depth` nodes.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Skips the validity check, rendering whatever the tree holds.
    #[must_use]
    pub const fn skip_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}
