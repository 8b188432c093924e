//! Error types for template rendering

use thiserror::Error;

/// Malformed conditional block structure.
///
/// Brace validation happens during the single structural pass over the
/// template, so the first violation in template order is the one reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A `}` with no block open.
    #[error("unmatched `}}` at byte {0}")]
    UnmatchedClose(usize),

    /// A `{` while another block is still open. Blocks cannot nest.
    #[error("`{{` at byte {0} opens a block inside another block")]
    NestedOpen(usize),

    /// A `{` that is never closed before the template ends.
    #[error("`{{` at byte {0} is never closed")]
    UnclosedOpen(usize),

    /// A block holding any number of placeholders other than one.
    #[error("conditional block at bytes {start}..{end} holds {found} placeholders, expected exactly one")]
    PlaceholderCount {
        start: usize,
        end: usize,
        found: usize,
    },
}

/// Errors that can occur while rendering a query template.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// Braces are unbalanced, nested, or a block holds the wrong number of
    /// placeholders.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The skip sentinel was bound to a placeholder with no enclosing
    /// conditional block.
    #[error("skip() bound to a placeholder outside any conditional block")]
    OrphanSkip,

    /// Placeholder count and argument count disagree after block elision.
    #[error("template expects {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },

    /// A placeholder received a value of the wrong shape.
    #[error("type error: {0}")]
    Type(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
