//! Query building facade
//!
//! Pairs the template engine with the escaping capability of a concrete
//! backend, the way a connection wrapper exposes query building to callers.

use qweld_core::{StringEscaper, Value};

use crate::engine::render;
use crate::error::RenderResult;

/// Builds literal query strings from templates and argument lists.
///
/// # Example
/// ```
/// use qweld_core::MysqlEscaper;
/// use qweld_query::QueryBuilder;
///
/// let db = QueryBuilder::new(MysqlEscaper);
/// let sql = db
///     .build_query("SELECT * FROM users WHERE name = ?", &["O'Brien".into()])
///     .unwrap();
/// assert_eq!(sql, "SELECT * FROM users WHERE name = 'O\\'Brien'");
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder<E> {
    escaper: E,
}

impl<E: StringEscaper> QueryBuilder<E> {
    /// Create a builder over the given escaping capability.
    pub fn new(escaper: E) -> Self {
        Self { escaper }
    }

    /// Render `template` with `args` into a final query string.
    pub fn build_query(&self, template: &str, args: &[Value]) -> RenderResult<String> {
        render(template, args, &self.escaper)
    }

    /// The skip sentinel, to elide a conditional block.
    pub fn skip(&self) -> Value {
        Value::Skip
    }
}
