//! QWELD Query - typed placeholder rendering and conditional blocks
//!
//! This crate welds a parameterized query template and an ordered argument
//! list into a final literal SQL string.
//!
//! Template grammar:
//!
//! - `?` - bare placeholder, rendered by the argument's own shape
//! - `?d` - numeric cast to a 64-bit integer
//! - `?f` - numeric cast to a float
//! - `?a` - list or map expansion (`IN (...)` lists, `SET` clauses)
//! - `?#` - backtick-quoted identifier or identifier list
//! - `{ ... }` - conditional block holding exactly one placeholder, dropped
//!   entirely when that placeholder's argument is [`skip()`]
//!
//! # Example
//! ```
//! use qweld_core::{MysqlEscaper, Value};
//! use qweld_query::{QueryBuilder, skip};
//!
//! let db = QueryBuilder::new(MysqlEscaper);
//! let sql = db
//!     .build_query(
//!         "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!         &[
//!             Value::from("user_id"),
//!             Value::List(vec![1.into(), 2.into(), 3.into()]),
//!             skip(),
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
//! ```

mod blocks;
mod builder;
mod engine;
mod error;
mod render;
mod specifier;

pub use blocks::resolve_blocks;
pub use builder::QueryBuilder;
pub use engine::{render, skip};
pub use error::{RenderError, RenderResult, StructuralError};
pub use render::{render_scalar, render_specifier};
pub use specifier::{Specifier, SpecifierKind, scan_specifiers};

#[cfg(test)]
mod tests;
