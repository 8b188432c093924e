//! QWELD Core - Value model and escaping capability
//!
//! This crate provides the types shared by every QWELD crate:
//!
//! - `Value` - Tagged argument value, including the skip sentinel
//! - `Scalar` - The single-level payload allowed inside lists and maps
//! - `StringEscaper` - Trait for the connection-provided escaping capability
//! - `MysqlEscaper` / `AnsiQuoteEscaper` - Shipped escaper implementations

mod error;
mod escape;
mod types;

pub use error::*;
pub use escape::*;
pub use types::*;
