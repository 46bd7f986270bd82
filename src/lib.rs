//! A cross-dialect SQL syntax tree with a read-only visitor.
//!
//! ```
//! let statements = sqlast::parse("postgresql", "SELECT a FROM t WHERE b = 1").unwrap();
//! assert_eq!("SELECT a FROM t WHERE b = 1", sqlast::format(&statements[0]));
//! ```

pub mod ast;
pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod json;
mod parser;

pub use crate::ast::visitor::{visit, Callbacks, Flow, Visit};
pub use crate::config::EngineConfig;
pub use crate::dialect::Dialect;
pub use crate::engine::Engine;
pub use crate::error::{
    Error, MalformedNodeError, ParseError, ParseErrorKind, Result, UnknownDialectError, VisitError,
};

/// Parses `sql` with a default [`Engine`].
pub fn parse(dialect_name: &str, sql: &str) -> Result<Vec<ast::Statement>> {
    Engine::default().parse(dialect_name, sql)
}

pub fn format<N: std::fmt::Display + ?Sized>(node: &N) -> String {
    Engine::default().format(node)
}

pub fn supported_dialects() -> Vec<&'static str> {
    dialect::supported_dialects()
}
