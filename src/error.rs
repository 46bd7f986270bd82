use std::fmt;

use thiserror::Error;

use crate::ast::Location;
use crate::dialect::SUPPORTED_DIALECTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input could not be split into tokens.
    Tokenizer,
    Syntax,
    RecursionLimitExceeded,
}

/// Failure to turn SQL text into statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sql parser error: {message}{location}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Where the offending token starts. Unknown locations render as nothing.
    pub location: Location,
}

impl ParseError {
    pub fn tokenizer<S: Into<String>>(message: S, location: Location) -> Self {
        ParseError {
            kind: ParseErrorKind::Tokenizer,
            message: message.into(),
            location,
        }
    }

    pub fn syntax<S: Into<String>>(message: S, location: Location) -> Self {
        ParseError {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            location,
        }
    }

    /// `Expected: {expected}, found: {found}` at `location`.
    pub fn expected<D: fmt::Display>(expected: &str, found: D, location: Location) -> Self {
        Self::syntax(format!("Expected: {}, found: {}", expected, found), location)
    }

    pub fn recursion_limit(location: Location) -> Self {
        ParseError {
            kind: ParseErrorKind::RecursionLimitExceeded,
            message: "recursion limit exceeded".to_string(),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported dialect: {name}. Supported dialects are: {}", SUPPORTED_DIALECTS.join(", "))]
pub struct UnknownDialectError {
    pub name: String,
}

/// A tree that breaks a structural rule the parser would never produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {node}: {reason}")]
pub struct MalformedNodeError {
    pub node: &'static str,
    pub reason: String,
}

impl MalformedNodeError {
    pub fn new<S: Into<String>>(node: &'static str, reason: S) -> Self {
        MalformedNodeError {
            node,
            reason: reason.into(),
        }
    }
}

/// Why a visit did not complete. `E` is the error type of the hooks.
#[derive(Debug, Error)]
pub enum VisitError<E> {
    #[error(transparent)]
    Malformed(#[from] MalformedNodeError),
    #[error("visitor callback failed: {0}")]
    Callback(E),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UnknownDialect(#[from] UnknownDialectError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Malformed(#[from] MalformedNodeError),
    #[error("invalid syntax tree json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::expected("an SQL statement", "SELEC", Location::new(1, 1));
        assert_eq!(
            "sql parser error: Expected: an SQL statement, found: SELEC at Line: 1, Column: 1",
            err.to_string()
        );

        let err = ParseError::syntax("Unexpected EOF", Location::empty());
        assert_eq!("sql parser error: Unexpected EOF", err.to_string());
    }

    #[test]
    fn unknown_dialect_lists_supported() {
        let err = UnknownDialectError {
            name: "oracle".to_string(),
        };
        assert_eq!(
            "Unsupported dialect: oracle. Supported dialects are: generic, postgresql, mysql, sqlite, mssql, snowflake, redshift, bigquery, clickhouse, hive",
            err.to_string()
        );
    }
}
