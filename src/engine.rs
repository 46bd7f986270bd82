use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, Span};

use crate::ast::visitor::Visit;
use crate::ast::Statement;
use crate::config::EngineConfig;
use crate::dialect::{self, Dialect};
use crate::error::Result;
use crate::json;
use crate::parser;

/// Parses, formats and (de)serializes syntax trees.
///
/// All state lives in the engine value; nothing is initialized globally.
/// An engine is immutable after construction and may be shared between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        debug!(
            recursion_limit = config.recursion_limit,
            default_dialect = %config.default_dialect,
            "created engine"
        );
        Engine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses `sql` with the dialect called `dialect_name`.
    ///
    /// Fails with [`Error::UnknownDialect`](crate::Error::UnknownDialect)
    /// before looking at `sql` if the name is not one of
    /// [`supported_dialects`](Engine::supported_dialects).
    #[instrument(level = "debug", skip_all, fields(dialect))]
    pub fn parse(&self, dialect_name: &str, sql: &str) -> Result<Vec<Statement>> {
        let dialect = Dialect::from_name(dialect_name)?;
        Span::current().record("dialect", dialect.name());
        self.parse_with(dialect, sql)
    }

    pub fn parse_with(&self, dialect: Dialect, sql: &str) -> Result<Vec<Statement>> {
        let statements = parser::parse_sql(dialect, sql, self.config.recursion_limit)?;
        debug!(statements = statements.len(), "parsed input");
        Ok(statements)
    }

    /// Parses with the configured default dialect.
    pub fn parse_default(&self, sql: &str) -> Result<Vec<Statement>> {
        self.parse_with(self.config.default_dialect, sql)
    }

    /// Renders a node back to SQL text.
    pub fn format<N: fmt::Display + ?Sized>(&self, node: &N) -> String {
        node.to_string()
    }

    /// Renders statements separated by `;\n`.
    pub fn format_statements(&self, statements: &[Statement]) -> String {
        statements
            .iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<_>>()
            .join(";\n")
    }

    pub fn supported_dialects(&self) -> Vec<&'static str> {
        dialect::supported_dialects()
    }

    pub fn to_json<N: Serialize + ?Sized>(&self, node: &N) -> Result<serde_json::Value> {
        json::to_json(node)
    }

    /// Serializes a node, pretty-printed unless the config says otherwise.
    pub fn to_json_string<N: Serialize + ?Sized>(&self, node: &N) -> Result<String> {
        json::to_json_string(node, self.config.pretty_json)
    }

    pub fn from_json<N: DeserializeOwned + Visit>(&self, json: &str) -> Result<N> {
        json::from_json(json)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{Error, ParseErrorKind};

    #[test]
    fn unknown_dialect_is_reported_by_name() {
        let err = Engine::default().parse("oracle", "SELECT 1").unwrap_err();
        match err {
            Error::UnknownDialect(err) => assert_eq!("oracle", err.name),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn dialect_names_ignore_case() {
        let engine = Engine::default();
        assert_eq!(1, engine.parse("MySQL", "SELECT `a` FROM t").unwrap().len());
        assert_eq!(1, engine.parse("postgres", "SELECT 1::int").unwrap().len());
    }

    #[test]
    fn default_dialect_comes_from_config() {
        let config = EngineConfig {
            default_dialect: Dialect::MySql,
            ..EngineConfig::default()
        };
        let engine = Engine::new(config);
        let sql = r#"SELECT "a" FROM t"#;
        let mysql = engine.parse_default(sql).unwrap();
        assert_eq!(mysql, engine.parse("mysql", sql).unwrap());
        assert_ne!(mysql, Engine::default().parse_default(sql).unwrap());
    }

    #[test]
    fn recursion_limit_comes_from_config() {
        let sql = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
        assert!(Engine::default().parse("generic", &sql).is_ok());

        let engine = Engine::new(EngineConfig {
            recursion_limit: 10,
            ..EngineConfig::default()
        });
        match engine.parse("generic", &sql) {
            Err(Error::Parse(err)) => assert_eq!(ParseErrorKind::RecursionLimitExceeded, err.kind),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn nested_explain_hits_recursion_limit() {
        let sql = format!("{}SELECT 1", "EXPLAIN ANALYZE ".repeat(10_000));
        match Engine::default().parse("generic", &sql) {
            Err(Error::Parse(err)) => assert_eq!(ParseErrorKind::RecursionLimitExceeded, err.kind),
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
        let sql = format!("{}SELECT 1", "EXPLAIN ANALYZE ".repeat(5));
        assert_eq!(1, Engine::default().parse("generic", &sql).unwrap().len());
    }

    #[test]
    fn format_statements_joins_with_semicolons() {
        let engine = Engine::default();
        let statements = engine.parse("generic", "select 1; ; select a from t").unwrap();
        assert_eq!("SELECT 1;\nSELECT a FROM t", engine.format_statements(&statements));
    }

    #[test]
    fn json_string_follows_pretty_setting() {
        let statements = Engine::default().parse("generic", "SELECT 1").unwrap();
        assert!(Engine::default().to_json_string(&statements).unwrap().contains('\n'));

        let compact = Engine::new(EngineConfig {
            pretty_json: false,
            ..EngineConfig::default()
        });
        let text = compact.to_json_string(&statements).unwrap();
        assert!(!text.contains('\n'));
        assert_eq!(statements, compact.from_json::<Vec<Statement>>(&text).unwrap());
    }

    #[test]
    fn engines_are_independent() {
        let shallow = Engine::new(EngineConfig {
            recursion_limit: 2,
            ..EngineConfig::default()
        });
        let sql = "SELECT ((((1))))";
        assert!(shallow.parse("generic", sql).is_err());
        assert!(Engine::default().parse("generic", sql).is_ok());
    }
}
