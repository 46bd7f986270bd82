use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::Result;

/// Settings for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest expression or subquery nesting the parser accepts.
    pub recursion_limit: usize,
    pub default_dialect: Dialect,
    pub pretty_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            recursion_limit: 50,
            default_dialect: Dialect::Generic,
            pretty_json: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = EngineConfig::from_json_str(r#"{"default_dialect": "Postgres"}"#).unwrap();
        assert_eq!(Dialect::PostgreSql, config.default_dialect);
        assert_eq!(50, config.recursion_limit);
        assert!(config.pretty_json);
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        assert!(EngineConfig::from_json_str(r#"{"default_dialect": "oracle"}"#).is_err());
    }
}
