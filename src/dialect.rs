//! The fixed set of SQL dialects the parser understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownDialectError;

/// Canonical dialect names, in listing order.
pub const SUPPORTED_DIALECTS: &[&str] = &[
    "generic",
    "postgresql",
    "mysql",
    "sqlite",
    "mssql",
    "snowflake",
    "redshift",
    "bigquery",
    "clickhouse",
    "hive",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    Generic,
    PostgreSql,
    MySql,
    SQLite,
    MsSql,
    Snowflake,
    Redshift,
    BigQuery,
    ClickHouse,
    Hive,
}

impl Dialect {
    pub const ALL: [Dialect; 10] = [
        Dialect::Generic,
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::SQLite,
        Dialect::MsSql,
        Dialect::Snowflake,
        Dialect::Redshift,
        Dialect::BigQuery,
        Dialect::ClickHouse,
        Dialect::Hive,
    ];

    /// Looks a dialect up by name, ignoring case. `postgres` and `sqlserver`
    /// are accepted as aliases.
    pub fn from_name(name: &str) -> Result<Dialect, UnknownDialectError> {
        let dialect = match name.to_ascii_lowercase().as_str() {
            "generic" => Dialect::Generic,
            "postgresql" | "postgres" => Dialect::PostgreSql,
            "mysql" => Dialect::MySql,
            "sqlite" => Dialect::SQLite,
            "mssql" | "sqlserver" => Dialect::MsSql,
            "snowflake" => Dialect::Snowflake,
            "redshift" => Dialect::Redshift,
            "bigquery" => Dialect::BigQuery,
            "clickhouse" => Dialect::ClickHouse,
            "hive" => Dialect::Hive,
            _ => {
                return Err(UnknownDialectError {
                    name: name.to_string(),
                })
            }
        };
        Ok(dialect)
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::PostgreSql => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::SQLite => "sqlite",
            Dialect::MsSql => "mssql",
            Dialect::Snowflake => "snowflake",
            Dialect::Redshift => "redshift",
            Dialect::BigQuery => "bigquery",
            Dialect::ClickHouse => "clickhouse",
            Dialect::Hive => "hive",
        }
    }

    fn postgres_family(self) -> bool {
        matches!(
            self,
            Dialect::PostgreSql | Dialect::Redshift | Dialect::Generic
        )
    }

    /// Whether `"..."` delimits an identifier rather than a string.
    pub fn double_quote_is_identifier(self) -> bool {
        !matches!(self, Dialect::MySql | Dialect::BigQuery | Dialect::Hive)
    }

    pub fn supports_backtick_identifiers(self) -> bool {
        matches!(
            self,
            Dialect::MySql
                | Dialect::SQLite
                | Dialect::BigQuery
                | Dialect::Hive
                | Dialect::ClickHouse
                | Dialect::Generic
        )
    }

    pub fn supports_bracket_identifiers(self) -> bool {
        matches!(self, Dialect::MsSql | Dialect::SQLite)
    }

    /// Whether `\` escapes the next character inside string literals.
    pub fn supports_backslash_escapes(self) -> bool {
        matches!(
            self,
            Dialect::MySql | Dialect::BigQuery | Dialect::Hive | Dialect::ClickHouse
        )
    }

    /// `E'...'` and `U&'...'` literals.
    pub fn supports_escape_string_prefix(self) -> bool {
        self.postgres_family()
    }

    /// `B'...'`, `R'...'` and triple quoted literals.
    pub fn supports_bigquery_literals(self) -> bool {
        self == Dialect::BigQuery
    }

    /// `$$...$$` strings and `$1` placeholders.
    pub fn supports_dollar_quoting(self) -> bool {
        matches!(
            self,
            Dialect::PostgreSql | Dialect::Redshift | Dialect::Snowflake | Dialect::Generic
        )
    }

    pub fn supports_double_colon_cast(self) -> bool {
        !matches!(self, Dialect::MySql | Dialect::MsSql | Dialect::SQLite | Dialect::Hive)
    }

    pub fn supports_ilike(self) -> bool {
        matches!(
            self,
            Dialect::PostgreSql
                | Dialect::Redshift
                | Dialect::Snowflake
                | Dialect::ClickHouse
                | Dialect::Generic
        )
    }

    pub fn supports_qualify(self) -> bool {
        matches!(
            self,
            Dialect::Snowflake | Dialect::BigQuery | Dialect::Generic
        )
    }

    pub fn supports_top(self) -> bool {
        matches!(
            self,
            Dialect::MsSql | Dialect::Snowflake | Dialect::Redshift | Dialect::Generic
        )
    }

    /// `LIMIT offset, count`.
    pub fn supports_limit_comma(self) -> bool {
        matches!(
            self,
            Dialect::MySql | Dialect::SQLite | Dialect::ClickHouse | Dialect::Generic
        )
    }

    /// `a DIV b` integer division.
    pub fn supports_div_operator(self) -> bool {
        matches!(self, Dialect::MySql | Dialect::Hive | Dialect::Generic)
    }

    pub fn supports_lambda_functions(self) -> bool {
        matches!(
            self,
            Dialect::ClickHouse | Dialect::Snowflake | Dialect::Hive | Dialect::Generic
        )
    }

    /// `->` and `->>` between expressions.
    pub fn supports_json_arrows(self) -> bool {
        matches!(
            self,
            Dialect::PostgreSql
                | Dialect::Redshift
                | Dialect::MySql
                | Dialect::SQLite
                | Dialect::Generic
        )
    }

    /// Whether `^` means exponentiation. Elsewhere it is bitwise XOR.
    pub fn caret_is_exponent(self) -> bool {
        self.postgres_family()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s)
    }
}

impl TryFrom<String> for Dialect {
    type Error = UnknownDialectError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Dialect::from_name(&s)
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> String {
        dialect.name().to_string()
    }
}

pub fn supported_dialects() -> Vec<&'static str> {
    SUPPORTED_DIALECTS.to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for dialect in Dialect::ALL.iter() {
            assert_eq!(*dialect, Dialect::from_name(dialect.name()).unwrap());
        }
        let names: Vec<_> = Dialect::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(SUPPORTED_DIALECTS, names.as_slice());
    }

    #[test]
    fn lookup_ignores_case_and_accepts_aliases() {
        assert_eq!(Dialect::PostgreSql, "Postgres".parse().unwrap());
        assert_eq!(Dialect::MsSql, "SQLSERVER".parse().unwrap());
        assert_eq!(Dialect::MySql, "MySQL".parse().unwrap());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Dialect::from_name("oracle").unwrap_err();
        assert_eq!("oracle", err.name);
    }
}
