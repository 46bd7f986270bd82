use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::display::{escape_backslash, escape_quoted};
use super::Span;

/// A literal value.
///
/// Numbers keep their source text so arbitrary-precision literals survive
/// unchanged; the flag is set for approximate (exponent notation) literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Number(String, bool),
    /// `'string value'`
    SingleQuotedString(String),
    /// `$$string value$$` or `$tag$string value$tag$`
    DollarQuotedString(DollarQuotedString),
    /// `'''string value'''`
    TripleSingleQuotedString(String),
    /// `"""string value"""`
    TripleDoubleQuotedString(String),
    /// `E'string value'`, backslash escapes apply
    EscapedStringLiteral(String),
    /// `U&'string value'`
    UnicodeStringLiteral(String),
    /// `B'string value'`
    SingleQuotedByteStringLiteral(String),
    /// `B"string value"`
    DoubleQuotedByteStringLiteral(String),
    /// `R'string value'`
    SingleQuotedRawStringLiteral(String),
    /// `R"string value"`
    DoubleQuotedRawStringLiteral(String),
    /// `N'string value'`
    NationalStringLiteral(String),
    /// `X'hex value'`
    HexStringLiteral(String),
    /// `"string value"`, in dialects where double quotes delimit strings
    DoubleQuotedString(String),
    Boolean(bool),
    Null,
    /// `?`, `$1`, `:name` or `@name`
    Placeholder(String),
}

impl Value {
    pub fn number<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let approximate = text.contains(|c: char| c == 'e' || c == 'E');
        Value::Number(text, approximate)
    }

    /// Attaches a source span to the value.
    pub fn with_span(self, span: Span) -> ValueWithSpan {
        ValueWithSpan { value: self, span }
    }

    pub fn with_empty_span(self) -> ValueWithSpan {
        self.with_span(Span::empty())
    }

    /// The unquoted text of string-like literals.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::SingleQuotedString(s)
            | Value::TripleSingleQuotedString(s)
            | Value::TripleDoubleQuotedString(s)
            | Value::EscapedStringLiteral(s)
            | Value::UnicodeStringLiteral(s)
            | Value::SingleQuotedByteStringLiteral(s)
            | Value::DoubleQuotedByteStringLiteral(s)
            | Value::SingleQuotedRawStringLiteral(s)
            | Value::DoubleQuotedRawStringLiteral(s)
            | Value::NationalStringLiteral(s)
            | Value::HexStringLiteral(s)
            | Value::DoubleQuotedString(s) => Some(s),
            Value::DollarQuotedString(s) => Some(&s.value),
            Value::Number(..) | Value::Boolean(_) | Value::Null | Value::Placeholder(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n, _) => f.write_str(n),
            Value::SingleQuotedString(s) => write!(f, "'{}'", escape_quoted(s, '\'')),
            Value::DollarQuotedString(s) => write!(f, "{}", s),
            Value::TripleSingleQuotedString(s) => write!(f, "'''{}'''", s),
            Value::TripleDoubleQuotedString(s) => write!(f, "\"\"\"{}\"\"\"", s),
            Value::EscapedStringLiteral(s) => write!(f, "E'{}'", escape_backslash(s)),
            Value::UnicodeStringLiteral(s) => write!(f, "U&'{}'", escape_quoted(s, '\'')),
            Value::SingleQuotedByteStringLiteral(s) => write!(f, "B'{}'", s),
            Value::DoubleQuotedByteStringLiteral(s) => write!(f, "B\"{}\"", s),
            Value::SingleQuotedRawStringLiteral(s) => write!(f, "R'{}'", s),
            Value::DoubleQuotedRawStringLiteral(s) => write!(f, "R\"{}\"", s),
            Value::NationalStringLiteral(s) => write!(f, "N'{}'", escape_quoted(s, '\'')),
            Value::HexStringLiteral(s) => write!(f, "X'{}'", s),
            Value::DoubleQuotedString(s) => write!(f, "\"{}\"", escape_quoted(s, '"')),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Null => f.write_str("NULL"),
            Value::Placeholder(p) => f.write_str(p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DollarQuotedString {
    pub value: String,
    pub tag: Option<String>,
}

impl fmt::Display for DollarQuotedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "${}${}${}$", tag, self.value, tag),
            None => write!(f, "$${}$$", self.value),
        }
    }
}

/// A [`Value`] together with where it appeared. Compares and hashes as the
/// bare value.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ValueWithSpan {
    pub value: Value,
    #[serde(default)]
    pub span: Span,
}

impl PartialEq for ValueWithSpan {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Hash for ValueWithSpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<Value> for ValueWithSpan {
    fn from(value: Value) -> Self {
        value.with_empty_span()
    }
}

impl fmt::Display for ValueWithSpan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_numbers() {
        assert_eq!(Value::Number("1".into(), false), Value::number("1"));
        assert_eq!(Value::Number("2.5E-3".into(), true), Value::number("2.5E-3"));
        assert_eq!(Value::Number("123.45".into(), false), Value::number("123.45"));
    }

    #[test]
    fn literal_display() {
        assert_eq!("'it''s'", Value::SingleQuotedString("it's".into()).to_string());
        assert_eq!("E'a\\nb'", Value::EscapedStringLiteral("a\nb".into()).to_string());
        assert_eq!("X'DEADBEEF'", Value::HexStringLiteral("DEADBEEF".into()).to_string());
        assert_eq!("N'x'", Value::NationalStringLiteral("x".into()).to_string());
        assert_eq!(
            "$fn$body$fn$",
            Value::DollarQuotedString(DollarQuotedString {
                value: "body".into(),
                tag: Some("fn".into()),
            })
            .to_string()
        );
        assert_eq!("NULL", Value::Null.to_string());
        assert_eq!("FALSE", Value::Boolean(false).to_string());
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(Value::number("1")).unwrap();
        assert_eq!(serde_json::json!({"Number": ["1", false]}), json);
        let json = serde_json::to_value(Value::SingleQuotedString("Alice".into())).unwrap();
        assert_eq!(serde_json::json!({"SingleQuotedString": "Alice"}), json);
    }
}
