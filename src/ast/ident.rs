use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::display::{display_comma_separated, display_separated, escape_quoted};
use super::{FunctionArg, Span};

/// A single name component, optionally quoted.
///
/// Equality and hashing ignore `span`, so trees parsed from differently laid
/// out text compare equal.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub value: String,
    pub quote_style: Option<char>,
    #[serde(default)]
    pub span: Span,
}

impl Ident {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Ident {
            value: value.into(),
            quote_style: None,
            span: Span::empty(),
        }
    }

    pub fn with_quote<S: Into<String>>(quote: char, value: S) -> Self {
        Ident {
            value: value.into(),
            quote_style: Some(quote),
            span: Span::empty(),
        }
    }

    pub fn with_span<S: Into<String>>(span: Span, value: S) -> Self {
        Ident {
            value: value.into(),
            quote_style: None,
            span,
        }
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.quote_style == other.quote_style
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.quote_style.hash(state);
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some('[') => write!(f, "[{}]", escape_quoted(&self.value, ']')),
            Some(q) => write!(f, "{}{}{}", q, escape_quoted(&self.value, q), q),
            None => f.write_str(&self.value),
        }
    }
}

/// One component of an [`ObjectName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectNamePart {
    Identifier(Ident),
    /// A name computed at runtime, e.g. Snowflake's `IDENTIFIER('tbl')`.
    Function(ObjectNamePartFunction),
}

impl ObjectNamePart {
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            ObjectNamePart::Identifier(ident) => Some(ident),
            ObjectNamePart::Function(_) => None,
        }
    }
}

impl fmt::Display for ObjectNamePart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectNamePart::Identifier(ident) => write!(f, "{}", ident),
            ObjectNamePart::Function(func) => write!(f, "{}", func),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectNamePartFunction {
    pub name: Ident,
    pub args: Vec<FunctionArg>,
}

impl fmt::Display for ObjectNamePartFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, display_comma_separated(&self.args))
    }
}

/// A possibly qualified name such as `db.schema.table`. Always has at least
/// one part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName(pub Vec<ObjectNamePart>);

impl ObjectName {
    pub fn from_idents<I: IntoIterator<Item = Ident>>(idents: I) -> Self {
        ObjectName(
            idents
                .into_iter()
                .map(ObjectNamePart::Identifier)
                .collect(),
        )
    }

    pub fn parts(&self) -> &[ObjectNamePart] {
        &self.0
    }

    /// The last part, which names the object itself.
    pub fn base(&self) -> Option<&ObjectNamePart> {
        self.0.last()
    }
}

impl From<Vec<Ident>> for ObjectName {
    fn from(idents: Vec<Ident>) -> Self {
        ObjectName::from_idents(idents)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", display_separated(&self.0, "."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Location;

    #[test]
    fn quoted_display() {
        assert_eq!("\"a\"\"b\"", Ident::with_quote('"', "a\"b").to_string());
        assert_eq!("`t`", Ident::with_quote('`', "t").to_string());
        assert_eq!("[my col]", Ident::with_quote('[', "my col").to_string());
        assert_eq!("plain", Ident::new("plain").to_string());
    }

    #[test]
    fn equality_ignores_span() {
        let span = Span::new(Location::new(1, 1), Location::new(1, 4));
        assert_eq!(Ident::new("abc"), Ident::with_span(span, "abc"));
        assert_ne!(Ident::new("abc"), Ident::with_quote('"', "abc"));
    }

    #[test]
    fn object_name_display() {
        let name = ObjectName::from_idents(vec![Ident::new("db"), Ident::new("users")]);
        assert_eq!("db.users", name.to_string());
        assert_eq!(Some(&Ident::new("users")), name.base().and_then(|p| p.as_ident()));
    }
}
