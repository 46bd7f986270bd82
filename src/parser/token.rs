use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;

use crate::ast::{DollarQuotedString, Ident, Span, Value};

lazy_static! {
    /// Keywords that end an expression list, so a bare word after an
    /// expression or table is not taken as an implicit alias.
    static ref RESERVED_FOR_ALIAS: HashSet<&'static str> = [
        "ALL", "ANTI", "APPLY", "AS", "ASOF", "BY", "CLUSTER", "CROSS", "DISTRIBUTE", "EXCEPT",
        "FETCH", "FOR", "FROM", "FULL", "GROUP", "HAVING", "INNER", "INTERSECT", "INTO", "JOIN",
        "LATERAL", "LEFT", "LIMIT", "MINUS", "NATURAL", "OFFSET", "ON", "ORDER", "OUTER",
        "PIVOT", "QUALIFY", "RETURNING", "RIGHT", "SELECT", "SEMI", "SET", "SORT", "TOP",
        "UNION", "UNPIVOT", "USING", "VALUES", "WHERE", "WINDOW", "WITH", "END", "THEN", "ELSE",
        "WHEN", "AND", "OR", "NOT", "IS", "IN", "LIKE", "ILIKE", "BETWEEN", "ESCAPE", "ASC",
        "DESC", "NULLS", "PARTITION", "OVER", "FILTER", "WITHIN", "DEFAULT", "CASCADE",
        "RESTRICT", "COLLATE", "DIV", "XOR", "REGEXP", "RLIKE", "SIMILAR", "AT",
        "MATCH_CONDITION",
    ]
    .iter()
    .cloned()
    .collect();

    /// Statement keywords the grammar does not model but still accepts as
    /// opaque statements.
    static ref OPAQUE_STATEMENTS: HashSet<&'static str> = [
        "ANALYZE", "ATTACH", "CACHE", "CALL", "CLOSE", "COMMENT", "COPY", "DEALLOCATE", "DECLARE",
        "DETACH", "DISCARD", "EXECUTE", "FETCH", "FLUSH", "GRANT", "KILL", "LISTEN", "LOAD",
        "LOCK", "MERGE", "MSCK", "NOTIFY", "OPTIMIZE", "PRAGMA", "PREPARE", "REFRESH", "RESET",
        "REVOKE", "SHOW", "UNCACHE", "UNLISTEN", "UNLOAD", "UNLOCK", "VACUUM",
    ]
    .iter()
    .cloned()
    .collect();
}

/// A bare or quoted word. Keywords are words too; the grammar decides by
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub value: String,
    pub quote_style: Option<char>,
}

impl Word {
    pub fn bare<S: Into<String>>(value: S) -> Self {
        Word {
            value: value.into(),
            quote_style: None,
        }
    }

    pub fn quoted<S: Into<String>>(quote: char, value: S) -> Self {
        Word {
            value: value.into(),
            quote_style: Some(quote),
        }
    }

    /// Whether this is the unquoted keyword `kw`, ignoring case.
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.quote_style.is_none() && self.value.eq_ignore_ascii_case(kw)
    }

    pub fn is_reserved_for_alias(&self) -> bool {
        self.quote_style.is_none()
            && RESERVED_FOR_ALIAS.contains(self.value.to_ascii_uppercase().as_str())
    }

    pub fn starts_opaque_statement(&self) -> bool {
        self.quote_style.is_none()
            && OPAQUE_STATEMENTS.contains(self.value.to_ascii_uppercase().as_str())
    }

    pub fn to_ident(&self, span: Span) -> Ident {
        Ident {
            value: self.value.clone(),
            quote_style: self.quote_style,
            span,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_ident(Span::empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    EOF,
    Word(Word),
    Number(String),
    SingleQuotedString(String),
    DoubleQuotedString(String),
    TripleSingleQuotedString(String),
    TripleDoubleQuotedString(String),
    DollarQuotedString(DollarQuotedString),
    NationalStringLiteral(String),
    EscapedStringLiteral(String),
    UnicodeStringLiteral(String),
    HexStringLiteral(String),
    SingleQuotedByteStringLiteral(String),
    DoubleQuotedByteStringLiteral(String),
    SingleQuotedRawStringLiteral(String),
    DoubleQuotedRawStringLiteral(String),
    Placeholder(String),
    Comma,
    Eq,
    DoubleEq,
    Neq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Spaceship,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    StringConcat,
    LParen,
    RParen,
    Period,
    Colon,
    DoubleColon,
    Assignment,
    SemiColon,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    TildeAsterisk,
    ExclamationMarkTilde,
    ExclamationMarkTildeAsterisk,
    ShiftLeft,
    ShiftRight,
    Arrow,
    LongArrow,
    HashArrow,
    HashLongArrow,
    AtArrow,
    ArrowAt,
    RArrow,
}

impl Token {
    pub fn word(&self) -> Option<&Word> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        self.word().map_or(false, |w| w.is_keyword(kw))
    }

    /// The literal this token spells, if it is a number, string or
    /// placeholder.
    pub fn to_value(&self) -> Option<Value> {
        let value = match self {
            Token::Number(n) => Value::number(n.as_str()),
            Token::SingleQuotedString(s) => Value::SingleQuotedString(s.clone()),
            Token::DoubleQuotedString(s) => Value::DoubleQuotedString(s.clone()),
            Token::TripleSingleQuotedString(s) => Value::TripleSingleQuotedString(s.clone()),
            Token::TripleDoubleQuotedString(s) => Value::TripleDoubleQuotedString(s.clone()),
            Token::DollarQuotedString(s) => Value::DollarQuotedString(s.clone()),
            Token::NationalStringLiteral(s) => Value::NationalStringLiteral(s.clone()),
            Token::EscapedStringLiteral(s) => Value::EscapedStringLiteral(s.clone()),
            Token::UnicodeStringLiteral(s) => Value::UnicodeStringLiteral(s.clone()),
            Token::HexStringLiteral(s) => Value::HexStringLiteral(s.clone()),
            Token::SingleQuotedByteStringLiteral(s) => {
                Value::SingleQuotedByteStringLiteral(s.clone())
            }
            Token::DoubleQuotedByteStringLiteral(s) => {
                Value::DoubleQuotedByteStringLiteral(s.clone())
            }
            Token::SingleQuotedRawStringLiteral(s) => Value::SingleQuotedRawStringLiteral(s.clone()),
            Token::DoubleQuotedRawStringLiteral(s) => Value::DoubleQuotedRawStringLiteral(s.clone()),
            Token::Placeholder(p) => Value::Placeholder(p.clone()),
            _ => return None,
        };
        Some(value)
    }

    /// Maps operator text produced by the lexer to its token.
    pub(crate) fn from_punctuation(text: &str) -> Option<Token> {
        let token = match text {
            "->>" => Token::LongArrow,
            "#>>" => Token::HashLongArrow,
            "<=>" => Token::Spaceship,
            "!~*" => Token::ExclamationMarkTildeAsterisk,
            "::" => Token::DoubleColon,
            ":=" => Token::Assignment,
            "<=" => Token::LtEq,
            ">=" => Token::GtEq,
            "<>" | "!=" => Token::Neq,
            "==" => Token::DoubleEq,
            "||" => Token::StringConcat,
            "<<" => Token::ShiftLeft,
            ">>" => Token::ShiftRight,
            "->" => Token::Arrow,
            "#>" => Token::HashArrow,
            "@>" => Token::AtArrow,
            "<@" => Token::ArrowAt,
            "=>" => Token::RArrow,
            "~*" => Token::TildeAsterisk,
            "!~" => Token::ExclamationMarkTilde,
            "," => Token::Comma,
            "=" => Token::Eq,
            "<" => Token::Lt,
            ">" => Token::Gt,
            "+" => Token::Plus,
            "-" => Token::Minus,
            "*" => Token::Mul,
            "/" => Token::Div,
            "%" => Token::Mod,
            "(" => Token::LParen,
            ")" => Token::RParen,
            "." => Token::Period,
            ":" => Token::Colon,
            ";" => Token::SemiColon,
            "[" => Token::LBracket,
            "]" => Token::RBracket,
            "{" => Token::LBrace,
            "}" => Token::RBrace,
            "&" => Token::Ampersand,
            "|" => Token::Pipe,
            "^" => Token::Caret,
            "~" => Token::Tilde,
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::EOF => f.write_str("EOF"),
            Token::Word(word) => write!(f, "{}", word),
            Token::Number(n) => f.write_str(n),
            Token::SingleQuotedString(s) => write!(f, "'{}'", s),
            Token::DoubleQuotedString(s) => write!(f, "\"{}\"", s),
            Token::TripleSingleQuotedString(s) => write!(f, "'''{}'''", s),
            Token::TripleDoubleQuotedString(s) => write!(f, "\"\"\"{}\"\"\"", s),
            Token::DollarQuotedString(s) => write!(f, "{}", s),
            Token::NationalStringLiteral(s) => write!(f, "N'{}'", s),
            Token::EscapedStringLiteral(s) => write!(f, "E'{}'", s),
            Token::UnicodeStringLiteral(s) => write!(f, "U&'{}'", s),
            Token::HexStringLiteral(s) => write!(f, "X'{}'", s),
            Token::SingleQuotedByteStringLiteral(s) => write!(f, "B'{}'", s),
            Token::DoubleQuotedByteStringLiteral(s) => write!(f, "B\"{}\"", s),
            Token::SingleQuotedRawStringLiteral(s) => write!(f, "R'{}'", s),
            Token::DoubleQuotedRawStringLiteral(s) => write!(f, "R\"{}\"", s),
            Token::Placeholder(p) => f.write_str(p),
            Token::Comma => f.write_str(","),
            Token::Eq => f.write_str("="),
            Token::DoubleEq => f.write_str("=="),
            Token::Neq => f.write_str("<>"),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::LtEq => f.write_str("<="),
            Token::GtEq => f.write_str(">="),
            Token::Spaceship => f.write_str("<=>"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Mul => f.write_str("*"),
            Token::Div => f.write_str("/"),
            Token::Mod => f.write_str("%"),
            Token::StringConcat => f.write_str("||"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Period => f.write_str("."),
            Token::Colon => f.write_str(":"),
            Token::DoubleColon => f.write_str("::"),
            Token::Assignment => f.write_str(":="),
            Token::SemiColon => f.write_str(";"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
            Token::Ampersand => f.write_str("&"),
            Token::Pipe => f.write_str("|"),
            Token::Caret => f.write_str("^"),
            Token::Tilde => f.write_str("~"),
            Token::TildeAsterisk => f.write_str("~*"),
            Token::ExclamationMarkTilde => f.write_str("!~"),
            Token::ExclamationMarkTildeAsterisk => f.write_str("!~*"),
            Token::ShiftLeft => f.write_str("<<"),
            Token::ShiftRight => f.write_str(">>"),
            Token::Arrow => f.write_str("->"),
            Token::LongArrow => f.write_str("->>"),
            Token::HashArrow => f.write_str("#>"),
            Token::HashLongArrow => f.write_str("#>>"),
            Token::AtArrow => f.write_str("@>"),
            Token::ArrowAt => f.write_str("<@"),
            Token::RArrow => f.write_str("=>"),
        }
    }
}

/// A token and the source text it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}

impl TokenWithSpan {
    pub fn new(token: Token, span: Span) -> Self {
        TokenWithSpan { token, span }
    }

    pub fn eof(span: Span) -> Self {
        TokenWithSpan::new(Token::EOF, span)
    }
}
