use combine::easy;
use combine::parser::char::{char as chr, digit, string as strn};
use combine::stream::Stream;
use combine::{
    any, attempt, between, choice, many, many1, one_of, optional, satisfy, skip_many,
    skip_many1, ParseError as StreamError, Parser,
};
use tracing::trace;

use super::token::{Token, TokenWithSpan, Word};
use crate::ast::{DollarQuotedString, Location, Span};
use crate::dialect::Dialect;
use crate::error::ParseError;

/// Splits SQL text into tokens, tracking the line and column of each.
pub struct Lexer<'a> {
    dialect: Dialect,
    rest: &'a str,
    location: Location,
}

impl<'a> Lexer<'a> {
    pub fn new(dialect: Dialect, sql: &'a str) -> Self {
        Lexer {
            dialect,
            rest: sql,
            location: Location::new(1, 1),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithSpan>, ParseError> {
        trace!(dialect = %self.dialect, len = self.rest.len(), "tokenizing");
        let mut tokens = vec![];
        loop {
            let comment_start = self.location;
            self.run(whitespace())
                .map_err(|_| ParseError::tokenizer("Unterminated block comment", comment_start))?;
            if self.rest.is_empty() {
                break;
            }

            let start = self.location;
            let fraction_first = !tokens
                .last()
                .map_or(false, |last: &TokenWithSpan| ends_path(&last.token));
            let token = match self.delimited_literal()? {
                Some(token) => token,
                None => match self.run(token(self.dialect, fraction_first)) {
                    Ok(Some(token)) => token,
                    Ok(None) | Err(()) => return Err(self.unexpected()),
                },
            };
            tokens.push(TokenWithSpan::new(token, Span::new(start, self.location)));
        }
        Ok(tokens)
    }

    fn run<P>(&mut self, mut parser: P) -> Result<P::Output, ()>
    where
        P: Parser<Input = easy::Stream<&'a str>>,
    {
        let input = self.rest;
        match parser.easy_parse(input) {
            Ok((output, rest)) => {
                self.advance(input.len() - rest.len());
                Ok(output)
            }
            Err(_) => Err(()),
        }
    }

    fn advance(&mut self, len: usize) {
        let (consumed, rest) = self.rest.split_at(len);
        for c in consumed.chars() {
            if c == '\n' {
                self.location.line += 1;
                self.location.column = 1;
            } else {
                self.location.column += 1;
            }
        }
        self.rest = rest;
    }

    fn unexpected(&self) -> ParseError {
        match self.rest.chars().next() {
            Some(c @ '\'') | Some(c @ '"') | Some(c @ '`') | Some(c @ '[') => ParseError::tokenizer(
                format!("Unterminated quoted literal starting with {}", c),
                self.location,
            ),
            Some(c) => ParseError::tokenizer(format!("Unexpected character '{}'", c), self.location),
            None => ParseError::tokenizer("Unexpected end of input", self.location),
        }
    }

    /// Literals closed by a multi-character delimiter: triple quoted and
    /// dollar quoted strings.
    fn delimited_literal(&mut self) -> Result<Option<Token>, ParseError> {
        let rest = self.rest;
        if self.dialect.supports_bigquery_literals() {
            for quote in ["'''", "\"\"\""] {
                if let Some(body) = rest.strip_prefix(quote) {
                    let end = body.find(quote).ok_or_else(|| {
                        ParseError::tokenizer("Unterminated triple quoted string", self.location)
                    })?;
                    let value = body[..end].to_string();
                    self.advance(quote.len() * 2 + end);
                    return Ok(Some(if quote == "'''" {
                        Token::TripleSingleQuotedString(value)
                    } else {
                        Token::TripleDoubleQuotedString(value)
                    }));
                }
            }
        }

        if self.dialect.supports_dollar_quoting() {
            if let Some(after) = rest.strip_prefix('$') {
                let tag_len = after
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                let tag = &after[..tag_len];
                let is_placeholder = tag.starts_with(|c: char| c.is_ascii_digit());
                if !is_placeholder && after[tag_len..].starts_with('$') {
                    let delimiter = format!("${}$", tag);
                    let body = &rest[delimiter.len()..];
                    let end = body.find(&delimiter).ok_or_else(|| {
                        ParseError::tokenizer("Unterminated dollar quoted string", self.location)
                    })?;
                    let value = DollarQuotedString {
                        value: body[..end].to_string(),
                        tag: if tag.is_empty() {
                            None
                        } else {
                            Some(tag.to_string())
                        },
                    };
                    self.advance(delimiter.len() * 2 + end);
                    return Ok(Some(Token::DollarQuotedString(value)));
                }
            }
        }
        Ok(None)
    }
}

fn whitespace<I>() -> impl Parser<Input = I, Output = ()>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let space = skip_many1(satisfy(|c: char| c.is_whitespace()));
    let line_comment = attempt(strn("--")).with(skip_many(satisfy(|c: char| c != '\n')));
    let stars = || skip_many1(chr('*'));
    let body = skip_many(
        skip_many1(satisfy(|c: char| c != '*'))
            .or(attempt(stars().skip(satisfy(|c: char| c != '/')))),
    );
    let block_comment = attempt(strn("/*"))
        .with(body)
        .skip(stars())
        .skip(chr('/'));
    skip_many(space.or(line_comment).or(block_comment))
}

/// Whether a `.` right after `token` continues a compound name, as in
/// `t.1` or `(x).2`, rather than starting a number like `.5`.
fn ends_path(token: &Token) -> bool {
    match token {
        Token::Word(w) => !w.is_reserved_for_alias(),
        Token::RParen | Token::RBracket => true,
        _ => false,
    }
}

fn token<I>(
    dialect: Dialect,
    fraction_first: bool,
) -> impl Parser<Input = I, Output = Option<Token>>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    prefixed_string(dialect)
        .or(quoted_token(dialect))
        .or(word().map(|w| Token::Word(Word::bare(w))))
        .or(number(fraction_first).map(Token::Number))
        .or(placeholder(dialect))
        .map(Some)
        .or(punctuation())
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'b' => '\u{8}',
        'Z' => '\u{1a}',
        other => other,
    }
}

/// Text between `open` and `close`. A doubled `close` stands for itself and,
/// when `backslash` is set, `\` escapes the next character.
fn quoted<I>(
    open: char,
    close: char,
    backslash: bool,
    enabled: bool,
) -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let plain = satisfy(move |c: char| c != close && !(backslash && c == '\\'));
    let doubled = attempt(chr(close).with(chr(close)));
    let escaped = satisfy(move |c: char| backslash && c == '\\')
        .with(any())
        .map(unescape);
    between(
        satisfy(move |c: char| enabled && c == open),
        chr(close),
        many(plain.or(doubled).or(escaped)),
    )
}

fn prefixed_string<I>(dialect: Dialect) -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let backslash = dialect.supports_backslash_escapes();
    let pg = dialect.supports_escape_string_prefix();
    let bq = dialect.supports_bigquery_literals();

    let national = attempt(one_of("nN".chars()).with(quoted('\'', '\'', backslash, true)))
        .map(Token::NationalStringLiteral);
    let hex = attempt(one_of("xX".chars()).with(quoted('\'', '\'', false, true)))
        .map(Token::HexStringLiteral);
    let escaped = attempt(
        satisfy(move |c: char| pg && (c == 'e' || c == 'E')).with(quoted('\'', '\'', true, true)),
    )
    .map(Token::EscapedStringLiteral);
    let unicode = attempt(
        (satisfy(move |c: char| pg && (c == 'u' || c == 'U')), chr('&'))
            .with(quoted('\'', '\'', false, true)),
    )
    .map(Token::UnicodeStringLiteral);
    let bytes = attempt(
        satisfy(move |c: char| bq && (c == 'b' || c == 'B')).with(
            quoted('\'', '\'', true, true)
                .map(Token::SingleQuotedByteStringLiteral)
                .or(quoted('"', '"', true, true).map(Token::DoubleQuotedByteStringLiteral)),
        ),
    );
    let raw = attempt(
        satisfy(move |c: char| bq && (c == 'r' || c == 'R')).with(
            quoted('\'', '\'', false, true)
                .map(Token::SingleQuotedRawStringLiteral)
                .or(quoted('"', '"', false, true).map(Token::DoubleQuotedRawStringLiteral)),
        ),
    );

    national
        .or(hex)
        .or(escaped)
        .or(unicode)
        .or(bytes)
        .or(raw)
}

fn quoted_token<I>(dialect: Dialect) -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let backslash = dialect.supports_backslash_escapes();
    let double_is_ident = dialect.double_quote_is_identifier();

    let single = quoted('\'', '\'', backslash, true).map(Token::SingleQuotedString);
    let double = quoted('"', '"', backslash && !double_is_ident, true).map(move |s| {
        if double_is_ident {
            Token::Word(Word::quoted('"', s))
        } else {
            Token::DoubleQuotedString(s)
        }
    });
    let backtick = quoted('`', '`', false, dialect.supports_backtick_identifiers())
        .map(|s| Token::Word(Word::quoted('`', s)));
    let bracket = quoted('[', ']', false, dialect.supports_bracket_identifiers())
        .map(|s| Token::Word(Word::quoted('[', s)));

    single.or(double).or(backtick).or(bracket)
}

fn word<I>() -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let first = satisfy(|c: char| c.is_alphabetic() || c == '_');
    let rest = many(satisfy(|c: char| c.is_alphanumeric() || c == '_' || c == '$'));
    (first, rest).map(|(first, rest): (char, String)| {
        let mut word = first.to_string();
        word.push_str(&rest);
        word
    })
}

/// `1`, `1.`, `1.5`, `1e-3` and, when `fraction_first` is set, `.5`.
fn number<I>(fraction_first: bool) -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let fraction = optional(attempt(chr('.').with(many::<String, _>(digit()))));
    let int_first = (many1::<String, _>(digit()), fraction).map(|(int, fraction)| {
        let mut text = int;
        if let Some(fraction) = fraction {
            text.push('.');
            text.push_str(&fraction);
        }
        text
    });
    let leading_dot = attempt((
        satisfy(move |c: char| fraction_first && c == '.'),
        many1::<String, _>(digit()),
    ))
    .map(|(_, fraction)| format!(".{}", fraction));
    let exponent = optional(attempt((
        one_of("eE".chars()),
        optional(one_of("+-".chars())),
        many1::<String, _>(digit()),
    )));
    (int_first.or(leading_dot), exponent).map(|(mut text, exponent)| {
        if let Some((e, sign, digits)) = exponent {
            text.push(e);
            if let Some(sign) = sign {
                text.push(sign);
            }
            text.push_str(&digits);
        }
        text
    })
}

fn placeholder<I>(dialect: Dialect) -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let dollar = dialect.supports_dollar_quoting();
    let positional = attempt((
        satisfy(move |c: char| dollar && c == '$'),
        many1::<String, _>(digit()),
    ))
    .map(|(_, n)| Token::Placeholder(format!("${}", n)));
    let question = chr('?').map(|_| Token::Placeholder("?".to_string()));
    let variable =
        attempt((chr('@'), word())).map(|(_, name)| Token::Placeholder(format!("@{}", name)));
    positional.or(question).or(variable)
}

fn punctuation<I>() -> impl Parser<Input = I, Output = Option<Token>>
where
    I: Stream<Item = char>,
    I::Error: StreamError<I::Item, I::Range, I::Position>,
{
    let long = choice([
        attempt(strn("->>")),
        attempt(strn("#>>")),
        attempt(strn("<=>")),
        attempt(strn("!~*")),
        attempt(strn("::")),
        attempt(strn(":=")),
        attempt(strn("<=")),
        attempt(strn(">=")),
        attempt(strn("<>")),
        attempt(strn("!=")),
        attempt(strn("==")),
        attempt(strn("||")),
        attempt(strn("<<")),
        attempt(strn(">>")),
        attempt(strn("->")),
        attempt(strn("#>")),
        attempt(strn("@>")),
        attempt(strn("<@")),
        attempt(strn("=>")),
        attempt(strn("~*")),
        attempt(strn("!~")),
    ])
    .map(Token::from_punctuation);
    let short = one_of(",=<>+-*/%().:;[]{}&|^~".chars()).map(|c: char| {
        let mut buf = [0; 4];
        Token::from_punctuation(c.encode_utf8(&mut buf))
    });
    long.or(short)
}

#[cfg(test)]
mod test {
    use super::*;

    fn lex(dialect: Dialect, sql: &str) -> Vec<Token> {
        Lexer::new(dialect, sql)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    fn bare(w: &str) -> Token {
        Token::Word(Word::bare(w))
    }

    #[test]
    fn simple_select() {
        let tokens = lex(Dialect::Generic, "SELECT a, 1.5e3 FROM t WHERE b >= 'x''y';");
        let expected = vec![
            bare("SELECT"),
            bare("a"),
            Token::Comma,
            Token::Number("1.5e3".to_string()),
            bare("FROM"),
            bare("t"),
            bare("WHERE"),
            bare("b"),
            Token::GtEq,
            Token::SingleQuotedString("x'y".to_string()),
            Token::SemiColon,
        ];
        assert_eq!(expected, tokens);
    }

    #[test]
    fn leading_dot_numbers() {
        let number = |n: &str| Token::Number(n.to_string());
        assert_eq!(
            vec![
                bare("SELECT"),
                number("1e10"),
                Token::Comma,
                number(".5"),
                Token::Comma,
                number("1."),
                Token::Comma,
                number(".25e-2"),
            ],
            lex(Dialect::Generic, "SELECT 1e10, .5, 1., .25e-2")
        );
        assert_eq!(
            vec![bare("t"), Token::Period, number("1")],
            lex(Dialect::ClickHouse, "t.1")
        );
        assert_eq!(
            vec![bare("WHERE"), number(".5"), Token::Lt, bare("a")],
            lex(Dialect::Generic, "WHERE .5 < a")
        );
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = lex(Dialect::Generic, "-- leading\nSELECT /* a ** b */ 1 /**/");
        assert_eq!(vec![bare("SELECT"), Token::Number("1".to_string())], tokens);
    }

    #[test]
    fn quoting_follows_dialect() {
        assert_eq!(
            vec![Token::Word(Word::quoted('"', "a b"))],
            lex(Dialect::PostgreSql, "\"a b\"")
        );
        assert_eq!(
            vec![Token::DoubleQuotedString("a b".to_string())],
            lex(Dialect::MySql, "\"a b\"")
        );
        assert_eq!(
            vec![Token::Word(Word::quoted('`', "t"))],
            lex(Dialect::MySql, "`t`")
        );
        assert_eq!(
            vec![Token::Word(Word::quoted('[', "my col"))],
            lex(Dialect::MsSql, "[my col]")
        );
        assert_eq!(
            vec![Token::SingleQuotedString("it's\n".to_string())],
            lex(Dialect::MySql, r"'it\'s\n'")
        );
    }

    #[test]
    fn prefixed_and_delimited_literals() {
        assert_eq!(
            vec![
                Token::NationalStringLiteral("n".to_string()),
                Token::HexStringLiteral("AB".to_string()),
                Token::EscapedStringLiteral("a\tb".to_string()),
            ],
            lex(Dialect::PostgreSql, r"N'n' X'AB' E'a\tb'")
        );
        assert_eq!(
            vec![Token::DollarQuotedString(DollarQuotedString {
                value: "it's".to_string(),
                tag: Some("fn".to_string()),
            })],
            lex(Dialect::PostgreSql, "$fn$it's$fn$")
        );
        assert_eq!(
            vec![
                Token::Placeholder("$1".to_string()),
                Token::Placeholder("?".to_string())
            ],
            lex(Dialect::PostgreSql, "$1 ?")
        );
        assert_eq!(
            vec![Token::TripleSingleQuotedString("a'b".to_string())],
            lex(Dialect::BigQuery, "'''a'b'''")
        );
    }

    #[test]
    fn operators_take_longest_match() {
        assert_eq!(
            vec![
                bare("a"),
                Token::LongArrow,
                bare("b"),
                Token::DoubleColon,
                bare("c"),
                Token::Spaceship,
                Token::Neq,
                Token::Neq,
            ],
            lex(Dialect::Generic, "a->>b::c <=> <> !=")
        );
    }

    #[test]
    fn locations_are_one_based() {
        let tokens = Lexer::new(Dialect::Generic, "SELECT\n  foo").tokenize().unwrap();
        assert_eq!(Location::new(1, 1), tokens[0].span.start);
        assert_eq!(Location::new(2, 3), tokens[1].span.start);
        assert_eq!(Location::new(2, 6), tokens[1].span.end);
    }

    #[test]
    fn tokenizer_errors() {
        let err = Lexer::new(Dialect::Generic, "SELECT 'abc").tokenize().unwrap_err();
        assert_eq!(crate::error::ParseErrorKind::Tokenizer, err.kind);
        assert_eq!(Location::new(1, 8), err.location);

        // Reported where the whitespace run holding the comment starts.
        let err = Lexer::new(Dialect::Generic, "SELECT /* open").tokenize().unwrap_err();
        assert_eq!(Location::new(1, 7), err.location);

        assert!(Lexer::new(Dialect::Generic, "SELECT !").tokenize().is_err());
    }
}
