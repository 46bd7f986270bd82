//! Turns SQL text into [`Statement`]s.
//!
//! A `combine` lexer splits the input into tokens; a recursive-descent parser
//! then builds the tree. The grammar is spread over `sql` (queries, data and
//! session statements), `expr` (expressions), `types` (data types) and `ddl`
//! (schema statements), all as methods on the one [`Parser`].

mod ddl;
mod expr;
mod lexer;
mod sql;
mod token;
mod types;

use tracing::{debug, trace};

use self::lexer::Lexer;
use self::token::{Token, TokenWithSpan};
use crate::ast::{
    Ident, Location, ObjectName, ObjectNamePart, ObjectNamePartFunction, OpaquePayload, Span,
    Statement,
};
use crate::dialect::Dialect;
use crate::error::ParseError;

type PResult<T> = Result<T, ParseError>;

/// Parses every `;` separated statement of `sql`. Empty statements are
/// skipped, so blank input gives an empty list.
pub fn parse_sql(dialect: Dialect, sql: &str, recursion_limit: usize) -> PResult<Vec<Statement>> {
    let tokens = Lexer::new(dialect, sql).tokenize()?;
    trace!(tokens = tokens.len(), "lexed input");
    Parser::new(dialect, tokens, recursion_limit).parse_statements()
}

pub(crate) struct Parser {
    dialect: Dialect,
    tokens: Vec<TokenWithSpan>,
    index: usize,
    eof: TokenWithSpan,
    depth: usize,
    recursion_limit: usize,
}

impl Parser {
    fn new(dialect: Dialect, tokens: Vec<TokenWithSpan>, recursion_limit: usize) -> Self {
        let end = tokens
            .last()
            .map_or(Location::new(1, 1), |token| token.span.end);
        Parser {
            dialect,
            tokens,
            index: 0,
            eof: TokenWithSpan::eof(Span::new(end, end)),
            depth: 0,
            recursion_limit,
        }
    }

    fn parse_statements(&mut self) -> PResult<Vec<Statement>> {
        let mut statements = vec![];
        let mut expecting_delimiter = false;
        loop {
            while self.next_if_token(&Token::SemiColon) {
                expecting_delimiter = false;
            }
            if self.peek_token() == &Token::EOF {
                break;
            }
            if expecting_delimiter {
                return self.expected("end of statement");
            }
            let start = self.peek().span.start;
            let statement = self.parse_statement()?;
            debug!(
                line = start.line,
                column = start.column,
                index = statements.len(),
                "parsed statement"
            );
            statements.push(statement);
            expecting_delimiter = true;
        }
        Ok(statements)
    }

    fn peek(&self) -> &TokenWithSpan {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &TokenWithSpan {
        self.tokens.get(self.index + n).unwrap_or(&self.eof)
    }

    fn peek_token(&self) -> &Token {
        &self.peek().token
    }

    fn next(&mut self) -> TokenWithSpan {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn peek_keyword(&self, kw: &str) -> bool {
        self.peek_token().is_keyword(kw)
    }

    fn peek_nth_keyword(&self, n: usize, kw: &str) -> bool {
        self.peek_nth(n).token.is_keyword(kw)
    }

    /// Consumes the next token if it is the keyword `kw`.
    fn next_if_keyword(&mut self, kw: &str) -> bool {
        if self.peek_keyword(kw) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the keywords only if all of them follow in order.
    fn next_if_keywords(&mut self, kws: &[&str]) -> bool {
        let all = kws
            .iter()
            .enumerate()
            .all(|(n, kw)| self.peek_nth_keyword(n, kw));
        if all {
            self.index += kws.len();
        }
        all
    }

    fn next_if_one_of(&mut self, kws: &[&'static str]) -> Option<&'static str> {
        let found = kws.iter().copied().find(|kw| self.peek_keyword(kw))?;
        self.index += 1;
        Some(found)
    }

    fn next_if_token(&mut self, token: &Token) -> bool {
        if self.peek_token() == token && *token != Token::EOF {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> PResult<()> {
        if self.next_if_keyword(kw) {
            Ok(())
        } else {
            self.expected(kw)
        }
    }

    fn expect_keywords(&mut self, kws: &[&str]) -> PResult<()> {
        for kw in kws {
            self.expect_keyword(kw)?;
        }
        Ok(())
    }

    fn expect_token(&mut self, token: &Token) -> PResult<()> {
        if self.next_if_token(token) {
            Ok(())
        } else {
            self.expected(&token.to_string())
        }
    }

    /// Fails with `Expected: {what}, found: {next token}`.
    fn expected<T>(&self, what: &str) -> PResult<T> {
        let found = self.peek();
        Err(ParseError::expected(what, &found.token, found.span.start))
    }

    /// Runs `f` one nesting level deeper, failing once the configured limit
    /// is reached.
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.recursion_limit {
            return Err(ParseError::recursion_limit(self.peek().span.start));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_comma_separated<T, F>(&mut self, mut f: F) -> PResult<Vec<T>>
    where
        F: FnMut(&mut Parser) -> PResult<T>,
    {
        let mut values = vec![f(self)?];
        while self.next_if_token(&Token::Comma) {
            values.push(f(self)?);
        }
        Ok(values)
    }

    fn parse_identifier(&mut self) -> PResult<Ident> {
        let next = self.peek();
        let ident = next.token.word().map(|word| word.to_ident(next.span));
        match ident {
            Some(ident) => {
                self.index += 1;
                Ok(ident)
            }
            None => self.expected("identifier"),
        }
    }

    fn parse_object_name(&mut self) -> PResult<ObjectName> {
        let mut parts = vec![];
        loop {
            if self.dialect == Dialect::Snowflake
                && self.peek_keyword("IDENTIFIER")
                && self.peek_nth(1).token == Token::LParen
            {
                let name = self.parse_identifier()?;
                self.expect_token(&Token::LParen)?;
                let args = self.parse_comma_separated(Parser::parse_function_arg)?;
                self.expect_token(&Token::RParen)?;
                parts.push(ObjectNamePart::Function(ObjectNamePartFunction { name, args }));
            } else {
                parts.push(ObjectNamePart::Identifier(self.parse_identifier()?));
            }
            if !self.next_if_token(&Token::Period) {
                break;
            }
        }
        Ok(ObjectName(parts))
    }

    /// `(a, b, ...)`, possibly empty.
    fn parse_parenthesized_idents(&mut self) -> PResult<Vec<Ident>> {
        self.expect_token(&Token::LParen)?;
        if self.next_if_token(&Token::RParen) {
            return Ok(vec![]);
        }
        let idents = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_token(&Token::RParen)?;
        Ok(idents)
    }

    fn parse_literal_uint(&mut self) -> PResult<u64> {
        let value = match self.peek_token() {
            Token::Number(n) => n.parse::<u64>().ok(),
            _ => None,
        };
        match value {
            Some(value) => {
                self.index += 1;
                Ok(value)
            }
            None => self.expected("an unsigned integer"),
        }
    }

    fn parse_literal_string(&mut self) -> PResult<String> {
        let value = match self.peek_token() {
            Token::SingleQuotedString(s)
            | Token::DoubleQuotedString(s)
            | Token::NationalStringLiteral(s)
            | Token::EscapedStringLiteral(s) => Some(s.clone()),
            _ => None,
        };
        match value {
            Some(value) => {
                self.index += 1;
                Ok(value)
            }
            None => self.expected("a string literal"),
        }
    }

    fn if_not_exists(&mut self) -> bool {
        self.next_if_keywords(&["IF", "NOT", "EXISTS"])
    }

    fn if_exists(&mut self) -> bool {
        self.next_if_keywords(&["IF", "EXISTS"])
    }

    /// Keeps the rest of the statement as normalised token text.
    fn parse_opaque_statement(&mut self) -> PResult<Statement> {
        let start = self.index;
        while !matches!(self.peek_token(), Token::SemiColon | Token::EOF) {
            self.index += 1;
        }
        Ok(Statement::Opaque(self.opaque_payload(start)))
    }

    /// Renders the tokens from `start` up to the current position. The kind
    /// is the first word, upper cased.
    fn opaque_payload(&self, start: usize) -> OpaquePayload {
        let tokens = &self.tokens[start..self.index];
        let kind = tokens
            .first()
            .and_then(|token| token.token.word())
            .map(|word| word.value.to_ascii_uppercase())
            .unwrap_or_default();
        OpaquePayload::new(kind, render_tokens(tokens))
    }
}

/// Joins tokens with single spaces, keeping punctuation tight so that the
/// result lexes back to the same tokens.
fn render_tokens(tokens: &[TokenWithSpan]) -> String {
    let mut text = String::new();
    let mut prev: Option<&Token> = None;
    for token in tokens.iter().map(|t| &t.token) {
        if let Some(prev) = prev {
            let tight = matches!(
                token,
                Token::Comma | Token::RParen | Token::Period | Token::RBracket
            ) || matches!(prev, Token::LParen | Token::Period | Token::LBracket)
                || (*token == Token::LParen && matches!(prev, Token::Word(_)));
            if !tight {
                text.push(' ');
            }
        }
        match token.to_value() {
            Some(value) => text.push_str(&value.to_string()),
            None => text.push_str(&token.to_string()),
        }
        prev = Some(token);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::parse_sql;
    use crate::ast::Statement;
    use crate::dialect::Dialect;
    use crate::error::{ParseError, ParseErrorKind};

    fn parse(sql: &str) -> Result<Vec<Statement>, ParseError> {
        parse_sql(Dialect::Generic, sql, 50)
    }

    fn parse_one(dialect: Dialect, sql: &str) -> Statement {
        let mut statements = match parse_sql(dialect, sql, 50) {
            Ok(statements) => statements,
            Err(err) => panic!("parsing {:?} failed: {}", sql, err),
        };
        assert_eq!(1, statements.len(), "{:?}", sql);
        statements.remove(0)
    }

    macro_rules! test_parse_success {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let input = $value;
                    match parse(input) {
                        Ok(_) => println!("PASS"),
                        Err(msg) => panic!("parsing failed: {}", msg),
                    }
                }
            )*
        }
    }

    test_parse_success! {
        dual_int: "select 1;",
        dual_string: "select 'abc';",
        dual_bool: "select true;",
        star: "select * from foo;",
        star_plus: "select *, a from foo;",
        join_join: "select * from foo join bar on foo.id = bar.id;",
        join_comma: "select * from foo, bar;",
        join_left_outer: "select * from foo left outer join bar using (id);",
        join_cross: "select * from foo cross join bar;",
        join_natural: "select * from foo natural join bar;",
        alias_col_as: "select a as b from foo;",
        alias_col_no_as: "select a b from foo;",
        alias_table: "select a from foo tbl_f;",
        expressions: "select 1, 1 + 2, 3, hello(world, dragon);",
        no_semicolon: "select * from foo",
        empty_statements: ";;select 1;;",
        group_having: "select a, count(*) from t group by a having count(*) > 1 order by 2 desc limit 10",
        cte: "with recursive r (n) as (select 1 union all select n + 1 from r) select * from r",
        window: "select rank() over (partition by a order by b rows between unbounded preceding and current row) from t",
        subqueries: "select * from (select 1) as s where exists (select 1) and x in (select y from z)",
        insert_select: "insert into t (a) select a from s",
        update_from: "update t set a = s.a from s where t.id = s.id returning *",
        delete_using: "delete from t using s where t.id = s.id",
        create_table: "create table if not exists t (id int primary key, name varchar(20) not null default 'x', check (id > 0))",
        alter_table: "alter table t add column c int, drop column d, rename column e to f",
        transaction: "begin; commit; rollback to savepoint s",
        explain: "explain analyze select 1",
        opaque: "grant select on t to u",
    }

    macro_rules! test_parse_failure {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let input = $value;
                    match parse(input) {
                        Ok(_) => panic!("expected parsing to fail, but it succeeded"),
                        Err(_) => println!("PASS"),
                    }
                }
            )*
        }
    }

    test_parse_failure! {
        misspelled_keyword: "selec * from foo;",
        missing_projection: "select from foo;",
        dangling_operator: "select 1 +;",
        unclosed_paren: "select (1 + 2;",
        two_statements_no_delimiter: "select 1 select 2",
        join_without_table: "select * from foo join;",
        insert_without_source: "insert into t;",
        unterminated_string: "select 'abc",
    }

    /// Inputs written exactly the way the formatter prints them.
    macro_rules! test_round_trip {
        ($($name:ident: ($dialect:expr, $value:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    let statement = parse_one($dialect, $value);
                    assert_eq!($value, statement.to_string());
                }
            )*
        }
    }

    test_round_trip! {
        rt_select_star: (Dialect::Generic, "SELECT * FROM users"),
        rt_join: (Dialect::Generic, "SELECT * FROM users INNER JOIN orders ON users.id = orders.user_id"),
        rt_precedence: (Dialect::Generic, "SELECT a + b * c, (a + b) * c, -a, NOT a = b"),
        rt_predicates: (Dialect::Generic, "SELECT * FROM t WHERE a BETWEEN 1 AND 2 AND b NOT IN (1, 2) AND c IS NOT NULL AND d LIKE 'x%' ESCAPE '!'"),
        rt_case: (Dialect::Generic, "SELECT CASE WHEN a > 0 THEN 'pos' ELSE NULL END FROM t"),
        rt_cast: (Dialect::PostgreSql, "SELECT CAST(a AS DECIMAL(10, 2)), b::TEXT, c::INTEGER[]"),
        rt_aggregate: (Dialect::Generic, "SELECT count(DISTINCT a), sum(b) FILTER (WHERE b > 0) FROM t GROUP BY ROLLUP (a, (a, b))"),
        rt_window: (Dialect::Generic, "SELECT row_number() OVER (PARTITION BY dept ORDER BY salary DESC NULLS LAST ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM emp"),
        rt_set_operations: (Dialect::Generic, "SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3"),
        rt_cte: (Dialect::Generic, "WITH t AS (SELECT 1 AS a) SELECT a FROM t ORDER BY a LIMIT 10 OFFSET 5"),
        rt_insert: (Dialect::Generic, "INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, 'Bob')"),
        rt_upsert: (Dialect::PostgreSql, "INSERT INTO t (a) VALUES (1) ON CONFLICT (a) DO UPDATE SET a = 2 RETURNING a"),
        rt_update: (Dialect::Generic, "UPDATE t SET a = 1, b = 'x' WHERE id = 3"),
        rt_delete: (Dialect::Generic, "DELETE FROM t WHERE id = 1"),
        rt_create_table: (Dialect::Generic, "CREATE TABLE IF NOT EXISTS t (id INT PRIMARY KEY, name VARCHAR(20) NOT NULL, CONSTRAINT fk FOREIGN KEY (oid) REFERENCES o (id) ON DELETE CASCADE)"),
        rt_create_view: (Dialect::Generic, "CREATE OR REPLACE VIEW v AS SELECT * FROM t"),
        rt_create_index: (Dialect::Generic, "CREATE UNIQUE INDEX IF NOT EXISTS idx ON t (a, b DESC)"),
        rt_drop: (Dialect::Generic, "DROP TABLE IF EXISTS a, b CASCADE"),
        rt_mysql_table_options: (Dialect::MySql, "CREATE TABLE t (id INT AUTO_INCREMENT) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4"),
        rt_mysql_limit: (Dialect::MySql, "SELECT * FROM t LIMIT 5, 10"),
        rt_top: (Dialect::MsSql, "SELECT TOP 10 * FROM [dbo].[t]"),
        rt_json_arrows: (Dialect::PostgreSql, "SELECT data ->> 'name' FROM t WHERE data -> 'tags' @> '[1]'"),
        rt_interval: (Dialect::Generic, "SELECT INTERVAL '1' DAY, EXTRACT(YEAR FROM d), TRIM(BOTH 'x' FROM s)"),
        rt_lambda: (Dialect::ClickHouse, "SELECT arrayMap(x -> x + 1, arr)"),
        rt_transaction: (Dialect::Generic, "START TRANSACTION READ ONLY, ISOLATION LEVEL SERIALIZABLE"),
        rt_opaque: (Dialect::Generic, "GRANT SELECT ON t TO u"),
    }

    #[test]
    fn statements_are_split_on_semicolons() {
        let statements = parse("SELECT 1; ; SELECT 2;").unwrap();
        assert_eq!(2, statements.len());
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" ; ;").unwrap().is_empty());
    }

    #[test]
    fn unknown_statement_reports_position() {
        let err = parse("SELEC * FROM users;").unwrap_err();
        assert_eq!(ParseErrorKind::Syntax, err.kind);
        assert_eq!("Expected: an SQL statement, found: SELEC", err.message);
        assert_eq!((1, 1), (err.location.line, err.location.column));

        let err = parse("SELECT 1;\n  SELEC 2").unwrap_err();
        assert_eq!((2, 3), (err.location.line, err.location.column));
    }

    #[test]
    fn end_of_input_is_reported() {
        let err = parse("SELECT * FROM").unwrap_err();
        assert_eq!("Expected: identifier, found: EOF", err.message);
    }

    #[test]
    fn deep_nesting_hits_recursion_limit() {
        let sql = format!("SELECT {}1{}", "(".repeat(100), ")".repeat(100));
        let err = parse(&sql).unwrap_err();
        assert_eq!(ParseErrorKind::RecursionLimitExceeded, err.kind);
        assert!(parse_sql(Dialect::Generic, &sql, 500).is_ok());
    }

    #[test]
    fn opaque_statements_keep_normalised_text() {
        let statement = parse_one(Dialect::Generic, "vacuum  full   analyze t ( a,b )");
        match statement {
            Statement::Opaque(payload) => {
                assert_eq!("VACUUM", payload.kind);
                assert_eq!("vacuum full analyze t(a, b)", payload.text);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn string_quoting_depends_on_dialect() {
        let generic = parse_one(Dialect::Generic, "SELECT \"a\" FROM t");
        assert_eq!("SELECT \"a\" FROM t", generic.to_string());
        let mysql = parse_one(Dialect::MySql, "SELECT \"it's\", `col` FROM t");
        assert_eq!("SELECT \"it's\", `col` FROM t", mysql.to_string());
    }
}
