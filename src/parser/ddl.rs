//! Schema statements: `CREATE`, `ALTER TABLE`, `DROP` and `TRUNCATE`.
//!
//! Forms outside the modelled subset are not errors. The parser rewinds to
//! the statement start and keeps the text as an opaque statement, and the
//! same happens for unmodelled `ALTER TABLE` actions and column options.

use super::token::Token;
use super::{PResult, Parser};
use crate::ast::{
    AlterColumnOperation, AlterTableOperation, ColumnDef, ColumnOption, ColumnOptionDef,
    CreateIndex, CreateTable, DataType, Expr, ObjectType, ReferentialAction, SqlOption, Statement,
    TableConstraint,
};

/// Keywords that start a column option, so a column definition seeing one
/// right after the name has no data type.
const COLUMN_OPTION_KEYWORDS: &[&str] = &[
    "NOT", "NULL", "DEFAULT", "PRIMARY", "UNIQUE", "REFERENCES", "CHECK", "COMMENT", "GENERATED",
    "CONSTRAINT", "COLLATE",
];

const REFERENTIAL_ACTION_KEYWORDS: &[&str] = &["RESTRICT", "CASCADE", "SET", "NO"];

impl Parser {
    pub(super) fn parse_create(&mut self) -> PResult<Statement> {
        let start = self.index;
        self.expect_keyword("CREATE")?;
        let or_replace = self.next_if_keywords(&["OR", "REPLACE"]);
        let temporary = self.next_if_one_of(&["TEMPORARY", "TEMP"]).is_some();
        let materialized = self.next_if_keyword("MATERIALIZED");
        let unique = self.next_if_keyword("UNIQUE");
        let plain = !or_replace && !temporary && !materialized && !unique;

        if !materialized && !unique && self.next_if_keyword("TABLE") {
            self.parse_create_table(or_replace, temporary)
        } else if !temporary && !unique && self.next_if_keyword("VIEW") {
            let if_not_exists = self.if_not_exists();
            let name = self.parse_object_name()?;
            let columns = if self.peek_token() == &Token::LParen {
                self.parse_parenthesized_idents()?
            } else {
                vec![]
            };
            self.expect_keyword("AS")?;
            Ok(Statement::CreateView {
                or_replace,
                materialized,
                if_not_exists,
                name,
                columns,
                query: Box::new(self.parse_query()?),
            })
        } else if !or_replace && !temporary && !materialized && self.next_if_keyword("INDEX") {
            self.parse_create_index(unique)
        } else if plain && self.next_if_keyword("SCHEMA") {
            Ok(Statement::CreateSchema {
                if_not_exists: self.if_not_exists(),
                schema_name: self.parse_object_name()?,
            })
        } else if plain && self.next_if_keyword("DATABASE") {
            Ok(Statement::CreateDatabase {
                if_not_exists: self.if_not_exists(),
                db_name: self.parse_object_name()?,
            })
        } else {
            self.index = start;
            self.parse_opaque_statement()
        }
    }

    /// Called after `TABLE`.
    fn parse_create_table(&mut self, or_replace: bool, temporary: bool) -> PResult<Statement> {
        let if_not_exists = self.if_not_exists();
        let name = self.parse_object_name()?;
        let like = if self.next_if_keyword("LIKE") {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        let (columns, constraints) = if like.is_none() && self.next_if_token(&Token::LParen) {
            self.parse_table_elements()?
        } else {
            (vec![], vec![])
        };

        let with_options = if self.peek_keyword("WITH") && self.peek_nth(1).token == Token::LParen
        {
            self.index += 2;
            let options = self.parse_comma_separated(Parser::parse_sql_option)?;
            self.expect_token(&Token::RParen)?;
            options
        } else {
            vec![]
        };

        let mut table_options = vec![];
        while self.option_name_len().is_some() {
            table_options.push(self.parse_sql_option()?);
            if self.peek_token() == &Token::Comma && self.option_name_len_at(1).is_some() {
                self.index += 1;
            }
        }

        let order_by = if self.next_if_keywords(&["ORDER", "BY"]) {
            match self.parse_expr()? {
                Expr::Tuple(exprs) => Some(exprs),
                Expr::Nested(expr) => Some(vec![*expr]),
                expr => Some(vec![expr]),
            }
        } else {
            None
        };
        let query = if self.next_if_keyword("AS") {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };

        Ok(Statement::CreateTable(CreateTable {
            or_replace,
            temporary,
            if_not_exists,
            name,
            columns,
            constraints,
            like,
            with_options,
            table_options,
            order_by,
            query,
        }))
    }

    /// Called after the opening `(` of a table definition.
    fn parse_table_elements(&mut self) -> PResult<(Vec<ColumnDef>, Vec<TableConstraint>)> {
        let mut columns = vec![];
        let mut constraints = vec![];
        if self.next_if_token(&Token::RParen) {
            return Ok((columns, constraints));
        }
        loop {
            match self.parse_optional_table_constraint()? {
                Some(constraint) => constraints.push(constraint),
                None => columns.push(self.parse_column_def()?),
            }
            if !self.next_if_token(&Token::Comma) {
                self.expect_token(&Token::RParen)?;
                return Ok((columns, constraints));
            }
        }
    }

    /// How many words precede an `=` at the current position, for options
    /// such as `ENGINE = InnoDB` or `DEFAULT CHARSET = utf8mb4`.
    fn option_name_len(&self) -> Option<usize> {
        self.option_name_len_at(0)
    }

    fn option_name_len_at(&self, offset: usize) -> Option<usize> {
        (1..=3).find(|&len| {
            self.peek_nth(offset + len).token == Token::Eq
                && (0..len).all(|n| {
                    self.peek_nth(offset + n)
                        .token
                        .word()
                        .map_or(false, |w| w.quote_style.is_none())
                })
        })
    }

    fn parse_sql_option(&mut self) -> PResult<SqlOption> {
        let len = match self.option_name_len() {
            Some(len) => len,
            None => return self.expected("option name"),
        };
        let mut name = Vec::with_capacity(len);
        for _ in 0..len {
            name.push(self.parse_identifier()?);
        }
        self.expect_token(&Token::Eq)?;
        Ok(SqlOption {
            name,
            value: self.parse_expr()?,
        })
    }

    fn parse_optional_table_constraint(&mut self) -> PResult<Option<TableConstraint>> {
        let mut name = if self.next_if_keyword("CONSTRAINT") {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        if self.next_if_keywords(&["PRIMARY", "KEY"]) {
            return Ok(Some(TableConstraint::Unique {
                name,
                columns: self.parse_parenthesized_idents()?,
                is_primary: true,
            }));
        }
        if self.next_if_keyword("UNIQUE") {
            self.next_if_one_of(&["KEY", "INDEX"]);
            if name.is_none() && self.peek_token() != &Token::LParen {
                name = Some(self.parse_identifier()?);
            }
            return Ok(Some(TableConstraint::Unique {
                name,
                columns: self.parse_parenthesized_idents()?,
                is_primary: false,
            }));
        }
        if self.next_if_keywords(&["FOREIGN", "KEY"]) {
            let columns = self.parse_parenthesized_idents()?;
            self.expect_keyword("REFERENCES")?;
            let foreign_table = self.parse_object_name()?;
            let referred_columns = if self.peek_token() == &Token::LParen {
                self.parse_parenthesized_idents()?
            } else {
                vec![]
            };
            let (on_delete, on_update) = self.parse_referential_actions()?;
            return Ok(Some(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            }));
        }
        if self.peek_keyword("CHECK") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Some(TableConstraint::Check {
                name,
                expr: Box::new(expr),
            }));
        }
        if name.is_none() && (self.peek_keyword("INDEX") || self.peek_keyword("KEY")) {
            let named = self.peek_nth(1).token.word().is_some()
                && self.peek_nth(2).token == Token::LParen;
            if named || self.peek_nth(1).token == Token::LParen {
                let display_as_key = self.next_if_keyword("KEY");
                if !display_as_key {
                    self.expect_keyword("INDEX")?;
                }
                let name = if named {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                return Ok(Some(TableConstraint::Index {
                    display_as_key,
                    name,
                    columns: self.parse_parenthesized_idents()?,
                }));
            }
        }

        match name {
            Some(_) => self.expected("PRIMARY, UNIQUE, FOREIGN, or CHECK"),
            None => Ok(None),
        }
    }

    /// `ON DELETE` and `ON UPDATE` in either order. `ON UPDATE` followed by
    /// anything but an action is left for the next column option.
    fn parse_referential_actions(
        &mut self,
    ) -> PResult<(Option<ReferentialAction>, Option<ReferentialAction>)> {
        let mut on_delete = None;
        let mut on_update = None;
        loop {
            let follows_action = REFERENTIAL_ACTION_KEYWORDS
                .iter()
                .any(|kw| self.peek_nth_keyword(2, kw));
            if !follows_action {
                break;
            }
            if on_delete.is_none() && self.next_if_keywords(&["ON", "DELETE"]) {
                on_delete = Some(self.parse_referential_action()?);
            } else if on_update.is_none() && self.next_if_keywords(&["ON", "UPDATE"]) {
                on_update = Some(self.parse_referential_action()?);
            } else {
                break;
            }
        }
        Ok((on_delete, on_update))
    }

    fn parse_referential_action(&mut self) -> PResult<ReferentialAction> {
        if self.next_if_keyword("RESTRICT") {
            Ok(ReferentialAction::Restrict)
        } else if self.next_if_keyword("CASCADE") {
            Ok(ReferentialAction::Cascade)
        } else if self.next_if_keywords(&["SET", "NULL"]) {
            Ok(ReferentialAction::SetNull)
        } else if self.next_if_keywords(&["NO", "ACTION"]) {
            Ok(ReferentialAction::NoAction)
        } else if self.next_if_keywords(&["SET", "DEFAULT"]) {
            Ok(ReferentialAction::SetDefault)
        } else {
            self.expected("one of RESTRICT, CASCADE, SET NULL, NO ACTION or SET DEFAULT")
        }
    }

    fn parse_column_def(&mut self) -> PResult<ColumnDef> {
        let name = self.parse_identifier()?;
        let untyped = matches!(
            self.peek_token(),
            Token::Comma | Token::RParen | Token::SemiColon | Token::EOF
        ) || COLUMN_OPTION_KEYWORDS.iter().any(|kw| self.peek_keyword(kw));
        let data_type = if untyped {
            DataType::Unspecified
        } else {
            self.parse_data_type()?
        };

        let mut collation = None;
        let mut options = vec![];
        loop {
            if self.next_if_keyword("COLLATE") {
                collation = Some(self.parse_object_name()?);
                continue;
            }
            let constraint_name = if self.next_if_keyword("CONSTRAINT") {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            match self.parse_optional_column_option()? {
                Some(option) => options.push(ColumnOptionDef {
                    name: constraint_name,
                    option,
                }),
                None if constraint_name.is_some() => {
                    return self.expected("constraint details after CONSTRAINT <name>")
                }
                None => break,
            }
        }
        Ok(ColumnDef {
            name,
            data_type,
            collation,
            options,
        })
    }

    fn parse_optional_column_option(&mut self) -> PResult<Option<ColumnOption>> {
        let option = if self.next_if_keywords(&["NOT", "NULL"]) {
            ColumnOption::NotNull
        } else if self.next_if_keyword("NULL") {
            ColumnOption::Null
        } else if self.next_if_keyword("DEFAULT") {
            ColumnOption::Default(self.parse_expr()?)
        } else if self.next_if_keywords(&["PRIMARY", "KEY"]) {
            ColumnOption::Unique { is_primary: true }
        } else if self.next_if_keyword("UNIQUE") {
            self.next_if_keyword("KEY");
            ColumnOption::Unique { is_primary: false }
        } else if self.next_if_keyword("REFERENCES") {
            let foreign_table = self.parse_object_name()?;
            let referred_columns = if self.peek_token() == &Token::LParen {
                self.parse_parenthesized_idents()?
            } else {
                vec![]
            };
            let (on_delete, on_update) = self.parse_referential_actions()?;
            ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            }
        } else if self.peek_keyword("CHECK") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            ColumnOption::Check(expr)
        } else if self.next_if_keyword("COMMENT") {
            ColumnOption::Comment(self.parse_literal_string()?)
        } else if self.next_if_keywords(&["ON", "UPDATE"]) {
            ColumnOption::OnUpdate(self.parse_expr()?)
        } else if let Some(generated) = self.parse_optional_generated()? {
            generated
        } else if self.next_if_keywords(&["CHARACTER", "SET"]) || self.next_if_keyword("CHARSET") {
            ColumnOption::CharacterSet(self.parse_object_name()?)
        } else {
            return self.parse_opaque_column_option();
        };
        Ok(Some(option))
    }

    /// `GENERATED ALWAYS AS (expr)` or MySQL's shorter `AS (expr)`, both
    /// optionally `STORED` or `VIRTUAL`.
    fn parse_optional_generated(&mut self) -> PResult<Option<ColumnOption>> {
        if !self.next_if_keywords(&["GENERATED", "ALWAYS", "AS"]) {
            if !(self.peek_keyword("AS") && self.peek_nth(1).token == Token::LParen) {
                return Ok(None);
            }
            self.index += 1;
        }
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_token(&Token::RParen)?;
        let stored = match self.next_if_one_of(&["STORED", "VIRTUAL"]) {
            Some("STORED") => Some(true),
            Some(_) => Some(false),
            None => None,
        };
        Ok(Some(ColumnOption::Generated { expr, stored }))
    }

    /// Any other bare word, such as `AUTO_INCREMENT` or `IDENTITY(1, 1)`,
    /// with an optional argument list or `= value`.
    fn parse_opaque_column_option(&mut self) -> PResult<Option<ColumnOption>> {
        let bare_word = matches!(self.peek_token(), Token::Word(w) if w.quote_style.is_none());
        if !bare_word {
            return Ok(None);
        }
        let start = self.index;
        self.index += 1;
        if self.peek_token() == &Token::LParen {
            self.skip_parenthesized()?;
        } else if self.next_if_token(&Token::Eq) {
            self.next();
        }
        Ok(Some(ColumnOption::Opaque(self.opaque_payload(start))))
    }

    /// Consumes a balanced `(...)` group.
    fn skip_parenthesized(&mut self) -> PResult<()> {
        self.expect_token(&Token::LParen)?;
        let mut depth = 1;
        while depth > 0 {
            match self.peek_token() {
                Token::LParen => depth += 1,
                Token::RParen => depth -= 1,
                Token::EOF => return self.expected(")"),
                _ => {}
            }
            self.index += 1;
        }
        Ok(())
    }

    /// Called after `INDEX`.
    fn parse_create_index(&mut self, unique: bool) -> PResult<Statement> {
        let concurrently = self.next_if_keyword("CONCURRENTLY");
        let if_not_exists = self.if_not_exists();
        let name = if self.peek_keyword("ON") {
            None
        } else {
            Some(self.parse_object_name()?)
        };
        self.expect_keyword("ON")?;
        let table_name = self.parse_object_name()?;
        let using = if self.next_if_keyword("USING") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        self.expect_token(&Token::RParen)?;
        let predicate = if self.next_if_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::CreateIndex(CreateIndex {
            name,
            table_name,
            using,
            columns,
            unique,
            concurrently,
            if_not_exists,
            predicate,
        }))
    }

    pub(super) fn parse_alter(&mut self) -> PResult<Statement> {
        if !self.peek_nth_keyword(1, "TABLE") {
            return self.parse_opaque_statement();
        }
        self.index += 2;
        let if_exists = self.if_exists();
        let only = self.next_if_keyword("ONLY");
        let name = self.parse_object_name()?;
        let operations = self.parse_comma_separated(Parser::parse_alter_table_operation)?;
        Ok(Statement::AlterTable {
            name,
            if_exists,
            only,
            operations,
        })
    }

    /// One action of an `ALTER TABLE`. Actions the grammar cannot read are
    /// kept as text up to the next top-level comma.
    fn parse_alter_table_operation(&mut self) -> PResult<AlterTableOperation> {
        let start = self.index;
        if let Ok(Some(operation)) = self.parse_modelled_alter_operation() {
            if matches!(
                self.peek_token(),
                Token::Comma | Token::SemiColon | Token::EOF
            ) {
                return Ok(operation);
            }
        }
        self.index = start;
        while !matches!(
            self.peek_token(),
            Token::Comma | Token::SemiColon | Token::EOF
        ) {
            if self.peek_token() == &Token::LParen {
                self.skip_parenthesized()?;
            } else {
                self.index += 1;
            }
        }
        if self.index == start {
            return self.expected("ALTER TABLE operation");
        }
        Ok(AlterTableOperation::Opaque(self.opaque_payload(start)))
    }

    fn parse_modelled_alter_operation(&mut self) -> PResult<Option<AlterTableOperation>> {
        if self.next_if_keyword("ADD") {
            if let Some(constraint) = self.parse_optional_table_constraint()? {
                return Ok(Some(AlterTableOperation::AddConstraint(constraint)));
            }
            let column_keyword = self.next_if_keyword("COLUMN");
            let if_not_exists = self.if_not_exists();
            return Ok(Some(AlterTableOperation::AddColumn {
                column_keyword,
                if_not_exists,
                column_def: self.parse_column_def()?,
            }));
        }
        if self.next_if_keywords(&["DROP", "COLUMN"]) {
            let if_exists = self.if_exists();
            let column_name = self.parse_identifier()?;
            return Ok(Some(AlterTableOperation::DropColumn {
                column_name,
                if_exists,
                cascade: self.next_if_keyword("CASCADE"),
            }));
        }
        if self.next_if_keywords(&["DROP", "CONSTRAINT"]) {
            let if_exists = self.if_exists();
            let name = self.parse_identifier()?;
            return Ok(Some(AlterTableOperation::DropConstraint {
                if_exists,
                name,
                cascade: self.next_if_keyword("CASCADE"),
            }));
        }
        if self.next_if_keywords(&["RENAME", "COLUMN"]) {
            let old_column_name = self.parse_identifier()?;
            self.expect_keyword("TO")?;
            return Ok(Some(AlterTableOperation::RenameColumn {
                old_column_name,
                new_column_name: self.parse_identifier()?,
            }));
        }
        if self.next_if_keywords(&["RENAME", "TO"]) {
            return Ok(Some(AlterTableOperation::RenameTable {
                table_name: self.parse_object_name()?,
            }));
        }
        if self.next_if_keyword("ALTER") {
            self.next_if_keyword("COLUMN");
            let column_name = self.parse_identifier()?;
            let op = self.parse_alter_column_operation()?;
            return Ok(op.map(|op| AlterTableOperation::AlterColumn { column_name, op }));
        }
        Ok(None)
    }

    fn parse_alter_column_operation(&mut self) -> PResult<Option<AlterColumnOperation>> {
        let op = if self.next_if_keywords(&["SET", "NOT", "NULL"]) {
            AlterColumnOperation::SetNotNull
        } else if self.next_if_keywords(&["DROP", "NOT", "NULL"]) {
            AlterColumnOperation::DropNotNull
        } else if self.next_if_keywords(&["SET", "DEFAULT"]) {
            AlterColumnOperation::SetDefault {
                value: self.parse_expr()?,
            }
        } else if self.next_if_keywords(&["DROP", "DEFAULT"]) {
            AlterColumnOperation::DropDefault
        } else if self.next_if_keywords(&["SET", "DATA", "TYPE"]) || self.next_if_keyword("TYPE") {
            let data_type = self.parse_data_type()?;
            let using = if self.next_if_keyword("USING") {
                Some(self.parse_expr()?)
            } else {
                None
            };
            AlterColumnOperation::SetDataType { data_type, using }
        } else {
            return Ok(None);
        };
        Ok(Some(op))
    }

    pub(super) fn parse_drop(&mut self) -> PResult<Statement> {
        let start = self.index;
        self.expect_keyword("DROP")?;
        let temporary = self.next_if_keyword("TEMPORARY");
        let object_type = match self.next_if_one_of(&[
            "TABLE",
            "VIEW",
            "MATERIALIZED",
            "INDEX",
            "SCHEMA",
            "DATABASE",
            "SEQUENCE",
            "ROLE",
            "TYPE",
        ]) {
            Some("TABLE") => ObjectType::Table,
            Some("VIEW") => ObjectType::View,
            Some("MATERIALIZED") if self.next_if_keyword("VIEW") => ObjectType::MaterializedView,
            Some("INDEX") => ObjectType::Index,
            Some("SCHEMA") => ObjectType::Schema,
            Some("DATABASE") => ObjectType::Database,
            Some("SEQUENCE") => ObjectType::Sequence,
            Some("ROLE") => ObjectType::Role,
            Some("TYPE") => ObjectType::Type,
            _ => {
                self.index = start;
                return self.parse_opaque_statement();
            }
        };
        let if_exists = self.if_exists();
        let names = self.parse_comma_separated(Parser::parse_object_name)?;
        let cascade = self.next_if_keyword("CASCADE");
        let restrict = !cascade && self.next_if_keyword("RESTRICT");
        Ok(Statement::Drop {
            object_type,
            if_exists,
            names,
            cascade,
            restrict,
            temporary,
        })
    }

    pub(super) fn parse_truncate(&mut self) -> PResult<Statement> {
        self.expect_keyword("TRUNCATE")?;
        let table = self.next_if_keyword("TABLE");
        let table_names = self.parse_comma_separated(Parser::parse_object_name)?;
        Ok(Statement::Truncate {
            table_names,
            table,
            cascade: self.next_if_keyword("CASCADE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AlterTableOperation, ColumnOption, DataType, ObjectType, Statement, TableConstraint,
    };
    use crate::dialect::Dialect;
    use crate::parser::parse_sql;

    fn parse_one(dialect: Dialect, sql: &str) -> Statement {
        let mut statements = match parse_sql(dialect, sql, 50) {
            Ok(statements) => statements,
            Err(err) => panic!("parsing {:?} failed: {}", sql, err),
        };
        assert_eq!(1, statements.len());
        statements.remove(0)
    }

    macro_rules! test_round_trip {
        ($($name:ident: ($dialect:expr, $value:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!($value, parse_one($dialect, $value).to_string());
                }
            )*
        }
    }

    test_round_trip! {
        create_table: (Dialect::Generic, "CREATE TABLE IF NOT EXISTS users (id INT PRIMARY KEY, name VARCHAR(64) NOT NULL DEFAULT 'anon', CONSTRAINT uq UNIQUE (name))"),
        mysql_table: (Dialect::MySql, "CREATE TABLE t (id INT NOT NULL AUTO_INCREMENT, a INT, PRIMARY KEY (id), KEY idx_a (a)) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4"),
        foreign_keys: (Dialect::Generic, "CREATE TABLE orders (id INT, user_id INT REFERENCES users (id) ON DELETE CASCADE, FOREIGN KEY (user_id) REFERENCES users (id) ON UPDATE SET NULL)"),
        checks: (Dialect::Generic, "CREATE TABLE t (a INT CHECK (a > 0), CONSTRAINT pos CHECK (a < 10))"),
        generated_column: (Dialect::MySql, "CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a * 2) STORED)"),
        column_text_options: (Dialect::MySql, "CREATE TABLE t (s TEXT COLLATE utf8mb4_bin CHARACTER SET utf8mb4 COMMENT 'x')"),
        on_update: (Dialect::MySql, "CREATE TABLE t (ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP)"),
        clickhouse_engine: (Dialect::ClickHouse, "CREATE TABLE t (a Int32, b STRING) ENGINE = MergeTree() ORDER BY (a, b)"),
        untyped_columns: (Dialect::SQLite, "CREATE TABLE t (a, b PRIMARY KEY)"),
        create_like: (Dialect::MySql, "CREATE TABLE t2 LIKE t1"),
        create_as: (Dialect::Generic, "CREATE TABLE t AS SELECT * FROM s"),
        with_options: (Dialect::PostgreSql, "CREATE TABLE t (a INT) WITH (fillfactor = 70)"),
        temporary_table: (Dialect::Snowflake, "CREATE OR REPLACE TEMPORARY TABLE t (a INT)"),
        empty_table: (Dialect::Generic, "CREATE TABLE t ()"),
        create_view: (Dialect::Generic, "CREATE OR REPLACE VIEW v (a) AS SELECT 1"),
        materialized_view: (Dialect::PostgreSql, "CREATE MATERIALIZED VIEW IF NOT EXISTS mv AS SELECT a FROM t"),
        create_index: (Dialect::PostgreSql, "CREATE UNIQUE INDEX CONCURRENTLY IF NOT EXISTS idx ON t USING btree (a DESC, b) WHERE a > 0"),
        unnamed_index: (Dialect::PostgreSql, "CREATE INDEX ON t (a)"),
        create_schema: (Dialect::Generic, "CREATE SCHEMA IF NOT EXISTS s"),
        create_database: (Dialect::Generic, "CREATE DATABASE db"),
        alter_add_drop: (Dialect::PostgreSql, "ALTER TABLE IF EXISTS ONLY t ADD COLUMN IF NOT EXISTS c INT, DROP COLUMN d CASCADE"),
        alter_rename_column: (Dialect::Generic, "ALTER TABLE t RENAME COLUMN a TO b"),
        alter_rename_table: (Dialect::Generic, "ALTER TABLE t RENAME TO u"),
        alter_columns: (Dialect::PostgreSql, "ALTER TABLE t ALTER COLUMN a SET NOT NULL, ALTER COLUMN b DROP DEFAULT, ALTER COLUMN c SET DATA TYPE TEXT USING c::TEXT"),
        alter_add_constraint: (Dialect::Generic, "ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a) REFERENCES u (id)"),
        alter_drop_constraint: (Dialect::Generic, "ALTER TABLE t DROP CONSTRAINT IF EXISTS c"),
        alter_opaque_action: (Dialect::MySql, "ALTER TABLE t MODIFY COLUMN a BIGINT, ADD COLUMN b INT"),
        drop_tables: (Dialect::Generic, "DROP TABLE IF EXISTS a, b CASCADE"),
        drop_materialized_view: (Dialect::PostgreSql, "DROP MATERIALIZED VIEW mv"),
        drop_temporary: (Dialect::MySql, "DROP TEMPORARY TABLE t"),
        drop_index: (Dialect::Generic, "DROP INDEX idx"),
        truncate_many: (Dialect::PostgreSql, "TRUNCATE TABLE a, b CASCADE"),
        truncate: (Dialect::Generic, "TRUNCATE t"),
    }

    #[test]
    fn untyped_column_is_unspecified() {
        match parse_one(Dialect::SQLite, "CREATE TABLE t (a, b INTEGER)") {
            Statement::CreateTable(create) => {
                assert_eq!(DataType::Unspecified, create.columns[0].data_type);
                assert_eq!(DataType::Integer(None), create.columns[1].data_type);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_column_options_are_opaque() {
        match parse_one(Dialect::MsSql, "CREATE TABLE t (id INT IDENTITY(1, 1) NOT NULL)") {
            Statement::CreateTable(create) => {
                let options = &create.columns[0].options;
                assert_eq!(2, options.len());
                match &options[0].option {
                    ColumnOption::Opaque(payload) => {
                        assert_eq!("IDENTITY", payload.kind);
                        assert_eq!("IDENTITY(1, 1)", payload.text);
                    }
                    other => panic!("unexpected {:?}", other),
                }
                assert_eq!(ColumnOption::NotNull, options[1].option);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn table_constraints_are_separate_from_columns() {
        match parse_one(Dialect::MySql, "CREATE TABLE t (a INT, UNIQUE KEY uq_a (a))") {
            Statement::CreateTable(create) => {
                assert_eq!(1, create.columns.len());
                match &create.constraints[0] {
                    TableConstraint::Unique {
                        name, is_primary, ..
                    } => {
                        assert_eq!("uq_a", name.as_ref().unwrap().value);
                        assert!(!is_primary);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn short_forms_normalise() {
        let cases = [
            (
                Dialect::PostgreSql,
                "ALTER TABLE t ALTER COLUMN a TYPE INT",
                "ALTER TABLE t ALTER COLUMN a SET DATA TYPE INT",
            ),
            (
                Dialect::MySql,
                "CREATE TABLE t (a INT, b INT AS (a + 1) VIRTUAL)",
                "CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a + 1) VIRTUAL)",
            ),
            (
                Dialect::PostgreSql,
                "CREATE TEMP TABLE t (a INT)",
                "CREATE TEMPORARY TABLE t (a INT)",
            ),
        ];
        for (dialect, sql, expected) in cases.iter() {
            assert_eq!(*expected, parse_one(*dialect, sql).to_string());
        }
    }

    #[test]
    fn unmodelled_schema_statements_are_opaque() {
        for sql in [
            "DROP FUNCTION f(int)",
            "CREATE TEMPORARY VIEW v AS SELECT 1",
            "ALTER USER bob WITH PASSWORD 'x'",
        ]
        .iter()
        {
            match parse_one(Dialect::PostgreSql, sql) {
                Statement::Opaque(payload) => assert_eq!(*sql, payload.text),
                other => panic!("{} parsed as {:?}", sql, other),
            }
        }
    }

    #[test]
    fn opaque_alter_action_keeps_its_text() {
        match parse_one(Dialect::MySql, "ALTER TABLE t ENGINE = InnoDB, DROP COLUMN a") {
            Statement::AlterTable { operations, .. } => {
                assert_eq!(2, operations.len());
                match &operations[0] {
                    AlterTableOperation::Opaque(payload) => {
                        assert_eq!("ENGINE", payload.kind);
                        assert_eq!("ENGINE = InnoDB", payload.text);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn drop_names_relations() {
        match parse_one(Dialect::Generic, "DROP VIEW IF EXISTS v RESTRICT") {
            Statement::Drop {
                object_type,
                if_exists,
                restrict,
                ..
            } => {
                assert_eq!(ObjectType::View, object_type);
                assert!(object_type.names_relations());
                assert!(if_exists);
                assert!(restrict);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_column_option_is_an_error() {
        let err = parse_sql(Dialect::Generic, "CREATE TABLE t (a INT CONSTRAINT c)", 50).unwrap_err();
        assert_eq!(
            "Expected: constraint details after CONSTRAINT <name>, found: )",
            err.message
        );
    }
}
