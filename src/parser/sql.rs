//! Queries, data modification, transaction control and session statements.

use super::token::Token;
use super::{PResult, Parser};
use crate::ast::{
    AnalyzeFormat, Assignment, AssignmentTarget, ConflictTarget, Cte, CteAsMaterialized, Delete,
    DescribeAlias, Distinct, ExprWithAlias, Fetch, FromTable, FunctionArg, GroupByExpr,
    GroupByWithModifier, Ident, Insert, Join, JoinConstraint, JoinOperator, LimitClause,
    LockClause, LockType, NamedWindowDefinition, NamedWindowExpr, NonBlock, ObjectName, Offset,
    OffsetRows, OnConflict, OnConflictAction, OnInsert, OneOrManyWithParens, OrderBy, OrderByKind,
    Query, ReplaceSelectElement, Select, SelectInto, SelectItem, SetExpr, SetOperator, SetQuantifier,
    SqliteOnConflict, Statement, TableAlias, TableFactor, TableVersion, TableWithJoins, Top,
    TopQuantity, TransactionAccessMode, TransactionIsolationLevel, TransactionMode,
    UpdateTableFromKind, Values, WildcardAdditionalOptions, With,
};

/// Words that begin a statement `EXPLAIN` can wrap.
const EXPLAINABLE: &[&str] = &[
    "SELECT", "WITH", "VALUES", "TABLE", "INSERT", "REPLACE", "UPDATE", "DELETE", "CREATE",
    "ALTER", "DROP", "TRUNCATE",
];

impl Parser {
    pub(super) fn parse_statement(&mut self) -> PResult<Statement> {
        let (keyword, opaque) = match self.peek_token() {
            Token::LParen => return Ok(Statement::Query(Box::new(self.parse_query()?))),
            Token::Word(w) if w.quote_style.is_none() => {
                (w.value.to_ascii_uppercase(), w.starts_opaque_statement())
            }
            _ => return self.expected("an SQL statement"),
        };
        match keyword.as_str() {
            "SELECT" | "WITH" | "VALUES" | "TABLE" => {
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            "INSERT" | "REPLACE" => self.parse_insert(),
            "UPDATE" => self.parse_update(),
            "DELETE" => self.parse_delete(),
            "CREATE" => self.parse_create(),
            "ALTER" => self.parse_alter(),
            "DROP" => self.parse_drop(),
            "TRUNCATE" => self.parse_truncate(),
            "BEGIN" | "START" => self.parse_start_transaction(),
            "COMMIT" | "END" => {
                self.index += 1;
                self.next_if_one_of(&["TRANSACTION", "WORK"]);
                Ok(Statement::Commit {
                    chain: self.parse_commit_chain()?,
                })
            }
            "ROLLBACK" => self.parse_rollback(),
            "SAVEPOINT" => {
                self.index += 1;
                Ok(Statement::Savepoint {
                    name: self.parse_identifier()?,
                })
            }
            "RELEASE" => {
                self.index += 1;
                self.next_if_keyword("SAVEPOINT");
                Ok(Statement::ReleaseSavepoint {
                    name: self.parse_identifier()?,
                })
            }
            "EXPLAIN" | "DESCRIBE" | "DESC" => self.parse_explain(),
            "USE" => {
                self.index += 1;
                Ok(Statement::Use {
                    db_name: self.parse_object_name()?,
                })
            }
            "SET" => self.parse_set(),
            _ if opaque => self.parse_opaque_statement(),
            _ => self.expected("an SQL statement"),
        }
    }

    /// A full query: optional `WITH`, a body of set operations, then
    /// ordering, row limiting and locking clauses.
    pub(super) fn parse_query(&mut self) -> PResult<Query> {
        self.descend(|p| {
            let with = if p.next_if_keyword("WITH") {
                let recursive = p.next_if_keyword("RECURSIVE");
                Some(With {
                    recursive,
                    cte_tables: p.parse_comma_separated(Parser::parse_cte)?,
                })
            } else {
                None
            };

            let modification = if p.peek_keyword("INSERT") {
                Some(SetExpr::Insert(p.parse_insert()?))
            } else if p.peek_keyword("UPDATE") {
                Some(SetExpr::Update(p.parse_update()?))
            } else if p.peek_keyword("DELETE") {
                Some(SetExpr::Delete(p.parse_delete()?))
            } else {
                None
            };
            if let Some(body) = modification {
                let mut query = Query::from_body(body);
                query.with = with;
                return Ok(query);
            }

            let body = p.parse_query_body(0)?;
            let order_by = p.parse_order_by()?;
            let limit_clause = p.parse_limit_clause()?;
            let fetch = p.parse_fetch()?;
            let mut locks = vec![];
            while p.peek_keyword("FOR")
                && (p.peek_nth_keyword(1, "UPDATE") || p.peek_nth_keyword(1, "SHARE"))
            {
                locks.push(p.parse_lock()?);
            }
            Ok(Query {
                with,
                body: Box::new(body),
                order_by,
                limit_clause,
                fetch,
                locks,
            })
        })
    }

    fn parse_cte(&mut self) -> PResult<Cte> {
        let name = self.parse_identifier()?;
        let columns = if self.peek_token() == &Token::LParen {
            self.parse_parenthesized_idents()?
        } else {
            vec![]
        };
        self.expect_keyword("AS")?;
        let materialized = if self.next_if_keyword("MATERIALIZED") {
            Some(CteAsMaterialized::Materialized)
        } else if self.next_if_keywords(&["NOT", "MATERIALIZED"]) {
            Some(CteAsMaterialized::NotMaterialized)
        } else {
            None
        };
        self.expect_token(&Token::LParen)?;
        let query = self.parse_query()?;
        self.expect_token(&Token::RParen)?;
        Ok(Cte {
            alias: TableAlias { name, columns },
            query: Box::new(query),
            materialized,
        })
    }

    /// Set operations bind left to right; `INTERSECT` binds tighter than
    /// `UNION`, `EXCEPT` and `MINUS`.
    fn parse_query_body(&mut self, precedence: u8) -> PResult<SetExpr> {
        let mut expr = if self.peek_keyword("SELECT") {
            SetExpr::Select(Box::new(self.parse_select()?))
        } else if self.next_if_token(&Token::LParen) {
            let subquery = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            SetExpr::Query(Box::new(subquery))
        } else if self.next_if_keyword("VALUES") {
            SetExpr::Values(self.parse_values()?)
        } else if self.next_if_keyword("TABLE") {
            SetExpr::Table(self.parse_object_name()?)
        } else {
            return self.expected("SELECT, VALUES, or a subquery in the query body");
        };

        loop {
            let op = match self.peek_token() {
                Token::Word(w) if w.is_keyword("UNION") => SetOperator::Union,
                Token::Word(w) if w.is_keyword("EXCEPT") => SetOperator::Except,
                Token::Word(w) if w.is_keyword("MINUS") => SetOperator::Minus,
                Token::Word(w) if w.is_keyword("INTERSECT") => SetOperator::Intersect,
                _ => break,
            };
            let next_precedence = if op == SetOperator::Intersect { 20 } else { 10 };
            if precedence >= next_precedence {
                break;
            }
            self.index += 1;
            let set_quantifier = self.parse_set_quantifier();
            let right = self.parse_query_body(next_precedence)?;
            expr = SetExpr::SetOperation {
                op,
                set_quantifier,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_set_quantifier(&mut self) -> SetQuantifier {
        if self.next_if_keywords(&["ALL", "BY", "NAME"]) {
            SetQuantifier::AllByName
        } else if self.next_if_keywords(&["DISTINCT", "BY", "NAME"]) {
            SetQuantifier::DistinctByName
        } else if self.next_if_keywords(&["BY", "NAME"]) {
            SetQuantifier::ByName
        } else if self.next_if_keyword("ALL") {
            SetQuantifier::All
        } else if self.next_if_keyword("DISTINCT") {
            SetQuantifier::Distinct
        } else {
            SetQuantifier::None
        }
    }

    /// Called after `VALUES`.
    fn parse_values(&mut self) -> PResult<Values> {
        let mut explicit_row = false;
        let rows = self.parse_comma_separated(|p| {
            if p.next_if_keyword("ROW") {
                explicit_row = true;
            }
            p.expect_token(&Token::LParen)?;
            if p.next_if_token(&Token::RParen) {
                return Ok(vec![]);
            }
            let row = p.parse_comma_separated(Parser::parse_expr)?;
            p.expect_token(&Token::RParen)?;
            Ok(row)
        })?;
        Ok(Values { explicit_row, rows })
    }

    fn parse_select(&mut self) -> PResult<Select> {
        self.expect_keyword("SELECT")?;
        let mut top = self.parse_optional_top()?;
        let distinct = self.parse_distinct()?;
        if top.is_none() {
            top = self.parse_optional_top()?;
        }
        let projection = self.parse_comma_separated(Parser::parse_select_item)?;

        let into = if self.next_if_keyword("INTO") {
            let temporary = self.next_if_one_of(&["TEMPORARY", "TEMP"]).is_some();
            let unlogged = self.next_if_keyword("UNLOGGED");
            let table = self.next_if_keyword("TABLE");
            Some(SelectInto {
                temporary,
                unlogged,
                table,
                name: self.parse_object_name()?,
            })
        } else {
            None
        };

        let from = if self.next_if_keyword("FROM") {
            self.parse_comma_separated(Parser::parse_table_and_joins)?
        } else {
            vec![]
        };
        let selection = if self.next_if_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let group_by = if self.next_if_keywords(&["GROUP", "BY"]) {
            if self.next_if_keyword("ALL") {
                GroupByExpr::All(self.parse_group_by_modifiers())
            } else {
                let exprs = self.parse_comma_separated(Parser::parse_group_by_expr)?;
                GroupByExpr::Expressions(exprs, self.parse_group_by_modifiers())
            }
        } else {
            GroupByExpr::none()
        };
        let having = if self.next_if_keyword("HAVING") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let named_window = if self.next_if_keyword("WINDOW") {
            self.parse_comma_separated(Parser::parse_named_window)?
        } else {
            vec![]
        };
        let qualify = if self.dialect.supports_qualify() && self.next_if_keyword("QUALIFY") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Select {
            distinct,
            top,
            projection,
            into,
            from,
            selection,
            group_by,
            having,
            named_window,
            qualify,
        })
    }

    fn parse_distinct(&mut self) -> PResult<Option<Distinct>> {
        if self.next_if_keyword("ALL") || !self.next_if_keyword("DISTINCT") {
            return Ok(None);
        }
        if self.peek_keyword("ON") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let exprs = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            return Ok(Some(Distinct::On(exprs)));
        }
        Ok(Some(Distinct::Distinct))
    }

    fn parse_optional_top(&mut self) -> PResult<Option<Top>> {
        if !self.dialect.supports_top() || !self.next_if_keyword("TOP") {
            return Ok(None);
        }
        let quantity = if self.next_if_token(&Token::LParen) {
            let quantity = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            Some(TopQuantity::Expr(quantity))
        } else if matches!(self.peek_token(), Token::Number(_)) {
            Some(TopQuantity::Constant(self.parse_literal_uint()?))
        } else {
            None
        };
        let percent = self.next_if_keyword("PERCENT");
        let with_ties = self.next_if_keywords(&["WITH", "TIES"]);
        Ok(Some(Top {
            with_ties,
            percent,
            quantity,
        }))
    }

    fn parse_group_by_modifiers(&mut self) -> Vec<GroupByWithModifier> {
        let mut modifiers = vec![];
        loop {
            if self.next_if_keywords(&["WITH", "ROLLUP"]) {
                modifiers.push(GroupByWithModifier::Rollup);
            } else if self.next_if_keywords(&["WITH", "CUBE"]) {
                modifiers.push(GroupByWithModifier::Cube);
            } else if self.next_if_keywords(&["WITH", "TOTALS"]) {
                modifiers.push(GroupByWithModifier::Totals);
            } else {
                return modifiers;
            }
        }
    }

    fn parse_named_window(&mut self) -> PResult<NamedWindowDefinition> {
        let name = self.parse_identifier()?;
        self.expect_keyword("AS")?;
        let window = if self.next_if_token(&Token::LParen) {
            NamedWindowExpr::WindowSpec(self.parse_window_spec()?)
        } else {
            NamedWindowExpr::NamedWindow(self.parse_identifier()?)
        };
        Ok(NamedWindowDefinition(name, window))
    }

    fn parse_select_item(&mut self) -> PResult<SelectItem> {
        if self.next_if_token(&Token::Mul) {
            return Ok(SelectItem::Wildcard(self.parse_wildcard_options()?));
        }
        if let Some(prefix) = self.parse_qualified_wildcard()? {
            let options = self.parse_wildcard_options()?;
            return Ok(SelectItem::QualifiedWildcard(prefix, options));
        }
        let expr = self.parse_expr()?;
        match self.parse_optional_alias()? {
            Some(alias) => Ok(SelectItem::ExprWithAlias { expr, alias }),
            None => Ok(SelectItem::UnnamedExpr(expr)),
        }
    }

    fn parse_wildcard_options(&mut self) -> PResult<WildcardAdditionalOptions> {
        let mut options = WildcardAdditionalOptions::default();
        if self.next_if_keyword("EXCLUDE") {
            options.exclude = if self.peek_token() == &Token::LParen {
                self.parse_parenthesized_idents()?
            } else {
                vec![self.parse_identifier()?]
            };
        }
        if self.peek_keyword("EXCEPT")
            && self.peek_nth(1).token == Token::LParen
            && self.peek_nth(2).token.word().map_or(false, |w| {
                !w.is_keyword("SELECT") && !w.is_keyword("WITH")
            })
        {
            self.index += 1;
            options.except = self.parse_parenthesized_idents()?;
        }
        if self.peek_keyword("REPLACE") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            options.replace = self.parse_comma_separated(|p| {
                let expr = p.parse_expr()?;
                let as_keyword = p.next_if_keyword("AS");
                Ok(ReplaceSelectElement {
                    expr,
                    column_name: p.parse_identifier()?,
                    as_keyword,
                })
            })?;
            self.expect_token(&Token::RParen)?;
        }
        Ok(options)
    }

    /// `AS name`, or a bare word that cannot start the next clause.
    fn parse_optional_alias(&mut self) -> PResult<Option<Ident>> {
        if self.next_if_keyword("AS") {
            return self.parse_identifier().map(Some);
        }
        match self.peek_token() {
            Token::Word(w) if !w.is_reserved_for_alias() => self.parse_identifier().map(Some),
            _ => Ok(None),
        }
    }

    fn parse_optional_table_alias(&mut self) -> PResult<Option<TableAlias>> {
        let name = match self.parse_optional_alias()? {
            Some(name) => name,
            None => return Ok(None),
        };
        let columns = if self.peek_token() == &Token::LParen {
            self.parse_parenthesized_idents()?
        } else {
            vec![]
        };
        Ok(Some(TableAlias { name, columns }))
    }

    fn parse_expr_with_alias(&mut self) -> PResult<ExprWithAlias> {
        let expr = self.parse_expr()?;
        Ok(ExprWithAlias {
            expr,
            alias: self.parse_optional_alias()?,
        })
    }

    pub(super) fn parse_table_and_joins(&mut self) -> PResult<TableWithJoins> {
        let relation = self.parse_table_factor()?;
        let mut joins = vec![];
        loop {
            let join = if self.next_if_keywords(&["CROSS", "JOIN"]) {
                Join {
                    relation: self.parse_table_factor()?,
                    join_operator: JoinOperator::CrossJoin,
                }
            } else if self.next_if_keywords(&["CROSS", "APPLY"]) {
                Join {
                    relation: self.parse_table_factor()?,
                    join_operator: JoinOperator::CrossApply,
                }
            } else if self.next_if_keywords(&["OUTER", "APPLY"]) {
                Join {
                    relation: self.parse_table_factor()?,
                    join_operator: JoinOperator::OuterApply,
                }
            } else if self.next_if_keywords(&["ASOF", "JOIN"]) {
                let relation = self.parse_table_factor()?;
                self.expect_keyword("MATCH_CONDITION")?;
                self.expect_token(&Token::LParen)?;
                let match_condition = self.parse_expr()?;
                self.expect_token(&Token::RParen)?;
                Join {
                    relation,
                    join_operator: JoinOperator::AsOf {
                        match_condition,
                        constraint: self.parse_join_constraint()?,
                    },
                }
            } else {
                let natural = self.next_if_keyword("NATURAL");
                let operator = match self.parse_join_keywords() {
                    Some(operator) => operator,
                    None if natural => return self.expected("a join type after NATURAL"),
                    None => break,
                };
                let relation = self.parse_table_factor()?;
                let constraint = if natural {
                    JoinConstraint::Natural
                } else {
                    self.parse_join_constraint()?
                };
                Join {
                    relation,
                    join_operator: operator(constraint),
                }
            };
            joins.push(join);
        }
        Ok(TableWithJoins { relation, joins })
    }

    /// Consumes the keywords of a qualified join up to and including `JOIN`.
    fn parse_join_keywords(&mut self) -> Option<fn(JoinConstraint) -> JoinOperator> {
        let operator: fn(JoinConstraint) -> JoinOperator = if self.next_if_keyword("JOIN") {
            JoinOperator::Join
        } else if self.next_if_keywords(&["INNER", "JOIN"]) {
            JoinOperator::Inner
        } else if self.next_if_keywords(&["LEFT", "JOIN"]) {
            JoinOperator::Left
        } else if self.next_if_keywords(&["LEFT", "OUTER", "JOIN"]) {
            JoinOperator::LeftOuter
        } else if self.next_if_keywords(&["LEFT", "SEMI", "JOIN"]) {
            JoinOperator::LeftSemi
        } else if self.next_if_keywords(&["LEFT", "ANTI", "JOIN"]) {
            JoinOperator::LeftAnti
        } else if self.next_if_keywords(&["RIGHT", "JOIN"]) {
            JoinOperator::Right
        } else if self.next_if_keywords(&["RIGHT", "OUTER", "JOIN"]) {
            JoinOperator::RightOuter
        } else if self.next_if_keywords(&["RIGHT", "SEMI", "JOIN"]) {
            JoinOperator::RightSemi
        } else if self.next_if_keywords(&["RIGHT", "ANTI", "JOIN"]) {
            JoinOperator::RightAnti
        } else if self.next_if_keywords(&["FULL", "JOIN"])
            || self.next_if_keywords(&["FULL", "OUTER", "JOIN"])
        {
            JoinOperator::FullOuter
        } else {
            return None;
        };
        Some(operator)
    }

    fn parse_join_constraint(&mut self) -> PResult<JoinConstraint> {
        if self.next_if_keyword("ON") {
            Ok(JoinConstraint::On(self.parse_expr()?))
        } else if self.next_if_keyword("USING") {
            Ok(JoinConstraint::Using(self.parse_parenthesized_idents()?))
        } else {
            Ok(JoinConstraint::None)
        }
    }

    fn parse_table_factor(&mut self) -> PResult<TableFactor> {
        let factor = self.descend(Parser::parse_table_factor_inner)?;
        self.parse_pivots(factor)
    }

    fn parse_table_factor_inner(&mut self) -> PResult<TableFactor> {
        if self.next_if_keyword("LATERAL") {
            if self.next_if_token(&Token::LParen) {
                let subquery = self.parse_query()?;
                self.expect_token(&Token::RParen)?;
                return Ok(TableFactor::Derived {
                    lateral: true,
                    subquery: Box::new(subquery),
                    alias: self.parse_optional_table_alias()?,
                });
            }
            let name = self.parse_object_name()?;
            let args = self.parse_table_function_args()?;
            return Ok(TableFactor::Function {
                lateral: true,
                name,
                args,
                alias: self.parse_optional_table_alias()?,
            });
        }

        if self.next_if_token(&Token::LParen) {
            return self.parse_parenthesized_table_factor();
        }

        if self.peek_keyword("TABLE") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            return Ok(TableFactor::TableFunction {
                expr,
                alias: self.parse_optional_table_alias()?,
            });
        }

        if self.peek_keyword("UNNEST") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let array_exprs = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            let with_ordinality = self.next_if_keywords(&["WITH", "ORDINALITY"]);
            let alias = self.parse_optional_table_alias()?;
            let with_offset = self.next_if_keywords(&["WITH", "OFFSET"]);
            let with_offset_alias = if with_offset {
                self.parse_optional_alias()?
            } else {
                None
            };
            return Ok(TableFactor::UNNEST {
                alias,
                array_exprs,
                with_offset,
                with_offset_alias,
                with_ordinality,
            });
        }

        let name = self.parse_object_name()?;
        let args = if self.peek_token() == &Token::LParen {
            Some(self.parse_table_function_args()?)
        } else {
            None
        };
        let version = if self.next_if_keywords(&["FOR", "SYSTEM_TIME", "AS", "OF"]) {
            Some(TableVersion::ForSystemTimeAsOf(self.parse_expr()?))
        } else {
            None
        };
        let alias = self.parse_optional_table_alias()?;
        let with_hints = if self.peek_keyword("WITH") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            let hints = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            hints
        } else {
            vec![]
        };
        Ok(TableFactor::Table {
            name,
            alias,
            args,
            version,
            with_hints,
        })
    }

    /// Called after `(`: a derived table or a parenthesized join. A leading
    /// `(` may open either, so the query reading is tried first.
    fn parse_parenthesized_table_factor(&mut self) -> PResult<TableFactor> {
        if self.peek_subquery() || self.peek_token() == &Token::LParen {
            let checkpoint = self.index;
            let committed = self.peek_subquery();
            match self.parse_query() {
                Ok(subquery) if self.next_if_token(&Token::RParen) => {
                    return Ok(TableFactor::Derived {
                        lateral: false,
                        subquery: Box::new(subquery),
                        alias: self.parse_optional_table_alias()?,
                    });
                }
                Ok(_) if committed => return self.expected(")"),
                Err(err) if committed => return Err(err),
                _ => self.index = checkpoint,
            }
        }
        let table_with_joins = self.parse_table_and_joins()?;
        self.expect_token(&Token::RParen)?;
        Ok(TableFactor::NestedJoin {
            table_with_joins: Box::new(table_with_joins),
            alias: self.parse_optional_table_alias()?,
        })
    }

    fn parse_table_function_args(&mut self) -> PResult<Vec<FunctionArg>> {
        self.expect_token(&Token::LParen)?;
        if self.next_if_token(&Token::RParen) {
            return Ok(vec![]);
        }
        let args = self.parse_comma_separated(Parser::parse_function_arg)?;
        self.expect_token(&Token::RParen)?;
        Ok(args)
    }

    fn parse_pivots(&mut self, mut table: TableFactor) -> PResult<TableFactor> {
        loop {
            if self.peek_keyword("PIVOT") && self.peek_nth(1).token == Token::LParen {
                self.index += 2;
                let aggregate_functions =
                    self.parse_comma_separated(Parser::parse_expr_with_alias)?;
                self.expect_keyword("FOR")?;
                let value_column = if self.peek_token() == &Token::LParen {
                    self.parse_parenthesized_idents()?
                } else {
                    vec![self.parse_identifier()?]
                };
                self.expect_keyword("IN")?;
                self.expect_token(&Token::LParen)?;
                let value_source = self.parse_comma_separated(Parser::parse_expr_with_alias)?;
                self.expect_token(&Token::RParen)?;
                self.expect_token(&Token::RParen)?;
                table = TableFactor::Pivot {
                    table: Box::new(table),
                    aggregate_functions,
                    value_column,
                    value_source,
                    alias: self.parse_optional_table_alias()?,
                };
            } else if self.next_if_keyword("UNPIVOT") {
                let include_nulls = if self.next_if_keywords(&["INCLUDE", "NULLS"]) {
                    Some(true)
                } else if self.next_if_keywords(&["EXCLUDE", "NULLS"]) {
                    Some(false)
                } else {
                    None
                };
                self.expect_token(&Token::LParen)?;
                let value = self.parse_identifier()?;
                self.expect_keyword("FOR")?;
                let name = self.parse_identifier()?;
                self.expect_keyword("IN")?;
                let columns = self.parse_parenthesized_idents()?;
                self.expect_token(&Token::RParen)?;
                table = TableFactor::Unpivot {
                    table: Box::new(table),
                    include_nulls,
                    value,
                    name,
                    columns,
                    alias: self.parse_optional_table_alias()?,
                };
            } else {
                return Ok(table);
            }
        }
    }

    fn parse_order_by(&mut self) -> PResult<Option<OrderBy>> {
        if !self.next_if_keywords(&["ORDER", "BY"]) {
            return Ok(None);
        }
        let kind = if self.next_if_keyword("ALL") {
            OrderByKind::All(self.parse_order_by_options())
        } else {
            OrderByKind::Expressions(self.parse_comma_separated(Parser::parse_order_by_expr)?)
        };
        Ok(Some(OrderBy { kind }))
    }

    /// `LIMIT` and `OFFSET` in either order, `LIMIT ALL`, ClickHouse
    /// `LIMIT n BY ...` and the MySQL `LIMIT offset, count` form.
    fn parse_limit_clause(&mut self) -> PResult<Option<LimitClause>> {
        let mut seen_limit = false;
        let mut limit = None;
        let mut offset = None;
        let mut limit_by = vec![];
        loop {
            if !seen_limit && self.next_if_keyword("LIMIT") {
                seen_limit = true;
                if !self.next_if_keyword("ALL") {
                    let first = self.parse_expr()?;
                    if offset.is_none()
                        && self.dialect.supports_limit_comma()
                        && self.next_if_token(&Token::Comma)
                    {
                        return Ok(Some(LimitClause::OffsetCommaLimit {
                            offset: first,
                            limit: self.parse_expr()?,
                        }));
                    }
                    limit = Some(first);
                }
                if self.next_if_keyword("BY") {
                    limit_by = self.parse_comma_separated(Parser::parse_expr)?;
                }
            } else if offset.is_none() && self.next_if_keyword("OFFSET") {
                let value = self.parse_expr()?;
                let rows = match self.next_if_one_of(&["ROW", "ROWS"]) {
                    Some("ROW") => OffsetRows::Row,
                    Some(_) => OffsetRows::Rows,
                    None => OffsetRows::None,
                };
                offset = Some(Offset { value, rows });
            } else {
                break;
            }
        }
        if limit.is_none() && offset.is_none() && limit_by.is_empty() {
            return Ok(None);
        }
        Ok(Some(LimitClause::LimitOffset {
            limit,
            offset,
            limit_by,
        }))
    }

    fn parse_fetch(&mut self) -> PResult<Option<Fetch>> {
        if !self.next_if_keyword("FETCH") {
            return Ok(None);
        }
        if self.next_if_one_of(&["FIRST", "NEXT"]).is_none() {
            return self.expected("FIRST or NEXT");
        }
        let (quantity, percent) = if self.peek_keyword("ROW") || self.peek_keyword("ROWS") {
            (None, false)
        } else {
            let quantity = self.parse_expr()?;
            (Some(quantity), self.next_if_keyword("PERCENT"))
        };
        if self.next_if_one_of(&["ROW", "ROWS"]).is_none() {
            return self.expected("ROW or ROWS");
        }
        let with_ties = if self.next_if_keyword("ONLY") {
            false
        } else if self.next_if_keywords(&["WITH", "TIES"]) {
            true
        } else {
            return self.expected("ONLY or WITH TIES");
        };
        Ok(Some(Fetch {
            with_ties,
            percent,
            quantity,
        }))
    }

    fn parse_lock(&mut self) -> PResult<LockClause> {
        self.expect_keyword("FOR")?;
        let lock_type = if self.next_if_keyword("UPDATE") {
            LockType::Update
        } else {
            self.expect_keyword("SHARE")?;
            LockType::Share
        };
        let of = if self.next_if_keyword("OF") {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        let nonblock = if self.next_if_keyword("NOWAIT") {
            Some(NonBlock::Nowait)
        } else if self.next_if_keywords(&["SKIP", "LOCKED"]) {
            Some(NonBlock::SkipLocked)
        } else {
            None
        };
        Ok(LockClause {
            lock_type,
            of,
            nonblock,
        })
    }

    fn parse_insert(&mut self) -> PResult<Statement> {
        let replace_into = if self.next_if_keyword("REPLACE") {
            true
        } else {
            self.expect_keyword("INSERT")?;
            false
        };
        let or = if !replace_into && self.next_if_keyword("OR") {
            let action = match self.next_if_one_of(&["ROLLBACK", "ABORT", "FAIL", "IGNORE", "REPLACE"])
            {
                Some("ROLLBACK") => SqliteOnConflict::Rollback,
                Some("ABORT") => SqliteOnConflict::Abort,
                Some("FAIL") => SqliteOnConflict::Fail,
                Some("IGNORE") => SqliteOnConflict::Ignore,
                Some(_) => SqliteOnConflict::Replace,
                None => return self.expected("ROLLBACK, ABORT, FAIL, IGNORE or REPLACE"),
            };
            Some(action)
        } else {
            None
        };
        let ignore = self.next_if_keyword("IGNORE");
        let overwrite = self.next_if_keywords(&["OVERWRITE", "TABLE"]);
        let into = !overwrite && self.next_if_keyword("INTO");

        let table = self.parse_object_name()?;
        let table_alias = if self.next_if_keyword("AS") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let columns = if self.peek_token() == &Token::LParen
            && !self.peek_nth_keyword(1, "SELECT")
            && !self.peek_nth_keyword(1, "WITH")
        {
            self.parse_parenthesized_idents()?
        } else {
            vec![]
        };
        let partitioned = if self.next_if_keyword("PARTITION") {
            self.expect_token(&Token::LParen)?;
            let partitions = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            Some(partitions)
        } else {
            None
        };
        let source = if self.next_if_keywords(&["DEFAULT", "VALUES"]) {
            None
        } else {
            Some(Box::new(self.parse_query()?))
        };

        let on = if self.next_if_keywords(&["ON", "DUPLICATE", "KEY", "UPDATE"]) {
            Some(OnInsert::DuplicateKeyUpdate(
                self.parse_comma_separated(Parser::parse_assignment)?,
            ))
        } else if self.next_if_keywords(&["ON", "CONFLICT"]) {
            Some(OnInsert::OnConflict(self.parse_on_conflict()?))
        } else {
            None
        };
        let returning = self.parse_returning()?;

        Ok(Statement::Insert(Insert {
            replace_into,
            ignore,
            or,
            into,
            overwrite,
            table,
            table_alias,
            columns,
            partitioned,
            source,
            on,
            returning,
        }))
    }

    /// Called after `ON CONFLICT`.
    fn parse_on_conflict(&mut self) -> PResult<OnConflict> {
        let conflict_target = if self.next_if_keywords(&["ON", "CONSTRAINT"]) {
            Some(ConflictTarget::OnConstraint(self.parse_object_name()?))
        } else if self.peek_token() == &Token::LParen {
            Some(ConflictTarget::Columns(self.parse_parenthesized_idents()?))
        } else {
            None
        };
        self.expect_keyword("DO")?;
        let action = if self.next_if_keyword("NOTHING") {
            OnConflictAction::DoNothing
        } else {
            self.expect_keywords(&["UPDATE", "SET"])?;
            let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
            let selection = if self.next_if_keyword("WHERE") {
                Some(self.parse_expr()?)
            } else {
                None
            };
            OnConflictAction::DoUpdate {
                assignments,
                selection,
            }
        };
        Ok(OnConflict {
            conflict_target,
            action,
        })
    }

    fn parse_assignment(&mut self) -> PResult<Assignment> {
        let target = if self.next_if_token(&Token::LParen) {
            let names = self.parse_comma_separated(Parser::parse_object_name)?;
            self.expect_token(&Token::RParen)?;
            AssignmentTarget::Tuple(names)
        } else {
            AssignmentTarget::ColumnName(self.parse_object_name()?)
        };
        self.expect_token(&Token::Eq)?;
        Ok(Assignment {
            target,
            value: self.parse_expr()?,
        })
    }

    fn parse_returning(&mut self) -> PResult<Option<Vec<SelectItem>>> {
        if self.next_if_keyword("RETURNING") {
            Ok(Some(self.parse_comma_separated(Parser::parse_select_item)?))
        } else {
            Ok(None)
        }
    }

    fn parse_update(&mut self) -> PResult<Statement> {
        self.expect_keyword("UPDATE")?;
        let table = self.parse_table_and_joins()?;
        let mut from = if self.next_if_keyword("FROM") {
            Some(UpdateTableFromKind::BeforeSet(
                self.parse_comma_separated(Parser::parse_table_and_joins)?,
            ))
        } else {
            None
        };
        self.expect_keyword("SET")?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        if from.is_none() && self.next_if_keyword("FROM") {
            from = Some(UpdateTableFromKind::AfterSet(
                self.parse_comma_separated(Parser::parse_table_and_joins)?,
            ));
        }
        let selection = if self.next_if_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        let limit = if self.next_if_keyword("LIMIT") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Update {
            table,
            assignments,
            from,
            selection,
            returning,
            limit,
        })
    }

    fn parse_delete(&mut self) -> PResult<Statement> {
        self.expect_keyword("DELETE")?;
        let mut tables = vec![];
        let from = if self.next_if_keyword("FROM") {
            FromTable::WithFromKeyword(self.parse_comma_separated(Parser::parse_table_and_joins)?)
        } else {
            let checkpoint = self.index;
            let names = self.parse_comma_separated(Parser::parse_object_name)?;
            if self.next_if_keyword("FROM") {
                tables = names;
                FromTable::WithFromKeyword(
                    self.parse_comma_separated(Parser::parse_table_and_joins)?,
                )
            } else {
                self.index = checkpoint;
                FromTable::WithoutKeyword(
                    self.parse_comma_separated(Parser::parse_table_and_joins)?,
                )
            }
        };
        let using = if self.next_if_keyword("USING") {
            Some(self.parse_comma_separated(Parser::parse_table_and_joins)?)
        } else {
            None
        };
        let selection = if self.next_if_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        let order_by = if self.next_if_keywords(&["ORDER", "BY"]) {
            self.parse_comma_separated(Parser::parse_order_by_expr)?
        } else {
            vec![]
        };
        let limit = if self.next_if_keyword("LIMIT") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete(Delete {
            tables,
            from,
            using,
            selection,
            returning,
            order_by,
            limit,
        }))
    }

    fn parse_start_transaction(&mut self) -> PResult<Statement> {
        let begin = if self.next_if_keyword("BEGIN") {
            self.next_if_one_of(&["TRANSACTION", "WORK"]);
            true
        } else {
            self.expect_keywords(&["START", "TRANSACTION"])?;
            false
        };
        Ok(Statement::StartTransaction {
            modes: self.parse_transaction_modes()?,
            begin,
        })
    }

    fn parse_transaction_modes(&mut self) -> PResult<Vec<TransactionMode>> {
        let mut modes = vec![];
        let mut required = false;
        loop {
            let mode = if self.next_if_keywords(&["ISOLATION", "LEVEL"]) {
                let level = if self.next_if_keywords(&["READ", "UNCOMMITTED"]) {
                    TransactionIsolationLevel::ReadUncommitted
                } else if self.next_if_keywords(&["READ", "COMMITTED"]) {
                    TransactionIsolationLevel::ReadCommitted
                } else if self.next_if_keywords(&["REPEATABLE", "READ"]) {
                    TransactionIsolationLevel::RepeatableRead
                } else if self.next_if_keyword("SERIALIZABLE") {
                    TransactionIsolationLevel::Serializable
                } else {
                    return self.expected("isolation level");
                };
                TransactionMode::IsolationLevel(level)
            } else if self.next_if_keywords(&["READ", "ONLY"]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadOnly)
            } else if self.next_if_keywords(&["READ", "WRITE"]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadWrite)
            } else if required {
                return self.expected("transaction mode");
            } else {
                return Ok(modes);
            };
            modes.push(mode);
            required = self.next_if_token(&Token::Comma);
        }
    }

    /// `AND [NO] CHAIN`; true only for `AND CHAIN`.
    fn parse_commit_chain(&mut self) -> PResult<bool> {
        if !self.next_if_keyword("AND") {
            return Ok(false);
        }
        let chain = !self.next_if_keyword("NO");
        self.expect_keyword("CHAIN")?;
        Ok(chain)
    }

    fn parse_rollback(&mut self) -> PResult<Statement> {
        self.expect_keyword("ROLLBACK")?;
        self.next_if_one_of(&["TRANSACTION", "WORK"]);
        let chain = self.parse_commit_chain()?;
        let savepoint = if self.next_if_keyword("TO") {
            self.next_if_keyword("SAVEPOINT");
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(Statement::Rollback { chain, savepoint })
    }

    fn parse_explain(&mut self) -> PResult<Statement> {
        let describe_alias = match self.next_if_one_of(&["EXPLAIN", "DESCRIBE", "DESC"]) {
            Some("EXPLAIN") => DescribeAlias::Explain,
            Some("DESCRIBE") => DescribeAlias::Describe,
            Some(_) => DescribeAlias::Desc,
            None => return self.expected("EXPLAIN"),
        };
        let analyze = self.next_if_keyword("ANALYZE");
        let verbose = self.next_if_keyword("VERBOSE");
        let format = if self.next_if_keyword("FORMAT") {
            match self.next_if_one_of(&["TEXT", "GRAPHVIZ", "JSON"]) {
                Some("TEXT") => Some(AnalyzeFormat::Text),
                Some("GRAPHVIZ") => Some(AnalyzeFormat::Graphviz),
                Some(_) => Some(AnalyzeFormat::Json),
                None => return self.expected("TEXT, GRAPHVIZ or JSON"),
            }
        } else {
            None
        };

        let wraps_statement = self.peek_token() == &Token::LParen
            || EXPLAINABLE.iter().any(|kw| self.peek_keyword(kw));
        if !wraps_statement && !analyze && !verbose && format.is_none() {
            return Ok(Statement::ExplainTable {
                describe_alias,
                table_name: self.parse_object_name()?,
            });
        }
        Ok(Statement::Explain {
            describe_alias,
            analyze,
            verbose,
            format,
            statement: Box::new(self.descend(Parser::parse_statement)?),
        })
    }

    /// `SET [LOCAL] name = value` and `SET (a, b) = (x, y)`. Other `SET`
    /// forms are kept opaque.
    fn parse_set(&mut self) -> PResult<Statement> {
        let start = self.index;
        self.expect_keyword("SET")?;
        let local = self.next_if_keyword("LOCAL");
        let variables = match self.parse_set_variables() {
            Some(variables) => variables,
            None => {
                self.index = start;
                return self.parse_opaque_statement();
            }
        };
        let value = match variables {
            OneOrManyWithParens::One(_) => self.parse_comma_separated(Parser::parse_expr)?,
            OneOrManyWithParens::Many(_) => {
                self.expect_token(&Token::LParen)?;
                let values = self.parse_comma_separated(Parser::parse_expr)?;
                self.expect_token(&Token::RParen)?;
                values
            }
        };
        Ok(Statement::SetVariable {
            local,
            variables,
            value,
        })
    }

    /// The assignment target and its `=` or `TO`, if the statement has that
    /// shape.
    fn parse_set_variables(&mut self) -> Option<OneOrManyWithParens<ObjectName>> {
        let variables = if self.next_if_token(&Token::LParen) {
            let names = self
                .parse_comma_separated(Parser::parse_object_name)
                .ok()?;
            if !self.next_if_token(&Token::RParen) {
                return None;
            }
            OneOrManyWithParens::Many(names)
        } else {
            OneOrManyWithParens::One(self.parse_object_name().ok()?)
        };
        let assigned = self.next_if_token(&Token::Eq)
            || (matches!(variables, OneOrManyWithParens::One(_)) && self.next_if_keyword("TO"));
        assigned.then_some(variables)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        Expr, FromTable, GroupByExpr, JoinConstraint, JoinOperator, LimitClause, SelectItem,
        SetExpr, SetOperator, Statement, TableFactor,
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

    fn query_body(sql: &str) -> SetExpr {
        match parse_one(Dialect::Generic, sql) {
            Statement::Query(query) => *query.body,
            other => panic!("not a query: {:?}", other),
        }
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
        distinct_on: (Dialect::PostgreSql, "SELECT DISTINCT ON (a) a, b FROM t"),
        select_into: (Dialect::PostgreSql, "SELECT * INTO TEMPORARY t2 FROM t"),
        wildcard_options: (Dialect::Snowflake, "SELECT * EXCLUDE (a, b) REPLACE (c + 1 AS c) FROM t"),
        bigquery_except: (Dialect::BigQuery, "SELECT * EXCEPT (a) FROM t"),
        qualified_wildcard: (Dialect::Generic, "SELECT t.*, s.a FROM t, s"),
        group_by_all: (Dialect::Generic, "SELECT a, count(*) FROM t GROUP BY ALL"),
        group_by_modifier: (Dialect::MySql, "SELECT a, sum(b) FROM t GROUP BY a WITH ROLLUP"),
        named_window: (Dialect::Generic, "SELECT sum(a) OVER w FROM t WINDOW w AS (PARTITION BY b)"),
        qualify: (Dialect::Snowflake, "SELECT a FROM t QUALIFY row_number() OVER (ORDER BY a) = 1"),
        intersect_precedence: (Dialect::Generic, "SELECT 1 UNION SELECT 2 INTERSECT SELECT 3"),
        by_name: (Dialect::Generic, "SELECT 1 UNION ALL BY NAME SELECT 2"),
        values_row: (Dialect::MySql, "VALUES ROW(1, 2), ROW(3, 4)"),
        table_statement: (Dialect::Generic, "TABLE t"),
        fetch_first: (Dialect::Generic, "SELECT a FROM t ORDER BY a OFFSET 5 ROWS FETCH FIRST 10 ROWS ONLY"),
        locks: (Dialect::PostgreSql, "SELECT * FROM t FOR UPDATE OF t SKIP LOCKED"),
        limit_by: (Dialect::ClickHouse, "SELECT a FROM t LIMIT 1 BY a"),
        order_by_all: (Dialect::Generic, "SELECT a FROM t ORDER BY ALL DESC"),
        materialized_cte: (Dialect::PostgreSql, "WITH t AS MATERIALIZED (SELECT 1) SELECT * FROM t"),
        lateral_derived: (Dialect::PostgreSql, "SELECT * FROM t, LATERAL (SELECT * FROM s WHERE s.id = t.id) AS x"),
        table_function: (Dialect::PostgreSql, "SELECT * FROM generate_series(1, 10) AS g (n)"),
        unnest: (Dialect::BigQuery, "SELECT * FROM UNNEST([1, 2]) AS n WITH OFFSET AS o"),
        nested_join: (Dialect::Generic, "SELECT * FROM (a INNER JOIN b ON a.id = b.id) LEFT JOIN c USING(id)"),
        cross_apply: (Dialect::MsSql, "SELECT * FROM t CROSS APPLY f(t.id)"),
        asof_join: (Dialect::Snowflake, "SELECT * FROM a ASOF JOIN b MATCH_CONDITION (a.ts >= b.ts) ON a.id = b.id"),
        semi_join: (Dialect::Hive, "SELECT * FROM a LEFT SEMI JOIN b ON a.id = b.id"),
        system_time: (Dialect::MsSql, "SELECT * FROM t FOR SYSTEM_TIME AS OF '2020-01-01' AS x WITH (NOLOCK)"),
        pivot: (Dialect::Snowflake, "SELECT * FROM t PIVOT(sum(amount) FOR month IN ('JAN', 'FEB')) AS p"),
        unpivot: (Dialect::Snowflake, "SELECT * FROM t UNPIVOT INCLUDE NULLS(sales FOR month IN (jan, feb))"),
        insert_or_replace: (Dialect::SQLite, "INSERT OR REPLACE INTO t (a) VALUES (1)"),
        insert_default_values: (Dialect::PostgreSql, "INSERT INTO t DEFAULT VALUES"),
        insert_overwrite: (Dialect::Hive, "INSERT OVERWRITE TABLE t PARTITION (dt = '2020') SELECT * FROM s"),
        on_duplicate_key: (Dialect::MySql, "INSERT IGNORE INTO t (a) VALUES (1) ON DUPLICATE KEY UPDATE a = a + 1"),
        on_conflict_nothing: (Dialect::PostgreSql, "INSERT INTO t VALUES (1) ON CONFLICT ON CONSTRAINT t_pkey DO NOTHING"),
        replace_into: (Dialect::MySql, "REPLACE INTO t (a) VALUES (1)"),
        update_before_set: (Dialect::Snowflake, "UPDATE t FROM s SET a = s.a WHERE t.id = s.id"),
        update_tuple: (Dialect::PostgreSql, "UPDATE t SET (a, b) = (1, 2)"),
        delete_multi: (Dialect::MySql, "DELETE t1, t2 FROM t1 INNER JOIN t2 ON t1.id = t2.id WHERE t1.a = 1"),
        delete_without_from: (Dialect::BigQuery, "DELETE t WHERE a = 1"),
        delete_order_limit: (Dialect::MySql, "DELETE FROM t WHERE a = 1 ORDER BY b LIMIT 10"),
        with_insert: (Dialect::PostgreSql, "WITH s AS (SELECT 1) INSERT INTO t SELECT * FROM s"),
        begin: (Dialect::Generic, "BEGIN"),
        commit_chain: (Dialect::Generic, "COMMIT AND CHAIN"),
        rollback_savepoint: (Dialect::Generic, "ROLLBACK TO SAVEPOINT s"),
        savepoint: (Dialect::Generic, "SAVEPOINT s"),
        release: (Dialect::Generic, "RELEASE SAVEPOINT s"),
        explain_format: (Dialect::Generic, "EXPLAIN ANALYZE VERBOSE FORMAT JSON SELECT 1"),
        describe_table: (Dialect::MySql, "DESCRIBE t"),
        use_db: (Dialect::Generic, "USE db"),
        set_local: (Dialect::PostgreSql, "SET LOCAL search_path = public"),
        set_tuple: (Dialect::Generic, "SET (a, b) = (1, 2)"),
    }

    #[test]
    fn comma_join_keeps_relation_order() {
        match query_body("SELECT * FROM users u, orders o") {
            SetExpr::Select(select) => {
                assert_eq!(2, select.from.len());
                assert_eq!("users AS u", select.from[0].relation.to_string());
                assert_eq!("orders AS o", select.from[1].relation.to_string());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn joins_are_left_deep_in_order() {
        match query_body("SELECT * FROM a JOIN b ON a.x = b.x NATURAL JOIN c CROSS JOIN d") {
            SetExpr::Select(select) => {
                let joins = &select.from[0].joins;
                assert_eq!(3, joins.len());
                assert!(matches!(
                    joins[0].join_operator,
                    JoinOperator::Join(JoinConstraint::On(_))
                ));
                assert!(matches!(
                    joins[1].join_operator,
                    JoinOperator::Join(JoinConstraint::Natural)
                ));
                assert!(matches!(joins[2].join_operator, JoinOperator::CrossJoin));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_operations_are_left_associative() {
        match query_body("SELECT 1 UNION SELECT 2 UNION SELECT 3") {
            SetExpr::SetOperation { op, left, .. } => {
                assert_eq!(SetOperator::Union, op);
                assert!(matches!(*left, SetExpr::SetOperation { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn implicit_aliases_stop_at_keywords() {
        match query_body("SELECT a b, c FROM t x WHERE a = 1") {
            SetExpr::Select(select) => {
                assert!(matches!(select.projection[0], SelectItem::ExprWithAlias { .. }));
                assert!(matches!(select.projection[1], SelectItem::UnnamedExpr(_)));
                match &select.from[0].relation {
                    TableFactor::Table { alias, .. } => {
                        assert_eq!("x", alias.as_ref().unwrap().name.value)
                    }
                    other => panic!("unexpected {:?}", other),
                }
                assert!(select.selection.is_some());
                assert_eq!(GroupByExpr::none(), select.group_by);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn limit_forms() {
        let query = match parse_one(Dialect::Generic, "SELECT a FROM t OFFSET 5 LIMIT 10") {
            Statement::Query(query) => query,
            other => panic!("unexpected {:?}", other),
        };
        match query.limit_clause {
            Some(LimitClause::LimitOffset { limit, offset, .. }) => {
                assert!(limit.is_some());
                assert!(offset.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
        let query = match parse_one(Dialect::Generic, "SELECT a FROM t LIMIT ALL") {
            Statement::Query(query) => query,
            other => panic!("unexpected {:?}", other),
        };
        assert!(query.limit_clause.is_none());
        assert!(parse_sql(Dialect::PostgreSql, "SELECT a FROM t LIMIT 1, 2", 50).is_err());
    }

    #[test]
    fn insert_rows_are_row_major() {
        let insert = match parse_one(Dialect::Generic, "INSERT INTO t VALUES (1, 2), (3, 4)") {
            Statement::Insert(insert) => insert,
            other => panic!("unexpected {:?}", other),
        };
        let source = insert.source.unwrap();
        match *source.body {
            SetExpr::Values(values) => {
                assert_eq!(2, values.rows.len());
                assert_eq!("1", values.rows[0][0].to_string());
                assert_eq!("2", values.rows[0][1].to_string());
                assert_eq!("3", values.rows[1][0].to_string());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn delete_without_from_keyword() {
        match parse_one(Dialect::BigQuery, "DELETE t WHERE a = 1") {
            Statement::Delete(delete) => {
                assert!(delete.tables.is_empty());
                assert!(matches!(delete.from, FromTable::WithoutKeyword(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_normalises_to() {
        let statement = parse_one(Dialect::PostgreSql, "SET search_path TO public, s");
        assert_eq!("SET search_path = public, s", statement.to_string());
    }

    #[test]
    fn unusual_set_is_opaque() {
        match parse_one(Dialect::MySql, "SET NAMES 'utf8mb4'") {
            Statement::Opaque(payload) => {
                assert_eq!("SET", payload.kind);
                assert_eq!("SET NAMES 'utf8mb4'", payload.text);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn explain_wraps_statement() {
        match parse_one(Dialect::Generic, "EXPLAIN SELECT 1") {
            Statement::Explain { statement, .. } => {
                assert!(matches!(*statement, Statement::Query(_)))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn derived_table_needs_closing_paren() {
        let err = parse_sql(Dialect::Generic, "SELECT * FROM (SELECT 1", 50).unwrap_err();
        assert_eq!("Expected: ), found: EOF", err.message);
    }

    #[test]
    fn exists_subquery_is_query() {
        match query_body("SELECT * FROM t WHERE EXISTS (SELECT 1 FROM s)") {
            SetExpr::Select(select) => {
                assert!(matches!(select.selection, Some(Expr::Exists { .. })))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
