use super::token::Token;
use super::{PResult, Parser};
use crate::ast::{
    AccessExpr, Array, BinaryOperator, CaseWhen, CastFormat, CastKind, DateTimeField,
    DuplicateTreatment, Expr, ExtractSyntax, Function, FunctionArg, FunctionArgExpr,
    FunctionArgOperator, FunctionArgumentClause, FunctionArgumentList, FunctionArguments, Ident,
    Interval, LambdaFunction, Map, MapEntry, NullTreatment, ObjectName, OneOrManyWithParens,
    OrderByExpr, OrderByOptions, Subscript, TrimWhereField, UnaryOperator, Value, WindowFrame,
    WindowFrameBound, WindowFrameUnits, WindowSpec, WindowType,
};
use crate::dialect::Dialect;

type Precedence = u8;

const OR_PREC: Precedence = 5;
const AND_PREC: Precedence = 10;
const UNARY_NOT_PREC: Precedence = 15;
const IS_PREC: Precedence = 17;
const LIKE_PREC: Precedence = 19;
const BETWEEN_PREC: Precedence = 20;
const EQ_PREC: Precedence = 20;
const PIPE_PREC: Precedence = 21;
const CARET_PREC: Precedence = 22;
const AMPERSAND_PREC: Precedence = 23;
const XOR_PREC: Precedence = 24;
const PG_OTHER_PREC: Precedence = 25;
const PLUS_MINUS_PREC: Precedence = 30;
const MUL_DIV_MOD_PREC: Precedence = 40;
const AT_TZ_PREC: Precedence = 41;
const COLLATE_PREC: Precedence = 42;
const ACCESS_PREC: Precedence = 50;

/// Words that start a typed literal such as `DATE '2020-01-01'`.
const TYPED_STRING_TYPES: &[&str] = &[
    "DATE",
    "TIME",
    "TIMESTAMP",
    "TIMESTAMPTZ",
    "DATETIME",
    "JSON",
    "UUID",
    "NUMERIC",
    "DECIMAL",
    "BIGNUMERIC",
];

/// Niladic functions written without parentheses.
const BARE_FUNCTIONS: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "SESSION_USER",
];

const INTERVAL_FIELDS: &[&str] = &[
    "YEAR",
    "YEARS",
    "QUARTER",
    "MONTH",
    "MONTHS",
    "WEEK",
    "WEEKS",
    "DAY",
    "DAYS",
    "HOUR",
    "HOURS",
    "MINUTE",
    "MINUTES",
    "SECOND",
    "SECONDS",
    "MILLISECOND",
    "MILLISECONDS",
    "MICROSECOND",
    "MICROSECONDS",
    "NANOSECOND",
    "NANOSECONDS",
    "CENTURY",
    "DECADE",
    "MILLENNIUM",
    "EPOCH",
];

impl Parser {
    pub(super) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_subexpr(0)
    }

    /// Parses operators binding tighter than `precedence`.
    pub(super) fn parse_subexpr(&mut self, precedence: Precedence) -> PResult<Expr> {
        self.descend(|p| {
            let mut expr = p.parse_prefix()?;
            loop {
                let next = p.next_precedence();
                if precedence >= next {
                    break;
                }
                expr = p.parse_infix(expr, next)?;
            }
            Ok(expr)
        })
    }

    fn next_precedence(&self) -> Precedence {
        let dialect = self.dialect;
        match self.peek_token() {
            Token::Word(w) if w.quote_style.is_none() => {
                match w.value.to_ascii_uppercase().as_str() {
                    "OR" => OR_PREC,
                    "AND" => AND_PREC,
                    "XOR" => XOR_PREC,
                    "IS" => IS_PREC,
                    "IN" | "BETWEEN" => BETWEEN_PREC,
                    "LIKE" | "SIMILAR" | "REGEXP" | "RLIKE" => LIKE_PREC,
                    "ILIKE" if dialect.supports_ilike() => LIKE_PREC,
                    "DIV" if dialect.supports_div_operator() => MUL_DIV_MOD_PREC,
                    "COLLATE" => COLLATE_PREC,
                    "AT" if self.peek_nth_keyword(1, "TIME") && self.peek_nth_keyword(2, "ZONE") => {
                        AT_TZ_PREC
                    }
                    "NOT" => {
                        let next = &self.peek_nth(1).token;
                        if next.is_keyword("IN") || next.is_keyword("BETWEEN") {
                            BETWEEN_PREC
                        } else if ["LIKE", "ILIKE", "SIMILAR", "REGEXP", "RLIKE"]
                            .iter()
                            .any(|kw| next.is_keyword(kw))
                        {
                            LIKE_PREC
                        } else {
                            0
                        }
                    }
                    _ => 0,
                }
            }
            Token::Eq
            | Token::DoubleEq
            | Token::Neq
            | Token::Lt
            | Token::Gt
            | Token::LtEq
            | Token::GtEq
            | Token::Spaceship => EQ_PREC,
            Token::Tilde
            | Token::TildeAsterisk
            | Token::ExclamationMarkTilde
            | Token::ExclamationMarkTildeAsterisk => LIKE_PREC,
            Token::Pipe => PIPE_PREC,
            Token::Caret => CARET_PREC,
            Token::Ampersand => AMPERSAND_PREC,
            Token::ShiftLeft
            | Token::ShiftRight
            | Token::HashArrow
            | Token::HashLongArrow
            | Token::AtArrow
            | Token::ArrowAt => PG_OTHER_PREC,
            Token::Arrow | Token::LongArrow if dialect.supports_json_arrows() => PG_OTHER_PREC,
            Token::Plus | Token::Minus | Token::StringConcat => PLUS_MINUS_PREC,
            Token::Mul | Token::Div | Token::Mod => MUL_DIV_MOD_PREC,
            Token::DoubleColon if dialect.supports_double_colon_cast() => ACCESS_PREC,
            Token::LBracket | Token::Period => ACCESS_PREC,
            _ => 0,
        }
    }

    fn parse_prefix(&mut self) -> PResult<Expr> {
        if self.peek_token() == &Token::EOF {
            return self.expected("an expression");
        }
        if let Some(typed) = self.parse_typed_string()? {
            return Ok(typed);
        }

        let next = self.next();
        let span = next.span;
        let word = match next.token {
            Token::Word(word) => word,
            Token::Minus => return self.parse_unary(UnaryOperator::Minus),
            Token::Plus => return self.parse_unary(UnaryOperator::Plus),
            Token::Tilde => return self.parse_unary(UnaryOperator::BitwiseNot),
            Token::LParen => return self.parse_parenthesized_expr(),
            Token::LBracket => {
                return Ok(Expr::Array(Array {
                    elem: self.parse_array_elements()?,
                    named: false,
                }))
            }
            Token::Colon => {
                let name = self.parse_identifier()?;
                let value = Value::Placeholder(format!(":{}", name.value));
                return Ok(Expr::Value(value.with_span(span.union(&name.span))));
            }
            token => {
                return match token.to_value() {
                    Some(value) => Ok(Expr::Value(value.with_span(span))),
                    None => {
                        self.index -= 1;
                        self.expected("an expression")
                    }
                }
            }
        };

        if word.quote_style.is_some() {
            return self.parse_identifier_expr(word.to_ident(span));
        }
        let keyword = word.value.to_ascii_uppercase();
        let next_is_paren = self.peek_token() == &Token::LParen;
        match keyword.as_str() {
            "TRUE" | "FALSE" => {
                let value = Value::Boolean(keyword == "TRUE");
                Ok(Expr::Value(value.with_span(span)))
            }
            "NULL" => Ok(Expr::Value(Value::Null.with_span(span))),
            "NOT" => {
                if self.peek_keyword("EXISTS") && self.peek_nth(1).token == Token::LParen {
                    self.index += 1;
                    return self.parse_exists(true);
                }
                let expr = self.parse_subexpr(UNARY_NOT_PREC)?;
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Not,
                    expr: Box::new(expr),
                })
            }
            "EXISTS" if next_is_paren => self.parse_exists(false),
            "CASE" => self.parse_case(),
            "CAST" if next_is_paren => self.parse_cast(CastKind::Cast),
            "TRY_CAST" if next_is_paren => self.parse_cast(CastKind::TryCast),
            "SAFE_CAST" if next_is_paren => self.parse_cast(CastKind::SafeCast),
            "CONVERT" if next_is_paren => self.parse_convert(false),
            "TRY_CONVERT" if next_is_paren => self.parse_convert(true),
            "EXTRACT" if next_is_paren => self.parse_extract(),
            "POSITION" if next_is_paren => self.parse_position(),
            "SUBSTRING" if next_is_paren => self.parse_substring(),
            "TRIM" if next_is_paren => self.parse_trim(),
            "OVERLAY" if next_is_paren => self.parse_overlay(),
            "INTERVAL" => self.parse_interval(),
            "ARRAY" if self.peek_token() == &Token::LBracket => {
                self.index += 1;
                Ok(Expr::Array(Array {
                    elem: self.parse_array_elements()?,
                    named: true,
                }))
            }
            "MAP" if self.peek_token() == &Token::LBrace => self.parse_map(),
            "STRUCT"
                if matches!(self.dialect, Dialect::BigQuery | Dialect::Generic)
                    && matches!(self.peek_token(), Token::Lt | Token::LParen) =>
            {
                self.parse_struct()
            }
            kw if BARE_FUNCTIONS.contains(&kw) && !next_is_paren => {
                Ok(Expr::Function(Function {
                    name: ObjectName::from_idents(vec![word.to_ident(span)]),
                    args: FunctionArguments::None,
                    within_group: vec![],
                    filter: None,
                    null_treatment: None,
                    over: None,
                }))
            }
            "DEFAULT" => self.parse_identifier_expr(word.to_ident(span)),
            _ if word.is_reserved_for_alias() && !next_is_paren => {
                self.index -= 1;
                self.expected("an expression")
            }
            _ => self.parse_identifier_expr(word.to_ident(span)),
        }
    }

    fn parse_unary(&mut self, op: UnaryOperator) -> PResult<Expr> {
        let expr = self.parse_subexpr(MUL_DIV_MOD_PREC)?;
        Ok(Expr::UnaryOp {
            op,
            expr: Box::new(expr),
        })
    }

    /// A name, a dotted name, or a function call.
    fn parse_identifier_expr(&mut self, first: Ident) -> PResult<Expr> {
        let mut parts = vec![first];
        while self.peek_token() == &Token::Period && self.peek_nth(1).token.word().is_some() {
            self.index += 1;
            parts.push(self.parse_identifier()?);
        }
        if self.peek_token() == &Token::LParen {
            return self.parse_function(ObjectName::from_idents(parts));
        }
        if parts.len() == 1 {
            Ok(Expr::Identifier(parts.remove(0)))
        } else {
            Ok(Expr::CompoundIdentifier(parts))
        }
    }

    fn parse_infix(&mut self, expr: Expr, precedence: Precedence) -> PResult<Expr> {
        let dialect = self.dialect;
        let next = self.next();
        let binary_op = match &next.token {
            Token::Eq | Token::DoubleEq => Some(BinaryOperator::Eq),
            Token::Neq => Some(BinaryOperator::NotEq),
            Token::Lt => Some(BinaryOperator::Lt),
            Token::Gt => Some(BinaryOperator::Gt),
            Token::LtEq => Some(BinaryOperator::LtEq),
            Token::GtEq => Some(BinaryOperator::GtEq),
            Token::Spaceship => Some(BinaryOperator::Spaceship),
            Token::Plus => Some(BinaryOperator::Plus),
            Token::Minus => Some(BinaryOperator::Minus),
            Token::Mul => Some(BinaryOperator::Multiply),
            Token::Div => Some(BinaryOperator::Divide),
            Token::Mod => Some(BinaryOperator::Modulo),
            Token::StringConcat => Some(BinaryOperator::StringConcat),
            Token::Pipe => Some(BinaryOperator::BitwiseOr),
            Token::Ampersand => Some(BinaryOperator::BitwiseAnd),
            Token::Caret if dialect.caret_is_exponent() => Some(BinaryOperator::PGExp),
            Token::Caret => Some(BinaryOperator::BitwiseXor),
            Token::ShiftLeft => Some(BinaryOperator::PGBitwiseShiftLeft),
            Token::ShiftRight => Some(BinaryOperator::PGBitwiseShiftRight),
            Token::Tilde => Some(BinaryOperator::PGRegexMatch),
            Token::TildeAsterisk => Some(BinaryOperator::PGRegexIMatch),
            Token::ExclamationMarkTilde => Some(BinaryOperator::PGRegexNotMatch),
            Token::ExclamationMarkTildeAsterisk => Some(BinaryOperator::PGRegexNotIMatch),
            Token::Arrow => Some(BinaryOperator::Arrow),
            Token::LongArrow => Some(BinaryOperator::LongArrow),
            Token::HashArrow => Some(BinaryOperator::HashArrow),
            Token::HashLongArrow => Some(BinaryOperator::HashLongArrow),
            Token::AtArrow => Some(BinaryOperator::AtArrow),
            Token::ArrowAt => Some(BinaryOperator::ArrowAt),
            Token::Word(w) if w.is_keyword("AND") => Some(BinaryOperator::And),
            Token::Word(w) if w.is_keyword("OR") => Some(BinaryOperator::Or),
            Token::Word(w) if w.is_keyword("XOR") => Some(BinaryOperator::Xor),
            Token::Word(w) if w.is_keyword("DIV") => Some(BinaryOperator::MyIntegerDivide),
            _ => None,
        };

        if let Some(op) = binary_op {
            if is_comparison(op) {
                if let Some(quantifier) = self.peek_quantifier() {
                    return self.parse_quantified_comparison(expr, op, quantifier);
                }
            }
            let right = self.parse_subexpr(precedence)?;
            return Ok(Expr::BinaryOp {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            });
        }

        match next.token {
            Token::DoubleColon => Ok(Expr::Cast {
                kind: CastKind::DoubleColon,
                expr: Box::new(expr),
                data_type: self.parse_data_type()?,
                format: None,
            }),
            Token::LBracket => {
                let subscript = self.parse_subscript()?;
                Ok(push_access(expr, AccessExpr::Subscript(subscript)))
            }
            Token::Period => {
                let field = self.parse_identifier()?;
                Ok(push_access(expr, AccessExpr::Dot(Expr::Identifier(field))))
            }
            Token::Word(w) => match w.value.to_ascii_uppercase().as_str() {
                "IS" => self.parse_is(expr),
                "NOT" => self.parse_negatable_infix(expr, true),
                "AT" => {
                    self.expect_keywords(&["TIME", "ZONE"])?;
                    let time_zone = self.parse_subexpr(precedence)?;
                    Ok(Expr::AtTimeZone {
                        timestamp: Box::new(expr),
                        time_zone: Box::new(time_zone),
                    })
                }
                "COLLATE" => Ok(Expr::Collate {
                    expr: Box::new(expr),
                    collation: self.parse_object_name()?,
                }),
                _ => {
                    self.index -= 1;
                    self.parse_negatable_infix(expr, false)
                }
            },
            _ => {
                self.index -= 1;
                self.expected("an operator")
            }
        }
    }

    fn parse_is(&mut self, expr: Expr) -> PResult<Expr> {
        let negated = self.next_if_keyword("NOT");
        let expr = Box::new(expr);
        let wrapped = if self.next_if_keyword("NULL") {
            if negated {
                Expr::IsNotNull(expr)
            } else {
                Expr::IsNull(expr)
            }
        } else if self.next_if_keyword("TRUE") {
            if negated {
                Expr::IsNotTrue(expr)
            } else {
                Expr::IsTrue(expr)
            }
        } else if self.next_if_keyword("FALSE") {
            if negated {
                Expr::IsNotFalse(expr)
            } else {
                Expr::IsFalse(expr)
            }
        } else if self.next_if_keyword("UNKNOWN") {
            if negated {
                Expr::IsNotUnknown(expr)
            } else {
                Expr::IsUnknown(expr)
            }
        } else if self.next_if_keywords(&["DISTINCT", "FROM"]) {
            let other = Box::new(self.parse_subexpr(IS_PREC)?);
            if negated {
                Expr::IsNotDistinctFrom(expr, other)
            } else {
                Expr::IsDistinctFrom(expr, other)
            }
        } else {
            return self.expected("[NOT] NULL, TRUE, FALSE, UNKNOWN or DISTINCT FROM after IS");
        };
        Ok(wrapped)
    }

    /// `IN`, `BETWEEN` and the pattern matching operators, which may follow
    /// a `NOT`.
    fn parse_negatable_infix(&mut self, expr: Expr, negated: bool) -> PResult<Expr> {
        let expr = Box::new(expr);
        if self.next_if_keyword("IN") {
            return self.parse_in(expr, negated);
        }
        if self.next_if_keyword("BETWEEN") {
            let low = self.parse_subexpr(BETWEEN_PREC)?;
            self.expect_keyword("AND")?;
            let high = self.parse_subexpr(BETWEEN_PREC)?;
            return Ok(Expr::Between {
                expr,
                negated,
                low: Box::new(low),
                high: Box::new(high),
            });
        }
        if self.next_if_keyword("LIKE") {
            let (pattern, escape_char) = self.parse_pattern()?;
            return Ok(Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            });
        }
        if self.dialect.supports_ilike() && self.next_if_keyword("ILIKE") {
            let (pattern, escape_char) = self.parse_pattern()?;
            return Ok(Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            });
        }
        if self.next_if_keywords(&["SIMILAR", "TO"]) {
            let (pattern, escape_char) = self.parse_pattern()?;
            return Ok(Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            });
        }
        if let Some(kw) = self.next_if_one_of(&["REGEXP", "RLIKE"]) {
            let pattern = self.parse_subexpr(LIKE_PREC)?;
            return Ok(Expr::RLike {
                negated,
                expr,
                pattern: Box::new(pattern),
                regexp: kw == "REGEXP",
            });
        }
        self.expected("IN, BETWEEN, LIKE or SIMILAR TO")
    }

    fn parse_pattern(&mut self) -> PResult<(Box<Expr>, Option<Value>)> {
        let pattern = self.parse_subexpr(LIKE_PREC)?;
        let escape_char = if self.next_if_keyword("ESCAPE") {
            Some(self.parse_value()?)
        } else {
            None
        };
        Ok((Box::new(pattern), escape_char))
    }

    fn parse_in(&mut self, expr: Box<Expr>, negated: bool) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let in_expr = if self.peek_subquery() {
            Expr::InSubquery {
                expr,
                subquery: Box::new(self.parse_query()?),
                negated,
            }
        } else {
            let list = if self.peek_token() == &Token::RParen {
                vec![]
            } else {
                self.parse_comma_separated(Parser::parse_expr)?
            };
            Expr::InList {
                expr,
                list,
                negated,
            }
        };
        self.expect_token(&Token::RParen)?;
        Ok(in_expr)
    }

    /// `ANY`, `SOME` or `ALL` directly followed by a parenthesis.
    fn peek_quantifier(&self) -> Option<&'static str> {
        if self.peek_nth(1).token != Token::LParen {
            return None;
        }
        ["ANY", "SOME", "ALL"]
            .iter()
            .copied()
            .find(|kw| self.peek_keyword(kw))
    }

    fn parse_quantified_comparison(
        &mut self,
        left: Expr,
        compare_op: BinaryOperator,
        quantifier: &str,
    ) -> PResult<Expr> {
        self.index += 1;
        self.expect_token(&Token::LParen)?;
        let right = if self.peek_subquery() {
            Expr::Subquery(Box::new(self.parse_query()?))
        } else {
            self.parse_expr()?
        };
        self.expect_token(&Token::RParen)?;
        let left = Box::new(left);
        let right = Box::new(right);
        Ok(match quantifier {
            "ALL" => Expr::AllOp {
                left,
                compare_op,
                right,
            },
            _ => Expr::AnyOp {
                left,
                compare_op,
                right,
                is_some: quantifier == "SOME",
            },
        })
    }

    /// Whether a query starts at the current token.
    pub(super) fn peek_subquery(&self) -> bool {
        self.peek_keyword("SELECT") || self.peek_keyword("WITH") || self.peek_keyword("VALUES")
    }

    /// A literal value: number, string, boolean, `NULL` or placeholder.
    pub(super) fn parse_value(&mut self) -> PResult<Value> {
        let value = match self.peek_token() {
            Token::Word(w) if w.is_keyword("TRUE") => Some(Value::Boolean(true)),
            Token::Word(w) if w.is_keyword("FALSE") => Some(Value::Boolean(false)),
            Token::Word(w) if w.is_keyword("NULL") => Some(Value::Null),
            token => token.to_value(),
        };
        match value {
            Some(value) => {
                self.index += 1;
                Ok(value)
            }
            None => self.expected("a value"),
        }
    }

    fn parse_typed_string(&mut self) -> PResult<Option<Expr>> {
        let starts_type = match self.peek_token() {
            Token::Word(w) => {
                w.quote_style.is_none()
                    && TYPED_STRING_TYPES.contains(&w.value.to_ascii_uppercase().as_str())
            }
            _ => false,
        };
        if !starts_type {
            return Ok(None);
        }
        let checkpoint = self.index;
        if let Ok(data_type) = self.parse_data_type() {
            let next = self.peek();
            let value = match next.token.to_value() {
                Some(Value::Number(..)) | Some(Value::Placeholder(_)) | None => None,
                Some(value) => Some(value.with_span(next.span)),
            };
            if let Some(value) = value {
                self.index += 1;
                return Ok(Some(Expr::TypedString { data_type, value }));
            }
        }
        self.index = checkpoint;
        Ok(None)
    }

    /// Called after `(`: a subquery, a nested expression or a tuple.
    fn parse_parenthesized_expr(&mut self) -> PResult<Expr> {
        let expr = if self.peek_subquery() {
            Expr::Subquery(Box::new(self.parse_query()?))
        } else {
            let mut exprs = self.parse_comma_separated(Parser::parse_expr)?;
            if exprs.len() == 1 {
                Expr::Nested(Box::new(exprs.remove(0)))
            } else {
                Expr::Tuple(exprs)
            }
        };
        self.expect_token(&Token::RParen)?;
        Ok(expr)
    }

    fn parse_exists(&mut self, negated: bool) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let subquery = self.parse_query()?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Exists {
            subquery: Box::new(subquery),
            negated,
        })
    }

    fn parse_case(&mut self) -> PResult<Expr> {
        let operand = if self.peek_keyword("WHEN") {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect_keyword("WHEN")?;
        let mut conditions = vec![];
        loop {
            let condition = self.parse_expr()?;
            self.expect_keyword("THEN")?;
            let result = self.parse_expr()?;
            conditions.push(CaseWhen { condition, result });
            if !self.next_if_keyword("WHEN") {
                break;
            }
        }
        let else_result = if self.next_if_keyword("ELSE") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword("END")?;
        Ok(Expr::Case {
            operand,
            conditions,
            else_result,
        })
    }

    fn parse_cast(&mut self, kind: CastKind) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword("AS")?;
        let data_type = self.parse_data_type()?;
        let format = if self.next_if_keyword("FORMAT") {
            let value = self.parse_value()?;
            if self.next_if_keywords(&["AT", "TIME", "ZONE"]) {
                Some(CastFormat::ValueAtTimeZone(value, self.parse_value()?))
            } else {
                Some(CastFormat::Value(value))
            }
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Cast {
            kind,
            expr: Box::new(expr),
            data_type,
            format,
        })
    }

    fn parse_convert(&mut self, is_try: bool) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        if self.dialect == Dialect::MsSql {
            let data_type = self.parse_data_type()?;
            self.expect_token(&Token::Comma)?;
            let expr = self.parse_expr()?;
            let styles = if self.next_if_token(&Token::Comma) {
                self.parse_comma_separated(Parser::parse_expr)?
            } else {
                vec![]
            };
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Convert {
                is_try,
                expr: Box::new(expr),
                data_type: Some(data_type),
                charset: None,
                target_before_value: true,
                styles,
            });
        }

        let expr = self.parse_expr()?;
        if self.next_if_keyword("USING") {
            let charset = self.parse_object_name()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Convert {
                is_try,
                expr: Box::new(expr),
                data_type: None,
                charset: Some(charset),
                target_before_value: false,
                styles: vec![],
            });
        }
        self.expect_token(&Token::Comma)?;
        let data_type = self.parse_data_type()?;
        let charset = if self.next_if_keywords(&["CHARACTER", "SET"]) {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Convert {
            is_try,
            expr: Box::new(expr),
            data_type: Some(data_type),
            charset,
            target_before_value: false,
            styles: vec![],
        })
    }

    fn parse_extract(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let field = self.parse_date_time_field()?;
        let syntax = if self.next_if_keyword("FROM") {
            ExtractSyntax::From
        } else if self.dialect == Dialect::Snowflake && self.next_if_token(&Token::Comma) {
            ExtractSyntax::Comma
        } else {
            return self.expected("FROM");
        };
        let expr = self.parse_expr()?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Extract {
            field,
            syntax,
            expr: Box::new(expr),
        })
    }

    pub(super) fn parse_date_time_field(&mut self) -> PResult<DateTimeField> {
        let keyword = match self.peek_token() {
            Token::Word(w) if w.quote_style.is_none() => w.value.to_ascii_uppercase(),
            _ => return self.expected("a date/time field"),
        };
        let field = match keyword.as_str() {
            "YEAR" | "YEARS" => DateTimeField::Year,
            "QUARTER" => DateTimeField::Quarter,
            "MONTH" | "MONTHS" => DateTimeField::Month,
            "WEEK" | "WEEKS" => {
                self.index += 1;
                if self.peek_token() == &Token::LParen && self.peek_nth(1).token.word().is_some()
                {
                    self.index += 1;
                    let weekday = self.parse_identifier()?;
                    self.expect_token(&Token::RParen)?;
                    return Ok(DateTimeField::Week(Some(weekday)));
                }
                return Ok(DateTimeField::Week(None));
            }
            "DAY" | "DAYS" => DateTimeField::Day,
            "DAYOFWEEK" => DateTimeField::DayOfWeek,
            "DAYOFYEAR" => DateTimeField::DayOfYear,
            "DATE" => DateTimeField::Date,
            "HOUR" | "HOURS" => DateTimeField::Hour,
            "MINUTE" | "MINUTES" => DateTimeField::Minute,
            "SECOND" | "SECONDS" => DateTimeField::Second,
            "MILLISECOND" | "MILLISECONDS" => DateTimeField::Millisecond,
            "MICROSECOND" | "MICROSECONDS" => DateTimeField::Microsecond,
            "NANOSECOND" | "NANOSECONDS" => DateTimeField::Nanosecond,
            "CENTURY" => DateTimeField::Century,
            "DECADE" => DateTimeField::Decade,
            "MILLENNIUM" => DateTimeField::Millennium,
            "DOW" => DateTimeField::Dow,
            "DOY" => DateTimeField::Doy,
            "EPOCH" => DateTimeField::Epoch,
            "ISODOW" => DateTimeField::Isodow,
            "ISOYEAR" => DateTimeField::Isoyear,
            "JULIAN" => DateTimeField::Julian,
            "TIME" => DateTimeField::Time,
            "TIMEZONE" => DateTimeField::Timezone,
            "TIMEZONE_HOUR" => DateTimeField::TimezoneHour,
            "TIMEZONE_MINUTE" => DateTimeField::TimezoneMinute,
            _ => return Ok(DateTimeField::Custom(self.parse_identifier()?)),
        };
        self.index += 1;
        Ok(field)
    }

    fn parse_position(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_subexpr(BETWEEN_PREC)?;
        self.expect_keyword("IN")?;
        let r#in = self.parse_expr()?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Position {
            expr: Box::new(expr),
            r#in: Box::new(r#in),
        })
    }

    fn parse_substring(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let expr = Box::new(self.parse_expr()?);
        if self.next_if_token(&Token::Comma) {
            let from = self.parse_expr()?;
            let length = if self.next_if_token(&Token::Comma) {
                Some(Box::new(self.parse_expr()?))
            } else {
                None
            };
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Substring {
                expr,
                substring_from: Some(Box::new(from)),
                substring_for: length,
                special: true,
            });
        }
        let substring_from = if self.next_if_keyword("FROM") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let substring_for = if self.next_if_keyword("FOR") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Substring {
            expr,
            substring_from,
            substring_for,
            special: false,
        })
    }

    fn parse_trim(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let trim_where = match self.next_if_one_of(&["BOTH", "LEADING", "TRAILING"]) {
            Some("BOTH") => Some(TrimWhereField::Both),
            Some("LEADING") => Some(TrimWhereField::Leading),
            Some(_) => Some(TrimWhereField::Trailing),
            None => None,
        };
        let trim = if trim_where.is_some() {
            if self.next_if_keyword("FROM") {
                Expr::Trim {
                    expr: Box::new(self.parse_expr()?),
                    trim_where,
                    trim_what: None,
                    trim_characters: None,
                }
            } else {
                let what = self.parse_expr()?;
                self.expect_keyword("FROM")?;
                Expr::Trim {
                    expr: Box::new(self.parse_expr()?),
                    trim_where,
                    trim_what: Some(Box::new(what)),
                    trim_characters: None,
                }
            }
        } else {
            let first = self.parse_expr()?;
            if self.next_if_keyword("FROM") {
                Expr::Trim {
                    expr: Box::new(self.parse_expr()?),
                    trim_where: None,
                    trim_what: Some(Box::new(first)),
                    trim_characters: None,
                }
            } else if self.next_if_token(&Token::Comma) {
                Expr::Trim {
                    expr: Box::new(first),
                    trim_where: None,
                    trim_what: None,
                    trim_characters: Some(self.parse_comma_separated(Parser::parse_expr)?),
                }
            } else {
                Expr::Trim {
                    expr: Box::new(first),
                    trim_where: None,
                    trim_what: None,
                    trim_characters: None,
                }
            }
        };
        self.expect_token(&Token::RParen)?;
        Ok(trim)
    }

    fn parse_overlay(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword("PLACING")?;
        let overlay_what = self.parse_expr()?;
        self.expect_keyword("FROM")?;
        let overlay_from = self.parse_expr()?;
        let overlay_for = if self.next_if_keyword("FOR") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Overlay {
            expr: Box::new(expr),
            overlay_what: Box::new(overlay_what),
            overlay_from: Box::new(overlay_from),
            overlay_for,
        })
    }

    fn peek_interval_field(&self) -> bool {
        match self.peek_token() {
            Token::Word(w) => {
                w.quote_style.is_none()
                    && INTERVAL_FIELDS.contains(&w.value.to_ascii_uppercase().as_str())
            }
            _ => false,
        }
    }

    fn parse_interval(&mut self) -> PResult<Expr> {
        let value = self.parse_prefix()?;
        let mut interval = Interval {
            value: Box::new(value),
            leading_field: None,
            leading_precision: None,
            last_field: None,
            fractional_seconds_precision: None,
        };
        if !self.peek_interval_field() {
            return Ok(Expr::Interval(interval));
        }
        interval.leading_field = Some(self.parse_date_time_field()?);
        interval.leading_precision = self.parse_optional_precision()?;
        if self.next_if_keyword("TO") {
            let last_field = self.parse_date_time_field()?;
            if last_field == DateTimeField::Second {
                interval.fractional_seconds_precision = self.parse_optional_precision()?;
            }
            interval.last_field = Some(last_field);
        }
        Ok(Expr::Interval(interval))
    }

    /// `(n)`, if present.
    pub(super) fn parse_optional_precision(&mut self) -> PResult<Option<u64>> {
        if self.peek_token() == &Token::LParen && matches!(self.peek_nth(1).token, Token::Number(_))
        {
            self.index += 1;
            let n = self.parse_literal_uint()?;
            self.expect_token(&Token::RParen)?;
            Ok(Some(n))
        } else {
            Ok(None)
        }
    }

    /// Called after `[`.
    fn parse_array_elements(&mut self) -> PResult<Vec<Expr>> {
        if self.next_if_token(&Token::RBracket) {
            return Ok(vec![]);
        }
        let elem = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RBracket)?;
        Ok(elem)
    }

    fn parse_map(&mut self) -> PResult<Expr> {
        self.expect_token(&Token::LBrace)?;
        let mut entries = vec![];
        if !self.next_if_token(&Token::RBrace) {
            entries = self.parse_comma_separated(|p| {
                let key = p.parse_expr()?;
                p.expect_token(&Token::Colon)?;
                let value = p.parse_expr()?;
                Ok(MapEntry {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            })?;
            self.expect_token(&Token::RBrace)?;
        }
        Ok(Expr::Map(Map { entries }))
    }

    fn parse_struct(&mut self) -> PResult<Expr> {
        let fields = if self.next_if_token(&Token::Lt) {
            self.parse_angle_bracket_fields()?
        } else {
            vec![]
        };
        self.expect_token(&Token::LParen)?;
        let mut values = vec![];
        if !self.next_if_token(&Token::RParen) {
            values = self.parse_comma_separated(|p| {
                let expr = p.parse_expr()?;
                if p.next_if_keyword("AS") {
                    let name = p.parse_identifier()?;
                    return Ok(Expr::Named {
                        expr: Box::new(expr),
                        name,
                    });
                }
                Ok(expr)
            })?;
            self.expect_token(&Token::RParen)?;
        }
        Ok(Expr::Struct { values, fields })
    }

    /// Called after `[`.
    fn parse_subscript(&mut self) -> PResult<Subscript> {
        let lower_bound = match self.peek_token() {
            Token::Colon => None,
            _ => {
                let index = self.parse_expr()?;
                if self.next_if_token(&Token::RBracket) {
                    return Ok(Subscript::Index { index });
                }
                Some(index)
            }
        };
        self.expect_token(&Token::Colon)?;
        let upper_bound = match self.peek_token() {
            Token::RBracket | Token::Colon => None,
            _ => Some(self.parse_expr()?),
        };
        let stride = if self.next_if_token(&Token::Colon) && self.peek_token() != &Token::RBracket
        {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_token(&Token::RBracket)?;
        Ok(Subscript::Slice {
            lower_bound,
            upper_bound,
            stride,
        })
    }

    /// Called with the function name consumed and `(` next.
    fn parse_function(&mut self, name: ObjectName) -> PResult<Expr> {
        self.expect_token(&Token::LParen)?;
        let args = if self.peek_subquery() {
            let query = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            FunctionArguments::Subquery(Box::new(query))
        } else {
            FunctionArguments::List(self.parse_function_argument_list()?)
        };

        let within_group = if self.next_if_keywords(&["WITHIN", "GROUP"]) {
            self.expect_token(&Token::LParen)?;
            self.expect_keywords(&["ORDER", "BY"])?;
            let order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
            self.expect_token(&Token::RParen)?;
            order_by
        } else {
            vec![]
        };

        let filter = if self.peek_keyword("FILTER") && self.peek_nth(1).token == Token::LParen {
            self.index += 2;
            self.expect_keyword("WHERE")?;
            let filter = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            Some(Box::new(filter))
        } else {
            None
        };

        let null_treatment = self.parse_null_treatment();

        let over = if self.next_if_keyword("OVER") {
            if self.next_if_token(&Token::LParen) {
                Some(WindowType::WindowSpec(self.parse_window_spec()?))
            } else {
                Some(WindowType::NamedWindow(self.parse_identifier()?))
            }
        } else {
            None
        };

        Ok(Expr::Function(Function {
            name,
            args,
            within_group,
            filter,
            null_treatment,
            over,
        }))
    }

    fn parse_null_treatment(&mut self) -> Option<NullTreatment> {
        if self.next_if_keywords(&["IGNORE", "NULLS"]) {
            Some(NullTreatment::IgnoreNulls)
        } else if self.next_if_keywords(&["RESPECT", "NULLS"]) {
            Some(NullTreatment::RespectNulls)
        } else {
            None
        }
    }

    /// Called after `(`; consumes the closing `)`.
    fn parse_function_argument_list(&mut self) -> PResult<FunctionArgumentList> {
        let mut list = FunctionArgumentList {
            duplicate_treatment: None,
            args: vec![],
            clauses: vec![],
        };
        if self.next_if_token(&Token::RParen) {
            return Ok(list);
        }
        if self.next_if_keyword("DISTINCT") {
            list.duplicate_treatment = Some(DuplicateTreatment::Distinct);
        } else if self.next_if_keyword("ALL") {
            list.duplicate_treatment = Some(DuplicateTreatment::All);
        }
        if !self.peek_keyword("ORDER") {
            list.args = self.parse_comma_separated(Parser::parse_function_arg)?;
        }
        loop {
            if self.next_if_keywords(&["ORDER", "BY"]) {
                let order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
                list.clauses.push(FunctionArgumentClause::OrderBy(order_by));
            } else if self.next_if_keyword("LIMIT") {
                list.clauses
                    .push(FunctionArgumentClause::Limit(self.parse_expr()?));
            } else if self.next_if_keyword("SEPARATOR") {
                list.clauses
                    .push(FunctionArgumentClause::Separator(self.parse_value()?));
            } else if let Some(treatment) = self.parse_null_treatment() {
                list.clauses
                    .push(FunctionArgumentClause::IgnoreOrRespectNulls(treatment));
            } else {
                break;
            }
        }
        self.expect_token(&Token::RParen)?;
        Ok(list)
    }

    pub(super) fn parse_function_arg(&mut self) -> PResult<FunctionArg> {
        let operator = if self.peek_token().word().is_some() {
            match self.peek_nth(1).token {
                Token::RArrow => Some(FunctionArgOperator::RightArrow),
                Token::Assignment => Some(FunctionArgOperator::Assignment),
                _ => None,
            }
        } else {
            None
        };
        if let Some(operator) = operator {
            let name = self.parse_identifier()?;
            self.index += 1;
            return Ok(FunctionArg::Named {
                name,
                arg: self.parse_function_arg_expr()?,
                operator,
            });
        }
        Ok(FunctionArg::Unnamed(self.parse_function_arg_expr()?))
    }

    fn parse_function_arg_expr(&mut self) -> PResult<FunctionArgExpr> {
        if self.next_if_token(&Token::Mul) {
            return Ok(FunctionArgExpr::Wildcard);
        }
        if let Some(prefix) = self.parse_qualified_wildcard()? {
            return Ok(FunctionArgExpr::QualifiedWildcard(prefix));
        }
        if let Some(lambda) = self.parse_lambda()? {
            return Ok(FunctionArgExpr::Expr(lambda));
        }
        Ok(FunctionArgExpr::Expr(self.parse_expr()?))
    }

    /// `a.b.*`, returning the `a.b` prefix. Leaves the position alone when
    /// the tokens do not spell a qualified wildcard.
    pub(super) fn parse_qualified_wildcard(&mut self) -> PResult<Option<ObjectName>> {
        let mut n = 0;
        loop {
            if self.peek_nth(n).token.word().is_none() || self.peek_nth(n + 1).token != Token::Period
            {
                return Ok(None);
            }
            if self.peek_nth(n + 2).token == Token::Mul {
                break;
            }
            n += 2;
        }
        let mut idents = vec![self.parse_identifier()?];
        while self.next_if_token(&Token::Period) {
            if self.next_if_token(&Token::Mul) {
                break;
            }
            idents.push(self.parse_identifier()?);
        }
        Ok(Some(ObjectName::from_idents(idents)))
    }

    /// Offset of the `->` ending a lambda parameter list, if one starts
    /// here.
    fn lambda_arrow_offset(&self) -> Option<usize> {
        if self.peek_token().word().is_some() {
            return (self.peek_nth(1).token == Token::Arrow).then_some(1);
        }
        if self.peek_token() != &Token::LParen {
            return None;
        }
        let mut n = 1;
        loop {
            self.peek_nth(n).token.word()?;
            match self.peek_nth(n + 1).token {
                Token::Comma => n += 2,
                Token::RParen => break,
                _ => return None,
            }
        }
        (self.peek_nth(n + 2).token == Token::Arrow).then_some(n + 2)
    }

    /// `x -> body` or `(x, y) -> body`. In dialects that also have JSON
    /// arrows a literal right of `->` keeps the JSON reading.
    fn parse_lambda(&mut self) -> PResult<Option<Expr>> {
        if !self.dialect.supports_lambda_functions() {
            return Ok(None);
        }
        let arrow = match self.lambda_arrow_offset() {
            Some(arrow) => arrow,
            None => return Ok(None),
        };
        if self.dialect.supports_json_arrows() && self.peek_nth(arrow + 1).token.to_value().is_some()
        {
            return Ok(None);
        }
        let params = if self.next_if_token(&Token::LParen) {
            let params = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RParen)?;
            OneOrManyWithParens::Many(params)
        } else {
            OneOrManyWithParens::One(self.parse_identifier()?)
        };
        self.expect_token(&Token::Arrow)?;
        let body = self.parse_expr()?;
        Ok(Some(Expr::Lambda(LambdaFunction {
            params,
            body: Box::new(body),
        })))
    }

    pub(super) fn parse_order_by_expr(&mut self) -> PResult<OrderByExpr> {
        let expr = self.parse_expr()?;
        Ok(OrderByExpr {
            expr,
            options: self.parse_order_by_options(),
        })
    }

    pub(super) fn parse_order_by_options(&mut self) -> OrderByOptions {
        let asc = if self.next_if_keyword("ASC") {
            Some(true)
        } else if self.next_if_keyword("DESC") {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.next_if_keywords(&["NULLS", "FIRST"]) {
            Some(true)
        } else if self.next_if_keywords(&["NULLS", "LAST"]) {
            Some(false)
        } else {
            None
        };
        OrderByOptions { asc, nulls_first }
    }

    /// Called after `(`; consumes the closing `)`.
    pub(super) fn parse_window_spec(&mut self) -> PResult<WindowSpec> {
        let mut spec = WindowSpec::default();
        let starts_clause = ["PARTITION", "ORDER", "ROWS", "RANGE", "GROUPS"]
            .iter()
            .any(|kw| self.peek_keyword(kw));
        if !starts_clause && self.peek_token().word().is_some() {
            spec.window_name = Some(self.parse_identifier()?);
        }
        if self.next_if_keywords(&["PARTITION", "BY"]) {
            spec.partition_by = self.parse_comma_separated(Parser::parse_expr)?;
        }
        if self.next_if_keywords(&["ORDER", "BY"]) {
            spec.order_by = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        }
        if let Some(units) = self.next_if_one_of(&["ROWS", "RANGE", "GROUPS"]) {
            let units = match units {
                "ROWS" => WindowFrameUnits::Rows,
                "RANGE" => WindowFrameUnits::Range,
                _ => WindowFrameUnits::Groups,
            };
            let frame = if self.next_if_keyword("BETWEEN") {
                let start_bound = self.parse_window_frame_bound()?;
                self.expect_keyword("AND")?;
                WindowFrame {
                    units,
                    start_bound,
                    end_bound: Some(self.parse_window_frame_bound()?),
                }
            } else {
                WindowFrame {
                    units,
                    start_bound: self.parse_window_frame_bound()?,
                    end_bound: None,
                }
            };
            spec.window_frame = Some(frame);
        }
        self.expect_token(&Token::RParen)?;
        Ok(spec)
    }

    fn parse_window_frame_bound(&mut self) -> PResult<WindowFrameBound> {
        if self.next_if_keywords(&["CURRENT", "ROW"]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        let offset = if self.next_if_keyword("UNBOUNDED") {
            None
        } else {
            Some(Box::new(self.parse_subexpr(AND_PREC)?))
        };
        if self.next_if_keyword("PRECEDING") {
            Ok(WindowFrameBound::Preceding(offset))
        } else if self.next_if_keyword("FOLLOWING") {
            Ok(WindowFrameBound::Following(offset))
        } else {
            self.expected("PRECEDING or FOLLOWING")
        }
    }

    /// One element of `GROUP BY`, including `GROUPING SETS`, `CUBE` and
    /// `ROLLUP`.
    pub(super) fn parse_group_by_expr(&mut self) -> PResult<Expr> {
        if self.peek_keyword("GROUPING")
            && self.peek_nth_keyword(1, "SETS")
            && self.peek_nth(2).token == Token::LParen
        {
            self.index += 3;
            let sets = self.parse_comma_separated(Parser::parse_grouping_set)?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::GroupingSets(sets));
        }
        if self.peek_nth(1).token == Token::LParen {
            if let Some(kw) = self.next_if_one_of(&["CUBE", "ROLLUP"]) {
                self.index += 1;
                let sets = self.parse_comma_separated(Parser::parse_grouping_set)?;
                self.expect_token(&Token::RParen)?;
                return Ok(if kw == "CUBE" {
                    Expr::Cube(sets)
                } else {
                    Expr::Rollup(sets)
                });
            }
        }
        self.parse_expr()
    }

    /// `(a, b)`, `()` or a single expression.
    fn parse_grouping_set(&mut self) -> PResult<Vec<Expr>> {
        if self.next_if_token(&Token::LParen) {
            if self.next_if_token(&Token::RParen) {
                return Ok(vec![]);
            }
            let set = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            return Ok(set);
        }
        Ok(vec![self.parse_expr()?])
    }
}

fn is_comparison(op: BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::Gt
            | BinaryOperator::LtEq
            | BinaryOperator::GtEq
    )
}

fn push_access(root: Expr, access: AccessExpr) -> Expr {
    match root {
        Expr::CompoundFieldAccess {
            root,
            mut access_chain,
        } => {
            access_chain.push(access);
            Expr::CompoundFieldAccess { root, access_chain }
        }
        other => Expr::CompoundFieldAccess {
            root: Box::new(other),
            access_chain: vec![access],
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        BinaryOperator, Expr, SelectItem, SetExpr, Statement, UnaryOperator, Value,
    };
    use crate::dialect::Dialect;
    use crate::parser::parse_sql;

    fn projection(dialect: Dialect, sql: &str) -> Expr {
        let statements = parse_sql(dialect, &format!("SELECT {}", sql), 50).unwrap();
        let query = match &statements[0] {
            Statement::Query(query) => query,
            other => panic!("not a query: {:?}", other),
        };
        let select = match query.body.as_ref() {
            SetExpr::Select(select) => select,
            other => panic!("not a select: {:?}", other),
        };
        match &select.projection[0] {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => expr.clone(),
            other => panic!("not an expression: {:?}", other),
        }
    }

    fn expr(sql: &str) -> Expr {
        projection(Dialect::Generic, sql)
    }

    #[test]
    fn multiplication_binds_tighter() {
        match expr("1 + 2 * 3") {
            Expr::BinaryOp { op, right, .. } => {
                assert_eq!(BinaryOperator::Plus, op);
                assert!(matches!(
                    *right,
                    Expr::BinaryOp {
                        op: BinaryOperator::Multiply,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        match expr("a OR b AND c") {
            Expr::BinaryOp { op, right, .. } => {
                assert_eq!(BinaryOperator::Or, op);
                assert!(matches!(
                    *right,
                    Expr::BinaryOp {
                        op: BinaryOperator::And,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!("a - b - c", expr("a - b - c").to_string());
        match expr("a - b - c") {
            Expr::BinaryOp { left, .. } => assert!(matches!(*left, Expr::BinaryOp { .. })),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unary_minus_binds_to_operand() {
        match expr("-a * b") {
            Expr::BinaryOp { left, op, .. } => {
                assert_eq!(BinaryOperator::Multiply, op);
                assert!(matches!(
                    *left,
                    Expr::UnaryOp {
                        op: UnaryOperator::Minus,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn nested_minus_keeps_a_gap() {
        for sql in ["- -1", "- - a", "-(-a)", "- -a * -b", "1 - -2", "- +a"] {
            let parsed = expr(sql);
            let printed = parsed.to_string();
            assert!(!printed.contains("--"), "{} printed as {}", sql, printed);
            assert_eq!(parsed, expr(&printed), "{}", sql);
        }
        assert_eq!("- -1", expr("- -1").to_string());
        assert_eq!("-a", expr("- a").to_string());
    }

    #[test]
    fn not_covers_comparison() {
        match expr("NOT a = 1") {
            Expr::UnaryOp { op, expr } => {
                assert_eq!(UnaryOperator::Not, op);
                assert!(matches!(*expr, Expr::BinaryOp { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negated_predicates() {
        assert!(matches!(expr("a NOT IN (1, 2)"), Expr::InList { negated: true, .. }));
        assert!(matches!(
            expr("a NOT BETWEEN 1 AND 2"),
            Expr::Between { negated: true, .. }
        ));
        assert!(matches!(expr("a NOT LIKE 'x'"), Expr::Like { negated: true, .. }));
        assert!(matches!(
            expr("NOT EXISTS (SELECT 1)"),
            Expr::Exists { negated: true, .. }
        ));
        assert!(matches!(expr("a IS NOT DISTINCT FROM b"), Expr::IsNotDistinctFrom(..)));
    }

    #[test]
    fn quantified_comparison() {
        match expr("a = ANY(SELECT b FROM t)") {
            Expr::AnyOp { right, is_some, .. } => {
                assert!(!is_some);
                assert!(matches!(*right, Expr::Subquery(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(expr("a > ALL(SELECT b FROM t)"), Expr::AllOp { .. }));
    }

    #[test]
    fn literals_keep_their_text() {
        match expr("123.4500") {
            Expr::Value(v) => assert_eq!(Value::Number("123.4500".into(), false), v.value),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!("E'a\\nb'", projection(Dialect::PostgreSql, "E'a\\nb'").to_string());
    }

    #[test]
    fn typed_strings_backtrack() {
        assert!(matches!(expr("DATE '2020-01-01'"), Expr::TypedString { .. }));
        assert!(matches!(expr("date"), Expr::Identifier(_)));
        assert_eq!(
            "TIMESTAMP WITH TIME ZONE '2020-01-01 00:00:00'",
            expr("timestamp with time zone '2020-01-01 00:00:00'").to_string()
        );
    }

    #[test]
    fn access_chains() {
        let e = projection(Dialect::PostgreSql, "(a).b[1][2:3]");
        assert_eq!("(a).b[1][2:3]", e.to_string());
        match e {
            Expr::CompoundFieldAccess { access_chain, .. } => assert_eq!(3, access_chain.len()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn lambda_only_in_function_arguments() {
        let e = projection(Dialect::ClickHouse, "arrayFilter((x, i) -> x > i, arr, idx)");
        assert_eq!("arrayFilter((x, i) -> x > i, arr, idx)", e.to_string());
        let json = projection(Dialect::Generic, "f(data -> 'a')");
        assert_eq!("f(data -> 'a')", json.to_string());
        assert!(parse_sql(Dialect::ClickHouse, "SELECT x -> x", 50).is_err());
    }

    #[test]
    fn special_function_forms() {
        for sql in [
            "CAST(a AS VARCHAR(10))",
            "TRY_CAST(a AS INT)",
            "EXTRACT(MONTH FROM d)",
            "POSITION('a' IN s)",
            "SUBSTRING(s FROM 2 FOR 3)",
            "SUBSTRING(s, 2, 3)",
            "TRIM(LEADING 'x' FROM s)",
            "TRIM('x' FROM s)",
            "OVERLAY(s PLACING 'ab' FROM 2 FOR 3)",
            "CASE a WHEN 1 THEN 'one' END",
            "INTERVAL '1-2' YEAR TO MONTH",
            "ARRAY[1, 2, 3]",
            "MAP {'a': 1}",
            "CURRENT_TIMESTAMP",
            "string_agg(DISTINCT name, ',' ORDER BY name)",
            "percentile_cont(0.5) WITHIN GROUP (ORDER BY x)",
            "first_value(x) IGNORE NULLS OVER w",
            "STRUCT<a INT64>(1)",
            "STRUCT(1 AS a, 'x')",
            "a COLLATE \"C\"",
            "ts AT TIME ZONE 'UTC'",
            "f(name => 1)",
        ] {
            assert_eq!(sql, expr(sql).to_string(), "{}", sql);
        }
    }

    #[test]
    fn dialect_specific_operators() {
        assert!(matches!(
            projection(Dialect::PostgreSql, "a ^ b"),
            Expr::BinaryOp {
                op: BinaryOperator::PGExp,
                ..
            }
        ));
        assert!(matches!(
            projection(Dialect::MySql, "a ^ b"),
            Expr::BinaryOp {
                op: BinaryOperator::BitwiseXor,
                ..
            }
        ));
        assert!(matches!(
            projection(Dialect::MySql, "a DIV b"),
            Expr::BinaryOp {
                op: BinaryOperator::MyIntegerDivide,
                ..
            }
        ));
        assert_eq!(
            "CONVERT(INT, x, 1)",
            projection(Dialect::MsSql, "CONVERT(INT, x, 1)").to_string()
        );
        assert_eq!(
            "CONVERT(x USING utf8mb4)",
            projection(Dialect::MySql, "CONVERT(x USING utf8mb4)").to_string()
        );
    }

    #[test]
    fn reserved_words_do_not_start_expressions() {
        assert!(parse_sql(Dialect::Generic, "SELECT FROM t", 50).is_err());
        assert!(parse_sql(Dialect::Generic, "SELECT left(s, 2) FROM t", 50).is_ok());
    }
}
