use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::{display_comma_separated, display_separated};
use super::{DataType, Ident, ObjectName, OrderByExpr, Query, StructField, Value, ValueWithSpan};

/// An SQL expression of any type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Identifier e.g. table name or column name
    Identifier(Ident),
    /// Multi-part identifier, e.g. `table_alias.column` or `schema.table.col`
    CompoundIdentifier(Vec<Ident>),
    /// Field or subscript access on an arbitrary expression, e.g.
    /// `arr[1].field` or `(expr).field`
    CompoundFieldAccess {
        root: Box<Expr>,
        access_chain: Vec<AccessExpr>,
    },
    IsFalse(Box<Expr>),
    IsNotFalse(Box<Expr>),
    IsTrue(Box<Expr>),
    IsNotTrue(Box<Expr>),
    IsNull(Box<Expr>),
    IsNotNull(Box<Expr>),
    IsUnknown(Box<Expr>),
    IsNotUnknown(Box<Expr>),
    IsDistinctFrom(Box<Expr>, Box<Expr>),
    IsNotDistinctFrom(Box<Expr>, Box<Expr>),
    /// `[ NOT ] IN (val1, val2, ...)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `[ NOT ] IN (SELECT ...)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    /// `<expr> [ NOT ] BETWEEN <low> AND <high>`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Like {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<Value>,
    },
    ILike {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<Value>,
    },
    SimilarTo {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<Value>,
    },
    /// MySQL `REGEXP` / `RLIKE`
    RLike {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        regexp: bool,
    },
    /// `left op ANY (right)` or `left op SOME (right)`
    AnyOp {
        left: Box<Expr>,
        compare_op: BinaryOperator,
        right: Box<Expr>,
        is_some: bool,
    },
    /// `left op ALL (right)`
    AllOp {
        left: Box<Expr>,
        compare_op: BinaryOperator,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    /// `CONVERT(expr, type)`, `CONVERT(type, expr [, style])` or
    /// `CONVERT(expr USING charset)`
    Convert {
        is_try: bool,
        expr: Box<Expr>,
        data_type: Option<DataType>,
        charset: Option<ObjectName>,
        target_before_value: bool,
        styles: Vec<Expr>,
    },
    Cast {
        kind: CastKind,
        expr: Box<Expr>,
        data_type: DataType,
        format: Option<CastFormat>,
    },
    AtTimeZone {
        timestamp: Box<Expr>,
        time_zone: Box<Expr>,
    },
    Extract {
        field: DateTimeField,
        syntax: ExtractSyntax,
        expr: Box<Expr>,
    },
    /// `POSITION(<expr> IN <expr>)`
    Position {
        expr: Box<Expr>,
        r#in: Box<Expr>,
    },
    /// `SUBSTRING(<expr> [FROM <expr>] [FOR <expr>])`, or the comma form
    /// when `special` is set
    Substring {
        expr: Box<Expr>,
        substring_from: Option<Box<Expr>>,
        substring_for: Option<Box<Expr>>,
        special: bool,
    },
    /// `TRIM([BOTH | LEADING | TRAILING] [<what> FROM] <expr>)` or
    /// `TRIM(<expr>, <characters>)`
    Trim {
        expr: Box<Expr>,
        trim_where: Option<TrimWhereField>,
        trim_what: Option<Box<Expr>>,
        trim_characters: Option<Vec<Expr>>,
    },
    /// `OVERLAY(<expr> PLACING <expr> FROM <expr> [FOR <expr>])`
    Overlay {
        expr: Box<Expr>,
        overlay_what: Box<Expr>,
        overlay_from: Box<Expr>,
        overlay_for: Option<Box<Expr>>,
    },
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    /// Parenthesized expression
    Nested(Box<Expr>),
    Value(ValueWithSpan),
    /// A literal preceded by its type, e.g. `DATE '2020-01-01'`
    TypedString {
        data_type: DataType,
        value: ValueWithSpan,
    },
    Function(Function),
    /// `CASE [<operand>] WHEN <condition> THEN <result> ... [ELSE <result>] END`
    Case {
        operand: Option<Box<Expr>>,
        conditions: Vec<CaseWhen>,
        else_result: Option<Box<Expr>>,
    },
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    /// A parenthesized subquery used as a scalar
    Subquery(Box<Query>),
    GroupingSets(Vec<Vec<Expr>>),
    Cube(Vec<Vec<Expr>>),
    Rollup(Vec<Vec<Expr>>),
    Tuple(Vec<Expr>),
    /// BigQuery `STRUCT<...>(...)` or `STRUCT(...)`
    Struct {
        values: Vec<Expr>,
        fields: Vec<StructField>,
    },
    /// A value named inside a struct literal, `expr AS name`
    Named {
        expr: Box<Expr>,
        name: Ident,
    },
    Array(Array),
    Map(Map),
    Interval(Interval),
    /// `x -> x + 1` or `(x, y) -> x + y`
    Lambda(LambdaFunction),
}

impl Expr {
    pub fn value(value: Value) -> Self {
        Expr::Value(value.with_empty_span())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::CompoundIdentifier(parts) => write!(f, "{}", display_separated(parts, ".")),
            Expr::CompoundFieldAccess { root, access_chain } => {
                write!(f, "{}", root)?;
                for access in access_chain {
                    write!(f, "{}", access)?;
                }
                Ok(())
            }
            Expr::IsFalse(e) => write!(f, "{} IS FALSE", e),
            Expr::IsNotFalse(e) => write!(f, "{} IS NOT FALSE", e),
            Expr::IsTrue(e) => write!(f, "{} IS TRUE", e),
            Expr::IsNotTrue(e) => write!(f, "{} IS NOT TRUE", e),
            Expr::IsNull(e) => write!(f, "{} IS NULL", e),
            Expr::IsNotNull(e) => write!(f, "{} IS NOT NULL", e),
            Expr::IsUnknown(e) => write!(f, "{} IS UNKNOWN", e),
            Expr::IsNotUnknown(e) => write!(f, "{} IS NOT UNKNOWN", e),
            Expr::IsDistinctFrom(a, b) => write!(f, "{} IS DISTINCT FROM {}", a, b),
            Expr::IsNotDistinctFrom(a, b) => write!(f, "{} IS NOT DISTINCT FROM {}", a, b),
            Expr::InList {
                expr,
                list,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                expr,
                if *negated { "NOT " } else { "" },
                display_comma_separated(list)
            ),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                expr,
                if *negated { "NOT " } else { "" },
                subquery
            ),
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => write!(
                f,
                "{} {}BETWEEN {} AND {}",
                expr,
                if *negated { "NOT " } else { "" },
                low,
                high
            ),
            Expr::BinaryOp { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            } => format_pattern_match(f, expr, *negated, "LIKE", pattern, escape_char),
            Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            } => format_pattern_match(f, expr, *negated, "ILIKE", pattern, escape_char),
            Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            } => format_pattern_match(f, expr, *negated, "SIMILAR TO", pattern, escape_char),
            Expr::RLike {
                negated,
                expr,
                pattern,
                regexp,
            } => write!(
                f,
                "{} {}{} {}",
                expr,
                if *negated { "NOT " } else { "" },
                if *regexp { "REGEXP" } else { "RLIKE" },
                pattern
            ),
            Expr::AnyOp {
                left,
                compare_op,
                right,
                is_some,
            } => {
                write!(f, "{} {} {}(", left, compare_op, if *is_some { "SOME" } else { "ANY" })?;
                format_unwrapped_subquery(f, right)?;
                f.write_str(")")
            }
            Expr::AllOp {
                left,
                compare_op,
                right,
            } => {
                write!(f, "{} {} ALL(", left, compare_op)?;
                format_unwrapped_subquery(f, right)?;
                f.write_str(")")
            }
            Expr::UnaryOp { op, expr } => match op {
                UnaryOperator::Not => write!(f, "NOT {}", expr),
                // `--` would start a line comment.
                UnaryOperator::Minus => {
                    let operand = expr.to_string();
                    let gap = if operand.starts_with('-') { " " } else { "" };
                    write!(f, "-{}{}", gap, operand)
                }
                _ => write!(f, "{}{}", op, expr),
            },
            Expr::Convert {
                is_try,
                expr,
                data_type,
                charset,
                target_before_value,
                styles,
            } => {
                write!(f, "{}CONVERT(", if *is_try { "TRY_" } else { "" })?;
                match (data_type, charset) {
                    (Some(data_type), _) if *target_before_value => {
                        write!(f, "{}, {}", data_type, expr)?
                    }
                    (Some(data_type), Some(charset)) => {
                        write!(f, "{}, {} CHARACTER SET {}", expr, data_type, charset)?
                    }
                    (Some(data_type), None) => write!(f, "{}, {}", expr, data_type)?,
                    (None, Some(charset)) => write!(f, "{} USING {}", expr, charset)?,
                    (None, None) => write!(f, "{}", expr)?,
                }
                if !styles.is_empty() {
                    write!(f, ", {}", display_comma_separated(styles))?;
                }
                f.write_str(")")
            }
            Expr::Cast {
                kind,
                expr,
                data_type,
                format,
            } => {
                let format = match format {
                    Some(format) => format!(" FORMAT {}", format),
                    None => String::new(),
                };
                match kind {
                    CastKind::Cast => write!(f, "CAST({} AS {}{})", expr, data_type, format),
                    CastKind::TryCast => {
                        write!(f, "TRY_CAST({} AS {}{})", expr, data_type, format)
                    }
                    CastKind::SafeCast => {
                        write!(f, "SAFE_CAST({} AS {}{})", expr, data_type, format)
                    }
                    CastKind::DoubleColon => write!(f, "{}::{}", expr, data_type),
                }
            }
            Expr::AtTimeZone {
                timestamp,
                time_zone,
            } => write!(f, "{} AT TIME ZONE {}", timestamp, time_zone),
            Expr::Extract {
                field,
                syntax,
                expr,
            } => match syntax {
                ExtractSyntax::From => write!(f, "EXTRACT({} FROM {})", field, expr),
                ExtractSyntax::Comma => write!(f, "EXTRACT({}, {})", field, expr),
            },
            Expr::Position { expr, r#in } => write!(f, "POSITION({} IN {})", expr, r#in),
            Expr::Substring {
                expr,
                substring_from,
                substring_for,
                special,
            } => {
                write!(f, "SUBSTRING({}", expr)?;
                if let Some(from) = substring_from {
                    if *special {
                        write!(f, ", {}", from)?;
                    } else {
                        write!(f, " FROM {}", from)?;
                    }
                }
                if let Some(r#for) = substring_for {
                    if *special {
                        write!(f, ", {}", r#for)?;
                    } else {
                        write!(f, " FOR {}", r#for)?;
                    }
                }
                f.write_str(")")
            }
            Expr::Trim {
                expr,
                trim_where,
                trim_what,
                trim_characters,
            } => {
                f.write_str("TRIM(")?;
                if let Some(trim_where) = trim_where {
                    write!(f, "{} ", trim_where)?;
                }
                match trim_what {
                    Some(what) => write!(f, "{} FROM {}", what, expr)?,
                    None if trim_where.is_some() => write!(f, "FROM {}", expr)?,
                    None => write!(f, "{}", expr)?,
                }
                if let Some(characters) = trim_characters {
                    write!(f, ", {}", display_comma_separated(characters))?;
                }
                f.write_str(")")
            }
            Expr::Overlay {
                expr,
                overlay_what,
                overlay_from,
                overlay_for,
            } => {
                write!(
                    f,
                    "OVERLAY({} PLACING {} FROM {}",
                    expr, overlay_what, overlay_from
                )?;
                if let Some(r#for) = overlay_for {
                    write!(f, " FOR {}", r#for)?;
                }
                f.write_str(")")
            }
            Expr::Collate { expr, collation } => write!(f, "{} COLLATE {}", expr, collation),
            Expr::Nested(expr) => write!(f, "({})", expr),
            Expr::Value(value) => write!(f, "{}", value),
            Expr::TypedString { data_type, value } => write!(f, "{} {}", data_type, value),
            Expr::Function(func) => write!(f, "{}", func),
            Expr::Case {
                operand,
                conditions,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {}", operand)?;
                }
                for when in conditions {
                    write!(f, " {}", when)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {}", else_result)?;
                }
                f.write_str(" END")
            }
            Expr::Exists { subquery, negated } => write!(
                f,
                "{}EXISTS ({})",
                if *negated { "NOT " } else { "" },
                subquery
            ),
            Expr::Subquery(query) => write!(f, "({})", query),
            Expr::GroupingSets(sets) => {
                f.write_str("GROUPING SETS (")?;
                let mut delim = "";
                for set in sets {
                    write!(f, "{}({})", delim, display_comma_separated(set))?;
                    delim = ", ";
                }
                f.write_str(")")
            }
            Expr::Cube(sets) => format_grouping_list(f, "CUBE", sets),
            Expr::Rollup(sets) => format_grouping_list(f, "ROLLUP", sets),
            Expr::Tuple(exprs) => write!(f, "({})", display_comma_separated(exprs)),
            Expr::Struct { values, fields } => {
                if fields.is_empty() {
                    write!(f, "STRUCT({})", display_comma_separated(values))
                } else {
                    write!(
                        f,
                        "STRUCT<{}>({})",
                        display_comma_separated(fields),
                        display_comma_separated(values)
                    )
                }
            }
            Expr::Named { expr, name } => write!(f, "{} AS {}", expr, name),
            Expr::Array(array) => write!(f, "{}", array),
            Expr::Map(map) => write!(f, "{}", map),
            Expr::Interval(interval) => write!(f, "{}", interval),
            Expr::Lambda(lambda) => write!(f, "{}", lambda),
        }
    }
}

fn format_pattern_match(
    f: &mut fmt::Formatter,
    expr: &Expr,
    negated: bool,
    keyword: &str,
    pattern: &Expr,
    escape_char: &Option<Value>,
) -> fmt::Result {
    write!(
        f,
        "{} {}{} {}",
        expr,
        if negated { "NOT " } else { "" },
        keyword,
        pattern
    )?;
    if let Some(escape) = escape_char {
        write!(f, " ESCAPE {}", escape)?;
    }
    Ok(())
}

fn format_unwrapped_subquery(f: &mut fmt::Formatter, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Subquery(query) => write!(f, "{}", query),
        other => write!(f, "{}", other),
    }
}

fn format_grouping_list(f: &mut fmt::Formatter, keyword: &str, sets: &[Vec<Expr>]) -> fmt::Result {
    write!(f, "{} (", keyword)?;
    let mut delim = "";
    for set in sets {
        f.write_str(delim)?;
        if set.len() == 1 {
            write!(f, "{}", set[0])?;
        } else {
            write!(f, "({})", display_comma_separated(set))?;
        }
        delim = ", ";
    }
    f.write_str(")")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    /// `~`
    BitwiseNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "NOT",
            UnaryOperator::BitwiseNot => "~",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    StringConcat,
    Gt,
    Lt,
    GtEq,
    LtEq,
    /// `<=>`
    Spaceship,
    Eq,
    NotEq,
    And,
    Or,
    Xor,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    /// MySQL `DIV`
    MyIntegerDivide,
    /// Postgres `^`
    PGExp,
    PGBitwiseShiftLeft,
    PGBitwiseShiftRight,
    /// `~`
    PGRegexMatch,
    /// `~*`
    PGRegexIMatch,
    /// `!~`
    PGRegexNotMatch,
    /// `!~*`
    PGRegexNotIMatch,
    /// `->`
    Arrow,
    /// `->>`
    LongArrow,
    /// `#>`
    HashArrow,
    /// `#>>`
    HashLongArrow,
    /// `@>`
    AtArrow,
    /// `<@`
    ArrowAt,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::StringConcat => "||",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lt => "<",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Spaceship => "<=>",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::MyIntegerDivide => "DIV",
            BinaryOperator::PGExp => "^",
            BinaryOperator::PGBitwiseShiftLeft => "<<",
            BinaryOperator::PGBitwiseShiftRight => ">>",
            BinaryOperator::PGRegexMatch => "~",
            BinaryOperator::PGRegexIMatch => "~*",
            BinaryOperator::PGRegexNotMatch => "!~",
            BinaryOperator::PGRegexNotIMatch => "!~*",
            BinaryOperator::Arrow => "->",
            BinaryOperator::LongArrow => "->>",
            BinaryOperator::HashArrow => "#>",
            BinaryOperator::HashLongArrow => "#>>",
            BinaryOperator::AtArrow => "@>",
            BinaryOperator::ArrowAt => "<@",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastKind {
    /// `CAST(expr AS type)`
    Cast,
    /// `TRY_CAST(expr AS type)`
    TryCast,
    /// BigQuery `SAFE_CAST(expr AS type)`
    SafeCast,
    /// `expr::type`
    DoubleColon,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastFormat {
    Value(Value),
    ValueAtTimeZone(Value, Value),
}

impl fmt::Display for CastFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CastFormat::Value(v) => write!(f, "{}", v),
            CastFormat::ValueAtTimeZone(v, tz) => write!(f, "{} AT TIME ZONE {}", v, tz),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractSyntax {
    From,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimWhereField {
    Both,
    Leading,
    Trailing,
}

impl fmt::Display for TrimWhereField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TrimWhereField::Both => "BOTH",
            TrimWhereField::Leading => "LEADING",
            TrimWhereField::Trailing => "TRAILING",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateTimeField {
    Year,
    Quarter,
    Month,
    Week(Option<Ident>),
    Day,
    DayOfWeek,
    DayOfYear,
    Date,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Century,
    Decade,
    Millennium,
    Dow,
    Doy,
    Epoch,
    Isodow,
    Isoyear,
    Julian,
    Time,
    Timezone,
    TimezoneHour,
    TimezoneMinute,
    Custom(Ident),
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DateTimeField::Year => "YEAR",
            DateTimeField::Quarter => "QUARTER",
            DateTimeField::Month => "MONTH",
            DateTimeField::Week(None) => "WEEK",
            DateTimeField::Week(Some(weekday)) => return write!(f, "WEEK({})", weekday),
            DateTimeField::Day => "DAY",
            DateTimeField::DayOfWeek => "DAYOFWEEK",
            DateTimeField::DayOfYear => "DAYOFYEAR",
            DateTimeField::Date => "DATE",
            DateTimeField::Hour => "HOUR",
            DateTimeField::Minute => "MINUTE",
            DateTimeField::Second => "SECOND",
            DateTimeField::Millisecond => "MILLISECOND",
            DateTimeField::Microsecond => "MICROSECOND",
            DateTimeField::Nanosecond => "NANOSECOND",
            DateTimeField::Century => "CENTURY",
            DateTimeField::Decade => "DECADE",
            DateTimeField::Millennium => "MILLENNIUM",
            DateTimeField::Dow => "DOW",
            DateTimeField::Doy => "DOY",
            DateTimeField::Epoch => "EPOCH",
            DateTimeField::Isodow => "ISODOW",
            DateTimeField::Isoyear => "ISOYEAR",
            DateTimeField::Julian => "JULIAN",
            DateTimeField::Time => "TIME",
            DateTimeField::Timezone => "TIMEZONE",
            DateTimeField::TimezoneHour => "TIMEZONE_HOUR",
            DateTimeField::TimezoneMinute => "TIMEZONE_MINUTE",
            DateTimeField::Custom(ident) => return write!(f, "{}", ident),
        })
    }
}

/// One step of a [`Expr::CompoundFieldAccess`] chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessExpr {
    /// `.field`
    Dot(Expr),
    /// `[index]` or `[lower:upper]`
    Subscript(Subscript),
}

impl fmt::Display for AccessExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AccessExpr::Dot(expr) => write!(f, ".{}", expr),
            AccessExpr::Subscript(subscript) => write!(f, "[{}]", subscript),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subscript {
    Index {
        index: Expr,
    },
    Slice {
        lower_bound: Option<Expr>,
        upper_bound: Option<Expr>,
        stride: Option<Expr>,
    },
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Subscript::Index { index } => write!(f, "{}", index),
            Subscript::Slice {
                lower_bound,
                upper_bound,
                stride,
            } => {
                if let Some(lower) = lower_bound {
                    write!(f, "{}", lower)?;
                }
                f.write_str(":")?;
                if let Some(upper) = upper_bound {
                    write!(f, "{}", upper)?;
                }
                if let Some(stride) = stride {
                    write!(f, ":{}", stride)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

impl fmt::Display for CaseWhen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.result)
    }
}

/// An array literal, `ARRAY[1, 2]` when `named`, otherwise `[1, 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Array {
    pub elem: Vec<Expr>,
    pub named: bool,
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            if self.named { "ARRAY" } else { "" },
            display_comma_separated(&self.elem)
        )
    }
}

/// A map literal, `MAP {'k': v, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Map {
    pub entries: Vec<MapEntry>,
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MAP {{{}}}", display_comma_separated(&self.entries))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

impl fmt::Display for MapEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// `INTERVAL '1' DAY`, `INTERVAL '1-2' YEAR TO MONTH`, `INTERVAL 5 MINUTE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub value: Box<Expr>,
    pub leading_field: Option<DateTimeField>,
    pub leading_precision: Option<u64>,
    pub last_field: Option<DateTimeField>,
    pub fractional_seconds_precision: Option<u64>,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "INTERVAL {}", self.value)?;
        if let Some(leading) = &self.leading_field {
            write!(f, " {}", leading)?;
        }
        if let Some(precision) = self.leading_precision {
            write!(f, " ({})", precision)?;
        }
        if let Some(last) = &self.last_field {
            write!(f, " TO {}", last)?;
        }
        if let Some(precision) = self.fractional_seconds_precision {
            write!(f, " ({})", precision)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LambdaFunction {
    pub params: OneOrManyWithParens<Ident>,
    pub body: Box<Expr>,
}

impl fmt::Display for LambdaFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.params, self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneOrManyWithParens<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: fmt::Display> fmt::Display for OneOrManyWithParens<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OneOrManyWithParens::One(value) => write!(f, "{}", value),
            OneOrManyWithParens::Many(values) => {
                write!(f, "({})", display_comma_separated(values))
            }
        }
    }
}

/// A function call, possibly an aggregate or window function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Function {
    pub name: ObjectName,
    pub args: FunctionArguments,
    /// `WITHIN GROUP (ORDER BY ...)`
    pub within_group: Vec<OrderByExpr>,
    /// `FILTER (WHERE ...)`
    pub filter: Option<Box<Expr>>,
    /// `IGNORE NULLS` / `RESPECT NULLS` written after the argument list
    pub null_treatment: Option<NullTreatment>,
    pub over: Option<WindowType>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.name, self.args)?;
        if !self.within_group.is_empty() {
            write!(
                f,
                " WITHIN GROUP (ORDER BY {})",
                display_comma_separated(&self.within_group)
            )?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {})", filter)?;
        }
        if let Some(null_treatment) = &self.null_treatment {
            write!(f, " {}", null_treatment)?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {}", over)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArguments {
    /// No parentheses at all, e.g. `CURRENT_TIMESTAMP`
    None,
    /// `fn(SELECT ...)`
    Subquery(Box<Query>),
    List(FunctionArgumentList),
}

impl fmt::Display for FunctionArguments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArguments::None => Ok(()),
            FunctionArguments::Subquery(query) => write!(f, "({})", query),
            FunctionArguments::List(list) => write!(f, "({})", list),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionArgumentList {
    pub duplicate_treatment: Option<DuplicateTreatment>,
    pub args: Vec<FunctionArg>,
    pub clauses: Vec<FunctionArgumentClause>,
}

impl fmt::Display for FunctionArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(treatment) = &self.duplicate_treatment {
            write!(f, "{} ", treatment)?;
        }
        write!(f, "{}", display_comma_separated(&self.args))?;
        if !self.clauses.is_empty() {
            if !self.args.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "{}", display_separated(&self.clauses, " "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArgumentClause {
    OrderBy(Vec<OrderByExpr>),
    Limit(Expr),
    IgnoreOrRespectNulls(NullTreatment),
    /// MySQL `GROUP_CONCAT(... SEPARATOR ',')`
    Separator(Value),
}

impl fmt::Display for FunctionArgumentClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArgumentClause::OrderBy(order_by) => {
                write!(f, "ORDER BY {}", display_comma_separated(order_by))
            }
            FunctionArgumentClause::Limit(limit) => write!(f, "LIMIT {}", limit),
            FunctionArgumentClause::IgnoreOrRespectNulls(n) => write!(f, "{}", n),
            FunctionArgumentClause::Separator(sep) => write!(f, "SEPARATOR {}", sep),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArg {
    Named {
        name: Ident,
        arg: FunctionArgExpr,
        operator: FunctionArgOperator,
    },
    Unnamed(FunctionArgExpr),
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArg::Named {
                name,
                arg,
                operator,
            } => write!(f, "{} {} {}", name, operator, arg),
            FunctionArg::Unnamed(arg) => write!(f, "{}", arg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArgExpr {
    Expr(Expr),
    /// `alias.*`
    QualifiedWildcard(ObjectName),
    /// `*`
    Wildcard,
}

impl fmt::Display for FunctionArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionArgExpr::Expr(expr) => write!(f, "{}", expr),
            FunctionArgExpr::QualifiedWildcard(prefix) => write!(f, "{}.*", prefix),
            FunctionArgExpr::Wildcard => f.write_str("*"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArgOperator {
    /// `name => value`
    RightArrow,
    /// `name = value`
    Equals,
    /// `name := value`
    Assignment,
}

impl fmt::Display for FunctionArgOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FunctionArgOperator::RightArrow => "=>",
            FunctionArgOperator::Equals => "=",
            FunctionArgOperator::Assignment => ":=",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicateTreatment {
    Distinct,
    All,
}

impl fmt::Display for DuplicateTreatment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DuplicateTreatment::Distinct => "DISTINCT",
            DuplicateTreatment::All => "ALL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullTreatment {
    IgnoreNulls,
    RespectNulls,
}

impl fmt::Display for NullTreatment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NullTreatment::IgnoreNulls => "IGNORE NULLS",
            NullTreatment::RespectNulls => "RESPECT NULLS",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowType {
    WindowSpec(WindowSpec),
    NamedWindow(Ident),
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowType::WindowSpec(spec) => write!(f, "({})", spec),
            WindowType::NamedWindow(name) => write!(f, "{}", name),
        }
    }
}

/// The body of an `OVER (...)` or `WINDOW w AS (...)` clause.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSpec {
    pub window_name: Option<Ident>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub window_frame: Option<WindowFrame>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut delim = "";
        if let Some(name) = &self.window_name {
            write!(f, "{}", name)?;
            delim = " ";
        }
        if !self.partition_by.is_empty() {
            write!(
                f,
                "{}PARTITION BY {}",
                delim,
                display_comma_separated(&self.partition_by)
            )?;
            delim = " ";
        }
        if !self.order_by.is_empty() {
            write!(
                f,
                "{}ORDER BY {}",
                delim,
                display_comma_separated(&self.order_by)
            )?;
            delim = " ";
        }
        if let Some(frame) = &self.window_frame {
            write!(f, "{}{}", delim, frame)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    /// Without an end bound the frame ends at the current row.
    pub end_bound: Option<WindowFrameBound>,
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.end_bound {
            Some(end) => write!(
                f,
                "{} BETWEEN {} AND {}",
                self.units, self.start_bound, end
            ),
            None => write!(f, "{} {}", self.units, self.start_bound),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFrameUnits {
    Rows,
    Range,
    Groups,
}

impl fmt::Display for WindowFrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            WindowFrameUnits::Rows => "ROWS",
            WindowFrameUnits::Range => "RANGE",
            WindowFrameUnits::Groups => "GROUPS",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFrameBound {
    CurrentRow,
    /// `<N> PRECEDING`, or `UNBOUNDED PRECEDING` without an offset
    Preceding(Option<Box<Expr>>),
    /// `<N> FOLLOWING`, or `UNBOUNDED FOLLOWING` without an offset
    Following(Option<Box<Expr>>),
}

impl fmt::Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowFrameBound::CurrentRow => f.write_str("CURRENT ROW"),
            WindowFrameBound::Preceding(None) => f.write_str("UNBOUNDED PRECEDING"),
            WindowFrameBound::Following(None) => f.write_str("UNBOUNDED FOLLOWING"),
            WindowFrameBound::Preceding(Some(n)) => write!(f, "{} PRECEDING", n),
            WindowFrameBound::Following(Some(n)) => write!(f, "{} FOLLOWING", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Identifier(Ident::new(name)))
    }

    #[test]
    fn predicates_display() {
        let between = Expr::Between {
            expr: ident("a"),
            negated: true,
            low: Box::new(Expr::value(Value::number("1"))),
            high: Box::new(Expr::value(Value::number("10"))),
        };
        assert_eq!("a NOT BETWEEN 1 AND 10", between.to_string());

        let like = Expr::Like {
            negated: false,
            expr: ident("name"),
            pattern: Box::new(Expr::value(Value::SingleQuotedString("a%".into()))),
            escape_char: Some(Value::SingleQuotedString("\\".into())),
        };
        assert_eq!("name LIKE 'a%' ESCAPE '\\'", like.to_string());
        assert_eq!("x IS NOT NULL", Expr::IsNotNull(ident("x")).to_string());
    }

    #[test]
    fn cast_display() {
        let cast = Expr::Cast {
            kind: CastKind::DoubleColon,
            expr: ident("x"),
            data_type: DataType::Text,
            format: None,
        };
        assert_eq!("x::TEXT", cast.to_string());
    }

    #[test]
    fn case_display() {
        let case = Expr::Case {
            operand: None,
            conditions: vec![CaseWhen {
                condition: Expr::BinaryOp {
                    left: ident("a"),
                    op: BinaryOperator::Gt,
                    right: Box::new(Expr::value(Value::number("0"))),
                },
                result: Expr::value(Value::SingleQuotedString("pos".into())),
            }],
            else_result: Some(Box::new(Expr::value(Value::Null))),
        };
        assert_eq!("CASE WHEN a > 0 THEN 'pos' ELSE NULL END", case.to_string());
    }

    #[test]
    fn window_function_display() {
        let func = Function {
            name: ObjectName::from_idents(vec![Ident::new("row_number")]),
            args: FunctionArguments::List(FunctionArgumentList {
                duplicate_treatment: None,
                args: vec![],
                clauses: vec![],
            }),
            within_group: vec![],
            filter: None,
            null_treatment: None,
            over: Some(WindowType::WindowSpec(WindowSpec {
                partition_by: vec![Expr::Identifier(Ident::new("dept"))],
                window_frame: Some(WindowFrame {
                    units: WindowFrameUnits::Rows,
                    start_bound: WindowFrameBound::Preceding(None),
                    end_bound: Some(WindowFrameBound::CurrentRow),
                }),
                ..Default::default()
            })),
        };
        assert_eq!(
            "row_number() OVER (PARTITION BY dept ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
            func.to_string()
        );
    }

    #[test]
    fn grouping_display() {
        let a = Expr::Identifier(Ident::new("a"));
        let b = Expr::Identifier(Ident::new("b"));
        let rollup = Expr::Rollup(vec![vec![a.clone()], vec![a.clone(), b.clone()]]);
        assert_eq!("ROLLUP (a, (a, b))", rollup.to_string());
        let sets = Expr::GroupingSets(vec![vec![a], vec![b], vec![]]);
        assert_eq!("GROUPING SETS ((a), (b), ())", sets.to_string());
    }
}
