use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::{display_comma_separated, display_separated};
use super::{Expr, FunctionArg, Ident, ObjectName, Statement, WindowSpec};

/// A full `SELECT`-like query: optional CTEs, a set-expression body and the
/// trailing ordering and row-limiting clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub with: Option<With>,
    pub body: Box<SetExpr>,
    pub order_by: Option<OrderBy>,
    pub limit_clause: Option<LimitClause>,
    pub fetch: Option<Fetch>,
    pub locks: Vec<LockClause>,
}

impl Query {
    /// Wraps a set expression with no surrounding clauses.
    pub fn from_body(body: SetExpr) -> Self {
        Query {
            with: None,
            body: Box::new(body),
            order_by: None,
            limit_clause: None,
            fetch: None,
            locks: vec![],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }
        write!(f, "{}", self.body)?;
        if let Some(order_by) = &self.order_by {
            write!(f, " {}", order_by)?;
        }
        if let Some(limit_clause) = &self.limit_clause {
            write!(f, " {}", limit_clause)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        for lock in &self.locks {
            write!(f, " {}", lock)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct With {
    pub recursive: bool,
    pub cte_tables: Vec<Cte>,
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "WITH {}{}",
            if self.recursive { "RECURSIVE " } else { "" },
            display_comma_separated(&self.cte_tables)
        )
    }
}

/// A single common table expression, `name [(cols)] AS (query)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cte {
    pub alias: TableAlias,
    pub query: Box<Query>,
    pub materialized: Option<CteAsMaterialized>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} AS ", self.alias)?;
        if let Some(materialized) = &self.materialized {
            write!(f, "{} ", materialized)?;
        }
        write!(f, "({})", self.query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CteAsMaterialized {
    Materialized,
    NotMaterialized,
}

impl fmt::Display for CteAsMaterialized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            CteAsMaterialized::Materialized => "MATERIALIZED",
            CteAsMaterialized::NotMaterialized => "NOT MATERIALIZED",
        })
    }
}

/// The body of a query: a select, a parenthesized query, a set operation or
/// a row source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetExpr {
    Select(Box<Select>),
    Query(Box<Query>),
    SetOperation {
        op: SetOperator,
        set_quantifier: SetQuantifier,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },
    Values(Values),
    Insert(Statement),
    Update(Statement),
    Delete(Statement),
    /// `TABLE name`
    Table(ObjectName),
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetExpr::Select(select) => write!(f, "{}", select),
            SetExpr::Query(query) => write!(f, "({})", query),
            SetExpr::SetOperation {
                op,
                set_quantifier,
                left,
                right,
            } => {
                write!(f, "{} {}", left, op)?;
                if *set_quantifier != SetQuantifier::None {
                    write!(f, " {}", set_quantifier)?;
                }
                write!(f, " {}", right)
            }
            SetExpr::Values(values) => write!(f, "{}", values),
            SetExpr::Insert(statement)
            | SetExpr::Update(statement)
            | SetExpr::Delete(statement) => write!(f, "{}", statement),
            SetExpr::Table(name) => write!(f, "TABLE {}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
    Minus,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SetOperator::Union => "UNION",
            SetOperator::Except => "EXCEPT",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Minus => "MINUS",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetQuantifier {
    All,
    Distinct,
    ByName,
    AllByName,
    DistinctByName,
    None,
}

impl fmt::Display for SetQuantifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SetQuantifier::All => "ALL",
            SetQuantifier::Distinct => "DISTINCT",
            SetQuantifier::ByName => "BY NAME",
            SetQuantifier::AllByName => "ALL BY NAME",
            SetQuantifier::DistinctByName => "DISTINCT BY NAME",
            SetQuantifier::None => "",
        })
    }
}

/// A restricted `SELECT` without `ORDER BY` and row limiting, which belong to
/// the enclosing [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Select {
    pub distinct: Option<Distinct>,
    /// MSSQL `TOP`
    pub top: Option<Top>,
    pub projection: Vec<SelectItem>,
    pub into: Option<SelectInto>,
    pub from: Vec<TableWithJoins>,
    pub selection: Option<Expr>,
    pub group_by: GroupByExpr,
    pub having: Option<Expr>,
    pub named_window: Vec<NamedWindowDefinition>,
    /// Snowflake / BigQuery `QUALIFY`
    pub qualify: Option<Expr>,
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SELECT")?;
        if let Some(distinct) = &self.distinct {
            write!(f, " {}", distinct)?;
        }
        if let Some(top) = &self.top {
            write!(f, " {}", top)?;
        }
        write!(f, " {}", display_comma_separated(&self.projection))?;
        if let Some(into) = &self.into {
            write!(f, " {}", into)?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        match &self.group_by {
            GroupByExpr::Expressions(exprs, _) if exprs.is_empty() => {}
            group_by => write!(f, " {}", group_by)?,
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        if !self.named_window.is_empty() {
            write!(f, " WINDOW {}", display_comma_separated(&self.named_window))?;
        }
        if let Some(qualify) = &self.qualify {
            write!(f, " QUALIFY {}", qualify)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distinct {
    Distinct,
    /// Postgres `DISTINCT ON (...)`
    On(Vec<Expr>),
}

impl fmt::Display for Distinct {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distinct::Distinct => f.write_str("DISTINCT"),
            Distinct::On(exprs) => write!(f, "DISTINCT ON ({})", display_comma_separated(exprs)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Top {
    pub with_ties: bool,
    pub percent: bool,
    pub quantity: Option<TopQuantity>,
}

impl fmt::Display for Top {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("TOP")?;
        if let Some(quantity) = &self.quantity {
            write!(f, " {}", quantity)?;
        }
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        if self.with_ties {
            f.write_str(" WITH TIES")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopQuantity {
    /// `TOP (expr)`
    Expr(Expr),
    /// `TOP 10`
    Constant(u64),
}

impl fmt::Display for TopQuantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TopQuantity::Expr(expr) => write!(f, "({})", expr),
            TopQuantity::Constant(n) => write!(f, "{}", n),
        }
    }
}

/// `SELECT ... INTO [TEMPORARY] [UNLOGGED] [TABLE] name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectInto {
    pub temporary: bool,
    pub unlogged: bool,
    pub table: bool,
    pub name: ObjectName,
}

impl fmt::Display for SelectInto {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("INTO")?;
        if self.temporary {
            f.write_str(" TEMPORARY")?;
        }
        if self.unlogged {
            f.write_str(" UNLOGGED")?;
        }
        if self.table {
            f.write_str(" TABLE")?;
        }
        write!(f, " {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectItem {
    UnnamedExpr(Expr),
    ExprWithAlias { expr: Expr, alias: Ident },
    /// `alias.*`
    QualifiedWildcard(ObjectName, WildcardAdditionalOptions),
    Wildcard(WildcardAdditionalOptions),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectItem::UnnamedExpr(expr) => write!(f, "{}", expr),
            SelectItem::ExprWithAlias { expr, alias } => write!(f, "{} AS {}", expr, alias),
            SelectItem::QualifiedWildcard(prefix, options) => {
                write!(f, "{}.*{}", prefix, options)
            }
            SelectItem::Wildcard(options) => write!(f, "*{}", options),
        }
    }
}

/// Modifiers on a wildcard: `* EXCLUDE (a)`, `* EXCEPT (a)`, `* REPLACE (x AS a)`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WildcardAdditionalOptions {
    pub exclude: Vec<Ident>,
    pub except: Vec<Ident>,
    pub replace: Vec<ReplaceSelectElement>,
}

impl fmt::Display for WildcardAdditionalOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.exclude.is_empty() {
            write!(f, " EXCLUDE ({})", display_comma_separated(&self.exclude))?;
        }
        if !self.except.is_empty() {
            write!(f, " EXCEPT ({})", display_comma_separated(&self.except))?;
        }
        if !self.replace.is_empty() {
            write!(f, " REPLACE ({})", display_comma_separated(&self.replace))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplaceSelectElement {
    pub expr: Expr,
    pub column_name: Ident,
    pub as_keyword: bool,
}

impl fmt::Display for ReplaceSelectElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.as_keyword {
            write!(f, "{} AS {}", self.expr, self.column_name)
        } else {
            write!(f, "{} {}", self.expr, self.column_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupByExpr {
    /// `GROUP BY ALL`
    All(Vec<GroupByWithModifier>),
    /// An empty list means there is no `GROUP BY` clause.
    Expressions(Vec<Expr>, Vec<GroupByWithModifier>),
}

impl GroupByExpr {
    pub fn none() -> Self {
        GroupByExpr::Expressions(vec![], vec![])
    }
}

impl fmt::Display for GroupByExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let modifiers = match self {
            GroupByExpr::All(modifiers) => {
                f.write_str("GROUP BY ALL")?;
                modifiers
            }
            GroupByExpr::Expressions(exprs, modifiers) => {
                write!(f, "GROUP BY {}", display_comma_separated(exprs))?;
                modifiers
            }
        };
        if !modifiers.is_empty() {
            write!(f, " {}", display_separated(modifiers, " "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupByWithModifier {
    Rollup,
    Cube,
    Totals,
}

impl fmt::Display for GroupByWithModifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            GroupByWithModifier::Rollup => "WITH ROLLUP",
            GroupByWithModifier::Cube => "WITH CUBE",
            GroupByWithModifier::Totals => "WITH TOTALS",
        })
    }
}

/// `WINDOW name AS (spec)` or `WINDOW name AS other_name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedWindowDefinition(pub Ident, pub NamedWindowExpr);

impl fmt::Display for NamedWindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} AS {}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedWindowExpr {
    NamedWindow(Ident),
    WindowSpec(WindowSpec),
}

impl fmt::Display for NamedWindowExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NamedWindowExpr::NamedWindow(name) => write!(f, "{}", name),
            NamedWindowExpr::WindowSpec(spec) => write!(f, "({})", spec),
        }
    }
}

/// One comma-separated element of a `FROM` clause with its joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl fmt::Display for TableWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, "{}", join)?;
        }
        Ok(())
    }
}

/// A source of rows in a `FROM` clause or join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFactor {
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
        /// Arguments of a table-valued function, `name(args)`
        args: Option<Vec<FunctionArg>>,
        version: Option<TableVersion>,
        /// MSSQL `WITH (NOLOCK)` style hints
        with_hints: Vec<Expr>,
    },
    Derived {
        lateral: bool,
        subquery: Box<Query>,
        alias: Option<TableAlias>,
    },
    /// `TABLE(expr)`
    TableFunction {
        expr: Expr,
        alias: Option<TableAlias>,
    },
    /// `LATERAL name(args)`
    Function {
        lateral: bool,
        name: ObjectName,
        args: Vec<FunctionArg>,
        alias: Option<TableAlias>,
    },
    UNNEST {
        alias: Option<TableAlias>,
        array_exprs: Vec<Expr>,
        with_offset: bool,
        with_offset_alias: Option<Ident>,
        with_ordinality: bool,
    },
    /// A parenthesized join, `(a JOIN b ON ...)`
    NestedJoin {
        table_with_joins: Box<TableWithJoins>,
        alias: Option<TableAlias>,
    },
    Pivot {
        table: Box<TableFactor>,
        aggregate_functions: Vec<ExprWithAlias>,
        value_column: Vec<Ident>,
        value_source: Vec<ExprWithAlias>,
        alias: Option<TableAlias>,
    },
    Unpivot {
        table: Box<TableFactor>,
        include_nulls: Option<bool>,
        value: Ident,
        name: Ident,
        columns: Vec<Ident>,
        alias: Option<TableAlias>,
    },
}

fn format_alias(f: &mut fmt::Formatter, alias: &Option<TableAlias>) -> fmt::Result {
    if let Some(alias) = alias {
        write!(f, " AS {}", alias)?;
    }
    Ok(())
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableFactor::Table {
                name,
                alias,
                args,
                version,
                with_hints,
            } => {
                write!(f, "{}", name)?;
                if let Some(args) = args {
                    write!(f, "({})", display_comma_separated(args))?;
                }
                if let Some(version) = version {
                    write!(f, " {}", version)?;
                }
                format_alias(f, alias)?;
                if !with_hints.is_empty() {
                    write!(f, " WITH ({})", display_comma_separated(with_hints))?;
                }
                Ok(())
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({})", subquery)?;
                format_alias(f, alias)
            }
            TableFactor::TableFunction { expr, alias } => {
                write!(f, "TABLE({})", expr)?;
                format_alias(f, alias)
            }
            TableFactor::Function {
                lateral,
                name,
                args,
                alias,
            } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "{}({})", name, display_comma_separated(args))?;
                format_alias(f, alias)
            }
            TableFactor::UNNEST {
                alias,
                array_exprs,
                with_offset,
                with_offset_alias,
                with_ordinality,
            } => {
                write!(f, "UNNEST({})", display_comma_separated(array_exprs))?;
                if *with_ordinality {
                    f.write_str(" WITH ORDINALITY")?;
                }
                format_alias(f, alias)?;
                if *with_offset {
                    f.write_str(" WITH OFFSET")?;
                }
                if let Some(offset_alias) = with_offset_alias {
                    write!(f, " AS {}", offset_alias)?;
                }
                Ok(())
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
            } => {
                write!(f, "({})", table_with_joins)?;
                format_alias(f, alias)
            }
            TableFactor::Pivot {
                table,
                aggregate_functions,
                value_column,
                value_source,
                alias,
            } => {
                write!(
                    f,
                    "{} PIVOT({} FOR ",
                    table,
                    display_comma_separated(aggregate_functions)
                )?;
                if value_column.len() == 1 {
                    write!(f, "{}", value_column[0])?;
                } else {
                    write!(f, "({})", display_comma_separated(value_column))?;
                }
                write!(f, " IN ({}))", display_comma_separated(value_source))?;
                format_alias(f, alias)
            }
            TableFactor::Unpivot {
                table,
                include_nulls,
                value,
                name,
                columns,
                alias,
            } => {
                write!(f, "{} UNPIVOT", table)?;
                match include_nulls {
                    Some(true) => f.write_str(" INCLUDE NULLS")?,
                    Some(false) => f.write_str(" EXCLUDE NULLS")?,
                    None => {}
                }
                write!(
                    f,
                    "({} FOR {} IN ({}))",
                    value,
                    name,
                    display_comma_separated(columns)
                )?;
                format_alias(f, alias)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        Ok(())
    }
}

/// Time travel on a table, `FOR SYSTEM_TIME AS OF <expr>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableVersion {
    ForSystemTimeAsOf(Expr),
}

impl fmt::Display for TableVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableVersion::ForSystemTimeAsOf(e) => write!(f, "FOR SYSTEM_TIME AS OF {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Join {
    pub relation: TableFactor,
    pub join_operator: JoinOperator,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (keyword, constraint) = match &self.join_operator {
            JoinOperator::Join(c) => ("JOIN", Some(c)),
            JoinOperator::Inner(c) => ("INNER JOIN", Some(c)),
            JoinOperator::Left(c) => ("LEFT JOIN", Some(c)),
            JoinOperator::LeftOuter(c) => ("LEFT OUTER JOIN", Some(c)),
            JoinOperator::Right(c) => ("RIGHT JOIN", Some(c)),
            JoinOperator::RightOuter(c) => ("RIGHT OUTER JOIN", Some(c)),
            JoinOperator::FullOuter(c) => ("FULL JOIN", Some(c)),
            JoinOperator::LeftSemi(c) => ("LEFT SEMI JOIN", Some(c)),
            JoinOperator::RightSemi(c) => ("RIGHT SEMI JOIN", Some(c)),
            JoinOperator::LeftAnti(c) => ("LEFT ANTI JOIN", Some(c)),
            JoinOperator::RightAnti(c) => ("RIGHT ANTI JOIN", Some(c)),
            JoinOperator::CrossJoin => ("CROSS JOIN", None),
            JoinOperator::CrossApply => ("CROSS APPLY", None),
            JoinOperator::OuterApply => ("OUTER APPLY", None),
            JoinOperator::AsOf {
                match_condition,
                constraint,
            } => {
                write!(
                    f,
                    " ASOF JOIN {} MATCH_CONDITION ({})",
                    self.relation, match_condition
                )?;
                return write!(f, "{}", ConstraintSuffix(constraint));
            }
        };
        let natural = match constraint {
            Some(JoinConstraint::Natural) => "NATURAL ",
            _ => "",
        };
        write!(f, " {}{} {}", natural, keyword, self.relation)?;
        if let Some(constraint) = constraint {
            write!(f, "{}", ConstraintSuffix(constraint))?;
        }
        Ok(())
    }
}

struct ConstraintSuffix<'a>(&'a JoinConstraint);

impl<'a> fmt::Display for ConstraintSuffix<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            JoinConstraint::On(expr) => write!(f, " ON {}", expr),
            JoinConstraint::Using(columns) => {
                write!(f, " USING({})", display_comma_separated(columns))
            }
            JoinConstraint::Natural | JoinConstraint::None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinOperator {
    /// Bare `JOIN`
    Join(JoinConstraint),
    Inner(JoinConstraint),
    Left(JoinConstraint),
    LeftOuter(JoinConstraint),
    Right(JoinConstraint),
    RightOuter(JoinConstraint),
    FullOuter(JoinConstraint),
    LeftSemi(JoinConstraint),
    RightSemi(JoinConstraint),
    LeftAnti(JoinConstraint),
    RightAnti(JoinConstraint),
    CrossJoin,
    /// MSSQL `CROSS APPLY`
    CrossApply,
    /// MSSQL `OUTER APPLY`
    OuterApply,
    /// Snowflake `ASOF JOIN ... MATCH_CONDITION (...)`
    AsOf {
        match_condition: Expr,
        constraint: JoinConstraint,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
    Natural,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    pub kind: OrderByKind,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            OrderByKind::All(options) => write!(f, "ORDER BY ALL{}", options),
            OrderByKind::Expressions(exprs) => {
                write!(f, "ORDER BY {}", display_comma_separated(exprs))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderByKind {
    /// `ORDER BY ALL`
    All(OrderByOptions),
    Expressions(Vec<OrderByExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub options: OrderByOptions,
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.expr, self.options)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByOptions {
    /// `Some(true)` for `ASC`, `Some(false)` for `DESC`
    pub asc: Option<bool>,
    pub nulls_first: Option<bool>,
}

impl fmt::Display for OrderByOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.asc {
            Some(true) => f.write_str(" ASC")?,
            Some(false) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => f.write_str(" NULLS FIRST")?,
            Some(false) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitClause {
    /// `[LIMIT n] [OFFSET m] [BY ...]`
    LimitOffset {
        limit: Option<Expr>,
        offset: Option<Offset>,
        /// ClickHouse `LIMIT n BY expr`
        limit_by: Vec<Expr>,
    },
    /// MySQL `LIMIT offset, limit`
    OffsetCommaLimit { offset: Expr, limit: Expr },
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LimitClause::LimitOffset {
                limit,
                offset,
                limit_by,
            } => {
                let mut delim = "";
                if let Some(limit) = limit {
                    write!(f, "LIMIT {}", limit)?;
                    delim = " ";
                }
                if !limit_by.is_empty() {
                    write!(f, " BY {}", display_comma_separated(limit_by))?;
                }
                if let Some(offset) = offset {
                    write!(f, "{}{}", delim, offset)?;
                }
                Ok(())
            }
            LimitClause::OffsetCommaLimit { offset, limit } => {
                write!(f, "LIMIT {}, {}", offset, limit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub value: Expr,
    pub rows: OffsetRows,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OFFSET {}{}", self.value, self.rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetRows {
    None,
    Row,
    Rows,
}

impl fmt::Display for OffsetRows {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            OffsetRows::None => "",
            OffsetRows::Row => " ROW",
            OffsetRows::Rows => " ROWS",
        })
    }
}

/// `FETCH FIRST [n] [PERCENT] ROWS {ONLY | WITH TIES}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fetch {
    pub with_ties: bool,
    pub percent: bool,
    pub quantity: Option<Expr>,
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FETCH FIRST ")?;
        if let Some(quantity) = &self.quantity {
            write!(f, "{}{} ", quantity, if self.percent { " PERCENT" } else { "" })?;
        }
        f.write_str(if self.with_ties {
            "ROWS WITH TIES"
        } else {
            "ROWS ONLY"
        })
    }
}

/// `FOR {UPDATE | SHARE} [OF name] [NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockClause {
    pub lock_type: LockType,
    pub of: Option<ObjectName>,
    pub nonblock: Option<NonBlock>,
}

impl fmt::Display for LockClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FOR {}", self.lock_type)?;
        if let Some(of) = &self.of {
            write!(f, " OF {}", of)?;
        }
        if let Some(nonblock) = &self.nonblock {
            write!(f, " {}", nonblock)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockType {
    Share,
    Update,
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            LockType::Share => "SHARE",
            LockType::Update => "UPDATE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NonBlock {
    Nowait,
    SkipLocked,
}

impl fmt::Display for NonBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NonBlock::Nowait => "NOWAIT",
            NonBlock::SkipLocked => "SKIP LOCKED",
        })
    }
}

/// `VALUES (...), (...)`; `explicit_row` marks MySQL's `VALUES ROW(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Values {
    pub explicit_row: bool,
    pub rows: Vec<Vec<Expr>>,
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("VALUES ")?;
        let prefix = if self.explicit_row { "ROW" } else { "" };
        let mut delim = "";
        for row in &self.rows {
            write!(f, "{}{}({})", delim, prefix, display_comma_separated(row))?;
            delim = ", ";
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprWithAlias {
    pub expr: Expr,
    pub alias: Option<Ident>,
}

impl fmt::Display for ExprWithAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    fn table(name: &str) -> TableFactor {
        TableFactor::Table {
            name: ObjectName::from_idents(vec![Ident::new(name)]),
            alias: None,
            args: None,
            version: None,
            with_hints: vec![],
        }
    }

    fn select_star_from(from: Vec<TableWithJoins>) -> Select {
        Select {
            distinct: None,
            top: None,
            projection: vec![SelectItem::Wildcard(WildcardAdditionalOptions::default())],
            into: None,
            from,
            selection: None,
            group_by: GroupByExpr::none(),
            having: None,
            named_window: vec![],
            qualify: None,
        }
    }

    #[test]
    fn join_display() {
        let from = TableWithJoins {
            relation: table("users"),
            joins: vec![Join {
                relation: table("orders"),
                join_operator: JoinOperator::LeftOuter(JoinConstraint::Using(vec![Ident::new(
                    "id",
                )])),
            }],
        };
        let query = Query::from_body(SetExpr::Select(Box::new(select_star_from(vec![from]))));
        assert_eq!(
            "SELECT * FROM users LEFT OUTER JOIN orders USING(id)",
            query.to_string()
        );
    }

    #[test]
    fn limit_display() {
        let limit = LimitClause::LimitOffset {
            limit: Some(Expr::value(Value::number("10"))),
            offset: Some(Offset {
                value: Expr::value(Value::number("5")),
                rows: OffsetRows::None,
            }),
            limit_by: vec![],
        };
        assert_eq!("LIMIT 10 OFFSET 5", limit.to_string());
        let only_offset = LimitClause::LimitOffset {
            limit: None,
            offset: Some(Offset {
                value: Expr::value(Value::number("5")),
                rows: OffsetRows::Rows,
            }),
            limit_by: vec![],
        };
        assert_eq!("OFFSET 5 ROWS", only_offset.to_string());
    }

    #[test]
    fn values_display() {
        let values = Values {
            explicit_row: false,
            rows: vec![
                vec![
                    Expr::value(Value::number("1")),
                    Expr::value(Value::SingleQuotedString("Alice".into())),
                ],
                vec![
                    Expr::value(Value::number("2")),
                    Expr::value(Value::SingleQuotedString("Bob".into())),
                ],
            ],
        };
        assert_eq!("VALUES (1, 'Alice'), (2, 'Bob')", values.to_string());
    }

    #[test]
    fn no_group_by_prints_nothing() {
        assert_eq!("SELECT *", select_star_from(vec![]).to_string());
    }
}
