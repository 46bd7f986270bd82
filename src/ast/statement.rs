use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::display_comma_separated;
use super::{
    AlterTableOperation, CreateIndex, CreateTable, Expr, Ident, ObjectName, ObjectType,
    OneOrManyWithParens, OrderByExpr, Query, SelectItem, TableWithJoins,
};

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statement {
    Query(Box<Query>),
    Insert(Insert),
    Update {
        table: TableWithJoins,
        assignments: Vec<Assignment>,
        from: Option<UpdateTableFromKind>,
        selection: Option<Expr>,
        returning: Option<Vec<SelectItem>>,
        limit: Option<Expr>,
    },
    Delete(Delete),
    CreateTable(CreateTable),
    CreateView {
        or_replace: bool,
        materialized: bool,
        if_not_exists: bool,
        name: ObjectName,
        columns: Vec<Ident>,
        query: Box<Query>,
    },
    CreateIndex(CreateIndex),
    CreateSchema {
        schema_name: ObjectName,
        if_not_exists: bool,
    },
    CreateDatabase {
        db_name: ObjectName,
        if_not_exists: bool,
    },
    AlterTable {
        name: ObjectName,
        if_exists: bool,
        only: bool,
        operations: Vec<AlterTableOperation>,
    },
    Drop {
        object_type: ObjectType,
        if_exists: bool,
        names: Vec<ObjectName>,
        cascade: bool,
        restrict: bool,
        temporary: bool,
    },
    Truncate {
        table_names: Vec<ObjectName>,
        table: bool,
        cascade: bool,
    },
    /// `BEGIN` or `START TRANSACTION`
    StartTransaction {
        modes: Vec<TransactionMode>,
        begin: bool,
    },
    Commit {
        chain: bool,
    },
    Rollback {
        chain: bool,
        savepoint: Option<Ident>,
    },
    Savepoint {
        name: Ident,
    },
    ReleaseSavepoint {
        name: Ident,
    },
    Explain {
        describe_alias: DescribeAlias,
        analyze: bool,
        verbose: bool,
        format: Option<AnalyzeFormat>,
        statement: Box<Statement>,
    },
    /// `DESCRIBE table`
    ExplainTable {
        describe_alias: DescribeAlias,
        table_name: ObjectName,
    },
    Use {
        db_name: ObjectName,
    },
    /// `SET [LOCAL] name = value` or `SET (a, b) = (1, 2)`
    SetVariable {
        local: bool,
        variables: OneOrManyWithParens<ObjectName>,
        value: Vec<Expr>,
    },
    /// A statement whose structure is not modelled, kept as its token text.
    Opaque(OpaquePayload),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Query(query) => write!(f, "{}", query),
            Statement::Insert(insert) => write!(f, "{}", insert),
            Statement::Update {
                table,
                assignments,
                from,
                selection,
                returning,
                limit,
            } => {
                write!(f, "UPDATE {}", table)?;
                if let Some(UpdateTableFromKind::BeforeSet(from)) = from {
                    write!(f, " FROM {}", display_comma_separated(from))?;
                }
                write!(f, " SET {}", display_comma_separated(assignments))?;
                if let Some(UpdateTableFromKind::AfterSet(from)) = from {
                    write!(f, " FROM {}", display_comma_separated(from))?;
                }
                if let Some(selection) = selection {
                    write!(f, " WHERE {}", selection)?;
                }
                if let Some(returning) = returning {
                    write!(f, " RETURNING {}", display_comma_separated(returning))?;
                }
                if let Some(limit) = limit {
                    write!(f, " LIMIT {}", limit)?;
                }
                Ok(())
            }
            Statement::Delete(delete) => write!(f, "{}", delete),
            Statement::CreateTable(create) => write!(f, "{}", create),
            Statement::CreateView {
                or_replace,
                materialized,
                if_not_exists,
                name,
                columns,
                query,
            } => {
                write!(
                    f,
                    "CREATE {}{}VIEW {}{}",
                    if *or_replace { "OR REPLACE " } else { "" },
                    if *materialized { "MATERIALIZED " } else { "" },
                    if *if_not_exists { "IF NOT EXISTS " } else { "" },
                    name
                )?;
                if !columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(columns))?;
                }
                write!(f, " AS {}", query)
            }
            Statement::CreateIndex(create) => write!(f, "{}", create),
            Statement::CreateSchema {
                schema_name,
                if_not_exists,
            } => write!(
                f,
                "CREATE SCHEMA {}{}",
                if *if_not_exists { "IF NOT EXISTS " } else { "" },
                schema_name
            ),
            Statement::CreateDatabase {
                db_name,
                if_not_exists,
            } => write!(
                f,
                "CREATE DATABASE {}{}",
                if *if_not_exists { "IF NOT EXISTS " } else { "" },
                db_name
            ),
            Statement::AlterTable {
                name,
                if_exists,
                only,
                operations,
            } => write!(
                f,
                "ALTER TABLE {}{}{} {}",
                if *if_exists { "IF EXISTS " } else { "" },
                if *only { "ONLY " } else { "" },
                name,
                display_comma_separated(operations)
            ),
            Statement::Drop {
                object_type,
                if_exists,
                names,
                cascade,
                restrict,
                temporary,
            } => write!(
                f,
                "DROP {}{} {}{}{}{}",
                if *temporary { "TEMPORARY " } else { "" },
                object_type,
                if *if_exists { "IF EXISTS " } else { "" },
                display_comma_separated(names),
                if *cascade { " CASCADE" } else { "" },
                if *restrict { " RESTRICT" } else { "" },
            ),
            Statement::Truncate {
                table_names,
                table,
                cascade,
            } => write!(
                f,
                "TRUNCATE {}{}{}",
                if *table { "TABLE " } else { "" },
                display_comma_separated(table_names),
                if *cascade { " CASCADE" } else { "" },
            ),
            Statement::StartTransaction { modes, begin } => {
                f.write_str(if *begin { "BEGIN" } else { "START TRANSACTION" })?;
                if !modes.is_empty() {
                    write!(f, " {}", display_comma_separated(modes))?;
                }
                Ok(())
            }
            Statement::Commit { chain } => {
                write!(f, "COMMIT{}", if *chain { " AND CHAIN" } else { "" })
            }
            Statement::Rollback { chain, savepoint } => {
                write!(f, "ROLLBACK{}", if *chain { " AND CHAIN" } else { "" })?;
                if let Some(savepoint) = savepoint {
                    write!(f, " TO SAVEPOINT {}", savepoint)?;
                }
                Ok(())
            }
            Statement::Savepoint { name } => write!(f, "SAVEPOINT {}", name),
            Statement::ReleaseSavepoint { name } => write!(f, "RELEASE SAVEPOINT {}", name),
            Statement::Explain {
                describe_alias,
                analyze,
                verbose,
                format,
                statement,
            } => {
                write!(f, "{} ", describe_alias)?;
                if *analyze {
                    f.write_str("ANALYZE ")?;
                }
                if *verbose {
                    f.write_str("VERBOSE ")?;
                }
                if let Some(format) = format {
                    write!(f, "FORMAT {} ", format)?;
                }
                write!(f, "{}", statement)
            }
            Statement::ExplainTable {
                describe_alias,
                table_name,
            } => write!(f, "{} {}", describe_alias, table_name),
            Statement::Use { db_name } => write!(f, "USE {}", db_name),
            Statement::SetVariable {
                local,
                variables,
                value,
            } => {
                f.write_str("SET ")?;
                if *local {
                    f.write_str("LOCAL ")?;
                }
                match variables {
                    OneOrManyWithParens::One(_) => {
                        write!(f, "{} = {}", variables, display_comma_separated(value))
                    }
                    OneOrManyWithParens::Many(_) => {
                        write!(f, "{} = ({})", variables, display_comma_separated(value))
                    }
                }
            }
            Statement::Opaque(payload) => write!(f, "{}", payload),
        }
    }
}

/// Unmodelled SQL preserved verbatim: `kind` names the leading keyword and
/// `text` holds the normalised token text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaquePayload {
    pub kind: String,
    pub text: String,
}

impl OpaquePayload {
    pub fn new<K: Into<String>, T: Into<String>>(kind: K, text: T) -> Self {
        OpaquePayload {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for OpaquePayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insert {
    /// MySQL `REPLACE INTO`
    pub replace_into: bool,
    /// MySQL `INSERT IGNORE`
    pub ignore: bool,
    /// SQLite `INSERT OR REPLACE` and friends
    pub or: Option<SqliteOnConflict>,
    pub into: bool,
    /// Hive `INSERT OVERWRITE TABLE`
    pub overwrite: bool,
    pub table: ObjectName,
    pub table_alias: Option<Ident>,
    pub columns: Vec<Ident>,
    /// Hive `PARTITION (...)`
    pub partitioned: Option<Vec<Expr>>,
    /// `None` for `DEFAULT VALUES`
    pub source: Option<Box<Query>>,
    pub on: Option<OnInsert>,
    pub returning: Option<Vec<SelectItem>>,
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.replace_into { "REPLACE" } else { "INSERT" })?;
        if let Some(or) = &self.or {
            write!(f, " OR {}", or)?;
        }
        if self.ignore {
            f.write_str(" IGNORE")?;
        }
        if self.overwrite {
            f.write_str(" OVERWRITE TABLE")?;
        } else if self.into {
            f.write_str(" INTO")?;
        }
        write!(f, " {}", self.table)?;
        if let Some(alias) = &self.table_alias {
            write!(f, " AS {}", alias)?;
        }
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        if let Some(partitioned) = &self.partitioned {
            write!(f, " PARTITION ({})", display_comma_separated(partitioned))?;
        }
        match &self.source {
            Some(source) => write!(f, " {}", source)?,
            None => f.write_str(" DEFAULT VALUES")?,
        }
        if let Some(on) = &self.on {
            write!(f, " {}", on)?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " RETURNING {}", display_comma_separated(returning))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqliteOnConflict {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl fmt::Display for SqliteOnConflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SqliteOnConflict::Rollback => "ROLLBACK",
            SqliteOnConflict::Abort => "ABORT",
            SqliteOnConflict::Fail => "FAIL",
            SqliteOnConflict::Ignore => "IGNORE",
            SqliteOnConflict::Replace => "REPLACE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnInsert {
    /// MySQL `ON DUPLICATE KEY UPDATE`
    DuplicateKeyUpdate(Vec<Assignment>),
    /// Postgres / SQLite `ON CONFLICT`
    OnConflict(OnConflict),
}

impl fmt::Display for OnInsert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OnInsert::DuplicateKeyUpdate(assignments) => write!(
                f,
                "ON DUPLICATE KEY UPDATE {}",
                display_comma_separated(assignments)
            ),
            OnInsert::OnConflict(on_conflict) => write!(f, "{}", on_conflict),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnConflict {
    pub conflict_target: Option<ConflictTarget>,
    pub action: OnConflictAction,
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ON CONFLICT")?;
        if let Some(target) = &self.conflict_target {
            write!(f, " {}", target)?;
        }
        write!(f, " {}", self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictTarget {
    Columns(Vec<Ident>),
    OnConstraint(ObjectName),
}

impl fmt::Display for ConflictTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConflictTarget::Columns(columns) => {
                write!(f, "({})", display_comma_separated(columns))
            }
            ConflictTarget::OnConstraint(name) => write!(f, "ON CONSTRAINT {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnConflictAction {
    DoNothing,
    DoUpdate {
        assignments: Vec<Assignment>,
        selection: Option<Expr>,
    },
}

impl fmt::Display for OnConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OnConflictAction::DoNothing => f.write_str("DO NOTHING"),
            OnConflictAction::DoUpdate {
                assignments,
                selection,
            } => {
                write!(f, "DO UPDATE SET {}", display_comma_separated(assignments))?;
                if let Some(selection) = selection {
                    write!(f, " WHERE {}", selection)?;
                }
                Ok(())
            }
        }
    }
}

/// `target = value` in `UPDATE ... SET` and upsert clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub target: AssignmentTarget,
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentTarget {
    /// `col` or `t.col`
    ColumnName(ObjectName),
    /// `(a, b)`
    Tuple(Vec<ObjectName>),
}

impl fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignmentTarget::ColumnName(name) => write!(f, "{}", name),
            AssignmentTarget::Tuple(names) => write!(f, "({})", display_comma_separated(names)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateTableFromKind {
    /// Snowflake `UPDATE t FROM u SET ...`
    BeforeSet(Vec<TableWithJoins>),
    /// `UPDATE t SET ... FROM u`
    AfterSet(Vec<TableWithJoins>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delete {
    /// MySQL multi-table form, `DELETE t1, t2 FROM ...`
    pub tables: Vec<ObjectName>,
    pub from: FromTable,
    pub using: Option<Vec<TableWithJoins>>,
    pub selection: Option<Expr>,
    pub returning: Option<Vec<SelectItem>>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Expr>,
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("DELETE")?;
        if !self.tables.is_empty() {
            write!(f, " {}", display_comma_separated(&self.tables))?;
        }
        match &self.from {
            FromTable::WithFromKeyword(from) => {
                write!(f, " FROM {}", display_comma_separated(from))?
            }
            FromTable::WithoutKeyword(from) => write!(f, " {}", display_comma_separated(from))?,
        }
        if let Some(using) = &self.using {
            write!(f, " USING {}", display_comma_separated(using))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " RETURNING {}", display_comma_separated(returning))?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FromTable {
    WithFromKeyword(Vec<TableWithJoins>),
    /// BigQuery allows `DELETE t WHERE ...`
    WithoutKeyword(Vec<TableWithJoins>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionMode {
    AccessMode(TransactionAccessMode),
    IsolationLevel(TransactionIsolationLevel),
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionMode::AccessMode(mode) => write!(f, "{}", mode),
            TransactionMode::IsolationLevel(level) => write!(f, "ISOLATION LEVEL {}", level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionAccessMode {
    ReadOnly,
    ReadWrite,
}

impl fmt::Display for TransactionAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TransactionAccessMode::ReadOnly => "READ ONLY",
            TransactionAccessMode::ReadWrite => "READ WRITE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionIsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl fmt::Display for TransactionIsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TransactionIsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            TransactionIsolationLevel::ReadCommitted => "READ COMMITTED",
            TransactionIsolationLevel::RepeatableRead => "REPEATABLE READ",
            TransactionIsolationLevel::Serializable => "SERIALIZABLE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescribeAlias {
    Explain,
    Describe,
    Desc,
}

impl fmt::Display for DescribeAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DescribeAlias::Explain => "EXPLAIN",
            DescribeAlias::Describe => "DESCRIBE",
            DescribeAlias::Desc => "DESC",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyzeFormat {
    Text,
    Graphviz,
    Json,
}

impl fmt::Display for AnalyzeFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            AnalyzeFormat::Text => "TEXT",
            AnalyzeFormat::Graphviz => "GRAPHVIZ",
            AnalyzeFormat::Json => "JSON",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{SetExpr, Value, Values};

    #[test]
    fn insert_display() {
        let insert = Insert {
            replace_into: false,
            ignore: false,
            or: None,
            into: true,
            overwrite: false,
            table: ObjectName::from_idents(vec![Ident::new("users")]),
            table_alias: None,
            columns: vec![Ident::new("id"), Ident::new("name")],
            partitioned: None,
            source: Some(Box::new(Query::from_body(SetExpr::Values(Values {
                explicit_row: false,
                rows: vec![vec![
                    Expr::value(Value::number("1")),
                    Expr::value(Value::SingleQuotedString("Alice".into())),
                ]],
            })))),
            on: Some(OnInsert::OnConflict(OnConflict {
                conflict_target: Some(ConflictTarget::Columns(vec![Ident::new("id")])),
                action: OnConflictAction::DoNothing,
            })),
            returning: None,
        };
        assert_eq!(
            "INSERT INTO users (id, name) VALUES (1, 'Alice') ON CONFLICT (id) DO NOTHING",
            insert.to_string()
        );
    }

    #[test]
    fn transaction_display() {
        let start = Statement::StartTransaction {
            modes: vec![
                TransactionMode::IsolationLevel(TransactionIsolationLevel::Serializable),
                TransactionMode::AccessMode(TransactionAccessMode::ReadOnly),
            ],
            begin: false,
        };
        assert_eq!(
            "START TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ ONLY",
            start.to_string()
        );
        let rollback = Statement::Rollback {
            chain: false,
            savepoint: Some(Ident::new("sp1")),
        };
        assert_eq!("ROLLBACK TO SAVEPOINT sp1", rollback.to_string());
    }

    #[test]
    fn opaque_display() {
        let grant = Statement::Opaque(OpaquePayload::new("GRANT", "GRANT SELECT ON users TO bob"));
        assert_eq!("GRANT SELECT ON users TO bob", grant.to_string());
    }
}
