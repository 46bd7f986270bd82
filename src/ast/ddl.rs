use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::{display_comma_separated, display_separated, escape_quoted};
use super::{DataType, Expr, Ident, ObjectName, OpaquePayload, OrderByExpr, Query};

/// `CREATE [OR REPLACE] [TEMPORARY] TABLE [IF NOT EXISTS] name (...)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateTable {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    /// `LIKE other_table`
    pub like: Option<ObjectName>,
    /// `WITH (key = value, ...)`
    pub with_options: Vec<SqlOption>,
    /// Trailing options such as MySQL's `ENGINE=InnoDB` or ClickHouse's
    /// `ENGINE = MergeTree()`
    pub table_options: Vec<SqlOption>,
    /// ClickHouse `ORDER BY`
    pub order_by: Option<Vec<Expr>>,
    /// `AS SELECT ...`
    pub query: Option<Box<Query>>,
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CREATE {or_replace}{temporary}TABLE {if_not_exists}{name}",
            or_replace = if self.or_replace { "OR REPLACE " } else { "" },
            temporary = if self.temporary { "TEMPORARY " } else { "" },
            if_not_exists = if self.if_not_exists { "IF NOT EXISTS " } else { "" },
            name = self.name,
        )?;
        if !self.columns.is_empty() || !self.constraints.is_empty() {
            write!(f, " ({}", display_comma_separated(&self.columns))?;
            if !self.columns.is_empty() && !self.constraints.is_empty() {
                f.write_str(", ")?;
            }
            write!(f, "{})", display_comma_separated(&self.constraints))?;
        } else if self.query.is_none() && self.like.is_none() {
            f.write_str(" ()")?;
        }
        if let Some(like) = &self.like {
            write!(f, " LIKE {}", like)?;
        }
        if !self.with_options.is_empty() {
            write!(f, " WITH ({})", display_comma_separated(&self.with_options))?;
        }
        if !self.table_options.is_empty() {
            write!(f, " {}", display_separated(&self.table_options, " "))?;
        }
        if let Some(order_by) = &self.order_by {
            if order_by.len() == 1 {
                write!(f, " ORDER BY {}", order_by[0])?;
            } else {
                write!(f, " ORDER BY ({})", display_comma_separated(order_by))?;
            }
        }
        if let Some(query) = &self.query {
            write!(f, " AS {}", query)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub collation: Option<ObjectName>,
    pub options: Vec<ColumnOptionDef>,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data_type == DataType::Unspecified {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{} {}", self.name, self.data_type)?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {}", collation)?;
        }
        for option in &self.options {
            write!(f, " {}", option)?;
        }
        Ok(())
    }
}

/// A column option, optionally named with `CONSTRAINT name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnOptionDef {
    pub name: Option<Ident>,
    pub option: ColumnOption,
}

impl fmt::Display for ColumnOptionDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", name)?;
        }
        write!(f, "{}", self.option)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnOption {
    Null,
    NotNull,
    Default(Expr),
    /// `PRIMARY KEY` when `is_primary`, otherwise `UNIQUE`
    Unique {
        is_primary: bool,
    },
    ForeignKey {
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    Check(Expr),
    Comment(String),
    /// MySQL `ON UPDATE CURRENT_TIMESTAMP`
    OnUpdate(Expr),
    /// `GENERATED ALWAYS AS (expr) [STORED | VIRTUAL]`
    Generated {
        expr: Expr,
        stored: Option<bool>,
    },
    CharacterSet(ObjectName),
    /// A dialect-specific option kept as text, e.g. `AUTO_INCREMENT`
    Opaque(OpaquePayload),
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnOption::Null => f.write_str("NULL"),
            ColumnOption::NotNull => f.write_str("NOT NULL"),
            ColumnOption::Default(expr) => write!(f, "DEFAULT {}", expr),
            ColumnOption::Unique { is_primary } => {
                f.write_str(if *is_primary { "PRIMARY KEY" } else { "UNIQUE" })
            }
            ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                write!(f, "REFERENCES {}", foreign_table)?;
                if !referred_columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(referred_columns))?;
                }
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {}", action)?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {}", action)?;
                }
                Ok(())
            }
            ColumnOption::Check(expr) => write!(f, "CHECK ({})", expr),
            ColumnOption::Comment(comment) => {
                write!(f, "COMMENT '{}'", escape_quoted(comment, '\''))
            }
            ColumnOption::OnUpdate(expr) => write!(f, "ON UPDATE {}", expr),
            ColumnOption::Generated { expr, stored } => {
                write!(f, "GENERATED ALWAYS AS ({})", expr)?;
                match stored {
                    Some(true) => f.write_str(" STORED"),
                    Some(false) => f.write_str(" VIRTUAL"),
                    None => Ok(()),
                }
            }
            ColumnOption::CharacterSet(name) => write!(f, "CHARACTER SET {}", name),
            ColumnOption::Opaque(payload) => write!(f, "{}", payload),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        })
    }
}

/// A table-level constraint in `CREATE TABLE` or `ALTER TABLE ... ADD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableConstraint {
    /// `[CONSTRAINT name] {PRIMARY KEY | UNIQUE} (cols)`
    Unique {
        name: Option<Ident>,
        columns: Vec<Ident>,
        is_primary: bool,
    },
    /// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES table (cols)`
    ForeignKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    /// `[CONSTRAINT name] CHECK (expr)`
    Check {
        name: Option<Ident>,
        expr: Box<Expr>,
    },
    /// MySQL `{INDEX | KEY} [name] (cols)`
    Index {
        display_as_key: bool,
        name: Option<Ident>,
        columns: Vec<Ident>,
    },
}

fn format_constraint_name(f: &mut fmt::Formatter, name: &Option<Ident>) -> fmt::Result {
    if let Some(name) = name {
        write!(f, "CONSTRAINT {} ", name)?;
    }
    Ok(())
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableConstraint::Unique {
                name,
                columns,
                is_primary,
            } => {
                format_constraint_name(f, name)?;
                write!(
                    f,
                    "{} ({})",
                    if *is_primary { "PRIMARY KEY" } else { "UNIQUE" },
                    display_comma_separated(columns)
                )
            }
            TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                format_constraint_name(f, name)?;
                write!(
                    f,
                    "FOREIGN KEY ({}) REFERENCES {}",
                    display_comma_separated(columns),
                    foreign_table
                )?;
                if !referred_columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(referred_columns))?;
                }
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {}", action)?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {}", action)?;
                }
                Ok(())
            }
            TableConstraint::Check { name, expr } => {
                format_constraint_name(f, name)?;
                write!(f, "CHECK ({})", expr)
            }
            TableConstraint::Index {
                display_as_key,
                name,
                columns,
            } => {
                f.write_str(if *display_as_key { "KEY" } else { "INDEX" })?;
                if let Some(name) = name {
                    write!(f, " {}", name)?;
                }
                write!(f, " ({})", display_comma_separated(columns))
            }
        }
    }
}

/// `name = value` inside `WITH (...)` or after a table definition. Multi-word
/// names such as `DEFAULT CHARSET` keep each word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlOption {
    pub name: Vec<Ident>,
    pub value: Expr,
}

impl fmt::Display for SqlOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", display_separated(&self.name, " "), self.value)
    }
}

/// `CREATE [UNIQUE] INDEX [CONCURRENTLY] [IF NOT EXISTS] [name] ON table ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateIndex {
    pub name: Option<ObjectName>,
    pub table_name: ObjectName,
    pub using: Option<Ident>,
    pub columns: Vec<OrderByExpr>,
    pub unique: bool,
    pub concurrently: bool,
    pub if_not_exists: bool,
    /// Partial index predicate
    pub predicate: Option<Expr>,
}

impl fmt::Display for CreateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CREATE {}INDEX {}{}",
            if self.unique { "UNIQUE " } else { "" },
            if self.concurrently { "CONCURRENTLY " } else { "" },
            if self.if_not_exists { "IF NOT EXISTS " } else { "" },
        )?;
        if let Some(name) = &self.name {
            write!(f, "{} ", name)?;
        }
        write!(f, "ON {}", self.table_name)?;
        if let Some(using) = &self.using {
            write!(f, " USING {}", using)?;
        }
        write!(f, " ({})", display_comma_separated(&self.columns))?;
        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {}", predicate)?;
        }
        Ok(())
    }
}

/// One comma-separated action of an `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlterTableOperation {
    AddColumn {
        column_keyword: bool,
        if_not_exists: bool,
        column_def: ColumnDef,
    },
    DropColumn {
        column_name: Ident,
        if_exists: bool,
        cascade: bool,
    },
    RenameColumn {
        old_column_name: Ident,
        new_column_name: Ident,
    },
    RenameTable {
        table_name: ObjectName,
    },
    AlterColumn {
        column_name: Ident,
        op: AlterColumnOperation,
    },
    AddConstraint(TableConstraint),
    DropConstraint {
        if_exists: bool,
        name: Ident,
        cascade: bool,
    },
    /// Any other action, kept as text
    Opaque(OpaquePayload),
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlterTableOperation::AddColumn {
                column_keyword,
                if_not_exists,
                column_def,
            } => write!(
                f,
                "ADD {}{}{}",
                if *column_keyword { "COLUMN " } else { "" },
                if *if_not_exists { "IF NOT EXISTS " } else { "" },
                column_def
            ),
            AlterTableOperation::DropColumn {
                column_name,
                if_exists,
                cascade,
            } => write!(
                f,
                "DROP COLUMN {}{}{}",
                if *if_exists { "IF EXISTS " } else { "" },
                column_name,
                if *cascade { " CASCADE" } else { "" }
            ),
            AlterTableOperation::RenameColumn {
                old_column_name,
                new_column_name,
            } => write!(f, "RENAME COLUMN {} TO {}", old_column_name, new_column_name),
            AlterTableOperation::RenameTable { table_name } => {
                write!(f, "RENAME TO {}", table_name)
            }
            AlterTableOperation::AlterColumn { column_name, op } => {
                write!(f, "ALTER COLUMN {} {}", column_name, op)
            }
            AlterTableOperation::AddConstraint(constraint) => write!(f, "ADD {}", constraint),
            AlterTableOperation::DropConstraint {
                if_exists,
                name,
                cascade,
            } => write!(
                f,
                "DROP CONSTRAINT {}{}{}",
                if *if_exists { "IF EXISTS " } else { "" },
                name,
                if *cascade { " CASCADE" } else { "" }
            ),
            AlterTableOperation::Opaque(payload) => write!(f, "{}", payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlterColumnOperation {
    SetNotNull,
    DropNotNull,
    SetDefault { value: Expr },
    DropDefault,
    SetDataType {
        data_type: DataType,
        using: Option<Expr>,
    },
}

impl fmt::Display for AlterColumnOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlterColumnOperation::SetNotNull => f.write_str("SET NOT NULL"),
            AlterColumnOperation::DropNotNull => f.write_str("DROP NOT NULL"),
            AlterColumnOperation::SetDefault { value } => write!(f, "SET DEFAULT {}", value),
            AlterColumnOperation::DropDefault => f.write_str("DROP DEFAULT"),
            AlterColumnOperation::SetDataType { data_type, using } => {
                write!(f, "SET DATA TYPE {}", data_type)?;
                if let Some(using) = using {
                    write!(f, " USING {}", using)?;
                }
                Ok(())
            }
        }
    }
}

/// The kind of object named in a `DROP` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Table,
    View,
    MaterializedView,
    Index,
    Schema,
    Database,
    Sequence,
    Role,
    Type,
}

impl ObjectType {
    /// Whether the dropped names refer to tables or views.
    pub fn names_relations(&self) -> bool {
        matches!(
            self,
            ObjectType::Table | ObjectType::View | ObjectType::MaterializedView
        )
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Table => "TABLE",
            ObjectType::View => "VIEW",
            ObjectType::MaterializedView => "MATERIALIZED VIEW",
            ObjectType::Index => "INDEX",
            ObjectType::Schema => "SCHEMA",
            ObjectType::Database => "DATABASE",
            ObjectType::Sequence => "SEQUENCE",
            ObjectType::Role => "ROLE",
            ObjectType::Type => "TYPE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CharacterLength, Value};

    #[test]
    fn create_table_display() {
        let table = CreateTable {
            or_replace: false,
            temporary: false,
            if_not_exists: true,
            name: ObjectName::from_idents(vec![Ident::new("users")]),
            columns: vec![
                ColumnDef {
                    name: Ident::new("id"),
                    data_type: DataType::Int(None),
                    collation: None,
                    options: vec![
                        ColumnOptionDef {
                            name: None,
                            option: ColumnOption::Unique { is_primary: true },
                        },
                        ColumnOptionDef {
                            name: None,
                            option: ColumnOption::Opaque(OpaquePayload::new(
                                "AUTO_INCREMENT",
                                "AUTO_INCREMENT",
                            )),
                        },
                    ],
                },
                ColumnDef {
                    name: Ident::new("name"),
                    data_type: DataType::Varchar(Some(CharacterLength::IntegerLength {
                        length: 64,
                        unit: None,
                    })),
                    collation: None,
                    options: vec![ColumnOptionDef {
                        name: None,
                        option: ColumnOption::Default(Expr::value(
                            Value::SingleQuotedString("anon".into()),
                        )),
                    }],
                },
            ],
            constraints: vec![TableConstraint::Unique {
                name: Some(Ident::new("uq_name")),
                columns: vec![Ident::new("name")],
                is_primary: false,
            }],
            like: None,
            with_options: vec![],
            table_options: vec![SqlOption {
                name: vec![Ident::new("ENGINE")],
                value: Expr::Identifier(Ident::new("InnoDB")),
            }],
            order_by: None,
            query: None,
        };
        assert_eq!(
            "CREATE TABLE IF NOT EXISTS users (id INT PRIMARY KEY AUTO_INCREMENT, \
             name VARCHAR(64) DEFAULT 'anon', CONSTRAINT uq_name UNIQUE (name)) ENGINE = InnoDB",
            table.to_string()
        );
    }

    #[test]
    fn alter_operations_display() {
        let op = AlterTableOperation::AlterColumn {
            column_name: Ident::new("age"),
            op: AlterColumnOperation::SetDataType {
                data_type: DataType::BigInt(None),
                using: None,
            },
        };
        assert_eq!("ALTER COLUMN age SET DATA TYPE BIGINT", op.to_string());
        let op = AlterTableOperation::DropColumn {
            column_name: Ident::new("age"),
            if_exists: true,
            cascade: false,
        };
        assert_eq!("DROP COLUMN IF EXISTS age", op.to_string());
    }
}
