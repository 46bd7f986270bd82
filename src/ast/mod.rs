//! The SQL syntax tree.
//!
//! Every node is a plain owned value: enums are closed, so exactly one variant
//! is populated at a time. All nodes implement `Display`, which renders SQL
//! text, and serialize to JSON with externally tagged variants.

mod data_type;
mod ddl;
mod display;
mod expr;
mod ident;
mod query;
mod span;
mod statement;
mod value;
pub mod visitor;

pub use self::data_type::{
    ArrayElemTypeDef, BinaryLength, CharLengthUnits, CharacterLength, DataType, EnumMember,
    ExactNumberInfo, StructBracketKind, StructField, TimezoneInfo, UnionField,
};
pub use self::ddl::{
    AlterColumnOperation, AlterTableOperation, ColumnDef, ColumnOption, ColumnOptionDef,
    CreateIndex, CreateTable, ObjectType, ReferentialAction, SqlOption, TableConstraint,
};
pub use self::expr::{
    AccessExpr, Array, BinaryOperator, CaseWhen, CastFormat, CastKind, DateTimeField,
    DuplicateTreatment, Expr, ExtractSyntax, Function, FunctionArg, FunctionArgExpr,
    FunctionArgOperator, FunctionArgumentClause, FunctionArgumentList, FunctionArguments,
    Interval, LambdaFunction, Map, MapEntry, NullTreatment, OneOrManyWithParens, Subscript,
    TrimWhereField, UnaryOperator, WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec,
    WindowType,
};
pub use self::ident::{Ident, ObjectName, ObjectNamePart, ObjectNamePartFunction};
pub use self::query::{
    Cte, CteAsMaterialized, Distinct, ExprWithAlias, Fetch, GroupByExpr, GroupByWithModifier,
    Join, JoinConstraint, JoinOperator, LimitClause, LockClause, LockType, NamedWindowDefinition,
    NamedWindowExpr, NonBlock, Offset, OffsetRows, OrderBy, OrderByExpr, OrderByKind,
    OrderByOptions, Query, ReplaceSelectElement, Select, SelectInto, SelectItem, SetExpr,
    SetOperator, SetQuantifier, TableAlias, TableFactor, TableVersion, TableWithJoins, Top,
    TopQuantity, Values, WildcardAdditionalOptions, With,
};
pub use self::span::{Location, Span};
pub use self::statement::{
    AnalyzeFormat, Assignment, AssignmentTarget, ConflictTarget, Delete, DescribeAlias,
    FromTable, Insert, OnConflict, OnConflictAction, OnInsert, OpaquePayload, SqliteOnConflict,
    Statement, TransactionAccessMode, TransactionIsolationLevel, TransactionMode,
    UpdateTableFromKind,
};
pub use self::value::{DollarQuotedString, Value, ValueWithSpan};
