//! Child enumeration for every node type.
//!
//! Each `walk` matches exhaustively on its node, so adding a variant without
//! deciding how to traverse it fails to compile.

use super::{hooked, Callbacks, Halt};
use crate::ast::*;
use crate::error::MalformedNodeError;

/// A node the walker can descend into.
pub trait Visit {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>>;
}

impl<T: Visit> Visit for [T] {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        for node in self {
            node.walk(callbacks)?;
        }
        Ok(())
    }
}

impl<T: Visit> Visit for Vec<T> {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.as_slice().walk(callbacks)
    }
}

impl<T: Visit> Visit for Option<T> {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            Some(node) => node.walk(callbacks),
            None => Ok(()),
        }
    }
}

impl<T: Visit + ?Sized> Visit for Box<T> {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        (**self).walk(callbacks)
    }
}

impl<T: Visit> Visit for OneOrManyWithParens<T> {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            OneOrManyWithParens::One(node) => node.walk(callbacks),
            OneOrManyWithParens::Many(nodes) => nodes.walk(callbacks),
        }
    }
}

fn check_name(name: &ObjectName) -> Result<(), MalformedNodeError> {
    if name.0.is_empty() {
        return Err(MalformedNodeError::new("ObjectName", "name has no parts"));
    }
    Ok(())
}

/// An `ObjectName` naming a table or view: fires the relation hooks.
fn relation<E>(name: &ObjectName, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
    check_name(name)?;
    hooked(name, callbacks, |callbacks| walk_name_parts(name, callbacks))
}

fn relations<E>(names: &[ObjectName], callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
    for name in names {
        relation(name, callbacks)?;
    }
    Ok(())
}

fn walk_name_parts<E>(name: &ObjectName, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
    for part in &name.0 {
        match part {
            ObjectNamePart::Identifier(_) => {}
            ObjectNamePart::Function(func) => func.args.walk(callbacks)?,
        }
    }
    Ok(())
}

/// Any other `ObjectName`: function, column, index or type names.
impl Visit for ObjectName {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        check_name(self)?;
        walk_name_parts(self, callbacks)
    }
}

impl Visit for Statement {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        hooked(self, callbacks, |callbacks| match self {
            Statement::Query(query) => query.walk(callbacks),
            Statement::Insert(insert) => insert.walk(callbacks),
            Statement::Update {
                table,
                assignments,
                from,
                selection,
                returning,
                limit,
            } => {
                table.walk(callbacks)?;
                if let Some(UpdateTableFromKind::BeforeSet(from)) = from {
                    from.walk(callbacks)?;
                }
                assignments.walk(callbacks)?;
                if let Some(UpdateTableFromKind::AfterSet(from)) = from {
                    from.walk(callbacks)?;
                }
                selection.walk(callbacks)?;
                returning.walk(callbacks)?;
                limit.walk(callbacks)
            }
            Statement::Delete(delete) => delete.walk(callbacks),
            Statement::CreateTable(create) => create.walk(callbacks),
            Statement::CreateView { name, query, .. } => {
                relation(name, callbacks)?;
                query.walk(callbacks)
            }
            Statement::CreateIndex(create) => create.walk(callbacks),
            Statement::CreateSchema { schema_name, .. } => schema_name.walk(callbacks),
            Statement::CreateDatabase { db_name, .. } => db_name.walk(callbacks),
            Statement::AlterTable {
                name, operations, ..
            } => {
                relation(name, callbacks)?;
                operations.walk(callbacks)
            }
            Statement::Drop {
                object_type, names, ..
            } => {
                if object_type.names_relations() {
                    relations(names, callbacks)
                } else {
                    names.walk(callbacks)
                }
            }
            Statement::Truncate { table_names, .. } => relations(table_names, callbacks),
            Statement::StartTransaction { .. }
            | Statement::Commit { .. }
            | Statement::Rollback { .. }
            | Statement::Savepoint { .. }
            | Statement::ReleaseSavepoint { .. }
            | Statement::Opaque(_) => Ok(()),
            Statement::Explain { statement, .. } => statement.walk(callbacks),
            Statement::ExplainTable { table_name, .. } => relation(table_name, callbacks),
            Statement::Use { db_name } => db_name.walk(callbacks),
            Statement::SetVariable {
                variables, value, ..
            } => {
                variables.walk(callbacks)?;
                value.walk(callbacks)
            }
        })
    }
}

impl Visit for Insert {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        relation(&self.table, callbacks)?;
        self.partitioned.walk(callbacks)?;
        self.source.walk(callbacks)?;
        self.on.walk(callbacks)?;
        self.returning.walk(callbacks)
    }
}

impl Visit for OnInsert {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            OnInsert::DuplicateKeyUpdate(assignments) => assignments.walk(callbacks),
            OnInsert::OnConflict(on_conflict) => {
                match &on_conflict.conflict_target {
                    Some(ConflictTarget::OnConstraint(name)) => name.walk(callbacks)?,
                    Some(ConflictTarget::Columns(_)) | None => {}
                }
                match &on_conflict.action {
                    OnConflictAction::DoNothing => Ok(()),
                    OnConflictAction::DoUpdate {
                        assignments,
                        selection,
                    } => {
                        assignments.walk(callbacks)?;
                        selection.walk(callbacks)
                    }
                }
            }
        }
    }
}

impl Visit for Assignment {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match &self.target {
            AssignmentTarget::ColumnName(name) => name.walk(callbacks)?,
            AssignmentTarget::Tuple(names) => names.walk(callbacks)?,
        }
        self.value.walk(callbacks)
    }
}

impl Visit for Delete {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        relations(&self.tables, callbacks)?;
        match &self.from {
            FromTable::WithFromKeyword(from) | FromTable::WithoutKeyword(from) => {
                from.walk(callbacks)?
            }
        }
        self.using.walk(callbacks)?;
        self.selection.walk(callbacks)?;
        self.returning.walk(callbacks)?;
        self.order_by.walk(callbacks)?;
        self.limit.walk(callbacks)
    }
}

impl Visit for CreateTable {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        relation(&self.name, callbacks)?;
        self.columns.walk(callbacks)?;
        self.constraints.walk(callbacks)?;
        if let Some(like) = &self.like {
            relation(like, callbacks)?;
        }
        self.with_options.walk(callbacks)?;
        self.table_options.walk(callbacks)?;
        self.order_by.walk(callbacks)?;
        self.query.walk(callbacks)
    }
}

impl Visit for ColumnDef {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.data_type.walk(callbacks)?;
        self.collation.walk(callbacks)?;
        for option in &self.options {
            option.option.walk(callbacks)?;
        }
        Ok(())
    }
}

impl Visit for ColumnOption {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            ColumnOption::Null
            | ColumnOption::NotNull
            | ColumnOption::Unique { .. }
            | ColumnOption::Comment(_)
            | ColumnOption::Opaque(_) => Ok(()),
            ColumnOption::Default(expr)
            | ColumnOption::Check(expr)
            | ColumnOption::OnUpdate(expr)
            | ColumnOption::Generated { expr, .. } => expr.walk(callbacks),
            ColumnOption::ForeignKey { foreign_table, .. } => relation(foreign_table, callbacks),
            ColumnOption::CharacterSet(name) => name.walk(callbacks),
        }
    }
}

impl Visit for TableConstraint {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            TableConstraint::Unique { .. } | TableConstraint::Index { .. } => Ok(()),
            TableConstraint::ForeignKey { foreign_table, .. } => {
                relation(foreign_table, callbacks)
            }
            TableConstraint::Check { expr, .. } => expr.walk(callbacks),
        }
    }
}

impl Visit for SqlOption {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.value.walk(callbacks)
    }
}

impl Visit for CreateIndex {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.name.walk(callbacks)?;
        relation(&self.table_name, callbacks)?;
        self.columns.walk(callbacks)?;
        self.predicate.walk(callbacks)
    }
}

impl Visit for AlterTableOperation {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            AlterTableOperation::AddColumn { column_def, .. } => column_def.walk(callbacks),
            AlterTableOperation::RenameTable { table_name } => relation(table_name, callbacks),
            AlterTableOperation::AlterColumn { op, .. } => match op {
                AlterColumnOperation::SetNotNull
                | AlterColumnOperation::DropNotNull
                | AlterColumnOperation::DropDefault => Ok(()),
                AlterColumnOperation::SetDefault { value } => value.walk(callbacks),
                AlterColumnOperation::SetDataType { data_type, using } => {
                    data_type.walk(callbacks)?;
                    using.walk(callbacks)
                }
            },
            AlterTableOperation::AddConstraint(constraint) => constraint.walk(callbacks),
            AlterTableOperation::DropColumn { .. }
            | AlterTableOperation::RenameColumn { .. }
            | AlterTableOperation::DropConstraint { .. }
            | AlterTableOperation::Opaque(_) => Ok(()),
        }
    }
}

impl Visit for Query {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        hooked(self, callbacks, |callbacks| {
            if let Some(with) = &self.with {
                for cte in &with.cte_tables {
                    cte.query.walk(callbacks)?;
                }
            }
            self.body.walk(callbacks)?;
            if let Some(order_by) = &self.order_by {
                match &order_by.kind {
                    OrderByKind::All(_) => {}
                    OrderByKind::Expressions(exprs) => exprs.walk(callbacks)?,
                }
            }
            self.limit_clause.walk(callbacks)?;
            if let Some(fetch) = &self.fetch {
                fetch.quantity.walk(callbacks)?;
            }
            for lock in &self.locks {
                lock.of.walk(callbacks)?;
            }
            Ok(())
        })
    }
}

impl Visit for SetExpr {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            SetExpr::Select(select) => select.walk(callbacks),
            SetExpr::Query(query) => query.walk(callbacks),
            SetExpr::SetOperation { left, right, .. } => {
                left.walk(callbacks)?;
                right.walk(callbacks)
            }
            SetExpr::Values(values) => values.walk(callbacks),
            SetExpr::Insert(statement)
            | SetExpr::Update(statement)
            | SetExpr::Delete(statement) => statement.walk(callbacks),
            SetExpr::Table(name) => relation(name, callbacks),
        }
    }
}

/// Rows in order, each row left to right, so `VALUES (1, 'a'), (2, 'b')`
/// visits `1, 'a', 2, 'b'`.
impl Visit for Values {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.rows.walk(callbacks)
    }
}

impl Visit for Select {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        if let Some(Distinct::On(exprs)) = &self.distinct {
            exprs.walk(callbacks)?;
        }
        if let Some(Top {
            quantity: Some(TopQuantity::Expr(expr)),
            ..
        }) = &self.top
        {
            expr.walk(callbacks)?;
        }
        self.from.walk(callbacks)?;
        self.projection.walk(callbacks)?;
        if let Some(into) = &self.into {
            relation(&into.name, callbacks)?;
        }
        self.selection.walk(callbacks)?;
        match &self.group_by {
            GroupByExpr::All(_) => {}
            GroupByExpr::Expressions(exprs, _) => exprs.walk(callbacks)?,
        }
        self.having.walk(callbacks)?;
        for NamedWindowDefinition(_, window) in &self.named_window {
            match window {
                NamedWindowExpr::NamedWindow(_) => {}
                NamedWindowExpr::WindowSpec(spec) => spec.walk(callbacks)?,
            }
        }
        self.qualify.walk(callbacks)
    }
}

impl Visit for SelectItem {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                expr.walk(callbacks)
            }
            SelectItem::QualifiedWildcard(prefix, options) => {
                prefix.walk(callbacks)?;
                options.walk(callbacks)
            }
            SelectItem::Wildcard(options) => options.walk(callbacks),
        }
    }
}

impl Visit for WildcardAdditionalOptions {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        for replace in &self.replace {
            replace.expr.walk(callbacks)?;
        }
        Ok(())
    }
}

impl Visit for TableWithJoins {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.relation.walk(callbacks)?;
        self.joins.walk(callbacks)
    }
}

impl Visit for Join {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.relation.walk(callbacks)?;
        match &self.join_operator {
            JoinOperator::Join(constraint)
            | JoinOperator::Inner(constraint)
            | JoinOperator::Left(constraint)
            | JoinOperator::LeftOuter(constraint)
            | JoinOperator::Right(constraint)
            | JoinOperator::RightOuter(constraint)
            | JoinOperator::FullOuter(constraint)
            | JoinOperator::LeftSemi(constraint)
            | JoinOperator::RightSemi(constraint)
            | JoinOperator::LeftAnti(constraint)
            | JoinOperator::RightAnti(constraint) => constraint.walk(callbacks),
            JoinOperator::CrossJoin | JoinOperator::CrossApply | JoinOperator::OuterApply => Ok(()),
            JoinOperator::AsOf {
                match_condition,
                constraint,
            } => {
                match_condition.walk(callbacks)?;
                constraint.walk(callbacks)
            }
        }
    }
}

impl Visit for JoinConstraint {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            JoinConstraint::On(expr) => expr.walk(callbacks),
            JoinConstraint::Using(_) | JoinConstraint::Natural | JoinConstraint::None => Ok(()),
        }
    }
}

impl Visit for TableFactor {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        hooked(self, callbacks, |callbacks| match self {
            TableFactor::Table {
                name,
                args,
                version,
                with_hints,
                ..
            } => {
                relation(name, callbacks)?;
                args.walk(callbacks)?;
                if let Some(TableVersion::ForSystemTimeAsOf(expr)) = version {
                    expr.walk(callbacks)?;
                }
                with_hints.walk(callbacks)
            }
            TableFactor::Derived { subquery, .. } => subquery.walk(callbacks),
            TableFactor::TableFunction { expr, .. } => expr.walk(callbacks),
            TableFactor::Function { name, args, .. } => {
                name.walk(callbacks)?;
                args.walk(callbacks)
            }
            TableFactor::UNNEST { array_exprs, .. } => array_exprs.walk(callbacks),
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => table_with_joins.walk(callbacks),
            TableFactor::Pivot {
                table,
                aggregate_functions,
                value_source,
                ..
            } => {
                table.walk(callbacks)?;
                aggregate_functions.walk(callbacks)?;
                value_source.walk(callbacks)
            }
            TableFactor::Unpivot { table, .. } => table.walk(callbacks),
        })
    }
}

impl Visit for ExprWithAlias {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.expr.walk(callbacks)
    }
}

impl Visit for OrderByExpr {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.expr.walk(callbacks)
    }
}

impl Visit for LimitClause {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            LimitClause::LimitOffset {
                limit,
                offset,
                limit_by,
            } => {
                limit.walk(callbacks)?;
                limit_by.walk(callbacks)?;
                if let Some(offset) = offset {
                    offset.value.walk(callbacks)?;
                }
                Ok(())
            }
            LimitClause::OffsetCommaLimit { offset, limit } => {
                offset.walk(callbacks)?;
                limit.walk(callbacks)
            }
        }
    }
}

impl Visit for Value {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        hooked(self, callbacks, |_| Ok(()))
    }
}

impl Visit for ValueWithSpan {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.value.walk(callbacks)
    }
}

impl Visit for Expr {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        hooked(self, callbacks, |callbacks| match self {
            Expr::Identifier(_) | Expr::CompoundIdentifier(_) => Ok(()),
            Expr::CompoundFieldAccess { root, access_chain } => {
                root.walk(callbacks)?;
                access_chain.walk(callbacks)
            }
            Expr::IsFalse(expr)
            | Expr::IsNotFalse(expr)
            | Expr::IsTrue(expr)
            | Expr::IsNotTrue(expr)
            | Expr::IsNull(expr)
            | Expr::IsNotNull(expr)
            | Expr::IsUnknown(expr)
            | Expr::IsNotUnknown(expr)
            | Expr::Nested(expr)
            | Expr::UnaryOp { expr, .. }
            | Expr::Extract { expr, .. }
            | Expr::Named { expr, .. } => expr.walk(callbacks),
            Expr::IsDistinctFrom(left, right)
            | Expr::IsNotDistinctFrom(left, right)
            | Expr::BinaryOp { left, right, .. }
            | Expr::AnyOp { left, right, .. }
            | Expr::AllOp { left, right, .. }
            | Expr::AtTimeZone {
                timestamp: left,
                time_zone: right,
            }
            | Expr::Position {
                expr: left,
                r#in: right,
            } => {
                left.walk(callbacks)?;
                right.walk(callbacks)
            }
            Expr::InList { expr, list, .. } => {
                expr.walk(callbacks)?;
                list.walk(callbacks)
            }
            Expr::InSubquery { expr, subquery, .. } => {
                expr.walk(callbacks)?;
                subquery.walk(callbacks)
            }
            Expr::Between {
                expr, low, high, ..
            } => {
                expr.walk(callbacks)?;
                low.walk(callbacks)?;
                high.walk(callbacks)
            }
            Expr::Like {
                expr,
                pattern,
                escape_char,
                ..
            }
            | Expr::ILike {
                expr,
                pattern,
                escape_char,
                ..
            }
            | Expr::SimilarTo {
                expr,
                pattern,
                escape_char,
                ..
            } => {
                expr.walk(callbacks)?;
                pattern.walk(callbacks)?;
                escape_char.walk(callbacks)
            }
            Expr::RLike { expr, pattern, .. } => {
                expr.walk(callbacks)?;
                pattern.walk(callbacks)
            }
            Expr::Convert {
                expr,
                data_type,
                charset,
                target_before_value,
                styles,
                ..
            } => {
                if *target_before_value {
                    data_type.walk(callbacks)?;
                    expr.walk(callbacks)?;
                } else {
                    expr.walk(callbacks)?;
                    data_type.walk(callbacks)?;
                }
                charset.walk(callbacks)?;
                styles.walk(callbacks)
            }
            Expr::Cast {
                expr,
                data_type,
                format,
                ..
            } => {
                expr.walk(callbacks)?;
                data_type.walk(callbacks)?;
                match format {
                    Some(CastFormat::Value(value)) => value.walk(callbacks),
                    Some(CastFormat::ValueAtTimeZone(value, tz)) => {
                        value.walk(callbacks)?;
                        tz.walk(callbacks)
                    }
                    None => Ok(()),
                }
            }
            Expr::Substring {
                expr,
                substring_from,
                substring_for,
                ..
            } => {
                expr.walk(callbacks)?;
                substring_from.walk(callbacks)?;
                substring_for.walk(callbacks)
            }
            Expr::Trim {
                expr,
                trim_what,
                trim_characters,
                ..
            } => {
                trim_what.walk(callbacks)?;
                expr.walk(callbacks)?;
                trim_characters.walk(callbacks)
            }
            Expr::Overlay {
                expr,
                overlay_what,
                overlay_from,
                overlay_for,
            } => {
                expr.walk(callbacks)?;
                overlay_what.walk(callbacks)?;
                overlay_from.walk(callbacks)?;
                overlay_for.walk(callbacks)
            }
            Expr::Collate { expr, collation } => {
                expr.walk(callbacks)?;
                collation.walk(callbacks)
            }
            Expr::Value(value) => value.walk(callbacks),
            Expr::TypedString { data_type, value } => {
                data_type.walk(callbacks)?;
                value.walk(callbacks)
            }
            Expr::Function(func) => func.walk(callbacks),
            Expr::Case {
                operand,
                conditions,
                else_result,
            } => {
                operand.walk(callbacks)?;
                for when in conditions {
                    when.condition.walk(callbacks)?;
                    when.result.walk(callbacks)?;
                }
                else_result.walk(callbacks)
            }
            Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => subquery.walk(callbacks),
            Expr::GroupingSets(sets) | Expr::Cube(sets) | Expr::Rollup(sets) => {
                sets.walk(callbacks)
            }
            Expr::Tuple(exprs) => exprs.walk(callbacks),
            Expr::Struct { values, fields } => {
                fields.walk(callbacks)?;
                values.walk(callbacks)
            }
            Expr::Array(array) => array.elem.walk(callbacks),
            Expr::Map(map) => {
                for entry in &map.entries {
                    entry.key.walk(callbacks)?;
                    entry.value.walk(callbacks)?;
                }
                Ok(())
            }
            Expr::Interval(interval) => interval.value.walk(callbacks),
            Expr::Lambda(lambda) => lambda.body.walk(callbacks),
        })
    }
}

impl Visit for AccessExpr {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            AccessExpr::Dot(expr) => expr.walk(callbacks),
            AccessExpr::Subscript(Subscript::Index { index }) => index.walk(callbacks),
            AccessExpr::Subscript(Subscript::Slice {
                lower_bound,
                upper_bound,
                stride,
            }) => {
                lower_bound.walk(callbacks)?;
                upper_bound.walk(callbacks)?;
                stride.walk(callbacks)
            }
        }
    }
}

impl Visit for Function {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.name.walk(callbacks)?;
        match &self.args {
            FunctionArguments::None => {}
            FunctionArguments::Subquery(query) => query.walk(callbacks)?,
            FunctionArguments::List(list) => {
                list.args.walk(callbacks)?;
                list.clauses.walk(callbacks)?;
            }
        }
        self.within_group.walk(callbacks)?;
        self.filter.walk(callbacks)?;
        match &self.over {
            Some(WindowType::WindowSpec(spec)) => spec.walk(callbacks),
            Some(WindowType::NamedWindow(_)) | None => Ok(()),
        }
    }
}

impl Visit for FunctionArg {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        let arg = match self {
            FunctionArg::Named { arg, .. } | FunctionArg::Unnamed(arg) => arg,
        };
        match arg {
            FunctionArgExpr::Expr(expr) => expr.walk(callbacks),
            FunctionArgExpr::QualifiedWildcard(prefix) => prefix.walk(callbacks),
            FunctionArgExpr::Wildcard => Ok(()),
        }
    }
}

impl Visit for FunctionArgumentClause {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            FunctionArgumentClause::OrderBy(order_by) => order_by.walk(callbacks),
            FunctionArgumentClause::Limit(limit) => limit.walk(callbacks),
            FunctionArgumentClause::Separator(separator) => separator.walk(callbacks),
            FunctionArgumentClause::IgnoreOrRespectNulls(_) => Ok(()),
        }
    }
}

impl Visit for WindowSpec {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.partition_by.walk(callbacks)?;
        self.order_by.walk(callbacks)?;
        if let Some(frame) = &self.window_frame {
            frame.start_bound.walk(callbacks)?;
            frame.end_bound.walk(callbacks)?;
        }
        Ok(())
    }
}

impl Visit for WindowFrameBound {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            WindowFrameBound::CurrentRow => Ok(()),
            WindowFrameBound::Preceding(offset) | WindowFrameBound::Following(offset) => {
                offset.walk(callbacks)
            }
        }
    }
}

impl Visit for StructField {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        self.field_type.walk(callbacks)
    }
}

impl Visit for DataType {
    fn walk<E>(&self, callbacks: &mut Callbacks<'_, E>) -> Result<(), Halt<E>> {
        match self {
            DataType::Array(elem) => match elem {
                ArrayElemTypeDef::None => Ok(()),
                ArrayElemTypeDef::AngleBracket(inner)
                | ArrayElemTypeDef::SquareBracket(inner, _)
                | ArrayElemTypeDef::Parenthesis(inner) => inner.walk(callbacks),
            },
            DataType::Map(key, value) => {
                key.walk(callbacks)?;
                value.walk(callbacks)
            }
            DataType::Tuple(fields) | DataType::Struct(fields, _) => fields.walk(callbacks),
            DataType::Union(fields) => {
                for field in fields {
                    field.field_type.walk(callbacks)?;
                }
                Ok(())
            }
            DataType::Enum(members, _) => {
                for member in members {
                    match member {
                        EnumMember::Name(_) => {}
                        EnumMember::NamedValue(_, value) => value.walk(callbacks)?,
                    }
                }
                Ok(())
            }
            DataType::Nullable(inner) | DataType::LowCardinality(inner) => inner.walk(callbacks),
            DataType::Custom(name, _) => name.walk(callbacks),
            DataType::Character(_)
            | DataType::Char(_)
            | DataType::CharacterVarying(_)
            | DataType::CharVarying(_)
            | DataType::Varchar(_)
            | DataType::Nvarchar(_)
            | DataType::Nchar(_)
            | DataType::CharacterLargeObject(_)
            | DataType::CharLargeObject(_)
            | DataType::Clob(_)
            | DataType::Text
            | DataType::TinyText
            | DataType::MediumText
            | DataType::LongText
            | DataType::String(_)
            | DataType::FixedString(_)
            | DataType::Uuid
            | DataType::Binary(_)
            | DataType::Varbinary(_)
            | DataType::Blob(_)
            | DataType::TinyBlob
            | DataType::MediumBlob
            | DataType::LongBlob
            | DataType::Bytes(_)
            | DataType::Bytea
            | DataType::Bit(_)
            | DataType::BitVarying(_)
            | DataType::Numeric(_)
            | DataType::Decimal(_)
            | DataType::Dec(_)
            | DataType::BigNumeric(_)
            | DataType::BigDecimal(_)
            | DataType::TinyInt(_)
            | DataType::TinyIntUnsigned(_)
            | DataType::SmallInt(_)
            | DataType::SmallIntUnsigned(_)
            | DataType::MediumInt(_)
            | DataType::MediumIntUnsigned(_)
            | DataType::Int(_)
            | DataType::IntUnsigned(_)
            | DataType::Integer(_)
            | DataType::IntegerUnsigned(_)
            | DataType::BigInt(_)
            | DataType::BigIntUnsigned(_)
            | DataType::Int2(_)
            | DataType::Int4(_)
            | DataType::Int8(_)
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Int128
            | DataType::Int256
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::UInt128
            | DataType::UInt256
            | DataType::Unsigned
            | DataType::Float(_)
            | DataType::Float4
            | DataType::Float8
            | DataType::Float32
            | DataType::Float64
            | DataType::Real
            | DataType::Double(_)
            | DataType::DoublePrecision
            | DataType::Bool
            | DataType::Boolean
            | DataType::Date
            | DataType::Date32
            | DataType::Time(..)
            | DataType::Datetime(_)
            | DataType::Datetime64(..)
            | DataType::Timestamp(..)
            | DataType::TimestampNtz
            | DataType::Interval
            | DataType::Json
            | DataType::Jsonb
            | DataType::Variant
            | DataType::Object
            | DataType::Regclass
            | DataType::Set(_)
            | DataType::Unspecified => Ok(()),
        }
    }
}
