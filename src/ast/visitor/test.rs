use std::cell::RefCell;

use super::{visit, Callbacks, Flow};
use crate::ast::*;
use crate::error::VisitError;

macro_rules! boxed {
    ($e:expr) => {
        Box::new($e)
    };
}

macro_rules! binop {
    ($e1:expr, $o:expr, $e2:expr) => {
        Expr::BinaryOp {
            left: boxed!($e1),
            op: $o,
            right: boxed!($e2),
        }
    };
}

macro_rules! int {
    ($i:expr) => {
        Expr::value(Value::number(stringify!($i)))
    };
}

macro_rules! col {
    ($name:expr) => {
        Expr::Identifier(Ident::new($name))
    };
}

macro_rules! table {
    ($($part:expr),+) => {
        TableWithJoins {
            relation: TableFactor::Table {
                name: ObjectName::from_idents(vec![$(Ident::new($part)),+]),
                alias: None,
                args: None,
                version: None,
                with_hints: vec![],
            },
            joins: vec![],
        }
    };
}

fn select(projection: Vec<Expr>, from: Vec<TableWithJoins>, selection: Option<Expr>) -> Statement {
    Statement::Query(boxed!(Query::from_body(SetExpr::Select(boxed!(Select {
        distinct: None,
        top: None,
        projection: projection.into_iter().map(SelectItem::UnnamedExpr).collect(),
        into: None,
        from,
        selection,
        group_by: GroupByExpr::none(),
        having: None,
        named_window: vec![],
        qualify: None,
    })))))
}

fn describe(expr: &Expr) -> String {
    match expr {
        Expr::BinaryOp { op, .. } => format!("{}", op),
        other => format!("{}", other),
    }
}

#[test]
fn pre_and_post_nest_around_children() {
    // (1 + 2) * 3
    let expr = binop! {
        Expr::Nested(boxed!(binop!(int!(1), BinaryOperator::Plus, int!(2)))),
        BinaryOperator::Multiply,
        int!(3)
    };

    let events = RefCell::new(vec![]);
    let mut callbacks = Callbacks::new()
        .pre_expr(|e| {
            events.borrow_mut().push(format!("pre {}", describe(e)));
            Ok(Flow::Continue)
        })
        .post_expr(|e| {
            events.borrow_mut().push(format!("post {}", describe(e)));
            Ok(Flow::Continue)
        });
    visit(&expr, &mut callbacks).unwrap();
    drop(callbacks);

    let expected = vec![
        "pre *",
        "pre (1 + 2)",
        "pre +",
        "pre 1",
        "post 1",
        "pre 2",
        "post 2",
        "post +",
        "post (1 + 2)",
        "pre 3",
        "post 3",
        "post *",
    ];
    assert_eq!(expected, events.into_inner());
}

#[test]
fn value_hooks_fire_inside_expr_hooks() {
    let stmt = select(vec![int!(1), col!("a")], vec![table!("t")], None);

    let events = RefCell::new(vec![]);
    let mut callbacks = Callbacks::new()
        .on_expr(|e| events.borrow_mut().push(format!("expr {}", e)))
        .on_value(|v| events.borrow_mut().push(format!("value {}", v)))
        .on_relation(|n| events.borrow_mut().push(format!("relation {}", n)));
    visit(&stmt, &mut callbacks).unwrap();
    drop(callbacks);

    let expected = vec!["relation t", "expr 1", "value 1", "expr a"];
    assert_eq!(expected, events.into_inner());
}

#[test]
fn statement_query_and_table_factor_counts() {
    let stmt = select(
        vec![col!("a")],
        vec![table!("users"), table!("db", "orders")],
        Some(binop!(col!("a"), BinaryOperator::Gt, int!(5))),
    );

    let mut statements = 0;
    let mut queries = 0;
    let mut factors = 0;
    let mut relations = vec![];
    let mut callbacks = Callbacks::new()
        .on_statement(|_| statements += 1)
        .on_query(|_| queries += 1)
        .on_table_factor(|_| factors += 1)
        .on_relation(|n| relations.push(n.to_string()));
    visit(&stmt, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(1, statements);
    assert_eq!(1, queries);
    assert_eq!(2, factors);
    assert_eq!(vec!["users", "db.orders"], relations);
}

#[test]
fn skip_children_still_fires_post() {
    let expr = binop!(int!(1), BinaryOperator::Plus, int!(2));

    let pre = RefCell::new(0);
    let post = RefCell::new(0);
    let mut callbacks = Callbacks::new()
        .pre_expr(|e| {
            *pre.borrow_mut() += 1;
            match e {
                Expr::BinaryOp { .. } => Ok(Flow::SkipChildren),
                _ => Ok(Flow::Continue),
            }
        })
        .post_expr(|_| {
            *post.borrow_mut() += 1;
            Ok(Flow::Continue)
        });
    visit(&expr, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(1, pre.into_inner());
    assert_eq!(1, post.into_inner());
}

#[test]
fn break_ends_the_walk_successfully() {
    let stmt = select(vec![col!("a"), col!("b"), col!("c")], vec![], None);

    let mut seen = vec![];
    let mut callbacks = Callbacks::new().pre_expr(|e| {
        seen.push(e.to_string());
        if seen.len() == 2 {
            Ok(Flow::Break)
        } else {
            Ok(Flow::Continue)
        }
    });
    assert!(visit(&stmt, &mut callbacks).is_ok());
    drop(callbacks);

    assert_eq!(vec!["a", "b"], seen);
}

#[test]
fn callback_error_aborts_and_propagates() {
    let stmt = select(vec![col!("a"), col!("b"), col!("c")], vec![], None);

    let mut seen = vec![];
    let mut callbacks = Callbacks::default().pre_expr(|e| {
        seen.push(e.to_string());
        match e {
            Expr::Identifier(ident) if ident.value == "b" => Err("found b"),
            _ => Ok(Flow::Continue),
        }
    });
    let err = visit(&stmt, &mut callbacks).unwrap_err();
    drop(callbacks);

    match err {
        VisitError::Callback(msg) => assert_eq!("found b", msg),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(vec!["a", "b"], seen);
}

#[test]
fn empty_object_name_is_malformed() {
    let stmt = Statement::Truncate {
        table_names: vec![ObjectName(vec![])],
        table: true,
        cascade: false,
    };

    let mut callbacks = Callbacks::new();
    match visit(&stmt, &mut callbacks) {
        Err(VisitError::Malformed(err)) => assert_eq!("ObjectName", err.node),
        other => panic!("expected malformed node, got {:?}", other),
    }
}

#[test]
fn empty_callbacks_walk_everything() {
    let stmt = select(
        vec![binop!(col!("a"), BinaryOperator::Plus, int!(1))],
        vec![table!("t")],
        Some(binop!(col!("a"), BinaryOperator::Eq, int!(2))),
    );

    let mut callbacks = Callbacks::new();
    assert!(callbacks.is_empty());
    assert!(visit(&stmt, &mut callbacks).is_ok());
}

#[test]
fn drop_view_fires_relation_but_drop_index_does_not() {
    let name = |n: &str| ObjectName::from_idents(vec![Ident::new(n)]);
    let statements = vec![
        Statement::Drop {
            object_type: ObjectType::View,
            if_exists: false,
            names: vec![name("v")],
            cascade: false,
            restrict: false,
            temporary: false,
        },
        Statement::Drop {
            object_type: ObjectType::Index,
            if_exists: false,
            names: vec![name("idx")],
            cascade: false,
            restrict: false,
            temporary: false,
        },
    ];

    let mut relations = vec![];
    let mut callbacks = Callbacks::new().on_relation(|n| relations.push(n.to_string()));
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(vec!["v"], relations);
}

#[test]
fn insert_values_visit_row_major() {
    let rows = vec![
        vec![int!(1), Expr::value(Value::SingleQuotedString("Alice".into()))],
        vec![int!(2), Expr::value(Value::SingleQuotedString("Bob".into()))],
    ];
    let stmt = Statement::Insert(Insert {
        replace_into: false,
        ignore: false,
        or: None,
        into: true,
        overwrite: false,
        table: ObjectName::from_idents(vec![Ident::new("users")]),
        table_alias: None,
        columns: vec![Ident::new("id"), Ident::new("name")],
        partitioned: None,
        source: Some(boxed!(Query::from_body(SetExpr::Values(Values {
            explicit_row: false,
            rows,
        })))),
        on: None,
        returning: None,
    });

    let mut values = vec![];
    let mut callbacks = Callbacks::new().on_value(|v| values.push(v.to_string()));
    visit(&stmt, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(vec!["1", "'Alice'", "2", "'Bob'"], values);
}
