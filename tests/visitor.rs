use std::cell::RefCell;

use serde_json::json;

use sqlast::ast::{Expr, Statement, TableFactor};
use sqlast::{visit, Callbacks, Engine, Error, Flow, ParseErrorKind};

fn parse(sql: &str) -> Vec<Statement> {
    sqlast::parse("generic", sql).unwrap()
}

fn table_factor_name(factor: &TableFactor) -> String {
    match factor {
        TableFactor::Table { name, .. } => name.to_string(),
        other => panic!("not a table: {}", other),
    }
}

#[test]
fn single_table_fires_relation_and_table_factor_once() {
    let statements = parse("SELECT * FROM users;");
    assert_eq!(1, statements.len());
    assert!(matches!(statements[0], Statement::Query(_)));

    let relations = RefCell::new(vec![]);
    let factors = RefCell::new(vec![]);
    let mut callbacks = Callbacks::new()
        .on_relation(|name| relations.borrow_mut().push(name.to_string()))
        .on_table_factor(|factor| factors.borrow_mut().push(table_factor_name(factor)));
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(vec!["users"], relations.into_inner());
    assert_eq!(vec!["users"], factors.into_inner());
}

#[test]
fn joined_tables_fire_in_source_order() {
    let statements =
        parse("SELECT * FROM users INNER JOIN orders ON users.id = orders.user_id;");

    let events = RefCell::new(vec![]);
    let mut callbacks = Callbacks::new()
        .on_table_factor(|factor| {
            events
                .borrow_mut()
                .push(format!("factor {}", table_factor_name(factor)))
        })
        .on_relation(|name| events.borrow_mut().push(format!("relation {}", name)));
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(
        vec![
            "factor users",
            "relation users",
            "factor orders",
            "relation orders"
        ],
        events.into_inner()
    );
}

#[test]
fn insert_values_fire_per_literal() {
    let statements = parse("INSERT INTO users (id, name) VALUES (1,'Alice'),(2,'Bob');");

    let mut values = vec![];
    let mut callbacks =
        Callbacks::new().on_value(|value| values.push(serde_json::to_value(value).unwrap()));
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(
        vec![
            json!({"Number": ["1", false]}),
            json!({"SingleQuotedString": "Alice"}),
            json!({"Number": ["2", false]}),
            json!({"SingleQuotedString": "Bob"}),
        ],
        values
    );
}

#[test]
fn misspelled_keyword_is_a_located_syntax_error() {
    match sqlast::parse("generic", "SELEC * FROM users;") {
        Err(Error::Parse(err)) => {
            assert_eq!(ParseErrorKind::Syntax, err.kind);
            assert!(
                err.message.starts_with("Expected: an SQL statement"),
                "{}",
                err.message
            );
            assert_eq!((1, 1), (err.location.line, err.location.column));
            assert!(err.to_string().contains("at Line: 1, Column: 1"), "{}", err);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn supported_dialects_are_listed_in_fixed_order() {
    let dialects = sqlast::supported_dialects();
    assert_eq!(Some(&"generic"), dialects.first());
    assert_eq!(10, dialects.len());
    assert_eq!(dialects, Engine::default().supported_dialects());
    for name in &dialects {
        assert!(sqlast::parse(name, "SELECT 1").is_ok(), "{}", name);
    }
}

const CORPUS: &[&str] = &[
    "SELECT * FROM a JOIN b ON a.x = b.x JOIN c USING(y)",
    "SELECT a, count(*) AS n FROM t WHERE b BETWEEN 1 AND 10 GROUP BY a HAVING count(*) > 1",
    "WITH q AS (SELECT 1 AS x) SELECT x FROM q UNION ALL SELECT 2 ORDER BY 1 LIMIT 5",
    "SELECT CASE WHEN a IN (1, 2, 3) THEN 'x' ELSE NULL END FROM t",
    "SELECT * FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id) AND NOT a IS NULL",
    "SELECT CAST(a AS DECIMAL(10, 2)), row_number() OVER (PARTITION BY b ORDER BY c) FROM t",
    "INSERT INTO t (a, b) SELECT x, y FROM u",
    "UPDATE t SET a = a + 1, b = 'z' WHERE c < 0",
    "DELETE FROM t WHERE a IN (SELECT a FROM u)",
    "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20) NOT NULL DEFAULT 'x', CHECK (id > 0))",
    "ALTER TABLE t ADD COLUMN c INT",
    "DROP TABLE IF EXISTS a, b CASCADE",
    "CREATE VIEW v AS SELECT a FROM t",
    "GRANT SELECT ON t TO bob",
];

#[test]
fn format_round_trips() {
    for sql in CORPUS {
        let statements = parse(sql);
        let formatted = sqlast::format(&statements[0]);
        assert_eq!(*sql, formatted);
        assert_eq!(statements, parse(&formatted), "{}", sql);
    }
}

/// Inputs the formatter has to respell. Only the reparsed tree must match.
const NORMALISED: &[(&str, &str)] = &[
    ("generic", "SELECT - -1"),
    ("generic", "select - - a from t"),
    ("generic", "SELECT -(-a), 1 - -2, - -a * -b"),
    ("generic", "SELECT a FROM t WHERE b = - -c"),
    ("generic", "SELECT ((a)) FROM t WHERE NOT (b)"),
    ("generic", "SELECT .5, 1., 1e10, .25e-2"),
    ("generic", "select *\n  from t -- trailing\n  limit 1 offset 2"),
    ("generic", "SELECT a FROM t FULL OUTER JOIN u ON true"),
    ("generic", "SET x TO 1"),
    ("generic", "begin"),
    ("mysql", "SELECT `a b`, \"s\" FROM `t` LIMIT 1, 2"),
    ("postgresql", "SELECT \"A\", b::text FROM \"t\" WHERE c ILIKE 'x%'"),
    ("mssql", "SELECT TOP 3 [a] FROM [t]"),
];

#[test]
fn normalised_spellings_reparse_to_the_same_tree() {
    for (dialect, sql) in NORMALISED {
        let statements = sqlast::parse(dialect, sql).unwrap();
        let formatted = sqlast::format(&statements[0]);
        assert!(!formatted.contains("--"), "{} formatted as {}", sql, formatted);
        match sqlast::parse(dialect, &formatted) {
            Ok(reparsed) => assert_eq!(statements, reparsed, "{} formatted as {}", sql, formatted),
            Err(err) => panic!("{} formatted as {} fails to parse: {}", sql, formatted, err),
        }
    }
}

#[test]
fn json_round_trips() {
    let engine = Engine::default();
    for sql in CORPUS {
        let statements = parse(sql);
        let text = engine.to_json_string(&statements).unwrap();
        let back: Vec<Statement> = engine.from_json(&text).unwrap();
        assert_eq!(statements, back, "{}", sql);
        assert_eq!(text, engine.to_json_string(&back).unwrap());
    }
}

/// Statements with their number of `Expr` nodes, counted by hand.
const EXPR_COUNTS: &[(&str, usize)] = &[
    ("SELECT a, b FROM t WHERE c = 1", 5),
    ("SELECT -a + 2 FROM t", 4),
    ("SELECT count(*) FROM t", 1),
    ("SELECT CASE WHEN a = 1 THEN 'x' ELSE NULL END FROM t", 6),
    ("UPDATE t SET a = a + 1 WHERE b IN (1, 2)", 7),
    ("INSERT INTO t VALUES (1, 'x'), (2, NULL)", 4),
    ("SELECT * FROM t LIMIT 10 OFFSET 5", 2),
    ("SELECT a FROM t ORDER BY b DESC", 2),
    ("SELECT (a) FROM t", 2),
    ("SELECT CAST(a AS INT) FROM t", 2),
    ("SELECT x FROM (SELECT 1 AS x) AS s", 2),
    ("SELECT a FROM t JOIN u ON t.id = u.id", 4),
    ("DROP TABLE t", 0),
];

fn count_expr_hooks(statements: &[Statement]) -> (usize, usize) {
    let pre = RefCell::new(0);
    let post = RefCell::new(0);
    let mut callbacks = Callbacks::new()
        .pre_expr(|_| {
            *pre.borrow_mut() += 1;
            Ok(Flow::Continue)
        })
        .post_expr(|_| {
            *post.borrow_mut() += 1;
            Ok(Flow::Continue)
        });
    visit(statements, &mut callbacks).unwrap();
    drop(callbacks);
    (pre.into_inner(), post.into_inner())
}

#[test]
fn every_expr_fires_pre_and_post_once() {
    for (sql, expected) in EXPR_COUNTS {
        let statements = parse(sql);
        assert_eq!((*expected, *expected), count_expr_hooks(&statements), "{}", sql);
    }
}

#[test]
fn expr_pre_and_post_counts_match() {
    for sql in CORPUS {
        let (pre, post) = count_expr_hooks(&parse(sql));
        assert_eq!(pre, post, "{}", sql);
    }
}

#[test]
fn hooks_nest_like_a_stack() {
    for sql in CORPUS {
        let statements = parse(sql);
        let stack = RefCell::new(Vec::<String>::new());
        let mut callbacks = Callbacks::new()
            .pre_expr(|expr: &Expr| {
                stack.borrow_mut().push(expr.to_string());
                Ok(Flow::Continue)
            })
            .post_expr(|expr: &Expr| {
                let top = stack.borrow_mut().pop();
                assert_eq!(Some(expr.to_string()), top);
                Ok(Flow::Continue)
            });
        visit(&statements, &mut callbacks).unwrap();
        drop(callbacks);
        assert!(stack.into_inner().is_empty(), "{}", sql);
    }
}

#[test]
fn relations_follow_sibling_order() {
    let statements = parse("SELECT * FROM a JOIN b JOIN c");
    let mut relations = vec![];
    let mut callbacks = Callbacks::new().on_relation(|name| relations.push(name.to_string()));
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);
    assert_eq!(vec!["a", "b", "c"], relations);
}

#[test]
fn empty_callbacks_visit_everything() {
    for sql in CORPUS {
        let statements = parse(sql);
        let mut callbacks = Callbacks::new();
        assert!(callbacks.is_empty());
        visit(&statements, &mut callbacks).unwrap();
    }
}

#[test]
fn break_stops_at_the_first_relation() {
    let statements = parse("SELECT * FROM a JOIN b JOIN c");
    let mut relations = vec![];
    let mut callbacks = Callbacks::new().pre_relation(|name| {
        relations.push(name.to_string());
        Ok(Flow::Break)
    });
    visit(&statements, &mut callbacks).unwrap();
    drop(callbacks);
    assert_eq!(vec!["a"], relations);
}

#[test]
fn callback_errors_reach_the_caller() {
    let statements = parse("SELECT * FROM a JOIN secret");
    let mut callbacks = Callbacks::default().pre_relation(|name| {
        if name.to_string() == "secret" {
            Err(format!("access to {} denied", name))
        } else {
            Ok(Flow::Continue)
        }
    });
    match visit(&statements, &mut callbacks) {
        Err(sqlast::VisitError::Callback(message)) => {
            assert_eq!("access to secret denied", message)
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
