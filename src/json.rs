//! JSON projection of syntax trees.
//!
//! Enums serialize externally tagged, so every node becomes an object with
//! exactly one key naming the populated variant. Reading JSON back checks
//! that shape and then walks the tree once without hooks, which rejects
//! trees the parser could never have produced.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;

use crate::ast::visitor::{visit, Callbacks, Visit};
use crate::error::{Error, MalformedNodeError, Result, VisitError};

pub fn to_json<N: Serialize + ?Sized>(node: &N) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(node)?)
}

pub fn to_json_string<N: Serialize + ?Sized>(node: &N, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };
    Ok(text)
}

/// Reads a tree from JSON text.
///
/// Text that is not JSON at all is an [`Error::Json`]. JSON that does not
/// describe a well-formed `N` (an enum object with zero or several variant
/// keys, an unknown variant, a missing field, a span ending before it
/// starts, an empty name) is an
/// [`Error::Malformed`].
pub fn from_json<N: DeserializeOwned + Visit>(json: &str) -> Result<N> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    from_value(value)
}

/// Like [`from_json`], for an already parsed JSON value.
pub fn from_value<N: DeserializeOwned + Visit>(value: serde_json::Value) -> Result<N> {
    let node: N = serde_json::from_value(value).map_err(malformed::<N>)?;
    validate(&node)?;
    Ok(node)
}

fn malformed<N>(err: serde_json::Error) -> Error {
    match err.classify() {
        Category::Data => MalformedNodeError::new(node_name::<N>(), err.to_string()).into(),
        _ => Error::Json(err),
    }
}

fn validate<N: Visit + ?Sized>(node: &N) -> Result<()> {
    let mut callbacks = Callbacks::new();
    visit(node, &mut callbacks).map_err(|err| match err {
        VisitError::Malformed(err) => Error::Malformed(err),
        VisitError::Callback(never) => match never {},
    })?;
    Ok(())
}

/// `Statement` for `sqlast::ast::statement::Statement`. Generic types keep
/// their full path.
fn node_name<N>() -> &'static str {
    let name = type_name::<N>();
    if name.contains('<') {
        return name;
    }
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::ast::{Expr, Statement, Value};
    use crate::dialect::Dialect;
    use crate::parser::parse_sql;

    fn parse(sql: &str) -> Vec<Statement> {
        parse_sql(Dialect::Generic, sql, 50).unwrap()
    }

    #[test]
    fn literals_have_the_tagged_shape() {
        let json = to_json(&Expr::Value(Value::number("1").into())).unwrap();
        assert_eq!(json!({"Number": ["1", false]}), json["Value"]["value"]);
    }

    #[test]
    fn identifiers_carry_their_span() {
        let statements = parse("SELECT a FROM users");
        let json = to_json(&statements).unwrap();
        let text = json.to_string();
        assert!(text.contains(r#""value":"users""#), "{}", text);
        assert!(text.contains(r#""quote_style":null"#), "{}", text);
        assert!(text.contains(r#""span""#), "{}", text);
    }

    #[test]
    fn statements_survive_a_round_trip() {
        let sql = "WITH t AS (SELECT 1 AS x) SELECT x, count(*) FROM t \
                   LEFT JOIN u USING(x) WHERE x > 0 GROUP BY x ORDER BY x DESC LIMIT 3";
        let statements = parse(sql);
        let text = to_json_string(&statements, false).unwrap();
        let back: Vec<Statement> = from_json(&text).unwrap();
        assert_eq!(statements, back);
        assert_eq!(text, to_json_string(&back, false).unwrap());
    }

    #[test]
    fn pretty_output_spans_lines() {
        let statements = parse("SELECT 1");
        assert!(to_json_string(&statements, true).unwrap().contains('\n'));
        assert!(!to_json_string(&statements, false).unwrap().contains('\n'));
    }

    #[test]
    fn object_without_variant_is_malformed() {
        match from_json::<Expr>("{}") {
            Err(Error::Malformed(err)) => assert_eq!("Expr", err.node),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn object_with_two_variants_is_malformed() {
        let json = r#"{"Wildcard": null, "Value": {"Null": null}}"#;
        assert!(matches!(from_json::<Expr>(json), Err(Error::Malformed(_))));
    }

    #[test]
    fn unknown_variant_is_malformed() {
        match from_json::<Value>(r#"{"Decimal": "1.0"}"#) {
            Err(Error::Malformed(err)) => {
                assert_eq!("Value", err.node);
                assert!(err.reason.contains("unknown variant"), "{}", err.reason);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_object_name_is_rejected_after_decoding() {
        let statements = parse("SELECT * FROM users");
        let mut json = to_json(&statements).unwrap();
        let name = &mut json[0]["Query"]["body"]["Select"]["from"][0]["relation"]["Table"]["name"];
        *name = json!([]);
        match from_value::<Vec<Statement>>(json) {
            Err(Error::Malformed(err)) => assert_eq!("ObjectName", err.node),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn backwards_span_is_malformed() {
        let statements = parse("SELECT * FROM users");
        let mut json = to_json(&statements).unwrap();
        let name = &mut json[0]["Query"]["body"]["Select"]["from"][0]["relation"]["Table"]["name"];
        name[0]["Identifier"]["span"]["end"] = json!({"line": 1, "column": 1});
        match from_value::<Vec<Statement>>(json) {
            Err(Error::Malformed(err)) => {
                assert!(err.reason.contains("malformed Span"), "{}", err.reason)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn broken_text_is_a_json_error() {
        assert!(matches!(from_json::<Expr>("{\"Value\""), Err(Error::Json(_))));
    }
}
