use grammar_example::{parse_script, Call, Expression, Let, Number, Script, ScriptGrammar, Text};
use parser_framework::{Driver, ErrorKind, Fixture, ScanContext};
use regex::Regex;
use serde_json::json;

#[test]
fn test_number_fixtures() {
    Fixture::fields("42", json!({"value": 42}))
        .check::<ScriptGrammar, Number>()
        .unwrap();
    Fixture::fields("-1.5", json!({"value": -1.5}))
        .check::<ScriptGrammar, Number>()
        .unwrap();
}

#[test]
fn test_number_beyond_integer_range() {
    Fixture::fields("100000000000000000000", json!({"value": 1e20}))
        .check::<ScriptGrammar, Number>()
        .unwrap();
    Fixture::fields("-0.0000001", json!({"value": -1e-7}))
        .check::<ScriptGrammar, Number>()
        .unwrap();

    let mut driver = Driver::new::<ScriptGrammar>("100000000000000000000").unwrap();
    let id = driver.parse::<Number>(None).unwrap();
    assert_eq!(driver.node(id).render(None), "100000000000000000000.0");

    let mut driver = Driver::new::<ScriptGrammar>("2.0").unwrap();
    let id = driver.parse::<Number>(None).unwrap();
    assert_eq!(driver.node(id).render(None), "2.0");
}

#[test]
fn test_text_fixtures() {
    Fixture::fields(r#""hi\u{21}""#, json!({"value": "hi!"}))
        .check::<ScriptGrammar, Text>()
        .unwrap();
    Fixture::fields(r#""say \"x\"\n\\""#, json!({"value": "say \"x\"\n\\"}))
        .check::<ScriptGrammar, Text>()
        .unwrap();
    Fixture::fields(r#""caf\u{e9}""#, json!({"value": "café"}))
        .with_options(json!({"ascii": true}))
        .check::<ScriptGrammar, Text>()
        .unwrap();
}

#[test]
fn test_text_errors() {
    Fixture::error(r#""bad \u{zz}""#, Regex::new("invalid unicode sequence: zz").unwrap())
        .check::<ScriptGrammar, Text>()
        .unwrap();
    Fixture::error(r#""bad \q""#, Regex::new("invalid escape sequence").unwrap())
        .check::<ScriptGrammar, Text>()
        .unwrap();
    Fixture::error(r#""open"#, Regex::new("unterminated text").unwrap())
        .check::<ScriptGrammar, Text>()
        .unwrap();
}

#[test]
fn test_ascii_rendering() {
    let mut driver = Driver::new::<ScriptGrammar>(r#""naïve""#).unwrap();
    let id = driver.parse::<Text>(None).unwrap();
    let text = driver.node(id);
    assert_eq!(text.render(None), r#""naïve""#);
    assert_eq!(text.render(Some(&json!({"ascii": true}))), r#""na\u{ef}ve""#);
}

#[test]
fn test_call_fixtures() {
    Fixture::fields(
        r#"max( 1 ,x,"y" )"#,
        json!({
            "name": {"name": "max"},
            "args": [
                {"number": {"value": 1}},
                {"identifier": {"name": "x"}},
                {"text": {"value": "y"}}
            ]
        }),
    )
    .check::<ScriptGrammar, Call>()
    .unwrap();

    Fixture::fields("now()", json!({"name": {"name": "now"}, "args": []}))
        .check::<ScriptGrammar, Call>()
        .unwrap();

    Fixture::error("f(1,)", Regex::new("expected: Expression").unwrap())
        .check::<ScriptGrammar, Call>()
        .unwrap();
}

#[test]
fn test_expression_replays_names_as_calls() {
    Fixture::fields(
        "outer(inner(2))",
        json!({"call": {"name": {"name": "outer"}, "args": [
            {"call": {"name": {"name": "inner"}, "args": [{"number": {"value": 2}}]}}
        ]}}),
    )
    .check::<ScriptGrammar, Expression>()
    .unwrap();

    Fixture::fields("plain", json!({"identifier": {"name": "plain"}}))
        .check::<ScriptGrammar, Expression>()
        .unwrap();
}

#[test]
fn test_let_fixtures() {
    Fixture::fields(
        "LET answer=42 ;",
        json!({"name": {"name": "answer"}, "value": {"number": {"value": 42}}}),
    )
    .check::<ScriptGrammar, Let>()
    .unwrap();

    Fixture::error("let x = ;", Regex::new(r"(?s)line 1, column 8.*expected an expression").unwrap())
        .check::<ScriptGrammar, Let>()
        .unwrap();
}

#[test]
fn test_script_round_trip() {
    let source = "let a = 1;\n  let b = f(a, \"\\u{2603}\");\n";
    let (driver, id) = parse_script(source).unwrap();
    let script = driver.node(id);

    let statements = script.children("statements");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].start(), Some(13));
    assert_eq!(
        script.render(None),
        "let a = 1;\nlet b = f(a, \"\u{2603}\");"
    );

    let call = statements[1]
        .child("value")
        .and_then(|value| value.child("call"))
        .unwrap();
    let arg = call.children("args")[0];
    assert_eq!(arg.ancestor("Let").map(|node| node.id()), Some(statements[1].id()));
    assert_eq!(arg.ancestor("Script").map(|node| node.id()), Some(id));
}

#[test]
fn test_script_errors_point_at_the_failure() {
    let err = parse_script("let a = 1;\nlet b = 2\nlet c = 3;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        err.to_string(),
        "SyntaxError at line 3, column 1\n\n  1 |let a = 1;\n  2 |let b = 2\n> 3 |let c = 3;\n\n Message: expected: ;"
    );

    let err = parse_script("let a = 1; oops").unwrap_err();
    assert_eq!(err.diagnostic().unwrap().message(), "expected word: let");
}

#[test]
fn test_empty_script() {
    let (driver, id) = parse_script("  \n ").unwrap();
    assert!(driver.node(id).children("statements").is_empty());
    assert!(driver.is_end());
    Fixture::fields("", json!({"statements": []}))
        .check::<ScriptGrammar, Script>()
        .unwrap();
}
