use super::*;

fn root(text: &str) -> Mapping {
    match decode(text).unwrap() {
        ParseNode::Map(m) => m,
        other => panic!("expected map, got {other:?}"),
    }
}

// -- Coercion --

#[test]
fn test_numeral_value_becomes_number() {
    let m = root(r#""a" "1""#);
    assert_eq!(m.get("a"), Some(&ParseNode::Number(1.0)));
}

#[test]
fn test_decimal_forms() {
    let m = root(r#""a" "1.5" "b" ".25" "c" "1." "d" "-3" "e" "12ab""#);
    assert_eq!(m.get("a"), Some(&ParseNode::Number(1.5)));
    assert_eq!(m.get("b"), Some(&ParseNode::Number(0.25)));
    assert_eq!(m.get("c"), Some(&ParseNode::String("1.".into())));
    assert_eq!(m.get("d"), Some(&ParseNode::String("-3".into())));
    assert_eq!(m.get("e"), Some(&ParseNode::String("12ab".into())));
}

#[test]
fn test_true_literal() {
    let m = root(r#""a" "true""#);
    assert_eq!(m.get("a"), Some(&ParseNode::Bool(true)));
}

#[test]
fn test_false_literal_is_false() {
    let m = root(r#""a" "false""#);
    assert_eq!(m.get("a"), Some(&ParseNode::Bool(false)));
}

#[test]
fn test_typed_accessors_follow_coercion() {
    let node = decode(r#""n" "0.5" "t" "true" "s" "1.""#).unwrap();
    assert_eq!(node.get("n").and_then(ParseNode::as_f64), Some(0.5));
    assert_eq!(node.get("t").and_then(ParseNode::as_bool), Some(true));
    assert_eq!(node.get("s").and_then(ParseNode::as_f64), None);
    assert_eq!(node.get("n").and_then(ParseNode::as_bool), None);
    assert_eq!(node.get("s").and_then(ParseNode::as_str), Some("1."));
}

#[test]
fn test_only_exact_literals_coerce() {
    let m = root(r#""a" "True" "b" "yes" "c" "" "d" "null" "e" "undefined""#);
    assert_eq!(m.get("a"), Some(&ParseNode::String("True".into())));
    assert_eq!(m.get("b"), Some(&ParseNode::String("yes".into())));
    assert_eq!(m.get("c"), Some(&ParseNode::String(String::new())));
    assert_eq!(m.get("d"), Some(&ParseNode::Null));
    assert_eq!(m.get("e"), Some(&ParseNode::Absent));
}

// -- Structure --

#[test]
fn test_nested_object() {
    let node = decode(r#""a" { "b" "x" }"#).unwrap();
    assert_eq!(
        node.path(&["a", "b"]),
        Some(&ParseNode::String("x".into()))
    );
    assert_eq!(node.as_map().unwrap().len(), 1);
}

#[test]
fn test_sibling_objects_keep_source_order() {
    let m = root(
        r#"
"lang"
{
    "Language" "English"
    "Tokens"
    {
        "Zeta" "z"
        "Alpha" "a"
    }
}
"#,
    );
    let tokens = m
        .get("lang")
        .and_then(|l| l.get("Tokens"))
        .and_then(ParseNode::as_map)
        .unwrap();
    assert_eq!(tokens.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
}

#[test]
fn test_repeated_key_last_write_wins() {
    let m = root(r#""a" "1" "a" "2""#);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("a"), Some(&ParseNode::Number(2.0)));
}

#[test]
fn test_object_replaces_earlier_value() {
    let m = root(r#""a" "1" "a" { "b" "2" }"#);
    assert_eq!(m.get("a").and_then(|a| a.get("b")), Some(&ParseNode::Number(2.0)));
}

#[test]
fn test_empty_key_is_still_a_key() {
    let m = root(r#""" "v""#);
    assert_eq!(m.get(""), Some(&ParseNode::String("v".into())));
}

#[test]
fn test_unclosed_object_is_kept() {
    let m = root(r#""a" { "b" "x""#);
    assert_eq!(m.get("a").and_then(|a| a.get("b")), Some(&ParseNode::String("x".into())));
}

#[test]
fn test_dangling_key_dropped() {
    let m = root(r#""a" "1" "b""#);
    assert_eq!(m.len(), 1);
    assert!(!m.contains_key("b"));
}

// -- Normalization --

#[test]
fn test_comment_line_leaves_no_artifact() {
    let m = root("// comment\n\"k\" \"v\"");
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(&ParseNode::String("v".into())));
}

#[test]
fn test_trailing_comment_with_quotes_ignored() {
    let m = root("\"k\" \"v\" // \"not\" \"this\"");
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(&ParseNode::String("v".into())));
}

#[test]
fn test_include_directive_ignored() {
    let m = root("#base \"base.txt\"\n\"k\" \"v\"");
    assert_eq!(m.keys().collect::<Vec<_>>(), vec!["k"]);
}

#[test]
fn test_bom_and_crlf() {
    let m = root("\u{feff}\"a\"\r\n{\r\n\t\"b\" \"c\"\r\n}\r\n");
    assert_eq!(m.get("a").and_then(|a| a.get("b")), Some(&ParseNode::String("c".into())));
}

// -- Errors --

#[test]
fn test_unmatched_close_fails() {
    let err = decode(r#""a" "1" }"#).unwrap_err();
    assert_eq!(err, FormatError::UnexpectedClose { line: 1 });
}

#[test]
fn test_extra_close_after_object_fails() {
    let err = decode("\"a\" {\n}\n}").unwrap_err();
    assert_eq!(err, FormatError::UnexpectedClose { line: 3 });
}

#[test]
fn test_open_without_key_fails() {
    let err = decode("{ \"a\" \"1\" }").unwrap_err();
    assert_eq!(err, FormatError::OpenWithoutKey { line: 1 });
}

#[test]
fn test_open_after_complete_pair_fails() {
    let err = decode("\"a\" \"1\"\n{").unwrap_err();
    assert_eq!(err, FormatError::OpenWithoutKey { line: 2 });
}

#[test]
fn test_no_tokens_fails() {
    assert_eq!(decode("").unwrap_err(), FormatError::Empty);
    assert_eq!(decode("// only a comment\n#base x").unwrap_err(), FormatError::Empty);
    assert_eq!(decode("bare words only").unwrap_err(), FormatError::Empty);
}

// -- Serialization --

#[test]
fn test_serialize_as_json() {
    let node = decode(r#""a" { "n" "3" "s" "x" "u" "undefined" }"#).unwrap();
    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(json, r#"{"a":{"n":3.0,"s":"x"}}"#);
}
