//! Tests for the markup adapter

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tagdict_markup::{Element, Error, load, parse};
use tempfile::TempDir;

#[test]
fn test_parse_nested_groups() {
    let source = r#"<?xml version="1.0" encoding="utf-8"?>
<Structure>
  <DbUser>SomeUserName</DbUser>
  <GDS identity="myId">
    <IsSys>SYS</IsSys>
  </GDS>
</Structure>"#;

    let root = parse(source).unwrap().expect("document should have a root");

    let expected = Element::new("Structure")
        .with_child(Element::new("DbUser").with_text("SomeUserName"))
        .with_child(
            Element::new("GDS")
                .with_attribute("identity", "myId")
                .with_child(Element::new("IsSys").with_text("SYS")),
        );
    assert_eq!(root, expected);
}

#[test]
fn test_parse_strips_byte_order_mark() {
    let root = parse("\u{feff}<Structure><A>1</A></Structure>").unwrap().unwrap();
    assert_eq!(root.children[0].text.as_deref(), Some("1"));
}

#[test]
fn test_parse_keeps_cdata_and_entities() {
    let root = parse("<S><Conn><![CDATA[a<b]]></Conn><Amp>x &amp; y</Amp></S>")
        .unwrap()
        .unwrap();
    assert_eq!(root.children[0].text.as_deref(), Some("a<b"));
    assert_eq!(root.children[1].text.as_deref(), Some("x & y"));
}

#[rstest]
#[case("<Structure>")]
#[case("not markup at all")]
#[case("<A></B>")]
fn test_parse_rejects_malformed(#[case] source: &str) {
    assert!(matches!(parse(source), Err(Error::Parse { .. })));
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("structure.xml");
    fs::write(&path, "<Structure><DbUser>SomeUserName</DbUser></Structure>").unwrap();

    let root = load(&path).unwrap().unwrap();
    assert_eq!(root.children[0].name, "DbUser");
}

#[test]
fn test_load_empty_file_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.xml");
    fs::write(&path, "").unwrap();

    assert!(load(&path).unwrap().is_none());
}

#[test]
fn test_load_missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.xml");

    let err = load(&path).unwrap_err();
    match err {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_parse_error_names_file_origin() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.xml");
    fs::write(&path, "<Structure><A></Structure>").unwrap();

    let err = load(&path).unwrap_err();
    let display = err.to_string();
    assert!(
        display.contains("broken.xml"),
        "Error display should contain the file name, got: {}",
        display
    );
}
