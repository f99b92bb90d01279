//! Tests for loading templates from disk.

use std::fs;

use tempfile::TempDir;
use templite::{LoadError, SyntaxError, Template, context};

#[test]
fn test_from_file_compiles_and_renders() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.txt");
    fs::write(&path, "Hello, {{ name }}!\n").unwrap();

    let template = Template::from_file(&path, [context! { "name" => "Ann" }]).unwrap();
    assert_eq!(template.render_default().unwrap(), "Hello, Ann!\n");
    assert_eq!(template.variables().free, vec!["name".to_string()]);
}

#[test]
fn test_from_file_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.txt");

    let err = Template::from_file(&path, []).unwrap_err();
    assert!(matches!(err, LoadError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn test_from_file_syntax_error_keeps_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.txt");
    fs::write(&path, "{% if a %}open").unwrap();

    let err = Template::from_file(&path, []).unwrap_err();
    let LoadError::Syntax { path: p, source } = err else {
        panic!("expected a syntax error");
    };
    assert_eq!(p, path);
    assert_eq!(
        source,
        SyntaxError::UnmatchedOpen {
            kind: "if".into(),
            offset: 0,
        }
    );
}

#[test]
fn test_load_error_message_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "{% nope %}").unwrap();

    let message = Template::from_file(&path, []).unwrap_err().to_string();
    assert!(message.contains("bad.txt"), "{message}");
    assert!(message.contains("unrecognized tag"), "{message}");
}
