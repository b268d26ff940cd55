//! Tests for loading datasets from disk

mod common;

use std::path::Path;

use insight_core::{loader, ColumnKind, Error};

#[test]
fn test_load_utf8_csv() {
    let (_dir, path) = common::write_fixture(
        "people.csv",
        b"age,income,city\n31,52000.5,Oslo\n45,61000,Rome\n28,,Oslo\n",
    );

    let dataset = loader::load(&path).unwrap();
    assert_eq!(dataset.name(), "people");
    assert_eq!(dataset.shape(), (3, 3));
    assert_eq!(dataset.require("age").unwrap().kind(), ColumnKind::Integer);
    assert_eq!(dataset.require("income").unwrap().null_count(), 1);
}

#[test]
fn test_load_windows_1252_csv() {
    // 0xE9 is 'é' in Windows-1252 and invalid as UTF-8
    let (_dir, path) = common::write_fixture("cafes.csv", b"name;rating\ncaf\xe9;4\nbar;3\n");

    let dataset = loader::load(&path).unwrap();
    let names = dataset.require("name").unwrap().as_text().unwrap();
    assert_eq!(names[0].as_deref(), Some("caf\u{e9}"));
    assert_eq!(dataset.require("rating").unwrap().kind(), ColumnKind::Integer);
}

#[test]
fn test_load_utf8_bom_csv() {
    let (_dir, path) = common::write_fixture("bom.csv", b"\xef\xbb\xbfx,y\n1,2\n");

    let dataset = loader::load(&path).unwrap();
    assert_eq!(dataset.column_names(), vec!["x", "y"]);
}

#[test]
fn test_load_explicit_delimiter() {
    let (_dir, path) = common::write_fixture("pipes.csv", b"a|b\n1|2\n");

    let options = loader::LoadOptions { delimiter: Some(b'|') };
    let dataset = loader::load_with(&path, options).unwrap();
    assert_eq!(dataset.shape(), (1, 2));
}

#[test]
fn test_load_missing_file() {
    let err = loader::load(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_empty_file() {
    let (_dir, path) = common::write_fixture("empty.csv", b"");
    assert!(matches!(loader::load(&path), Err(Error::EmptyDataset(_))));
}

#[test]
fn test_load_malformed_file() {
    let (_dir, path) = common::write_fixture("bad.csv", b"a,b\n1,2,3\n");
    assert!(matches!(loader::load(&path), Err(Error::Malformed(_))));
}
