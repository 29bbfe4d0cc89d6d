//! Integration tests for the JSON config accessor

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

use figure_kit::{ConfigError, JsonDataReader};

#[test]
fn test_get_sees_external_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"threshold": 0.5}"#).unwrap();

    let mut reader = JsonDataReader::open(&path).unwrap();
    assert_eq!(reader.get("threshold").unwrap(), Some(&json!(0.5)));

    std::fs::write(&path, r#"{"threshold": 0.75, "added": true}"#).unwrap();
    assert_eq!(reader.get("threshold").unwrap(), Some(&json!(0.75)));
    assert_eq!(reader.get("added").unwrap(), Some(&json!(true)));
}

#[test]
fn test_nested_lookups_use_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"plot": {"axes": {"ymax": 10}}}"#).unwrap();

    let reader = JsonDataReader::open(&path).unwrap();
    std::fs::write(&path, r#"{"plot": {"axes": {"ymax": 20}}}"#).unwrap();

    assert_eq!(reader.get_nested(&["plot", "axes", "ymax"]), Some(&json!(10)));
    assert_eq!(reader.get_nested(&["plot", "legend"]), None);
    assert_eq!(reader.get_nested(&["plot", "axes", "ymax", "deeper"]), None);
}

#[test]
fn test_get_refreshes_the_snapshot_for_nested_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"plot": {"old": 1}, "run": "a"}"#).unwrap();

    let mut reader = JsonDataReader::open(&path).unwrap();
    std::fs::write(&path, r#"{"plot": {"new": 2}, "run": "b"}"#).unwrap();
    assert_eq!(reader.get_nested(&["plot", "old"]), Some(&json!(1)));

    assert_eq!(reader.get("run").unwrap(), Some(&json!("b")));
    assert_eq!(reader.get_nested(&["plot", "new"]), Some(&json!(2)));
    assert_eq!(reader.get_nested(&["plot", "old"]), None);
}

#[test]
fn test_attr_before_and_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"name": "exp-7"}"#).unwrap();

    let mut reader = JsonDataReader::new(&path);
    assert!(matches!(
        reader.attr("name"),
        Err(ConfigError::MissingAttribute { .. })
    ));

    reader.load().unwrap();
    assert_eq!(reader.attr("name").unwrap(), &json!("exp-7"));
}

#[test]
fn test_typed_attribute() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Axes {
        ymin: f64,
        ymax: f64,
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"axes": {"ymin": -1, "ymax": 1.5}}"#).unwrap();

    let reader = JsonDataReader::open(&path).unwrap();
    let axes: Axes = reader.attr_as("axes").unwrap();
    assert_eq!(
        axes,
        Axes {
            ymin: -1.0,
            ymax: 1.5
        }
    );
}

#[test]
fn test_file_removed_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"a": 1}"#).unwrap();

    let mut reader = JsonDataReader::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(reader.get("a"), Err(ConfigError::NotFound { .. })));
    assert_eq!(reader.attr("a").unwrap(), &json!(1));
}
