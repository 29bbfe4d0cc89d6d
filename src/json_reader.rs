//! JSON-backed configuration accessor
//!
//! [`JsonDataReader::get`] re-reads the file on every call so edits made by
//! other programs are picked up. [`get_nested`](JsonDataReader::get_nested)
//! and [`attr`](JsonDataReader::attr) only look at the snapshot from the
//! most recent load.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when loading or reading a JSON config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The JSON file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read JSON file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("The JSON file '{}' is not valid JSON: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("The JSON file '{}' does not contain an object at the top level", path.display())]
    NotAnObject { path: PathBuf },

    #[error("no attribute '{name}'")]
    MissingAttribute { name: String },

    #[error("attribute '{name}' has an unexpected type: {source}")]
    Convert {
        name: String,
        source: serde_json::Error,
    },
}

/// Reader for a JSON object stored on disk
#[derive(Debug, Clone)]
pub struct JsonDataReader {
    path: PathBuf,
    data: Option<Map<String, Value>>,
}

impl JsonDataReader {
    /// Create a reader without touching the file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: None,
        }
    }

    /// Create a reader and load the file immediately
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut reader = Self::new(path);
        reader.load()?;
        Ok(reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The most recently loaded document, if any
    pub fn snapshot(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Read and parse the whole file, replacing the current snapshot.
    ///
    /// On failure the previous snapshot is kept.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                ConfigError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: self.path.clone(),
                source,
            })?;
        match value {
            Value::Object(map) => {
                debug!("loaded {} keys from '{}'", map.len(), self.path.display());
                self.data = Some(map);
                Ok(())
            }
            _ => Err(ConfigError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    /// Reload the file, then look up `key`. `Ok(None)` means the key is absent.
    pub fn get(&mut self, key: &str) -> Result<Option<&Value>, ConfigError> {
        self.load()?;
        Ok(self.data.as_ref().and_then(|data| data.get(key)))
    }

    /// Walk the current snapshot through `keys` without reloading.
    ///
    /// Returns `None` when nothing is loaded, a key is missing, or a step
    /// along the path is not an object. An empty path yields `None`.
    pub fn get_nested<S: AsRef<str>>(&self, keys: &[S]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        let mut current = self.data.as_ref()?.get(first.as_ref())?;
        for key in rest {
            current = current.as_object()?.get(key.as_ref())?;
        }
        Some(current)
    }

    /// Look up `name` in the current snapshot without reloading
    pub fn attr(&self, name: &str) -> Result<&Value, ConfigError> {
        self.data
            .as_ref()
            .and_then(|data| data.get(name))
            .ok_or_else(|| ConfigError::MissingAttribute {
                name: name.to_string(),
            })
    }

    /// Typed version of [`attr`](Self::attr)
    pub fn attr_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        let value = self.attr(name)?;
        serde_json::from_value(value.clone()).map_err(|source| ConfigError::Convert {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_open_and_get() {
        let file = config_file(r#"{"name": "run-1", "epochs": 20}"#);
        let mut reader = JsonDataReader::open(file.path()).unwrap();
        assert_eq!(reader.get("epochs").unwrap(), Some(&json!(20)));
        assert_eq!(reader.get("missing").unwrap(), None);
    }

    #[test]
    fn test_null_is_not_absent() {
        let file = config_file(r#"{"seed": null}"#);
        let mut reader = JsonDataReader::new(file.path());
        assert_eq!(reader.get("seed").unwrap(), Some(&Value::Null));
    }

    #[test]
    fn test_get_nested() {
        let file = config_file(r#"{"model": {"layers": {"hidden": 64}}, "tags": ["a"]}"#);
        let reader = JsonDataReader::open(file.path()).unwrap();
        assert_eq!(
            reader.get_nested(&["model", "layers", "hidden"]),
            Some(&json!(64))
        );
        assert_eq!(reader.get_nested(&["model", "optimizer"]), None);
        assert_eq!(reader.get_nested(&["tags", "a"]), None);
        assert_eq!(reader.get_nested::<&str>(&[]), None);
    }

    #[test]
    fn test_get_nested_before_load() {
        let reader = JsonDataReader::new("does-not-matter.json");
        assert_eq!(reader.get_nested(&["a"]), None);
    }

    #[test]
    fn test_attr_requires_a_load() {
        let file = config_file(r#"{"lr": 0.01}"#);
        let mut reader = JsonDataReader::new(file.path());
        assert!(matches!(
            reader.attr("lr"),
            Err(ConfigError::MissingAttribute { name }) if name == "lr"
        ));
        reader.load().unwrap();
        assert_eq!(reader.attr("lr").unwrap(), &json!(0.01));
        assert!(matches!(
            reader.attr("momentum"),
            Err(ConfigError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_attr_as() {
        let file = config_file(r#"{"sizes": [1, 2, 3], "name": "x"}"#);
        let reader = JsonDataReader::open(file.path()).unwrap();
        let sizes: Vec<u32> = reader.attr_as("sizes").unwrap();
        assert_eq!(sizes, vec![1, 2, 3]);
        assert!(matches!(
            reader.attr_as::<u32>("name"),
            Err(ConfigError::Convert { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonDataReader::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_json_keeps_snapshot() {
        let file = config_file(r#"{"a": 1}"#);
        let mut reader = JsonDataReader::open(file.path()).unwrap();
        std::fs::write(file.path(), "{not json").unwrap();
        assert!(matches!(reader.load(), Err(ConfigError::Invalid { .. })));
        assert_eq!(reader.attr("a").unwrap(), &json!(1));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let file = config_file("[1, 2, 3]");
        let err = JsonDataReader::open(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { .. }));
    }
}
