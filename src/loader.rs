use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::ConfigStore;
use crate::model::Issue;

/// Well-known parameter naming the dataset file to load.
pub const DATA_PATH_PARAM: &str = "ISSUES_DATA_PATH";

/// Reads the configured dataset file and types its records.
pub struct DataLoader<'a> {
  store: &'a ConfigStore,
}

impl<'a> DataLoader<'a> {
  pub fn new(store: &'a ConfigStore) -> DataLoader<'a> {
    DataLoader { store }
  }

  /// Resolve the dataset path, read and decode the file, and parse every
  /// record in source order. All failures here are fatal: an unset path, an
  /// unreadable file, malformed JSON, or any record whose parse fails.
  pub fn load_issues(&self) -> Result<Vec<Issue>> {
    let path = match self.store.get_parameter(DATA_PATH_PARAM)? {
      Some(Value::String(path)) => path,
      Some(other) => bail!("{} must be a string path, got {}", DATA_PATH_PARAM, other),
      None => bail!("{} is not set in the environment or config file", DATA_PATH_PARAM),
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading dataset file {}", path))?;

    let records: Vec<Value> =
      serde_json::from_str(&text).with_context(|| format!("dataset file {} is not a JSON array", path))?;

    records
      .iter()
      .enumerate()
      .map(|(idx, raw)| Issue::parse(raw).with_context(|| format!("parsing issue record #{} in {}", idx, path)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{ConfigStore, CONFIG_FILE_NAME};
  use crate::model::State;
  use serial_test::serial;

  fn write_dataset(dir: &std::path::Path, content: &str) -> String {
    let path = dir.join("issues.json");
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
  }

  fn store_pointing_at(dir: &std::path::Path, data_path: &str) -> ConfigStore {
    let config = serde_json::json!({ DATA_PATH_PARAM: data_path });
    std::fs::write(dir.join(CONFIG_FILE_NAME), config.to_string()).unwrap();
    ConfigStore::with_search_root(dir)
  }

  #[test]
  #[serial]
  fn loads_typed_issues_from_configured_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_dataset(dir.path(), r#"[{"number": 1, "state": "open", "events": []}]"#);
    let store = store_pointing_at(dir.path(), &data);

    std::env::remove_var(DATA_PATH_PARAM);
    let issues = DataLoader::new(&store).load_issues().unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].number, 1);
    assert_eq!(issues[0].state, State::Open);
    assert!(issues[0].events.is_empty());
  }

  #[test]
  #[serial]
  fn unset_data_path_is_a_clear_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ConfigStore::with_search_root(dir.path());

    std::env::remove_var(DATA_PATH_PARAM);
    let err = DataLoader::new(&store).load_issues().unwrap_err();

    assert!(format!("{:#}", err).contains(DATA_PATH_PARAM));
  }

  #[test]
  #[serial]
  fn missing_dataset_file_propagates() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = store_pointing_at(dir.path(), "/definitely/not/here.json");

    std::env::remove_var(DATA_PATH_PARAM);
    let err = DataLoader::new(&store).load_issues().unwrap_err();

    assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
  }

  #[test]
  #[serial]
  fn malformed_dataset_json_propagates() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_dataset(dir.path(), "{not an array");
    let store = store_pointing_at(dir.path(), &data);

    std::env::remove_var(DATA_PATH_PARAM);
    assert!(DataLoader::new(&store).load_issues().is_err());
  }

  #[test]
  #[serial]
  fn bad_record_names_its_index() {
    let dir = tempfile::TempDir::new().unwrap();
    let data = write_dataset(
      dir.path(),
      r#"[{"number": 1, "state": "open"}, {"number": 2, "state": "unknown"}]"#,
    );
    let store = store_pointing_at(dir.path(), &data);

    std::env::remove_var(DATA_PATH_PARAM);
    let err = DataLoader::new(&store).load_issues().unwrap_err();
    let msg = format!("{:#}", err);

    assert!(msg.contains("record #1"));
    assert!(msg.contains("unknown"));
  }

  #[test]
  #[serial]
  fn env_override_redirects_the_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let configured = write_dataset(dir.path(), r#"[{"number": 1, "state": "open"}]"#);
    let store = store_pointing_at(dir.path(), &configured);

    let other = dir.path().join("override.json");
    std::fs::write(&other, r#"[{"number": 7, "state": "closed"}]"#).unwrap();

    std::env::set_var(DATA_PATH_PARAM, other.to_string_lossy().to_string());
    let issues = DataLoader::new(&store).load_issues().unwrap();
    std::env::remove_var(DATA_PATH_PARAM);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].number, 7);
    assert_eq!(issues[0].state, State::Closed);
  }
}
