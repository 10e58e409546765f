use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub const SAMPLE_DATASET: &str = r#"[
  {
    "url": "http://example.com/issue/1",
    "creator": "user1",
    "labels": ["bug"],
    "state": "open",
    "assignees": [],
    "title": "First issue",
    "number": 1,
    "created_date": "2021-01-01T12:00:00Z",
    "events": [
      { "event_type": "commented", "author": "user2", "event_date": "2021-01-02T08:00:00Z" },
      { "event_type": "labeled", "label": "bug", "event_date": "not-a-date" }
    ]
  },
  {
    "number": null,
    "state": "closed",
    "events": []
  }
]"#;

#[allow(dead_code)]
pub fn write_dataset(dir: &Path, content: &str) -> PathBuf {
  let path = dir.join("issues.json");
  std::fs::write(&path, content).unwrap();
  path
}

/// Drop a config.json into `dir` pointing ISSUES_DATA_PATH at `data_path`.
#[allow(dead_code)]
pub fn write_config(dir: &Path, data_path: &Path) {
  let config = serde_json::json!({ "ISSUES_DATA_PATH": data_path.to_string_lossy() });
  std::fs::write(dir.join("config.json"), config.to_string()).unwrap();
}
