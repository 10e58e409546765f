// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Layered parameter store merging live environment, discovered config file, and caller defaults
// role: config/store
// inputs: Optional injected search root; process environment; config.json found by upward probe
// outputs: Typed parameter values with env > file > default precedence
// side_effects: set_parameter/apply_overrides write process environment variables
// invariants:
// - base layer is built at most once per store and never mutated afterwards
// - live environment always wins over the base layer at read time
// - a missing config file is an empty base layer; a malformed one is fatal
// - overrides never swallow failures; a bad entry propagates to the caller
// errors: Config read/decode failures and tagged-env decode failures bubble with file/name context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use once_cell::sync::{Lazy, OnceCell};
use serde_json::Value;

use crate::codec;

/// Fixed filename probed from the working directory upward.
pub const CONFIG_FILE_NAME: &str = "config.json";

static GLOBAL: Lazy<ConfigStore> = Lazy::new(ConfigStore::new);

/// Process-wide store instance for binary entry points. Library callers that
/// need isolation (tests, embedders) construct their own via
/// [`ConfigStore::with_search_root`].
pub fn global() -> &'static ConfigStore {
  &GLOBAL
}

/// Layered key/value parameter store.
///
/// Reads resolve, highest precedence first: a live environment variable of the
/// exact name (decoded through the typed-value codec), then the base layer
/// sourced from the discovered config file, then the caller's default. The
/// base layer is built lazily on first read, exactly once; the `OnceCell`
/// guard keeps concurrent first reads from racing the file load.
pub struct ConfigStore {
  search_root: Option<PathBuf>,
  base: OnceCell<BTreeMap<String, Value>>,
}

impl Default for ConfigStore {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigStore {
  /// Store that probes for `config.json` from the current working directory.
  pub fn new() -> ConfigStore {
    ConfigStore {
      search_root: None,
      base: OnceCell::new(),
    }
  }

  /// Store that probes from an explicit directory instead of the cwd.
  pub fn with_search_root(root: impl Into<PathBuf>) -> ConfigStore {
    ConfigStore {
      search_root: Some(root.into()),
      base: OnceCell::new(),
    }
  }

  /// Build the base layer now. Idempotent: once built, later calls return
  /// without touching the filesystem. Absence of a config file is a valid
  /// deployment mode; a file that exists but fails to decode is fatal.
  pub fn initialize(&self) -> Result<()> {
    self.base().map(|_| ())
  }

  fn base(&self) -> Result<&BTreeMap<String, Value>> {
    self.base.get_or_try_init(|| self.read_base())
  }

  fn read_base(&self) -> Result<BTreeMap<String, Value>> {
    let start = match &self.search_root {
      Some(root) => root.clone(),
      None => env::current_dir().context("resolving working directory for config discovery")?,
    };

    let Some(path) = discover_config_file(&start) else {
      return Ok(BTreeMap::new());
    };

    let text =
      std::fs::read_to_string(&path).with_context(|| format!("reading config file {}", path.display()))?;

    let map: BTreeMap<String, Value> = serde_json::from_str(&text)
      .with_context(|| format!("config file {} is not a JSON object", path.display()))?;

    Ok(map)
  }

  /// Resolve a parameter, or `None` when no layer knows it.
  ///
  /// Always builds the base layer first: a malformed config file is a fatal
  /// misconfiguration even when the environment would have answered.
  pub fn get_parameter(&self, name: &str) -> Result<Option<Value>> {
    let base = self.base()?;

    if let Ok(raw) = env::var(name) {
      return codec::decode(Some(&raw)).with_context(|| format!("decoding environment value of {}", name));
    }

    Ok(base.get(name).cloned())
  }

  /// Resolve a parameter, falling back to `default` when no layer knows it.
  pub fn get_parameter_or(&self, name: &str, default: Value) -> Result<Value> {
    Ok(self.get_parameter(name)?.unwrap_or(default))
  }

  /// Write a parameter into the live environment layer (never the base layer).
  ///
  /// Non-string values go through the codec's `json:` tag, so a later
  /// [`get_parameter`](Self::get_parameter) returns the original structure.
  /// Strings are written verbatim and read back unchanged.
  pub fn set_parameter(&self, name: &str, value: &Value) -> Result<()> {
    validate_env_name(name)?;
    env::set_var(name, codec::encode(value));
    Ok(())
  }

  /// Apply a batch of overrides to the environment layer.
  ///
  /// An absent batch is a no-op. Entries holding `None` are skipped (the
  /// caller declined to override that parameter). Any individual failure
  /// propagates immediately; silently dropping a malformed override would
  /// let configuration drift go unnoticed.
  pub fn apply_overrides(&self, overrides: Option<&ParamOverrides>) -> Result<()> {
    let Some(overrides) = overrides else {
      return Ok(());
    };

    for (name, value) in overrides.entries() {
      if let Some(value) = value {
        self
          .set_parameter(name, value)
          .with_context(|| format!("applying override for {}", name))?;
      }
    }

    Ok(())
  }
}

/// Typed batch of parameter overrides, keyed by parameter name. `None` marks
/// a parameter the caller chose not to override.
#[derive(Debug, Default, Clone)]
pub struct ParamOverrides {
  entries: BTreeMap<String, Option<Value>>,
}

impl ParamOverrides {
  pub fn new() -> ParamOverrides {
    ParamOverrides::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
    self.entries.insert(name.into(), value);
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn entries(&self) -> impl Iterator<Item = (&String, &Option<Value>)> {
    self.entries.iter()
  }
}

fn validate_env_name(name: &str) -> Result<()> {
  if name.is_empty() || name.contains('=') || name.contains('\0') {
    bail!("parameter name {:?} cannot be stored as an environment variable", name);
  }

  Ok(())
}

/// Walk from `start` to the filesystem root; the first directory holding the
/// config filename wins.
fn discover_config_file(start: &Path) -> Option<PathBuf> {
  let mut dir = start;

  loop {
    let candidate = dir.join(CONFIG_FILE_NAME);

    if candidate.is_file() {
      return Some(candidate);
    }

    dir = dir.parent()?;
  }
}
