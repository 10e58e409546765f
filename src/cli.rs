use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::ParamOverrides;
use crate::loader::DATA_PATH_PARAM;

#[derive(Parser, Debug)]
#[command(
    name = "issue-activity-report",
    version,
    about = "Load a GitHub issue export and re-emit it as typed, normalized JSON",
    long_about = None
)]
pub struct Cli {
  /// Path to the issues dataset (overrides the ISSUES_DATA_PATH parameter)
  #[arg(long)]
  pub data_path: Option<PathBuf>,

  /// Output location: file path, or "-" for stdout
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Pretty-print the emitted JSON
  #[arg(long)]
  pub pretty: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

/// Map CLI flags onto the parameter override batch. Flags the user did not
/// pass stay as skip entries so they never clobber env or config values.
pub fn overrides(cli: &Cli) -> ParamOverrides {
  let mut out = ParamOverrides::new();

  out.insert(
    DATA_PATH_PARAM,
    cli.data_path.as_ref().map(|p| Value::String(p.to_string_lossy().to_string())),
  );

  out
}
