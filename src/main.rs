use anyhow::{Context, Result};
use clap::Parser;

use issue_activity_report::cli::{self, Cli};
use issue_activity_report::config;
use issue_activity_report::loader::DataLoader;
use issue_activity_report::util;

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: fold CLI flags into the parameter store (env layer).
  let store = config::global();
  store.apply_overrides(Some(&cli::overrides(&cli)))?;

  // Phase 2: load and type the dataset.
  let issues = DataLoader::new(store).load_issues()?;

  // Phase 3: re-emit the normalized records.
  let rendered = if cli.pretty {
    serde_json::to_string_pretty(&issues)?
  } else {
    serde_json::to_string(&issues)?
  };

  if cli.out == "-" {
    println!("{}", rendered);
  } else {
    std::fs::write(&cli.out, rendered).with_context(|| format!("writing report to {}", cli.out))?;
    eprintln!("[load] wrote {} issues to {}", issues.len(), cli.out);
  }

  Ok(())
}
