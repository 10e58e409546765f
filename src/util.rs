// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Lenient timestamp parsing shared by the model, plus man page rendering for the CLI
// role: utilities/helpers
// inputs: Raw timestamp strings from dataset records; clap CommandFactory for man pages
// outputs: Optional DateTime<Utc>; troff man page text
// invariants:
// - parse_timestamp_lenient never panics and never errors; unparsable input yields None
// - accepted shapes are RFC3339 plus the common naive date/datetime forms seen in exports
// errors: Only render_man_page propagates (render/UTF-8 failures)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::CommandFactory;

/// Parse an ISO-8601-ish timestamp, returning `None` on any failure.
///
/// Dataset exports carry a mix of `2021-01-01T12:00:00Z`, offset-less
/// datetimes, and bare dates; malformed values must not abort ingestion,
/// so this is the single lenient gate they all pass through. Naive inputs
/// are taken as UTC.
pub fn parse_timestamp_lenient(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();

  if raw.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }

  for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
      return Some(Utc.from_utc_datetime(&naive));
    }
  }

  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
  }

  None
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
