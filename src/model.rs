// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed issue/event entities built leniently from raw exported JSON records
// role: model/types
// outputs: State enum, Event and Issue structs with parse constructors, ModelError kinds
// invariants:
// - state is a closed set; anything outside {open, closed} (or a missing state) fails the whole record
// - dates are either parsed timestamps or None, never raw strings
// - number is always an integer after parse; null/absent becomes the -1 sentinel
// - event order is source order; chronology is not re-validated here
// errors: ModelError{MissingState, UnknownState, InvalidNumber}; everything else recovers locally
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::ext::serde_json::JsonFetch;
use crate::util::parse_timestamp_lenient;

/// Fatal construction failures. Anything softer (bad dates, missing optional
/// fields) is absorbed into `None` during parse and never reaches callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
  #[error("issue record has no state key")]
  MissingState,
  #[error("unknown issue state key: {0:?}")]
  UnknownState(String),
  #[error("issue number is not an integer: {0:?}")]
  InvalidNumber(String),
}

/// Issue lifecycle state. Closed set; no runtime extensibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
  Open,
  Closed,
}

impl State {
  /// Look up a raw state string in the enumeration.
  pub fn parse(raw: &str) -> Result<State, ModelError> {
    match raw {
      "open" => Ok(State::Open),
      "closed" => Ok(State::Closed),
      other => Err(ModelError::UnknownState(other.to_string())),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      State::Open => "open",
      State::Closed => "closed",
    }
  }
}

/// One entry in an issue's event timeline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Event {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_date: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
}

impl Event {
  /// Build an event from a raw record. Total: every field is optional and a
  /// malformed `event_date` degrades to `None` rather than aborting the
  /// surrounding issue parse.
  pub fn parse(raw: &Value) -> Event {
    Event {
      event_type: raw.fetch("event_type").to::<String>(),
      author: raw.fetch("author").to::<String>(),
      event_date: raw.fetch("event_date").to::<String>().and_then(|s| parse_timestamp_lenient(&s)),
      label: raw.fetch("label").to::<String>(),
      comment: raw.fetch("comment").to::<String>(),
    }
  }
}

/// A fully-typed issue record, owning its event timeline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Issue {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub creator: Option<String>,
  pub labels: Vec<String>,
  pub state: State,
  pub assignees: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  pub number: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_date: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_date: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeline_url: Option<String>,
  pub events: Vec<Event>,
}

impl Issue {
  /// Build an issue from one raw record of the dataset array.
  ///
  /// `state` is the only hard gate: a missing or out-of-set value fails the
  /// record. `number` coerces numeric strings and substitutes -1 for
  /// null/absent. Everything else follows the lenient Event policy.
  pub fn parse(raw: &Value) -> Result<Issue, ModelError> {
    let state = match raw.fetch("state").to::<String>() {
      Some(s) => State::parse(&s)?,
      None => return Err(ModelError::MissingState),
    };

    let events = match raw.fetch("events").raw().and_then(Value::as_array) {
      Some(entries) => entries.iter().map(Event::parse).collect(),
      None => Vec::new(),
    };

    Ok(Issue {
      url: raw.fetch("url").to::<String>(),
      creator: raw.fetch("creator").to::<String>(),
      labels: raw.fetch("labels").to_or_default::<Vec<String>>(),
      state,
      assignees: raw.fetch("assignees").to_or_default::<Vec<String>>(),
      title: raw.fetch("title").to::<String>(),
      text: raw.fetch("text").to::<String>(),
      number: parse_number(raw)?,
      created_date: raw.fetch("created_date").to::<String>().and_then(|s| parse_timestamp_lenient(&s)),
      updated_date: raw.fetch("updated_date").to::<String>().and_then(|s| parse_timestamp_lenient(&s)),
      timeline_url: raw.fetch("timeline_url").to::<String>(),
      events,
    })
  }
}

/// Coerce the raw `number` field to an integer, with -1 standing in for an
/// explicitly-null or absent value.
fn parse_number(raw: &Value) -> Result<i64, ModelError> {
  let field = raw.fetch("number");

  if field.is_null_or_missing() {
    return Ok(-1);
  }

  match field.raw() {
    Some(Value::Number(n)) => n.as_i64().ok_or_else(|| ModelError::InvalidNumber(n.to_string())),
    Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| ModelError::InvalidNumber(s.clone())),
    Some(other) => Err(ModelError::InvalidNumber(other.to_string())),
    None => Ok(-1),
  }
}
