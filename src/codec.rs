// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reversible conversion between environment-variable strings and typed JSON values
// role: codec/typed-values
// inputs: Raw strings (possibly `json:`-tagged); serde_json::Value for encoding
// outputs: Optional serde_json::Value from decode; plain String from encode
// invariants:
// - decode is total for untagged input: any string that is not valid JSON comes back as Value::String
// - a `json:` tag is an explicit contract; garbage after the tag is a hard error, never a fallback
// - encode leaves strings untouched, so encode(decode(x)) may legitimately differ from x
// errors: Only tagged-decode failures propagate, with the offending raw value named
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde_json::Value;

/// Prefix marking an environment value as intentionally-serialized JSON.
///
/// Without the tag, a plain string that merely looks like JSON (a bare numeral,
/// `true`, a quoted phrase) is promoted opportunistically on read; the tag lets
/// a writer insist on the structured reading.
pub const JSON_TAG: &str = "json:";

/// Decode a raw environment-variable string into a typed value.
///
/// Two-stage, by contract:
/// 1. `json:`-tagged input: the remainder MUST be valid JSON; failure propagates.
/// 2. Untagged input: try a structured parse; on failure the original string is
///    the result. This makes decode total for untagged input.
pub fn decode(raw: Option<&str>) -> Result<Option<Value>> {
  let Some(raw) = raw else {
    return Ok(None);
  };

  if let Some(tagged) = raw.strip_prefix(JSON_TAG) {
    let value: Value = serde_json::from_str(tagged)
      .with_context(|| format!("decoding `{}`-tagged value {:?}", JSON_TAG, raw))?;
    return Ok(Some(value));
  }

  match serde_json::from_str::<Value>(raw) {
    Ok(value) => Ok(Some(value)),
    Err(_) => Ok(Some(Value::String(raw.to_string()))),
  }
}

/// Encode a typed value into an environment-variable string.
///
/// Strings pass through unchanged (no quoting, no escaping). Anything else is
/// JSON-serialized behind [`JSON_TAG`] so a later [`decode`] can tell an
/// intentional structure from a string that happens to parse as JSON.
pub fn encode(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => format!("{}{}", JSON_TAG, other),
  }
}
