//! Front-matter splitting and decoding
//!
//! A record may start with a `---` delimited YAML block of scalar key/value
//! pairs. Only a block at the very start of the blob counts; anything that
//! looks like a delimiter further down belongs to the body.

use super::document::ProposalMetadata;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("YAML decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
}

/// Split a blob into its front-matter header and body.
///
/// Returns `None` when the blob does not open with a delimiter line or the
/// block is never closed; the caller then treats the whole blob as body.
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let after_open = strip_delimiter_line(text)?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

/// Strip an opening `---` line, returning the text after its line break
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    let (first_line, remainder) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => return None,
    };
    if first_line.trim().is_empty() {
        Some(remainder)
    } else {
        None
    }
}

/// Decode a front-matter header into the fixed metadata shape
pub fn decode_metadata(header: &str) -> Result<ProposalMetadata, FrontMatterError> {
    if header.trim().is_empty() {
        return Ok(ProposalMetadata::default());
    }

    match serde_yaml::from_str::<Value>(header)? {
        Value::Mapping(mapping) => Ok(metadata_from_mapping(&mapping)),
        Value::Null => Ok(ProposalMetadata::default()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Normalize the body that follows a front-matter block: drop the blank
/// lines separating it from the header and any trailing whitespace.
pub fn normalize_body(body: &str) -> String {
    body.trim_start_matches(['\r', '\n']).trim_end().to_string()
}

fn metadata_from_mapping(mapping: &Mapping) -> ProposalMetadata {
    ProposalMetadata {
        id: mapping.get("id").and_then(unsigned_value),
        proposal_type: mapping.get("proposal_type").and_then(text_value),
        cycle: mapping.get("cycle").and_then(text_value),
        exclusive_access_period_months: mapping
            .get("exclusive_access_period_months")
            .and_then(integer_value),
        instrument_mode: mapping.get("instrument_mode").and_then(text_value),
        pi_and_co_pis: mapping.get("pi_and_co_pis").and_then(text_value),
        prime_parallel_time_hours: mapping.get("prime_parallel_time_hours").and_then(text_value),
        program_title: mapping.get("program_title").and_then(text_value),
        kind: mapping.get("type").and_then(text_value),
    }
}

/// Render a scalar as text. Sequences of scalars are joined with ", ".
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().filter_map(text_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Tagged(tagged) => text_value(&tagged.value),
        Value::Null | Value::Mapping(_) => None,
    }
}

fn unsigned_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Tagged(tagged) => unsigned_value(&tagged.value),
        _ => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Tagged(tagged) => integer_value(&tagged.value),
        _ => None,
    }
}
