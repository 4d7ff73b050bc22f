//! JSON offsets reader.
//!
//! The file is a JSON object mapping symbol names to values, optionally
//! wrapped in an `"offsets"` field:
//!
//! ```json
//! { "LocalPlayer": "0x17E0A28", "ViewMatrix": 24872336 }
//! ```
//!
//! The version is not stored in the file; it comes from the file name
//! and is passed in by the dispatcher.

use serde_json::Value;

use super::{parse_offset_value, Offsets, OffsetsSource};
use crate::error::FetchError;
use crate::github::RepoSpec;

/// Parse JSON offsets content into a record for `version`.
///
/// # Errors
/// Returns an error if the content is not valid JSON, is not an object,
/// or holds a value that is neither an unsigned integer nor a decimal or
/// `0x` hex string.
pub fn read_offsets_json(
    content: &str,
    spec: &RepoSpec,
    file_name: &str,
    version: &str,
) -> Result<Offsets, FetchError> {
    let root: Value =
        serde_json::from_str(content).map_err(|source| FetchError::JsonOffsetsParse {
            file_name: file_name.to_string(),
            source,
        })?;

    // Accept both the bare map and the wrapped {"offsets": {...}} layout.
    let map = root
        .get("offsets")
        .filter(|value| value.is_object())
        .unwrap_or(&root)
        .as_object()
        .ok_or_else(|| FetchError::OffsetsValueInvalid {
            file_name: file_name.to_string(),
            message: "expected a JSON object of symbol names to offset values".to_string(),
        })?;

    let mut offsets = Offsets {
        version: version.to_string(),
        source: OffsetsSource::from_spec(spec),
        entries: Default::default(),
    };

    for (name, value) in map {
        let parsed = match value {
            Value::Number(number) => number.as_u64(),
            Value::String(raw) => parse_offset_value(raw),
            _ => None,
        };

        let offset = parsed.ok_or_else(|| FetchError::OffsetsValueInvalid {
            file_name: file_name.to_string(),
            message: format!("'{name}' is not an unsigned integer or hex string: {value}"),
        })?;

        offsets.entries.insert(name.clone(), offset);
    }

    Ok(offsets)
}
