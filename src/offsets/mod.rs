//! Parsed offsets records and the format-specific readers.
//!
//! An offsets file maps symbol names to memory offsets for one version
//! of the target software. Readers parse raw file content fetched from
//! the hosting collaborator into the canonical [`Offsets`] record; which
//! reader runs is decided by file extension in [`crate::fetch`].

pub mod io_ini;
pub mod io_json;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::github::RepoSpec;

/// A parsed set of offsets for one version of the target software.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Offsets {
    /// Version the offsets apply to.
    pub version: String,

    /// Where the offsets file came from.
    pub source: OffsetsSource,

    /// Symbol name to offset value, sorted by name.
    pub entries: BTreeMap<String, u64>,
}

/// Remote origin of a parsed offsets record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetsSource {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

impl OffsetsSource {
    pub fn from_spec(spec: &RepoSpec) -> Self {
        Self {
            owner: spec.owner.clone(),
            repo: spec.repo.clone(),
            path: spec.offsets_path.clone(),
        }
    }
}

/// Parse a single offset value in decimal or `0x` hex form.
pub(crate) fn parse_offset_value(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse::<u64>().ok()
    }
}
