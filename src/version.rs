//! Version extraction, comparison, and candidate selection.
//!
//! Offsets files follow the `<prefix>-<version>.<ext>` naming convention
//! (e.g. `offsets-1.23.4.json`). The version token is the substring
//! between the first `-` and the last `.`, compared segment-by-segment
//! as integers so that `1.2 < 1.10`. Comparison is only meaningful
//! between names sharing that convention; a name that breaks it is a
//! [`FetchError::MalformedVersion`], never silently treated as equal.

use std::cmp::Ordering;

use crate::error::FetchError;
use crate::github::FileEntry;

/// Extract the version token from a file name.
///
/// # Errors
/// Fails when the name has no `-`, no `.`, or an empty token between
/// them — slicing a nonsense substring out of such a name would corrupt
/// every comparison downstream.
pub fn extract_version(name: &str) -> Result<&str, FetchError> {
    let dash = name
        .find('-')
        .ok_or_else(|| malformed(name, "no '-' introducing the version token"))?;
    let dot = name
        .rfind('.')
        .ok_or_else(|| malformed(name, "no '.' terminating the version token"))?;

    let start = dash + 1;
    if start >= dot {
        return Err(malformed(name, "empty version token between '-' and '.'"));
    }

    Ok(&name[start..dot])
}

/// Compare two bare version tokens (`1.2.3` style) numerically.
///
/// Shared segments are compared left-to-right as integers; the first
/// difference decides. When all shared segments are equal, the token
/// with fewer segments is lesser (`1.2 < 1.2.0`).
pub fn compare_version_tokens(token_a: &str, token_b: &str) -> Result<Ordering, FetchError> {
    let segments_a: Vec<&str> = token_a.split('.').collect();
    let segments_b: Vec<&str> = token_b.split('.').collect();

    for (seg_a, seg_b) in segments_a.iter().zip(segments_b.iter()) {
        let num_a = parse_segment(token_a, seg_a)?;
        let num_b = parse_segment(token_b, seg_b)?;
        match num_a.cmp(&num_b) {
            Ordering::Equal => continue,
            decided => return Ok(decided),
        }
    }

    Ok(segments_a.len().cmp(&segments_b.len()))
}

/// Compare two file names by their embedded version tokens.
pub fn compare_versions(name_a: &str, name_b: &str) -> Result<Ordering, FetchError> {
    compare_version_tokens(extract_version(name_a)?, extract_version(name_b)?)
}

/// Select the entry with the highest embedded version.
///
/// An empty listing selects nothing; callers treat that as "no
/// candidate found" and must not fetch any content.
pub fn select_latest(entries: &[FileEntry]) -> Result<Option<&FileEntry>, FetchError> {
    best_of(entries.iter())
}

/// Select the highest-versioned entry whose name contains `target`.
pub fn select_matching_version<'a>(
    entries: &'a [FileEntry],
    target: &str,
) -> Result<Option<&'a FileEntry>, FetchError> {
    best_of(entries.iter().filter(|entry| entry.name.contains(target)))
}

/// Running-best scan: the candidate replaces the current best when its
/// version compares greater.
fn best_of<'a>(
    entries: impl Iterator<Item = &'a FileEntry>,
) -> Result<Option<&'a FileEntry>, FetchError> {
    let mut best: Option<&FileEntry> = None;

    for entry in entries {
        best = match best {
            None => Some(entry),
            Some(current) => {
                if compare_versions(&current.name, &entry.name)? == Ordering::Less {
                    Some(entry)
                } else {
                    Some(current)
                }
            }
        };
    }

    Ok(best)
}

fn parse_segment(token: &str, segment: &str) -> Result<u64, FetchError> {
    segment
        .parse::<u64>()
        .map_err(|_| malformed(token, &format!("non-numeric version segment '{segment}'")))
}

fn malformed(name: &str, message: &str) -> FetchError {
    FetchError::MalformedVersion {
        name: name.to_string(),
        message: message.to_string(),
    }
}
