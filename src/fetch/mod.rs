//! Retrieval orchestration: list, select, fetch, dispatch.
//!
//! The two operations here tie the hosting collaborator, the version
//! selector, and the format readers together. Transport and listing
//! errors propagate unmodified; an unsupported file extension is logged
//! and yields an absent result rather than an error.

use crate::error::FetchError;
use crate::github::{FileContent, HostingClient, RepoSpec};
use crate::offsets::{io_ini, io_json, Offsets};
use crate::version;

/// File format of an offsets file, decided by file-name suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetsFormat {
    Json,
    Ini,
}

impl OffsetsFormat {
    /// Detect the format from a file name; `None` means unsupported.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".json") {
            Some(OffsetsFormat::Json)
        } else if name.ends_with(".ini") {
            Some(OffsetsFormat::Ini)
        } else {
            None
        }
    }

    /// Human-readable name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            OffsetsFormat::Json => "json",
            OffsetsFormat::Ini => "ini",
        }
    }
}

/// Fetch and parse the newest offsets available under the spec.
///
/// With a fixed file name the file is fetched directly; otherwise the
/// offsets directory is listed and the highest-versioned candidate is
/// fetched. An empty listing yields `Ok(None)` without any content
/// fetch.
pub fn get_last_offsets(
    client: &dyn HostingClient,
    spec: &RepoSpec,
) -> Result<Option<Offsets>, FetchError> {
    let content = match spec.fixed_file_path() {
        Some(path) => client.get_file_content(&spec.owner, &spec.repo, &path)?,
        None => {
            let entries = client.list_directory(&spec.owner, &spec.repo, &spec.offsets_path)?;
            let Some(selected) = version::select_latest(&entries)? else {
                return Ok(None);
            };
            client.get_file_content(&spec.owner, &spec.repo, &selected.path)?
        }
    };

    dispatch_by_extension(&content, spec)
}

/// Fetch and parse offsets for a specific target version.
///
/// With a fixed file name, only `.ini` files support version-scoped
/// extraction (the target selects a section); any other fixed file
/// yields absent. Otherwise the directory listing is filtered to names
/// containing the target before best-of-group selection; no match
/// yields absent.
pub fn get_offsets_from_version(
    client: &dyn HostingClient,
    spec: &RepoSpec,
    target_version: &str,
) -> Result<Option<Offsets>, FetchError> {
    match spec.fixed_file_path() {
        Some(path) => {
            if OffsetsFormat::from_file_name(&path) != Some(OffsetsFormat::Ini) {
                warn_unsupported(&path, "version-scoped extraction requires an .ini file");
                return Ok(None);
            }
            let content = client.get_file_content(&spec.owner, &spec.repo, &path)?;
            io_ini::read_offsets_ini(&content.content, spec, &content.name, Some(target_version))
        }
        None => {
            let entries = client.list_directory(&spec.owner, &spec.repo, &spec.offsets_path)?;
            let Some(selected) = version::select_matching_version(&entries, target_version)? else {
                return Ok(None);
            };
            let content = client.get_file_content(&spec.owner, &spec.repo, &selected.path)?;
            // The version handed to the JSON reader comes from the selected
            // file name, not the caller's target: a target like "1.0" may
            // match offsets-1.0.3.json, and the name states what the file
            // actually holds.
            dispatch_by_extension(&content, spec)
        }
    }
}

fn dispatch_by_extension(
    content: &FileContent,
    spec: &RepoSpec,
) -> Result<Option<Offsets>, FetchError> {
    match OffsetsFormat::from_file_name(&content.name) {
        Some(OffsetsFormat::Json) => {
            let file_version = version::extract_version(&content.name)?.to_string();
            io_json::read_offsets_json(&content.content, spec, &content.name, &file_version)
                .map(Some)
        }
        Some(OffsetsFormat::Ini) => {
            io_ini::read_offsets_ini(&content.content, spec, &content.name, None)
        }
        None => {
            warn_unsupported(&content.name, "expected a .json or .ini offsets file");
            Ok(None)
        }
    }
}

fn warn_unsupported(name: &str, detail: &str) {
    eprintln!("warning: unsupported offsets file '{name}': {detail}");
}
