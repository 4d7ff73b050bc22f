//! GitHub hosting collaborator.
//!
//! This module owns remote-specific concerns (repository references, the
//! hosting-client contract, and the ureq-backed GitHub implementation).
//! Version selection stays in [`crate::version`] and file parsing in
//! [`crate::offsets`].

pub mod client;
pub mod resolve;

pub use client::GitHubClient;
pub use resolve::parse_repo_input;

use crate::error::FetchError;

/// Canonical reference to a directory of offsets files inside a repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Path within the repository holding the candidate offsets files.
    pub offsets_path: String,
    /// Optional fixed file name. When set, directory listing and version
    /// selection are skipped and this file is fetched directly.
    pub file_name: Option<String>,
}

impl RepoSpec {
    /// Remote path of the fixed file, joined onto the offsets path.
    ///
    /// Returns `None` when no fixed file name is configured.
    pub fn fixed_file_path(&self) -> Option<String> {
        self.file_name.as_deref().map(|file_name| {
            if self.offsets_path.is_empty() {
                file_name.to_string()
            } else {
                format!("{}/{}", self.offsets_path, file_name)
            }
        })
    }
}

/// A single entry from a remote directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
}

/// A remote file's name and raw textual content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileContent {
    pub name: String,
    pub content: String,
}

/// Contract for the hosting service that stores the offsets files.
///
/// Implementations handle credentials and transport; callers get back
/// plain listings and file contents. Errors propagate unmodified — no
/// retry or wrapping happens on this side of the seam.
pub trait HostingClient {
    /// List the files directly under `path` in `owner/repo`.
    fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<FileEntry>, FetchError>;

    /// Fetch the raw content of the file at `path` in `owner/repo`.
    fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent, FetchError>;
}
