use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::FetchError;

use super::{FileContent, FileEntry, HostingClient};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("offsets-fetcher/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";
/// Raw accept type returns the file body as-is, skipping the base64
/// envelope of the default contents representation.
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";

/// ureq-backed client for the GitHub contents API.
///
/// Built per request scope; holds no state beyond the agent and the
/// optional token. An absent or empty token means anonymous access.
pub struct GitHubClient {
    agent: ureq::Agent,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client with the given token, falling back to the
    /// `GITHUB_TOKEN` environment variable. Empty strings count as unset.
    pub fn new(token: Option<&str>) -> Self {
        let token_from_env = std::env::var("GITHUB_TOKEN").ok();
        let token = token
            .map(str::to_string)
            .filter(|value| !value.is_empty())
            .or_else(|| token_from_env.filter(|value| !value.is_empty()));

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        Self {
            agent: config.into(),
            token,
        }
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(API_BASE).map_err(|source| FetchError::HubResponse {
            path: path.to_string(),
            message: format!("invalid API base URL: {source}"),
        })?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FetchError::HubResponse {
                    path: path.to_string(),
                    message: "API base URL cannot hold path segments".to_string(),
                })?;
            segments.push("repos").push(owner).push(repo).push("contents");
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        }

        Ok(url)
    }

    fn get(&self, url: &Url, accept: &str, path: &str) -> Result<ureq::Body, FetchError> {
        let mut request = self
            .agent
            .get(url.as_str())
            .header("Accept", accept)
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = self.token.as_deref() {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request.call().map_err(|source| FetchError::Transport {
            path: path.to_string(),
            source,
        })?;

        Ok(response.into_body())
    }
}

impl HostingClient for GitHubClient {
    fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<FileEntry>, FetchError> {
        let url = self.contents_url(owner, repo, path)?;
        let listing = self
            .get(&url, ACCEPT_JSON, path)?
            .read_json::<Value>()
            .map_err(|source| FetchError::Transport {
                path: path.to_string(),
                source,
            })?;

        extract_entries(&listing, path)
    }

    fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent, FetchError> {
        let url = self.contents_url(owner, repo, path)?;
        let content = self
            .get(&url, ACCEPT_RAW, path)?
            .read_to_string()
            .map_err(|source| FetchError::Transport {
                path: path.to_string(),
                source,
            })?;

        Ok(FileContent {
            name: file_name_of(path),
            content,
        })
    }
}

fn extract_entries(listing: &Value, path: &str) -> Result<Vec<FileEntry>, FetchError> {
    let items = listing
        .as_array()
        .ok_or_else(|| FetchError::HubResponse {
            path: path.to_string(),
            message: "expected a directory listing array (is the path a file?)".to_string(),
        })?;

    items
        .iter()
        .map(|item| {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| FetchError::HubResponse {
                    path: path.to_string(),
                    message: "listing entry is missing a 'name' field".to_string(),
                })?;
            let remote_path = item
                .get("path")
                .and_then(Value::as_str)
                .ok_or_else(|| FetchError::HubResponse {
                    path: path.to_string(),
                    message: format!("listing entry '{name}' is missing a 'path' field"),
                })?;

            Ok(FileEntry {
                name: name.to_string(),
                path: remote_path.to_string(),
            })
        })
        .collect()
}

fn file_name_of(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}
