use thiserror::Error;

/// The main error type for offsets-fetcher operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Unexpected response for '{path}': {message}")]
    HubResponse { path: String, message: String },

    #[error("Invalid repository reference '{input}': {message}")]
    RepoRefInvalid { input: String, message: String },

    #[error("Malformed version token in '{name}': {message}")]
    MalformedVersion { name: String, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse offsets JSON from {file_name}: {source}")]
    JsonOffsetsParse {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid offsets entry in {file_name}: {message}")]
    OffsetsValueInvalid { file_name: String, message: String },

    #[error("Failed to parse offsets INI from {file_name} (line {line}): {message}")]
    IniOffsetsParse {
        file_name: String,
        line: usize,
        message: String,
    },

    #[error("Failed to render offsets as JSON: {0}")]
    JsonRender(#[from] serde_json::Error),
}
