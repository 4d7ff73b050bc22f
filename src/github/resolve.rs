use crate::error::FetchError;

/// Parse a user-supplied repository reference (`owner/repo` or a
/// github.com repository URL) into an owner/name pair.
pub fn parse_repo_input(input: &str) -> Result<(String, String), FetchError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        parse_repo_from_url(input)
    } else {
        validate_repo_id(input)
    }
}

fn parse_repo_from_url(input: &str) -> Result<(String, String), FetchError> {
    let url = url::Url::parse(input).map_err(|source| FetchError::RepoRefInvalid {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| FetchError::RepoRefInvalid {
            input: input.to_string(),
            message: "URL is missing a host".to_string(),
        })?
        .to_ascii_lowercase();

    if host != "github.com" && host != "www.github.com" {
        return Err(FetchError::RepoRefInvalid {
            input: input.to_string(),
            message: format!("expected host 'github.com', found '{}'", host),
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(FetchError::RepoRefInvalid {
            input: input.to_string(),
            message: "expected repository URL like https://github.com/<owner>/<repo>".to_string(),
        });
    }

    let owner = segments[0];
    let repo = segments[1].trim_end_matches(".git");
    validate_repo_id(&format!("{owner}/{repo}"))
}

fn validate_repo_id(repo_id: &str) -> Result<(String, String), FetchError> {
    let trimmed = repo_id.trim();
    let mut parts = trimmed.split('/');
    let owner = parts.next().unwrap_or_default();
    let repo = parts.next().unwrap_or_default();
    let extra = parts.next();

    if owner.is_empty() || repo.is_empty() || extra.is_some() {
        return Err(FetchError::RepoRefInvalid {
            input: repo_id.to_string(),
            message: "expected repository reference in '<owner>/<repo>' form".to_string(),
        });
    }

    Ok((owner.to_string(), repo.to_string()))
}
