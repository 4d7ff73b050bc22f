//! Dispatcher integration tests against an in-memory hosting client.

use std::cell::Cell;
use std::collections::BTreeMap;

use offsets_fetcher::error::FetchError;
use offsets_fetcher::fetch::{get_last_offsets, get_offsets_from_version};
use offsets_fetcher::github::{FileContent, FileEntry, HostingClient, RepoSpec};

/// Hosting client backed by an in-memory file map, counting fetches.
#[derive(Default)]
struct FakeClient {
    files: BTreeMap<String, String>,
    content_fetches: Cell<usize>,
}

impl FakeClient {
    fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
            content_fetches: Cell::new(0),
        }
    }
}

impl HostingClient for FakeClient {
    fn list_directory(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<Vec<FileEntry>, FetchError> {
        let prefix = format!("{path}/");
        Ok(self
            .files
            .keys()
            .filter_map(|file_path| {
                let name = file_path.strip_prefix(&prefix)?;
                Some(FileEntry {
                    name: name.to_string(),
                    path: file_path.clone(),
                })
            })
            .collect())
    }

    fn get_file_content(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<FileContent, FetchError> {
        self.content_fetches.set(self.content_fetches.get() + 1);
        let content = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::HubResponse {
                path: path.to_string(),
                message: "no such file".to_string(),
            })?;
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok(FileContent { name, content })
    }
}

fn spec(file_name: Option<&str>) -> RepoSpec {
    RepoSpec {
        owner: "org".to_string(),
        repo: "game-offsets".to_string(),
        offsets_path: "offsets".to_string(),
        file_name: file_name.map(str::to_string),
    }
}

const INI_SAMPLE: &str = "[1.0.0]\nLocalPlayer = 0x10\n\n[1.2.0]\nLocalPlayer = 0x20\n";

#[test]
fn latest_selects_highest_version_from_listing() {
    let client = FakeClient::with_files(&[
        ("offsets/offsets-1.2.0.json", r#"{"LocalPlayer": "0x10"}"#),
        ("offsets/offsets-1.10.0.json", r#"{"LocalPlayer": "0x20"}"#),
        ("offsets/offsets-1.9.9.json", r#"{"LocalPlayer": "0x30"}"#),
    ]);

    let offsets = get_last_offsets(&client, &spec(None))
        .expect("fetch")
        .expect("offsets");

    assert_eq!(offsets.version, "1.10.0");
    assert_eq!(offsets.entries["LocalPlayer"], 0x20);
    assert_eq!(client.content_fetches.get(), 1);
}

#[test]
fn empty_listing_yields_absent_without_content_fetch() {
    let client = FakeClient::default();

    let result = get_last_offsets(&client, &spec(None)).expect("fetch");

    assert!(result.is_none());
    assert_eq!(client.content_fetches.get(), 0);
}

#[test]
fn fixed_file_skips_listing_and_selection() {
    let client = FakeClient::with_files(&[("offsets/offsets.ini", INI_SAMPLE)]);

    let offsets = get_last_offsets(&client, &spec(Some("offsets.ini")))
        .expect("fetch")
        .expect("offsets");

    // No target: the highest INI section wins.
    assert_eq!(offsets.version, "1.2.0");
    assert_eq!(offsets.entries["LocalPlayer"], 0x20);
}

#[test]
fn unsupported_extension_yields_absent_not_error() {
    let client = FakeClient::with_files(&[("offsets/data.txt", "not offsets")]);

    let result = get_last_offsets(&client, &spec(Some("data.txt"))).expect("fetch");
    assert!(result.is_none());
}

#[test]
fn json_reader_receives_version_from_selected_file_name() {
    let client = FakeClient::with_files(&[
        ("offsets/offsets-1.0.3.json", r#"{"EntityList": 66}"#),
        ("offsets/offsets-2.0.0.json", r#"{"EntityList": 99}"#),
    ]);

    let offsets = get_offsets_from_version(&client, &spec(None), "1.0")
        .expect("fetch")
        .expect("offsets");

    // Target "1.0" matched offsets-1.0.3.json; the record carries the
    // file's own version, not the caller's target.
    assert_eq!(offsets.version, "1.0.3");
    assert_eq!(offsets.entries["EntityList"], 66);
}

#[test]
fn version_filter_without_match_is_absent() {
    let client =
        FakeClient::with_files(&[("offsets/offsets-1.0.0.json", r#"{"EntityList": 66}"#)]);

    let result = get_offsets_from_version(&client, &spec(None), "3.0.0").expect("fetch");

    assert!(result.is_none());
    assert_eq!(client.content_fetches.get(), 0);
}

#[test]
fn version_filter_picks_highest_within_group() {
    let client = FakeClient::with_files(&[
        ("offsets/a-1.0.1.json", r#"{"Base": 1}"#),
        ("offsets/a-1.0.10.json", r#"{"Base": 10}"#),
        ("offsets/a-1.0.2.json", r#"{"Base": 2}"#),
        ("offsets/b-2.0.0.json", r#"{"Base": 200}"#),
    ]);

    let offsets = get_offsets_from_version(&client, &spec(None), "1.0")
        .expect("fetch")
        .expect("offsets");

    assert_eq!(offsets.version, "1.0.10");
    assert_eq!(offsets.entries["Base"], 10);
}

#[test]
fn fixed_ini_file_supports_version_scoped_extraction() {
    let client = FakeClient::with_files(&[("offsets/offsets.ini", INI_SAMPLE)]);

    let offsets = get_offsets_from_version(&client, &spec(Some("offsets.ini")), "1.0.0")
        .expect("fetch")
        .expect("offsets");

    assert_eq!(offsets.version, "1.0.0");
    assert_eq!(offsets.entries["LocalPlayer"], 0x10);
}

#[test]
fn fixed_ini_file_without_target_section_is_absent() {
    let client = FakeClient::with_files(&[("offsets/offsets.ini", INI_SAMPLE)]);

    let result =
        get_offsets_from_version(&client, &spec(Some("offsets.ini")), "9.9.9").expect("fetch");
    assert!(result.is_none());
}

#[test]
fn fixed_json_file_does_not_support_version_scoping() {
    let client =
        FakeClient::with_files(&[("offsets/offsets-1.0.0.json", r#"{"Base": 1}"#)]);

    let result =
        get_offsets_from_version(&client, &spec(Some("offsets-1.0.0.json")), "1.0.0")
            .expect("fetch");

    assert!(result.is_none());
    assert_eq!(client.content_fetches.get(), 0);
}

#[test]
fn malformed_candidate_name_fails_selection() {
    let client = FakeClient::with_files(&[
        ("offsets/offsets-1.0.0.json", r#"{"Base": 1}"#),
        ("offsets/README.md", "docs"),
    ]);

    let err = get_last_offsets(&client, &spec(None)).expect_err("should fail");
    assert!(matches!(err, FetchError::MalformedVersion { .. }));
    assert_eq!(client.content_fetches.get(), 0);
}

#[test]
fn transport_errors_propagate_unmodified() {
    // Fixed file that the fake store does not hold.
    let client = FakeClient::default();

    let err = get_last_offsets(&client, &spec(Some("offsets.ini"))).expect_err("should fail");
    assert!(matches!(err, FetchError::HubResponse { .. }));
}
