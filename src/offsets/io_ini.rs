//! INI offsets reader.
//!
//! One INI file carries offsets for several versions, one `[version]`
//! section each:
//!
//! ```ini
//! [1.0.0]
//! LocalPlayer = 0x17E0A28
//!
//! [1.1.0]
//! LocalPlayer = 0x17F0B30
//! ```
//!
//! With a target version the matching section is extracted (absent when
//! the file has no such section); without one the highest version wins,
//! by the same dotted-numeric comparison used for file names.

use std::collections::BTreeMap;

use super::{parse_offset_value, Offsets, OffsetsSource};
use crate::error::FetchError;
use crate::github::RepoSpec;
use crate::version::compare_version_tokens;

/// Parse INI offsets content, scoped to `target_version` when given.
pub fn read_offsets_ini(
    content: &str,
    spec: &RepoSpec,
    file_name: &str,
    target_version: Option<&str>,
) -> Result<Option<Offsets>, FetchError> {
    let sections = parse_sections(content, file_name)?;

    let selected = match target_version {
        Some(target) => sections
            .into_iter()
            .find(|(version, _)| version == target),
        None => highest_section(sections)?,
    };

    Ok(selected.map(|(version, entries)| Offsets {
        version,
        source: OffsetsSource::from_spec(spec),
        entries,
    }))
}

type Section = (String, BTreeMap<String, u64>);

fn parse_sections(content: &str, file_name: &str) -> Result<Vec<Section>, FetchError> {
    let mut sections: Vec<Section> = Vec::new();

    for (line_idx, raw_line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let version = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ini_error(file_name, line_num, "malformed section header"))?;
            sections.push((version.to_string(), BTreeMap::new()));
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ini_error(file_name, line_num, "expected 'name = value'"))?;

        let current = sections.last_mut().ok_or_else(|| {
            ini_error(file_name, line_num, "offset entry outside a [version] section")
        })?;

        let offset = parse_offset_value(value).ok_or_else(|| {
            ini_error(
                file_name,
                line_num,
                &format!("'{}' is not a decimal or 0x hex offset", value.trim()),
            )
        })?;

        current.1.insert(key.trim().to_string(), offset);
    }

    if sections.is_empty() {
        return Err(ini_error(file_name, 1, "no [version] sections found"));
    }

    Ok(sections)
}

fn highest_section(sections: Vec<Section>) -> Result<Option<Section>, FetchError> {
    let mut best: Option<Section> = None;

    for section in sections {
        best = match best {
            None => Some(section),
            Some(current) => {
                if compare_version_tokens(&current.0, &section.0)? == std::cmp::Ordering::Less {
                    Some(section)
                } else {
                    Some(current)
                }
            }
        };
    }

    Ok(best)
}

fn ini_error(file_name: &str, line: usize, message: &str) -> FetchError {
    FetchError::IniOffsetsParse {
        file_name: file_name.to_string(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; per-version offsets
[1.0.0]
LocalPlayer = 0x17E0A28
ViewMatrix = 24872336

[1.10.0]
LocalPlayer = 0x17F0B30

[1.2.0]
LocalPlayer = 0x17E9999
";

    fn spec() -> RepoSpec {
        RepoSpec {
            owner: "org".to_string(),
            repo: "repo".to_string(),
            offsets_path: "offsets".to_string(),
            file_name: Some("offsets.ini".to_string()),
        }
    }

    #[test]
    fn target_version_extracts_matching_section() {
        let offsets = read_offsets_ini(SAMPLE, &spec(), "offsets.ini", Some("1.0.0"))
            .expect("parse")
            .expect("section");

        assert_eq!(offsets.version, "1.0.0");
        assert_eq!(offsets.entries["LocalPlayer"], 0x17E0A28);
        assert_eq!(offsets.entries["ViewMatrix"], 24_872_336);
    }

    #[test]
    fn missing_target_version_is_absent() {
        let result = read_offsets_ini(SAMPLE, &spec(), "offsets.ini", Some("9.9.9")).expect("parse");
        assert!(result.is_none());
    }

    #[test]
    fn without_target_the_highest_version_section_wins() {
        let offsets = read_offsets_ini(SAMPLE, &spec(), "offsets.ini", None)
            .expect("parse")
            .expect("section");

        // 1.10.0 beats 1.2.0 numerically.
        assert_eq!(offsets.version, "1.10.0");
        assert_eq!(offsets.entries["LocalPlayer"], 0x17F0B30);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let content = "# top comment\n\n[2.0]\n; note\nBase = 16\n";
        let offsets = read_offsets_ini(content, &spec(), "offsets.ini", None)
            .expect("parse")
            .expect("section");
        assert_eq!(offsets.entries["Base"], 16);
    }

    #[test]
    fn entry_outside_section_is_an_error() {
        let err = read_offsets_ini("Base = 16\n", &spec(), "offsets.ini", None)
            .expect_err("should fail");
        match err {
            FetchError::IniOffsetsParse { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("outside"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_value_reports_line_number() {
        let content = "[1.0]\nBase = sixteen\n";
        match read_offsets_ini(content, &spec(), "offsets.ini", None).expect_err("should fail") {
            FetchError::IniOffsetsParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_without_sections_is_an_error() {
        assert!(read_offsets_ini("; only comments\n", &spec(), "offsets.ini", None).is_err());
    }

    #[test]
    fn non_numeric_section_fails_only_unscoped_selection() {
        let content = "[beta]\nBase = 1\n[1.0]\nBase = 2\n";

        // Scoped lookup never compares section names.
        let scoped = read_offsets_ini(content, &spec(), "offsets.ini", Some("1.0"))
            .expect("parse")
            .expect("section");
        assert_eq!(scoped.entries["Base"], 2);

        // Unscoped selection must compare and therefore fails.
        assert!(matches!(
            read_offsets_ini(content, &spec(), "offsets.ini", None),
            Err(FetchError::MalformedVersion { .. })
        ));
    }
}
