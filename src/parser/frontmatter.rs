//! Front-matter version gate
//!
//! Documents may open with a `---` delimited front-matter section declaring
//! a `hopscotchVersion`. The validator feature-gates some block types on it.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::parser::scanner::strip_quotes;

/// Semantic version triple declared in front matter or in a profile gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("version pattern"))
}

impl DocumentVersion {
    /// Parse a leading `<major>.<minor>.<patch>` triple; trailing text (a
    /// pre-release tag, say) is ignored.
    pub fn parse_prefix(raw: &str) -> Option<Self> {
        let caps = version_re().captures(raw)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
        })
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Scan front matter for a zero-indentation `hopscotchVersion:` key.
///
/// Returns `None` when the document has no front matter, the key is absent,
/// or its value is malformed.
pub fn parse_version(content: &str) -> Option<DocumentVersion> {
    let mut lines = content.lines();
    if !lines.next()?.starts_with("---") {
        return None;
    }
    for line in lines {
        if line.starts_with("---") {
            break;
        }
        if line.trim().is_empty() || line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim() != "hopscotchVersion" {
            continue;
        }
        return DocumentVersion::parse_prefix(strip_quotes(value.trim()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u32, minor: u32, patch: u32) -> DocumentVersion {
        DocumentVersion {
            major,
            minor,
            patch,
        }
    }

    #[test]
    fn test_no_front_matter() {
        assert_eq!(parse_version("# A document\n"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn test_version_parsed() {
        let doc = "---\ntitle: Campaign\nhopscotchVersion: 0.3.0\n---\nbody\n";
        assert_eq!(parse_version(doc), Some(v(0, 3, 0)));
    }

    #[test]
    fn test_quoted_version() {
        let doc = "---\nhopscotchVersion: \"1.2.3\"\n---\n";
        assert_eq!(parse_version(doc), Some(v(1, 2, 3)));
    }

    #[test]
    fn test_prerelease_suffix_ignored() {
        let doc = "---\nhopscotchVersion: 0.3.0-beta.1\n---\n";
        assert_eq!(parse_version(doc), Some(v(0, 3, 0)));
    }

    #[test]
    fn test_malformed_version_is_absent() {
        let doc = "---\nhopscotchVersion: latest\n---\n";
        assert_eq!(parse_version(doc), None);
    }

    #[test]
    fn test_key_outside_front_matter_ignored() {
        let doc = "---\ntitle: Campaign\n---\nhopscotchVersion: 0.3.0\n";
        assert_eq!(parse_version(doc), None);
    }

    #[test]
    fn test_indented_key_ignored() {
        let doc = "---\nmeta:\n  hopscotchVersion: 0.3.0\n---\n";
        assert_eq!(parse_version(doc), None);
    }

    #[test]
    fn test_version_ordering() {
        assert!(v(0, 2, 9) < v(0, 3, 0));
        assert!(v(0, 3, 0) >= v(0, 3, 0));
        assert!(v(1, 0, 0) > v(0, 9, 9));
    }
}
