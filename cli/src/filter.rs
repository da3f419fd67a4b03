//! File-extension allow list for documents accepted by `add` and `verify`.
//!
//! An empty list means every extension is accepted.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Set of accepted extensions, stored lowercase with a leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Parse a comma-separated list such as `".pdf, DOCX,png"`.
    ///
    /// Entries are trimmed and lowercased, a missing leading dot is added,
    /// and blank entries are dropped. A lone `.` is kept and matches names
    /// that end in a dot.
    pub fn parse(list: &str) -> Self {
        let allowed = list
            .split(',')
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part.starts_with('.') {
                    part
                } else {
                    format!(".{part}")
                }
            })
            .collect();
        Self { allowed }
    }

    /// True if no restriction is active.
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    /// True if `path` may be registered or verified.
    ///
    /// With a restriction active, files without an extension are refused.
    pub fn allows(&self, path: &Path) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.allowed.contains(&format!(".{}", ext.to_lowercase())),
            None => false,
        }
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unrestricted() {
            return f.write_str("all extensions");
        }
        let joined: Vec<&str> = self.allowed.iter().map(String::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_allows_everything() {
        let filter = ExtensionFilter::parse("  , ,");
        assert!(filter.is_unrestricted());
        assert!(filter.allows(Path::new("anything.exe")));
        assert!(filter.allows(Path::new("README")));
        assert_eq!(filter.to_string(), "all extensions");
    }

    #[test]
    fn parse_normalizes_entries() {
        let filter = ExtensionFilter::parse(".PDF, docx ,png,");
        assert_eq!(filter.to_string(), ".docx, .pdf, .png");
    }

    #[test]
    fn lone_dot_matches_trailing_dot_names() {
        let filter = ExtensionFilter::parse(".");
        assert!(!filter.is_unrestricted());
        assert_eq!(filter.to_string(), ".");
        assert!(filter.allows(Path::new("scan.")));
        assert!(!filter.allows(Path::new("scan.pdf")));
        assert!(!filter.allows(Path::new("scan")));
    }

    #[test]
    fn allows_is_case_insensitive() {
        let filter = ExtensionFilter::parse("pdf");
        assert!(filter.allows(Path::new("scan.PDF")));
        assert!(filter.allows(Path::new("dir.v2/scan.pdf")));
        assert!(!filter.allows(Path::new("scan.pdf.txt")));
        assert!(!filter.allows(Path::new("scan")));
    }
}
