//! Release notes resolved from a Markdown changelog.
//!
//! The changelog is split into sections headed `## <tag>`; the notes for a
//! tag are the trimmed body of its section.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

pub const DEFAULT_CHANGELOG: &str = "UPDATELOG.md";

const SECTION_MARKER: &str = "## ";

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("changelog {path} does not exist")]
    Missing { path: PathBuf },
    #[error("failed to read changelog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies release notes for a tag.
pub trait NotesSource: Send + Sync {
    fn notes_for(&self, tag: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct Changelog {
    sections: HashMap<String, String>,
}

impl Changelog {
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut sections = HashMap::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in content.lines() {
            if let Some(heading) = line.strip_prefix(SECTION_MARKER) {
                if let Some((tag, body)) = current.take() {
                    sections.insert(tag, body.join("\n").trim().to_string());
                }
                current = Some((heading.trim().to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }

        if let Some((tag, body)) = current {
            sections.insert(tag, body.join("\n").trim().to_string());
        }

        Self { sections }
    }

    /// Reads and parses the changelog at `path`.
    ///
    /// # Errors
    /// Returns [`ChangelogError::Missing`] if the file does not exist and
    /// [`ChangelogError::Read`] for any other I/O failure.
    pub fn load(path: &Path) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ChangelogError::Missing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads the changelog, treating any failure as an empty changelog.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(changelog) => changelog,
            Err(e @ ChangelogError::Missing { .. }) => {
                debug!("{e}, release notes will use the fallback");
                Self::default()
            }
            Err(e) => {
                warn!("{e}, release notes will use the fallback");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn section(&self, tag: &str) -> Option<&str> {
        self.sections.get(tag).map(String::as_str)
    }
}

impl NotesSource for Changelog {
    fn notes_for(&self, tag: &str) -> Option<String> {
        self.section(tag)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string)
    }
}

/// Resolves notes for `tag`: changelog section, then `fallback`, then empty.
pub fn resolve_notes<N>(source: &N, tag: &str, fallback: Option<&str>) -> String
where
    N: NotesSource + ?Sized,
{
    source
        .notes_for(tag)
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
# Changelog

## v1.2.0

### Features

- Tray icon

## v1.1.0
- Fix crash on start

## v1.0.0
";

    #[test]
    fn parse_splits_sections_by_heading() {
        let changelog = Changelog::parse(LOG);

        assert_eq!(changelog.section("v1.2.0"), Some("### Features\n\n- Tray icon"));
        assert_eq!(changelog.section("v1.1.0"), Some("- Fix crash on start"));
        assert_eq!(changelog.section("v1.0.0"), Some(""));
        assert_eq!(changelog.section("v0.9.0"), None);
    }

    #[test]
    fn resolve_prefers_changelog_then_fallback() {
        let changelog = Changelog::parse(LOG);

        assert_eq!(
            resolve_notes(&changelog, "v1.1.0", Some("fallback")),
            "- Fix crash on start"
        );
        assert_eq!(resolve_notes(&changelog, "v1.0.0", Some("fallback")), "fallback");
        assert_eq!(resolve_notes(&changelog, "v3.0.0", None), "");
    }

    #[test]
    fn load_reports_missing_file() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("UPDATELOG.md");

        let result = Changelog::load(&path);

        assert!(matches!(result, Err(ChangelogError::Missing { .. })));
        assert!(Changelog::load_or_empty(&path).section("v1.0.0").is_none());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("UPDATELOG.md");
        std::fs::write(&path, LOG).expect("changelog should be written");

        let changelog = Changelog::load(&path).expect("changelog should load");

        assert_eq!(changelog.notes_for("v1.1.0").as_deref(), Some("- Fix crash on start"));
    }
}
