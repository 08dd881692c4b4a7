use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoSlugError {
    #[error("repository `{0}` must be in `owner/name` form")]
    Malformed(String),
    #[error("repository `{0}` contains whitespace")]
    Whitespace(String),
}

/// A GitHub repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(".git");
        if trimmed.chars().any(char::is_whitespace) {
            return Err(RepoSlugError::Whitespace(s.to_string()));
        }

        match trimmed.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RepoSlugError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoSlug, RepoSlugError};

    #[test]
    fn parses_owner_and_name() {
        let slug: RepoSlug = "tauri-apps/tauri".parse().expect("valid slug");

        assert_eq!(slug.owner(), "tauri-apps");
        assert_eq!(slug.name(), "tauri");
        assert_eq!(slug.to_string(), "tauri-apps/tauri");
    }

    #[test]
    fn strips_git_suffix_and_surrounding_space() {
        let slug: RepoSlug = " owner/app.git ".parse().expect("valid slug");

        assert_eq!(slug.to_string(), "owner/app");
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "owner", "owner/", "/name", "a/b/c"] {
            assert!(
                matches!(value.parse::<RepoSlug>(), Err(RepoSlugError::Malformed(_))),
                "{value:?} should be rejected"
            );
        }
        assert!(matches!(
            "own er/name".parse::<RepoSlug>(),
            Err(RepoSlugError::Whitespace(_))
        ));
    }
}
