use thiserror::Error;
use upcast_host::HostError;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no tag starting with `{prefix}` among the {scanned} most recent tags")]
    NoVersionTag { prefix: char, scanned: usize },

    #[error("release for tag `{tag}` not found")]
    ReleaseNotFound { tag: String },

    #[error("failed to delete stale asset `{name}`: {source}")]
    AssetCleanup {
        name: String,
        #[source]
        source: HostError,
    },

    #[error("failed to upload `{name}`: {source}")]
    Upload {
        name: String,
        #[source]
        source: HostError,
    },

    #[error("failed to encode `{name}`: {source}")]
    Encode {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

impl PublishError {
    /// Whether the failure means something expected on the host is missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NoVersionTag { .. } | Self::ReleaseNotFound { .. } => true,
            Self::Host(error) => error.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PublishError;
    use upcast_host::HostError;

    #[test]
    fn no_version_tag_formats_message() {
        let error = PublishError::NoVersionTag {
            prefix: 'v',
            scanned: 10,
        };

        assert_eq!(
            error.to_string(),
            "no tag starting with `v` among the 10 most recent tags"
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn cleanup_error_keeps_host_source() {
        let error = PublishError::AssetCleanup {
            name: "update.json".to_string(),
            source: HostError::HttpStatus {
                operation: "delete asset",
                status: 403,
                body_snippet: String::new(),
            },
        };

        assert_eq!(
            error.to_string(),
            "failed to delete stale asset `update.json`: delete asset failed with HTTP 403"
        );
        assert!(!error.is_not_found());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn host_not_found_is_reported_as_not_found() {
        let error = PublishError::from(HostError::not_found("repository"));
        assert!(error.is_not_found());
    }
}
