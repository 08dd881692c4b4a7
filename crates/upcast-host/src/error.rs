use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Network error during {operation} ({stage}): {details}")]
    Network {
        operation: &'static str,
        stage: NetworkStage,
        details: String,
    },

    #[error("{operation} failed with HTTP {status}{body_snippet}")]
    HttpStatus {
        operation: &'static str,
        status: u16,
        body_snippet: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    #[error("request")]
    Request,
    #[error("response parse")]
    ResponseParse,
}

impl HostError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn network_request(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Network {
            operation,
            stage: NetworkStage::Request,
            details: details.into(),
        }
    }

    pub fn network_request_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::network_request(operation, error.to_string())
    }

    pub fn network_parse(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Network {
            operation,
            stage: NetworkStage::ResponseParse,
            details: details.into(),
        }
    }

    pub fn network_parse_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::network_parse(operation, error.to_string())
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
