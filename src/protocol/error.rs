//! Relay error taxonomy.
//!
//! Every variant's `Display` text is exactly the `message` sent to the client.

use thiserror::Error;

/// Errors surfaced to clients as `error`-typed replies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Frame was not valid JSON. No handler runs and no `requestId` is echoed.
    #[error("Invalid JSON Payload")]
    MalformedPayload,

    /// Valid JSON whose `type` matches no registered handler.
    #[error("Invalid request type")]
    UnknownRequestType(Option<String>),

    /// Provider has no entity with this name. Carries the name as the client sent it.
    #[error("Pokemon \"{name}\" not found")]
    UpstreamNotFound { name: String },

    /// Any other provider failure, carrying the underlying message.
    #[error("{0}")]
    UpstreamFailure(String),
}

impl RelayError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MalformedPayload => "malformed_payload",
            RelayError::UnknownRequestType(_) => "unknown_request_type",
            RelayError::UpstreamNotFound { .. } => "upstream_not_found",
            RelayError::UpstreamFailure(_) => "upstream_failure",
        }
    }
}

/// Result type for request handling.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages() {
        assert_eq!(RelayError::MalformedPayload.to_string(), "Invalid JSON Payload");
        assert_eq!(
            RelayError::UnknownRequestType(Some("teamBuilder".into())).to_string(),
            "Invalid request type"
        );
        assert_eq!(
            RelayError::UpstreamNotFound { name: "NotARealMon".into() }.to_string(),
            "Pokemon \"NotARealMon\" not found"
        );
        assert_eq!(
            RelayError::UpstreamFailure("connection refused".into()).to_string(),
            "connection refused"
        );
    }
}
