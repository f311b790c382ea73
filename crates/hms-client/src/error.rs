use thiserror::Error;

/// Message shown when a failure carries no usable text of its own.
pub const GENERIC_FAILURE: &str = "请求失败";

/// Rejected outcome of a gateway call.
///
/// `Display` is always the human-readable text a view should show; the
/// extra fields are kept for logging and for callers that want to branch.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response arrived: connection refused, DNS failure, timeout.
    #[error("{message}")]
    Transport { message: String },

    /// Transport-level status outside `[200, 300)`.
    #[error("{}", GENERIC_FAILURE)]
    Status {
        status: u16,
        code: Option<i64>,
        detail: Option<String>,
    },

    /// The envelope reported an application error.
    #[error("{message}")]
    Rejected { code: Option<i64>, message: String },

    /// The body was not a recognizable `{code, message, data}` envelope.
    #[error("{}", GENERIC_FAILURE)]
    Envelope { detail: String },

    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport {
                message: GENERIC_FAILURE.to_string(),
            }
        } else {
            Self::Transport { message }
        }
    }

    pub fn rejected(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }

    /// True when the backend signalled an expired session (`code == 401`).
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Rejected { code: Some(401), .. })
            || matches!(self, Self::Status { status: 401, .. })
            || matches!(self, Self::Status { code: Some(401), .. })
    }

    /// Whether this failure reached the user through a notification.
    ///
    /// Local encoding/decoding problems never leave the process, so the
    /// gateway reports them to the caller only.
    pub fn is_notified(&self) -> bool {
        !matches!(self, Self::Encode(_) | Self::Decode(_))
    }
}

/// Failure reading or writing the durable session token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("session state lock poisoned")]
    Poisoned,
}

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config build error: {0}")]
    Build(#[from] config::ConfigError),

    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transport_message_falls_back_to_generic() {
        let err = GatewayError::transport("  ");
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn status_and_envelope_display_generic_message() {
        let status = GatewayError::Status {
            status: 502,
            code: None,
            detail: Some("bad gateway".into()),
        };
        let envelope = GatewayError::Envelope {
            detail: "expected object".into(),
        };
        assert_eq!(status.to_string(), GENERIC_FAILURE);
        assert_eq!(envelope.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn rejected_keeps_backend_message() {
        let err = GatewayError::rejected(Some(401), "token 已失效");
        assert_eq!(err.to_string(), "token 已失效");
        assert!(err.is_session_expired());
        assert!(!GatewayError::rejected(Some(400), "x").is_session_expired());
    }
}
