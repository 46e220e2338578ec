use reqwest::StatusCode;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Remote rejected request: {}", status_line(.status, .status_text))]
    RemoteRejected {
        status: StatusCode,
        status_text: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Builds a `RemoteRejected` error from a status, filling in its canonical reason.
    pub fn rejected(status: StatusCode) -> Self {
        ClientError::RemoteRejected {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        ClientError::Decode {
            context: context.into(),
            source,
        }
    }

    /// True for failures where no usable response came back: the network call
    /// itself failed or the body could not be decoded.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Decode { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// `"404 Not Found"`, or just `"599"` when the status has no reason text
pub(crate) fn status_line(status: &StatusCode, status_text: &str) -> String {
    if status_text.is_empty() {
        status.as_u16().to_string()
    } else {
        format!("{} {}", status.as_u16(), status_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_canonical_reason() {
        let err = ClientError::rejected(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Remote rejected request: 404 Not Found");
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn test_decode_is_transport_failure() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ClientError::decode("recommendations", source);
        assert!(err.is_transport_failure());
        assert!(err.to_string().starts_with("Failed to decode recommendations"));
    }

    #[test]
    fn test_rejected_without_reason_has_no_trailing_space() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = ClientError::rejected(status);
        assert_eq!(err.to_string(), "Remote rejected request: 599");
    }
}
