use reqwest::StatusCode;
use serde::Deserialize;
use youth_council_shared::ValidationError;

/// Everything that can go wrong between a screen and the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("parse error: {0}")]
    Decode(String),
    /// Caught locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server returned a {0} without an id")]
    MissingId(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }

    /// The backend rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ApiError::Io {
            context: context.into(),
            source,
        }
    }

    /// Build a status error from a response body. FastAPI-style
    /// `{"detail": ...}` bodies contribute their detail text.
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: serde_json::Value,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|parsed| match parsed.detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        ApiError::Status {
            status,
            message,
        }
    }
}
