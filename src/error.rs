use thiserror::Error;

/// Failure taxonomy for engine operations.
///
/// "No media produced" is deliberately absent: binary-bearing operations
/// return `Ok(None)` when the backend declines to produce inline data.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The backend returned no text where text was required.
    #[error("empty response from AI engine")]
    EmptyResponse,

    /// Text was present but failed JSON parsing or structural validation.
    #[error("{operation} returned malformed data: {detail}")]
    MalformedData {
        operation: &'static str,
        detail: String,
    },

    /// The HTTP call itself failed (network, TLS, body decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("AI engine error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Caller-supplied media could not be used.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An audio output device could not be opened or driven.
    #[error("audio playback failed: {0}")]
    Audio(String),
}

impl EngineError {
    pub fn malformed(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedData {
            operation,
            detail: detail.into(),
        }
    }
}
