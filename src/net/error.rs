//! Error taxonomy for the REST client.
//!
//! Callers branch on the variant rather than parsing messages: transport
//! failures never reached the server, `Status` carries the HTTP status the
//! server answered with, `Encode` means the request body could not be
//! serialized so nothing was sent, `Decode` means the body did not match the expected
//! shape, and the last two are domain failures raised before or after a
//! successful round trip.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http error: status {status}")]
    Status { status: u16 },
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl ApiError {
    /// HTTP status for protocol-level failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
