use serde::Deserialize;
use thiserror::Error;

/// Failure of a single backend round trip.
///
/// `Unauthorized` is split out because a 401 has a global meaning for the
/// whole UI: the stored session is invalid and must be discarded. Every
/// other status passes through with whatever message the backend supplied.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("backend returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Message suitable for showing to the user, if the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body shape used by the backend. The `message` field is either a
/// plain string or an array of validation messages.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<MessageField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

/// Extract a display message from a raw error body, if it parses.
pub(crate) fn message_from_body(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.message? {
        MessageField::One(message) => Some(message),
        MessageField::Many(messages) => {
            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
    }
}
