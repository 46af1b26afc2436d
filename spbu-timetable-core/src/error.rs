use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network timeout")]
    Timeout,

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected content type {content_type:?} from {url}")]
    ContentType { url: String, content_type: String },

    /// The weakly held owner of an entity (usually the session) was released.
    #[error("The owning {0} is no longer available")]
    ContextGone(&'static str),

    #[error("No matching room found for location: {0}")]
    NoMatchingRoom(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the failure came from the transport or from response validation.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout | Self::Status { .. } | Self::ContentType { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
