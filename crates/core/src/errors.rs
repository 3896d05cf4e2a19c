use serde_json::Value;
use thiserror::Error;

/// Failures while talking to the marketplace API. Raw transport errors are
/// stringified at the boundary so callers never see the HTTP stack.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. `message` carries the server-provided `message`
    /// field when the body had one, otherwise a generic status text.
    #[error("{message}")]
    Status { status: u16, message: String, details: Option<Value> },
    #[error("Connection error: {0}")]
    Transport(String),
    #[error("Invalid response format from server")]
    MalformedBody,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::MalformedBody => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Status { details, .. } => details.as_ref(),
            Self::Transport(_) | Self::MalformedBody => None,
        }
    }
}

/// The single error kind surfaced per turn. Every message is safe to print
/// back to the user verbatim.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Please select a seller first")]
    SellerNotSelected,
    #[error("Please select the product first")]
    ProductNotSelected,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => error.status(),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Api(error) => error.details(),
            _ => None,
        }
    }
}
