//! Adapter-level error taxonomy.

use crate::transport::TransportError;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Failure surfaced by an adapter operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The requested topic or subscription is absent and the matching
    /// auto-create flag was disabled.
    ResourceNotFound(String),
    /// The transport rejected a resolution, publish, or listen call.
    Transport(TransportError),
    /// Received bytes are not a valid canonical encoding.
    MalformedPayload(String),
    /// The value handed to publish cannot be represented by the codec.
    UnencodableValue(String),
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::ResourceNotFound(resource) => {
                write!(f, "resource not found: {resource}")
            }
            AdapterError::Transport(err) => write!(f, "transport error: {err}"),
            AdapterError::MalformedPayload(detail) => {
                write!(f, "malformed payload: {detail}")
            }
            AdapterError::UnencodableValue(detail) => {
                write!(f, "unencodable value: {detail}")
            }
        }
    }
}

impl Error for AdapterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AdapterError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Resolution-path mapping: an absent resource becomes [`AdapterError::ResourceNotFound`];
/// every other transport failure propagates verbatim.
impl From<TransportError> for AdapterError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotFound(resource) => AdapterError::ResourceNotFound(resource),
            other => AdapterError::Transport(other),
        }
    }
}
