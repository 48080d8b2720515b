//! Canonical JSON framing, pure and side-effect-free.

use crate::error::AdapterError;
use serde::Serialize;
use serde_json::Value;

/// Serializes `value` into its canonical wire bytes.
///
/// Never fails for [`serde_json::Value`]; other `Serialize` impls that JSON
/// cannot represent (non-string map keys, failing custom impls) surface as
/// [`AdapterError::UnencodableValue`].
pub fn encode<T>(value: &T) -> Result<Vec<u8>, AdapterError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_vec(value).map_err(|err| AdapterError::UnencodableValue(err.to_string()))
}

/// Parses wire bytes back into a [`Value`].
///
/// Fails with [`AdapterError::MalformedPayload`] when `payload` is not valid
/// canonical encoding.
pub fn decode(payload: &[u8]) -> Result<Value, AdapterError> {
    serde_json::from_slice(payload).map_err(|err| AdapterError::MalformedPayload(err.to_string()))
}
