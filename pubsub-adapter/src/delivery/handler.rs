//! Caller-facing handler contract for subscribed channels.

use crate::error::AdapterError;
use async_trait::async_trait;
use serde_json::Value;

/// Receives decoded messages for one subscription.
///
/// Invoked from the transport's delivery context, one call per delivered
/// envelope, in the order the transport delivers them for that subscription.
/// Both hooks run before the envelope is acknowledged.
#[async_trait]
pub trait ChannelHandler: Send + Sync {
    /// Called with the decoded value of each well-formed payload.
    async fn on_message(&self, value: Value);

    /// Called when a payload fails canonical decoding.
    ///
    /// The envelope is acknowledged afterwards, so the message will not be
    /// redelivered; this hook is the only place the failure is observable.
    async fn on_decode_error(&self, error: AdapterError);
}
