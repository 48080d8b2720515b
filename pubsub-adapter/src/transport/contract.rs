//! Capability contract the adapter requires from a concrete transport.

use crate::transport::envelope::EnvelopeListener;
use crate::transport::handles::{PublishReceipt, SubscriptionHandle, TopicHandle};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Failure reported by a transport implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The named resource does not exist and creation was not requested.
    NotFound(String),
    /// Any other transport failure, message carried verbatim.
    Failed(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotFound(resource) => {
                write!(f, "resource not found: {resource}")
            }
            TransportError::Failed(message) => write!(f, "transport failure: {message}"),
        }
    }
}

impl Error for TransportError {}

/// The four capabilities the adapter depends on.
///
/// Resolution calls must be idempotent: requesting the same resource twice
/// yields equivalent handles. When `auto_create` is `false` and the resource
/// is absent, the transport reports [`TransportError::NotFound`] instead of
/// creating it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Looks up the topic named `name`, creating it first when `auto_create`
    /// is set.
    async fn get_or_create_topic(
        &self,
        name: &str,
        auto_create: bool,
    ) -> Result<TopicHandle, TransportError>;

    /// Looks up the subscription named `name` under `topic`, creating it
    /// first when `auto_create` is set.
    async fn get_or_create_subscription(
        &self,
        topic: &TopicHandle,
        name: &str,
        auto_create: bool,
    ) -> Result<SubscriptionHandle, TransportError>;

    /// Submits one payload to `topic` and returns the transport's result
    /// token for it.
    async fn publish(
        &self,
        topic: &TopicHandle,
        payload: Vec<u8>,
    ) -> Result<PublishReceipt, TransportError>;

    /// Submits an ordered batch of payloads to `topic`. The returned receipts
    /// are order-aligned with `payloads`.
    async fn publish_batch(
        &self,
        topic: &TopicHandle,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<PublishReceipt>, TransportError>;

    /// Registers `listener` for messages delivered on `subscription`.
    ///
    /// Returns once registration succeeds; each delivered message is a
    /// separate [`EnvelopeListener::on_envelope`] invocation from the
    /// transport's own delivery context.
    async fn listen(
        &self,
        subscription: &SubscriptionHandle,
        listener: Arc<dyn EnvelopeListener>,
    ) -> Result<(), TransportError>;
}
