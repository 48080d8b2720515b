//! Delivered-message envelope and acknowledgment capability.

use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Single-use acknowledgment capability attached to a delivered message.
///
/// Implemented by the transport; invoked by the adapter once the caller's
/// handler has returned. Until then the message counts as in flight and the
/// transport's own redelivery policy governs retry.
#[async_trait]
pub trait AckToken: Send + Sync {
    async fn acknowledge(&self);
}

/// Listener registered with a transport for one subscription.
///
/// The transport may invoke this from its own delivery worker, so
/// implementations must not assume exclusive access to adapter state.
#[async_trait]
pub trait EnvelopeListener: Send + Sync {
    async fn on_envelope(&self, envelope: Envelope);
}

/// A delivered message: payload bytes plus its acknowledgment capability.
///
/// [`Envelope::acknowledge`] consumes the envelope, so a message cannot be
/// acknowledged twice.
pub struct Envelope {
    payload: Vec<u8>,
    ack: Arc<dyn AckToken>,
}

impl Envelope {
    pub fn new(payload: Vec<u8>, ack: Arc<dyn AckToken>) -> Self {
        Self { payload, ack }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub async fn acknowledge(self) {
        self.ack.acknowledge().await;
    }
}

impl Debug for Envelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("payload_len", &self.payload.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{AckToken, Envelope};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingAck {
        count: AtomicUsize,
    }

    #[async_trait]
    impl AckToken for CountingAck {
        async fn acknowledge(&self) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn acknowledge_consumes_envelope_and_fires_token_once() {
        let ack = Arc::new(CountingAck::default());
        let envelope = Envelope::new(b"payload".to_vec(), ack.clone());

        assert_eq!(envelope.payload(), b"payload");
        envelope.acknowledge().await;

        assert_eq!(ack.count.load(Ordering::SeqCst), 1);
    }
}
