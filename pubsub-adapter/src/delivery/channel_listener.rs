//! Listener adapter bridging transport envelopes to channel handlers.

use crate::codec;
use crate::delivery::handler::ChannelHandler;
use crate::observability::{events, fields};
use crate::transport::{Envelope, EnvelopeListener};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "channel_listener";

/// Per-subscription listener: decode, dispatch, acknowledge.
pub(crate) struct ChannelListener {
    channel: String,
    handler: Arc<dyn ChannelHandler>,
}

impl ChannelListener {
    pub(crate) fn new(channel: &str, handler: Arc<dyn ChannelHandler>) -> Self {
        Self {
            channel: channel.to_string(),
            handler,
        }
    }
}

#[async_trait]
impl EnvelopeListener for ChannelListener {
    async fn on_envelope(&self, envelope: Envelope) {
        let channel = self.channel.as_str();

        debug!(
            event = events::DELIVERY_RECEIVED,
            component = COMPONENT,
            channel,
            payload = %fields::payload_preview(envelope.payload()),
            "received envelope"
        );

        match codec::decode(envelope.payload()) {
            Ok(value) => self.handler.on_message(value).await,
            Err(err) => {
                warn!(
                    event = events::DELIVERY_DECODE_FAILED,
                    component = COMPONENT,
                    channel,
                    err = %err,
                    "payload failed canonical decoding"
                );
                self.handler.on_decode_error(err).await;
            }
        }

        // Ack only after the handler returns; until then the transport's
        // redelivery policy still covers the message.
        envelope.acknowledge().await;

        debug!(
            event = events::DELIVERY_ACKED,
            component = COMPONENT,
            channel,
            "envelope acknowledged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelListener;
    use crate::delivery::handler::ChannelHandler;
    use crate::error::AdapterError;
    use crate::transport::{AckToken, Envelope, EnvelopeListener};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Appends to a shared step log so tests can assert ordering across the
    /// handler and the ack token.
    #[derive(Clone, Default)]
    struct StepLog(Arc<Mutex<Vec<String>>>);

    impl StepLog {
        async fn push(&self, step: impl Into<String>) {
            self.0.lock().await.push(step.into());
        }

        async fn steps(&self) -> Vec<String> {
            self.0.lock().await.clone()
        }
    }

    struct LoggingHandler {
        log: StepLog,
        values: Mutex<Vec<Value>>,
        errors: Mutex<Vec<AdapterError>>,
    }

    impl LoggingHandler {
        fn new(log: StepLog) -> Self {
            Self {
                log,
                values: Mutex::new(Vec::new()),
                errors: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChannelHandler for LoggingHandler {
        async fn on_message(&self, value: Value) {
            self.log.push("handler").await;
            self.values.lock().await.push(value);
        }

        async fn on_decode_error(&self, error: AdapterError) {
            self.log.push("decode_error").await;
            self.errors.lock().await.push(error);
        }
    }

    struct LoggingAck {
        log: StepLog,
    }

    #[async_trait]
    impl AckToken for LoggingAck {
        async fn acknowledge(&self) {
            self.log.push("ack").await;
        }
    }

    fn envelope(payload: &[u8], log: &StepLog) -> Envelope {
        Envelope::new(payload.to_vec(), Arc::new(LoggingAck { log: log.clone() }))
    }

    #[tokio::test]
    async fn well_formed_payload_reaches_handler_then_acks() {
        let log = StepLog::default();
        let handler = Arc::new(LoggingHandler::new(log.clone()));
        let listener = ChannelListener::new("my_channel", handler.clone());

        listener
            .on_envelope(envelope(b"\"Hello World!\"", &log))
            .await;

        assert_eq!(log.steps().await, vec!["handler", "ack"]);
        assert_eq!(
            handler.values.lock().await.as_slice(),
            &[json!("Hello World!")]
        );
    }

    #[tokio::test]
    async fn decode_failure_fires_error_hook_and_still_acks() {
        let log = StepLog::default();
        let handler = Arc::new(LoggingHandler::new(log.clone()));
        let listener = ChannelListener::new("my_channel", handler.clone());

        listener.on_envelope(envelope(b"not json", &log)).await;

        assert_eq!(log.steps().await, vec!["decode_error", "ack"]);
        assert!(handler.values.lock().await.is_empty());

        let errors = handler.errors.lock().await;
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AdapterError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn sequential_envelopes_are_dispatched_in_delivery_order() {
        let log = StepLog::default();
        let handler = Arc::new(LoggingHandler::new(log.clone()));
        let listener = ChannelListener::new("my_channel", handler.clone());

        listener
            .on_envelope(envelope(b"\"Hello World!\"", &log))
            .await;
        listener
            .on_envelope(envelope(br#"{"hello":"world"}"#, &log))
            .await;

        assert_eq!(
            handler.values.lock().await.as_slice(),
            &[json!("Hello World!"), json!({"hello": "world"})]
        );
        assert_eq!(log.steps().await, vec!["handler", "ack", "handler", "ack"]);
    }
}
