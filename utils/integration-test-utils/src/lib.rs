/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Shared test doubles for exercising the adapter without a broker.
//!
//! [`InMemoryTransport`] implements the full [`Transport`] contract as an
//! in-process loopback: publishing to a topic delivers synchronously to every
//! listener on every subscription attached to that topic, each envelope
//! carrying its own counting acknowledgment. Resolution calls and published
//! payloads are recorded so tests can assert on the exact traffic the adapter
//! generated, including the auto-create flags it passed.

use async_trait::async_trait;
use pubsub_adapter::transport::{
    AckToken, Envelope, EnvelopeListener, PublishReceipt, SubscriptionHandle, TopicHandle,
    Transport, TransportError,
};
use pubsub_adapter::{AdapterError, ChannelHandler};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tokio::sync::Mutex;
use uuid::Uuid;

/// One recorded `get_or_create_*` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionCall {
    pub name: String,
    pub auto_create: bool,
}

/// One payload accepted by the transport, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub message_id: String,
}

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

#[derive(Default)]
struct State {
    topics: BTreeSet<String>,
    subscriptions: BTreeMap<String, String>,
    listeners: BTreeMap<String, Vec<Arc<dyn EnvelopeListener>>>,
    topic_calls: Vec<ResolutionCall>,
    subscription_calls: Vec<ResolutionCall>,
    published: Vec<PublishedMessage>,
    acks: Vec<Arc<CountingAck>>,
}

/// In-process loopback transport with call recording.
#[derive(Default)]
pub struct InMemoryTransport {
    state: Mutex<State>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given topics already existing, for exercising the
    /// disabled-auto-create paths.
    pub fn with_topics(topics: &[&str]) -> Self {
        let mut transport = Self::new();
        let state = transport.state.get_mut();
        for topic in topics {
            state.topics.insert(topic.to_string());
        }
        transport
    }

    /// Every topic resolution call seen so far, in order.
    pub async fn topic_calls(&self) -> Vec<ResolutionCall> {
        self.state.lock().await.topic_calls.clone()
    }

    /// Every subscription resolution call seen so far, in order.
    pub async fn subscription_calls(&self) -> Vec<ResolutionCall> {
        self.state.lock().await.subscription_calls.clone()
    }

    /// Every payload accepted for publish, in order.
    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.state.lock().await.published.clone()
    }

    /// Acknowledgment count per delivered envelope, in delivery order.
    pub async fn ack_counts(&self) -> Vec<usize> {
        self.state
            .lock()
            .await
            .acks
            .iter()
            .map(|ack| ack.count.load(Ordering::SeqCst))
            .collect()
    }

    async fn deliver(&self, topic: &TopicHandle, payload: Vec<u8>) -> Result<String, TransportError> {
        let message_id = Uuid::new_v4().to_string();

        let deliveries = {
            let mut state = self.state.lock().await;
            if !state.topics.contains(topic.name()) {
                return Err(TransportError::NotFound(topic.name().to_string()));
            }
            state.published.push(PublishedMessage {
                topic: topic.name().to_string(),
                payload: payload.clone(),
                message_id: message_id.clone(),
            });

            let attached: Vec<String> = state
                .subscriptions
                .iter()
                .filter(|(_, topic_name)| topic_name.as_str() == topic.name())
                .map(|(subscription, _)| subscription.clone())
                .collect();

            let mut deliveries = Vec::new();
            for subscription in attached {
                let listeners: Vec<_> = state
                    .listeners
                    .get(&subscription)
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect();
                for listener in listeners {
                    let ack = Arc::new(CountingAck::default());
                    state.acks.push(ack.clone());
                    deliveries.push((listener, Envelope::new(payload.clone(), ack)));
                }
            }
            deliveries
        };

        // Dispatch outside the state lock; listeners run user code.
        for (listener, envelope) in deliveries {
            listener.on_envelope(envelope).await;
        }

        Ok(message_id)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn get_or_create_topic(
        &self,
        name: &str,
        auto_create: bool,
    ) -> Result<TopicHandle, TransportError> {
        let mut state = self.state.lock().await;
        state.topic_calls.push(ResolutionCall {
            name: name.to_string(),
            auto_create,
        });

        if !state.topics.contains(name) {
            if !auto_create {
                return Err(TransportError::NotFound(name.to_string()));
            }
            state.topics.insert(name.to_string());
        }

        Ok(TopicHandle::new(name))
    }

    async fn get_or_create_subscription(
        &self,
        topic: &TopicHandle,
        name: &str,
        auto_create: bool,
    ) -> Result<SubscriptionHandle, TransportError> {
        let mut state = self.state.lock().await;
        state.subscription_calls.push(ResolutionCall {
            name: name.to_string(),
            auto_create,
        });

        if !state.subscriptions.contains_key(name) {
            if !auto_create {
                return Err(TransportError::NotFound(name.to_string()));
            }
            state
                .subscriptions
                .insert(name.to_string(), topic.name().to_string());
        }

        Ok(SubscriptionHandle::new(topic.clone(), name))
    }

    async fn publish(
        &self,
        topic: &TopicHandle,
        payload: Vec<u8>,
    ) -> Result<PublishReceipt, TransportError> {
        let message_id = self.deliver(topic, payload).await?;
        Ok(PublishReceipt::new(message_id))
    }

    async fn publish_batch(
        &self,
        topic: &TopicHandle,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<PublishReceipt>, TransportError> {
        let mut receipts = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let message_id = self.deliver(topic, payload).await?;
            receipts.push(PublishReceipt::new(message_id));
        }
        Ok(receipts)
    }

    async fn listen(
        &self,
        subscription: &SubscriptionHandle,
        listener: Arc<dyn EnvelopeListener>,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;
        if !state.subscriptions.contains_key(subscription.name()) {
            return Err(TransportError::NotFound(subscription.name().to_string()));
        }
        state
            .listeners
            .entry(subscription.name().to_string())
            .or_default()
            .push(listener);
        Ok(())
    }
}

/// Handler that records everything it is given.
#[derive(Default)]
pub struct RecordingHandler {
    values: Mutex<Vec<Value>>,
    errors: Mutex<Vec<AdapterError>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn values(&self) -> Vec<Value> {
        self.values.lock().await.clone()
    }

    pub async fn errors(&self) -> Vec<AdapterError> {
        self.errors.lock().await.clone()
    }
}

#[async_trait]
impl ChannelHandler for RecordingHandler {
    async fn on_message(&self, value: Value) {
        self.values.lock().await.push(value);
    }

    async fn on_decode_error(&self, error: AdapterError) {
        self.errors.lock().await.push(error);
    }
}

/// One-time tracing subscriber for tests; honors `RUST_LOG`.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
