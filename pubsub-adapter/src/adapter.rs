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

use crate::codec;
use crate::delivery::channel_listener::ChannelListener;
use crate::delivery::handler::ChannelHandler;
use crate::error::AdapterError;
use crate::observability::events;
use crate::resolution::resolver::ResourceResolver;
use crate::transport::{PublishReceipt, SubscriptionHandle, Transport};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "channel_adapter";

/// Facade for publishing and subscribing to named channels over any
/// [`Transport`].
///
/// One adapter instance owns one topic cache; construct one per transport
/// client and share it by reference. All operations are asynchronous and
/// propagate failures to the immediate caller; nothing is retried or
/// swallowed at this layer.
pub struct ChannelAdapter {
    client_identifier: Option<String>,
    transport: Arc<dyn Transport>,
    resolver: ResourceResolver,
}

impl ChannelAdapter {
    /// Builds an adapter with the default configuration: no client
    /// identifier, topics and subscriptions auto-created on first use.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::builder(transport).build()
    }

    pub fn builder(transport: Arc<dyn Transport>) -> ChannelAdapterBuilder {
        ChannelAdapterBuilder {
            transport,
            client_identifier: None,
            auto_create_topics: true,
            auto_create_subscriptions: true,
        }
    }

    /// The client identifier used to derive subscription names, when set.
    pub fn client_identifier(&self) -> Option<&str> {
        self.client_identifier.as_deref()
    }

    /// Encodes `value` and submits it to the channel's topic.
    ///
    /// Returns the transport's result token unchanged. The topic is resolved
    /// once per channel and reused from the cache on every later call.
    pub async fn publish<T>(
        &self,
        channel: &str,
        value: &T,
    ) -> Result<PublishReceipt, AdapterError>
    where
        T: Serialize + ?Sized,
    {
        let topic = self.resolver.resolve_topic(channel).await?;
        let payload = codec::encode(value)?;

        let receipt = self
            .transport
            .publish(&topic, payload)
            .await
            .map_err(AdapterError::Transport)?;

        debug!(
            event = events::PUBLISH_SUBMITTED,
            component = COMPONENT,
            channel,
            message_id = receipt.message_id(),
            "publish accepted by transport"
        );

        Ok(receipt)
    }

    /// Encodes every value in order and submits them as one transport batch.
    ///
    /// The returned receipts are order-aligned with `values`. Encoding fails
    /// fast: if any value is unencodable, nothing is submitted.
    pub async fn publish_batch<T>(
        &self,
        channel: &str,
        values: &[T],
    ) -> Result<Vec<PublishReceipt>, AdapterError>
    where
        T: Serialize,
    {
        let topic = self.resolver.resolve_topic(channel).await?;
        let payloads = values
            .iter()
            .map(codec::encode)
            .collect::<Result<Vec<_>, _>>()?;

        let receipts = self
            .transport
            .publish_batch(&topic, payloads)
            .await
            .map_err(AdapterError::Transport)?;

        debug!(
            event = events::PUBLISH_BATCH_SUBMITTED,
            component = COMPONENT,
            channel,
            batch_len = receipts.len(),
            "batch accepted by transport"
        );

        Ok(receipts)
    }

    /// Resolves the channel's subscription and registers `handler` for it.
    ///
    /// Each delivered envelope is decoded and dispatched to
    /// [`ChannelHandler::on_message`]; payloads that fail decoding reach
    /// [`ChannelHandler::on_decode_error`] instead. The envelope is
    /// acknowledged exactly once in both cases, after the handler returns —
    /// poison messages are dropped rather than redelivered forever.
    pub async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn ChannelHandler>,
    ) -> Result<SubscriptionHandle, AdapterError> {
        let subscription = self
            .resolver
            .resolve_subscription(channel, self.client_identifier.as_deref())
            .await?;

        let listener = Arc::new(ChannelListener::new(channel, handler));
        self.transport
            .listen(&subscription, listener)
            .await
            .map_err(AdapterError::Transport)?;

        debug!(
            event = events::SUBSCRIBE_LISTENING,
            component = COMPONENT,
            channel,
            subscription = subscription.name(),
            "listener registered"
        );

        Ok(subscription)
    }
}

/// Builder mirroring the adapter's defaulted construction parameters.
pub struct ChannelAdapterBuilder {
    transport: Arc<dyn Transport>,
    client_identifier: Option<String>,
    auto_create_topics: bool,
    auto_create_subscriptions: bool,
}

impl ChannelAdapterBuilder {
    /// Sets the client identifier used to derive subscription names.
    pub fn client_identifier(mut self, client_identifier: impl Into<String>) -> Self {
        self.client_identifier = Some(client_identifier.into());
        self
    }

    /// Whether absent topics are created during resolution (default `true`).
    pub fn auto_create_topics(mut self, auto_create: bool) -> Self {
        self.auto_create_topics = auto_create;
        self
    }

    /// Whether absent subscriptions are created during resolution
    /// (default `true`).
    pub fn auto_create_subscriptions(mut self, auto_create: bool) -> Self {
        self.auto_create_subscriptions = auto_create;
        self
    }

    pub fn build(self) -> ChannelAdapter {
        ChannelAdapter {
            client_identifier: self.client_identifier,
            resolver: ResourceResolver::new(
                self.transport.clone(),
                self.auto_create_topics,
                self.auto_create_subscriptions,
            ),
            transport: self.transport,
        }
    }
}
