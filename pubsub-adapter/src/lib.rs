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

//! # pubsub-adapter
//!
//! `pubsub-adapter` is a uniform pub/sub facade: application code publishes
//! and subscribes to named logical channels without depending on a specific
//! message-transport client. The adapter owns channel-to-resource resolution,
//! per-channel topic caching, and canonical JSON payload framing; storage,
//! routing, and delivery guarantees stay with the transport behind the
//! [`Transport`] trait.
//!
//! Typical usage is API-first and centered on [`ChannelAdapter`]. Internal
//! modules are organized by domain layer to keep behavior ownership explicit.
//!
//! ## Publishing
//!
//! ```
//! use integration_test_utils::InMemoryTransport;
//! use pubsub_adapter::ChannelAdapter;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = Arc::new(InMemoryTransport::new());
//! let adapter = ChannelAdapter::new(transport);
//!
//! let receipt = adapter
//!     .publish("my_channel", &json!({"first_name": "Matthew"}))
//!     .await
//!     .unwrap();
//! assert!(!receipt.message_id().is_empty());
//!
//! let receipts = adapter
//!     .publish_batch("my_channel", &[json!("a"), json!({"x": 1})])
//!     .await
//!     .unwrap();
//! assert_eq!(receipts.len(), 2);
//! # });
//! ```
//!
//! ## Subscribing
//!
//! Handlers implement [`ChannelHandler`]: decoded values arrive through
//! `on_message`, payloads that fail canonical decoding through the explicit
//! `on_decode_error` hook. Every envelope is acknowledged exactly once, after
//! the handler returns.
//!
//! ```
//! use integration_test_utils::{InMemoryTransport, RecordingHandler};
//! use pubsub_adapter::ChannelAdapter;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = Arc::new(InMemoryTransport::new());
//! let adapter = ChannelAdapter::builder(transport)
//!     .client_identifier("search")
//!     .build();
//!
//! let handler = Arc::new(RecordingHandler::new());
//! let subscription = adapter
//!     .subscribe("my_channel", handler.clone())
//!     .await
//!     .unwrap();
//! assert_eq!(subscription.name(), "search.my_channel");
//!
//! adapter.publish("my_channel", "Hello World").await.unwrap();
//! assert_eq!(handler.values().await, vec![json!("Hello World")]);
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Facade: outward [`ChannelAdapter`] surface
//! - Resolution: channel-to-resource mapping and the per-adapter topic cache
//! - Codec: canonical JSON framing between values and wire bytes
//! - Delivery: per-subscription listener bridging envelopes to handlers
//! - Transport: the capability contract concrete transports implement
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events/spans
//! and does not unconditionally initialize a global subscriber;
//! binaries/tests are responsible for one-time subscriber initialization at
//! process boundaries.

mod adapter;
pub use adapter::{ChannelAdapter, ChannelAdapterBuilder};

mod error;
pub use error::AdapterError;

pub mod codec;

mod delivery;
pub use delivery::ChannelHandler;

#[doc(hidden)]
pub mod observability;

mod resolution;

pub mod transport;
pub use transport::{PublishReceipt, SubscriptionHandle, TopicHandle, Transport, TransportError};
