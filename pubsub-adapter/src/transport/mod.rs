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

//! Transport boundary layer.
//!
//! Defines the narrow capability contract the adapter requires from a
//! message transport: resource lookup with optional auto-creation, single and
//! batched publish of raw payload bytes, and listener registration for
//! delivery. Any concrete transport (broker SDK, in-memory loopback, ...)
//! implements [`Transport`] and is handed to the adapter as an
//! `Arc<dyn Transport>`.
//!
//! The adapter never interprets handles beyond their names; topic and
//! subscription state stays owned by the transport. Delivered messages arrive
//! as [`Envelope`]s carrying the payload bytes and a single-use
//! acknowledgment capability.

pub(crate) mod contract;
pub(crate) mod envelope;
pub(crate) mod handles;

pub use contract::{Transport, TransportError};
pub use envelope::{AckToken, Envelope, EnvelopeListener};
pub use handles::{PublishReceipt, SubscriptionHandle, TopicHandle};
