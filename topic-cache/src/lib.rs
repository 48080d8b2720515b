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

//! # topic-cache
//!
//! Memoization of resolved transport resources, keyed by channel name.
//!
//! A [`TopicCache`] is owned by a single adapter instance rather than living in
//! module-level static state, so two adapters never observe each other's
//! resolutions. Entries are populated lazily on first resolution and are never
//! invalidated or evicted; a handle that goes stale because the underlying
//! resource was deleted out-of-band keeps being returned, and the failure
//! surfaces on the next transport call that uses it.
//!
//! Concurrent resolutions of the same uncached channel are tolerated rather
//! than serialized: both callers resolve, both insert, and the last writer
//! wins. Resolution is idempotent at the transport, so the two handles are
//! equivalent.
//!
//! ```
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use topic_cache::TopicCache;
//!
//! let cache: TopicCache<String> = TopicCache::new();
//! assert!(cache.get("orders").await.is_none());
//!
//! cache.insert("orders", "handle-a".to_string()).await;
//! assert_eq!(cache.get("orders").await.as_deref(), Some("handle-a"));
//! # });
//! ```

use std::collections::HashMap;
use tokio::sync::Mutex;

/// Per-adapter cache of resolved handles, keyed by channel name.
pub struct TopicCache<T> {
    entries: Mutex<HashMap<String, T>>,
}

impl<T: Clone> TopicCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the cached handle for `channel`, if one was stored.
    pub async fn get(&self, channel: &str) -> Option<T> {
        self.entries.lock().await.get(channel).cloned()
    }

    /// Stores `handle` under `channel`, replacing any previous entry.
    ///
    /// Returns the handle just stored so callers can insert-and-use in one
    /// expression. When two resolutions race, the later insert overwrites the
    /// earlier one; both handles name the same resource.
    pub async fn insert(&self, channel: impl Into<String>, handle: T) -> T {
        self.entries
            .lock()
            .await
            .insert(channel.into(), handle.clone());
        handle
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<T: Clone> Default for TopicCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
