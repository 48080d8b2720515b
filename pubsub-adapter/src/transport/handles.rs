//! Named resource handles exchanged across the transport boundary.

use std::sync::Arc;

/// Handle for a transport-level publish target bound to a channel name.
///
/// Cheap to clone; equality is by resolved name. The transport owns whatever
/// state sits behind the name, so two handles with the same name are
/// interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicHandle {
    name: Arc<str>,
}

impl TopicHandle {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Handle for a transport-level receive target, scoped by
/// (channel, client identifier).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    name: Arc<str>,
    topic: TopicHandle,
}

impl SubscriptionHandle {
    pub fn new(topic: TopicHandle, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            topic,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The topic this subscription receives from.
    pub fn topic(&self) -> &TopicHandle {
        &self.topic
    }
}

/// Result token a transport returns for an accepted publish, surfaced to the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    message_id: String,
}

impl PublishReceipt {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}
