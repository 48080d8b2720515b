//! Topic and subscription resolution against the transport.

use crate::error::AdapterError;
use crate::observability::events;
use crate::resolution::naming::subscription_name;
use crate::transport::{SubscriptionHandle, TopicHandle, Transport};
use std::sync::Arc;
use topic_cache::TopicCache;
use tracing::debug;

const COMPONENT: &str = "resolver";

/// Resolves channel names to transport handles, memoizing topics.
pub(crate) struct ResourceResolver {
    transport: Arc<dyn Transport>,
    auto_create_topics: bool,
    auto_create_subscriptions: bool,
    topics: TopicCache<TopicHandle>,
}

impl ResourceResolver {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        auto_create_topics: bool,
        auto_create_subscriptions: bool,
    ) -> Self {
        Self {
            transport,
            auto_create_topics,
            auto_create_subscriptions,
            topics: TopicCache::new(),
        }
    }

    /// Returns the topic handle for `channel`, resolving and caching it on
    /// first use.
    ///
    /// No lock is held across the transport round trip; two concurrent
    /// misses both resolve and the later insert wins. Resolution is
    /// idempotent at the transport, so the handles are equivalent.
    pub(crate) async fn resolve_topic(&self, channel: &str) -> Result<TopicHandle, AdapterError> {
        if let Some(topic) = self.topics.get(channel).await {
            debug!(
                event = events::TOPIC_CACHE_HIT,
                component = COMPONENT,
                channel,
                "reusing cached topic handle"
            );
            return Ok(topic);
        }

        debug!(
            event = events::TOPIC_CACHE_MISS,
            component = COMPONENT,
            channel,
            auto_create = self.auto_create_topics,
            "resolving topic via transport"
        );

        let topic = self
            .transport
            .get_or_create_topic(channel, self.auto_create_topics)
            .await?;

        debug!(
            event = events::TOPIC_RESOLVED,
            component = COMPONENT,
            channel,
            topic = topic.name(),
            "topic resolved"
        );

        Ok(self.topics.insert(channel, topic).await)
    }

    /// Resolves the subscription for `channel` under `client_identifier`,
    /// resolving the topic first.
    pub(crate) async fn resolve_subscription(
        &self,
        channel: &str,
        client_identifier: Option<&str>,
    ) -> Result<SubscriptionHandle, AdapterError> {
        let topic = self.resolve_topic(channel).await?;
        let name = subscription_name(client_identifier, channel);

        let subscription = self
            .transport
            .get_or_create_subscription(&topic, &name, self.auto_create_subscriptions)
            .await?;

        debug!(
            event = events::SUBSCRIPTION_RESOLVED,
            component = COMPONENT,
            channel,
            subscription = subscription.name(),
            "subscription resolved"
        );

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceResolver;
    use crate::error::AdapterError;
    use crate::transport::{
        EnvelopeListener, PublishReceipt, SubscriptionHandle, TopicHandle, Transport,
        TransportError,
    };
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Topic { name: String, auto_create: bool },
        Subscription { name: String, auto_create: bool },
    }

    /// Records resolution calls; resources spring into existence only when
    /// `auto_create` is set or the name was seeded.
    #[derive(Default)]
    struct RecordingTransport {
        existing_topics: Vec<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingTransport {
        fn with_topics(topics: &[&str]) -> Self {
            Self {
                existing_topics: topics.iter().map(|t| t.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        async fn calls(&self) -> Vec<Call> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get_or_create_topic(
            &self,
            name: &str,
            auto_create: bool,
        ) -> Result<TopicHandle, TransportError> {
            self.calls.lock().await.push(Call::Topic {
                name: name.to_string(),
                auto_create,
            });
            if !auto_create && !self.existing_topics.iter().any(|t| t == name) {
                return Err(TransportError::NotFound(name.to_string()));
            }
            Ok(TopicHandle::new(name))
        }

        async fn get_or_create_subscription(
            &self,
            topic: &TopicHandle,
            name: &str,
            auto_create: bool,
        ) -> Result<SubscriptionHandle, TransportError> {
            self.calls.lock().await.push(Call::Subscription {
                name: name.to_string(),
                auto_create,
            });
            if !auto_create {
                return Err(TransportError::NotFound(name.to_string()));
            }
            Ok(SubscriptionHandle::new(topic.clone(), name))
        }

        async fn publish(
            &self,
            _topic: &TopicHandle,
            _payload: Vec<u8>,
        ) -> Result<PublishReceipt, TransportError> {
            Err(TransportError::Failed("not used in tests".to_string()))
        }

        async fn publish_batch(
            &self,
            _topic: &TopicHandle,
            _payloads: Vec<Vec<u8>>,
        ) -> Result<Vec<PublishReceipt>, TransportError> {
            Err(TransportError::Failed("not used in tests".to_string()))
        }

        async fn listen(
            &self,
            _subscription: &SubscriptionHandle,
            _listener: Arc<dyn EnvelopeListener>,
        ) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn second_resolution_is_served_from_the_cache() {
        let transport = Arc::new(RecordingTransport::default());
        let resolver = ResourceResolver::new(transport.clone(), true, true);

        let first = resolver.resolve_topic("orders").await.unwrap();
        let second = resolver.resolve_topic("orders").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            transport.calls().await,
            vec![Call::Topic {
                name: "orders".to_string(),
                auto_create: true
            }]
        );
    }

    #[tokio::test]
    async fn disabled_auto_create_is_passed_through_not_omitted() {
        let transport = Arc::new(RecordingTransport::with_topics(&["orders"]));
        let resolver = ResourceResolver::new(transport.clone(), false, true);

        resolver.resolve_topic("orders").await.unwrap();

        assert_eq!(
            transport.calls().await,
            vec![Call::Topic {
                name: "orders".to_string(),
                auto_create: false
            }]
        );
    }

    #[tokio::test]
    async fn absent_topic_without_auto_create_surfaces_resource_not_found() {
        let transport = Arc::new(RecordingTransport::default());
        let resolver = ResourceResolver::new(transport, false, true);

        let err = resolver.resolve_topic("orders").await.unwrap_err();

        assert_eq!(err, AdapterError::ResourceNotFound("orders".to_string()));
    }

    #[tokio::test]
    async fn subscription_resolution_resolves_topic_first_and_derives_name() {
        let transport = Arc::new(RecordingTransport::default());
        let resolver = ResourceResolver::new(transport.clone(), true, true);

        let subscription = resolver
            .resolve_subscription("orders", Some("search"))
            .await
            .unwrap();

        assert_eq!(subscription.name(), "search.orders");
        assert_eq!(subscription.topic().name(), "orders");
        assert_eq!(
            transport.calls().await,
            vec![
                Call::Topic {
                    name: "orders".to_string(),
                    auto_create: true
                },
                Call::Subscription {
                    name: "search.orders".to_string(),
                    auto_create: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn subscription_resolution_without_identifier_uses_default_prefix() {
        let transport = Arc::new(RecordingTransport::default());
        let resolver = ResourceResolver::new(transport, true, true);

        let subscription = resolver.resolve_subscription("orders", None).await.unwrap();

        assert_eq!(subscription.name(), "default.orders");
    }

    #[tokio::test]
    async fn absent_subscription_without_auto_create_surfaces_resource_not_found() {
        let transport = Arc::new(RecordingTransport::default());
        let resolver = ResourceResolver::new(transport, true, false);

        let err = resolver
            .resolve_subscription("orders", Some("search"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AdapterError::ResourceNotFound("search.orders".to_string())
        );
    }
}
