//! Stable event names and field helpers for structured tracing calls.
//!
//! The crate emits events/spans only; installing a `tracing` subscriber is the
//! responsibility of binaries and test harnesses.

/// Event-name constants carried in the `event` field of tracing calls.
pub mod events {
    pub const TOPIC_CACHE_HIT: &str = "resolution.topic_cache_hit";
    pub const TOPIC_CACHE_MISS: &str = "resolution.topic_cache_miss";
    pub const TOPIC_RESOLVED: &str = "resolution.topic_resolved";
    pub const SUBSCRIPTION_RESOLVED: &str = "resolution.subscription_resolved";

    pub const PUBLISH_SUBMITTED: &str = "adapter.publish_submitted";
    pub const PUBLISH_BATCH_SUBMITTED: &str = "adapter.publish_batch_submitted";
    pub const SUBSCRIBE_LISTENING: &str = "adapter.subscribe_listening";

    pub const DELIVERY_RECEIVED: &str = "delivery.received";
    pub const DELIVERY_DECODE_FAILED: &str = "delivery.decode_failed";
    pub const DELIVERY_ACKED: &str = "delivery.acked";
}

/// Formatting helpers for tracing fields.
pub mod fields {
    /// Renders a short lossy preview of a payload for debug events.
    pub fn payload_preview(payload: &[u8]) -> String {
        const PREVIEW_LEN: usize = 64;
        let preview = String::from_utf8_lossy(&payload[..payload.len().min(PREVIEW_LEN)]);
        if payload.len() > PREVIEW_LEN {
            format!("{preview}…")
        } else {
            preview.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fields::payload_preview;

    #[test]
    fn short_payloads_render_in_full() {
        assert_eq!(payload_preview(b"\"Hello World!\""), "\"Hello World!\"");
    }

    #[test]
    fn long_payloads_are_truncated_with_ellipsis() {
        let payload = vec![b'a'; 100];
        let preview = payload_preview(&payload);
        assert!(preview.ends_with('…'));
        assert_eq!(preview.chars().filter(|c| *c == 'a').count(), 64);
    }
}
