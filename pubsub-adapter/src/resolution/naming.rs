//! Subscription-name derivation.

/// Client identifier used when the adapter was constructed without one.
pub(crate) const DEFAULT_CLIENT_IDENTIFIER: &str = "default";

/// Derives the subscription name for a (client identifier, channel) pair.
///
/// The identifier prefix keeps two channels consumed under the same client
/// identifier on distinct subscriptions.
pub(crate) fn subscription_name(client_identifier: Option<&str>, channel: &str) -> String {
    format!(
        "{}.{}",
        client_identifier.unwrap_or(DEFAULT_CLIENT_IDENTIFIER),
        channel
    )
}
