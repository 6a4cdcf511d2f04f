//! Notifier trait for delivering messages to the user

use async_trait::async_trait;

/// Trait for sending text messages to a fixed destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver `text`; a rejected or undeliverable message is an error
    async fn send(&self, text: &str) -> crate::Result<()>;
}
