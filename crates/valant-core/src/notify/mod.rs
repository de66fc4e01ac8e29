//! Domain event publishing.
//!
//! Defines the [`Notifier`] trait and a bounded in-process queue
//! implementation ([`QueueNotifier`]) whose [`EventReceiver`] is drained by
//! the host application.

mod queue;

pub use queue::{channel, EventReceiver, QueueNotifier};

use async_trait::async_trait;

use crate::types::{Item, ItemEvent};

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("publish of '{action}' event was interrupted")]
    Interrupted { action: &'static str },
}

/// Sink for item events. `publish` returns once the event has been
/// accepted or the publish failed; there is no retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, event: ItemEvent) -> Result<(), NotifyError>;

    async fn publish_item_removed(&self, item: &Item) -> Result<(), NotifyError> {
        self.publish(ItemEvent::Removed(item.clone())).await
    }
}
