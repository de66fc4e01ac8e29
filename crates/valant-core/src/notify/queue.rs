use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::types::ItemEvent;

use super::{Notifier, NotifyError};

/// Create a bounded event queue. A capacity of zero is raised to one.
pub fn channel(capacity: usize) -> (QueueNotifier, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (QueueNotifier { tx }, EventReceiver { rx })
}

/// Publishing half of the queue. Publishing waits for free capacity and
/// fails once the receiving half has been dropped.
#[derive(Clone)]
pub struct QueueNotifier {
    tx: mpsc::Sender<ItemEvent>,
}

#[async_trait]
impl Notifier for QueueNotifier {
    async fn publish(&self, event: ItemEvent) -> Result<(), NotifyError> {
        let action = event.action();
        self.tx.send(event).await.map_err(|_| {
            tracing::warn!(action, "event queue closed before publish");
            NotifyError::Interrupted { action }
        })
    }
}

/// Consuming half of the queue.
pub struct EventReceiver {
    rx: mpsc::Receiver<ItemEvent>,
}

impl EventReceiver {
    /// Next event, or `None` once every publisher has been dropped and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<ItemEvent> {
        self.rx.recv().await
    }
}
