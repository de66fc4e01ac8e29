//! Shared test helpers for `valant-core` unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::notify::{Notifier, NotifyError};
use crate::types::{Item, ItemEvent, ItemId, NewItem};

// ==============================================================================
// Item Builders
// ==============================================================================

/// The canonical create payload used across tests, with the given label.
pub fn new_item(label: &str) -> NewItem {
    NewItem {
        label: label.to_string(),
        expiration: 234_567,
        item_type: "A".to_string(),
    }
}

pub fn stored_item(id: u64, label: &str) -> Item {
    Item::from_new(ItemId(id), new_item(label))
}

// ==============================================================================
// Notifier
// ==============================================================================

/// Records every publish attempt; when built with [`failing`](Self::failing)
/// each attempt is recorded and then rejected as interrupted.
pub struct RecordingNotifier {
    events: Mutex<Vec<ItemEvent>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<ItemEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, event: ItemEvent) -> Result<(), NotifyError> {
        let action = event.action();
        self.events.lock().expect("events lock").push(event);
        if self.fail {
            return Err(NotifyError::Interrupted { action });
        }
        Ok(())
    }
}
