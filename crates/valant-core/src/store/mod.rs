//! Item storage abstraction.
//!
//! Defines the [`InventoryStore`] trait consumed by the inventory service and
//! provides an in-memory implementation ([`MemoryStore`]) with optional JSONL
//! persistence.

mod jsonl;
mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Item, NewItem};

/// Keyed item storage. Each call is atomic on its own; callers that check
/// and then act get no transaction spanning both calls.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All stored items, in store order.
    async fn find_all(&self) -> Result<Vec<Item>, CoreError>;

    /// Look up an item by label, ignoring case.
    async fn find_by_label_ignore_case(&self, label: &str) -> Result<Option<Item>, CoreError>;

    /// Persist a new item and return it with its assigned id. Fails with
    /// [`CoreError::LabelTaken`] when an item with the same label, ignoring
    /// case, is already stored.
    async fn save(&self, item: NewItem) -> Result<Item, CoreError>;

    /// Remove an item. Removing an item that is no longer stored is a no-op.
    async fn delete(&self, item: &Item) -> Result<(), CoreError>;
}
