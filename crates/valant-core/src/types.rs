//! Inventory item model and the events published about it.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Item Identity
// ==============================================================================

/// Store-assigned item identifier. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==============================================================================
// Items
// ==============================================================================

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub expiration: i64,
    #[serde(rename = "type")]
    pub item_type: String,
}

impl Item {
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            label: new.label,
            expiration: new.expiration,
            item_type: new.item_type,
        }
    }
}

/// Create payload. Clients may send an `id`; it is ignored because the
/// store assigns identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub label: String,
    pub expiration: i64,
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Normalized form of a label used for case-insensitive lookups.
pub fn label_key(label: &str) -> String {
    label.to_lowercase()
}

// ==============================================================================
// Events
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Removed(Item),
}

impl ItemEvent {
    /// Human-readable action name, used in notification failure messages.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Removed(_) => "item removed",
        }
    }

    pub fn item(&self) -> &Item {
        match self {
            Self::Removed(item) => item,
        }
    }
}
