use crate::types::{Item, ItemId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("item parse error at line {line}: {message}")]
    ItemParse { line: usize, message: String },

    #[error("duplicate label at line {line}: {label}")]
    DuplicateLabel { line: usize, label: String },

    #[error("label '{}' is already used by item {}", .existing.label, .existing.id)]
    LabelTaken { existing: Box<Item> },

    #[error("duplicate item id at line {line}: {id}")]
    DuplicateId { line: usize, id: ItemId },

    #[error("item serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
