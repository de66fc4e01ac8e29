pub mod error;
pub mod notify;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_util;

pub use error::CoreError;
pub use service::{CreateOutcome, InventoryError, InventoryService};
pub use types::{Item, ItemEvent, ItemId, NewItem};
