//! Inventory operations: list, create-if-label-unused, delete-and-notify.
//!
//! The service is transport-free; it returns [`CreateOutcome`] and
//! [`InventoryError`] values that the HTTP layer maps to status codes in a
//! single place.

use std::sync::Arc;

use crate::error::CoreError;
use crate::notify::{Notifier, NotifyError};
use crate::store::InventoryStore;
use crate::types::{Item, ItemEvent, NewItem};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("could not find label '{0}'.")]
    LabelNotFound(String),

    /// The primary action already committed; only the notification failed.
    #[error("notification of '{action}' event failed.")]
    NotificationFailed {
        action: &'static str,
        #[source]
        source: NotifyError,
    },

    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Result of a create request. A duplicate label is a normal outcome, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The item was stored under a newly assigned id.
    Created(Item),
    /// An item with the same label (ignoring case) already exists; nothing
    /// was stored. Carries the existing item.
    Duplicate(Item),
}

impl CreateOutcome {
    pub fn item(&self) -> &Item {
        match self {
            Self::Created(item) | Self::Duplicate(item) => item,
        }
    }
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    notifier: Arc<dyn Notifier>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub async fn list(&self) -> Result<Vec<Item>, InventoryError> {
        Ok(self.store.find_all().await?)
    }

    /// A label taken between the lookup and the save is refused by the store
    /// and reported as a duplicate too.
    pub async fn create(&self, input: NewItem) -> Result<CreateOutcome, InventoryError> {
        if let Some(existing) = self.store.find_by_label_ignore_case(&input.label).await? {
            return Ok(ignore_duplicate(&input.label, existing));
        }

        let label = input.label.clone();
        match self.store.save(input).await {
            Ok(created) => {
                tracing::info!(
                    id = %created.id,
                    label = %created.label,
                    expiration = created.expiration,
                    item_type = %created.item_type,
                    "added item"
                );
                Ok(CreateOutcome::Created(created))
            }
            Err(CoreError::LabelTaken { existing }) => Ok(ignore_duplicate(&label, *existing)),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete the item with the given label and publish a removal event.
    ///
    /// A [`InventoryError::NotificationFailed`] result means the item has
    /// already been deleted; the removal is not rolled back.
    pub async fn delete(&self, label: &str) -> Result<Item, InventoryError> {
        let item = self
            .store
            .find_by_label_ignore_case(label)
            .await?
            .ok_or_else(|| InventoryError::LabelNotFound(label.to_string()))?;

        self.store.delete(&item).await?;
        tracing::info!(id = %item.id, label = %item.label, "deleted item");

        let event = ItemEvent::Removed(item.clone());
        let action = event.action();
        if let Err(source) = self.notifier.publish(event).await {
            tracing::warn!(id = %item.id, error = %source, "removal notification failed");
            return Err(InventoryError::NotificationFailed { action, source });
        }

        Ok(item)
    }
}

fn ignore_duplicate(label: &str, existing: Item) -> CreateOutcome {
    tracing::info!(
        label = %label,
        existing_id = %existing.id,
        "item already exists, ignored"
    );
    CreateOutcome::Duplicate(existing)
}
