//! `MemoryStore`, the in-process [`InventoryStore`].
//!
//! Items live in a map ordered by id, with a lowercased-label index for
//! case-insensitive lookups. When opened with a data file, the file is
//! loaded at startup and rewritten after every mutation; a failed write
//! rolls the mutation back so memory and disk stay in step.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::{label_key, Item, ItemId, NewItem};

use super::jsonl::{export_items_to_jsonl, parse_jsonl_items};
use super::InventoryStore;

#[derive(Default)]
struct Items {
    by_id: BTreeMap<ItemId, Item>,
    by_label: HashMap<String, ItemId>,
    next_id: u64,
}

impl Items {
    fn insert(&mut self, item: Item) {
        self.next_id = self.next_id.max(item.id.0 + 1);
        self.by_label.insert(label_key(&item.label), item.id);
        self.by_id.insert(item.id, item);
    }

    fn remove(&mut self, id: ItemId) -> Option<Item> {
        let item = self.by_id.remove(&id)?;
        self.by_label.remove(&label_key(&item.label));
        Some(item)
    }
}

pub struct MemoryStore {
    items: RwLock<Items>,
    source_path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty, in-memory only store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Items {
                next_id: 1,
                ..Items::default()
            }),
            source_path: None,
        }
    }

    /// Open a store backed by a JSONL data file. A missing file is treated
    /// as empty and created on the first mutation.
    pub fn with_persistence(path: &Path) -> Result<Self, CoreError> {
        let mut items = Items {
            next_id: 1,
            ..Items::default()
        };

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            for (line, item) in parse_jsonl_items(&content)? {
                if items.by_id.contains_key(&item.id) {
                    return Err(CoreError::DuplicateId { line, id: item.id });
                }
                if items.by_label.contains_key(&label_key(&item.label)) {
                    return Err(CoreError::DuplicateLabel {
                        line,
                        label: item.label,
                    });
                }
                items.insert(item);
            }
        }

        Ok(Self {
            items: RwLock::new(items),
            source_path: Some(path.to_path_buf()),
        })
    }

    fn flush(&self, items: &Items) -> Result<(), CoreError> {
        let Some(path) = &self.source_path else {
            return Ok(());
        };

        let content = export_items_to_jsonl(items.by_id.values())?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Item>, CoreError> {
        Ok(self.items.read().await.by_id.values().cloned().collect())
    }

    async fn find_by_label_ignore_case(&self, label: &str) -> Result<Option<Item>, CoreError> {
        let items = self.items.read().await;
        Ok(items
            .by_label
            .get(&label_key(label))
            .and_then(|id| items.by_id.get(id))
            .cloned())
    }

    async fn save(&self, item: NewItem) -> Result<Item, CoreError> {
        let mut items = self.items.write().await;
        if let Some(existing) = items
            .by_label
            .get(&label_key(&item.label))
            .and_then(|id| items.by_id.get(id))
        {
            return Err(CoreError::LabelTaken {
                existing: Box::new(existing.clone()),
            });
        }

        let id = ItemId(items.next_id);
        let saved = Item::from_new(id, item);
        let previous_next_id = items.next_id;
        items.insert(saved.clone());

        if let Err(err) = self.flush(&items) {
            items.remove(id);
            items.next_id = previous_next_id;
            return Err(err);
        }
        Ok(saved)
    }

    async fn delete(&self, item: &Item) -> Result<(), CoreError> {
        let mut items = self.items.write().await;
        let Some(removed) = items.remove(item.id) else {
            return Ok(());
        };

        if let Err(err) = self.flush(&items) {
            items.insert(removed);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::new_item;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(store.find_all().await.expect("find_all").is_empty());
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids_and_lists_in_id_order() {
        let store = MemoryStore::new();
        let a = store.save(new_item("a")).await.expect("save a");
        let b = store.save(new_item("b")).await.expect("save b");
        assert_eq!(a.id, ItemId(1));
        assert_eq!(b.id, ItemId(2));

        let labels: Vec<_> = store
            .find_all()
            .await
            .expect("find_all")
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn label_lookup_ignores_case() {
        let store = MemoryStore::new();
        let saved = store.save(new_item("Widget")).await.expect("save");

        let found = store
            .find_by_label_ignore_case("wIDGET")
            .await
            .expect("lookup")
            .expect("item should be found");
        assert_eq!(found, saved);
        assert!(store
            .find_by_label_ignore_case("gadget")
            .await
            .expect("lookup")
            .is_none());
    }

    #[tokio::test]
    async fn save_refuses_label_already_stored_in_other_case() {
        let store = MemoryStore::new();
        let first = store.save(new_item("xyz")).await.expect("save xyz");

        let err = store
            .save(new_item("XYZ"))
            .await
            .expect_err("same label in other case must be refused");
        assert!(matches!(err, CoreError::LabelTaken { ref existing } if **existing == first));

        assert_eq!(store.find_all().await.expect("find_all"), vec![first]);
        let next = store.save(new_item("abc")).await.expect("save abc");
        assert_eq!(next.id, ItemId(2));
    }

    #[tokio::test]
    async fn delete_removes_item_and_label_index() {
        let store = MemoryStore::new();
        let saved = store.save(new_item("a")).await.expect("save");
        store.delete(&saved).await.expect("delete");

        assert!(store.find_all().await.expect("find_all").is_empty());
        assert!(store
            .find_by_label_ignore_case("a")
            .await
            .expect("lookup")
            .is_none());

        // Deleting again is a no-op.
        store.delete(&saved).await.expect("second delete");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.save(new_item("a")).await.expect("save a");
        let b = store.save(new_item("b")).await.expect("save b");
        store.delete(&b).await.expect("delete b");
        let c = store.save(new_item("c")).await.expect("save c");
        assert_eq!(a.id, ItemId(1));
        assert_eq!(c.id, ItemId(3));
    }

    // -- persistence ----------------------------------------------------------

    #[tokio::test]
    async fn persisted_items_survive_reopen_and_ids_continue() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("data").join("items.jsonl");

        {
            let store = MemoryStore::with_persistence(&path).expect("open empty");
            store.save(new_item("a")).await.expect("save a");
            let b = store.save(new_item("b")).await.expect("save b");
            store.save(new_item("c")).await.expect("save c");
            store.delete(&b).await.expect("delete b");
        }

        let reopened = MemoryStore::with_persistence(&path).expect("reopen");
        let labels: Vec<_> = reopened
            .find_all()
            .await
            .expect("find_all")
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, vec!["a", "c"]);

        let d = reopened.save(new_item("d")).await.expect("save d");
        assert_eq!(d.id, ItemId(4));
        assert!(reopened
            .find_by_label_ignore_case("C")
            .await
            .expect("lookup")
            .is_some());
    }

    #[test]
    fn missing_data_file_opens_empty_without_creating_it() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("items.jsonl");
        MemoryStore::with_persistence(&path).expect("open");
        assert!(!path.exists());
    }

    #[test]
    fn duplicate_label_in_data_file_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("items.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"id":1,"label":"Box","expiration":1,"type":"A"}"#,
                "\n",
                r#"{"id":2,"label":"box","expiration":2,"type":"A"}"#,
                "\n",
            ),
        )
        .expect("write fixture");

        let result = MemoryStore::with_persistence(&path);
        assert!(matches!(
            result,
            Err(CoreError::DuplicateLabel { line: 2, .. })
        ));
    }

    #[test]
    fn duplicate_id_in_data_file_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("items.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"id":5,"label":"a","expiration":1,"type":"A"}"#,
                "\n",
                r#"{"id":5,"label":"b","expiration":2,"type":"A"}"#,
                "\n",
            ),
        )
        .expect("write fixture");

        let result = MemoryStore::with_persistence(&path);
        assert!(matches!(
            result,
            Err(CoreError::DuplicateId {
                line: 2,
                id: ItemId(5)
            })
        ));
    }

    #[tokio::test]
    async fn failed_flush_rolls_back_save() {
        let dir = tempfile::tempdir().expect("temp dir");
        // A directory at the data file path makes every write fail.
        let path = dir.path().join("items.jsonl");
        std::fs::create_dir(&path).expect("create blocking dir");

        let store = MemoryStore {
            items: RwLock::new(Items {
                next_id: 1,
                ..Items::default()
            }),
            source_path: Some(path),
        };

        assert!(matches!(
            store.save(new_item("a")).await,
            Err(CoreError::Io(_))
        ));
        assert!(store.find_all().await.expect("find_all").is_empty());
        assert!(store
            .find_by_label_ignore_case("a")
            .await
            .expect("lookup")
            .is_none());
    }
}
