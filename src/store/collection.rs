use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{KeyValueStore, StoreError};

/// Record stored in a collection, addressable by its generated id.
pub trait StoredRecord {
    fn record_id(&self) -> &str;
}

/// Typed window over one collection blob.
///
/// Every append is a full read-parse-push-serialize-write cycle. Lookups are
/// full-collection scans; there are no secondary indices.
pub struct Collection<T, S> {
    store: Arc<S>,
    key: &'static str,
    _record: PhantomData<T>,
}

impl<T, S> Clone for Collection<T, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _record: PhantomData,
        }
    }
}

impl<T, S> Collection<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    pub fn new(store: Arc<S>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// All records in insertion order.
    ///
    /// A blob that fails to parse reads as an empty collection instead of a
    /// fatal condition; the discarded payload is reported through tracing.
    pub fn list_all(&self) -> Result<Vec<T>, StoreError> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(key = self.key, %err, "discarding malformed collection blob");
                Ok(Vec::new())
            }
        }
    }

    pub fn append(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.list_all()?;
        records.push(record);
        let raw = serde_json::to_string(&records).map_err(|source| StoreError::Serialize {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, raw)
    }

    pub fn find_by<P>(&self, predicate: P) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    pub fn find_first<P>(&self, predicate: P) -> Result<Option<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.list_all()?.into_iter().find(|record| predicate(record)))
    }
}

impl<T, S> Collection<T, S>
where
    T: Serialize + DeserializeOwned + StoredRecord,
    S: KeyValueStore,
{
    pub fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.find_first(|record| record.record_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        label: String,
    }

    impl StoredRecord for Entry {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn entry(id: &str, label: &str) -> Entry {
        Entry {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn collection() -> (Arc<MemoryStore>, Collection<Entry, MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let collection = Collection::new(store.clone(), "entries");
        (store, collection)
    }

    #[test]
    fn append_then_list_returns_record_unchanged() {
        let (_, collection) = collection();
        let record = entry("e-1", "first");

        collection.append(record.clone()).expect("append");

        let all = collection.list_all().expect("list");
        assert_eq!(all.last(), Some(&record));
    }

    #[test]
    fn appends_preserve_insertion_order() {
        let (_, collection) = collection();
        collection.append(entry("e-1", "first")).expect("append");
        collection.append(entry("e-2", "second")).expect("append");

        let all = collection.list_all().expect("list");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "e-1");
        assert_eq!(all[1].id, "e-2");
    }

    #[test]
    fn find_by_id_locates_appended_record() {
        let (_, collection) = collection();
        collection.append(entry("e-1", "first")).expect("append");
        collection.append(entry("e-2", "second")).expect("append");

        let found = collection.find_by_id("e-2").expect("find");
        assert_eq!(found, Some(entry("e-2", "second")));
        assert_eq!(collection.find_by_id("e-9").expect("find"), None);
    }

    #[test]
    fn malformed_blob_reads_as_empty() {
        let (store, collection) = collection();
        store
            .set("entries", "{not json".to_string())
            .expect("seed raw blob");

        assert!(collection.list_all().expect("list").is_empty());

        // The next append replaces the unreadable blob entirely.
        collection.append(entry("e-1", "first")).expect("append");
        assert_eq!(collection.list_all().expect("list").len(), 1);
    }

    #[test]
    fn append_notifies_store_subscribers() {
        let (store, collection) = collection();
        let mut changes = store.subscribe();

        collection.append(entry("e-1", "first")).expect("append");

        let change = changes.try_recv().expect("change delivered");
        assert_eq!(change.key, "entries");
    }

    #[test]
    fn find_by_filters_with_predicate() {
        let (_, collection) = collection();
        collection.append(entry("e-1", "keep")).expect("append");
        collection.append(entry("e-2", "drop")).expect("append");
        collection.append(entry("e-3", "keep")).expect("append");

        let kept = collection.find_by(|record| record.label == "keep").expect("find");
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].id, "e-3");
    }
}
