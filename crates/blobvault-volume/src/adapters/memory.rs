//! In-memory object store for unit tests.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::adapters::clock::SystemClock;
use crate::domain::errors::StoreError;
use crate::domain::markers::ObjectInfo;
use crate::domain::Timestamp;
use crate::ports::outbound::{Clock, ListEntry, ListPage, ObjectStore};

/// One object held by the in-memory double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub modified: Timestamp,
}

/// Deterministic in-memory object store.
///
/// Serves listings in lexicographic key order with real pagination (the
/// resume token is the last key of the previous page), and stamps writes
/// with its injected clock. Unlike the backends it stands in for, it is
/// immediately consistent; eventual-consistency races are exercised by
/// stubbing marker timestamps with [`put_at`](Self::put_at) instead.
pub struct InMemoryObjectStore<C: Clock = SystemClock> {
    objects: BTreeMap<String, StoredObject>,
    clock: C,
    calls: AtomicU64,
}

impl InMemoryObjectStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryObjectStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryObjectStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            objects: BTreeMap::new(),
            clock,
            calls: AtomicU64::new(0),
        }
    }

    /// Stub an object with an explicit modification time, bypassing the
    /// clock. Not counted as a primitive call.
    pub fn put_at(&mut self, key: &str, data: &[u8], modified: Timestamp) {
        self.objects.insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                modified,
            },
        );
    }

    pub fn object(&self, key: &str) -> Option<&StoredObject> {
        self.objects.get(key)
    }

    pub fn objects(&self) -> &BTreeMap<String, StoredObject> {
        &self.objects
    }

    /// Number of primitive calls served so far. Lets tests assert that an
    /// operation failed fast without contacting the store.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl<C: Clock> ObjectStore for InMemoryObjectStore<C> {
    fn put(&mut self, key: &str, data: &[u8], _content_type: &str) -> Result<(), StoreError> {
        self.tick();
        let modified = self.clock.now();
        self.objects.insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                modified,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.tick();
        Ok(self.objects.get(key).map(|obj| obj.data.clone()))
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.tick();
        self.objects.remove(key);
        Ok(())
    }

    fn head(&self, key: &str) -> Result<Option<ObjectInfo>, StoreError> {
        self.tick();
        Ok(self.objects.get(key).map(|obj| ObjectInfo {
            size: obj.data.len() as u64,
            modified: obj.modified,
        }))
    }

    fn list(
        &self,
        prefix: &str,
        token: Option<String>,
        limit: usize,
    ) -> Result<ListPage, StoreError> {
        self.tick();
        let limit = limit.max(1);
        let start = match token {
            Some(t) => Bound::Excluded(t),
            None => Bound::Included(prefix.to_string()),
        };
        let mut entries: Vec<ListEntry> = Vec::new();
        let mut next_token = None;
        for (key, obj) in self.objects.range((start, Bound::Unbounded)) {
            if !key.starts_with(prefix) {
                break;
            }
            if entries.len() == limit {
                next_token = entries.last().map(|entry| entry.key.clone());
                break;
            }
            entries.push(ListEntry {
                key: key.clone(),
                size: obj.data.len() as u64,
                modified: obj.modified,
            });
        }
        Ok(ListPage {
            entries,
            next_token,
        })
    }
}
