//! # Outbound Ports (Driven Ports)
//!
//! Capabilities the volume engine requires from its host: a remote object
//! store and a clock. The engine is generic over both, which is what makes
//! the deterministic in-memory double and fake clock possible.

use crate::domain::errors::StoreError;
use crate::domain::markers::ObjectInfo;
use crate::domain::Timestamp;

/// One key in a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub key: String,
    pub size: u64,
    pub modified: Timestamp,
}

/// One page of a prefix listing.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Entries in store-native (lexicographic key) order.
    pub entries: Vec<ListEntry>,
    /// Opaque resume token; `None` when the listing is complete.
    pub next_token: Option<String>,
}

/// Abstract interface to a remote key-value blob store.
///
/// All calls are blocking round-trips. The backend is assumed eventually
/// consistent: a `put` may not be visible to a subsequent `list` or `get`
/// from another caller, and a `delete` may lag likewise. The engine's
/// race-window and conflict checks exist to absorb exactly that.
pub trait ObjectStore: Send + Sync {
    /// Store `data` at `key`, overwriting any previous object and
    /// refreshing its modification time.
    fn put(&mut self, key: &str, data: &[u8], content_type: &str) -> Result<(), StoreError>;

    /// Fetch the bytes at `key`. `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Metadata for `key` without fetching the body. `None` when absent.
    fn head(&self, key: &str) -> Result<Option<ObjectInfo>, StoreError>;

    /// One key-ordered page of keys starting with `prefix`, resuming after
    /// `token`. At most `limit` entries per page.
    fn list(
        &self,
        prefix: &str,
        token: Option<String>,
        limit: usize,
    ) -> Result<ListPage, StoreError>;
}

/// Current-time source, substitutable for deterministic testing.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
