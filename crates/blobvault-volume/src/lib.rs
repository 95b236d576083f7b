//! # BlobVault Volume Engine
//!
//! Content-addressed block storage over a remote, eventually-consistent
//! object store, with crash- and race-tolerant lifecycle management: write,
//! read, soft-delete ("trash"), restore ("untrash"), and permanent
//! reclamation ("empty trash").
//!
//! ## How a block lives in the store
//!
//! ```text
//! <locator>          the bytes            exists  => block readable
//! recent/<locator>   zero-length marker   mtime   => last write/touch
//! trash/<locator>    full copy            mtime   => when it was trashed
//! ```
//!
//! The backend offers no compare-and-swap and no transactional rename, so
//! concurrent writers, trash passes, and sweeps coordinate through nothing
//! but these marker timestamps and three configured thresholds
//! (signature TTL, trash lifetime, race window).
//!
//! ## Retention Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Copy before delete | Data object removed only after its trash copy is confirmed written |
//! | 2 | Signature TTL | Recency marker younger than the TTL (or missing) makes Trash a no-op |
//! | 3 | Conflict refusal | Trash never overwrites an existing trash copy |
//! | 4 | Race rescue | Marker timestamps within the race window: reads fall back to the trash copy, sweeps restore instead of delete |
//! | 5 | Trash lifetime | A trash copy is never reclaimed before it ages past the lifetime |
//! | 6 | Read-only fail-fast | Mutating calls on a read-only volume fail before any store call |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - pure logic (locators, marker protocol, lifecycle policy)
//! - `ports/` - port traits (inbound API, outbound SPI)
//! - `adapters/` - system clock, fake clock, in-memory store double
//! - `service/` - the engine implementing the API over the SPI
//!
//! ## Usage
//!
//! ```ignore
//! use blobvault_volume::{
//!     Locator, SystemClock, TrashApi, VolumeApi, VolumeConfig, VolumeService,
//! };
//!
//! let store = connect_bucket()?; // any ObjectStore implementation
//! let mut volume = VolumeService::new(store, SystemClock, VolumeConfig::default());
//!
//! let data = b"hello".to_vec();
//! let locator = Locator::from_content(&data);
//! volume.put(&locator, &data)?;
//! assert_eq!(volume.get(&locator)?, data);
//!
//! volume.trash(&locator)?;       // protected or copied aside, never lost
//! volume.untrash(&locator)?;     // back to live
//! let report = volume.empty_trash()?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FakeClock, InMemoryObjectStore, SystemClock};
pub use domain::config::{DeleteMode, VolumeConfig};
pub use domain::errors::{StoreError, VolumeError};
pub use domain::locator::Locator;
pub use domain::markers::{BlockState, ObjectInfo};
pub use domain::policy::{ReadFallback, SweepDecision, SweepReport, TrashDecision};
pub use domain::Timestamp;
pub use ports::inbound::{TrashApi, VolumeApi};
pub use ports::outbound::{Clock, ListEntry, ListPage, ObjectStore};
pub use service::VolumeService;
