//! # Marker Protocol
//!
//! The convention by which a block's three lifecycle facts are encoded as
//! object-store keys and modification times:
//!
//! ```text
//! <locator>            data object     exists  => block is readable
//! recent/<locator>     recency marker  mtime   => last write or touch
//! trash/<locator>      trash copy      mtime   => when the block was trashed
//! ```
//!
//! The recency marker is zero-length: rewriting a small marker is cheap on a
//! remote store, while updating the modification time of a large data object
//! is not. The trash key holds a full copy of the bytes so restoration stays
//! possible after the data object is gone.
//!
//! Pure mapping logic only; no policy, retries, or I/O.

use crate::domain::locator::Locator;
use crate::domain::Timestamp;

/// Key prefix for recency markers.
pub const RECENT_PREFIX: &str = "recent/";

/// Key prefix for trash copies.
pub const TRASH_PREFIX: &str = "trash/";

/// Key of the data object.
pub fn data_key(locator: &Locator) -> String {
    locator.as_str().to_string()
}

/// Key of the recency marker.
pub fn recent_key(locator: &Locator) -> String {
    format!("{RECENT_PREFIX}{locator}")
}

/// Key of the trash copy.
pub fn trash_key(locator: &Locator) -> String {
    format!("{TRASH_PREFIX}{locator}")
}

/// Extract the locator from a `trash/` key.
///
/// Returns `None` for keys that are not well-formed trash copies; a shared
/// bucket may contain foreign keys under the same prefix.
pub fn locator_from_trash_key(key: &str) -> Option<Locator> {
    key.strip_prefix(TRASH_PREFIX)
        .and_then(|suffix| Locator::parse(suffix).ok())
}

/// Existence plus modification metadata extracted from a HEAD response.
///
/// Store-specific not-found conditions collapse to `Option::None` at the
/// port boundary, so absence is a single signal everywhere above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: Timestamp,
}

/// The three facts the store currently records about one block.
#[derive(Debug, Clone, Default)]
pub struct BlockState {
    pub data: Option<ObjectInfo>,
    pub recent: Option<ObjectInfo>,
    pub trash: Option<ObjectInfo>,
}

impl BlockState {
    /// A block is live iff its data object exists, regardless of any
    /// coexisting trash copy.
    pub fn data_exists(&self) -> bool {
        self.data.is_some()
    }

    pub fn recent_mtime(&self) -> Option<Timestamp> {
        self.recent.map(|info| info.modified)
    }

    pub fn trash_mtime(&self) -> Option<Timestamp> {
        self.trash.map(|info| info.modified)
    }
}
