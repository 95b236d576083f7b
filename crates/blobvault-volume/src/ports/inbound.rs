//! # Inbound Ports (Driving Ports)
//!
//! The public API of the volume engine. Split in two: everyday block I/O
//! (`VolumeApi`) and the trash lifecycle (`TrashApi`). Implementations must
//! uphold the retention invariants documented on each operation.

use std::io::Write;

use crate::domain::errors::VolumeError;
use crate::domain::locator::Locator;
use crate::domain::policy::SweepReport;
use crate::domain::Timestamp;

/// Block read/write operations.
pub trait VolumeApi {
    /// Store a block. Writes the data object first, then the recency
    /// marker, so a crash in between leaves a readable, trash-protected
    /// block. Idempotent.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: volume is read-only (no store call made)
    /// - `LocatorMismatch`: `data` does not hash to `locator`
    fn put(&mut self, locator: &Locator, data: &[u8]) -> Result<(), VolumeError>;

    /// Read a block.
    ///
    /// A missing data object is not necessarily a missing block: when the
    /// trash copy and recency marker timestamps are within the race window,
    /// the trash operation is presumed to have raced a concurrent write and
    /// the bytes are served from the trash copy instead.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no data object and no rescuable trash copy
    /// - `Corrupt`: stored bytes no longer hash to `locator`
    fn get(&self, locator: &Locator) -> Result<Vec<u8>, VolumeError>;

    /// Refresh the block's recency marker to now, signalling continued
    /// relevance. The data object itself is not rewritten. A block whose
    /// data object was trashed within the race window is restored first.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: volume is read-only (no store call made)
    /// - `NotFound`: no data object and no rescuable trash copy
    fn touch(&mut self, locator: &Locator) -> Result<(), VolumeError>;

    /// Last-use time of the block: the recency marker's modification time,
    /// or the data object's own when no marker exists.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: data object absent
    fn mtime(&self, locator: &Locator) -> Result<Timestamp, VolumeError>;

    /// Write one `<locator>+<size> <timestamp>\n` record to `sink` for every
    /// live block whose locator starts with `prefix`, in store order.
    ///
    /// Each record reports the block's last-touch time when a recency
    /// marker exists, else the data object's own modification time. Every
    /// record is newline-terminated, so a reader splitting on newlines sees
    /// one trailing empty record as end-of-stream. Pagination is internal;
    /// page boundaries never omit or duplicate entries.
    fn index_to(&self, prefix: &str, sink: &mut dyn Write) -> Result<(), VolumeError>;
}

/// Trash lifecycle operations.
///
/// All three are idempotent under retry: repeating a successful call is a
/// no-op or re-confirms the same end state.
pub trait TrashApi {
    /// Soft-delete a block: copy its bytes to the trash key, then delete
    /// the data object. The data object is never deleted before the trash
    /// copy is confirmed written.
    ///
    /// Protected blocks (no recency marker, or one younger than the
    /// signature TTL) are left untouched and the call reports success.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: volume is read-only (no store call made)
    /// - `NotFound`: data object absent
    /// - `Conflict`: a trash copy already exists
    /// - `TrashDisabled`: trash lifetime is zero and unsafe delete is off
    fn trash(&mut self, locator: &Locator) -> Result<(), VolumeError>;

    /// Restore a trashed block: copy the trash bytes back to the data key
    /// and refresh the recency marker. Permitted at any trash-copy age.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: volume is read-only (no store call made)
    /// - `NotFound`: no trash copy exists
    /// - `Corrupt`: trash copy unreadable or no longer hashing to `locator`
    fn untrash(&mut self, locator: &Locator) -> Result<(), VolumeError>;

    /// Sweep every trash copy: reclaim the ones whose lifetime has passed
    /// and whose markers describe a settled deletion, restore the ones that
    /// look like lost write races, and leave the rest alone.
    ///
    /// Safe to run repeatedly and concurrently with trash/untrash on other
    /// locators; each entry's fate depends only on its own two markers.
    /// Per-entry backend failures are logged, counted, and skipped.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: volume is read-only (no store call made)
    /// - `Unavailable`: the trash listing itself failed
    fn empty_trash(&mut self) -> Result<SweepReport, VolumeError>;
}
