//! Shared plumbing between the volume and trash operation sets.

use super::*;
use crate::domain::errors::VolumeError;
use crate::domain::locator::Locator;
use crate::domain::markers::{self, BlockState};

impl<S, C> VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    pub(crate) fn require_writable(&self) -> Result<(), VolumeError> {
        if self.config.read_only {
            Err(VolumeError::PermissionDenied)
        } else {
            Ok(())
        }
    }

    /// HEAD all three keys for `locator`.
    pub(crate) fn probe(&self, locator: &Locator) -> Result<BlockState, VolumeError> {
        Ok(BlockState {
            data: self.store.head(&markers::data_key(locator))?,
            recent: self.store.head(&markers::recent_key(locator))?,
            trash: self.store.head(&markers::trash_key(locator))?,
        })
    }

    /// Zero-length write that refreshes the recency marker to now.
    pub(crate) fn write_recent_marker(&mut self, locator: &Locator) -> Result<(), VolumeError> {
        self.store
            .put(&markers::recent_key(locator), b"", OCTET_STREAM)?;
        Ok(())
    }

    /// Read the trash copy and verify it still hashes to `locator`.
    ///
    /// `None` when no copy exists. A copy that no longer matches its
    /// locator is surfaced as `Corrupt`, never served or restored.
    pub(crate) fn read_trash_copy(&self, locator: &Locator) -> Result<Option<Vec<u8>>, VolumeError> {
        let Some(bytes) = self.store.get(&markers::trash_key(locator))? else {
            return Ok(None);
        };
        if !locator.matches(&bytes) {
            return Err(VolumeError::Corrupt {
                locator: locator.clone(),
                detail: "trash copy does not hash to its locator".to_string(),
            });
        }
        Ok(Some(bytes))
    }

    /// Restore the data object from its trash copy, leaving the copy in
    /// place. Returns `false` when no copy exists.
    pub(crate) fn restore_from_trash(&mut self, locator: &Locator) -> Result<bool, VolumeError> {
        let Some(bytes) = self.read_trash_copy(locator)? else {
            return Ok(false);
        };
        self.store
            .put(&markers::data_key(locator), &bytes, OCTET_STREAM)?;
        Ok(true)
    }
}
