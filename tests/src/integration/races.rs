//! # Race Reconstructions
//!
//! The store double is immediately consistent, so the races themselves are
//! reconstructed by stubbing the marker timestamps two skewed workers would
//! have left behind, then asserting the engine repairs or refuses exactly
//! as the timestamps demand.

#[cfg(test)]
use blobvault_volume::domain::markers;
#[cfg(test)]
use blobvault_volume::{Locator, TrashApi, VolumeApi, VolumeError};

#[cfg(test)]
use super::{make_volume, test_config, HOUR, MINUTE, T0};

#[cfg(test)]
mod tests {
    use super::*;

    /// A write refreshed the recency marker moments before a trash pass on
    /// another host deleted the data object. The near-identical marker
    /// timestamps are the only evidence left.
    #[test]
    fn test_write_that_lost_a_trash_race_stays_readable() {
        let (mut volume, _clock) = make_volume(test_config());
        let block = b"wanted, then trashed".to_vec();
        let locator = Locator::from_content(&block);
        let store = volume.store_mut();
        store.put_at(&markers::recent_key(&locator), b"", T0 - 30 * MINUTE);
        store.put_at(&markers::trash_key(&locator), &block, T0 - 29 * MINUTE);

        // Reads fall back to the trash copy without mutating anything.
        assert_eq!(volume.get(&locator).unwrap(), block);
        assert!(volume
            .store()
            .object(&markers::data_key(&locator))
            .is_none());

        // A touch repairs the damage for good.
        volume.touch(&locator).unwrap();
        assert!(volume
            .store()
            .object(&markers::data_key(&locator))
            .is_some());
        assert_eq!(volume.get(&locator).unwrap(), block);
    }

    /// The same race discovered late: past the trash lifetime the sweep
    /// must restore the block rather than reclaim it, and running the sweep
    /// again must change nothing.
    #[test]
    fn test_sweep_rescues_raced_block_past_lifetime() {
        let (mut volume, _clock) = make_volume(test_config());
        let block = b"almost lost".to_vec();
        let locator = Locator::from_content(&block);
        let store = volume.store_mut();
        store.put_at(&markers::recent_key(&locator), b"", T0 - 90 * MINUTE);
        store.put_at(&markers::trash_key(&locator), &block, T0 - 89 * MINUTE);

        let report = volume.empty_trash().unwrap();
        assert_eq!(report.blocks_rescued, 1);
        assert_eq!(report.blocks_reclaimed, 0);
        assert_eq!(volume.get(&locator).unwrap(), block);
        assert!(volume
            .store()
            .object(&markers::trash_key(&locator))
            .is_some());

        let snapshot = volume.store().objects().clone();
        let report = volume.empty_trash().unwrap();
        assert_eq!(report.blocks_rescued, 0);
        assert_eq!(volume.store().objects(), &snapshot);
    }

    /// Marker timestamps hours apart describe a deliberate, settled
    /// deletion; nothing rescues it.
    #[test]
    fn test_settled_deletion_is_reclaimed() {
        let (mut volume, _clock) = make_volume(test_config());
        let block = b"gone for real".to_vec();
        let locator = Locator::from_content(&block);
        let store = volume.store_mut();
        store.put_at(&markers::recent_key(&locator), b"", T0 - 12 * HOUR);
        store.put_at(&markers::trash_key(&locator), &block, T0 - 2 * HOUR);

        assert!(matches!(
            volume.get(&locator),
            Err(VolumeError::NotFound(_))
        ));
        let report = volume.empty_trash().unwrap();
        assert_eq!(report.blocks_reclaimed, 1);
        assert!(volume.store().objects().is_empty());
    }

    /// A trash operation that copied the bytes aside but died before
    /// deleting the data object leaves both keys behind. The block stays
    /// readable throughout, and the stale copy eventually sweeps away.
    #[test]
    fn test_interrupted_trash_leaves_block_readable() {
        let (mut volume, _clock) = make_volume(test_config());
        let block = b"half trashed".to_vec();
        let locator = Locator::from_content(&block);
        let store = volume.store_mut();
        store.put_at(&markers::data_key(&locator), &block, T0 - 24 * HOUR);
        store.put_at(&markers::recent_key(&locator), b"", T0 - 24 * HOUR);
        store.put_at(&markers::trash_key(&locator), &block, T0 - 12 * HOUR);

        assert_eq!(volume.get(&locator).unwrap(), block);
        // Re-trashing must refuse rather than reset the stale copy's age.
        let before = volume.store().objects().clone();
        assert!(matches!(
            volume.trash(&locator),
            Err(VolumeError::Conflict(_))
        ));
        assert_eq!(volume.store().objects(), &before);

        // The sweep clears the leftover copy; the live block is untouched.
        volume.empty_trash().unwrap();
        assert!(volume
            .store()
            .object(&markers::trash_key(&locator))
            .is_none());
        assert_eq!(volume.get(&locator).unwrap(), block);
        // Its recency marker survives because the data object still exists.
        assert!(volume
            .store()
            .object(&markers::recent_key(&locator))
            .is_some());
    }

    /// Two trash passes interleaving on the same block: the second sees the
    /// first one's copy and backs off, whatever its timing.
    #[test]
    fn test_concurrent_trash_passes_conflict() {
        let (mut volume, clock) = make_volume(test_config());
        let block = b"contended".to_vec();
        let locator = Locator::from_content(&block);
        volume.put(&locator, &block).unwrap();

        clock.advance(2 * HOUR);
        volume.trash(&locator).unwrap();
        // The first pass just moved the block; a second pass right behind
        // it finds no data object at all.
        assert!(matches!(
            volume.trash(&locator),
            Err(VolumeError::NotFound(_))
        ));

        // If the block comes back (untrash) while the copy still exists,
        // later passes conflict instead.
        volume.untrash(&locator).unwrap();
        clock.advance(2 * HOUR);
        assert!(matches!(
            volume.trash(&locator),
            Err(VolumeError::Conflict(_))
        ));
    }
}
