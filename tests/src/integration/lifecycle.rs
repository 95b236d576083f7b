//! # Lifecycle Flows
//!
//! Multi-operation sequences through the whole engine: write, read, touch,
//! trash, restore, sweep. Each test tells one story on a frozen clock that
//! only moves when the story says so.

#[cfg(test)]
use blobvault_volume::domain::markers;
#[cfg(test)]
use blobvault_volume::{Locator, SweepReport, TrashApi, VolumeApi, VolumeError};

#[cfg(test)]
use super::{make_volume, test_config, HOUR, MINUTE, T0};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_lifecycle_to_reclamation() {
        let (mut volume, clock) = make_volume(test_config());
        let block = b"a block with one life".to_vec();
        let locator = Locator::from_content(&block);

        volume.put(&locator, &block).unwrap();
        assert_eq!(volume.get(&locator).unwrap(), block);

        // Old enough to trash once the signature TTL has passed.
        clock.advance(2 * HOUR);
        volume.trash(&locator).unwrap();
        assert!(matches!(
            volume.get(&locator),
            Err(VolumeError::NotFound(_))
        ));

        // Past the trash lifetime the sweep reclaims it for good, including
        // the now-orphaned recency marker.
        clock.advance(2 * HOUR);
        let report = volume.empty_trash().unwrap();
        assert_eq!(report.blocks_reclaimed, 1);
        assert!(volume.store().objects().is_empty());
        assert!(matches!(
            volume.get(&locator),
            Err(VolumeError::NotFound(_))
        ));
        assert!(matches!(
            volume.untrash(&locator),
            Err(VolumeError::NotFound(_))
        ));
    }

    #[test]
    fn test_untrash_reprotects_then_conflicts() {
        let (mut volume, clock) = make_volume(test_config());
        let block = b"back from the dead".to_vec();
        let locator = Locator::from_content(&block);

        volume.put(&locator, &block).unwrap();
        clock.advance(2 * HOUR);
        volume.trash(&locator).unwrap();
        volume.untrash(&locator).unwrap();
        assert_eq!(volume.get(&locator).unwrap(), block);

        // Immediately after restoration the refreshed recency marker makes
        // another trash request a harmless no-op.
        volume.trash(&locator).unwrap();
        assert_eq!(volume.get(&locator).unwrap(), block);

        // Once the TTL passes again, the leftover trash copy from the first
        // pass turns the request into a conflict instead; the block itself
        // stays untouched.
        clock.advance(2 * HOUR);
        assert!(matches!(
            volume.trash(&locator),
            Err(VolumeError::Conflict(_))
        ));
        assert_eq!(volume.get(&locator).unwrap(), block);
    }

    #[test]
    fn test_touched_block_survives_repeated_sweeps() {
        let (mut volume, clock) = make_volume(test_config());
        let block = b"still in use".to_vec();
        let locator = Locator::from_content(&block);
        volume.put(&locator, &block).unwrap();

        // A client keeps touching the block every half hour while a GC
        // worker keeps trying to trash and sweep. The signature TTL shields
        // it the whole time.
        for _ in 0..6 {
            clock.advance(30 * MINUTE);
            volume.touch(&locator).unwrap();
            volume.trash(&locator).unwrap();
            volume.empty_trash().unwrap();
            assert_eq!(volume.get(&locator).unwrap(), block);
        }
        assert!(volume
            .store()
            .object(&markers::trash_key(&locator))
            .is_none());
    }

    #[test]
    fn test_index_lists_live_blocks_only() {
        let (mut volume, clock) = make_volume(test_config());
        let blocks: Vec<Vec<u8>> = (0..3).map(|i| format!("indexed-{i}").into_bytes()).collect();
        let locators: Vec<Locator> = blocks.iter().map(|b| Locator::from_content(b)).collect();
        for (locator, block) in locators.iter().zip(&blocks) {
            volume.put(locator, block).unwrap();
        }

        clock.advance(2 * HOUR);
        volume.trash(&locators[1]).unwrap();

        let mut buf = Vec::new();
        volume.index_to("", &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains(locators[1].as_str()));
        for locator in [&locators[0], &locators[2]] {
            let line = text
                .lines()
                .find(|line| line.starts_with(locator.as_str()))
                .unwrap();
            let rest = line.strip_prefix(locator.as_str()).unwrap();
            let (size, stamp) = rest[1..].split_once(' ').unwrap();
            assert_eq!(size.parse::<usize>().unwrap(), blocks[0].len());
            // Last-touch time is the put time, before the clock advanced.
            assert_eq!(stamp.parse::<u64>().unwrap(), T0);
        }
    }

    #[test]
    fn test_sweep_report_round_trips_through_json() {
        let (mut volume, clock) = make_volume(test_config());
        let block = b"reportable".to_vec();
        let locator = Locator::from_content(&block);
        volume.put(&locator, &block).unwrap();
        clock.advance(2 * HOUR);
        volume.trash(&locator).unwrap();
        clock.advance(2 * HOUR);

        let report = volume.empty_trash().unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"blocks_reclaimed\":1"));
        let parsed: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_random_payloads_roundtrip_and_index() {
        use rand::Rng;

        let (mut volume, _clock) = make_volume(test_config());
        let mut rng = rand::thread_rng();
        let mut stored = Vec::new();
        for _ in 0..32 {
            let size = rng.gen_range(1..2048);
            let mut block = vec![0u8; size];
            rng.fill(&mut block[..]);
            let locator = Locator::from_content(&block);
            volume.put(&locator, &block).unwrap();
            stored.push((locator, block));
        }

        for (locator, block) in &stored {
            assert_eq!(&volume.get(locator).unwrap(), block);
        }

        let mut buf = Vec::new();
        volume.index_to("", &mut buf).unwrap();
        let unique: std::collections::BTreeSet<_> =
            stored.iter().map(|(locator, _)| locator.as_str()).collect();
        assert_eq!(
            String::from_utf8(buf).unwrap().lines().count(),
            unique.len()
        );
    }
}
