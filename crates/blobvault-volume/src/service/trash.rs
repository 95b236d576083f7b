//! Trash lifecycle: trash, untrash, and the reclamation sweep.

use tracing::{debug, info, warn};

use super::*;
use crate::domain::config::DeleteMode;
use crate::domain::errors::VolumeError;
use crate::domain::locator::Locator;
use crate::domain::markers::{self, TRASH_PREFIX};
use crate::domain::policy::{self, SweepDecision, SweepReport, TrashDecision};
use crate::domain::Timestamp;
use crate::ports::inbound::TrashApi;
use crate::ports::outbound::ListEntry;

impl<S, C> TrashApi for VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    fn trash(&mut self, locator: &Locator) -> Result<(), VolumeError> {
        self.require_writable()?;
        let now = self.clock.now();
        let state = self.probe(locator)?;
        match policy::decide_trash(now, &state, &self.config) {
            TrashDecision::NotFound => Err(VolumeError::NotFound(locator.clone())),
            TrashDecision::Protected => {
                debug!(%locator, "trash request ignored, block is protected");
                Ok(())
            }
            TrashDecision::Disabled => Err(VolumeError::TrashDisabled),
            TrashDecision::DeleteNow => {
                self.store.delete(&markers::data_key(locator))?;
                info!(%locator, "deleted block outright, trash tier disabled");
                Ok(())
            }
            TrashDecision::Conflict => Err(VolumeError::Conflict(locator.clone())),
            TrashDecision::MoveToTrash => {
                let Some(bytes) = self.store.get(&markers::data_key(locator))? else {
                    // Deleted between the HEAD and the GET.
                    return Err(VolumeError::NotFound(locator.clone()));
                };
                // The data object must stay readable until its trash copy
                // is confirmed written.
                self.store
                    .put(&markers::trash_key(locator), &bytes, OCTET_STREAM)?;
                self.store.delete(&markers::data_key(locator))?;
                info!(%locator, size = bytes.len(), "moved block to trash");
                Ok(())
            }
        }
    }

    fn untrash(&mut self, locator: &Locator) -> Result<(), VolumeError> {
        self.require_writable()?;
        if self.store.head(&markers::trash_key(locator))?.is_none() {
            return Err(VolumeError::NotFound(locator.clone()));
        }
        if !self.restore_from_trash(locator)? {
            // The HEAD saw a trash copy the GET could not read back.
            return Err(VolumeError::Corrupt {
                locator: locator.clone(),
                detail: "trash copy present but unreadable".to_string(),
            });
        }
        self.write_recent_marker(locator)?;
        info!(%locator, "restored block from trash");
        Ok(())
    }

    fn empty_trash(&mut self) -> Result<SweepReport, VolumeError> {
        self.require_writable()?;
        let now = self.clock.now();
        let mut report = SweepReport::default();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .store
                .list(TRASH_PREFIX, token, self.config.index_page_size)?;
            for entry in &page.entries {
                let Some(locator) = markers::locator_from_trash_key(&entry.key) else {
                    continue;
                };
                report.blocks_in_trash += 1;
                report.bytes_in_trash += entry.size;
                if let Err(err) = self.sweep_entry(now, &locator, entry, &mut report) {
                    warn!(%locator, %err, "skipping trash entry after backend error");
                    report.entry_errors += 1;
                }
            }
            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        info!(
            reclaimed_blocks = report.blocks_reclaimed,
            reclaimed_bytes = report.bytes_reclaimed,
            rescued_blocks = report.blocks_rescued,
            remaining_blocks = report.blocks_in_trash - report.blocks_reclaimed,
            remaining_bytes = report.bytes_in_trash - report.bytes_reclaimed,
            "trash sweep finished"
        );
        Ok(report)
    }
}

impl<S, C> VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    /// Apply the sweep policy to one trash copy.
    fn sweep_entry(
        &mut self,
        now: Timestamp,
        locator: &Locator,
        entry: &ListEntry,
        report: &mut SweepReport,
    ) -> Result<(), VolumeError> {
        let recent = self.store.head(&markers::recent_key(locator))?;
        let decision = policy::decide_sweep(
            now,
            entry.modified,
            recent.map(|info| info.modified),
            &self.config,
        );
        match decision {
            SweepDecision::Skip => {}
            SweepDecision::Hold => {
                // Known gap carried over from the marker scheme: trash with
                // no paired recency marker is never reclaimed.
                warn!(%locator, "trash copy has no recency marker, leaving it in place");
            }
            SweepDecision::Rescue => {
                if self.store.head(&markers::data_key(locator))?.is_none() {
                    self.restore_from_trash(locator)?;
                    info!(%locator, "trash copy looks like a lost write race, restored data object");
                    report.blocks_rescued += 1;
                }
            }
            SweepDecision::Reclaim => {
                if self.config.delete_mode == DeleteMode::Safe
                    && self.store.head(&markers::data_key(locator))?.is_some()
                {
                    debug!(%locator, "block was restored since this sweep began, keeping its trash copy");
                    return Ok(());
                }
                self.store.delete(&markers::trash_key(locator))?;
                report.blocks_reclaimed += 1;
                report.bytes_reclaimed += entry.size;
                // A recency marker with neither data nor trash left is noise.
                if self.store.head(&markers::data_key(locator))?.is_none() {
                    self.store.delete(&markers::recent_key(locator))?;
                }
            }
        }
        Ok(())
    }
}
