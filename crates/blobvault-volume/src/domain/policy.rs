//! # Lifecycle Policy
//!
//! Time-driven trash and reclamation decisions, as pure functions of
//! `(now, marker state, config)`. No I/O happens here, so the complete
//! decision table is testable without a store.
//!
//! The engine coordinates concurrent writers purely through these marker
//! timestamps; there are no locks anywhere. Every branch therefore errs
//! toward retention: a block must never become unreadable and unrecoverable
//! because a write lost a race against a trash pass.

use serde::{Deserialize, Serialize};

use crate::domain::config::{DeleteMode, VolumeConfig};
use crate::domain::markers::BlockState;
use crate::domain::Timestamp;

/// Outcome of a trash request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashDecision {
    /// Data object absent.
    NotFound,
    /// The block is protected; report success without changing anything.
    /// Either there is no recency marker (the block may predate the marker
    /// scheme, or be mid-write) or the marker is younger than the
    /// signature TTL.
    Protected,
    /// Trash tier disabled (zero lifetime) and direct deletion not allowed.
    Disabled,
    /// Trash tier disabled; delete the data object outright.
    DeleteNow,
    /// A trash copy already exists. Re-trashing would reset its age and
    /// could mask a concurrent restore.
    Conflict,
    /// Copy the data object to the trash key, then delete it.
    MoveToTrash,
}

/// Decide what a trash request may do to a block in `state`.
pub fn decide_trash(now: Timestamp, state: &BlockState, config: &VolumeConfig) -> TrashDecision {
    if !state.data_exists() {
        return TrashDecision::NotFound;
    }
    let age = match state.recent_mtime() {
        None => return TrashDecision::Protected,
        Some(mtime) => now.saturating_sub(mtime),
    };
    if age < config.signature_ttl {
        return TrashDecision::Protected;
    }
    if config.trash_lifetime == 0 {
        return match config.delete_mode {
            DeleteMode::Unsafe => TrashDecision::DeleteNow,
            DeleteMode::Safe => TrashDecision::Disabled,
        };
    }
    if state.trash_mtime().is_some() {
        return TrashDecision::Conflict;
    }
    TrashDecision::MoveToTrash
}

/// Outcome for one trash copy during a reclamation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDecision {
    /// Younger than the trash lifetime; not eligible yet.
    Skip,
    /// No paired recency marker; protected indefinitely.
    Hold,
    /// Marker timestamps within the race window: the trash copy is the
    /// fallout of a write racing a trash pass. Restore the data object.
    Rescue,
    /// Permanently delete the trash copy.
    Reclaim,
}

/// Decide the fate of a trash copy last modified at `trash_mtime`.
pub fn decide_sweep(
    now: Timestamp,
    trash_mtime: Timestamp,
    recent_mtime: Option<Timestamp>,
    config: &VolumeConfig,
) -> SweepDecision {
    if now.saturating_sub(trash_mtime) < config.trash_lifetime {
        return SweepDecision::Skip;
    }
    let Some(recent) = recent_mtime else {
        return SweepDecision::Hold;
    };
    if trash_mtime.abs_diff(recent) < config.race_window {
        SweepDecision::Rescue
    } else {
        SweepDecision::Reclaim
    }
}

/// Whether a missing data object may be served from its trash copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFallback {
    /// Serve the trash copy: the markers say the trash operation raced a
    /// concurrent write or touch, so the block is presumed still wanted.
    Rescue,
    /// The deletion looks deliberate and settled; report the block missing.
    Missing,
}

/// Decide whether a read may fall back to the trash copy.
pub fn decide_read_fallback(
    trash_mtime: Timestamp,
    recent_mtime: Option<Timestamp>,
    config: &VolumeConfig,
) -> ReadFallback {
    match recent_mtime {
        Some(recent) if trash_mtime.abs_diff(recent) < config.race_window => ReadFallback::Rescue,
        _ => ReadFallback::Missing,
    }
}

/// Totals from one reclamation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Trash copies enumerated.
    pub blocks_in_trash: u64,
    /// Bytes held in trash copies enumerated.
    pub bytes_in_trash: u64,
    /// Trash copies permanently deleted.
    pub blocks_reclaimed: u64,
    /// Bytes released by permanent deletion.
    pub bytes_reclaimed: u64,
    /// Data objects restored from trash copies.
    pub blocks_rescued: u64,
    /// Entries skipped after a backend error.
    pub entry_errors: u64,
}
