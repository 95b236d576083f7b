//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How permanent deletes are performed during a trash sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteMode {
    /// Re-verify the data object is absent immediately before deleting a
    /// trash copy, so a concurrently restored block is never destroyed.
    Safe,
    /// Skip the pre-delete re-check for higher throughput. Only sound when
    /// the backend guarantees delete idempotence.
    Unsafe,
}

/// Configuration for the volume engine.
///
/// All durations are whole seconds. The three thresholds interact:
/// `signature_ttl` gates entry into the trash tier, `trash_lifetime` gates
/// exit from it, and `race_window` is the slack between paired marker
/// timestamps still attributable to clock skew and store propagation delay
/// rather than a real sequence of events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Minimum age of a block's recency marker before it may be trashed.
    /// Protects blocks still referenced by recently issued access grants.
    pub signature_ttl: u64,

    /// Minimum age a trash copy must reach before permanent deletion.
    /// Zero disables the trash tier entirely (see [`DeleteMode`]).
    pub trash_lifetime: u64,

    /// Maximum delta between a trash copy's and a recency marker's
    /// timestamps still treated as one event seen by skewed clocks.
    pub race_window: u64,

    /// Delete behavior during trash sweeps.
    pub delete_mode: DeleteMode,

    /// Page size used for prefix listings (index and sweep).
    pub index_page_size: usize,

    /// When set, every mutating operation fails fast with a permission
    /// error before contacting the store.
    pub read_only: bool,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            signature_ttl: 14 * 24 * 3600,
            trash_lifetime: 14 * 24 * 3600,
            race_window: 24 * 3600,
            delete_mode: DeleteMode::Safe,
            index_page_size: 1000,
            read_only: false,
        }
    }
}

impl VolumeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature_ttl(mut self, seconds: u64) -> Self {
        self.signature_ttl = seconds;
        self
    }

    pub fn with_trash_lifetime(mut self, seconds: u64) -> Self {
        self.trash_lifetime = seconds;
        self
    }

    pub fn with_race_window(mut self, seconds: u64) -> Self {
        self.race_window = seconds;
        self
    }

    pub fn with_delete_mode(mut self, mode: DeleteMode) -> Self {
        self.delete_mode = mode;
        self
    }

    pub fn with_index_page_size(mut self, size: usize) -> Self {
        self.index_page_size = size;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}
