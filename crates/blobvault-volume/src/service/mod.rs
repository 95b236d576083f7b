//! # Volume Service
//!
//! The engine implementing [`VolumeApi`](crate::ports::inbound::VolumeApi)
//! and [`TrashApi`](crate::ports::inbound::TrashApi) against any
//! [`ObjectStore`] + [`Clock`] pair.
//!
//! The service is stateless between calls: every durable fact lives in the
//! remote store, and coordination between concurrent engine instances is
//! achieved purely through the marker-timestamp policy in
//! [`domain::policy`](crate::domain::policy).

mod helpers;
mod index;
mod trash;
mod volume;


use crate::domain::config::VolumeConfig;
use crate::ports::outbound::{Clock, ObjectStore};

/// Content type stamped on every object the engine writes.
pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// The volume engine.
pub struct VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    /// Remote object store holding all durable state.
    pub(crate) store: S,
    /// Time source; injected so tests run on a frozen clock.
    pub(crate) clock: C,
    /// Lifecycle thresholds and flags.
    pub(crate) config: VolumeConfig,
}

impl<S, C> VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, config: VolumeConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    /// The underlying store, for diagnostics and tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
