//! Integration flows exercising the volume engine end to end on the
//! in-memory store double with a shared fake clock.

pub mod lifecycle;
pub mod races;

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use blobvault_volume::{
    DeleteMode, FakeClock, InMemoryObjectStore, VolumeConfig, VolumeService,
};

#[cfg(test)]
pub(crate) const HOUR: u64 = 3600;

#[cfg(test)]
pub(crate) const MINUTE: u64 = 60;

#[cfg(test)]
pub(crate) const T0: u64 = 1_700_000_000;

#[cfg(test)]
pub(crate) type TestVolume = VolumeService<InMemoryObjectStore<Arc<FakeClock>>, Arc<FakeClock>>;

/// One-hour TTL and lifetime with a five-minute race window: tight enough
/// that every threshold is crossed within a test, long enough to keep the
/// arithmetic readable.
#[cfg(test)]
pub(crate) fn test_config() -> VolumeConfig {
    VolumeConfig::new()
        .with_signature_ttl(HOUR)
        .with_trash_lifetime(HOUR)
        .with_race_window(5 * MINUTE)
        .with_delete_mode(DeleteMode::Unsafe)
}

#[cfg(test)]
pub(crate) fn make_volume(config: VolumeConfig) -> (TestVolume, Arc<FakeClock>) {
    init_tracing();
    let clock = Arc::new(FakeClock::at(T0));
    let store = InMemoryObjectStore::with_clock(clock.clone());
    (VolumeService::new(store, clock.clone(), config), clock)
}

/// Opt-in log capture: `RUST_LOG=blobvault_volume=debug cargo test ...`.
#[cfg(test)]
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
