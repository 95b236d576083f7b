//! # Domain Layer
//!
//! Pure logic with no I/O:
//!
//! - `locator` - content-derived block identifiers
//! - `markers` - the key layout encoding a block's three lifecycle facts
//! - `policy` - time-driven trash/reclamation decisions
//! - `config` - engine configuration
//! - `errors` - error taxonomy

pub mod config;
pub mod errors;
pub mod locator;
pub mod markers;
pub mod policy;

pub use config::{DeleteMode, VolumeConfig};
pub use errors::{StoreError, VolumeError};
pub use locator::Locator;
pub use markers::{BlockState, ObjectInfo};
pub use policy::{ReadFallback, SweepDecision, SweepReport, TrashDecision};

/// Unix timestamp in seconds since epoch.
pub type Timestamp = u64;
