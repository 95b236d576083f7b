//! # Domain Errors
//!
//! Error taxonomy for the volume engine. Each variant maps to one failure
//! mode a caller can act on; transient backend failures are the caller's to
//! retry.

use thiserror::Error;

use crate::domain::locator::Locator;

/// Errors surfaced by volume operations.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The block (or the marker an operation needs) is absent.
    #[error("block not found: {0}")]
    NotFound(Locator),

    /// Trash requested for a block whose trash marker already exists.
    /// Re-trashing would reset the marker's age and could mask a concurrent
    /// restore.
    #[error("block {0} is already in trash")]
    Conflict(Locator),

    /// Mutating call on a read-only volume. Raised before any store call.
    #[error("volume is read-only")]
    PermissionDenied,

    /// Transient store failure; the operation may succeed if retried.
    #[error("object store unavailable: {message}")]
    Unavailable { message: String },

    /// Marker/data inconsistency that must not be silently swallowed.
    #[error("inconsistent state for block {locator}: {detail}")]
    Corrupt { locator: Locator, detail: String },

    /// The string is not a well-formed locator.
    #[error("invalid locator {0:?}")]
    InvalidLocator(String),

    /// A write whose payload does not hash to the locator it was given.
    #[error("data does not hash to locator {expected} (got {actual})")]
    LocatorMismatch { expected: Locator, actual: Locator },

    /// Trash lifetime is zero but unsafe direct deletion is not enabled.
    #[error("trash is disabled: trash lifetime is zero and unsafe delete is off")]
    TrashDisabled,

    /// The caller-supplied index sink failed.
    #[error("index sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by an object store adapter.
///
/// Not-found is not an error at this layer; the primitives report absence as
/// `None` so the engine can treat a missing marker as a fact, not a failure.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connectivity or availability failure.
    #[error("object store unavailable: {message}")]
    Unavailable { message: String },

    /// The store answered, but the response could not be interpreted.
    #[error("object store returned a malformed response: {message}")]
    Protocol { message: String },
}

impl From<StoreError> for VolumeError {
    fn from(err: StoreError) -> Self {
        VolumeError::Unavailable {
            message: err.to_string(),
        }
    }
}
