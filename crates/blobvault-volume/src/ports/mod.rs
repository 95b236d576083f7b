//! # Ports
//!
//! - `inbound` - the API this crate exposes to callers
//! - `outbound` - the capabilities it requires from the host

pub mod inbound;
pub mod outbound;

pub use inbound::{TrashApi, VolumeApi};
pub use outbound::{Clock, ListEntry, ListPage, ObjectStore};
