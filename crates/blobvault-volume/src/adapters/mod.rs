//! # Adapters
//!
//! Concrete implementations of the outbound ports:
//!
//! - `clock` - system clock, plus a settable fake for deterministic tests
//! - `memory` - in-memory object store double with key-ordered listing

pub mod clock;
pub mod memory;

pub use clock::{FakeClock, SystemClock};
pub use memory::{InMemoryObjectStore, StoredObject};
