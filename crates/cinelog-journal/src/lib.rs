//! Append-only event journal for the cinelog attribute store.
//!
//! The journal is the sole durable representation of the catalog; the
//! in-memory entity map is a cache rebuilt from it. This crate provides:
//! - `JournalEvent` with the single-line text codec (encode/decode)
//! - `Journal`, the append-only UTF-8 log file
//! - `replay`, the deterministic fold of a journal into an entity map
//!
//! Decoding is deliberately lenient: malformed or unrecognized lines are
//! skipped, never fatal, so old readers survive log formats that grow new
//! event and attribute kinds.

pub mod error;
pub mod event;
pub mod journal;
pub mod replay;

pub use error::JournalError;
pub use event::JournalEvent;
pub use journal::Journal;
pub use replay::replay;
