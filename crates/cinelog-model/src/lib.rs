//! Foundation model for the cinelog attribute store.
//!
//! This crate provides the in-memory data model shared by every other
//! cinelog crate: video entities, their typed attributes, and the merge
//! algebra that governs how attribute updates combine.
//!
//! # Key Types
//!
//! - [`Video`] — A catalog entity holding a kind-keyed attribute map
//! - [`Attribute`] — Closed set of typed attribute values with per-kind
//!   merge, filter-match, and log-serialization behavior
//! - [`AttributeKind`] — Discriminator used as the attribute map key
//! - [`UpdateMode`] — Add / Remove / RemoveAll merge selector
//! - [`Episode`] — Nested series structure carried by the Series attribute
//! - [`IdGenerator`] — Strictly monotonic wall-clock-seeded id source

pub mod attribute;
pub mod episode;
pub mod id;
pub mod kind;
pub mod video;

pub use attribute::{Attribute, AttributeKind, UpdateMode};
pub use episode::Episode;
pub use id::{IdGenerator, VideoId};
pub use kind::VideoKind;
pub use video::Video;
