//! Registrar and index for the cinelog attribute store.
//!
//! The [`Registry`] owns the canonical in-memory maps (id to entity, name
//! to id), enforces name uniqueness, assigns strictly increasing ids, and
//! appends an event to the journal for every mutation. On startup it
//! rebuilds both maps by replaying the journal.
//!
//! The [`Catalog`] trait is the boundary consumed by thin front-ends that
//! embed the store; it carries no logic of its own.

pub mod error;
pub mod registry;
pub mod traits;

pub use error::RegistryError;
pub use registry::Registry;
pub use traits::Catalog;
