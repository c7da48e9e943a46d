//! Trait definitions shared across CollabTrack crates.

pub mod object_store;

pub use object_store::ObjectStore;
