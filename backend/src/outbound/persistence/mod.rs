//! Filesystem persistence for the talker document.
//!
//! The store is a single JSON array of talker records, read and rewritten
//! wholesale. Writes go through a temp-file + rename so readers never observe
//! a partially written document.

mod atomic_io;
mod json_talker_repository;

pub use json_talker_repository::{JsonFileTalkerRepository, StoreOpenError};
