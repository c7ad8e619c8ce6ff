//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the talker document on the local filesystem.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod persistence;
