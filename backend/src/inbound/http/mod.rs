//! HTTP inbound adapter exposing the talker REST endpoints.

pub mod error;
pub mod health;
pub mod index;
pub mod login;
pub mod schemas;
pub mod state;
pub mod submission;
pub mod talkers;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
