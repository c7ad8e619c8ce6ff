//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`TalkersQuery`], [`TalkersCommand`], [`LoginService`]) are
//! what inbound adapters call. Driven ports ([`TalkerRepository`],
//! [`TokenIssuer`]) are what the domain needs from infrastructure. Driven
//! ports expose strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

mod macros;
mod login_service;
mod talker_repository;
mod talkers_command;
mod talkers_query;
mod token_issuer;

pub(crate) use macros::define_port_error;

pub use login_service::{LoginService, TokenLoginService};
pub use talker_repository::{InMemoryTalkerRepository, TalkerPersistenceError, TalkerRepository};
pub use talkers_command::TalkersCommand;
pub use talkers_query::TalkersQuery;
pub use token_issuer::TokenIssuer;
