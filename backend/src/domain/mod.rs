//! Domain primitives, validation and use-cases.
//!
//! Purpose: define the talker record model, the validation chains that gate
//! mutations, token derivation for login, and the record service that
//! applies mutations to the stored collection. Types here are transport
//! agnostic; inbound adapters translate requests into [`Submission`] values
//! and map [`Error`] back to responses.
//!
//! Public surface:
//! - [`Talker`], [`TalkerId`], [`Talk`], [`TalkerDraft`]: record model.
//! - [`ValidationChain`], [`Validator`], [`Submission`]: ordered checks.
//! - [`LoginCredentials`], [`SessionToken`], [`CipherTokenIssuer`]: login.
//! - [`TalkerService`]: record service implementing the talker ports.
//! - [`Error`], [`ErrorCode`], [`TraceId`]: failure taxonomy and correlation.

pub mod auth;
pub mod error;
pub mod ports;
pub mod talker;
pub mod talker_service;
pub mod token_issuer;
pub mod trace_id;
pub mod validation;

pub use self::auth::{LoginCredentials, SESSION_TOKEN_LENGTH, SessionToken, SessionTokenLengthError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::talker::{Talk, Talker, TalkerDraft, TalkerId, TalkerValidationError, next_talker_id};
pub use self::talker_service::TalkerService;
pub use self::token_issuer::{CipherTokenIssuer, DEFAULT_TOKEN_SECRET};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    AgeCheck, AuthorizationTokenCheck, LoginCredentialsCheck, NameCheck, RateCheck,
    RejectionCode, Submission, TalkPresenceCheck, ValidationChain, Validator, WatchedAtCheck,
    validate_login_submission, validate_talker_submission,
};
