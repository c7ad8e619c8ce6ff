//! Ordered validation chains gating the mutation endpoints.
//!
//! Each [`Validator`] inspects a [`Submission`] (request body plus the
//! `authorization` header) and either lets it through or rejects it with a
//! field-specific [`Error`]. A [`ValidationChain`] evaluates validators left to
//! right and stops at the first rejection; errors are never aggregated.
//!
//! Two bindings exist:
//! - [`ValidationChain::talker`]: authorization, name, age, talk, watchedAt,
//!   rate (create and update).
//! - [`ValidationChain::login`]: login credentials.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value, json};

use super::auth::SESSION_TOKEN_LENGTH;
use super::{Error, LoginCredentials, Talk, TalkerDraft};

const NAME_MIN_LEN: usize = 3;
const PASSWORD_MIN_LEN: usize = 6;
const LEGAL_AGE: i128 = 18;
const RATE_RANGE: std::ops::RangeInclusive<i128> = 1..=5;

pub(crate) const TALKER_NOT_FOUND: &str = "Pessoa palestrante não encontrada";

const TOKEN_NOT_FOUND: &str = "Token não encontrado";
const TOKEN_INVALID: &str = "Token inválido";
const EMAIL_FORMAT: &str = r#"O "email" deve ter o formato "email@email.com""#;
const PASSWORD_TOO_SHORT: &str = r#"O "password" deve ter pelo menos 6 caracteres"#;
const NAME_TOO_SHORT: &str = r#"O "name" deve ter pelo menos 3 caracteres"#;
const AGE_NOT_NUMBER: &str = r#"O campo "age" deve ser do tipo "number""#;
const AGE_NOT_INTEGER: &str = r#"O campo "age" deve ser um "number" do tipo inteiro"#;
const AGE_UNDERAGE: &str = "A pessoa palestrante deve ser maior de idade";
const WATCHED_AT_FORMAT: &str = r#"O campo "watchedAt" deve ter o formato "dd/mm/aaaa""#;
const RATE_RANGE_MESSAGE: &str = r#"O campo "rate" deve ser um número inteiro entre 1 e 5"#;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.[A-Za-z]{2,3})+$"));
static WATCHED_AT_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"));

/// Machine-readable rejection reasons placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCode {
    MissingField,
    NotAString,
    TooShort,
    InvalidFormat,
    NotANumber,
    NotAnInteger,
    Underage,
    OutOfRange,
    MissingToken,
    InvalidToken,
}

impl RejectionCode {
    /// Stable snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::NotAString => "not_a_string",
            Self::TooShort => "too_short",
            Self::InvalidFormat => "invalid_format",
            Self::NotANumber => "not_a_number",
            Self::NotAnInteger => "not_an_integer",
            Self::Underage => "underage",
            Self::OutOfRange => "out_of_range",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
        }
    }
}

fn rejection(field: &str, code: RejectionCode, message: impl Into<String>) -> Error {
    let error = match code {
        RejectionCode::MissingToken | RejectionCode::InvalidToken => Error::unauthorized(message),
        _ => Error::invalid_request(message),
    };
    error.with_details(json!({ "field": field, "code": code.as_str() }))
}

fn required(field: &str) -> Error {
    rejection(
        field,
        RejectionCode::MissingField,
        format!(r#"O campo "{field}" é obrigatório"#),
    )
}

fn not_a_string(field: &str) -> Error {
    rejection(
        field,
        RejectionCode::NotAString,
        format!(r#"O campo "{field}" deve ser do tipo "string""#),
    )
}

fn matches(pattern: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> Result<bool, Error> {
    match LazyLock::force(pattern) {
        Ok(regex) => Ok(regex.is_match(value)),
        Err(err) => {
            tracing::error!(error = %err, "validation pattern failed to compile");
            Err(Error::internal(format!("invalid validation pattern: {err}")))
        }
    }
}

/// Inbound payload seen by validators.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    authorization: Option<String>,
    body: Value,
}

impl Submission {
    /// Bundle the raw `authorization` header (if any) with the JSON body.
    pub fn new(authorization: Option<String>, body: Value) -> Self {
        Self {
            authorization,
            body,
        }
    }

    /// Body-only submission, as used by `POST /login`.
    pub fn from_body(body: Value) -> Self {
        Self::new(None, body)
    }

    /// Raw `authorization` header value.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// JSON request body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Top-level body field, treating `null` as absent.
    fn field(&self, key: &str) -> Option<&Value> {
        present(self.body.get(key))
    }

    /// Field nested under `talk`, treating `null` as absent.
    fn talk_field(&self, key: &str) -> Option<&Value> {
        present(self.field("talk").and_then(|talk| talk.get(key)))
    }

    /// Text field where an empty string also counts as absent.
    fn text_field(&self, key: &str) -> Option<&Value> {
        self.field(key).filter(|value| value.as_str() != Some(""))
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

/// Smallest integral float `integer_of` accepts (`i64::MIN`).
const FLOAT_INTEGER_MIN: f64 = -9_223_372_036_854_775_808.0;
/// Exclusive upper bound for integral floats (`u64::MAX + 1`).
const FLOAT_INTEGER_END: f64 = 18_446_744_073_709_551_616.0;

/// Exact integer value of a JSON number, accepting floats with no fractional
/// part. Values outside the `i64`/`u64` span yield `None`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "floats are checked integral and in range before the cast"
)]
fn integer_of(number: &Number) -> Option<i128> {
    if let Some(value) = number.as_i64() {
        return Some(i128::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(i128::from(value));
    }
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0)
        .filter(|value| (FLOAT_INTEGER_MIN..FLOAT_INTEGER_END).contains(value))
        .map(|value| value as i128)
}

/// A single short-circuiting check in a [`ValidationChain`].
pub trait Validator: Send + Sync {
    /// Return `Ok(())` to continue or the rejection to send back.
    fn check(&self, submission: &Submission) -> Result<(), Error>;
}

/// Email shape and password length for `POST /login`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoginCredentialsCheck;

impl Validator for LoginCredentialsCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let email = submission.text_field("email").ok_or_else(|| required("email"))?;
        let well_formed = match email.as_str() {
            Some(text) => matches(&EMAIL_PATTERN, text)?,
            None => false,
        };
        if !well_formed {
            return Err(rejection("email", RejectionCode::InvalidFormat, EMAIL_FORMAT));
        }

        let password = submission
            .text_field("password")
            .ok_or_else(|| required("password"))?;
        let password = password.as_str().ok_or_else(|| not_a_string("password"))?;
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(rejection(
                "password",
                RejectionCode::TooShort,
                PASSWORD_TOO_SHORT,
            ));
        }
        Ok(())
    }
}

/// Presence and length of the `authorization` header.
///
/// No cryptographic verification happens here: any 16-character value is
/// accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationTokenCheck;

impl Validator for AuthorizationTokenCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let token = submission
            .authorization()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                rejection("authorization", RejectionCode::MissingToken, TOKEN_NOT_FOUND)
            })?;
        if token.chars().count() != SESSION_TOKEN_LENGTH {
            return Err(rejection(
                "authorization",
                RejectionCode::InvalidToken,
                TOKEN_INVALID,
            ));
        }
        Ok(())
    }
}

/// `name`: present, text, at least three characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameCheck;

impl Validator for NameCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let name = submission.text_field("name").ok_or_else(|| required("name"))?;
        let name = name.as_str().ok_or_else(|| not_a_string("name"))?;
        if name.chars().count() < NAME_MIN_LEN {
            return Err(rejection("name", RejectionCode::TooShort, NAME_TOO_SHORT));
        }
        Ok(())
    }
}

/// `age`: present, numeric, integral, at least eighteen.
#[derive(Debug, Default, Clone, Copy)]
pub struct AgeCheck;

impl Validator for AgeCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let age = submission.field("age").ok_or_else(|| required("age"))?;
        let Value::Number(number) = age else {
            return Err(rejection("age", RejectionCode::NotANumber, AGE_NOT_NUMBER));
        };
        let age = integer_of(number)
            .ok_or_else(|| rejection("age", RejectionCode::NotAnInteger, AGE_NOT_INTEGER))?;
        if age < LEGAL_AGE {
            return Err(rejection("age", RejectionCode::Underage, AGE_UNDERAGE));
        }
        Ok(())
    }
}

/// `talk` must be present.
#[derive(Debug, Default, Clone, Copy)]
pub struct TalkPresenceCheck;

impl Validator for TalkPresenceCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        submission.field("talk").ok_or_else(|| required("talk"))?;
        Ok(())
    }
}

/// `talk.watchedAt`: present and shaped `dd/mm/yyyy`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WatchedAtCheck;

impl Validator for WatchedAtCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let watched_at = submission
            .talk_field("watchedAt")
            .filter(|value| value.as_str() != Some(""))
            .ok_or_else(|| required("watchedAt"))?;
        let well_formed = match watched_at.as_str() {
            Some(text) => matches(&WATCHED_AT_PATTERN, text)?,
            None => false,
        };
        if !well_formed {
            return Err(rejection(
                "watchedAt",
                RejectionCode::InvalidFormat,
                WATCHED_AT_FORMAT,
            ));
        }
        Ok(())
    }
}

/// `talk.rate`: key present (`0` and `null` count), integer in `1..=5`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RateCheck;

impl Validator for RateCheck {
    fn check(&self, submission: &Submission) -> Result<(), Error> {
        let rate = submission
            .field("talk")
            .and_then(|talk| talk.get("rate"))
            .ok_or_else(|| required("rate"))?;
        let in_range = match rate {
            Value::Number(number) => integer_of(number).is_some_and(|n| RATE_RANGE.contains(&n)),
            _ => false,
        };
        if !in_range {
            return Err(rejection("rate", RejectionCode::OutOfRange, RATE_RANGE_MESSAGE));
        }
        Ok(())
    }
}

/// Fixed-order sequence of validators; the first rejection wins.
///
/// # Examples
/// ```
/// use backend::domain::{Submission, ValidationChain};
/// use serde_json::json;
///
/// let submission = Submission::new(None, json!({ "name": "Ana" }));
/// let err = ValidationChain::talker().run(&submission).unwrap_err();
/// assert_eq!(err.message(), "Token não encontrado");
/// ```
#[derive(Default)]
pub struct ValidationChain {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationChain {
    /// Empty chain that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the end of the chain.
    #[must_use]
    pub fn then(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Chain bound to `POST /talker` and `PUT /talker/:id`.
    #[must_use]
    pub fn talker() -> Self {
        Self::new()
            .then(AuthorizationTokenCheck)
            .then(NameCheck)
            .then(AgeCheck)
            .then(TalkPresenceCheck)
            .then(WatchedAtCheck)
            .then(RateCheck)
    }

    /// Chain bound to `POST /login`.
    #[must_use]
    pub fn login() -> Self {
        Self::new().then(LoginCredentialsCheck)
    }

    /// Evaluate validators in order, stopping at the first rejection.
    pub fn run(&self, submission: &Submission) -> Result<(), Error> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.check(submission))
    }
}

/// Run the talker chain and extract the validated fields.
pub fn validate_talker_submission(submission: &Submission) -> Result<TalkerDraft, Error> {
    ValidationChain::talker().run(submission)?;
    TalkerDraft::try_from(submission)
}

/// Run the login chain and extract the credentials.
pub fn validate_login_submission(submission: &Submission) -> Result<LoginCredentials, Error> {
    ValidationChain::login().run(submission)?;
    LoginCredentials::try_from(submission)
}

fn shape_error(field: &str) -> Error {
    Error::internal(format!("validated payload lost field {field}"))
}

impl TryFrom<&Submission> for TalkerDraft {
    type Error = Error;

    fn try_from(submission: &Submission) -> Result<Self, Self::Error> {
        let name = submission
            .field("name")
            .and_then(Value::as_str)
            .ok_or_else(|| shape_error("name"))?;
        let age = submission
            .field("age")
            .and_then(Value::as_number)
            .and_then(integer_of)
            .and_then(|age| u64::try_from(age).ok())
            .ok_or_else(|| shape_error("age"))?;
        let watched_at = submission
            .talk_field("watchedAt")
            .and_then(Value::as_str)
            .ok_or_else(|| shape_error("watchedAt"))?;
        let rate = submission
            .talk_field("rate")
            .and_then(Value::as_number)
            .and_then(integer_of)
            .and_then(|rate| u8::try_from(rate).ok())
            .ok_or_else(|| shape_error("rate"))?;
        Ok(Self::new(name, age, Talk::new(watched_at, rate)))
    }
}

impl TryFrom<&Submission> for LoginCredentials {
    type Error = Error;

    fn try_from(submission: &Submission) -> Result<Self, Self::Error> {
        let email = submission
            .field("email")
            .and_then(Value::as_str)
            .ok_or_else(|| shape_error("email"))?;
        let password = submission
            .field("password")
            .and_then(Value::as_str)
            .ok_or_else(|| shape_error("password"))?;
        Ok(Self::new(email, password))
    }
}
