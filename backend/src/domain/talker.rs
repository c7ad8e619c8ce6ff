//! Talker records: speaker profiles with a nested talk rating.
//!
//! The serialised shape is shared by the HTTP surface and the JSON document
//! store:
//!
//! ```json
//! { "id": 1, "name": "Henrique Albuquerque", "age": 62,
//!   "talk": { "watchedAt": "23/10/2020", "rate": 5 } }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised while constructing talker primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TalkerValidationError {
    /// Identifiers start at one.
    #[error("talker id must be a positive integer")]
    NonPositiveId,
    /// The identifier text did not parse as an integer.
    #[error("talker id must be numeric: {0}")]
    NonNumericId(String),
}

/// Service-assigned talker identifier.
///
/// ## Invariants
/// - Always `>= 1`.
///
/// # Examples
/// ```
/// use backend::domain::TalkerId;
///
/// let id: TalkerId = "7".parse().expect("numeric id");
/// assert_eq!(id.next().map(TalkerId::get), Some(8));
/// assert!("0".parse::<TalkerId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TalkerId(u64);

impl TalkerId {
    /// Identifier handed to the first record of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Validate and wrap a raw identifier.
    pub fn new(raw: u64) -> Result<Self, TalkerValidationError> {
        if raw == 0 {
            return Err(TalkerValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier directly after this one, or `None` once the id space
    /// is exhausted.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl TryFrom<u64> for TalkerId {
    type Error = TalkerValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TalkerId> for u64 {
    fn from(value: TalkerId) -> Self {
        value.0
    }
}

impl FromStr for TalkerId {
    type Err = TalkerValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<u64>()
            .map_err(|_| TalkerValidationError::NonNumericId(s.to_owned()))?;
        Self::new(raw)
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A watched talk and the rating the speaker received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    watched_at: String,
    rate: u8,
}

impl Talk {
    /// Assemble a talk from already validated parts.
    pub(crate) fn new(watched_at: impl Into<String>, rate: u8) -> Self {
        Self {
            watched_at: watched_at.into(),
            rate,
        }
    }

    /// Date the talk was watched, `dd/mm/yyyy`.
    pub fn watched_at(&self) -> &str {
        self.watched_at.as_str()
    }

    /// Rating in `1..=5`.
    pub fn rate(&self) -> u8 {
        self.rate
    }
}

/// Client-submitted talker fields that passed the validation chain.
///
/// Drafts never carry an id; the record service assigns one on create and
/// takes it from the path on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkerDraft {
    name: String,
    age: u64,
    talk: Talk,
}

impl TalkerDraft {
    pub(crate) fn new(name: impl Into<String>, age: u64, talk: Talk) -> Self {
        Self {
            name: name.into(),
            age,
            talk,
        }
    }

    /// Submitted display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Submitted age in years.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Submitted talk.
    pub fn talk(&self) -> &Talk {
        &self.talk
    }
}

/// A persisted talker record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talker {
    id: TalkerId,
    name: String,
    age: u64,
    talk: Talk,
}

impl Talker {
    /// Materialise a draft under the given identifier.
    #[must_use]
    pub fn from_draft(id: TalkerId, draft: TalkerDraft) -> Self {
        let TalkerDraft { name, age, talk } = draft;
        Self {
            id,
            name,
            age,
            talk,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> TalkerId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Age in years.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Talk details.
    pub fn talk(&self) -> &Talk {
        &self.talk
    }
}

/// Identifier the next created record receives: `max(existing) + 1`, or
/// [`TalkerId::FIRST`] for an empty collection. `None` when the largest
/// stored id is `u64::MAX`.
#[must_use]
pub fn next_talker_id(talkers: &[Talker]) -> Option<TalkerId> {
    talkers
        .iter()
        .map(Talker::id)
        .max()
        .map_or(Some(TalkerId::FIRST), TalkerId::next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn talker(id: u64) -> Talker {
        Talker::from_draft(
            TalkerId::new(id).expect("positive id"),
            TalkerDraft::new("Ana Maria", 20, Talk::new("24/05/2021", 5)),
        )
    }

    #[rstest]
    #[case(&[], 1)]
    #[case(&[1], 2)]
    #[case(&[3, 1, 2], 4)]
    #[case(&[9, 4], 10)]
    fn next_id_is_max_plus_one(#[case] ids: &[u64], #[case] expected: u64) {
        let talkers: Vec<Talker> = ids.iter().copied().map(talker).collect();
        assert_eq!(next_talker_id(&talkers).map(TalkerId::get), Some(expected));
    }

    #[rstest]
    #[case(&[u64::MAX])]
    #[case(&[3, u64::MAX, 1])]
    fn next_id_is_none_when_id_space_is_exhausted(#[case] ids: &[u64]) {
        let talkers: Vec<Talker> = ids.iter().copied().map(talker).collect();
        assert_eq!(next_talker_id(&talkers), None);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("")]
    fn rejects_invalid_path_ids(#[case] raw: &str) {
        assert!(raw.parse::<TalkerId>().is_err());
    }

    #[rstest]
    fn serialises_with_camel_case_talk() {
        let value = serde_json::to_value(talker(2)).expect("serialise talker");
        assert_eq!(
            value,
            json!({
                "id": 2,
                "name": "Ana Maria",
                "age": 20,
                "talk": { "watchedAt": "24/05/2021", "rate": 5 }
            })
        );
    }

    #[rstest]
    fn deserialisation_rejects_zero_id() {
        let payload = json!({
            "id": 0,
            "name": "Ana Maria",
            "age": 20,
            "talk": { "watchedAt": "24/05/2021", "rate": 5 }
        });
        assert!(serde_json::from_value::<Talker>(payload).is_err());
    }
}
