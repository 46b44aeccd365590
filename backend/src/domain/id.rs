//! Opaque entity identifier shared by all storage adapters.
//!
//! The storage backends do not agree on an id representation: the in-memory
//! and MySQL adapters hand out auto-incrementing integers while MongoDB
//! assigns ObjectId values. [`EntityId`] papers over that drift at the port
//! boundary: it is an opaque non-empty string that each adapter converts
//! internally. JSON payloads may carry either a bare integer or a string;
//! serialisation always emits the canonical string form.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by [`EntityId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// The identifier was empty.
    #[error("entity id must not be empty")]
    Empty,
    /// The identifier carried surrounding whitespace.
    #[error("entity id must not contain surrounding whitespace")]
    Padded,
}

/// Opaque identifier for users, games, and bookings.
///
/// ## Invariants
/// - non-empty
/// - no leading or trailing whitespace
///
/// # Examples
/// ```
/// use arena_backend::domain::EntityId;
///
/// let id = EntityId::from_i64(7);
/// assert_eq!(id.as_str(), "7");
/// assert_eq!(id.as_i64(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "EntityIdDto", into = "String")]
#[schema(value_type = String, example = "1")]
pub struct EntityId(String);

impl EntityId {
    /// Validate and construct an identifier from owned or borrowed input.
    pub fn new(id: impl Into<String>) -> Result<Self, EntityIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EntityIdError::Empty);
        }
        if id.trim() != id {
            return Err(EntityIdError::Padded);
        }
        Ok(Self(id))
    }

    /// Construct an identifier from a numeric backend key.
    #[must_use]
    pub fn from_i64(id: i64) -> Self {
        Self(id.to_string())
    }

    /// Borrow the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret the identifier as a numeric backend key.
    ///
    /// Returns `None` when the id is not decimal, which adapters treat as
    /// "no such record" rather than an error.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wire representation accepting both legacy integer ids and string ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntityIdDto {
    Number(i64),
    Text(String),
}

impl TryFrom<EntityIdDto> for EntityId {
    type Error = EntityIdError;

    fn try_from(value: EntityIdDto) -> Result<Self, Self::Error> {
        match value {
            EntityIdDto::Number(id) => Ok(Self::from_i64(id)),
            EntityIdDto::Text(id) => Self::new(id),
        }
    }
}
