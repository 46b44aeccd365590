//! Storage port: the contract every persistence backend must honour.
//!
//! Exactly one implementation is active per process, selected by
//! configuration at startup. Absence of a record is expressed as `None`,
//! never as an error; callers decide whether absence is a failure.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Booking, EntityId, Game, NewBooking, NewGame, NewUser, User};

/// Failures raised by storage adapters.
///
/// Validation happens before the port is reached, so the taxonomy here is
/// limited to state clashes, query failures, and transport loss.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The write clashes with existing state (duplicate username).
    #[error("{message}")]
    Conflict {
        /// Human-readable description of the clash.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("storage query failed: {message}")]
    Query {
        /// Backend-reported failure description.
        message: String,
    },
    /// The backend connection could not be established or was lost.
    #[error("storage backend unavailable: {message}")]
    Unavailable {
        /// Backend-reported transport description.
        message: String,
    },
}

impl StorageError {
    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an unavailable error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Persistence contract for users, the game catalogue, and bookings.
///
/// Every adapter must match the in-memory reference behaviour logically:
/// same inputs produce equivalent outputs, even though id representation
/// and persistence differ.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch a user by id.
    async fn get_user(&self, id: &EntityId) -> Result<Option<User>, StorageError>;

    /// Fetch a user by unique username.
    ///
    /// Serves both the duplicate check at registration and the header-based
    /// identity lookup.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    /// Insert a new user.
    ///
    /// Fails with [`StorageError::Conflict`] when the username is already
    /// taken; durable backends enforce this with a uniqueness constraint so
    /// the insert is atomic.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    /// List the full catalogue in seed insertion order.
    async fn get_games(&self) -> Result<Vec<Game>, StorageError>;

    /// Fetch a game by id.
    async fn get_game(&self, id: &EntityId) -> Result<Option<Game>, StorageError>;

    /// Insert a catalogue entry. Used only during seeding.
    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError>;

    /// Insert a booking, assigning an id and returning the stored record
    /// verbatim.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StorageError>;

    /// Fetch a booking by id.
    async fn get_booking(&self, id: &EntityId) -> Result<Option<Booking>, StorageError>;

    /// List bookings whose slot falls on the given calendar day, inclusive
    /// of `00:00:00.000` through `23:59:59.999`.
    async fn get_bookings_by_date(&self, day: NaiveDate) -> Result<Vec<Booking>, StorageError>;

    /// List a user's bookings in insertion order.
    async fn get_user_bookings(&self, user_id: &EntityId)
    -> Result<Vec<Booking>, StorageError>;

    /// Set the payment flag on a booking. A no-op when the id is unknown.
    async fn update_booking_payment(
        &self,
        id: &EntityId,
        is_paid: bool,
    ) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn conflict_messages_pass_through_unprefixed() {
        let err = StorageError::conflict("Username already taken");
        assert_eq!(err.to_string(), "Username already taken");
    }

    #[rstest]
    fn query_and_transport_errors_name_the_category() {
        assert_eq!(
            StorageError::query("syntax error").to_string(),
            "storage query failed: syntax error"
        );
        assert_eq!(
            StorageError::unavailable("refused").to_string(),
            "storage backend unavailable: refused"
        );
    }
}
