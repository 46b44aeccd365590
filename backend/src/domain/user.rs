//! User entity and registration payload validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntityId;

/// Validation errors raised by [`NewUser::validate`].
///
/// Each variant names the offending field so inbound adapters can surface it
/// in the error details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Email was empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    #[error("email is not a valid address: {value}")]
    MalformedEmail {
        /// The rejected input.
        value: String,
    },
    /// Phone number was empty.
    #[error("phone number must not be empty")]
    EmptyPhoneNumber,
}

impl UserValidationError {
    /// Field name for structured error details.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
            Self::EmptyEmail | Self::MalformedEmail { .. } => "email",
            Self::EmptyPhoneNumber => "phoneNumber",
        }
    }
}

/// Registered account.
///
/// The password is stored and compared in plaintext. That is a preserved
/// defect of the system this service replaces, not a design choice to copy
/// elsewhere.
///
/// ## Invariants
/// - `username` is unique within the active storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Unique login name.
    #[schema(example = "alice")]
    pub username: String,
    /// Plaintext password (preserved defect, see type docs).
    pub password: String,
    /// Contact address used for booking notifications.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Contact phone number, free-form.
    pub phone_number: String,
}

/// Insertable registration payload: a [`User`] without the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Requested login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Contact address.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
}

impl NewUser {
    /// Check field-level invariants before handing the payload to storage.
    ///
    /// Only shape is validated; there is deliberately no rule beyond
    /// non-emptiness and a plausible email address.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if self.email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !is_plausible_email(&self.email) {
            return Err(UserValidationError::MalformedEmail {
                value: self.email.clone(),
            });
        }
        if self.phone_number.trim().is_empty() {
            return Err(UserValidationError::EmptyPhoneNumber);
        }
        Ok(())
    }

    /// Attach a server-assigned id, producing the stored entity.
    #[must_use]
    pub fn into_user(self, id: EntityId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            phone_number: self.phone_number,
        }
    }
}

/// Minimal address check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Matches the permissiveness of the original schema layer.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && domain.split('.').all(|segment| !segment.is_empty())
}
