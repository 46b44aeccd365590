//! Header-based request identity.
//!
//! The `X-Username` header stands in for a login session. It is explicitly
//! a placeholder, not a security boundary: the value is trusted as-is and
//! resolved against the user store per request.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;

/// Name of the identity header.
pub const USERNAME_HEADER: &str = "X-Username";

/// Caller identity taken from the `X-Username` header.
///
/// Extraction fails with 401 when the header is missing or not valid UTF-8.
/// Resolution against the store happens separately via [`Identity::resolve`]
/// so handlers control the lookup's error mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    /// The claimed username, unverified.
    #[rustfmt::skip]
    pub fn username(&self) -> &str { &self.username }

    /// Look the claimed user up in the store.
    ///
    /// # Errors
    ///
    /// Returns 404 when no such user exists, or the mapped storage error.
    pub async fn resolve(&self, state: &HttpState) -> Result<User, Error> {
        match state.storage.get_user_by_username(&self.username).await? {
            Some(user) => Ok(user),
            None => Err(Error::not_found("User not found")),
        }
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let outcome = req
            .headers()
            .get(USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self {
                username: value.to_owned(),
            })
            .ok_or_else(|| Error::unauthorized("Authentication required"));
        ready(outcome)
    }
}
