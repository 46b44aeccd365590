//! Registration and login endpoints.
//!
//! ```text
//! POST /api/auth/register
//! POST /api/auth/login
//! ```
//!
//! Credentials are compared in plaintext, matching the system this service
//! replaces. See [`crate::domain::User`] for the caveat.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EntityId, Error, NewUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Identity subset returned by both auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Server-assigned user id.
    pub id: EntityId,
    /// Confirmed login name.
    #[schema(example = "alice")]
    pub username: String,
}

/// Credentials supplied to the login endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Register a new user.
///
/// The payload is deserialised from a raw JSON value so a malformed body
/// yields the legacy message rather than Actix's own deserialisation error.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created", body = AuthResponse),
        (status = 400, description = "Invalid payload or username taken", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    body: web::Json<serde_json::Value>,
) -> ApiResult<HttpResponse> {
    let Ok(payload) = serde_json::from_value::<NewUser>(body.into_inner()) else {
        return Err(Error::invalid_request("Invalid user data"));
    };
    if let Err(reason) = payload.validate() {
        return Err(Error::invalid_request("Invalid user data")
            .with_details(serde_json::json!({ "field": reason.field() })));
    }

    if state
        .storage
        .get_user_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(Error::conflict("Username already taken"));
    }
    let user = state.storage.create_user(payload).await.map_err(|err| {
        // The check above races with concurrent registrations; the store's
        // uniqueness constraint is the authority.
        match Error::from(err) {
            e if e.code == crate::domain::ErrorCode::Conflict => {
                Error::conflict("Username already taken")
            }
            e => e,
        }
    })?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        id: user.id,
        username: user.username,
    }))
}

/// Log a user in with a plaintext credential check.
///
/// A malformed body is treated the same as wrong credentials.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 401, description = "Bad credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Json<serde_json::Value>,
) -> ApiResult<HttpResponse> {
    let Ok(request) = serde_json::from_value::<LoginRequest>(body.into_inner()) else {
        return Err(Error::unauthorized("Invalid credentials"));
    };
    let user = state
        .storage
        .get_user_by_username(&request.username)
        .await?;
    match user {
        Some(user) if user.password == request.password => {
            Ok(HttpResponse::Ok().json(AuthResponse {
                id: user.id,
                username: user.username,
            }))
        }
        _ => Err(Error::unauthorized("Invalid credentials")),
    }
}
