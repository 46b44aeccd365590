//! Endpoints scoped to the caller's identity.
//!
//! ```text
//! GET /api/user/profile
//! GET /api/user/bookings
//! ```
//!
//! Both resolve the caller from the `X-Username` header via [`Identity`].

use actix_web::{HttpResponse, get, web};

use crate::domain::{Booking, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;

/// Fetch the caller's stored profile.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "The caller's profile", body = User),
        (status = 401, description = "Missing identity header", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "getProfile"
)]
#[get("/user/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let user = identity.resolve(&state).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// List the caller's bookings in creation order.
#[utoipa::path(
    get,
    path = "/api/user/bookings",
    responses(
        (status = 200, description = "The caller's bookings", body = [Booking]),
        (status = 401, description = "Missing identity header", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "getUserBookings"
)]
#[get("/user/bookings")]
pub async fn get_user_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let user = identity.resolve(&state).await?;
    let bookings = state.storage.get_user_bookings(&user.id).await?;
    Ok(HttpResponse::Ok().json(bookings))
}
