//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod games;
pub mod health;
pub mod identity;
pub mod state;
pub mod users;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Assemble every API handler under the `/api` scope.
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(auth::register)
        .service(auth::login)
        .service(users::get_profile)
        .service(users::get_user_bookings)
        .service(games::list_games)
        .service(games::get_game)
        .service(bookings::create_booking)
        .service(bookings::pay_booking)
        .service(bookings::bookings_by_date)
}
