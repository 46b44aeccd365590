//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all booking endpoints, the health probes, the domain
//! schemas, and the `X-Username` identity header scheme. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Booking, EntityId, Error, ErrorCode, Game, NewBooking, NewGame, NewUser, User};
use crate::inbound::http::auth::{AuthResponse, LoginRequest};

/// Enrich the generated document with the identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "UsernameHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Username",
                "Login-session placeholder naming the calling user.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Arena booking API",
        description = "HTTP interface for the VR arena game catalogue, registration, and booking workflow."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::get_user_bookings,
        crate::inbound::http::games::list_games,
        crate::inbound::http::games::get_game,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::pay_booking,
        crate::inbound::http::bookings::bookings_by_date,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EntityId,
        Error,
        ErrorCode,
        User,
        NewUser,
        Game,
        NewGame,
        Booking,
        NewBooking,
        AuthResponse,
        LoginRequest,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "user", description = "Caller-scoped profile and bookings"),
        (name = "games", description = "Game catalogue"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
