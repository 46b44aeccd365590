//! Game catalogue read endpoints.
//!
//! ```text
//! GET /api/games
//! GET /api/games/{id}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{EntityId, Error, Game};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List the full game catalogue in seed order.
#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "All catalogue games", body = [Game]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["games"],
    operation_id = "listGames"
)]
#[get("/games")]
pub async fn list_games(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let games = state.storage.get_games().await?;
    Ok(HttpResponse::Ok().json(games))
}

/// Fetch a single game by id.
///
/// An id that does not parse is indistinguishable from an unknown one:
/// both produce the same not-found response.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    params(("id" = String, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "The requested game", body = Game),
        (status = 404, description = "No such game", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["games"],
    operation_id = "getGame"
)]
#[get("/games/{id}")]
pub async fn get_game(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Ok(id) = EntityId::new(path.into_inner()) else {
        return Err(Error::not_found("Game not found"));
    };
    match state.storage.get_game(&id).await? {
        Some(game) => Ok(HttpResponse::Ok().json(game)),
        None => Err(Error::not_found("Game not found")),
    }
}
