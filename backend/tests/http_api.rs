//! End-to-end behavioural tests for the HTTP surface over the in-memory
//! adapter: catalogue reads, registration and login, identity-scoped
//! endpoints, and the booking payment lifecycle.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use arena_backend::Trace;
use arena_backend::domain::ensure_seed_catalog;
use arena_backend::domain::ports::NoopNotifier;
use arena_backend::inbound::http::api_routes;
use arena_backend::inbound::http::state::HttpState;
use arena_backend::outbound::persistence::MemoryStorage;

async fn seeded_state() -> HttpState {
    let storage = Arc::new(MemoryStorage::new());
    ensure_seed_catalog(storage.as_ref())
        .await
        .expect("seeding succeeds");
    HttpState::new(storage, Arc::new(NoopNotifier))
}

async fn spawn_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_routes()),
    )
    .await
}

fn register_payload(username: &str) -> Value {
    json!({
        "username": username,
        "password": "pw123",
        "email": "a@x.com",
        "phoneNumber": "9999999999",
    })
}

fn booking_payload(date: &str) -> Value {
    json!({
        "userId": 1,
        "gameId": 1,
        "date": date,
        "teamSize": 4,
        "totalAmount": 2000,
        "location": "malad",
    })
}

async fn register(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> ServiceResponse {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_payload(username))
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn games_listing_returns_the_seeded_catalogue() {
    let app = spawn_app(seeded_state().await).await;

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());

    let games: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(games.len(), 6);
    let first = games.first().expect("catalogue seeded");
    assert_eq!(first["name"], "Zombie Apocalypse");
    assert_eq!(first["minPlayers"], 2);
    assert_eq!(first["maxPlayers"], 8);
}

#[actix_web::test]
async fn single_game_lookup_round_trips() {
    let app = spawn_app(seeded_state().await).await;

    let req = test::TestRequest::get().uri("/api/games/1").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let game: Value = test::read_body_json(res).await;
    assert_eq!(game["id"], "1");
    assert_eq!(game["name"], "Zombie Apocalypse");
}

#[actix_web::test]
async fn unknown_and_malformed_game_ids_are_not_found() {
    let app = spawn_app(seeded_state().await).await;

    for uri in ["/api/games/99", "/api/games/not-a-number"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 404, "uri: {uri}");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Game not found");
    }
}

#[actix_web::test]
async fn registration_returns_the_identity_subset() {
    let app = spawn_app(seeded_state().await).await;

    let res = register(&app, "alice").await;
    assert!(res.status().is_success());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], "1");
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn duplicate_registration_is_rejected_with_400() {
    let app = spawn_app(seeded_state().await).await;

    let first = register(&app, "alice").await;
    assert!(first.status().is_success());

    let second = register(&app, "alice").await;
    assert_eq!(second.status().as_u16(), 400);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["message"], "Username already taken");
}

#[actix_web::test]
async fn malformed_registration_payloads_are_rejected() {
    let app = spawn_app(seeded_state().await).await;

    // Missing required field.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "bob", "password": "pw" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid user data");

    // Malformed email names the field in the details.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "bob",
            "password": "pw",
            "email": "not-an-email",
            "phoneNumber": "1",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid user data");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn login_accepts_matching_credentials_only() {
    let app = spawn_app(seeded_state().await).await;
    register(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "alice");

    for payload in [
        json!({ "username": "alice", "password": "wrong" }),
        json!({ "username": "nobody", "password": "pw123" }),
        json!({ "username": "alice" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 401);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn profile_requires_a_known_identity_header() {
    let app = spawn_app(seeded_state().await).await;
    register(&app, "alice").await;

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("X-Username", "alice"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["phoneNumber"], "9999999999");

    let req = test::TestRequest::get().uri("/api/user/profile").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 401);

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("X-Username", "ghost"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn booking_payment_lifecycle_round_trips() {
    let app = spawn_app(seeded_state().await).await;
    register(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(booking_payload("2024-06-01T10:00:00Z"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["id"], "1");
    assert_eq!(created["isPaid"], false);
    assert_eq!(created["status"], "pending");

    let req = test::TestRequest::post()
        .uri("/api/bookings/1/pay")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let paid: Value = test::read_body_json(res).await;
    assert_eq!(paid["isPaid"], true);
    assert_eq!(paid["status"], "pending");

    let req = test::TestRequest::get()
        .uri("/api/user/bookings")
        .insert_header(("X-Username", "alice"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let bookings: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(bookings.len(), 1);
    let booking = bookings.first().expect("booking listed");
    assert_eq!(booking["isPaid"], true);
}

#[actix_web::test]
async fn paying_an_unknown_booking_is_not_found() {
    let app = spawn_app(seeded_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/99/pay")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Booking not found");
}

#[actix_web::test]
async fn malformed_booking_payloads_are_rejected() {
    let app = spawn_app(seeded_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({ "userId": 1, "teamSize": 4 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid booking data");
}

#[actix_web::test]
async fn date_query_selects_one_calendar_day() {
    let app = spawn_app(seeded_state().await).await;

    for date in ["2024-06-01T12:00:00Z", "2024-06-02T00:00:01Z"] {
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .set_json(booking_payload(date))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    for uri in [
        "/api/bookings/date/2024-06-01",
        "/api/bookings/date/2024-06-01T09:00:00Z",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success(), "uri: {uri}");
        let bookings: Vec<Value> = test::read_body_json(res).await;
        assert_eq!(bookings.len(), 1, "uri: {uri}");
        let booking = bookings.first().expect("booking listed");
        assert_eq!(booking["id"], "1");
    }

    let req = test::TestRequest::get()
        .uri("/api/bookings/date/garbage")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid date");
}

#[actix_web::test]
async fn responses_carry_a_trace_id_header() {
    let app = spawn_app(seeded_state().await).await;

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.headers().contains_key("trace-id"));
}
