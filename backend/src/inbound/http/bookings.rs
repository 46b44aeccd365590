//! Booking creation, payment, and day-window query endpoints.
//!
//! ```text
//! POST /api/bookings
//! POST /api/bookings/{id}/pay
//! GET  /api/bookings/date/{date}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Booking, EntityId, Error, NewBooking, mark_booking_paid};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Create a booking.
///
/// Team size is deliberately not checked against the game's player bounds
/// and overlapping slots are allowed; see [`crate::domain::Booking`].
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = NewBooking,
    responses(
        (status = 200, description = "Booking stored", body = Booking),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    body: web::Json<serde_json::Value>,
) -> ApiResult<HttpResponse> {
    let Ok(payload) = serde_json::from_value::<NewBooking>(body.into_inner()) else {
        return Err(Error::invalid_request("Invalid booking data"));
    };
    let booking = state.storage.create_booking(payload).await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// Mark a booking as paid.
///
/// Triggers a best-effort owner notification off the request path.
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/pay",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Payment recorded", body = Booking),
        (status = 404, description = "No such booking", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "payBooking"
)]
#[post("/bookings/{id}/pay")]
pub async fn pay_booking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Ok(id) = EntityId::new(path.into_inner()) else {
        return Err(Error::not_found("Booking not found"));
    };
    let booking = mark_booking_paid(
        std::sync::Arc::clone(&state.storage),
        std::sync::Arc::clone(&state.notifier),
        &id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// List bookings falling on one calendar day.
#[utoipa::path(
    get,
    path = "/api/bookings/date/{date}",
    params(("date" = String, Path, description = "Day as YYYY-MM-DD or an RFC 3339 timestamp")),
    responses(
        (status = 200, description = "Bookings on that day", body = [Booking]),
        (status = 400, description = "Unparseable date", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "getBookingsByDate"
)]
#[get("/bookings/date/{date}")]
pub async fn bookings_by_date(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(day) = parse_day(&path) else {
        return Err(Error::invalid_request("Invalid date"));
    };
    let bookings = state.storage.get_bookings_by_date(day).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// Accept a bare `YYYY-MM-DD` day or a full RFC 3339 timestamp, reducing
/// the latter to its UTC calendar day.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(day) = raw.parse::<NaiveDate>() {
        return Some(day);
    }
    raw.parse::<DateTime<Utc>>()
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-06-01", Some((2024, 6, 1)))]
    #[case("2024-06-01T10:00:00Z", Some((2024, 6, 1)))]
    #[case("2024-06-01T23:30:00+02:00", Some((2024, 6, 1)))]
    #[case("not-a-date", None)]
    #[case("", None)]
    fn parses_days_and_timestamps(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected
            .map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"));
        assert_eq!(parse_day(raw), expected);
    }

    #[rstest]
    fn offset_timestamps_reduce_to_their_utc_day() {
        // 01:30 at +05:00 is 20:30 UTC the previous day.
        let parsed = parse_day("2024-06-01T01:30:00+05:00").expect("valid timestamp");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 5, 31).expect("valid date"));
    }
}
