//! Booking entity and the calendar-day query window.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntityId;

/// Status a booking carries until something changes it.
///
/// The status column is free text in every backend; `"pending"` is merely
/// the default the system writes at creation time.
pub const DEFAULT_BOOKING_STATUS: &str = "pending";

/// A reservation of one game slot by one user.
///
/// ## Invariants
/// - `user_id`, `game_id`, and `date` are immutable after creation.
/// - Only `is_paid` (and by convention `status`) mutate post-creation.
/// - Bookings are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Owning user.
    pub user_id: EntityId,
    /// Booked game.
    pub game_id: EntityId,
    /// Scheduled slot, UTC.
    pub date: DateTime<Utc>,
    /// Number of players attending. Not checked against the game's player
    /// bounds (preserved permissive behaviour).
    pub team_size: i32,
    /// Total price in integer currency units.
    pub total_amount: i32,
    /// Whether payment has been recorded.
    pub is_paid: bool,
    /// Free-text venue location.
    pub location: String,
    /// Free-text status, `"pending"` until paid.
    pub status: String,
}

/// Insertable variant of [`Booking`]: the entity minus the server-assigned id,
/// with the payment defaults applied when the payload omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// Owning user.
    pub user_id: EntityId,
    /// Booked game.
    pub game_id: EntityId,
    /// Scheduled slot, UTC.
    pub date: DateTime<Utc>,
    /// Number of players attending.
    pub team_size: i32,
    /// Total price in integer currency units.
    pub total_amount: i32,
    /// Defaults to `false`.
    #[serde(default)]
    pub is_paid: bool,
    /// Free-text venue location.
    pub location: String,
    /// Defaults to [`DEFAULT_BOOKING_STATUS`].
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_BOOKING_STATUS.to_owned()
}

impl NewBooking {
    /// Attach a server-assigned id, producing the stored entity.
    #[must_use]
    pub fn into_booking(self, id: EntityId) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            game_id: self.game_id,
            date: self.date,
            team_size: self.team_size,
            total_amount: self.total_amount,
            is_paid: self.is_paid,
            location: self.location,
            status: self.status,
        }
    }
}

/// Inclusive bounds of one calendar day: `00:00:00.000` through
/// `23:59:59.999`.
///
/// The service clock is treated as UTC, so "same day" queries are evaluated
/// against the UTC date of the stored timestamp.
#[must_use]
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = start + TimeDelta::days(1) - TimeDelta::milliseconds(1);
    (start, end)
}
