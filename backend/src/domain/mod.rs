//! Domain model for the arena booking service.
//!
//! Purpose: define the entities (users, games, bookings), the ports any
//! storage or notification backend must implement, catalogue seeding, and
//! the booking payment transition. Everything here is transport agnostic;
//! inbound adapters map domain errors to HTTP responses and outbound
//! adapters map database failures into port errors.

mod booking;
mod error;
mod game;
mod id;
mod payment;
pub mod ports;
mod seeding;
mod user;

pub use self::booking::{Booking, DEFAULT_BOOKING_STATUS, NewBooking, day_bounds};
pub use self::error::{Error, ErrorCode};
pub use self::game::{Game, NewGame};
pub use self::id::{EntityId, EntityIdError};
pub use self::payment::mark_booking_paid;
pub use self::seeding::ensure_seed_catalog;
pub use self::user::{NewUser, User, UserValidationError};
