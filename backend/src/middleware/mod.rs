//! Actix middleware for the booking service.

pub mod trace;
