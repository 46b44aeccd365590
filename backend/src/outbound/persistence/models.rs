//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{Booking, EntityId, Game, User};

use super::schema::{bookings, games, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: EntityId::from_i64(row.id),
            username: row.username,
            password: row.password,
            email: row.email,
            phone_number: row.phone_number,
        }
    }
}

/// Row struct for reading from the games table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct GameRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub min_players: i32,
    pub max_players: i32,
}

/// Insertable struct for seeding catalogue entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = games)]
pub(crate) struct NewGameRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub min_players: i32,
    pub max_players: i32,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: EntityId::from_i64(row.id),
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            min_players: row.min_players,
            max_players: row.max_players,
        }
    }
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub date: NaiveDateTime,
    pub team_size: i32,
    pub total_amount: i32,
    pub is_paid: bool,
    pub location: String,
    pub status: String,
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub user_id: i64,
    pub game_id: i64,
    pub date: NaiveDateTime,
    pub team_size: i32,
    pub total_amount: i32,
    pub is_paid: bool,
    pub location: &'a str,
    pub status: &'a str,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: EntityId::from_i64(row.id),
            user_id: EntityId::from_i64(row.user_id),
            game_id: EntityId::from_i64(row.game_id),
            date: row.date.and_utc(),
            team_size: row.team_size,
            total_amount: row.total_amount,
            is_paid: row.is_paid,
            location: row.location,
            status: row.status,
        }
    }
}
