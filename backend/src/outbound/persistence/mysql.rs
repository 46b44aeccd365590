//! MySQL storage adapter using Diesel with async connections.
//!
//! Ids are `BIGINT AUTO_INCREMENT`; inserts read `LAST_INSERT_ID()` on the
//! same connection to return the stored record. Slot timestamps are stored
//! as `DATETIME(3)` in UTC, matching the millisecond resolution of the
//! calendar-day window.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{Booking, EntityId, Game, NewBooking, NewGame, NewUser, User, day_bounds};

use super::models::{
    BookingRow, GameRow, NewBookingRow, NewGameRow, NewUserRow, UserRow,
};
use super::pool::{DbPool, PoolConfig, PoolError};
use super::schema::{bookings, games, users};

diesel::define_sql_function! {
    /// MySQL's `LAST_INSERT_ID()`, scoped to the current connection.
    fn last_insert_id() -> Bigint;
}

const CREATE_USERS: &str = "\
CREATE TABLE IF NOT EXISTS users (
  id BIGINT AUTO_INCREMENT PRIMARY KEY,
  username VARCHAR(255) NOT NULL UNIQUE,
  password VARCHAR(255) NOT NULL,
  email VARCHAR(255) NOT NULL,
  phone_number VARCHAR(32) NOT NULL
)";

const CREATE_GAMES: &str = "\
CREATE TABLE IF NOT EXISTS games (
  id BIGINT AUTO_INCREMENT PRIMARY KEY,
  name VARCHAR(255) NOT NULL,
  description TEXT NOT NULL,
  image_url TEXT NOT NULL,
  min_players INT NOT NULL,
  max_players INT NOT NULL
)";

const CREATE_BOOKINGS: &str = "\
CREATE TABLE IF NOT EXISTS bookings (
  id BIGINT AUTO_INCREMENT PRIMARY KEY,
  user_id BIGINT NOT NULL,
  game_id BIGINT NOT NULL,
  date DATETIME(3) NOT NULL,
  team_size INT NOT NULL,
  total_amount INT NOT NULL,
  is_paid BOOLEAN NOT NULL DEFAULT FALSE,
  location VARCHAR(255) NOT NULL,
  status VARCHAR(32) NOT NULL DEFAULT 'pending'
)";

/// Diesel-backed implementation of the storage port.
#[derive(Clone)]
pub struct MysqlStorage {
    pool: DbPool,
}

impl MysqlStorage {
    /// Connect to MySQL and build the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the pool cannot be built.
    pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self, StorageError> {
        let config = PoolConfig::new(database_url).with_max_size(pool_size);
        let pool = DbPool::new(config).await.map_err(map_pool_error)?;
        Ok(Self { pool })
    }

    /// Create the schema if it does not exist yet.
    ///
    /// The service owns its schema and there is no migration history to
    /// replay; `CREATE TABLE IF NOT EXISTS` keeps startup idempotent.
    ///
    /// # Errors
    ///
    /// Returns the mapped error when any DDL statement fails.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        for ddl in [CREATE_USERS, CREATE_GAMES, CREATE_BOOKINGS] {
            diesel::sql_query(ddl)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        }
        Ok(())
    }
}

/// Map pool errors to port errors.
fn map_pool_error(error: PoolError) -> StorageError {
    StorageError::unavailable(error.to_string())
}

/// Booking references must fit this backend's integer key space. Anything
/// else is rejected loudly; writing a zero key would store a record no
/// follow-up query could ever attribute.
fn numeric_ref(id: &EntityId) -> Result<i64, StorageError> {
    id.as_i64()
        .ok_or_else(|| StorageError::query(format!("booking reference is not numeric: {id}")))
}

/// Map Diesel errors to port errors.
fn map_diesel_error(error: diesel::result::Error) -> StorageError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StorageError::conflict("Username already taken")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageError::unavailable("database connection lost")
        }
        other => StorageError::query(other.to_string()),
    }
}

#[async_trait]
impl Storage for MysqlStorage {
    async fn get_user(&self, id: &EntityId) -> Result<Option<User>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(key)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow {
                username: &user.username,
                password: &user.password,
                email: &user.email,
                phone_number: &user.phone_number,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let id: i64 = diesel::select(last_insert_id())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(user.into_user(EntityId::from_i64(id)))
    }

    async fn get_games(&self) -> Result<Vec<Game>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = games::table
            .order(games::id.asc())
            .select(GameRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Game::from).collect())
    }

    async fn get_game(&self, id: &EntityId) -> Result<Option<Game>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = games::table
            .find(key)
            .select(GameRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Game::from))
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(games::table)
            .values(NewGameRow {
                name: &game.name,
                description: &game.description,
                image_url: &game.image_url,
                min_players: game.min_players,
                max_players: game.max_players,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let id: i64 = diesel::select(last_insert_id())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(game.into_game(EntityId::from_i64(id)))
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StorageError> {
        let user_key = numeric_ref(&booking.user_id)?;
        let game_key = numeric_ref(&booking.game_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(bookings::table)
            .values(NewBookingRow {
                user_id: user_key,
                game_id: game_key,
                date: booking.date.naive_utc(),
                team_size: booking.team_size,
                total_amount: booking.total_amount,
                is_paid: booking.is_paid,
                location: &booking.location,
                status: &booking.status,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let id: i64 = diesel::select(last_insert_id())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(booking.into_booking(EntityId::from_i64(id)))
    }

    async fn get_booking(&self, id: &EntityId) -> Result<Option<Booking>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = bookings::table
            .find(key)
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Booking::from))
    }

    async fn get_bookings_by_date(&self, day: NaiveDate) -> Result<Vec<Booking>, StorageError> {
        let (start, end) = day_bounds(day);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bookings::table
            .filter(bookings::date.ge(start.naive_utc()))
            .filter(bookings::date.le(end.naive_utc()))
            .order(bookings::id.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn get_user_bookings(&self, user_id: &EntityId) -> Result<Vec<Booking>, StorageError> {
        let Some(key) = user_id.as_i64() else {
            return Ok(Vec::new());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bookings::table
            .filter(bookings::user_id.eq(key))
            .order(bookings::id.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn update_booking_payment(
        &self,
        id: &EntityId,
        is_paid: bool,
    ) -> Result<(), StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Zero affected rows means an unknown id, which is a no-op by
        // contract.
        diesel::update(bookings::table.find(key))
            .set(bookings::is_paid.eq(is_paid))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
