//! In-memory storage adapter, the behavioural reference for the port.
//!
//! Three id-keyed maps plus monotonic counters. Every operation takes the
//! single mutex briefly and never awaits while holding it, so the adapter
//! is safe to share across workers. Data does not survive a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{Booking, EntityId, Game, NewBooking, NewGame, NewUser, User, day_bounds};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    games: BTreeMap<i64, Game>,
    bookings: BTreeMap<i64, Booking>,
    next_user_id: i64,
    next_game_id: i64,
    next_booking_id: i64,
}

/// Map-backed storage with auto-incrementing integer ids.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: &EntityId) -> Result<Option<User>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        Ok(self.inner.lock().users.get(&key).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .inner
            .lock()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut inner = self.inner.lock();
        // Checked under the same lock as the insert, so two concurrent
        // registrations cannot both pass.
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StorageError::conflict("Username already taken"));
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let user = user.into_user(EntityId::from_i64(id));
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_games(&self) -> Result<Vec<Game>, StorageError> {
        Ok(self.inner.lock().games.values().cloned().collect())
    }

    async fn get_game(&self, id: &EntityId) -> Result<Option<Game>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        Ok(self.inner.lock().games.get(&key).cloned())
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError> {
        let mut inner = self.inner.lock();
        inner.next_game_id += 1;
        let id = inner.next_game_id;
        let game = game.into_game(EntityId::from_i64(id));
        inner.games.insert(id, game.clone());
        Ok(game)
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StorageError> {
        let mut inner = self.inner.lock();
        inner.next_booking_id += 1;
        let id = inner.next_booking_id;
        let booking = booking.into_booking(EntityId::from_i64(id));
        inner.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: &EntityId) -> Result<Option<Booking>, StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        Ok(self.inner.lock().bookings.get(&key).cloned())
    }

    async fn get_bookings_by_date(&self, day: NaiveDate) -> Result<Vec<Booking>, StorageError> {
        let (start, end) = day_bounds(day);
        Ok(self
            .inner
            .lock()
            .bookings
            .values()
            .filter(|booking| booking.date >= start && booking.date <= end)
            .cloned()
            .collect())
    }

    async fn get_user_bookings(&self, user_id: &EntityId) -> Result<Vec<Booking>, StorageError> {
        Ok(self
            .inner
            .lock()
            .bookings
            .values()
            .filter(|booking| booking.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn update_booking_payment(
        &self,
        id: &EntityId,
        is_paid: bool,
    ) -> Result<(), StorageError> {
        let Some(key) = id.as_i64() else {
            return Ok(());
        };
        if let Some(booking) = self.inner.lock().bookings.get_mut(&key) {
            booking.is_paid = is_paid;
        }
        Ok(())
    }
}
