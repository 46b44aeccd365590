//! Payment transition for bookings.
//!
//! Marking a booking paid is a two-step affair: flip the persisted flag,
//! then notify the owning user. Notification is strictly best effort and
//! runs off the request path; its failure never surfaces to the client.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{Notifier, Storage};
use crate::domain::{Booking, Error};

/// Mark a booking as paid and kick off the owner notification.
///
/// Returns the booking with its payment flag set. The notification runs in
/// a detached task; failures there are logged and swallowed.
///
/// # Errors
///
/// Returns [`Error`] with a not-found code when the booking id is unknown,
/// or the mapped storage error when the backend fails.
pub async fn mark_booking_paid(
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    id: &crate::domain::EntityId,
) -> Result<Booking, Error> {
    let Some(booking) = storage.get_booking(id).await? else {
        return Err(Error::not_found("Booking not found"));
    };

    storage.update_booking_payment(id, true).await?;
    let booking = Booking {
        is_paid: true,
        ..booking
    };

    spawn_notification(storage, notifier, booking.clone());
    Ok(booking)
}

/// Notify the booking's owner on a detached task.
fn spawn_notification(storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>, booking: Booking) {
    tokio::spawn(async move {
        let user = match storage.get_user(&booking.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(booking = %booking.id, "payment notification skipped: owner not found");
                return;
            }
            Err(err) => {
                warn!(booking = %booking.id, error = %err, "payment notification skipped: owner lookup failed");
                return;
            }
        };
        if let Err(err) = notifier.booking_paid(&user, &booking).await {
            warn!(booking = %booking.id, error = %err, "payment notification failed");
        }
    });
}

#[cfg(test)]
mod tests {
    //! Payment transition behaviour with stubbed ports.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::domain::ports::{NotifyError, StorageError};
    use crate::domain::{
        DEFAULT_BOOKING_STATUS, EntityId, ErrorCode, Game, NewBooking, NewGame, NewUser, User,
    };

    fn sample_booking(id: i64) -> Booking {
        Booking {
            id: EntityId::from_i64(id),
            user_id: EntityId::from_i64(1),
            game_id: EntityId::from_i64(2),
            date: Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).single().expect("valid date"),
            team_size: 4,
            total_amount: 120,
            is_paid: false,
            location: "Arena One".into(),
            status: DEFAULT_BOOKING_STATUS.into(),
        }
    }

    fn sample_user() -> User {
        User {
            id: EntityId::from_i64(1),
            username: "alice".into(),
            password: "secret".into(),
            email: "alice@example.com".into(),
            phone_number: "555-0100".into(),
        }
    }

    struct StubStorage {
        booking: Option<Booking>,
        user: Option<User>,
        payment_updates: Mutex<Vec<(EntityId, bool)>>,
    }

    impl StubStorage {
        fn with_booking(booking: Booking) -> Self {
            Self {
                booking: Some(booking),
                user: Some(sample_user()),
                payment_updates: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                booking: None,
                user: None,
                payment_updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Storage for StubStorage {
        async fn get_user(&self, _id: &EntityId) -> Result<Option<User>, StorageError> {
            Ok(self.user.clone())
        }

        async fn get_user_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<User>, StorageError> {
            Ok(self.user.clone())
        }

        async fn create_user(&self, _user: NewUser) -> Result<User, StorageError> {
            Err(StorageError::query("not implemented"))
        }

        async fn get_games(&self) -> Result<Vec<Game>, StorageError> {
            Ok(Vec::new())
        }

        async fn get_game(&self, _id: &EntityId) -> Result<Option<Game>, StorageError> {
            Ok(None)
        }

        async fn create_game(&self, _game: NewGame) -> Result<Game, StorageError> {
            Err(StorageError::query("not implemented"))
        }

        async fn create_booking(&self, _booking: NewBooking) -> Result<Booking, StorageError> {
            Err(StorageError::query("not implemented"))
        }

        async fn get_booking(&self, id: &EntityId) -> Result<Option<Booking>, StorageError> {
            Ok(self
                .booking
                .clone()
                .filter(|booking| booking.id == *id))
        }

        async fn get_bookings_by_date(
            &self,
            _day: NaiveDate,
        ) -> Result<Vec<Booking>, StorageError> {
            Ok(Vec::new())
        }

        async fn get_user_bookings(
            &self,
            _user_id: &EntityId,
        ) -> Result<Vec<Booking>, StorageError> {
            Ok(Vec::new())
        }

        async fn update_booking_payment(
            &self,
            id: &EntityId,
            is_paid: bool,
        ) -> Result<(), StorageError> {
            self.payment_updates
                .lock()
                .expect("updates lock")
                .push((id.clone(), is_paid));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn booking_paid(&self, _user: &User, _booking: &Booking) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NotifyError::delivery("mailbox on fire"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn flips_the_payment_flag_and_notifies() {
        let storage = Arc::new(StubStorage::with_booking(sample_booking(7)));
        let notifier = Arc::new(CountingNotifier::default());

        let paid = mark_booking_paid(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            &EntityId::from_i64(7),
        )
        .await
        .expect("payment succeeds");

        assert!(paid.is_paid);
        assert_eq!(paid.status, DEFAULT_BOOKING_STATUS);
        assert_eq!(
            storage.payment_updates.lock().expect("updates lock").as_slice(),
            &[(EntityId::from_i64(7), true)]
        );

        // The notification runs on a detached task; give it a beat.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let storage = Arc::new(StubStorage::empty());
        let notifier = Arc::new(CountingNotifier::default());

        let err = mark_booking_paid(
            storage as Arc<dyn Storage>,
            notifier as Arc<dyn Notifier>,
            &EntityId::from_i64(99),
        )
        .await
        .expect_err("missing booking rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Booking not found");
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_the_payment() {
        let storage = Arc::new(StubStorage::with_booking(sample_booking(3)));
        let notifier = Arc::new(CountingNotifier {
            fail: true,
            ..CountingNotifier::default()
        });

        let paid = mark_booking_paid(
            storage as Arc<dyn Storage>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            &EntityId::from_i64(3),
        )
        .await
        .expect("payment still succeeds");

        assert!(paid.is_paid);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_payment_is_idempotent() {
        let mut already_paid = sample_booking(5);
        already_paid.is_paid = true;
        let storage = Arc::new(StubStorage::with_booking(already_paid));
        let notifier = Arc::new(CountingNotifier::default());

        let paid = mark_booking_paid(
            storage as Arc<dyn Storage>,
            notifier as Arc<dyn Notifier>,
            &EntityId::from_i64(5),
        )
        .await
        .expect("payment succeeds");

        assert!(paid.is_paid);
    }
}
