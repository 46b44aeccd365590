//! Notification port for post-payment side effects.

use async_trait::async_trait;

use crate::domain::{Booking, User};

/// Failures raised by notification adapters.
///
/// These never propagate to the client: the payment transition logs the
/// failure and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// The message could not be composed (bad address, bad template).
    #[error("notification could not be composed: {message}")]
    Compose {
        /// Description of the composition failure.
        message: String,
    },
    /// The message could not be delivered.
    #[error("notification delivery failed: {message}")]
    Delivery {
        /// Transport-reported failure description.
        message: String,
    },
}

impl NotifyError {
    /// Create a composition error with the given message.
    pub fn compose(message: impl Into<String>) -> Self {
        Self::Compose {
            message: message.into(),
        }
    }

    /// Create a delivery error with the given message.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Best-effort notification sink invoked after a booking is marked paid.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the owning user their booking payment was recorded.
    async fn booking_paid(&self, user: &User, booking: &Booking) -> Result<(), NotifyError>;
}

/// Notifier that records nothing and always succeeds.
///
/// Active whenever SMTP is not configured; also handy in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn booking_paid(&self, _user: &User, _booking: &Booking) -> Result<(), NotifyError> {
        Ok(())
    }
}
