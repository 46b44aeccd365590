//! SMTP notifier sending booking payment confirmations via Lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ports::{Notifier, NotifyError};
use crate::domain::{Booking, User};

/// Email notifier backed by an async SMTP transport.
///
/// Delivery runs on a detached task (see the payment transition), so a slow
/// or unreachable relay never blocks a request.
#[derive(Clone, Debug)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier talking to `relay` over STARTTLS with the given
    /// credentials, sending from `from`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Compose`] when the relay host or sender
    /// address is malformed.
    pub fn new(
        relay: &str,
        port: u16,
        username: String,
        password: String,
        from: &str,
    ) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(relay)
            .map_err(|err| NotifyError::compose(format!("invalid SMTP relay: {err}")))?
            .port(port)
            .credentials(Credentials::new(username, password))
            .build();
        let from = from
            .parse()
            .map_err(|err| NotifyError::compose(format!("invalid sender address: {err}")))?;
        Ok(Self { transport, from })
    }

    fn compose(&self, user: &User, booking: &Booking) -> Result<Message, NotifyError> {
        let to: Mailbox = user
            .email
            .parse()
            .map_err(|err| NotifyError::compose(format!("invalid recipient address: {err}")))?;
        let body = format!(
            "Hi {username},\n\n\
             Payment for your booking has been recorded.\n\n\
             Booking:     {id}\n\
             Slot:        {date}\n\
             Location:    {location}\n\
             Team size:   {team_size}\n\
             Amount paid: {amount}\n\n\
             See you in the arena!\n",
            username = user.username,
            id = booking.id,
            date = booking.date.to_rfc3339(),
            location = booking.location,
            team_size = booking.team_size,
            amount = booking.total_amount,
        );
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Booking payment confirmed")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|err| NotifyError::compose(format!("failed to build email: {err}")))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn booking_paid(&self, user: &User, booking: &Booking) -> Result<(), NotifyError> {
        let email = self.compose(user, booking)?;
        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|err| NotifyError::delivery(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{DEFAULT_BOOKING_STATUS, EntityId};

    fn notifier() -> SmtpNotifier {
        SmtpNotifier::new(
            "smtp.example.com",
            587,
            "mailer".to_owned(),
            "secret".to_owned(),
            "Arena <bookings@example.com>",
        )
        .expect("valid configuration")
    }

    fn sample(email: &str) -> (User, Booking) {
        let user = User {
            id: EntityId::from_i64(1),
            username: "alice".to_owned(),
            password: "pw123".to_owned(),
            email: email.to_owned(),
            phone_number: "9999999999".to_owned(),
        };
        let booking = Booking {
            id: EntityId::from_i64(7),
            user_id: user.id.clone(),
            game_id: EntityId::from_i64(2),
            date: Utc
                .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
                .single()
                .expect("valid date"),
            team_size: 4,
            total_amount: 2000,
            is_paid: true,
            location: "malad".to_owned(),
            status: DEFAULT_BOOKING_STATUS.to_owned(),
        };
        (user, booking)
    }

    #[test]
    fn composes_a_confirmation_for_a_valid_recipient() {
        let (user, booking) = sample("alice@example.com");
        let message = notifier().compose(&user, &booking).expect("composable");
        let rendered = String::from_utf8(message.formatted()).expect("utf8 message");
        assert!(rendered.contains("Booking payment confirmed"));
        assert!(rendered.contains("alice@example.com"));
    }

    #[test]
    fn rejects_an_unparseable_recipient() {
        let (user, booking) = sample("not an address");
        let err = notifier()
            .compose(&user, &booking)
            .expect_err("compose fails");
        assert!(matches!(err, NotifyError::Compose { .. }));
    }

    #[test]
    fn rejects_a_malformed_sender() {
        let err = SmtpNotifier::new(
            "smtp.example.com",
            587,
            "mailer".to_owned(),
            "secret".to_owned(),
            "not an address",
        )
        .expect_err("construction fails");
        assert!(matches!(err, NotifyError::Compose { .. }));
    }
}
