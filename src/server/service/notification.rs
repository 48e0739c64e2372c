//! Plain-text email notifications over SMTP.
//!
//! Delivery is best effort: failures are logged and never fail the request that
//! triggered them. Without SMTP configuration every message is logged instead of sent.

use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::server::{
    config::SmtpConfig,
    error::{config::ConfigError, AppError},
    model::{appointment::Appointment, reminder::MedicineReminder, user::User},
};

#[derive(Clone)]
struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Sends account and appointment emails.
#[derive(Clone)]
pub struct Notifier {
    mailer: Option<Mailer>,
}

impl Notifier {
    /// Builds an SMTP-backed notifier.
    ///
    /// # Returns
    /// - `Ok(Notifier)` - Transport configured
    /// - `Err(AppError::ConfigErr)` - `SMTP_FROM` is not a valid mailbox
    /// - `Err(AppError::MailErr)` - Relay host could not be configured
    pub fn from_config(config: &SmtpConfig) -> Result<Self, AppError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: "SMTP_FROM".to_string(),
                value: config.from.clone(),
            })?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            mailer: Some(Mailer {
                transport: builder.build(),
                from,
            }),
        })
    }

    /// A notifier that only logs messages.
    pub fn disabled() -> Self {
        Self { mailer: None }
    }

    /// Sends one plain-text email, logging instead of failing.
    pub async fn send(&self, to: &User, subject: &str, body: String) {
        let Some(mailer) = &self.mailer else {
            tracing::info!("SMTP not configured, skipping email '{}' to {}", subject, to.email);
            return;
        };

        let recipient = match to.email.parse::<Address>() {
            Ok(address) => Mailbox::new(Some(to.name.clone()), address),
            Err(e) => {
                tracing::warn!("Invalid recipient address {}: {}", to.email, e);
                return;
            }
        };

        let message = match Message::builder()
            .from(mailer.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
        {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Failed to build email '{}' to {}: {}", subject, to.email, e);
                return;
            }
        };

        match mailer.transport.send(message).await {
            Ok(_) => tracing::debug!("Sent email '{}' to {}", subject, to.email),
            Err(e) => tracing::warn!("Failed to send email '{}' to {}: {}", subject, to.email, e),
        }
    }

    /// Tells both participants about a new booking.
    pub async fn appointment_booked(&self, patient: &User, doctor: &User, appointment: &Appointment) {
        let when = format_when(appointment.scheduled_at);

        self.send(
            patient,
            "Appointment requested",
            format!(
                "Hi {},\n\nYour {} appointment with Dr. {} on {} has been requested and is awaiting confirmation.\n",
                patient.name, appointment.mode, doctor.name, when
            ),
        )
        .await;
        self.send(
            doctor,
            "New appointment request",
            format!(
                "Hi Dr. {},\n\n{} has requested a {} appointment on {}.\n",
                doctor.name, patient.name, appointment.mode, when
            ),
        )
        .await;
    }

    /// Tells both participants about a status change or reschedule.
    pub async fn appointment_updated(&self, patient: &User, doctor: &User, appointment: &Appointment) {
        let when = format_when(appointment.scheduled_at);
        let subject = format!("Appointment {}", appointment.status);

        for (recipient, other) in [(patient, doctor), (doctor, patient)] {
            self.send(
                recipient,
                &subject,
                format!(
                    "Hi {},\n\nYour appointment with {} on {} is now {}.\n",
                    recipient.name, other.name, when, appointment.status
                ),
            )
            .await;
        }
    }

    /// Reminds the patient of an appointment within the next day.
    pub async fn appointment_reminder(&self, patient: &User, doctor: &User, appointment: &Appointment) {
        self.send(
            patient,
            "Upcoming appointment reminder",
            format!(
                "Hi {},\n\nThis is a reminder of your {} appointment with Dr. {} on {}.\n",
                patient.name,
                appointment.mode,
                doctor.name,
                format_when(appointment.scheduled_at)
            ),
        )
        .await;
    }

    /// Reminds the patient to take a dose.
    pub async fn medicine_reminder(&self, patient: &User, reminder: &MedicineReminder, dose_at: DateTime<Utc>) {
        let dosage = reminder
            .dosage
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();

        self.send(
            patient,
            &format!("Time to take {}", reminder.medicine_name),
            format!(
                "Hi {},\n\nIt is time to take {}{} scheduled for {}.\n",
                patient.name,
                reminder.medicine_name,
                dosage,
                dose_at.format("%H:%M UTC")
            ),
        )
        .await;
    }
}

fn format_when(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d at %H:%M UTC").to_string()
}
