use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{notification::Notifier, reminder::ReminderService},
};

/// Starts the reminder scheduler
///
/// Runs at the start of every minute and sends:
/// - medicine reminder emails for doses that fell due in the last few minutes
/// - appointment reminder emails for confirmed appointments in the next 24 hours
///
/// # Arguments
/// - `db`: Database connection
/// - `notifier`: Email sender shared with the request handlers
pub async fn start_scheduler(db: DatabaseConnection, notifier: Notifier) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let notifier = notifier.clone();

        Box::pin(async move {
            match ReminderService::new(&db, &notifier).send_due(Utc::now()).await {
                Ok(summary) => {
                    if summary.medicine_reminders > 0 || summary.appointment_reminders > 0 {
                        tracing::info!(
                            "Sent {} medicine and {} appointment reminders",
                            summary.medicine_reminders,
                            summary.appointment_reminders
                        );
                    }
                }
                Err(e) => tracing::error!("Error sending reminders: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Reminder scheduler started");

    Ok(())
}
