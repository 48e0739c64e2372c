//! Medicine reminder domain models and parameters.
//!
//! A reminder fires once per configured dose time on each day between its start and
//! optional end date. The scheduler calls `due_dose` every minute; a dose counts as due
//! for a short window after its time so a missed tick does not drop it, and
//! `last_sent_at` prevents the same dose from being sent twice.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    model::reminder::{CreateReminderDto, ReminderDto},
    server::{
        error::AppError,
        util::time::{format_time, parse_request_time, parse_stored_time},
    },
};

/// Separator used to store dose times in a single column.
const TIMES_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq)]
pub struct MedicineReminder {
    pub id: i32,
    pub patient_id: i32,
    pub medicine_name: String,
    pub dosage: Option<String>,
    /// Dose times in UTC, sorted ascending.
    pub times: Vec<NaiveTime>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    /// When the most recent dose reminder was sent.
    pub last_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MedicineReminder {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(MedicineReminder)` - The converted reminder
    /// - `Err(AppError::InternalErr(ParseStoredTime))` - A stored dose time is malformed
    pub fn from_entity(entity: entity::medicine_reminder::Model) -> Result<Self, AppError> {
        let mut times = entity
            .times
            .split(TIMES_SEPARATOR)
            .filter(|t| !t.trim().is_empty())
            .map(|t| parse_stored_time(t.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        times.sort();

        Ok(Self {
            id: entity.id,
            patient_id: entity.patient_id,
            medicine_name: entity.medicine_name,
            dosage: entity.dosage,
            times,
            start_date: entity.start_date,
            end_date: entity.end_date,
            active: entity.active,
            last_sent_at: entity.last_sent_at,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ReminderDto {
        ReminderDto {
            id: self.id,
            medicine_name: self.medicine_name,
            dosage: self.dosage,
            times: self.times.into_iter().map(format_time).collect(),
            start_date: self.start_date,
            end_date: self.end_date,
            active: self.active,
            last_sent_at: self.last_sent_at,
            created_at: self.created_at,
        }
    }

    /// Whether the reminder runs on the given day.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Returns the most recent dose that is due at `now` and has not been sent yet.
    ///
    /// A dose at time `t` is due when `t <= now`, `now - t <= window` and the last sent
    /// dose is older than `t`. Doses from the previous day are considered so a dose
    /// just before midnight is not lost.
    pub fn due_dose(&self, now: DateTime<Utc>, window: Duration) -> Option<DateTime<Utc>> {
        if !self.active {
            return None;
        }

        let today = now.date_naive();
        let days = [today.pred_opt(), Some(today)];

        days.into_iter()
            .flatten()
            .filter(|date| self.is_scheduled_on(*date))
            .flat_map(|date| {
                self.times
                    .iter()
                    .map(move |time| Utc.from_utc_datetime(&date.and_time(*time)))
            })
            .filter(|dose| *dose <= now && now - *dose <= window)
            .filter(|dose| self.last_sent_at.is_none_or(|sent| sent < *dose))
            .max()
    }
}

/// Serializes dose times for storage.
pub fn join_times(times: &[NaiveTime]) -> String {
    times
        .iter()
        .map(|t| format_time(*t))
        .collect::<Vec<_>>()
        .join(&TIMES_SEPARATOR.to_string())
}

#[derive(Debug, Clone)]
pub struct CreateReminderParam {
    pub patient_id: i32,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub times: Vec<NaiveTime>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl CreateReminderParam {
    /// Builds reminder parameters from the request body.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - A dose time is not `HH:MM`
    pub fn from_dto(patient_id: i32, dto: CreateReminderDto) -> Result<Self, AppError> {
        let times = dto
            .times
            .iter()
            .map(|t| parse_request_time(t))
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            patient_id,
            medicine_name: dto.medicine_name,
            dosage: dto.dosage,
            times,
            start_date: dto.start_date,
            end_date: dto.end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(times: &[&str], last_sent_at: Option<DateTime<Utc>>) -> MedicineReminder {
        MedicineReminder {
            id: 1,
            patient_id: 1,
            medicine_name: "Vitamin D".to_string(),
            dosage: None,
            times: times
                .iter()
                .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap())
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2030, 1, 31).unwrap()),
            active: true,
            last_sent_at,
            created_at: Utc::now(),
        }
    }

    fn at(date: &str, time: &str) -> DateTime<Utc> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let time = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        Utc.from_utc_datetime(&date.and_time(time))
    }

    /// Expected: a dose is due within the window after its time and not before it
    #[test]
    fn dose_due_within_window() {
        let window = Duration::minutes(5);
        let r = reminder(&["08:00", "20:00"], None);

        assert_eq!(r.due_dose(at("2030-01-10", "07:59"), window), None);
        assert_eq!(
            r.due_dose(at("2030-01-10", "08:00"), window),
            Some(at("2030-01-10", "08:00"))
        );
        assert_eq!(
            r.due_dose(at("2030-01-10", "08:04"), window),
            Some(at("2030-01-10", "08:00"))
        );
        assert_eq!(r.due_dose(at("2030-01-10", "08:06"), window), None);
    }

    /// Expected: a dose already sent is not due again
    #[test]
    fn sent_dose_is_not_repeated() {
        let window = Duration::minutes(5);
        let r = reminder(&["08:00"], Some(at("2030-01-10", "08:00")));

        assert_eq!(r.due_dose(at("2030-01-10", "08:02"), window), None);
        assert_eq!(
            r.due_dose(at("2030-01-11", "08:01"), window),
            Some(at("2030-01-11", "08:00"))
        );
    }

    /// Expected: nothing is due outside the date range or when inactive
    #[test]
    fn respects_date_range_and_active_flag() {
        let window = Duration::minutes(5);
        let mut r = reminder(&["08:00"], None);

        assert_eq!(r.due_dose(at("2029-12-31", "08:01"), window), None);
        assert_eq!(r.due_dose(at("2030-02-01", "08:01"), window), None);

        r.active = false;
        assert_eq!(r.due_dose(at("2030-01-10", "08:01"), window), None);
    }

    /// Expected: a dose just before midnight is still due just after midnight
    #[test]
    fn dose_before_midnight_carries_over() {
        let r = reminder(&["23:58"], None);

        assert_eq!(
            r.due_dose(at("2030-01-11", "00:01"), Duration::minutes(5)),
            Some(at("2030-01-10", "23:58"))
        );
    }

    /// Expected: times serialize as a comma separated HH:MM list
    #[test]
    fn joins_times() {
        let r = reminder(&["08:00", "20:30"], None);
        assert_eq!(join_times(&r.times), "08:00,20:30");
    }
}
