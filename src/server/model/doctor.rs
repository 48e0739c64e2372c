//! Doctor profile domain models and parameters.
//!
//! A doctor is a `User` with role `doctor` plus a `DoctorProfile` carrying practice
//! details, an approval status and weekly availability windows. Only approved profiles
//! are visible in the public listing and can be booked.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    model::doctor::{
        AvailabilityDto, DoctorProfileDto, DoctorSlotsDto, PaginatedDoctorsDto,
        UpsertDoctorProfileDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        util::time::{format_time, parse_request_time, parse_stored_time},
    },
};

/// Slot length used when a doctor does not choose one.
pub const DEFAULT_SLOT_MINUTES: i32 = 30;

/// Admin review state of a doctor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorStatus {
    Pending,
    Approved,
    Rejected,
}

impl DoctorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Pending => "pending",
            DoctorStatus::Approved => "approved",
            DoctorStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoctorStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(DoctorStatus::Pending),
            "approved" => Ok(DoctorStatus::Approved),
            "rejected" => Ok(DoctorStatus::Rejected),
            other => Err(InternalError::UnknownStoredValue {
                kind: "doctor status",
                value: other.to_string(),
            }),
        }
    }
}

/// Weekly window during which a doctor accepts appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// 0 = Monday through 6 = Sunday.
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Availability {
    /// Whether a slot `[start, end)` on this window's weekday fits inside the window.
    pub fn covers(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.start_time && end <= self.end_time && start < end
    }

    pub fn into_dto(self) -> AvailabilityDto {
        AvailabilityDto {
            weekday: self.weekday,
            start_time: format_time(self.start_time),
            end_time: format_time(self.end_time),
        }
    }

    pub fn from_entity(entity: entity::doctor_availability::Model) -> Result<Self, AppError> {
        Ok(Self {
            weekday: entity.weekday,
            start_time: parse_stored_time(&entity.start_time)?,
            end_time: parse_stored_time(&entity.end_time)?,
        })
    }
}

/// Practice details of a doctor, keyed by the doctor's user id.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorProfile {
    pub id: i32,
    pub user_id: i32,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: i32,
    /// Consultation fee in the smallest currency unit.
    pub fee: i32,
    pub about: Option<String>,
    pub clinic_address: Option<String>,
    /// Length of one appointment slot.
    pub slot_minutes: i32,
    pub status: DoctorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DoctorProfile {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(DoctorProfile)` - The converted profile
    /// - `Err(AppError::InternalErr(UnknownStoredValue))` - Stored status is not recognized
    pub fn from_entity(entity: entity::doctor_profile::Model) -> Result<Self, AppError> {
        let status = entity.status.parse::<DoctorStatus>()?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            specialization: entity.specialization,
            qualification: entity.qualification,
            experience_years: entity.experience_years,
            fee: entity.fee,
            about: entity.about,
            clinic_address: entity.clinic_address,
            slot_minutes: entity.slot_minutes,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Doctor profile joined with the owning account and weekly availability.
#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub name: String,
    pub email: String,
    pub profile: DoctorProfile,
    pub availability: Vec<Availability>,
    /// Mean rating over visible feedback, `None` when there is none.
    pub average_rating: Option<f64>,
}

impl Doctor {
    pub fn into_dto(self) -> DoctorProfileDto {
        DoctorProfileDto {
            doctor_id: self.profile.user_id,
            name: self.name,
            email: self.email,
            specialization: self.profile.specialization,
            qualification: self.profile.qualification,
            experience_years: self.profile.experience_years,
            fee: self.profile.fee,
            about: self.profile.about,
            clinic_address: self.profile.clinic_address,
            slot_minutes: self.profile.slot_minutes,
            status: self.profile.status.to_string(),
            availability: self
                .availability
                .into_iter()
                .map(Availability::into_dto)
                .collect(),
            average_rating: self.average_rating,
            created_at: self.profile.created_at,
        }
    }
}

/// Parameters for creating or replacing a doctor's own profile.
///
/// `availability` replaces every stored window.
#[derive(Debug, Clone)]
pub struct UpsertDoctorProfileParam {
    pub user_id: i32,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: i32,
    pub fee: i32,
    pub about: Option<String>,
    pub clinic_address: Option<String>,
    pub slot_minutes: i32,
    pub availability: Vec<Availability>,
}

impl UpsertDoctorProfileParam {
    /// Builds profile parameters from the request body, parsing window times.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - A window time is not `HH:MM`
    pub fn from_dto(user_id: i32, dto: UpsertDoctorProfileDto) -> Result<Self, AppError> {
        let availability = dto
            .availability
            .into_iter()
            .map(|window| {
                Ok(Availability {
                    weekday: window.weekday,
                    start_time: parse_request_time(&window.start_time)?,
                    end_time: parse_request_time(&window.end_time)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            user_id,
            specialization: dto.specialization,
            qualification: dto.qualification,
            experience_years: dto.experience_years,
            fee: dto.fee,
            about: dto.about,
            clinic_address: dto.clinic_address,
            slot_minutes: dto.slot_minutes.unwrap_or(DEFAULT_SLOT_MINUTES),
            availability,
        })
    }
}

/// Parameters for the public doctor listing.
#[derive(Debug, Clone)]
pub struct GetDoctorsParam {
    pub page: u64,
    pub per_page: u64,
    /// Case-insensitive substring match against specialization.
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedDoctors {
    pub doctors: Vec<Doctor>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedDoctors {
    pub fn into_dto(self) -> PaginatedDoctorsDto {
        PaginatedDoctorsDto {
            doctors: self.doctors.into_iter().map(Doctor::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Free appointment start times for one doctor on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorSlots {
    pub doctor_id: i32,
    pub date: NaiveDate,
    pub slot_minutes: i32,
    pub slots: Vec<NaiveTime>,
}

impl DoctorSlots {
    pub fn into_dto(self) -> DoctorSlotsDto {
        DoctorSlotsDto {
            doctor_id: self.doctor_id,
            date: self.date,
            slot_minutes: self.slot_minutes,
            slots: self.slots.into_iter().map(format_time).collect(),
        }
    }
}

/// Weekday index used by availability windows, 0 = Monday.
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_monday() as i32
}

/// Whether a slot starting at `start` fits one of the doctor's windows.
///
/// A doctor without any availability windows accepts any time.
pub fn fits_availability(availability: &[Availability], start: DateTime<Utc>, slot_minutes: i32) -> bool {
    if availability.is_empty() {
        return true;
    }

    let start_time = start.time();
    let (end_time, overflow) =
        start_time.overflowing_add_signed(Duration::minutes(slot_minutes as i64));
    if overflow != 0 {
        return false;
    }

    let weekday = weekday_index(start.date_naive());
    availability
        .iter()
        .filter(|w| w.weekday == weekday)
        .any(|w| w.covers(start_time, end_time))
}

/// Generates the free slots of a day.
///
/// Each window of the date's weekday is cut into consecutive `slot_minutes` slots.
/// Slots that start at or before `now` or lie within `slot_minutes` of a booked
/// appointment are dropped.
pub fn free_slots(
    availability: &[Availability],
    date: NaiveDate,
    slot_minutes: i32,
    booked: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> Vec<NaiveTime> {
    let step = Duration::minutes(slot_minutes as i64);
    if step <= Duration::zero() {
        return Vec::new();
    }

    let weekday = weekday_index(date);
    let mut slots = Vec::new();

    for window in availability.iter().filter(|w| w.weekday == weekday) {
        let window_end = Utc.from_utc_datetime(&date.and_time(window.end_time));
        let mut start = Utc.from_utc_datetime(&date.and_time(window.start_time));

        while start + step <= window_end {
            let taken = booked.iter().any(|b| (*b - start).abs() < step);
            if start > now && !taken {
                slots.push(start.time());
            }
            start += step;
        }
    }

    slots.sort();
    slots.dedup();
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    fn at(date: NaiveDate, value: &str) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_time(time(value)))
    }

    // 2030-01-07 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
    }

    fn morning() -> Vec<Availability> {
        vec![Availability {
            weekday: 0,
            start_time: time("09:00"),
            end_time: time("11:00"),
        }]
    }

    /// Expected: window cut into slots with booked and overlapping ones removed
    #[test]
    fn generates_free_slots() {
        let date = monday();
        let booked = vec![at(date, "09:30"), at(date, "10:15")];
        let now = at(date, "00:00") - Duration::days(1);

        let slots = free_slots(&morning(), date, 30, &booked, now);

        assert_eq!(slots, vec![time("09:00")]);
    }

    /// Expected: past slots are dropped, other weekdays have no slots
    #[test]
    fn skips_past_slots_and_other_days() {
        let date = monday();

        let slots = free_slots(&morning(), date, 60, &[], at(date, "09:00"));
        assert_eq!(slots, vec![time("10:00")]);

        let tuesday = date.succ_opt().unwrap();
        assert!(free_slots(&morning(), tuesday, 30, &[], at(date, "00:00")).is_empty());
    }

    /// Expected: slot must lie fully inside a window on the right weekday
    #[test]
    fn checks_slot_fits_availability() {
        let date = monday();

        assert!(fits_availability(&morning(), at(date, "09:00"), 30));
        assert!(fits_availability(&morning(), at(date, "10:30"), 30));
        assert!(!fits_availability(&morning(), at(date, "10:45"), 30));
        assert!(!fits_availability(&morning(), at(date, "08:30"), 30));
        assert!(!fits_availability(
            &morning(),
            at(date.succ_opt().unwrap(), "09:00"),
            30
        ));
        assert!(fits_availability(&[], at(date, "03:00"), 30));
    }
}
