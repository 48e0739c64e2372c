//! Doctor profile service.
//!
//! Doctors maintain their own profile and weekly availability. Patients browse approved
//! profiles and the free slots generated from availability minus existing bookings.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        appointment::AppointmentRepository, doctor::DoctorRepository,
        feedback::FeedbackRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        doctor::{
            free_slots, Doctor, DoctorProfile, DoctorSlots, DoctorStatus, GetDoctorsParam,
            PaginatedDoctors, UpsertDoctorProfileParam,
        },
        feedback::average_rating,
        total_pages,
    },
};

pub const MIN_SLOT_MINUTES: i32 = 5;
pub const MAX_SLOT_MINUTES: i32 = 240;

pub struct DoctorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DoctorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or updates the calling doctor's profile.
    ///
    /// # Returns
    /// - `Ok(Doctor)` - Stored profile with availability
    /// - `Err(AppError::BadRequest)` - A field failed validation
    pub async fn upsert_profile(&self, mut param: UpsertDoctorProfileParam) -> Result<Doctor, AppError> {
        param.specialization = param.specialization.trim().to_string();
        param.qualification = param.qualification.trim().to_string();
        validate_profile(&param)?;

        let user_id = param.user_id;
        let profile = DoctorRepository::new(self.db).upsert_profile(param).await?;

        tracing::info!("Doctor {} saved profile ({})", user_id, profile.status);

        self.load_details(profile).await
    }

    /// Gets the calling doctor's own profile regardless of approval state.
    ///
    /// # Returns
    /// - `Ok(Doctor)` - Profile found
    /// - `Err(AppError::NotFound)` - Profile not created yet
    pub async fn get_own_profile(&self, user_id: i32) -> Result<Doctor, AppError> {
        let profile = DoctorRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor profile not found".to_string()))?;

        self.load_details(profile).await
    }

    /// Gets an approved doctor's public profile.
    ///
    /// # Returns
    /// - `Ok(Doctor)` - Approved profile
    /// - `Err(AppError::NotFound)` - No profile, or the profile is not approved
    pub async fn get_doctor(&self, doctor_id: i32) -> Result<Doctor, AppError> {
        let profile = self.get_approved_profile(doctor_id).await?;

        self.load_details(profile).await
    }

    /// Lists approved doctors with an optional specialization filter.
    pub async fn list_doctors(&self, param: GetDoctorsParam) -> Result<PaginatedDoctors, AppError> {
        let specialization = param
            .specialization
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let (profiles, total) = DoctorRepository::new(self.db)
            .get_approved_paginated(param.page, param.per_page, specialization)
            .await?;

        let doctors = self.load_many_details(profiles).await?;

        Ok(PaginatedDoctors {
            doctors,
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages: total_pages(total, param.per_page),
        })
    }

    /// Computes the free slots of an approved doctor on a date.
    ///
    /// # Returns
    /// - `Ok(DoctorSlots)` - Free slot start times, possibly empty
    /// - `Err(AppError::NotFound)` - Doctor not found or not approved
    pub async fn get_free_slots(
        &self,
        doctor_id: i32,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DoctorSlots, AppError> {
        let profile = self.get_approved_profile(doctor_id).await?;
        let availability = DoctorRepository::new(self.db)
            .get_availability(doctor_id)
            .await?;

        let slot = Duration::minutes(profile.slot_minutes as i64);
        let day_start = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
        let booked = AppointmentRepository::new(self.db)
            .get_booked_times(doctor_id, day_start - slot, day_start + Duration::days(1) + slot)
            .await?;

        Ok(DoctorSlots {
            doctor_id,
            date,
            slot_minutes: profile.slot_minutes,
            slots: free_slots(&availability, date, profile.slot_minutes, &booked, now),
        })
    }

    /// Gets a doctor's profile if it is approved.
    ///
    /// Used by booking to reject unknown or unapproved doctors with the same 404.
    pub async fn get_approved_profile(&self, doctor_id: i32) -> Result<DoctorProfile, AppError> {
        DoctorRepository::new(self.db)
            .find_by_user_id(doctor_id)
            .await?
            .filter(|p| p.status == DoctorStatus::Approved)
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))
    }

    async fn load_details(&self, profile: DoctorProfile) -> Result<Doctor, AppError> {
        let mut doctors = self.load_many_details(vec![profile]).await?;

        doctors
            .pop()
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))
    }

    /// Joins profiles with account details, availability and visible rating.
    ///
    /// Profiles whose account has disappeared are skipped.
    pub async fn load_many_details(&self, profiles: Vec<DoctorProfile>) -> Result<Vec<Doctor>, AppError> {
        let ids: Vec<i32> = profiles.iter().map(|p| p.user_id).collect();
        let mut users = UserRepository::new(self.db).find_by_ids(&ids).await?;
        let mut ratings = FeedbackRepository::new(self.db)
            .get_visible_ratings(&ids)
            .await?;
        let doctor_repo = DoctorRepository::new(self.db);

        let mut doctors = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let Some(user) = users.remove(&profile.user_id) else {
                continue;
            };
            let availability = doctor_repo.get_availability(profile.user_id).await?;
            let average_rating = average_rating(ratings.remove(&profile.user_id).unwrap_or_default());

            doctors.push(Doctor {
                name: user.name,
                email: user.email,
                profile,
                availability,
                average_rating,
            });
        }

        Ok(doctors)
    }
}

fn validate_profile(param: &UpsertDoctorProfileParam) -> Result<(), AppError> {
    if param.specialization.is_empty() {
        return Err(AppError::BadRequest("Specialization is required".to_string()));
    }
    if param.qualification.is_empty() {
        return Err(AppError::BadRequest("Qualification is required".to_string()));
    }
    if param.fee < 0 {
        return Err(AppError::BadRequest("Fee cannot be negative".to_string()));
    }
    if param.experience_years < 0 {
        return Err(AppError::BadRequest(
            "Experience cannot be negative".to_string(),
        ));
    }
    if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&param.slot_minutes) {
        return Err(AppError::BadRequest(format!(
            "Slot length must be between {} and {} minutes",
            MIN_SLOT_MINUTES, MAX_SLOT_MINUTES
        )));
    }
    for window in &param.availability {
        if !(0..=6).contains(&window.weekday) {
            return Err(AppError::BadRequest(
                "Weekday must be between 0 (Monday) and 6 (Sunday)".to_string(),
            ));
        }
        if window.start_time >= window.end_time {
            return Err(AppError::BadRequest(
                "Availability start must be before its end".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::doctor::Availability;
    use chrono::{Datelike, NaiveTime};
    use test_utils::{builder::TestBuilder, factory};

    fn param(user_id: i32) -> UpsertDoctorProfileParam {
        UpsertDoctorProfileParam {
            user_id,
            specialization: " Cardiology ".to_string(),
            qualification: "MD".to_string(),
            experience_years: 10,
            fee: 800,
            about: None,
            clinic_address: None,
            slot_minutes: 30,
            availability: vec![Availability {
                weekday: 1,
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            }],
        }
    }

    /// Tests profile validation.
    ///
    /// Expected: Err(BadRequest) for out-of-range slot, negative fee and inverted window
    #[tokio::test]
    async fn rejects_invalid_profiles() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_doctor_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::create_doctor_user(db).await?;
        let service = DoctorService::new(db);

        let mut slot = param(user.id);
        slot.slot_minutes = 1;
        assert!(matches!(service.upsert_profile(slot).await, Err(AppError::BadRequest(_))));

        let mut fee = param(user.id);
        fee.fee = -1;
        assert!(matches!(service.upsert_profile(fee).await, Err(AppError::BadRequest(_))));

        let mut window = param(user.id);
        window.availability[0].end_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert!(matches!(service.upsert_profile(window).await, Err(AppError::BadRequest(_))));

        let mut weekday = param(user.id);
        weekday.availability[0].weekday = 7;
        assert!(matches!(service.upsert_profile(weekday).await, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests that a fresh profile is hidden from the public until approved.
    ///
    /// Expected: own profile visible, public lookup Err(NotFound) while pending
    #[tokio::test]
    async fn pending_profile_is_not_public() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::create_doctor_user(db).await?;
        let service = DoctorService::new(db);

        let doctor = service.upsert_profile(param(user.id)).await?;
        assert_eq!(doctor.profile.specialization, "Cardiology");
        assert_eq!(doctor.profile.status, DoctorStatus::Pending);

        assert!(service.get_own_profile(user.id).await.is_ok());
        assert!(matches!(service.get_doctor(user.id).await, Err(AppError::NotFound(_))));

        Ok(())
    }

    /// Tests the public detail view with rating.
    ///
    /// Expected: Ok with availability and the visible average rating
    #[tokio::test]
    async fn public_profile_includes_rating() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let patient = factory::create_patient(db).await?;
        let (doctor, _) = factory::doctor::DoctorFactory::new(db)
            .availability(0, "09:00", "17:00")
            .build()
            .await?;
        let first =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        let second =
            factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        factory::feedback::create_feedback(db, &first, 4).await?;
        factory::feedback::create_feedback(db, &second, 5).await?;

        let details = DoctorService::new(db).get_doctor(doctor.id).await?;

        assert_eq!(details.name, doctor.name);
        assert_eq!(details.availability.len(), 1);
        assert_eq!(details.average_rating, Some(4.5));

        Ok(())
    }

    /// Tests slot generation against the database.
    ///
    /// Expected: booked slot excluded from the returned slots
    #[tokio::test]
    async fn free_slots_exclude_bookings() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let date = Utc::now().date_naive() + Duration::days(7);
        let weekday = date.weekday().num_days_from_monday() as i32;
        let patient = factory::create_patient(db).await?;
        let (doctor, _) = factory::doctor::DoctorFactory::new(db)
            .slot_minutes(30)
            .availability(weekday, "09:00", "10:30")
            .build()
            .await?;
        factory::appointment::AppointmentFactory::new(db, patient.id, doctor.id)
            .scheduled_at(Utc.from_utc_datetime(
                &date.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            ))
            .build()
            .await?;

        let slots = DoctorService::new(db)
            .get_free_slots(doctor.id, date, Utc::now())
            .await?;

        let expected: Vec<NaiveTime> = ["09:00", "10:00"]
            .iter()
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap())
            .collect();
        assert_eq!(slots.slots, expected);

        Ok(())
    }
}
