use chrono::NaiveTime;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::doctor::DoctorRepository,
    error::AppError,
    model::doctor::{Availability, DoctorStatus, UpsertDoctorProfileParam},
};

mod get_approved_paginated;
mod set_status;
mod upsert_profile;

fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

fn profile_param(user_id: i32, specialization: &str) -> UpsertDoctorProfileParam {
    UpsertDoctorProfileParam {
        user_id,
        specialization: specialization.to_string(),
        qualification: "MBBS, MD".to_string(),
        experience_years: 8,
        fee: 700,
        about: None,
        clinic_address: Some("12 Clinic Road".to_string()),
        slot_minutes: 20,
        availability: vec![Availability {
            weekday: 0,
            start_time: time("09:00"),
            end_time: time("12:00"),
        }],
    }
}
