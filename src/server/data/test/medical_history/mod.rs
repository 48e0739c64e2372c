use chrono::NaiveDate;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::medical_history::MedicalHistoryRepository,
    error::AppError,
    model::medical_history::{CreateMedicalHistoryParam, UpdateMedicalHistoryParam},
};

mod crud;
