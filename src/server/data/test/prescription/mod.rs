use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::prescription::PrescriptionRepository,
    error::AppError,
    model::prescription::{CreatePrescriptionParam, Medicine, UpdatePrescriptionParam},
};

mod create;
mod update;

fn medicine(name: &str) -> Medicine {
    Medicine {
        name: name.to_string(),
        dosage: "10mg".to_string(),
        frequency: "Once a day".to_string(),
        duration_days: 7,
        instructions: Some("After food".to_string()),
    }
}
