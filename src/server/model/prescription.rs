//! Prescription domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::prescription::{
    CreatePrescriptionDto, MedicineDto, PrescriptionDto, UpdatePrescriptionDto,
};

/// One medicine line on a prescription.
#[derive(Debug, Clone, PartialEq)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration_days: i32,
    pub instructions: Option<String>,
}

impl Medicine {
    pub fn from_entity(entity: entity::prescription_medicine::Model) -> Self {
        Self {
            name: entity.name,
            dosage: entity.dosage,
            frequency: entity.frequency,
            duration_days: entity.duration_days,
            instructions: entity.instructions,
        }
    }

    pub fn from_dto(dto: MedicineDto) -> Self {
        Self {
            name: dto.name,
            dosage: dto.dosage,
            frequency: dto.frequency,
            duration_days: dto.duration_days,
            instructions: dto.instructions,
        }
    }

    pub fn into_dto(self) -> MedicineDto {
        MedicineDto {
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency,
            duration_days: self.duration_days,
            instructions: self.instructions,
        }
    }
}

/// Prescription written by a doctor for one appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub id: i32,
    pub appointment_id: i32,
    /// Author of the prescription.
    pub doctor_id: i32,
    pub patient_id: i32,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medicines: Vec<Medicine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prescription {
    pub fn from_entity(
        entity: entity::prescription::Model,
        medicines: Vec<entity::prescription_medicine::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            appointment_id: entity.appointment_id,
            doctor_id: entity.doctor_id,
            patient_id: entity.patient_id,
            diagnosis: entity.diagnosis,
            notes: entity.notes,
            medicines: medicines.into_iter().map(Medicine::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PrescriptionDto {
        PrescriptionDto {
            id: self.id,
            appointment_id: self.appointment_id,
            doctor_id: self.doctor_id,
            patient_id: self.patient_id,
            diagnosis: self.diagnosis,
            notes: self.notes,
            medicines: self.medicines.into_iter().map(Medicine::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Prescription written by a doctor for one of their appointments.
#[derive(Debug, Clone)]
pub struct WritePrescriptionParam {
    pub doctor_id: i32,
    pub appointment_id: i32,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medicines: Vec<Medicine>,
}

impl WritePrescriptionParam {
    pub fn from_dto(doctor_id: i32, dto: CreatePrescriptionDto) -> Self {
        Self {
            doctor_id,
            appointment_id: dto.appointment_id,
            diagnosis: dto.diagnosis,
            notes: dto.notes,
            medicines: dto.medicines.into_iter().map(Medicine::from_dto).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePrescriptionParam {
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medicines: Vec<Medicine>,
}

/// Changes to an existing prescription; `medicines` replaces the full list when set.
#[derive(Debug, Clone, Default)]
pub struct UpdatePrescriptionParam {
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub medicines: Option<Vec<Medicine>>,
}

impl UpdatePrescriptionParam {
    pub fn from_dto(dto: UpdatePrescriptionDto) -> Self {
        Self {
            diagnosis: dto.diagnosis,
            notes: dto.notes,
            medicines: dto
                .medicines
                .map(|medicines| medicines.into_iter().map(Medicine::from_dto).collect()),
        }
    }
}
