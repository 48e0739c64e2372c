//! Medical history domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::medical_history::{
    CreateMedicalHistoryDto, MedicalHistoryDto, UpdateMedicalHistoryDto,
};

/// Self-reported condition on a patient's record.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalHistory {
    pub id: i32,
    pub patient_id: i32,
    pub condition: String,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MedicalHistory {
    pub fn from_entity(entity: entity::medical_history::Model) -> Self {
        Self {
            id: entity.id,
            patient_id: entity.patient_id,
            condition: entity.condition,
            diagnosed_on: entity.diagnosed_on,
            medications: entity.medications,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MedicalHistoryDto {
        MedicalHistoryDto {
            id: self.id,
            patient_id: self.patient_id,
            condition: self.condition,
            diagnosed_on: self.diagnosed_on,
            medications: self.medications,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMedicalHistoryParam {
    pub patient_id: i32,
    pub condition: String,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
}

/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateMedicalHistoryParam {
    pub condition: Option<String>,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
}

impl CreateMedicalHistoryParam {
    pub fn from_dto(patient_id: i32, dto: CreateMedicalHistoryDto) -> Self {
        Self {
            patient_id,
            condition: dto.condition,
            diagnosed_on: dto.diagnosed_on,
            medications: dto.medications,
            notes: dto.notes,
        }
    }
}

impl UpdateMedicalHistoryParam {
    pub fn from_dto(dto: UpdateMedicalHistoryDto) -> Self {
        Self {
            condition: dto.condition,
            diagnosed_on: dto.diagnosed_on,
            medications: dto.medications,
            notes: dto.notes,
        }
    }
}
