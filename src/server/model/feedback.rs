//! Feedback domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::feedback::{DoctorFeedbackDto, FeedbackDto, PaginatedFeedbackDto};

/// Patient rating of a completed appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: i32,
    pub appointment_id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    /// 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
    /// Hidden entries are excluded from public listings and averages.
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn from_entity(entity: entity::feedback::Model) -> Self {
        Self {
            id: entity.id,
            appointment_id: entity.appointment_id,
            patient_id: entity.patient_id,
            doctor_id: entity.doctor_id,
            rating: entity.rating,
            comment: entity.comment,
            hidden: entity.hidden,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> FeedbackDto {
        FeedbackDto {
            id: self.id,
            appointment_id: self.appointment_id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            rating: self.rating,
            comment: self.comment,
            hidden: self.hidden,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFeedbackParam {
    pub appointment_id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Visible feedback for a doctor with aggregate rating.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorFeedback {
    pub doctor_id: i32,
    pub feedback: Vec<Feedback>,
}

impl DoctorFeedback {
    /// Mean rating across the listed feedback, `None` when empty.
    pub fn average_rating(&self) -> Option<f64> {
        average_rating(self.feedback.iter().map(|f| f.rating))
    }

    pub fn into_dto(self) -> DoctorFeedbackDto {
        DoctorFeedbackDto {
            doctor_id: self.doctor_id,
            average_rating: self.average_rating(),
            count: self.feedback.len() as u64,
            feedback: self.feedback.into_iter().map(Feedback::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedFeedback {
    pub feedback: Vec<Feedback>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedFeedback {
    pub fn into_dto(self) -> PaginatedFeedbackDto {
        PaginatedFeedbackDto {
            feedback: self.feedback.into_iter().map(Feedback::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Mean of the ratings rounded to two decimals, `None` for an empty input.
pub fn average_rating(ratings: impl IntoIterator<Item = i32>) -> Option<f64> {
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u64), |(sum, count), r| (sum + r as i64, count + 1));

    if count == 0 {
        return None;
    }

    let mean = sum as f64 / count as f64;
    Some((mean * 100.0).round() / 100.0)
}
