use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub scheduled_at: DateTimeUtc,
    /// One of `online` or `offline`.
    pub mode: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    /// One of `pending`, `confirmed`, `completed` or `cancelled`.
    pub status: String,
    pub fee: i32,
    /// One of `unpaid` or `paid`.
    pub payment_status: String,
    pub checkout_session_id: Option<String>,
    pub reminder_sent: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PatientId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Patient,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DoctorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Doctor,
    #[sea_orm(has_one = "super::prescription::Entity")]
    Prescription,
    #[sea_orm(has_one = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::prescription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prescription.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
