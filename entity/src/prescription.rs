use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prescription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    #[sea_orm(column_type = "Text")]
    pub diagnosis: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::appointment::Entity",
        from = "Column::AppointmentId",
        to = "super::appointment::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Appointment,
    #[sea_orm(has_many = "super::prescription_medicine::Entity")]
    PrescriptionMedicine,
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl Related<super::prescription_medicine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrescriptionMedicine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
