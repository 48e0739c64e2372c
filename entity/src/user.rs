use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// One of `patient`, `doctor` or `admin`.
    pub role: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::doctor_profile::Entity")]
    DoctorProfile,
    #[sea_orm(has_many = "super::medical_history::Entity")]
    MedicalHistory,
    #[sea_orm(has_many = "super::medicine_reminder::Entity")]
    MedicineReminder,
}

impl Related<super::doctor_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DoctorProfile.def()
    }
}

impl Related<super::medical_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalHistory.def()
    }
}

impl Related<super::medicine_reminder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicineReminder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
