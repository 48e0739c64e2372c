use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prescription_medicine")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub prescription_id: i32,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration_days: i32,
    pub instructions: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prescription::Entity",
        from = "Column::PrescriptionId",
        to = "super::prescription::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Prescription,
}

impl Related<super::prescription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prescription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
