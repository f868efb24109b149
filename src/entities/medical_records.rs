//! `t_medical_record` table: one medical-leave record per row.
//!
//! Rows are never removed; a soft delete moves `status_id` to
//! [`status::DELETED`](crate::models::status::DELETED) and fills the deletion columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "t_medical_record")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub medical_record_id: i32,
    pub file_id: i32,
    pub medical_record_type_id: i32,
    pub status_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub diagnosis: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub audiometry: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub position_change: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub execute_micros: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub execute_extra: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub voice_evaluation: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub disability: Option<bool>,
    #[serde(default, with = "crate::models::wire::yes_no")]
    pub area_change: Option<bool>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub disability_percentage: Option<Decimal>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub mother_data: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub father_data: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub other_family_data: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub medical_board: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub observations: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(2000))")]
    pub created_by: String,
    pub creation_date: Date,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub modified_by: Option<String>,
    pub modification_date: Option<Date>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub deleted_by: Option<String>,
    pub deletion_date: Option<Date>,
    #[sea_orm(column_type = "String(StringLen::N(2000))", nullable)]
    pub deletion_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::medical_record_types::Entity",
        from = "Column::MedicalRecordTypeId",
        to = "super::medical_record_types::Column::MedicalRecordTypeId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    MedicalRecordType,
    #[sea_orm(
        belongs_to = "super::statuses::Entity",
        from = "Column::StatusId",
        to = "super::statuses::Column::StatusId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Status,
}

impl Related<super::medical_record_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalRecordType.def()
    }
}

impl Related<super::statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.status_id == crate::models::status::DELETED
    }
}
