//! Medical record DTOs for create, update, delete and filter operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire::{present, yes_no, yes_no_patch};

/// DTO for creating a medical record.
///
/// Required fields are still `Option` so that a missing value is reported
/// by validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateMedicalRecord {
    pub file_id: Option<i32>,
    pub diagnosis: Option<String>,
    pub medical_record_type_id: Option<i32>,
    pub created_by: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(with = "yes_no")]
    pub audiometry: Option<bool>,
    #[serde(with = "yes_no")]
    pub position_change: Option<bool>,
    #[serde(with = "yes_no")]
    pub execute_micros: Option<bool>,
    #[serde(with = "yes_no")]
    pub execute_extra: Option<bool>,
    #[serde(with = "yes_no")]
    pub voice_evaluation: Option<bool>,
    #[serde(with = "yes_no")]
    pub disability: Option<bool>,
    #[serde(with = "yes_no")]
    pub area_change: Option<bool>,
    /// Written as a JSON number; read from a number or a string.
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub disability_percentage: Option<Decimal>,
    pub mother_data: Option<String>,
    pub father_data: Option<String>,
    pub other_family_data: Option<String>,
    pub medical_board: Option<String>,
    pub observations: Option<String>,
}

/// DTO for updating a medical record.
///
/// Non-nullable columns use `Option<T>` (absent = keep). Nullable columns use
/// `Option<Option<T>>`: `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateMedicalRecord {
    pub medical_record_id: Option<i32>,
    pub modified_by: Option<String>,
    pub file_id: Option<i32>,
    pub diagnosis: Option<String>,
    pub medical_record_type_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "present")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub audiometry: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub position_change: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub execute_micros: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub execute_extra: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub voice_evaluation: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub disability: Option<Option<bool>>,
    #[serde(deserialize_with = "yes_no_patch::deserialize")]
    pub area_change: Option<Option<bool>>,
    #[serde(deserialize_with = "present")]
    pub disability_percentage: Option<Option<Decimal>>,
    #[serde(deserialize_with = "present")]
    pub mother_data: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub father_data: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub other_family_data: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub medical_board: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub observations: Option<Option<String>>,
}

/// DTO for soft-deleting a medical record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteMedicalRecord {
    pub medical_record_id: Option<i32>,
    pub deletion_reason: Option<String>,
    pub deleted_by: Option<String>,
}

/// Filter and pagination window for listing medical records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalRecordFilter {
    pub status_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub medical_record_type_id: Option<i32>,
    /// 1-based page number.
    pub page: Option<i32>,
    pub page_size: Option<i32>,
}

/// Status constants matching the seeded `status` rows.
pub mod status {
    /// Record is live.
    pub const ACTIVE: i32 = 1;
    /// Record was soft-deleted.
    pub const DELETED: i32 = 2;
}
