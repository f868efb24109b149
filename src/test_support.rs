//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::entities::medical_records;
use crate::models::status;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An active record starting 2024-01-01 with no end date.
pub(crate) fn sample_record(id: i32) -> medical_records::Model {
    medical_records::Model {
        medical_record_id: id,
        file_id: 100 + id,
        medical_record_type_id: 1,
        status_id: status::ACTIVE,
        diagnosis: format!("diagnosis {id}"),
        start_date: date(2024, 1, 1),
        end_date: None,
        audiometry: Some(false),
        position_change: None,
        execute_micros: None,
        execute_extra: None,
        voice_evaluation: None,
        disability: None,
        area_change: None,
        disability_percentage: None,
        mother_data: None,
        father_data: None,
        other_family_data: None,
        medical_board: None,
        observations: None,
        created_by: "bob".to_string(),
        creation_date: date(2024, 1, 2),
        modified_by: None,
        modification_date: None,
        deleted_by: None,
        deletion_date: None,
        deletion_reason: None,
    }
}
