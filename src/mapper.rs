//! DTO to entity mapping.
//!
//! Each function returns an `ActiveModel`: columns the request supplies are
//! `Set`, everything else stays `Unchanged` (or `NotSet` for a new row), so
//! the store writes exactly what the request asked for.

use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveValue, IntoActiveModel, Value};

use crate::entities::medical_records;
use crate::models::{CreateMedicalRecord, DeleteMedicalRecord, UpdateMedicalRecord, status};

/// Build a new active record from a create request.
///
/// Status is forced to active and `creation_date` to `today`; the id is left
/// for the store to assign.
pub fn new_record(dto: CreateMedicalRecord, today: NaiveDate) -> medical_records::ActiveModel {
    medical_records::ActiveModel {
        medical_record_id: NotSet,
        file_id: set_present(dto.file_id),
        medical_record_type_id: set_present(dto.medical_record_type_id),
        status_id: Set(status::ACTIVE),
        diagnosis: set_present(dto.diagnosis),
        start_date: set_present(dto.start_date),
        end_date: Set(dto.end_date),
        audiometry: Set(dto.audiometry),
        position_change: Set(dto.position_change),
        execute_micros: Set(dto.execute_micros),
        execute_extra: Set(dto.execute_extra),
        voice_evaluation: Set(dto.voice_evaluation),
        disability: Set(dto.disability),
        area_change: Set(dto.area_change),
        disability_percentage: Set(dto.disability_percentage),
        mother_data: Set(dto.mother_data),
        father_data: Set(dto.father_data),
        other_family_data: Set(dto.other_family_data),
        medical_board: Set(dto.medical_board),
        observations: Set(dto.observations),
        created_by: set_present(dto.created_by),
        creation_date: Set(today),
        modified_by: Set(None),
        modification_date: Set(None),
        deleted_by: Set(None),
        deletion_date: Set(None),
        deletion_reason: Set(None),
    }
}

/// Overlay an update request onto an existing record.
///
/// Identity, creation audit, status and deletion columns are never touched.
pub fn apply_update(
    existing: medical_records::Model,
    dto: UpdateMedicalRecord,
    today: NaiveDate,
) -> medical_records::ActiveModel {
    let mut active = existing.into_active_model();

    if let Some(file_id) = dto.file_id {
        active.file_id = Set(file_id);
    }
    if let Some(diagnosis) = dto.diagnosis {
        active.diagnosis = Set(diagnosis);
    }
    if let Some(type_id) = dto.medical_record_type_id {
        active.medical_record_type_id = Set(type_id);
    }
    if let Some(start_date) = dto.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = dto.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(audiometry) = dto.audiometry {
        active.audiometry = Set(audiometry);
    }
    if let Some(position_change) = dto.position_change {
        active.position_change = Set(position_change);
    }
    if let Some(execute_micros) = dto.execute_micros {
        active.execute_micros = Set(execute_micros);
    }
    if let Some(execute_extra) = dto.execute_extra {
        active.execute_extra = Set(execute_extra);
    }
    if let Some(voice_evaluation) = dto.voice_evaluation {
        active.voice_evaluation = Set(voice_evaluation);
    }
    if let Some(disability) = dto.disability {
        active.disability = Set(disability);
    }
    if let Some(area_change) = dto.area_change {
        active.area_change = Set(area_change);
    }
    if let Some(percentage) = dto.disability_percentage {
        active.disability_percentage = Set(percentage);
    }
    if let Some(mother_data) = dto.mother_data {
        active.mother_data = Set(mother_data);
    }
    if let Some(father_data) = dto.father_data {
        active.father_data = Set(father_data);
    }
    if let Some(other_family_data) = dto.other_family_data {
        active.other_family_data = Set(other_family_data);
    }
    if let Some(medical_board) = dto.medical_board {
        active.medical_board = Set(medical_board);
    }
    if let Some(observations) = dto.observations {
        active.observations = Set(observations);
    }

    active.modified_by = Set(dto.modified_by);
    active.modification_date = Set(Some(today));
    active
}

/// Mark an existing record as deleted.
pub fn apply_delete(
    existing: medical_records::Model,
    dto: DeleteMedicalRecord,
    today: NaiveDate,
) -> medical_records::ActiveModel {
    let mut active = existing.into_active_model();
    active.status_id = Set(status::DELETED);
    active.deletion_date = Set(Some(today));
    active.deleted_by = Set(dto.deleted_by);
    active.deletion_reason = Set(dto.deletion_reason);
    active
}

fn set_present<T: Into<Value>>(value: Option<T>) -> ActiveValue<T> {
    value.map_or(NotSet, Set)
}
