//! Rule sets for the medical record DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Lookups, Rules, ValidationErrors};
use crate::entities::medical_records;
use crate::models::{CreateMedicalRecord, DeleteMedicalRecord, MedicalRecordFilter, UpdateMedicalRecord};

pub const DIAGNOSIS_MAX_LEN: usize = 100;
pub const MEDICAL_BOARD_MAX_LEN: usize = 200;
pub const TEXT_MAX_LEN: usize = 2000;
/// Width of the `created_by` / `modified_by` / `deleted_by` columns.
pub const USER_MAX_LEN: usize = 2000;

/// Validate a create request.
pub fn validate_create(dto: &CreateMedicalRecord, today: NaiveDate, lookups: &Lookups) -> ValidationErrors {
    let mut rules = Rules::default();

    if let Some(file_id) = rules.required("fileId", &dto.file_id) {
        rules.positive("fileId", *file_id);
    }
    if let Some(diagnosis) = rules.required_text("diagnosis", &dto.diagnosis) {
        rules.max_len("diagnosis", diagnosis, DIAGNOSIS_MAX_LEN);
    }
    if let Some(type_id) = rules.required("medicalRecordTypeId", &dto.medical_record_type_id) {
        rules.member("medicalRecordTypeId", *type_id, &lookups.record_type_ids);
    }
    if let Some(created_by) = rules.required_text("createdBy", &dto.created_by) {
        rules.max_len("createdBy", created_by, USER_MAX_LEN);
    }
    if let Some(start) = rules.required("startDate", &dto.start_date) {
        start_date_rules(&mut rules, *start, dto.end_date, today);
    }

    rules.max_len_opt("motherData", dto.mother_data.as_deref(), TEXT_MAX_LEN);
    rules.max_len_opt("fatherData", dto.father_data.as_deref(), TEXT_MAX_LEN);
    rules.max_len_opt("otherFamilyData", dto.other_family_data.as_deref(), TEXT_MAX_LEN);
    rules.max_len_opt("medicalBoard", dto.medical_board.as_deref(), MEDICAL_BOARD_MAX_LEN);
    rules.max_len_opt("observations", dto.observations.as_deref(), TEXT_MAX_LEN);

    observations_rules(&mut rules, dto.position_change, dto.observations.as_deref());
    disability_rules(&mut rules, dto.disability, dto.disability_percentage);

    rules.finish()
}

/// Validate an update request.
///
/// Only fields present in the request are checked. The conditional flag
/// rules depend on stored values too, so they run on the merged record in
/// [`validate_record`].
pub fn validate_update(dto: &UpdateMedicalRecord, today: NaiveDate, lookups: &Lookups) -> ValidationErrors {
    let mut rules = Rules::default();

    if let Some(id) = rules.required("medicalRecordId", &dto.medical_record_id) {
        rules.positive("medicalRecordId", *id);
    }
    if let Some(modified_by) = rules.required_text("modifiedBy", &dto.modified_by) {
        rules.max_len("modifiedBy", modified_by, USER_MAX_LEN);
    }
    if let Some(file_id) = dto.file_id {
        rules.positive("fileId", file_id);
    }
    if let Some(diagnosis) = &dto.diagnosis {
        rules.check(!diagnosis.trim().is_empty(), "diagnosis", "diagnosis must not be empty");
        rules.max_len("diagnosis", diagnosis, DIAGNOSIS_MAX_LEN);
    }
    if let Some(type_id) = dto.medical_record_type_id {
        rules.member("medicalRecordTypeId", type_id, &lookups.record_type_ids);
    }
    if let Some(start) = dto.start_date {
        start_date_rules(&mut rules, start, dto.end_date.flatten(), today);
    }

    rules.max_len_opt("motherData", dto.mother_data.as_ref().and_then(|v| v.as_deref()), TEXT_MAX_LEN);
    rules.max_len_opt("fatherData", dto.father_data.as_ref().and_then(|v| v.as_deref()), TEXT_MAX_LEN);
    rules.max_len_opt(
        "otherFamilyData",
        dto.other_family_data.as_ref().and_then(|v| v.as_deref()),
        TEXT_MAX_LEN,
    );
    rules.max_len_opt(
        "medicalBoard",
        dto.medical_board.as_ref().and_then(|v| v.as_deref()),
        MEDICAL_BOARD_MAX_LEN,
    );
    let observations = dto.observations.as_ref().and_then(|v| v.as_deref());
    rules.max_len_opt("observations", observations, TEXT_MAX_LEN);

    if let Some(Some(percentage)) = dto.disability_percentage {
        percentage_range(&mut rules, percentage);
    }

    rules.finish()
}

/// Validate a soft-delete request.
pub fn validate_delete(dto: &DeleteMedicalRecord) -> ValidationErrors {
    let mut rules = Rules::default();

    if let Some(id) = rules.required("medicalRecordId", &dto.medical_record_id) {
        rules.positive("medicalRecordId", *id);
    }
    if let Some(reason) = rules.required_text("deletionReason", &dto.deletion_reason) {
        rules.max_len("deletionReason", reason, TEXT_MAX_LEN);
    }
    if let Some(deleted_by) = rules.required_text("deletedBy", &dto.deleted_by) {
        rules.max_len("deletedBy", deleted_by, USER_MAX_LEN);
    }

    rules.finish()
}

/// Validate a filter/pagination request.
pub fn validate_filter(
    dto: &MedicalRecordFilter,
    today: NaiveDate,
    lookups: &Lookups,
    max_page_size: i32,
) -> ValidationErrors {
    let mut rules = Rules::default();

    if let Some(status_id) = dto.status_id {
        rules.member("statusId", status_id, &lookups.status_ids);
    }
    if let Some(start) = dto.start_date {
        rules.check(start <= today, "startDate", "startDate cannot be a future date");
        if let Some(end) = dto.end_date {
            rules.check(start <= end, "startDate", "startDate cannot be later than endDate");
        }
    }
    if let Some(end) = dto.end_date {
        rules.check(end <= today, "endDate", "endDate cannot be a future date");
    }
    if let Some(type_id) = dto.medical_record_type_id {
        rules.member("medicalRecordTypeId", type_id, &lookups.record_type_ids);
    }
    if let Some(page) = rules.required("page", &dto.page) {
        rules.check(*page >= 1, "page", "page must be at least 1");
    }
    if let Some(page_size) = rules.required("pageSize", &dto.page_size) {
        rules.check(*page_size > 0, "pageSize", "pageSize must be higher than 0");
        rules.check(
            *page_size <= max_page_size,
            "pageSize",
            format!("pageSize cannot exceed {max_page_size}"),
        );
    }

    rules.finish()
}

/// Validate a record id taken from a path or argument.
pub fn validate_id(id: i32) -> ValidationErrors {
    let mut rules = Rules::default();
    rules.positive("medicalRecordId", id);
    rules.finish()
}

/// Cross-field invariants of a stored record.
///
/// Run on the merged result of an update, where the request alone cannot
/// see the values it leaves untouched.
pub fn validate_record(record: &medical_records::Model) -> ValidationErrors {
    let mut rules = Rules::default();

    if let Some(end) = record.end_date {
        rules.check(
            record.start_date <= end,
            "startDate",
            "startDate cannot be later than endDate",
        );
    }
    observations_rules(&mut rules, record.position_change, record.observations.as_deref());
    disability_rules(&mut rules, record.disability, record.disability_percentage);

    rules.finish()
}

fn start_date_rules(rules: &mut Rules, start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) {
    rules.check(start <= today, "startDate", "startDate cannot be a future date");
    if let Some(end) = end {
        rules.check(start <= end, "startDate", "startDate cannot be later than endDate");
    }
}

/// `observations` is mandatory when the employee changes position.
fn observations_rules(rules: &mut Rules, position_change: Option<bool>, observations: Option<&str>) {
    if position_change != Some(true) {
        return;
    }
    match observations {
        None => rules.check(false, "observations", "observations must not be null when positionChange is Y"),
        Some(text) => rules.check(
            !text.trim().is_empty(),
            "observations",
            "observations must not be empty when positionChange is Y",
        ),
    }
}

/// `disabilityPercentage` is required with a disability and forbidden without one.
fn disability_rules(rules: &mut Rules, disability: Option<bool>, percentage: Option<Decimal>) {
    match (disability, percentage) {
        (Some(true), Some(percentage)) => percentage_range(rules, percentage),
        (Some(true), None) => rules.check(
            false,
            "disabilityPercentage",
            "disabilityPercentage must not be null when disability is Y",
        ),
        (_, Some(_)) => rules.check(
            false,
            "disabilityPercentage",
            "disabilityPercentage must be empty unless disability is Y",
        ),
        (_, None) => {}
    }
}

fn percentage_range(rules: &mut Rules, percentage: Decimal) {
    rules.check(
        percentage > Decimal::ZERO,
        "disabilityPercentage",
        "disabilityPercentage must be higher than 0",
    );
    rules.check(
        percentage <= Decimal::ONE_HUNDRED,
        "disabilityPercentage",
        "disabilityPercentage must be less than or equal to 100",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minimal_create() -> CreateMedicalRecord {
        CreateMedicalRecord {
            file_id: Some(10),
            diagnosis: Some("flu".to_string()),
            medical_record_type_id: Some(1),
            created_by: Some("bob".to_string()),
            start_date: Some(date(2024, 1, 1)),
            ..Default::default()
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_minimal_create_is_valid() {
        let errors = validate_create(&minimal_create(), today(), &Lookups::seeded());
        assert!(errors.is_valid(), "{errors}");
    }

    #[test]
    fn test_create_collects_every_missing_field() {
        let errors = validate_create(&CreateMedicalRecord::default(), today(), &Lookups::seeded());
        assert_eq!(
            fields(&errors),
            vec!["fileId", "diagnosis", "medicalRecordTypeId", "createdBy", "startDate"]
        );
    }

    #[test]
    fn test_create_rejects_out_of_range_values() {
        let dto = CreateMedicalRecord {
            file_id: Some(0),
            diagnosis: Some("x".repeat(DIAGNOSIS_MAX_LEN + 1)),
            medical_record_type_id: Some(3),
            created_by: Some("u".repeat(USER_MAX_LEN + 1)),
            mother_data: Some("m".repeat(TEXT_MAX_LEN + 1)),
            father_data: Some("f".repeat(TEXT_MAX_LEN + 1)),
            other_family_data: Some("r".repeat(TEXT_MAX_LEN + 1)),
            medical_board: Some("b".repeat(MEDICAL_BOARD_MAX_LEN + 1)),
            observations: Some("o".repeat(TEXT_MAX_LEN + 1)),
            ..minimal_create()
        };
        let errors = validate_create(&dto, today(), &Lookups::seeded());
        assert_eq!(
            fields(&errors),
            vec![
                "fileId",
                "diagnosis",
                "medicalRecordTypeId",
                "createdBy",
                "motherData",
                "fatherData",
                "otherFamilyData",
                "medicalBoard",
                "observations"
            ]
        );
    }

    #[test]
    fn test_record_type_membership_follows_lookups() {
        let dto = CreateMedicalRecord {
            medical_record_type_id: Some(3),
            ..minimal_create()
        };
        let lookups = Lookups::new([1, 2, 3], [1, 2]);
        assert!(validate_create(&dto, today(), &lookups).is_valid());
    }

    #[test]
    fn test_create_dates() {
        let future_start = CreateMedicalRecord {
            start_date: Some(date(2024, 6, 16)),
            ..minimal_create()
        };
        let errors = validate_create(&future_start, today(), &Lookups::seeded());
        assert_eq!(errors.errors()[0].message, "startDate cannot be a future date");

        let inverted = CreateMedicalRecord {
            end_date: Some(date(2023, 12, 31)),
            ..minimal_create()
        };
        let errors = validate_create(&inverted, today(), &Lookups::seeded());
        assert_eq!(errors.errors()[0].message, "startDate cannot be later than endDate");

        // A closed leave period entirely in the past is fine.
        let closed = CreateMedicalRecord {
            end_date: Some(date(2024, 1, 10)),
            ..minimal_create()
        };
        assert!(validate_create(&closed, today(), &Lookups::seeded()).is_valid());
    }

    #[test]
    fn test_disability_requires_percentage() {
        let dto = CreateMedicalRecord {
            disability: Some(true),
            disability_percentage: None,
            ..minimal_create()
        };
        let errors = validate_create(&dto, today(), &Lookups::seeded());
        assert_eq!(fields(&errors), vec!["disabilityPercentage"]);
    }

    #[test]
    fn test_disability_percentage_bounds() {
        let with = |p: Decimal| CreateMedicalRecord {
            disability: Some(true),
            disability_percentage: Some(p),
            ..minimal_create()
        };
        let lookups = Lookups::seeded();
        assert!(!validate_create(&with(Decimal::ZERO), today(), &lookups).is_valid());
        assert!(!validate_create(&with(Decimal::new(1001, 1)), today(), &lookups).is_valid());
        assert!(validate_create(&with(Decimal::ONE_HUNDRED), today(), &lookups).is_valid());
        assert!(validate_create(&with(Decimal::new(5, 1)), today(), &lookups).is_valid());
    }

    #[test]
    fn test_percentage_without_disability_is_rejected() {
        for disability in [Some(false), None] {
            let dto = CreateMedicalRecord {
                disability,
                disability_percentage: Some(Decimal::TEN),
                ..minimal_create()
            };
            let errors = validate_create(&dto, today(), &Lookups::seeded());
            assert_eq!(fields(&errors), vec!["disabilityPercentage"]);
        }
    }

    #[test]
    fn test_position_change_requires_observations() {
        let missing = CreateMedicalRecord {
            position_change: Some(true),
            ..minimal_create()
        };
        assert_eq!(
            fields(&validate_create(&missing, today(), &Lookups::seeded())),
            vec!["observations"]
        );

        let blank = CreateMedicalRecord {
            position_change: Some(true),
            observations: Some("   ".to_string()),
            ..minimal_create()
        };
        assert!(!validate_create(&blank, today(), &Lookups::seeded()).is_valid());

        let no_change = CreateMedicalRecord {
            position_change: Some(false),
            ..minimal_create()
        };
        assert!(validate_create(&no_change, today(), &Lookups::seeded()).is_valid());
    }

    #[test]
    fn test_update_requires_id_and_author_only() {
        let errors = validate_update(&UpdateMedicalRecord::default(), today(), &Lookups::seeded());
        assert_eq!(fields(&errors), vec!["medicalRecordId", "modifiedBy"]);

        let dto = UpdateMedicalRecord {
            medical_record_id: Some(1),
            modified_by: Some("x".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&dto, today(), &Lookups::seeded()).is_valid());
    }

    #[test]
    fn test_update_checks_present_fields() {
        let dto = UpdateMedicalRecord {
            medical_record_id: Some(1),
            modified_by: Some("x".to_string()),
            file_id: Some(-4),
            diagnosis: Some(String::new()),
            medical_record_type_id: Some(7),
            start_date: Some(date(2025, 1, 1)),
            ..Default::default()
        };
        let errors = validate_update(&dto, today(), &Lookups::seeded());
        assert_eq!(
            fields(&errors),
            vec!["fileId", "diagnosis", "medicalRecordTypeId", "startDate"]
        );
    }

    #[test]
    fn test_update_leaves_flag_rules_to_merged_record() {
        let base = UpdateMedicalRecord {
            medical_record_id: Some(1),
            modified_by: Some("x".to_string()),
            ..Default::default()
        };

        // The stored row may already carry the percentage or observations.
        let disability_only = UpdateMedicalRecord {
            disability: Some(Some(true)),
            ..base.clone()
        };
        assert!(validate_update(&disability_only, today(), &Lookups::seeded()).is_valid());

        let position_change_only = UpdateMedicalRecord {
            position_change: Some(Some(true)),
            ..base.clone()
        };
        assert!(validate_update(&position_change_only, today(), &Lookups::seeded()).is_valid());

        let percentage_only = UpdateMedicalRecord {
            disability_percentage: Some(Some(Decimal::new(150, 0))),
            ..base
        };
        assert_eq!(
            validate_update(&percentage_only, today(), &Lookups::seeded()).errors()[0].message,
            "disabilityPercentage must be less than or equal to 100"
        );
    }

    #[test]
    fn test_update_length_ceilings() {
        let dto = UpdateMedicalRecord {
            medical_record_id: Some(1),
            modified_by: Some("m".repeat(USER_MAX_LEN + 1)),
            diagnosis: Some("d".repeat(DIAGNOSIS_MAX_LEN + 1)),
            mother_data: Some(Some("a".repeat(TEXT_MAX_LEN + 1))),
            father_data: Some(Some("b".repeat(TEXT_MAX_LEN + 1))),
            other_family_data: Some(Some("c".repeat(TEXT_MAX_LEN + 1))),
            medical_board: Some(Some("e".repeat(MEDICAL_BOARD_MAX_LEN + 1))),
            observations: Some(Some("f".repeat(TEXT_MAX_LEN + 1))),
            ..Default::default()
        };
        let errors = validate_update(&dto, today(), &Lookups::seeded());
        assert_eq!(
            fields(&errors),
            vec![
                "modifiedBy",
                "diagnosis",
                "motherData",
                "fatherData",
                "otherFamilyData",
                "medicalBoard",
                "observations"
            ]
        );
        assert_eq!(
            errors.errors()[0].message,
            format!("modifiedBy has exceeded the maximum of {USER_MAX_LEN} characters")
        );

        let at_limit = UpdateMedicalRecord {
            medical_record_id: Some(1),
            modified_by: Some("m".repeat(USER_MAX_LEN)),
            diagnosis: Some("d".repeat(DIAGNOSIS_MAX_LEN)),
            medical_board: Some(Some("e".repeat(MEDICAL_BOARD_MAX_LEN))),
            ..Default::default()
        };
        assert!(validate_update(&at_limit, today(), &Lookups::seeded()).is_valid());
    }

    #[test]
    fn test_record_cross_field_rules() {
        let record = medical_records::Model {
            medical_record_id: 1,
            file_id: 10,
            medical_record_type_id: 1,
            status_id: crate::models::status::ACTIVE,
            diagnosis: "flu".to_string(),
            start_date: date(2024, 3, 1),
            end_date: Some(date(2024, 2, 1)),
            audiometry: None,
            position_change: Some(true),
            execute_micros: None,
            execute_extra: None,
            voice_evaluation: None,
            disability: Some(false),
            area_change: None,
            disability_percentage: Some(Decimal::TEN),
            mother_data: None,
            father_data: None,
            other_family_data: None,
            medical_board: None,
            observations: None,
            created_by: "bob".to_string(),
            creation_date: date(2024, 3, 2),
            modified_by: None,
            modification_date: None,
            deleted_by: None,
            deletion_date: None,
            deletion_reason: None,
        };
        assert_eq!(
            fields(&validate_record(&record)),
            vec!["startDate", "observations", "disabilityPercentage"]
        );

        let consistent = medical_records::Model {
            end_date: None,
            observations: Some("moved".to_string()),
            disability_percentage: None,
            ..record
        };
        assert!(validate_record(&consistent).is_valid());
    }

    #[test]
    fn test_delete_rules() {
        let errors = validate_delete(&DeleteMedicalRecord::default());
        assert_eq!(fields(&errors), vec!["medicalRecordId", "deletionReason", "deletedBy"]);

        let dto = DeleteMedicalRecord {
            medical_record_id: Some(5),
            deletion_reason: Some("duplicate".to_string()),
            deleted_by: Some("hr".to_string()),
        };
        assert!(validate_delete(&dto).is_valid());

        let too_long = DeleteMedicalRecord {
            deletion_reason: Some("r".repeat(TEXT_MAX_LEN + 1)),
            deleted_by: Some("h".repeat(USER_MAX_LEN + 1)),
            ..dto.clone()
        };
        assert_eq!(fields(&validate_delete(&too_long)), vec!["deletionReason", "deletedBy"]);

        let at_limit = DeleteMedicalRecord {
            deletion_reason: Some("r".repeat(TEXT_MAX_LEN)),
            deleted_by: Some("h".repeat(USER_MAX_LEN)),
            ..dto
        };
        assert!(validate_delete(&at_limit).is_valid());
    }

    #[test]
    fn test_filter_requires_positive_window() {
        let lookups = Lookups::seeded();
        let errors = validate_filter(&MedicalRecordFilter::default(), today(), &lookups, 100);
        assert_eq!(fields(&errors), vec!["page", "pageSize"]);

        let zeros = MedicalRecordFilter {
            page: Some(0),
            page_size: Some(0),
            ..Default::default()
        };
        let errors = validate_filter(&zeros, today(), &lookups, 100);
        assert_eq!(fields(&errors), vec!["page", "pageSize"]);

        let too_large = MedicalRecordFilter {
            page: Some(1),
            page_size: Some(101),
            ..Default::default()
        };
        assert!(!validate_filter(&too_large, today(), &lookups, 100).is_valid());
    }

    #[test]
    fn test_filter_dates_and_lookups() {
        let lookups = Lookups::seeded();
        let dto = MedicalRecordFilter {
            status_id: Some(3),
            start_date: Some(date(2024, 5, 1)),
            end_date: Some(date(2024, 7, 1)),
            medical_record_type_id: Some(0),
            page: Some(1),
            page_size: Some(10),
        };
        let errors = validate_filter(&dto, today(), &lookups, 100);
        assert_eq!(fields(&errors), vec!["statusId", "endDate", "medicalRecordTypeId"]);

        let past_window = MedicalRecordFilter {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 3, 1)),
            page: Some(1),
            page_size: Some(10),
            ..Default::default()
        };
        assert!(validate_filter(&past_window, today(), &lookups, 100).is_valid());
    }

    #[test]
    fn test_validate_id() {
        assert!(!validate_id(0).is_valid());
        assert!(!validate_id(-1).is_valid());
        assert!(validate_id(1).is_valid());
    }
}
