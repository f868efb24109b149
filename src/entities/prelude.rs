pub use super::medical_record_types::Entity as MedicalRecordTypes;
pub use super::medical_records::Entity as MedicalRecords;
pub use super::statuses::Entity as Statuses;
