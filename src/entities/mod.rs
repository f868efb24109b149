//! SeaORM entities for the medical records schema.

pub mod prelude;

pub mod medical_record_types;
pub mod medical_records;
pub mod statuses;
