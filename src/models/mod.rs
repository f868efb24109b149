//! Request DTOs and wire helpers for medical records.

pub mod medical_record;
pub mod wire;

pub use medical_record::{CreateMedicalRecord, DeleteMedicalRecord, MedicalRecordFilter, UpdateMedicalRecord, status};
