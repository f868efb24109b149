//! Medical record operations.
//!
//! Every operation validates its request, runs against the store and wraps
//! the outcome in an [`Envelope`]. Nothing is returned as `Err`: failures map
//! onto 400 / 404 / 500 envelopes.

use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::config::RecordsConfig;
use crate::entities::medical_records;
use crate::error::{AppError, Result};
use crate::mapper;
use crate::models::{CreateMedicalRecord, DeleteMedicalRecord, MedicalRecordFilter, UpdateMedicalRecord};
use crate::query::RecordQuery;
use crate::response::Envelope;
use crate::store::MedicalRecordStore;
use crate::validation;

pub const UPDATE_DELETED_REASON: &str = "Tried to Update a DeletedRecord";
pub const DELETE_DELETED_REASON: &str = "Tried to Delete a DeletedRecord";

/// Source of "today" for date rules and audit columns.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Medical record service over a store.
pub struct MedicalRecordService<S, C = SystemClock> {
    store: S,
    clock: C,
    settings: RecordsConfig,
}

impl<S: MedicalRecordStore> MedicalRecordService<S> {
    /// Create a service using the system clock.
    pub fn new(store: S, settings: RecordsConfig) -> Self {
        Self::with_clock(store, SystemClock, settings)
    }
}

impl<S: MedicalRecordStore, C: Clock> MedicalRecordService<S, C> {
    pub fn with_clock(store: S, clock: C, settings: RecordsConfig) -> Self {
        Self { store, clock, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a record.
    pub async fn create(&self, dto: CreateMedicalRecord) -> Envelope<medical_records::Model> {
        respond("create", self.try_create(dto).await.map(|r| (r, 1)))
    }

    /// Apply a partial update to a live record.
    pub async fn update(&self, dto: UpdateMedicalRecord) -> Envelope<medical_records::Model> {
        respond("update", self.try_update(dto).await.map(|r| (r, 1)))
    }

    /// Soft-delete a live record.
    pub async fn soft_delete(&self, dto: DeleteMedicalRecord) -> Envelope<medical_records::Model> {
        respond("delete", self.try_soft_delete(dto).await.map(|r| (r, 1)))
    }

    /// Get a record by id, deleted or not.
    pub async fn get_by_id(&self, id: i32) -> Envelope<medical_records::Model> {
        respond("get", self.try_get_by_id(id).await.map(|r| (r, 1)))
    }

    /// List one page of records matching the filter.
    pub async fn get_filtered(&self, filter: MedicalRecordFilter) -> Envelope<Vec<medical_records::Model>> {
        respond("list", self.try_get_filtered(filter).await)
    }

    async fn try_create(&self, dto: CreateMedicalRecord) -> Result<medical_records::Model> {
        let today = self.clock.today();
        let lookups = self.store.lookups().await?;
        validation::validate_create(&dto, today, &lookups).into_result()?;

        let record = self.store.insert(mapper::new_record(dto, today)).await?;
        info!(
            "Created medical record {} for file {}",
            record.medical_record_id, record.file_id
        );
        Ok(record)
    }

    async fn try_update(&self, dto: UpdateMedicalRecord) -> Result<medical_records::Model> {
        let today = self.clock.today();
        let lookups = self.store.lookups().await?;
        validation::validate_update(&dto, today, &lookups).into_result()?;

        let id = dto.medical_record_id.unwrap_or_default();
        let existing = self.live_record(id, UPDATE_DELETED_REASON).await?;

        let active = mapper::apply_update(existing, dto, today);
        let merged = sea_orm::TryIntoModel::try_into_model(active.clone())?;
        validation::validate_record(&merged).into_result()?;

        let record = self.store.update(active).await?;
        info!("Updated medical record {}", record.medical_record_id);
        Ok(record)
    }

    async fn try_soft_delete(&self, dto: DeleteMedicalRecord) -> Result<medical_records::Model> {
        let today = self.clock.today();
        validation::validate_delete(&dto).into_result()?;

        let id = dto.medical_record_id.unwrap_or_default();
        let existing = self.live_record(id, DELETE_DELETED_REASON).await?;

        let record = self.store.update(mapper::apply_delete(existing, dto, today)).await?;
        info!("Soft-deleted medical record {}", record.medical_record_id);
        Ok(record)
    }

    async fn try_get_by_id(&self, id: i32) -> Result<medical_records::Model> {
        validation::validate_id(id).into_result()?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("medical record {id}")))
    }

    async fn try_get_filtered(&self, filter: MedicalRecordFilter) -> Result<(Vec<medical_records::Model>, u64)> {
        let today = self.clock.today();
        let lookups = self.store.lookups().await?;
        validation::validate_filter(&filter, today, &lookups, self.settings.max_page_size).into_result()?;

        let query = RecordQuery::try_from(&filter)?;
        debug!("Listing medical records: {:?}", query);
        let (records, total) = self.store.query(&query).await?;
        info!(
            "Listed {} of {} medical records (page {})",
            records.len(),
            total,
            query.page
        );
        Ok((records, total))
    }

    /// Fetch a record that exists and is not soft-deleted.
    async fn live_record(&self, id: i32, deleted_reason: &str) -> Result<medical_records::Model> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("medical record {id}")))?;
        if record.is_deleted() {
            return Err(AppError::conflict(deleted_reason));
        }
        Ok(record)
    }
}

/// Log the failure, if any, and build the envelope.
fn respond<T>(operation: &str, result: Result<(T, u64)>) -> Envelope<T> {
    if let Err(e) = &result {
        if e.is_client_error() {
            warn!("{operation} rejected: {e}");
        } else {
            error!("{operation} failed: {e}");
        }
    }
    Envelope::from_result(result)
}
