//! Storage seam for medical records.
//!
//! [`MedicalRecordStore`] is what the service layer needs from persistence.
//! [`crate::db::SeaOrmStore`] backs it with PostgreSQL; [`InMemoryStore`]
//! keeps everything in a map and is used by tests and `--memory` runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{DbErr, TryIntoModel};
use tokio::sync::RwLock;

use crate::entities::medical_records;
use crate::query::RecordQuery;
use crate::validation::Lookups;

/// One page of records plus the number of matches before paging.
pub type RecordPage = (Vec<medical_records::Model>, u64);

#[async_trait]
pub trait MedicalRecordStore: Send + Sync {
    /// Insert a new record; the store assigns the id.
    async fn insert(&self, record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr>;

    /// Write the changed columns of an existing record.
    async fn update(&self, record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr>;

    /// Get a record by id. `None` if absent.
    async fn find_by_id(&self, id: i32) -> Result<Option<medical_records::Model>, DbErr>;

    /// Run a filtered, id-ordered, paginated read.
    async fn query(&self, query: &RecordQuery) -> Result<RecordPage, DbErr>;

    /// Current ids of the record type and status lookup tables.
    async fn lookups(&self) -> Result<Lookups, DbErr>;
}

/// Map-backed store. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<i32, medical_records::Model>>,
    next_id: AtomicI32,
    lookups: Lookups,
}

impl InMemoryStore {
    /// Empty store with the seeded lookup rows.
    pub fn new() -> Self {
        Self::with_lookups(Lookups::seeded())
    }

    pub fn with_lookups(lookups: Lookups) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
            lookups,
        }
    }

    /// Number of stored rows, deleted ones included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MedicalRecordStore for InMemoryStore {
    async fn insert(&self, mut record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.medical_record_id = Set(id);
        let model = record.try_into_model()?;
        self.records.write().await.insert(id, model.clone());
        Ok(model)
    }

    async fn update(&self, record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr> {
        let model = record.try_into_model()?;
        let mut records = self.records.write().await;
        match records.get_mut(&model.medical_record_id) {
            Some(stored) => {
                *stored = model.clone();
                Ok(model)
            }
            None => Err(DbErr::RecordNotUpdated),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<medical_records::Model>, DbErr> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn query(&self, query: &RecordQuery) -> Result<RecordPage, DbErr> {
        let records = self.records.read().await;
        let matching: Vec<&medical_records::Model> = records.values().filter(|r| query.matches(r)).collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn lookups(&self) -> Result<Lookups, DbErr> {
        Ok(self.lookups.clone())
    }
}
