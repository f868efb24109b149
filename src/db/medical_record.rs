//! Medical record repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::*;

use crate::entities::{medical_record_types, medical_records, prelude::*, statuses};
use crate::query::RecordQuery;
use crate::store::{MedicalRecordStore, RecordPage};
use crate::validation::Lookups;

/// Get medical record by ID.
pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<medical_records::Model>, DbErr> {
    MedicalRecords::find_by_id(id).one(db).await
}

/// Insert a new medical record. The id comes from the table's sequence.
pub async fn insert(
    db: &DatabaseConnection,
    record: medical_records::ActiveModel,
) -> Result<medical_records::Model, DbErr> {
    record.insert(db).await
}

/// Write the `Set` columns of an existing medical record.
pub async fn update(
    db: &DatabaseConnection,
    record: medical_records::ActiveModel,
) -> Result<medical_records::Model, DbErr> {
    record.update(db).await
}

/// Filtered select without paging.
pub fn filtered(query: &RecordQuery) -> Select<MedicalRecords> {
    MedicalRecords::find().filter(query.condition())
}

/// One page of the filtered select, ordered by id.
pub fn paged(query: &RecordQuery) -> Select<MedicalRecords> {
    filtered(query)
        .order_by_asc(medical_records::Column::MedicalRecordId)
        .offset(query.offset())
        .limit(query.limit())
}

/// Get one page of filtered records and the total match count.
pub async fn find_filtered(
    db: &DatabaseConnection,
    query: &RecordQuery,
) -> Result<(Vec<medical_records::Model>, u64), DbErr> {
    let total = filtered(query).count(db).await?;
    let records = paged(query).all(db).await?;
    Ok((records, total))
}

/// Get all record type ids.
pub async fn record_type_ids(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    MedicalRecordTypes::find()
        .select_only()
        .column(medical_record_types::Column::MedicalRecordTypeId)
        .into_tuple()
        .all(db)
        .await
}

/// Get all status ids.
pub async fn status_ids(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    Statuses::find()
        .select_only()
        .column(statuses::Column::StatusId)
        .into_tuple()
        .all(db)
        .await
}

/// [`MedicalRecordStore`] over a pooled database connection.
#[derive(Debug)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MedicalRecordStore for SeaOrmStore {
    async fn insert(&self, record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr> {
        insert(&self.db, record).await
    }

    async fn update(&self, record: medical_records::ActiveModel) -> Result<medical_records::Model, DbErr> {
        update(&self.db, record).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<medical_records::Model>, DbErr> {
        get_by_id(&self.db, id).await
    }

    async fn query(&self, query: &RecordQuery) -> Result<RecordPage, DbErr> {
        find_filtered(&self.db, query).await
    }

    async fn lookups(&self) -> Result<Lookups, DbErr> {
        let record_types = record_type_ids(&self.db).await?;
        let statuses = status_ids(&self.db).await?;
        Ok(Lookups::new(record_types, statuses))
    }
}
