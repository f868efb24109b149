//! Database connection pool and server checks.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Statement};
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;
use crate::entities::prelude::*;

/// Open a pooled connection. SQL statements are logged at debug level.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.connection_string());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Round-trip to the server and return its version, e.g. `16.2`.
pub async fn server_version(db: &DatabaseConnection) -> Result<String, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SHOW server_version".to_owned(),
        ))
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("server_version".to_owned()))?;
    row.try_get("", "server_version")
}

/// Row counts of the medical record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub medical_records: u64,
    pub record_types: u64,
    pub statuses: u64,
}

pub async fn get_table_counts(db: &DatabaseConnection) -> Result<TableCounts, DbErr> {
    Ok(TableCounts {
        medical_records: MedicalRecords::find().count(db).await?,
        record_types: MedicalRecordTypes::find().count(db).await?,
        statuses: Statuses::find().count(db).await?,
    })
}
