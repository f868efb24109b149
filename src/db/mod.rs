//! Database connection pool and operations.

pub mod connection;
pub mod medical_record;

pub use connection::{TableCounts, connect, get_table_counts, server_version};
pub use medical_record::SeaOrmStore;
