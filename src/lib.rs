pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod mapper;
pub mod models;
pub mod query;
pub mod response;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::{AppError, Result};
