//! Uniform result envelope returned by every record operation.

use serde::Serialize;

use crate::error::AppError;
use crate::validation::{FieldError, ValidationErrors};

pub const SUCCESS_MESSAGE: &str = "Successful request";
pub const NOT_FOUND_MESSAGE: &str = "resource not found";
pub const BAD_REQUEST_MESSAGE: &str = "Bad Request: Invalid request";
pub const SERVER_ERROR_MESSAGE: &str = "Internal Server Error: Unhandled errors";

/// Failure detail carried by 400 and 500 envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Reason(String),
    Fields(Vec<FieldError>),
}

impl From<ValidationErrors> for ErrorDetail {
    fn from(errors: ValidationErrors) -> Self {
        Self::Fields(errors.errors().to_vec())
    }
}

impl From<String> for ErrorDetail {
    fn from(reason: String) -> Self {
        Self::Reason(reason)
    }
}

impl From<&str> for ErrorDetail {
    fn from(reason: &str) -> Self {
        Self::Reason(reason.to_string())
    }
}

/// Outcome of an operation. `code` maps directly onto the HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ErrorDetail>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, total_rows: u64) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            code: 200,
            total_rows: Some(total_rows),
            exception: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: false,
            message: NOT_FOUND_MESSAGE.to_string(),
            data: None,
            code: 404,
            total_rows: None,
            exception: None,
        }
    }

    pub fn bad_request(detail: impl Into<ErrorDetail>) -> Self {
        Self {
            success: false,
            message: BAD_REQUEST_MESSAGE.to_string(),
            data: None,
            code: 400,
            total_rows: None,
            exception: Some(detail.into()),
        }
    }

    pub fn server_error(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: SERVER_ERROR_MESSAGE.to_string(),
            data: None,
            code: 500,
            total_rows: None,
            exception: Some(ErrorDetail::Reason(detail.into())),
        }
    }

    /// Map an operation result onto the envelope taxonomy.
    pub fn from_result(result: crate::Result<(T, u64)>) -> Self {
        match result {
            Ok((data, total_rows)) => Self::success(data, total_rows),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(error: AppError) -> Self {
        match error {
            AppError::Validation(errors) => Self::bad_request(errors),
            AppError::NotFound(_) => Self::not_found(),
            AppError::Conflict(reason) => Self::bad_request(reason),
            AppError::Json(e) => Self::bad_request(e.to_string()),
            other => Self::server_error(other.to_string()),
        }
    }
}
