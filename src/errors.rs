// src/errors.rs
// DOCUMENTATION: Model-layer errors, HTTP errors, and the mapping between them
// PURPOSE: Centralized error handling for entire application

use crate::models::ID_FIELD;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures raised by a photo store
/// DOCUMENTATION: Every variant knows which field (if any) caused it
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Photo not found with id: {0}")]
    NotFound(String),

    #[error("Invalid photo id: {0}")]
    InvalidId(String),

    #[error("Validation failed on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ModelError {
    /// Name of the field the failure is attached to
    pub fn path(&self) -> Option<&str> {
        match self {
            ModelError::NotFound(_) | ModelError::InvalidId(_) => Some(ID_FIELD),
            ModelError::Validation { field, .. } => Some(field),
            ModelError::DatabaseError(_) => None,
        }
    }
}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the alphabetically first failing field so the outcome is stable
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by_key(|(name, _)| **name);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| {
                        errs.first()
                            .map(|e| e.code.to_string())
                            .unwrap_or_else(|| "invalid".to_string())
                    });
                ModelError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => ModelError::Validation {
                field: "body".to_string(),
                message: errors.to_string(),
            },
        }
    }
}

/// Errors returned by the HTTP handlers
/// DOCUMENTATION: Only two classes exist: unknown id (404) and bad input (400)
#[derive(Error, Debug)]
pub enum PhotoApiError {
    #[error("ID not found")]
    NotFound { detail: String },

    #[error("Check your input")]
    BadInput {
        field: Option<String>,
        detail: String,
    },
}

impl PhotoApiError {
    pub fn bad_input(detail: impl Into<String>) -> Self {
        PhotoApiError::BadInput {
            field: None,
            detail: detail.into(),
        }
    }
}

/// Map a model failure to an HTTP error by the field that failed
/// DOCUMENTATION: The identifier field means the record does not exist (or the
/// id is malformed); anything else is treated as bad input
pub fn error_switch(err: ModelError) -> PhotoApiError {
    match err.path() {
        Some(ID_FIELD) => {
            log::debug!("Photo lookup failed: {}", err);
            PhotoApiError::NotFound {
                detail: err.to_string(),
            }
        }
        field => {
            if matches!(err, ModelError::DatabaseError(_)) {
                log::error!("Photo store failure: {}", err);
            } else {
                log::debug!("Rejected photo input: {}", err);
            }
            PhotoApiError::BadInput {
                field: field.map(str::to_owned),
                detail: err.to_string(),
            }
        }
    }
}

impl From<ModelError> for PhotoApiError {
    fn from(err: ModelError) -> Self {
        error_switch(err)
    }
}

/// Convert PhotoApiError to HTTP response
impl ResponseError for PhotoApiError {
    fn error_response(&self) -> HttpResponse {
        let (error_code, field, detail) = match self {
            PhotoApiError::NotFound { detail } => ("NOT_FOUND", Some(ID_FIELD), detail),
            PhotoApiError::BadInput { field, detail } => ("BAD_INPUT", field.as_deref(), detail),
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "field": field,
                "detail": detail,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PhotoApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            PhotoApiError::BadInput { .. } => StatusCode::BAD_REQUEST,
        }
    }
}
