use actix_web::{error, http::StatusCode, HttpResponse};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ErrorResponse, Page, UnknownInterest};

/// Errors raised by the recommendation service
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Course data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Please select at least {required} interests ({selected} selected).")]
    InsufficientSelection { selected: usize, required: usize },

    #[error("Predicted course '{0}' has no entry in the course table")]
    UnknownCourseLabel(String),

    #[error("Feature vector has {actual} entries, model expects {expected}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Unknown interest: {0}")]
    UnknownInterest(String),

    #[error("Action '{action}' is not available on the {page} page")]
    InvalidTransition { page: Page, action: &'static str },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Short machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DataUnavailable(_) => "data_unavailable",
            AppError::InsufficientSelection { .. } => "insufficient_selection",
            AppError::UnknownCourseLabel(_) => "unknown_course_label",
            AppError::FeatureMismatch { .. } => "feature_mismatch",
            AppError::UnknownInterest(_) => "unknown_interest",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::Validation(_) => "validation_failed",
            AppError::SessionNotFound(_) => "session_not_found",
            AppError::Config(_) => "configuration_error",
        }
    }
}

impl From<UnknownInterest> for AppError {
    fn from(err: UnknownInterest) -> Self {
        AppError::UnknownInterest(err.0)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::DataUnavailable(err.to_string())
    }
}

impl error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InsufficientSelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownCourseLabel(_) | AppError::FeatureMismatch { .. } | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UnknownInterest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}
