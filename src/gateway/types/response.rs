//! API error type and error codes
//!
//! Success responses carry the record (or list envelope) directly; every
//! failure is rendered from [`ApiError`] as `{code, error, message, field?}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;

// ============================================================================
// Error Codes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    /// 1001: Body is not valid JSON
    InvalidJson = 1001,
    /// 1002: Body sent without `Content-Type: application/json`
    UnsupportedMediaType = 1002,
    /// 1003: Bad path or query parameter
    InvalidParameter = 1003,
    /// 1004: Body well-formed but a field breaks a rule
    ValidationFailed = 1004,
    /// 4004: No record with that id
    NotFound = 4004,
    /// 4009: Unique field already taken
    Conflict = 4009,
    /// 5000: Unexpected failure; detail only in logs
    InternalError = 5000,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidParameter | Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ============================================================================
// ApiError
// ============================================================================

#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub field: Option<&'static str>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(e) => {
                Self::new(ErrorCode::ValidationFailed, e.to_string()).with_field(e.field())
            }
            CatalogError::NotFound { .. } => {
                Self::new(ErrorCode::NotFound, capitalize(&err.to_string()))
            }
            CatalogError::Conflict { field, .. } => {
                Self::new(ErrorCode::Conflict, capitalize(&err.to_string())).with_field(field)
            }
            // Already logged by the service
            CatalogError::Internal(_) => Self::internal(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match rejection {
            JsonRejection::JsonDataError(_) => ErrorCode::ValidationFailed,
            JsonRejection::MissingJsonContentType(_) => ErrorCode::UnsupportedMediaType,
            _ => ErrorCode::InvalidJson,
        };
        Self::new(code, rejection.body_text())
    }
}

/// JSON body for every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = 4009)]
    pub code: i32,
    #[schema(example = "CONFLICT")]
    pub error: &'static str,
    #[schema(example = "Tea with this name already exists")]
    pub message: String,
    /// Offending field, when one can be named
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "name")]
    pub field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code.code(),
            error: self.code.name(),
            message: self.message,
            field: self.field,
        };
        (self.code.http_status(), Json(body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
