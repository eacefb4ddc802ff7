//! Response envelope
//!
//! Every endpoint answers with the same wrapper:
//! success: `{"status": "success", "data": {...}, "message": "..."}`,
//! error: `{"status": "error", "data": null | {...}, "message": "..."}`.
//! List endpoints additionally carry `pagination` and `filters`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::movie::AppliedFilters;
use crate::domain::DomainError;
use crate::shared::PaginatedResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    /// Payload. `null` for deletes, lookup misses and malformed requests
    pub data: Option<T>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FiltersMeta>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: message.into(),
            pagination: None,
            filters: None,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: None,
            message: message.into(),
            pagination: None,
            filters: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: message.into(),
            pagination: None,
            filters: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_filters(mut self, filters: FiltersMeta) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// Page navigation block of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl<T> From<&PaginatedResult<T>> for PaginationMeta {
    fn from(r: &PaginatedResult<T>) -> Self {
        Self {
            current_page: r.page,
            per_page: r.per_page,
            total_count: r.total_count,
            total_pages: r.total_pages,
            next_page: r.next_page(),
            prev_page: r.prev_page(),
        }
    }
}

/// Filters that were actually applied. Ignored input is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FiltersMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl From<AppliedFilters> for FiltersMeta {
    fn from(f: AppliedFilters) -> Self {
        Self {
            genre: f.genre,
            year: f.year,
            q: f.q,
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────

/// Error envelope plus the status code it is sent with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a domain error. `failure` is the message used for validation
    /// failures, e.g. "Movie creation failed".
    pub fn from_domain(err: DomainError, failure: &str) -> Self {
        match err {
            DomainError::NotFound { entity, value, .. } => Self::new(
                StatusCode::NOT_FOUND,
                format!("{} with ID {} not found", entity, value),
            ),
            DomainError::Validation(errors) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: failure.to_string(),
                data: serde_json::to_value(errors.into_map()).ok(),
            },
            DomainError::Storage(_) => {
                error!("{}", err);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, "Request failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            status: ResponseStatus::Error,
            data: self.data,
            message: self.message,
            pagination: None,
            filters: None,
        };
        (self.status, Json(body)).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────
