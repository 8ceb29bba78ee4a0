mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;
use crate::service::ServiceError;

/// The four failure kinds a client can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Unprocessable,
    Internal,
}

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad Request",
            ApiError::NotFound => "Not Found",
            ApiError::Unprocessable => "Unable to be Processed",
            ApiError::Internal => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Maps a service failure onto the taxonomy. Store faults become `fallback`,
/// the kind the endpoint reports when its own operation fails.
pub(crate) fn service_failure(fallback: ApiError) -> impl FnOnce(ServiceError) -> ApiError {
    move |err| match err {
        ServiceError::NotFound(what) => {
            tracing::info!(%what, "not found");
            ApiError::NotFound
        }
        ServiceError::Invalid(reason) => {
            tracing::warn!(%reason, "rejected input");
            ApiError::BadRequest
        }
        ServiceError::Store(StoreError::Constraint(reason)) => {
            tracing::warn!(%reason, "constraint violation");
            fallback
        }
        ServiceError::Store(err) => {
            tracing::error!(error = %err, "store failure");
            fallback
        }
    }
}

/// Logs an extractor rejection and replaces it with `kind`.
pub(crate) fn rejected<E: std::fmt::Display>(kind: ApiError) -> impl FnOnce(E) -> ApiError {
    move |rejection| {
        tracing::warn!(%rejection, "malformed request");
        kind
    }
}
