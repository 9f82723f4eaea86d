//! HTTP error responses.
//!
//! Every failure becomes a status code plus a JSON body of the form `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use autores_core::error::StoreError;

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The store refused or failed the operation.
    Store(StoreError),
    /// The request body was not a JSON document.
    Body(JsonRejection),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => status_for(err),
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    /// Returns true when the request, not the service, caused the failure.
    fn is_client_error(&self) -> bool {
        match self {
            ApiError::Store(err) => err.is_client_error(),
            ApiError::Body(_) => true,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Store(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }
}

/// Maps a store error to the status code clients observe.
pub fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::MissingFields { .. } | StoreError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        StoreError::DuplicateAuthor { .. } | StoreError::DuplicateBook { .. } => StatusCode::CONFLICT,
        StoreError::AuthorNotFound(_) | StoreError::BookNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if self.is_client_error() {
            debug!(%status, error = %message, "request rejected");
        } else {
            error!(%status, error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
