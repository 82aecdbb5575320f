use axum::http::StatusCode;
use axum::response::Response;

use fedsvc_core::{FederationId, RepositoryError, WriteStatus};

use crate::app::codec::{self, Reply};

/// Client-facing message for backend-unavailable failures; the cause is only logged.
pub const INTERNAL_SERVER_ERROR_MSG: &str = "internal server error";

pub fn write_status_code(status: WriteStatus) -> StatusCode {
    match status {
        WriteStatus::Created => StatusCode::CREATED,
        WriteStatus::Ok => StatusCode::OK,
    }
}

pub fn repository_error_status(err: &RepositoryError) -> StatusCode {
    match err {
        // Duplicate ids are a client mistake for this backend, not a 409.
        RepositoryError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Surface a repository write failure with its own status and message.
pub fn repository_error_to_response(err: RepositoryError) -> Response {
    if let RepositoryError::Unavailable(_) = err {
        return backend_unavailable(err);
    }
    tracing::debug!(error = %err, "repository rejected write");
    codec::respond(Reply::<()>::failure(repository_error_status(&err), err), None)
}

/// Result of a repository write, success or failure.
pub fn write_result_to_response(result: Result<WriteStatus, RepositoryError>) -> Response {
    match result {
        Ok(status) => codec::respond(Reply::<()>::empty(write_status_code(status)), None),
        Err(e) => repository_error_to_response(e),
    }
}

pub fn backend_unavailable(err: RepositoryError) -> Response {
    tracing::error!(error = %err, "repository unavailable");
    codec::respond(
        Reply::<()>::failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MSG),
        None,
    )
}

pub fn bad_request(err: impl core::fmt::Display) -> Response {
    tracing::error!(error = %err, "bad request");
    codec::respond(Reply::<()>::failure(StatusCode::BAD_REQUEST, err), None)
}

pub fn not_found(id: FederationId) -> Response {
    codec::respond(
        Reply::<()>::failure(StatusCode::NOT_FOUND, RepositoryError::NotFound(id)),
        None,
    )
}
