//! Error taxonomy for request handling.
//!
//! # Design Decisions
//! - Failures classify locally into a terminal status; no retries anywhere
//! - 400 and 404 carry no body beyond the status
//! - A static-asset miss is recovered at the static layer and never surfaces
//!   as a 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Terminal request-handling failures.
///
/// Static-asset misses never appear here: the static layer recovers them
/// locally by serving the 404 document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EdgeError {
    /// Malformed or missing required input.
    #[error("bad request")]
    BadRequest,

    /// Well-formed input referring to a resource we know nothing about.
    #[error("not found")]
    NotFound,
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        match self {
            EdgeError::BadRequest => StatusCode::BAD_REQUEST.into_response(),
            EdgeError::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
