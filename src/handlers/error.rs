// HTTP error taxonomy and the rejection handler

use std::convert::Infallible;

use thiserror::Error;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Errors a handler can answer with; each maps to one status code
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    /// Body was not valid JSON for the endpoint
    #[error("Invalid request body")]
    InvalidBody,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Generation failed; the message is passed through to the caller
    #[error("{0}")]
    Upstream(String),

    /// Unclassified failure; detail is logged, not returned
    #[error("{0}")]
    Internal(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,
}

/// Rejection for request bodies over the size limit
#[derive(Debug)]
pub struct BodyTooLarge;

impl warp::reject::Reject for BodyTooLarge {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Classify a store failure. `context` is the generic message returned
    /// for failures that aren't a conflict or a missing row.
    pub fn from_store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::DuplicateName(_) => {
                ApiError::Conflict("A prompt with this name already exists.".to_string())
            }
            StoreError::NotFound(what) => ApiError::NotFound(format!("Not found: {}", what)),
            other => {
                error!(error = %other, "{}", context);
                ApiError::Internal(context.to_string())
            }
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status();
        warp::reply::with_status(warp::reply::json(&ErrorResponse::new(self.to_string())), status)
            .into_response()
    }
}

/// Turn rejections that escaped every route into JSON errors
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let api_error = if err.is_not_found() {
        ApiError::NotFound("Not found".to_string())
    } else if err.find::<BodyTooLarge>().is_some() {
        ApiError::PayloadTooLarge
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::MethodNotAllowed
    } else {
        warn!(rejection = ?err, "unhandled rejection");
        ApiError::Internal("Internal server error".to_string())
    };

    Ok(api_error.into_response())
}
