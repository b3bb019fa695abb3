// Handlers module

pub mod chats;
pub mod error;
pub mod generate;
pub mod models;
pub mod prompts;

pub use chats::chats_handler;
pub use error::{handle_rejection, ApiError, BodyTooLarge};
pub use generate::generate_handler;
pub use models::models_handler;
pub use prompts::prompts_handler;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

/// Serialize `value` as a JSON response with `status`
pub(crate) fn json_response<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

/// Decode a JSON request body, mapping any failure to `ApiError::InvalidBody`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting request body");
        ApiError::InvalidBody
    })
}
