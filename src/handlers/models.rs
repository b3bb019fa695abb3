// GET /api/models handler

use std::convert::Infallible;

use tracing::error;
use warp::http::{Method, StatusCode};
use warp::reply::Response;

use super::{json_response, ApiError};
use crate::state::AppState;

pub async fn models_handler(method: Method, state: AppState) -> Result<Response, Infallible> {
    if method != Method::GET {
        return Ok(ApiError::MethodNotAllowed.into_response());
    }

    let response = match state.generator.list_models().await {
        Ok(models) => json_response(&models, StatusCode::OK),
        Err(err) => {
            error!(error = %err, "Failed to fetch models from API");
            ApiError::Internal("Failed to fetch models from Google API".to_string()).into_response()
        }
    };
    Ok(response)
}
