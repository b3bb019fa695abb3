// GET /api/chats handler

use std::convert::Infallible;

use warp::http::{Method, StatusCode};
use warp::reply::Response;

use super::{json_response, ApiError};
use crate::state::AppState;

pub async fn chats_handler(method: Method, state: AppState) -> Result<Response, Infallible> {
    if method != Method::GET {
        return Ok(ApiError::MethodNotAllowed.into_response());
    }

    let response = match state.store.list_chats().await {
        Ok(chats) => json_response(&chats, StatusCode::OK),
        Err(err) => ApiError::from_store(err, "Failed to get chats").into_response(),
    };
    Ok(response)
}
