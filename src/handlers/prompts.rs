// GET/POST/PUT /api/prompts handler

use std::convert::Infallible;

use bytes::Bytes;
use tracing::info;
use warp::http::{Method, StatusCode};
use warp::reply::Response;

use super::{decode_body, json_response, ApiError};
use crate::state::AppState;
use crate::store::{NewPrompt, PromptTemplate};

pub async fn prompts_handler(
    method: Method,
    body: Bytes,
    state: AppState,
) -> Result<Response, Infallible> {
    let result = match method {
        Method::GET => list_prompts(&state).await,
        Method::POST => create_prompt(&state, &body).await,
        Method::PUT => update_prompt(&state, &body).await,
        _ => Err(ApiError::MethodNotAllowed),
    };

    Ok(result.unwrap_or_else(ApiError::into_response))
}

async fn list_prompts(state: &AppState) -> Result<Response, ApiError> {
    let prompts = state
        .store
        .list_prompts()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get prompts"))?;

    Ok(json_response(&prompts, StatusCode::OK))
}

async fn create_prompt(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let prompt: NewPrompt = decode_body(body)?;
    let created = state
        .store
        .create_prompt(prompt)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create prompt"))?;

    info!(prompt_id = created.id, name = %created.name, "prompt created");
    Ok(json_response(&created, StatusCode::CREATED))
}

async fn update_prompt(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let prompt: PromptTemplate = decode_body(body)?;
    if prompt.id == 0 {
        return Err(ApiError::BadRequest(
            "Prompt ID is required for update".to_string(),
        ));
    }

    let updated = state
        .store
        .update_prompt(prompt)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update prompt"))?;

    info!(prompt_id = updated.id, name = %updated.name, "prompt updated");
    Ok(json_response(&updated, StatusCode::OK))
}
