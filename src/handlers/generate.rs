// POST /api/generate handler

use std::convert::Infallible;
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::Utc;
use tracing::{error, info, warn};
use warp::http::{Method, StatusCode};
use warp::reply::Response;

use super::{decode_body, json_response, ApiError};
use crate::llm::{GenerationResult, LlmError};
use crate::models::GenerateRequest;
use crate::state::AppState;
use crate::store::{ChatCompletion, ChatOutcome, ChatRecord, NewChat};

pub async fn generate_handler(
    method: Method,
    body: Bytes,
    state: AppState,
) -> Result<Response, Infallible> {
    if method != Method::POST {
        return Ok(ApiError::MethodNotAllowed.into_response());
    }

    Ok(generate(&state, &body)
        .await
        .unwrap_or_else(ApiError::into_response))
}

/// Resolve the prompt, log the request, call the model, log the outcome
///
/// Once the initial chat write succeeds, exactly one completion write
/// follows whatever the generation outcome.
async fn generate(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let request: GenerateRequest = decode_body(body)?;

    let prompt = state
        .store
        .get_prompt(request.prompt_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to load prompt"))?
        .ok_or_else(|| ApiError::NotFound("Prompt not found".to_string()))?;

    let model = request
        .model_override()
        .unwrap_or(prompt.model.as_str())
        .to_string();

    let chat = state
        .store
        .create_chat(NewChat::for_prompt(
            &prompt,
            request.user_input.as_str(),
            model.as_str(),
            Utc::now(),
        ))
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to log chat request"))?;

    let combined_prompt = prompt.combine(&chat.user_input);

    // Detached from the request future so a client disconnect can't skip
    // the completion write.
    let task = tokio::spawn(run_generation(
        state.clone(),
        chat,
        model.clone(),
        combined_prompt,
    ));
    let (chat, result, elapsed) = task.await.map_err(|e| {
        error!(error = %e, "generation task failed");
        ApiError::Internal("Generation task failed".to_string())
    })?;

    match result {
        Ok(_) => {
            info!(
                chat_id = chat.id,
                model = %model,
                elapsed_ms = elapsed.as_millis() as u64,
                "generation completed"
            );
            Ok(json_response(&chat, StatusCode::OK))
        }
        Err(err) => {
            warn!(chat_id = chat.id, model = %model, error = %err, "generation failed");
            Err(ApiError::Upstream(err.to_string()))
        }
    }
}

/// Call the model and record the outcome on `chat`
async fn run_generation(
    state: AppState,
    mut chat: ChatRecord,
    model: String,
    combined_prompt: String,
) -> (ChatRecord, Result<GenerationResult, LlmError>, Duration) {
    let started = Instant::now();
    let result = state.generator.generate(&model, &combined_prompt).await;
    let elapsed = started.elapsed();

    let completion = ChatCompletion::new(outcome_of(&result), Utc::now(), elapsed);
    chat.apply_completion(&completion);

    if let Err(err) = state.store.complete_chat(chat.id, completion).await {
        error!(chat_id = chat.id, error = %err, "Failed to update chat log");
    }

    (chat, result, elapsed)
}

fn outcome_of(result: &Result<GenerationResult, LlmError>) -> ChatOutcome {
    match result {
        Ok(generated) => ChatOutcome::Completed {
            output: generated.text.clone(),
            input_tokens: i64::from(generated.usage.input_tokens),
            output_tokens: i64::from(generated.usage.output_tokens),
        },
        Err(err) => ChatOutcome::Failed {
            error: err.to_string(),
        },
    }
}
