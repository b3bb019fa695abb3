// Route definitions

use std::convert::Infallible;
use std::path::PathBuf;

use bytes::Bytes;

use tracing::info;
use warp::{Filter, Rejection};

use crate::handlers::{self, BodyTooLarge};
use crate::state::AppState;

/// Build the full server filter: JSON API, static frontend, JSON rejections
/// and access logging.
///
/// API routes match on path only and pass the method to the handler, which
/// answers disallowed verbs with 405.
pub fn configure_routes(
    state: AppState,
    static_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let api = warp::path("api");

    // GET|POST|PUT /api/prompts
    let prompts = api
        .and(warp::path("prompts"))
        .and(warp::path::end())
        .and(warp::method())
        .and(limited_body())
        .and(with_state(state.clone()))
        .and_then(handlers::prompts_handler);

    // POST /api/generate
    let generate = api
        .and(warp::path("generate"))
        .and(warp::path::end())
        .and(warp::method())
        .and(limited_body())
        .and(with_state(state.clone()))
        .and_then(handlers::generate_handler);

    // GET /api/chats
    let chats = api
        .and(warp::path("chats"))
        .and(warp::path::end())
        .and(warp::method())
        .and(with_state(state.clone()))
        .and_then(handlers::chats_handler);

    // GET /api/models
    let models = api
        .and(warp::path("models"))
        .and(warp::path::end())
        .and(warp::method())
        .and(with_state(state))
        .and_then(handlers::models_handler);

    // GET /* from the frontend bundle
    let frontend = warp::get().and(warp::fs::dir(static_dir));

    prompts
        .or(generate)
        .or(chats)
        .or(models)
        .or(frontend)
        .recover(handlers::handle_rejection)
        .with(warp::log::custom(log_request))
}

/// Largest request body accepted by the API
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Whole request body, rejected with `BodyTooLarge` when the declared
/// length exceeds `MAX_BODY_BYTES`
fn limited_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(|length: Option<u64>| async move {
            match length {
                Some(length) if length > MAX_BODY_BYTES => Err(warp::reject::custom(BodyTooLarge)),
                _ => Ok::<(), Rejection>(()),
            }
        })
        .untuple_one()
        .and(warp::body::bytes())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn log_request(info: warp::log::Info<'_>) {
    info!(
        target: "gemini_tool::access",
        method = %info.method(),
        path = info.path(),
        status = info.status().as_u16(),
        elapsed_ms = info.elapsed().as_millis() as u64,
        "request handled"
    );
}
