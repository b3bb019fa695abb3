use std::process;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_tool::config::AppConfig;
use gemini_tool::llm::GeminiClient;
use gemini_tool::routes::configure_routes;
use gemini_tool::state::AppState;
use gemini_tool::store::{ChatStore, StoreConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_tool=info,warp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("FATAL: {}", err);
            process::exit(1);
        }
    };

    let store = match ChatStore::open(&StoreConfig::new(&config.database_path)) {
        Ok(store) => store,
        Err(err) => {
            error!("FATAL: Failed to initialize database: {}", err);
            process::exit(1);
        }
    };
    info!(path = %config.database_path.display(), "Database ready");

    let generator = match GeminiClient::new(config.api_key.clone()) {
        Ok(client) => client
            .with_base_url(config.gemini_base_url.clone())
            .with_retry_policy(config.retry.clone()),
        Err(err) => {
            error!("FATAL: Failed to create Gemini client: {}", err);
            process::exit(1);
        }
    };

    let state = AppState::new(store, Arc::new(generator));
    let routes = configure_routes(state, config.static_dir.clone());

    info!("Server starting on http://{}", config.bind_addr);
    warp::serve(routes).run(config.bind_addr).await;
}
