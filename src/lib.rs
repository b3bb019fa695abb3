// HTTP server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

// Prompt and chat log store
pub mod store;

// Generation client
pub mod llm;
