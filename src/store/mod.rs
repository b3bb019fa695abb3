//! SQLite-backed store for prompt templates and the chat log.
//!
//! Two tables: `prompts` (unique by name) and `chats` (one row per
//! generation request, written once when the request arrives and once when
//! the model call finishes).
//!
//! # Quick Start
//!
//! ```no_run
//! use gemini_tool::store::{ChatStore, NewPrompt, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ChatStore::open(&StoreConfig::new("./gemini-tool.db"))?;
//!     let prompt = store
//!         .create_prompt(NewPrompt::new("summarize", "Summarize:", "gemini-2.5-flash"))
//!         .await?;
//!     println!("created prompt {}", prompt.id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod operations;
pub mod schema;
pub mod types;

// Re-export main types for convenience
pub use client::ChatStore;
pub use connection::StoreConfig;
pub use error::{Result, StoreError};
pub use types::{
    ChatCompletion, ChatOutcome, ChatRecord, ChatStatus, NewChat, NewPrompt, PromptTemplate,
};
