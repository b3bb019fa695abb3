//! Generation client
//!
//! A provider-neutral trait for text generation plus the Gemini
//! implementation used by the server.

pub mod core;
pub mod gemini;

// Re-export commonly used types
pub use self::core::{
    error::LlmError,
    provider::GenerationProvider,
    retry::RetryPolicy,
    types::{GenerationResult, UsageMetadata},
};

pub use gemini::GeminiClient;
