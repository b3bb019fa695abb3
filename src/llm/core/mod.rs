//! Core abstractions for the generation client

pub mod error;
pub mod provider;
pub mod retry;
pub mod types;
