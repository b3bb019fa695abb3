#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gemini_tool::llm::{GenerationProvider, GenerationResult, LlmError, UsageMetadata};
use gemini_tool::state::AppState;
use gemini_tool::store::ChatStore;

/// Generation provider that replays queued results and records every call
#[derive(Default)]
pub struct ScriptedProvider {
    results: Mutex<VecDeque<Result<GenerationResult, LlmError>>>,
    models: Mutex<Option<Result<Vec<String>, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Duration,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` inside every generation call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue a successful generation
    pub fn push_text(&self, text: &str, input_tokens: u32, output_tokens: u32) {
        self.results.lock().unwrap().push_back(Ok(GenerationResult::new(
            text,
            UsageMetadata::new(input_tokens, output_tokens),
        )));
    }

    /// Queue a failed generation
    pub fn push_error(&self, err: LlmError) {
        self.results.lock().unwrap().push_back(Err(err));
    }

    pub fn set_models(&self, models: Result<Vec<String>, LlmError>) {
        *self.models.lock().unwrap() = Some(models);
    }

    /// (model, prompt) pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Result<GenerationResult, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerationResult::new("default output", UsageMetadata::new(1, 1))))
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        self.models
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Fresh in-memory store plus a scripted provider wired into app state
pub fn test_state() -> (AppState, Arc<ScriptedProvider>, ChatStore) {
    let store = ChatStore::in_memory().expect("Failed to open in-memory store");
    let provider = Arc::new(ScriptedProvider::new());
    let state = AppState::new(store.clone(), provider.clone());
    (state, provider, store)
}
