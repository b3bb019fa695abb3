// Shared state handed to every request handler

use std::sync::Arc;

use crate::llm::GenerationProvider;
use crate::store::ChatStore;

/// Process-wide services, constructed once in `main` and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: ChatStore,
    pub generator: Arc<dyn GenerationProvider>,
}

impl AppState {
    pub fn new(store: ChatStore, generator: Arc<dyn GenerationProvider>) -> Self {
        Self { store, generator }
    }
}
