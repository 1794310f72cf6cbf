// src/state.rs

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::store::EntityStore;
use crate::summary::Summarizer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub summarizer: Arc<dyn Summarizer>,
    /// Quiz ids with an AI analysis currently in flight. Overlapping
    /// requests for the same quiz are rejected, not queued.
    pub analyses_in_flight: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            store,
            summarizer,
            analyses_in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl FromRef<AppState> for Arc<dyn EntityStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
