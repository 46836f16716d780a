//! Shared request state

use std::sync::Arc;

use collabup_core::{RankingConfig, Recommender, Storage};

/// Shared application state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self::with_config(storage, RankingConfig::default())
    }

    pub fn with_config(storage: Arc<Storage>, config: RankingConfig) -> Self {
        Self {
            storage,
            recommender: Arc::new(Recommender::new(config)),
        }
    }
}
