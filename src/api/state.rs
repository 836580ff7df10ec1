//! Shared application state

use std::sync::Arc;

use crate::infrastructure::services::PredictionService;

#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionService>,
}

impl AppState {
    pub fn new(predictions: Arc<PredictionService>) -> Self {
        Self { predictions }
    }
}
