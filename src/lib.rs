//! Emergency Dispatch Forecast Service
//!
//! Predicts daily emergency-service dispatch counts from weather
//! observations, using versioned models fetched from an MLflow-compatible
//! registry, and persists every prediction for later retrieval.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::warn;

use api::AppState;
use domain::{InMemoryPredictionRepository, ModelCache, PredictionRepository};
use infrastructure::prediction::PostgresPredictionRepository;
use infrastructure::registry::MlflowRegistry;
use infrastructure::services::PredictionService;

/// Wire the registry client, model cache and prediction store into the
/// application state.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let registry = MlflowRegistry::new(&config.registry);
    let models = Arc::new(ModelCache::new(Arc::new(registry)));

    let repository: Arc<dyn PredictionRepository> = match config.database.url {
        Some(_) => {
            let repository = PostgresPredictionRepository::connect(&config.database).await?;
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        None => {
            warn!("no database configured, predictions are stored in memory");
            Arc::new(InMemoryPredictionRepository::new())
        }
    };

    let service = PredictionService::new(
        repository,
        models,
        config.prediction.default_model.clone(),
    );

    Ok(AppState::new(Arc::new(service)))
}
