//! Domain layer: the prediction pipeline core

pub mod error;
pub mod features;
pub mod model;
pub mod prediction;
pub mod weather;

pub use error::DomainError;
pub use features::{FeatureDtype, FeatureValue, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};
pub use model::{
    LoadedModel, ModelCache, ModelHandle, ModelKey, ModelLoadError, ModelLoader, ModelSpec,
};
pub use prediction::{
    ExecutionOutcome, InMemoryPredictionRepository, NewPrediction, PredictionRecord,
    PredictionRepository,
};
pub use weather::WeatherObservation;
