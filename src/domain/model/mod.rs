//! Model resolution: keys, handles, the registry loader seam and the cache

pub mod cache;
pub mod handle;
pub mod key;
pub mod loader;

pub use cache::ModelCache;
pub use handle::{ConfidencePredictor, ModelHandle, Predictor, PredictorOutput};
pub use key::{ModelKey, ModelSpec};
pub use loader::{LoadedModel, ModelLoadError, ModelLoader};
