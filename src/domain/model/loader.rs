//! Registry loader seam

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use super::handle::ModelHandle;

/// Why a registry load failed.
///
/// The classification is diagnostic detail only: every variant terminates
/// the load and there is no fallback model.
#[derive(Debug, Clone, Error)]
pub enum ModelLoadError {
    #[error("model '{name}' version '{version}' not found in registry")]
    NotFound { name: String, version: String },

    #[error("registry authentication failed: {message}")]
    Unauthorized { message: String },

    #[error("registry error: {message}")]
    Other { message: String },
}

impl ModelLoadError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
}

/// A handle together with the registry run that produced it.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub handle: ModelHandle,
    pub run_id: Option<String>,
}

/// Capability to fetch predictors from the model registry.
///
/// Injected into the cache as a trait object so the registry is mockable in
/// tests and the cache policy stays independent of the transport.
#[async_trait]
pub trait ModelLoader: Send + Sync + Debug {
    /// Resolve a model's current latest concrete version.
    async fn latest_version(&self, name: &str) -> Result<String, ModelLoadError>;

    /// Fetch the predictor for an exact (name, version) pair.
    async fn load(&self, name: &str, version: &str) -> Result<LoadedModel, ModelLoadError>;
}
