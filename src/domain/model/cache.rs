//! In-process cache of loaded predictors

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::domain::error::DomainError;

use super::key::{ModelKey, ModelSpec};
use super::loader::{LoadedModel, ModelLoader};

/// Process-lifetime cache of loaded predictors, keyed by (name, concrete
/// version). No eviction: entries stay valid until [`clear`](Self::clear),
/// even if the registry publishes newer versions in the meantime.
///
/// Known limitation: concurrent misses for the same key are not
/// deduplicated, so each may fetch from the registry. Loads are idempotent,
/// making the duplicate work wasteful but harmless; the last insert wins.
#[derive(Debug)]
pub struct ModelCache {
    loader: Arc<dyn ModelLoader>,
    entries: RwLock<HashMap<ModelKey, LoadedModel>>,
}

impl ModelCache {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a spec to a loaded model, fetching from the registry on first
    /// use of a key.
    ///
    /// An unspecified version is resolved to the registry's current latest
    /// concrete version before keying, so explicit-latest and unspecified
    /// requests converge on one entry. A failed load leaves no entry behind;
    /// the next call for the same key retries the fetch.
    pub async fn resolve(&self, spec: &ModelSpec) -> Result<(ModelKey, LoadedModel), DomainError> {
        let version = match &spec.version {
            Some(version) => version.clone(),
            None => self.loader.latest_version(&spec.name).await?,
        };
        let key = ModelKey::new(&spec.name, version);

        if let Some(cached) = self.entries.read().unwrap().get(&key).cloned() {
            debug!(model = %key, "model cache hit");
            return Ok((key, cached));
        }

        info!(model = %key, "model cache miss, loading from registry");
        // The lock is not held across the fetch.
        let loaded = self.loader.load(key.name(), key.version()).await?;
        self.entries
            .write()
            .unwrap()
            .insert(key.clone(), loaded.clone());

        Ok((key, loaded))
    }

    /// Drop every cached handle. Handles already resolved by in-flight
    /// predictions remain usable until those calls finish.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
        info!("model cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}
