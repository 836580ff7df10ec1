//! Prediction pipeline orchestration

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::prediction::{executor, NewPrediction, PredictionRecord, PredictionRepository};
use crate::domain::{DomainError, FeatureVector, ModelCache, ModelSpec, WeatherObservation};

/// Outcome of a model validation round-trip. Nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ModelValidationReport {
    pub model_name: String,
    pub model_version: String,
    pub registry_run_id: Option<String>,
    pub test_prediction: u32,
    pub confidence_score: Option<f64>,
}

/// Orchestrates one prediction request: build features, resolve the model,
/// execute, persist. Also fronts the read/query surface of the store.
#[derive(Debug)]
pub struct PredictionService {
    repository: Arc<dyn PredictionRepository>,
    models: Arc<ModelCache>,
    default_model: String,
}

impl PredictionService {
    pub fn new(
        repository: Arc<dyn PredictionRepository>,
        models: Arc<ModelCache>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            models,
            default_model: default_model.into(),
        }
    }

    /// Predict the dispatch count for an observation and persist the result.
    ///
    /// Falls back to the configured default model when the caller names
    /// none. The stored record carries the resolved concrete version, so a
    /// "latest" request remains attributable after the registry moves on.
    pub async fn predict(
        &self,
        observation: WeatherObservation,
        model: Option<ModelSpec>,
    ) -> Result<PredictionRecord, DomainError> {
        let spec = model.unwrap_or_else(|| ModelSpec::latest(&self.default_model));

        let features = FeatureVector::from_observation(&observation);
        let (key, loaded) = self.models.resolve(&spec).await?;
        let outcome = executor::execute(&loaded.handle, &features)?;

        let record = self
            .repository
            .create(NewPrediction {
                prediction_date: observation.date,
                predicted_count: outcome.predicted_count,
                confidence_score: outcome.confidence_score,
                model_name: key.name().to_string(),
                model_version: key.version().to_string(),
                registry_run_id: loaded.run_id.clone(),
            })
            .await?;

        info!(
            id = %record.id(),
            date = %record.prediction_date(),
            count = record.predicted_count(),
            model = %key,
            "prediction stored"
        );
        Ok(record)
    }

    pub async fn prediction(&self, id: Uuid) -> Result<Option<PredictionRecord>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn latest_predictions(
        &self,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        self.repository.latest(limit).await
    }

    /// Newest prediction per date in the window, newest date first.
    pub async fn predictions_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        if start > end {
            return Err(DomainError::validation(
                "start_date must not be after end_date",
            ));
        }
        self.repository.by_date_range(start, end).await
    }

    pub async fn delete_prediction(&self, id: Uuid) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }

    /// Load a model and run a probe observation through the full feature
    /// and prediction path, without persisting anything.
    pub async fn validate_model(
        &self,
        model: Option<ModelSpec>,
    ) -> Result<ModelValidationReport, DomainError> {
        let spec = model.unwrap_or_else(|| ModelSpec::latest(&self.default_model));

        let (key, loaded) = self.models.resolve(&spec).await?;
        let features = FeatureVector::from_observation(&Self::probe_observation());
        let outcome = executor::execute(&loaded.handle, &features)?;

        info!(model = %key, prediction = outcome.predicted_count, "model validated");
        Ok(ModelValidationReport {
            model_name: key.name().to_string(),
            model_version: key.version().to_string(),
            registry_run_id: loaded.run_id,
            test_prediction: outcome.predicted_count,
            confidence_score: outcome.confidence_score,
        })
    }

    pub fn clear_model_cache(&self) {
        self.models.clear();
    }

    /// Fixed mid-summer readings used to exercise a model end to end.
    fn probe_observation() -> WeatherObservation {
        WeatherObservation {
            avg_temperature: Some(25.0),
            max_temperature: Some(30.0),
            min_temperature: Some(20.0),
            max_humidity: Some(80.0),
            min_humidity: Some(60.0),
            avg_humidity: Some(70.0),
            avg_wind_speed: Some(2.0),
            max_wind_speed: Some(5.0),
            min_wind_speed: Some(1.0),
            sunshine_hours_0_8: Some(3.0),
            sunshine_hours_9_16: Some(5.0),
            sunshine_hours_17_23: Some(2.0),
            total_sunshine_hours: Some(10.0),
            avg_pressure: Some(1013.0),
            max_pressure: Some(1015.0),
            min_pressure: Some(1010.0),
            precipitation_0_8: Some(0.0),
            precipitation_9_16: Some(0.0),
            precipitation_17_23: Some(0.0),
            total_precipitation: Some(0.0),
            wbgt_index: Some(28.0),
            max_accumulated_temp_10: Some(250.0),
            min_accumulated_temp_10: Some(200.0),
            daily_temperature_range: Some(10.0),
            summer_day: Some(true),
            very_hot_day: Some(false),
            extremely_hot_day: Some(false),
            extremely_hot_day_40over: Some(false),
            tropical_night: Some(false),
            winter_day: Some(false),
            very_cold_day: Some(false),
            last_day: Some(30.0),
            mv_avg10: Some(25.0),
            ..WeatherObservation::bare(Utc::now().date_naive())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::model::handle::mock::MockPredictor;
    use crate::domain::model::{
        LoadedModel, ModelHandle, ModelLoadError, ModelLoader, PredictorOutput,
    };
    use crate::domain::prediction::repository::mock::MockPredictionRepository;
    use crate::domain::InMemoryPredictionRepository;

    /// Loader serving a canned predictor, recording requested names.
    #[derive(Debug)]
    struct StubLoader {
        output: PredictorOutput,
        fail: bool,
        requested: Mutex<Vec<String>>,
        loads: AtomicUsize,
    }

    impl StubLoader {
        fn returning(output: PredictorOutput) -> Self {
            Self {
                output,
                fail: false,
                requested: Mutex::new(Vec::new()),
                loads: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::returning(PredictorOutput::Scalar(0.0))
            }
        }
    }

    #[async_trait]
    impl ModelLoader for StubLoader {
        async fn latest_version(&self, name: &str) -> Result<String, ModelLoadError> {
            self.requested.lock().unwrap().push(name.to_string());
            Ok("7".to_string())
        }

        async fn load(&self, name: &str, _version: &str) -> Result<LoadedModel, ModelLoadError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ModelLoadError::NotFound {
                    name: name.to_string(),
                    version: "7".to_string(),
                });
            }
            Ok(LoadedModel {
                handle: ModelHandle::Point(Arc::new(MockPredictor::returning(
                    self.output.clone(),
                ))),
                run_id: Some("run-7".to_string()),
            })
        }
    }

    fn service_with(
        repository: Arc<dyn PredictionRepository>,
        loader: Arc<StubLoader>,
    ) -> PredictionService {
        PredictionService::new(repository, Arc::new(ModelCache::new(loader)), "0926test")
    }

    fn observation() -> WeatherObservation {
        WeatherObservation::bare(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    }

    #[tokio::test]
    async fn test_predict_persists_record_with_resolved_version() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(41.4)));
        let service = service_with(repository.clone(), loader.clone());

        let record = service.predict(observation(), None).await.unwrap();

        assert_eq!(record.predicted_count(), 41);
        assert_eq!(record.model_name(), "0926test");
        assert_eq!(record.model_version(), "7");
        assert_eq!(record.registry_run_id(), Some("run-7"));
        assert_eq!(repository.count(), 1);
        // The default model name reached the loader.
        assert_eq!(
            loader.requested.lock().unwrap().as_slice(),
            ["0926test".to_string()]
        );
    }

    #[tokio::test]
    async fn test_predict_uses_caller_supplied_model() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(12.0)));
        let service = service_with(repository, loader);

        let record = service
            .predict(observation(), Some(ModelSpec::pinned("summer-v2", "4")))
            .await
            .unwrap();

        assert_eq!(record.model_name(), "summer-v2");
        assert_eq!(record.model_version(), "4");
    }

    #[tokio::test]
    async fn test_resolution_failure_persists_nothing() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::failing());
        let service = service_with(repository.clone(), loader);

        let result = service.predict(observation(), None).await;

        assert!(matches!(result, Err(DomainError::ModelResolution(_))));
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_execution_failure_persists_nothing() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Batch(vec![])));
        let service = service_with(repository.clone(), loader);

        let result = service.predict(observation(), None).await;

        assert!(matches!(
            result,
            Err(DomainError::PredictionExecution { .. })
        ));
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_storage_error() {
        let repository = Arc::new(MockPredictionRepository::new().with_error("disk full"));
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(10.0)));
        let service = service_with(repository, loader);

        let result = service.predict(observation(), None).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_inverted_date_range_is_a_validation_error() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(10.0)));
        let service = service_with(repository, loader);

        let result = service
            .predictions_by_date_range(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_validate_model_persists_nothing() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(38.6)));
        let service = service_with(repository.clone(), loader);

        let report = service.validate_model(None).await.unwrap();

        assert_eq!(report.model_name, "0926test");
        assert_eq!(report.model_version, "7");
        assert_eq!(report.test_prediction, 39);
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_clear_model_cache_forces_reload() {
        let repository = Arc::new(InMemoryPredictionRepository::new());
        let loader = Arc::new(StubLoader::returning(PredictorOutput::Scalar(10.0)));
        let service = service_with(repository, loader.clone());

        service.predict(observation(), None).await.unwrap();
        service.predict(observation(), None).await.unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);

        service.clear_model_cache();
        service.predict(observation(), None).await.unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }
}
