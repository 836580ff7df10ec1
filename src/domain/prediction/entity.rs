//! Prediction record entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields for a record about to be persisted. Identity and creation
/// timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub prediction_date: NaiveDate,
    pub predicted_count: u32,
    pub confidence_score: Option<f64>,
    pub model_name: String,
    pub model_version: String,
    pub registry_run_id: Option<String>,
}

/// A persisted dispatch-count prediction.
///
/// Immutable once created; removed only by explicit administrative
/// deletion. Several records may share a target date (one per prediction
/// call); the date-range query surfaces only the newest per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    id: Uuid,
    prediction_date: NaiveDate,
    predicted_count: u32,
    confidence_score: Option<f64>,
    model_name: String,
    model_version: String,
    registry_run_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Materialize a new record with a fresh id and creation timestamp.
    pub fn new(fields: NewPrediction) -> Self {
        Self {
            id: Uuid::new_v4(),
            prediction_date: fields.prediction_date,
            predicted_count: fields.predicted_count,
            confidence_score: fields.confidence_score,
            model_name: fields.model_name,
            model_version: fields.model_version,
            registry_run_id: fields.registry_run_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a record from already-persisted parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        prediction_date: NaiveDate,
        predicted_count: u32,
        confidence_score: Option<f64>,
        model_name: impl Into<String>,
        model_version: impl Into<String>,
        registry_run_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            prediction_date,
            predicted_count,
            confidence_score,
            model_name: model_name.into(),
            model_version: model_version.into(),
            registry_run_id,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prediction_date(&self) -> NaiveDate {
        self.prediction_date
    }

    pub fn predicted_count(&self) -> u32 {
        self.predicted_count
    }

    pub fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn registry_run_id(&self) -> Option<&str> {
        self.registry_run_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
