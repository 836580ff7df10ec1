//! Prediction API payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{ModelSpec, PredictionRecord, WeatherObservation};

/// Request body for `POST /predictions`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(nested)]
    pub weather: WeatherPayload,
    pub model_name: Option<String>,
    pub model_version: Option<String>,
}

impl PredictRequest {
    /// The model the caller asked for, if any.
    pub fn model_spec(&self) -> Option<ModelSpec> {
        self.model_name.as_ref().map(|name| ModelSpec {
            name: name.clone(),
            version: self.model_version.clone(),
        })
    }
}

/// Weather readings as accepted on the wire, with the bounds the original
/// measurement sources guarantee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeatherPayload {
    pub date: NaiveDate,

    pub avg_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub max_humidity: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_humidity: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub avg_humidity: Option<f64>,

    #[validate(range(min = 0.0))]
    pub avg_wind_speed: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_wind_speed: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_wind_speed: Option<f64>,

    #[validate(range(min = 0.0, max = 8.0))]
    pub sunshine_hours_0_8: Option<f64>,
    #[validate(range(min = 0.0, max = 8.0))]
    pub sunshine_hours_9_16: Option<f64>,
    #[validate(range(min = 0.0, max = 7.0))]
    pub sunshine_hours_17_23: Option<f64>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub total_sunshine_hours: Option<f64>,

    pub avg_pressure: Option<f64>,
    pub max_pressure: Option<f64>,
    pub min_pressure: Option<f64>,

    #[validate(range(min = 0.0))]
    pub precipitation_0_8: Option<f64>,
    #[validate(range(min = 0.0))]
    pub precipitation_9_16: Option<f64>,
    #[validate(range(min = 0.0))]
    pub precipitation_17_23: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_precipitation: Option<f64>,

    pub wbgt_index: Option<f64>,
    pub max_accumulated_temp_10: Option<f64>,
    pub min_accumulated_temp_10: Option<f64>,
    pub daily_temperature_range: Option<f64>,

    pub summer_day: Option<bool>,
    pub very_hot_day: Option<bool>,
    pub extremely_hot_day: Option<bool>,
    pub extremely_hot_day_40over: Option<bool>,
    pub tropical_night: Option<bool>,
    pub winter_day: Option<bool>,
    pub very_cold_day: Option<bool>,

    pub last_day: Option<f64>,
    pub mv_avg10: Option<f64>,
}

impl WeatherPayload {
    pub fn into_observation(self) -> WeatherObservation {
        WeatherObservation {
            date: self.date,
            avg_temperature: self.avg_temperature,
            max_temperature: self.max_temperature,
            min_temperature: self.min_temperature,
            max_humidity: self.max_humidity,
            min_humidity: self.min_humidity,
            avg_humidity: self.avg_humidity,
            avg_wind_speed: self.avg_wind_speed,
            max_wind_speed: self.max_wind_speed,
            min_wind_speed: self.min_wind_speed,
            sunshine_hours_0_8: self.sunshine_hours_0_8,
            sunshine_hours_9_16: self.sunshine_hours_9_16,
            sunshine_hours_17_23: self.sunshine_hours_17_23,
            total_sunshine_hours: self.total_sunshine_hours,
            avg_pressure: self.avg_pressure,
            max_pressure: self.max_pressure,
            min_pressure: self.min_pressure,
            precipitation_0_8: self.precipitation_0_8,
            precipitation_9_16: self.precipitation_9_16,
            precipitation_17_23: self.precipitation_17_23,
            total_precipitation: self.total_precipitation,
            wbgt_index: self.wbgt_index,
            max_accumulated_temp_10: self.max_accumulated_temp_10,
            min_accumulated_temp_10: self.min_accumulated_temp_10,
            daily_temperature_range: self.daily_temperature_range,
            summer_day: self.summer_day,
            very_hot_day: self.very_hot_day,
            extremely_hot_day: self.extremely_hot_day,
            extremely_hot_day_40over: self.extremely_hot_day_40over,
            tropical_night: self.tropical_night,
            winter_day: self.winter_day,
            very_cold_day: self.very_cold_day,
            last_day: self.last_day,
            mv_avg10: self.mv_avg10,
        }
    }
}

/// Request body for `POST /models/validate`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateModelRequest {
    pub model_name: Option<String>,
    pub model_version: Option<String>,
}

impl ValidateModelRequest {
    pub fn model_spec(&self) -> Option<ModelSpec> {
        self.model_name.as_ref().map(|name| ModelSpec {
            name: name.clone(),
            version: self.model_version.clone(),
        })
    }
}

/// Query for `GET /predictions/latest`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LatestQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Query for `GET /predictions/range`
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A prediction record as returned on the wire
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub id: Uuid,
    pub prediction_date: NaiveDate,
    pub predicted_count: u32,
    pub confidence_score: Option<f64>,
    pub model_name: String,
    pub model_version: String,
    pub registry_run_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PredictionRecord> for PredictionResponse {
    fn from(record: PredictionRecord) -> Self {
        Self {
            id: record.id(),
            prediction_date: record.prediction_date(),
            predicted_count: record.predicted_count(),
            confidence_score: record.confidence_score(),
            model_name: record.model_name().to_string(),
            model_version: record.model_version().to_string(),
            registry_run_id: record.registry_run_id().map(str::to_string),
            created_at: record.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> WeatherPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_humidity_out_of_range_is_rejected() {
        let weather = payload(serde_json::json!({
            "date": "2024-07-15",
            "avg_humidity": 104.0,
        }));
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_negative_precipitation_is_rejected() {
        let weather = payload(serde_json::json!({
            "date": "2024-07-15",
            "total_precipitation": -1.0,
        }));
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_absent_fields_pass_validation() {
        let weather = payload(serde_json::json!({"date": "2024-07-15"}));
        assert!(weather.validate().is_ok());
    }

    #[test]
    fn test_model_spec_requires_a_name() {
        let request: PredictRequest = serde_json::from_value(serde_json::json!({
            "weather": {"date": "2024-07-15"},
            "model_version": "3",
        }))
        .unwrap();

        // A bare version without a name falls back to the default model.
        assert!(request.model_spec().is_none());
    }

    #[test]
    fn test_model_spec_carries_version() {
        let request: PredictRequest = serde_json::from_value(serde_json::json!({
            "weather": {"date": "2024-07-15"},
            "model_name": "0926test",
            "model_version": "3",
        }))
        .unwrap();

        assert_eq!(request.model_spec(), Some(ModelSpec::pinned("0926test", "3")));
    }
}
