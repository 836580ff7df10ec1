//! Feature vector construction from weather observations

use chrono::Datelike;
use serde::Serialize;

use super::schema::{FeatureDtype, FEATURE_COUNT};
use crate::domain::weather::WeatherObservation;

/// Default imputation values for absent observation fields.
///
/// These are physically plausible per-field values, not a universal zero:
/// they silently shape model output, so changing any of them is an
/// observable behavior change and must be treated as one.
pub mod defaults {
    pub const AVG_TEMPERATURE: f64 = 0.0;
    pub const MAX_TEMPERATURE: f64 = 0.0;
    pub const MIN_TEMPERATURE: f64 = 0.0;
    pub const MAX_HUMIDITY: f64 = 70.0;
    pub const MIN_HUMIDITY: f64 = 50.0;
    pub const AVG_HUMIDITY: f64 = 60.0;
    pub const AVG_WIND_SPEED: f64 = 2.0;
    pub const MAX_WIND_SPEED: f64 = 5.0;
    pub const MIN_WIND_SPEED: f64 = 1.0;
    pub const SUNSHINE_HOURS_0_8: f64 = 3.0;
    pub const SUNSHINE_HOURS_9_16: f64 = 5.0;
    pub const SUNSHINE_HOURS_17_23: f64 = 2.0;
    pub const TOTAL_SUNSHINE_HOURS: f64 = 10.0;
    pub const AVG_PRESSURE: f64 = 1013.0;
    pub const MAX_PRESSURE: f64 = 1015.0;
    pub const MIN_PRESSURE: f64 = 1010.0;
    pub const PRECIPITATION_0_8: f64 = 0.0;
    pub const PRECIPITATION_9_16: f64 = 0.0;
    pub const PRECIPITATION_17_23: f64 = 0.0;
    pub const TOTAL_PRECIPITATION: f64 = 0.0;
    pub const WBGT_INDEX: f64 = 25.0;
    pub const MAX_ACCUMULATED_TEMP_10: f64 = 250.0;
    pub const MIN_ACCUMULATED_TEMP_10: f64 = 200.0;
    pub const DAILY_TEMPERATURE_RANGE: f64 = 10.0;
    pub const LAST_DAY: f64 = 30.0;
    pub const MV_AVG10: i64 = 25;
}

/// A single feature cell, tagged with its numeric kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Float(f64),
    Int(i64),
}

impl FeatureValue {
    pub fn dtype(&self) -> FeatureDtype {
        match self {
            Self::Float(_) => FeatureDtype::Float,
            Self::Int(_) => FeatureDtype::Int,
        }
    }

    /// Numeric value regardless of kind, for dot products and the like.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Float(v) => *v,
            Self::Int(v) => *v as f64,
        }
    }
}

/// An ordered row of features aligned to [`FEATURE_SCHEMA`].
///
/// Column order and dtypes are identical for every vector produced,
/// regardless of which observation fields were present.
///
/// [`FEATURE_SCHEMA`]: super::schema::FEATURE_SCHEMA
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<FeatureValue>,
}

impl FeatureVector {
    /// Build the canonical feature row for an observation.
    ///
    /// Total over the observation domain: absent fields take their
    /// documented default, boolean flags coerce to 0/1 with absence mapping
    /// to 0, and `mv_avg10` is truncated to its integer column kind.
    pub fn from_observation(observation: &WeatherObservation) -> Self {
        use defaults as d;
        use FeatureValue::{Float, Int};

        let date = observation.date;
        let flag = |value: Option<bool>| Int(i64::from(value.unwrap_or(false)));

        let values = vec![
            Float(f64::from(date.year())),
            Float(f64::from(date.month())),
            Float(f64::from(date.day())),
            Float(observation.avg_temperature.unwrap_or(d::AVG_TEMPERATURE)),
            Float(observation.max_temperature.unwrap_or(d::MAX_TEMPERATURE)),
            Float(observation.min_temperature.unwrap_or(d::MIN_TEMPERATURE)),
            Float(observation.max_humidity.unwrap_or(d::MAX_HUMIDITY)),
            Float(observation.min_humidity.unwrap_or(d::MIN_HUMIDITY)),
            Float(observation.avg_humidity.unwrap_or(d::AVG_HUMIDITY)),
            Float(observation.avg_wind_speed.unwrap_or(d::AVG_WIND_SPEED)),
            Float(observation.max_wind_speed.unwrap_or(d::MAX_WIND_SPEED)),
            Float(observation.min_wind_speed.unwrap_or(d::MIN_WIND_SPEED)),
            Float(
                observation
                    .sunshine_hours_0_8
                    .unwrap_or(d::SUNSHINE_HOURS_0_8),
            ),
            Float(
                observation
                    .sunshine_hours_9_16
                    .unwrap_or(d::SUNSHINE_HOURS_9_16),
            ),
            Float(
                observation
                    .sunshine_hours_17_23
                    .unwrap_or(d::SUNSHINE_HOURS_17_23),
            ),
            Float(
                observation
                    .total_sunshine_hours
                    .unwrap_or(d::TOTAL_SUNSHINE_HOURS),
            ),
            Float(observation.avg_pressure.unwrap_or(d::AVG_PRESSURE)),
            Float(observation.max_pressure.unwrap_or(d::MAX_PRESSURE)),
            Float(observation.min_pressure.unwrap_or(d::MIN_PRESSURE)),
            Float(observation.precipitation_0_8.unwrap_or(d::PRECIPITATION_0_8)),
            Float(
                observation
                    .precipitation_9_16
                    .unwrap_or(d::PRECIPITATION_9_16),
            ),
            Float(
                observation
                    .precipitation_17_23
                    .unwrap_or(d::PRECIPITATION_17_23),
            ),
            Float(
                observation
                    .total_precipitation
                    .unwrap_or(d::TOTAL_PRECIPITATION),
            ),
            Float(observation.wbgt_index.unwrap_or(d::WBGT_INDEX)),
            Float(
                observation
                    .max_accumulated_temp_10
                    .unwrap_or(d::MAX_ACCUMULATED_TEMP_10),
            ),
            Float(
                observation
                    .min_accumulated_temp_10
                    .unwrap_or(d::MIN_ACCUMULATED_TEMP_10),
            ),
            Float(
                observation
                    .daily_temperature_range
                    .unwrap_or(d::DAILY_TEMPERATURE_RANGE),
            ),
            flag(observation.summer_day),
            flag(observation.very_hot_day),
            flag(observation.extremely_hot_day),
            flag(observation.extremely_hot_day_40over),
            flag(observation.tropical_night),
            flag(observation.winter_day),
            flag(observation.very_cold_day),
            Float(observation.last_day.unwrap_or(d::LAST_DAY)),
            Int(observation
                .mv_avg10
                .map(|v| v as i64)
                .unwrap_or(d::MV_AVG10)),
        ];

        debug_assert_eq!(values.len(), FEATURE_COUNT);
        Self { values }
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row as plain floats, in canonical column order.
    pub fn as_f64_row(&self) -> Vec<f64> {
        self.values.iter().map(FeatureValue::as_f64).collect()
    }
}
