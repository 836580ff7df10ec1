//! Weather observation input for the prediction pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's weather readings, as delivered by the request layer.
///
/// Every field except the date is optional: absence is a valid state, not an
/// error, and is imputed by the feature builder. Observations are never
/// persisted; they live for the duration of a single prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// The calendar date the prediction targets
    pub date: NaiveDate,

    // Temperatures (°C)
    pub avg_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,

    // Humidity (%)
    pub max_humidity: Option<f64>,
    pub min_humidity: Option<f64>,
    pub avg_humidity: Option<f64>,

    // Wind speed (m/s)
    pub avg_wind_speed: Option<f64>,
    pub max_wind_speed: Option<f64>,
    pub min_wind_speed: Option<f64>,

    // Sunshine duration by time window (hours)
    pub sunshine_hours_0_8: Option<f64>,
    pub sunshine_hours_9_16: Option<f64>,
    pub sunshine_hours_17_23: Option<f64>,
    pub total_sunshine_hours: Option<f64>,

    // Pressure (hPa)
    pub avg_pressure: Option<f64>,
    pub max_pressure: Option<f64>,
    pub min_pressure: Option<f64>,

    // Precipitation by time window (mm)
    pub precipitation_0_8: Option<f64>,
    pub precipitation_9_16: Option<f64>,
    pub precipitation_17_23: Option<f64>,
    pub total_precipitation: Option<f64>,

    /// Simplified wet-bulb globe temperature (heat-stress index)
    pub wbgt_index: Option<f64>,

    // Accumulated-temperature aggregates over the trailing 10 days
    pub max_accumulated_temp_10: Option<f64>,
    pub min_accumulated_temp_10: Option<f64>,

    /// Difference between the day's max and min temperature
    pub daily_temperature_range: Option<f64>,

    // Day-type flags
    pub summer_day: Option<bool>,
    pub very_hot_day: Option<bool>,
    pub extremely_hot_day: Option<bool>,
    pub extremely_hot_day_40over: Option<bool>,
    pub tropical_night: Option<bool>,
    pub winter_day: Option<bool>,
    pub very_cold_day: Option<bool>,

    // Lag features
    /// Dispatch count observed on the previous day
    pub last_day: Option<f64>,
    /// Trailing 10-day moving average of dispatch counts
    pub mv_avg10: Option<f64>,
}

impl WeatherObservation {
    /// An observation with only the date set and every reading absent.
    pub fn bare(date: NaiveDate) -> Self {
        Self {
            date,
            avg_temperature: None,
            max_temperature: None,
            min_temperature: None,
            max_humidity: None,
            min_humidity: None,
            avg_humidity: None,
            avg_wind_speed: None,
            max_wind_speed: None,
            min_wind_speed: None,
            sunshine_hours_0_8: None,
            sunshine_hours_9_16: None,
            sunshine_hours_17_23: None,
            total_sunshine_hours: None,
            avg_pressure: None,
            max_pressure: None,
            min_pressure: None,
            precipitation_0_8: None,
            precipitation_9_16: None,
            precipitation_17_23: None,
            total_precipitation: None,
            wbgt_index: None,
            max_accumulated_temp_10: None,
            min_accumulated_temp_10: None,
            daily_temperature_range: None,
            summer_day: None,
            very_hot_day: None,
            extremely_hot_day: None,
            extremely_hot_day_40over: None,
            tropical_night: None,
            winter_day: None,
            very_cold_day: None,
            last_day: None,
            mv_avg10: None,
        }
    }
}
