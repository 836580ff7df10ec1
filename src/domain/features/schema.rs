//! Canonical feature schema consumed by served models

/// Numeric kind of a feature column.
///
/// Served models enforce strict input dtypes; emitting the wrong kind makes
/// inference fail or silently mis-coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureDtype {
    Float,
    Int,
}

/// One column of the canonical schema.
#[derive(Debug, Clone, Copy)]
pub struct FeatureColumn {
    pub name: &'static str,
    pub dtype: FeatureDtype,
}

const fn float(name: &'static str) -> FeatureColumn {
    FeatureColumn {
        name,
        dtype: FeatureDtype::Float,
    }
}

const fn int(name: &'static str) -> FeatureColumn {
    FeatureColumn {
        name,
        dtype: FeatureDtype::Int,
    }
}

/// Canonical column order: 3 date-derived columns followed by 33
/// observation-derived columns. Models are trained against exactly this
/// layout, so order and dtypes here are part of the serving contract. The
/// date columns are floating-point, matching the convention the models were
/// trained with.
pub const FEATURE_SCHEMA: [FeatureColumn; 36] = [
    float("year"),
    float("month"),
    float("day"),
    float("avg_temperature"),
    float("max_temperature"),
    float("min_temperature"),
    float("max_humidity"),
    float("min_humidity"),
    float("avg_humidity"),
    float("avg_wind_speed"),
    float("max_wind_speed"),
    float("min_wind_speed"),
    float("sunshine_hours_0_8"),
    float("sunshine_hours_9_16"),
    float("sunshine_hours_17_23"),
    float("total_sunshine_hours"),
    float("avg_pressure"),
    float("max_pressure"),
    float("min_pressure"),
    float("precipitation_0_8"),
    float("precipitation_9_16"),
    float("precipitation_17_23"),
    float("total_precipitation"),
    float("wbgt_index"),
    float("max_accumulated_temp_10"),
    float("min_accumulated_temp_10"),
    float("daily_temperature_range"),
    int("summer_day"),
    int("very_hot_day"),
    int("extremely_hot_day"),
    int("extremely_hot_day_40over"),
    int("tropical_night"),
    int("winter_day"),
    int("very_cold_day"),
    float("last_day"),
    int("mv_avg10"),
];

/// Width of every feature vector.
pub const FEATURE_COUNT: usize = FEATURE_SCHEMA.len();

/// Position of a column in the canonical order.
pub fn column_index(name: &str) -> Option<usize> {
    FEATURE_SCHEMA.iter().position(|column| column.name == name)
}
