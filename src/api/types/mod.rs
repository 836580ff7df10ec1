//! Wire types for the HTTP surface

pub mod error;
pub mod prediction;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use prediction::{
    DateRangeQuery, LatestQuery, PredictRequest, PredictionResponse, ValidateModelRequest,
    WeatherPayload,
};
