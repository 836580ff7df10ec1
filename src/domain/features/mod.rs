//! Feature vector building: weather observation in, fixed-schema row out

pub mod schema;
pub mod vector;

pub use schema::{column_index, FeatureColumn, FeatureDtype, FEATURE_COUNT, FEATURE_SCHEMA};
pub use vector::{FeatureValue, FeatureVector};
