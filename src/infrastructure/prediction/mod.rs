//! Prediction persistence backends

pub mod postgres;

pub use postgres::PostgresPredictionRepository;
