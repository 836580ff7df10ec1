use thiserror::Error;

use crate::domain::model::ModelLoadError;

/// Core domain errors
///
/// Each pipeline stage fails with its own variant so the request layer can
/// map outcomes to distinct responses. Confidence-extraction failures never
/// surface here; they degrade to an absent score inside the executor.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Model resolution failed: {0}")]
    ModelResolution(#[from] ModelLoadError),

    #[error("Prediction execution failed: {message}")]
    PredictionExecution { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn prediction_execution(message: impl Into<String>) -> Self {
        Self::PredictionExecution {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("start_date must not be after end_date");
        assert_eq!(
            error.to_string(),
            "Validation error: start_date must not be after end_date"
        );
    }

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Prediction 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Prediction 'abc' not found");
    }

    #[test]
    fn test_model_resolution_preserves_classification() {
        let error = DomainError::from(ModelLoadError::NotFound {
            name: "0926test".to_string(),
            version: "3".to_string(),
        });

        assert!(matches!(
            error,
            DomainError::ModelResolution(ModelLoadError::NotFound { .. })
        ));
    }
}
