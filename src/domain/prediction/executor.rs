//! Prediction execution: invoke a handle, normalize, round and clamp

use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::features::FeatureVector;
use crate::domain::model::{ModelHandle, PredictorOutput};

/// Result of one model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub predicted_count: u32,
    pub confidence_score: Option<f64>,
}

/// Run the handle on a single-row vector.
///
/// The raw output is rounded half-to-even and then clamped at zero, in that
/// order: a negative raw prediction becomes a count of 0, never an error.
/// Confidence extraction is best-effort and only attempted on probabilistic
/// handles; any failure there degrades to an absent score.
pub fn execute(
    handle: &ModelHandle,
    features: &FeatureVector,
) -> Result<ExecutionOutcome, DomainError> {
    let raw = handle.predict(features)?;

    let scalar = match raw {
        PredictorOutput::Scalar(value) => value,
        PredictorOutput::Batch(values) => values
            .first()
            .copied()
            .ok_or_else(|| DomainError::prediction_execution("model returned an empty batch"))?,
    };

    let rounded = scalar.round_ties_even();
    let predicted_count = if rounded < 0.0 { 0 } else { rounded as u32 };

    let confidence_score = match handle {
        ModelHandle::Point(_) => None,
        ModelHandle::Probabilistic(predictor) => match predictor.predict_proba(features) {
            Ok(probabilities) => probabilities.into_iter().reduce(f64::max),
            Err(error) => {
                warn!(error = %error, "confidence extraction failed, omitting score");
                None
            }
        },
    };

    Ok(ExecutionOutcome {
        predicted_count,
        confidence_score,
    })
}
