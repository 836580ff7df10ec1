//! Loaded predictor handles

use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::features::FeatureVector;

/// Raw output of a predict call.
///
/// Registry models may emit a plain scalar or a one-row batch; the executor
/// normalizes to a scalar by taking the first element.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorOutput {
    Scalar(f64),
    Batch(Vec<f64>),
}

/// An invocable predictor over the canonical feature schema.
pub trait Predictor: Send + Sync + Debug {
    fn predict(&self, features: &FeatureVector) -> Result<PredictorOutput, DomainError>;
}

/// A predictor that can also report a probability distribution over counts
/// for the row it just scored.
pub trait ConfidencePredictor: Predictor {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, DomainError>;
}

/// A loaded model, owned by the cache and used per call.
///
/// The confidence capability is explicit in the type: `Point` predictors
/// yield no confidence score, `Probabilistic` ones are asked for a
/// distribution. No call-time capability probing.
#[derive(Debug, Clone)]
pub enum ModelHandle {
    Point(Arc<dyn Predictor>),
    Probabilistic(Arc<dyn ConfidencePredictor>),
}

impl ModelHandle {
    /// Invoke the underlying predictor, whichever variant holds it.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictorOutput, DomainError> {
        match self {
            Self::Point(p) => p.predict(features),
            Self::Probabilistic(p) => p.predict(features),
        }
    }
}
