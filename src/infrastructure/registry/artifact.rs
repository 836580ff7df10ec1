//! Exported model documents fetched from the registry
//!
//! Each registered model version exports a `model.json` artifact describing
//! its serving form: an intercept plus one coefficient per canonical feature
//! column. The `linear` flavor scores counts directly; the `poisson` flavor
//! exponentiates the linear term into a rate, which doubles as a count
//! distribution for confidence reporting.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::features::{FeatureVector, FEATURE_COUNT};
use crate::domain::model::{
    ConfidencePredictor, ModelHandle, ModelLoadError, Predictor, PredictorOutput,
};

// Distribution support is truncated well past any plausible daily count.
const MAX_DISTRIBUTION_LEN: usize = 10_000;

/// Deserialized `model.json` artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "flavor", rename_all = "snake_case")]
pub enum ModelDocument {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Poisson {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl ModelDocument {
    /// Turn the document into an invocable handle, checking that its
    /// coefficients match the canonical schema width.
    pub fn into_handle(self) -> Result<ModelHandle, ModelLoadError> {
        let width = match &self {
            Self::Linear { coefficients, .. } | Self::Poisson { coefficients, .. } => {
                coefficients.len()
            }
        };
        if width != FEATURE_COUNT {
            return Err(ModelLoadError::other(format!(
                "model expects {width} features, canonical schema has {FEATURE_COUNT}"
            )));
        }

        Ok(match self {
            Self::Linear {
                intercept,
                coefficients,
            } => ModelHandle::Point(Arc::new(LinearModel {
                intercept,
                coefficients,
            })),
            Self::Poisson {
                intercept,
                coefficients,
            } => ModelHandle::Probabilistic(Arc::new(PoissonModel {
                intercept,
                coefficients,
            })),
        })
    }
}

fn linear_term(features: &FeatureVector, intercept: f64, coefficients: &[f64]) -> f64 {
    features
        .values()
        .iter()
        .zip(coefficients)
        .map(|(value, coefficient)| value.as_f64() * coefficient)
        .sum::<f64>()
        + intercept
}

/// Plain linear regressor over the canonical schema.
#[derive(Debug)]
struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<PredictorOutput, DomainError> {
        let value = linear_term(features, self.intercept, &self.coefficients);
        Ok(PredictorOutput::Batch(vec![value]))
    }
}

/// Poisson regressor: the exponentiated linear term is the expected count.
#[derive(Debug)]
struct PoissonModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl PoissonModel {
    fn rate(&self, features: &FeatureVector) -> Result<f64, DomainError> {
        let rate = linear_term(features, self.intercept, &self.coefficients).exp();
        if !rate.is_finite() {
            return Err(DomainError::prediction_execution(
                "poisson rate is not finite",
            ));
        }
        Ok(rate)
    }
}

impl Predictor for PoissonModel {
    fn predict(&self, features: &FeatureVector) -> Result<PredictorOutput, DomainError> {
        Ok(PredictorOutput::Batch(vec![self.rate(features)?]))
    }
}

impl ConfidencePredictor for PoissonModel {
    /// Poisson pmf over counts 0..=cap, where cap covers the bulk of the
    /// distribution's mass around the rate.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, DomainError> {
        let rate = self.rate(features)?;

        let cap = ((rate + 10.0 * rate.sqrt()).ceil() as usize + 1).min(MAX_DISTRIBUTION_LEN);
        let mut probabilities = Vec::with_capacity(cap);
        let mut p = (-rate).exp();
        for k in 0..cap {
            probabilities.push(p);
            p *= rate / (k as f64 + 1.0);
        }

        Ok(probabilities)
    }
}
