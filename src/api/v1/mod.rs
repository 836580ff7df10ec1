//! Versioned API surface

pub mod predictions;

use axum::routing::{get, post};
use axum::Router;

use crate::api::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/predictions", post(predictions::create_prediction))
        .route("/predictions/latest", get(predictions::latest_predictions))
        .route(
            "/predictions/range",
            get(predictions::predictions_by_date_range),
        )
        .route(
            "/predictions/{id}",
            get(predictions::get_prediction).delete(predictions::delete_prediction),
        )
        .route("/models/validate", post(predictions::validate_model))
}
