//! Prediction endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DateRangeQuery, LatestQuery, PredictRequest, PredictionResponse,
    ValidateModelRequest,
};
use crate::infrastructure::services::ModelValidationReport;

/// `POST /predictions` - predict and persist
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let model = request.model_spec();
    let record = state
        .predictions
        .predict(request.weather.into_observation(), model)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// `GET /predictions/{id}`
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let record = state
        .predictions
        .prediction(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Prediction '{id}' not found")))?;

    Ok(Json(record.into()))
}

/// `GET /predictions/latest?limit=N`
pub async fn latest_predictions(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    query
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let records = state.predictions.latest_predictions(query.limit).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// `GET /predictions/range?start_date=..&end_date=..` - newest per date
pub async fn predictions_by_date_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let records = state
        .predictions
        .predictions_by_date_range(query.start_date, query.end_date)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// `DELETE /predictions/{id}` - administrative removal
pub async fn delete_prediction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.predictions.delete_prediction(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Prediction '{id}' not found")))
    }
}

/// `POST /models/validate` - load a model and run a probe prediction
pub async fn validate_model(
    State(state): State<AppState>,
    Json(request): Json<ValidateModelRequest>,
) -> Result<Json<ModelValidationReport>, ApiError> {
    let report = state
        .predictions
        .validate_model(request.model_spec())
        .await?;

    Ok(Json(report))
}
