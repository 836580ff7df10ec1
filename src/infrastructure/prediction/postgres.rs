//! PostgreSQL prediction repository with connection pooling

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::domain::prediction::{NewPrediction, PredictionRecord, PredictionRepository};
use crate::domain::DomainError;

const COLUMNS: &str = "id, prediction_date, predicted_count, confidence_score, \
                       model_name, model_version, registry_run_id, created_at";

/// PostgreSQL implementation of [`PredictionRepository`].
#[derive(Debug, Clone)]
pub struct PostgresPredictionRepository {
    pool: PgPool,
}

impl PostgresPredictionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool using the database configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let url = config.url.as_deref().ok_or_else(|| {
            DomainError::configuration("database.url is required for the Postgres store")
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| DomainError::storage(format!("failed to connect to PostgreSQL: {e}")))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the predictions table and its target-date index if missing.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dispatch_predictions (
                id UUID PRIMARY KEY,
                prediction_date DATE NOT NULL,
                predicted_count INTEGER NOT NULL,
                confidence_score DOUBLE PRECISION,
                model_name VARCHAR(100) NOT NULL,
                model_version VARCHAR(50) NOT NULL,
                registry_run_id VARCHAR(100),
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("failed to create table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_dispatch_predictions_date \
             ON dispatch_predictions (prediction_date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("failed to create index: {e}")))?;

        Ok(())
    }

    fn record_from_row(row: &PgRow) -> Result<PredictionRecord, DomainError> {
        let map = |e: sqlx::Error| DomainError::storage(format!("failed to read row: {e}"));

        let predicted_count: i32 = row.try_get("predicted_count").map_err(map)?;
        Ok(PredictionRecord::from_parts(
            row.try_get::<Uuid, _>("id").map_err(map)?,
            row.try_get::<NaiveDate, _>("prediction_date").map_err(map)?,
            predicted_count.max(0) as u32,
            row.try_get::<Option<f64>, _>("confidence_score")
                .map_err(map)?,
            row.try_get::<String, _>("model_name").map_err(map)?,
            row.try_get::<String, _>("model_version").map_err(map)?,
            row.try_get::<Option<String>, _>("registry_run_id")
                .map_err(map)?,
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
        ))
    }
}

#[async_trait]
impl PredictionRepository for PostgresPredictionRepository {
    async fn create(&self, fields: NewPrediction) -> Result<PredictionRecord, DomainError> {
        let record = PredictionRecord::new(fields);

        // Single-statement transaction: either the full row commits or the
        // store is left untouched.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("failed to begin transaction: {e}")))?;

        sqlx::query(
            "INSERT INTO dispatch_predictions \
             (id, prediction_date, predicted_count, confidence_score, \
              model_name, model_version, registry_run_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id())
        .bind(record.prediction_date())
        .bind(record.predicted_count() as i32)
        .bind(record.confidence_score())
        .bind(record.model_name())
        .bind(record.model_version())
        .bind(record.registry_run_id())
        .bind(record.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                DomainError::conflict(format!("prediction '{}' already exists", record.id()))
            } else {
                DomainError::storage(format!("failed to create prediction: {e}"))
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("failed to commit prediction: {e}")))?;

        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PredictionRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM dispatch_predictions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("failed to fetch prediction: {e}")))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn latest(&self, limit: usize) -> Result<Vec<PredictionRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM dispatch_predictions \
             ORDER BY created_at DESC, id LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("failed to fetch predictions: {e}")))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        // Latest-per-date window: DISTINCT ON keeps the first row per date,
        // which the ordering makes the newest-created one. An inverted
        // range matches nothing and falls out as an empty result.
        let rows = sqlx::query(&format!(
            "SELECT DISTINCT ON (prediction_date) {COLUMNS} \
             FROM dispatch_predictions \
             WHERE prediction_date BETWEEN $1 AND $2 \
             ORDER BY prediction_date DESC, created_at DESC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("failed to fetch predictions: {e}")))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM dispatch_predictions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("failed to delete prediction: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
