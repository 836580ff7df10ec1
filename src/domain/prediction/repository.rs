//! Prediction repository trait

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::entity::{NewPrediction, PredictionRecord};
use crate::domain::DomainError;

/// Repository trait for prediction persistence
#[async_trait]
pub trait PredictionRepository: Send + Sync + Debug {
    /// Persist a new record, assigning identity and creation timestamp.
    /// The write is atomic: on any failure nothing is stored.
    async fn create(&self, fields: NewPrediction) -> Result<PredictionRecord, DomainError>;

    /// Get a record by id
    async fn get(&self, id: Uuid) -> Result<Option<PredictionRecord>, DomainError>;

    /// The `limit` most recently created records, regardless of target date
    async fn latest(&self, limit: usize) -> Result<Vec<PredictionRecord>, DomainError>;

    /// One record per calendar date in `[start, end]` inclusive: the
    /// newest-created for that date. Dates without records are absent from
    /// the result. Ordered by target date, descending. Callers guarantee
    /// `start <= end`; an inverted range yields an empty list, not an error.
    async fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PredictionRecord>, DomainError>;

    /// Administrative deletion, returns true if a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// In-memory implementation of PredictionRepository
pub mod in_memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory implementation for development and tests
    #[derive(Debug, Default)]
    pub struct InMemoryPredictionRepository {
        records: Mutex<HashMap<Uuid, PredictionRecord>>,
    }

    impl InMemoryPredictionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a fully-built record, keeping its id and timestamps.
        pub fn with_record(self, record: PredictionRecord) -> Self {
            self.records.lock().unwrap().insert(record.id(), record);
            self
        }

        pub fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PredictionRepository for InMemoryPredictionRepository {
        async fn create(&self, fields: NewPrediction) -> Result<PredictionRecord, DomainError> {
            let record = PredictionRecord::new(fields);
            let mut records = self.records.lock().unwrap();

            if records.contains_key(&record.id()) {
                return Err(DomainError::conflict(format!(
                    "Prediction with id '{}' already exists",
                    record.id()
                )));
            }

            records.insert(record.id(), record.clone());
            Ok(record)
        }

        async fn get(&self, id: Uuid) -> Result<Option<PredictionRecord>, DomainError> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn latest(&self, limit: usize) -> Result<Vec<PredictionRecord>, DomainError> {
            let mut records: Vec<PredictionRecord> =
                self.records.lock().unwrap().values().cloned().collect();

            // Id as tiebreak keeps equal-timestamp ordering stable.
            records.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| a.id().cmp(&b.id()))
            });
            records.truncate(limit);
            Ok(records)
        }

        async fn by_date_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<PredictionRecord>, DomainError> {
            let records = self.records.lock().unwrap();

            let mut latest_per_date: HashMap<NaiveDate, PredictionRecord> = HashMap::new();
            for record in records.values() {
                let date = record.prediction_date();
                if date < start || date > end {
                    continue;
                }
                let newer = latest_per_date
                    .get(&date)
                    .map_or(true, |existing| existing.created_at() < record.created_at());
                if newer {
                    latest_per_date.insert(date, record.clone());
                }
            }

            let mut result: Vec<PredictionRecord> = latest_per_date.into_values().collect();
            result.sort_by(|a, b| b.prediction_date().cmp(&a.prediction_date()));
            Ok(result)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            Ok(self.records.lock().unwrap().remove(&id).is_some())
        }
    }
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Mock repository for testing failure paths
    #[derive(Debug, Default)]
    pub struct MockPredictionRepository {
        records: Mutex<HashMap<Uuid, PredictionRecord>>,
        error: Mutex<Option<String>>,
    }

    impl MockPredictionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().as_ref() {
                return Err(DomainError::storage(error.clone()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PredictionRepository for MockPredictionRepository {
        async fn create(&self, fields: NewPrediction) -> Result<PredictionRecord, DomainError> {
            self.check_error()?;
            let record = PredictionRecord::new(fields);
            self.records
                .lock()
                .unwrap()
                .insert(record.id(), record.clone());
            Ok(record)
        }

        async fn get(&self, id: Uuid) -> Result<Option<PredictionRecord>, DomainError> {
            self.check_error()?;
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn latest(&self, limit: usize) -> Result<Vec<PredictionRecord>, DomainError> {
            self.check_error()?;
            let mut records: Vec<PredictionRecord> =
                self.records.lock().unwrap().values().cloned().collect();
            records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            records.truncate(limit);
            Ok(records)
        }

        async fn by_date_range(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PredictionRecord>, DomainError> {
            self.check_error()?;
            Ok(Vec::new())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.records.lock().unwrap().remove(&id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::in_memory::InMemoryPredictionRepository;
    use super::mock::MockPredictionRepository;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_at(
        prediction_date: NaiveDate,
        predicted_count: u32,
        created_secs: i64,
    ) -> PredictionRecord {
        PredictionRecord::from_parts(
            Uuid::new_v4(),
            prediction_date,
            predicted_count,
            None,
            "0926test",
            "3",
            None,
            Utc.timestamp_opt(created_secs, 0).unwrap(),
        )
    }

    fn new_prediction(prediction_date: NaiveDate, predicted_count: u32) -> NewPrediction {
        NewPrediction {
            prediction_date,
            predicted_count,
            confidence_score: None,
            model_name: "0926test".to_string(),
            model_version: "3".to_string(),
            registry_run_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let repo = InMemoryPredictionRepository::new();

        let created = repo
            .create(new_prediction(date(2024, 1, 15), 42))
            .await
            .unwrap();
        let fetched = repo.get(created.id()).await.unwrap().unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryPredictionRepository::new();
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_date_range_returns_newest_per_date_descending() {
        let jan15 = date(2024, 1, 15);
        let jan16 = date(2024, 1, 16);
        let repo = InMemoryPredictionRepository::new()
            .with_record(record_at(jan15, 10, 1_000))
            .with_record(record_at(jan15, 20, 2_000))
            .with_record(record_at(jan15, 30, 3_000))
            .with_record(record_at(jan16, 5, 1_500));

        let result = repo.by_date_range(jan15, jan16).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].prediction_date(), jan16);
        assert_eq!(result[0].predicted_count(), 5);
        assert_eq!(result[1].prediction_date(), jan15);
        assert_eq!(result[1].predicted_count(), 30);
    }

    #[tokio::test]
    async fn test_date_range_excludes_dates_outside_window() {
        let repo = InMemoryPredictionRepository::new()
            .with_record(record_at(date(2024, 1, 14), 9, 1_000))
            .with_record(record_at(date(2024, 1, 15), 10, 1_000))
            .with_record(record_at(date(2024, 1, 17), 11, 1_000));

        let result = repo
            .by_date_range(date(2024, 1, 15), date(2024, 1, 16))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].prediction_date(), date(2024, 1, 15));
    }

    #[tokio::test]
    async fn test_empty_window_returns_empty_sequence() {
        let repo = InMemoryPredictionRepository::new();
        let result = repo
            .by_date_range(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_inverted_range_returns_empty_sequence() {
        let repo =
            InMemoryPredictionRepository::new().with_record(record_at(date(2024, 1, 15), 10, 1_000));

        let result = repo
            .by_date_range(date(2024, 1, 16), date(2024, 1, 15))
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_latest_orders_by_creation_and_truncates() {
        let repo = InMemoryPredictionRepository::new()
            .with_record(record_at(date(2024, 1, 15), 10, 1_000))
            .with_record(record_at(date(2024, 1, 10), 20, 3_000))
            .with_record(record_at(date(2024, 1, 20), 30, 2_000));

        let result = repo.latest(2).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].predicted_count(), 20);
        assert_eq!(result[1].predicted_count(), 30);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryPredictionRepository::new();
        let created = repo
            .create(new_prediction(date(2024, 1, 15), 42))
            .await
            .unwrap();

        assert!(repo.delete(created.id()).await.unwrap());
        assert!(!repo.delete(created.id()).await.unwrap());
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_store_unchanged() {
        let repo = MockPredictionRepository::new().with_error("duplicate key value");

        let result = repo.create(new_prediction(date(2024, 1, 15), 42)).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert_eq!(repo.count(), 0);
    }
}
