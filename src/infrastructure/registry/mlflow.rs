//! MLflow-compatible model registry client
//!
//! Speaks the registry's REST API: model versions are discovered through
//! `model-versions/search` / `model-versions/get`, and the exported model
//! document is fetched from the run's artifacts.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::domain::model::{LoadedModel, ModelLoadError, ModelLoader};

use super::artifact::ModelDocument;

const MODEL_ARTIFACT_PATH: &str = "model.json";

/// REST client for the model registry.
#[derive(Debug, Clone)]
pub struct MlflowRegistry {
    http: Client,
    base_url: String,
    username: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchVersionsResponse {
    #[serde(default)]
    model_versions: Vec<VersionInfo>,
}

#[derive(Debug, Deserialize)]
struct GetVersionResponse {
    model_version: VersionInfo,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    version: String,
    #[serde(default)]
    run_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RegistryErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl MlflowRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.tracking_uri.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token: config.token.clone(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(format!("{}{path}", self.base_url));
        match (&self.username, &self.token) {
            (Some(username), token) => request.basic_auth(username, token.as_deref()),
            _ => request,
        }
    }

    /// Classify a non-success response. The taxonomy mirrors what the
    /// registry reports: missing resources, rejected credentials, anything
    /// else.
    async fn classify(
        response: reqwest::Response,
        name: &str,
        version: &str,
    ) -> ModelLoadError {
        let status = response.status();
        let body: RegistryErrorBody = response.json().await.unwrap_or_default();
        let detail = body
            .message
            .unwrap_or_else(|| format!("registry returned {status}"));

        if status == StatusCode::NOT_FOUND
            || body.error_code.as_deref() == Some("RESOURCE_DOES_NOT_EXIST")
        {
            return ModelLoadError::NotFound {
                name: name.to_string(),
                version: version.to_string(),
            };
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ModelLoadError::unauthorized(detail);
        }
        ModelLoadError::other(detail)
    }

    fn transport(error: reqwest::Error) -> ModelLoadError {
        ModelLoadError::other(format!("registry request failed: {error}"))
    }
}

#[async_trait]
impl ModelLoader for MlflowRegistry {
    async fn latest_version(&self, name: &str) -> Result<String, ModelLoadError> {
        let response = self
            .get("/api/2.0/mlflow/model-versions/search")
            .query(&[("filter", format!("name='{name}'"))])
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::classify(response, name, "latest").await);
        }

        let versions: SearchVersionsResponse = response.json().await.map_err(Self::transport)?;
        let latest = versions
            .model_versions
            .into_iter()
            .max_by_key(|info| info.version.parse::<u64>().unwrap_or(0))
            .ok_or_else(|| ModelLoadError::NotFound {
                name: name.to_string(),
                version: "latest".to_string(),
            })?;

        debug!(model = name, version = %latest.version, "resolved latest model version");
        Ok(latest.version)
    }

    async fn load(&self, name: &str, version: &str) -> Result<LoadedModel, ModelLoadError> {
        let response = self
            .get("/api/2.0/mlflow/model-versions/get")
            .query(&[("name", name), ("version", version)])
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::classify(response, name, version).await);
        }

        let info: GetVersionResponse = response.json().await.map_err(Self::transport)?;
        let run_id = info.model_version.run_id.clone().ok_or_else(|| {
            ModelLoadError::other(format!(
                "model '{name}' version '{version}' has no run reference"
            ))
        })?;

        let response = self
            .get("/get-artifact")
            .query(&[("path", MODEL_ARTIFACT_PATH), ("run_id", &run_id)])
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::classify(response, name, version).await);
        }

        let document: ModelDocument = response.json().await.map_err(Self::transport)?;
        let handle = document.into_handle()?;

        info!(model = name, version, run_id = %run_id, "loaded model from registry");
        Ok(LoadedModel {
            handle,
            run_id: Some(run_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::features::FEATURE_COUNT;
    use crate::domain::model::ModelHandle;

    fn registry(server: &MockServer) -> MlflowRegistry {
        MlflowRegistry::new(&RegistryConfig {
            tracking_uri: server.uri(),
            username: None,
            token: None,
        })
    }

    #[tokio::test]
    async fn test_latest_version_picks_numerically_highest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/search"))
            .and(query_param("filter", "name='0926test'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model_versions": [
                    {"version": "9", "run_id": "run-9"},
                    {"version": "10", "run_id": "run-10"},
                    {"version": "2", "run_id": "run-2"},
                ]
            })))
            .mount(&server)
            .await;

        let version = registry(&server).latest_version("0926test").await.unwrap();
        assert_eq!(version, "10");
    }

    #[tokio::test]
    async fn test_latest_version_of_unknown_model_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"model_versions": []})),
            )
            .mount(&server)
            .await;

        let result = registry(&server).latest_version("missing").await;
        assert!(matches!(result, Err(ModelLoadError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_fetches_version_and_artifact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/get"))
            .and(query_param("name", "0926test"))
            .and(query_param("version", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model_version": {"version": "3", "run_id": "run-3"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get-artifact"))
            .and(query_param("path", "model.json"))
            .and(query_param("run_id", "run-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "flavor": "linear",
                "intercept": 40.0,
                "coefficients": vec![0.0; FEATURE_COUNT],
            })))
            .mount(&server)
            .await;

        let loaded = registry(&server).load("0926test", "3").await.unwrap();

        assert_eq!(loaded.run_id.as_deref(), Some("run-3"));
        assert!(matches!(loaded.handle, ModelHandle::Point(_)));
    }

    #[tokio::test]
    async fn test_missing_version_is_classified_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/get"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error_code": "RESOURCE_DOES_NOT_EXIST",
                "message": "Model version does not exist",
            })))
            .mount(&server)
            .await;

        let result = registry(&server).load("0926test", "99").await;
        assert!(matches!(
            result,
            Err(ModelLoadError::NotFound { name, version }) if name == "0926test" && version == "99"
        ));
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_classified_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/get"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "invalid token",
            })))
            .mount(&server)
            .await;

        let result = registry(&server).load("0926test", "3").await;
        assert!(matches!(result, Err(ModelLoadError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_server_error_is_classified_other() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/mlflow/model-versions/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = registry(&server).latest_version("0926test").await;
        assert!(matches!(result, Err(ModelLoadError::Other { .. })));
    }
}
