use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ServiceErrorBody,
    protocol::{FeatureCatalog, PredictionRequest, PredictionResult, ServiceInfo},
};
use tracing::debug;

pub mod coercion;
pub mod error;
pub mod form;
pub mod settings;
pub mod submission;

pub use coercion::{build_request, coerce_number};
pub use error::PredictError;
pub use form::{FormState, FormStore};
pub use settings::Settings;
pub use submission::{SubmissionController, SubmissionSnapshot, SubmissionState};

/// Remote prediction service as seen by the submission workflow.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError>;
}

/// HTTP client for the prediction service rooted at a configured base URL.
#[derive(Debug, Clone)]
pub struct PredictorClient {
    http: Client,
    base_url: String,
}

impl PredictorClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base_url(settings.api_base_url.as_str())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /`: service banner and endpoint listing.
    pub async fn service_info(&self) -> Result<ServiceInfo, PredictError> {
        let res = self.http.get(self.endpoint("/")).send().await?;
        decode_response(res).await
    }

    /// `GET /features`: feature descriptions published by the service.
    pub async fn feature_catalog(&self) -> Result<FeatureCatalog, PredictError> {
        let res = self.http.get(self.endpoint("/features")).send().await?;
        decode_response(res).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl PredictionApi for PredictorClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError> {
        let endpoint = self.endpoint("/predict");
        debug!(%endpoint, "posting prediction request");
        let res = self.http.post(endpoint).json(request).send().await?;
        decode_response(res).await
    }
}

async fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, PredictError> {
    let status = res.status();
    let body = res.bytes().await?;
    if !status.is_success() {
        return Err(PredictError::rejected(
            status.as_u16(),
            ServiceErrorBody::from_body(&body).into_message(),
        ));
    }
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
