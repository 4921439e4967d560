use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;

use crate::{FailureKind, OperationRequest, RequestError, GENERIC_ERROR_DETAIL};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// IO seam for the staging service. Every call maps to exactly one HTTP
/// request; callers own retry policy (there is none) and scheduling.
#[async_trait::async_trait]
pub trait StagingApi: Send + Sync {
    /// Sends one operation to its endpoint and returns the service's
    /// success payload.
    async fn submit(&self, request: &OperationRequest) -> Result<serde_json::Value, RequestError>;

    /// Retrieves the current server log tail as raw text.
    async fn fetch_logs(&self) -> Result<String, RequestError>;

    /// Retrieves the server-declared staging methods, order preserved.
    async fn fetch_allowed_methods(&self) -> Result<Vec<String>, RequestError>;
}

#[derive(Debug, Deserialize)]
struct AllowedMethodsBody {
    allowed_methods: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestStagingClient {
    base: url::Url,
    http: reqwest::Client,
}

impl ReqwestStagingClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let base = parse_base_url(&settings.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, RequestError> {
        self.base
            .join(path)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_text(&self, url: url::Url) -> Result<String, RequestError> {
        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        read_success_body(response).await
    }

    async fn post_json(
        &self,
        url: url::Url,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, RequestError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let text = read_success_body(response).await?;
        serde_json::from_str(&text)
            .map_err(|err| RequestError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl StagingApi for ReqwestStagingClient {
    async fn submit(&self, request: &OperationRequest) -> Result<serde_json::Value, RequestError> {
        match request {
            OperationRequest::CreateFile { filename, content } => {
                let url = self.endpoint("create-file/")?;
                let body = json!({ "filename": filename, "content": content });
                self.post_json(url, body).await
            }
            OperationRequest::StageData {
                method,
                username,
                local_path,
                relative_path,
            } => {
                let mut url = self.endpoint("stage-data/")?;
                url.query_pairs_mut()
                    .append_pair("method", method)
                    .append_pair("username", username);
                let body = json!({
                    "data": {
                        "local_path_on_storage": local_path,
                        "relative_path": relative_path,
                    }
                });
                self.post_json(url, body).await
            }
        }
    }

    async fn fetch_logs(&self) -> Result<String, RequestError> {
        let url = self.endpoint("logs/")?;
        self.get_text(url).await
    }

    async fn fetch_allowed_methods(&self) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint("config/allowed-methods/")?;
        let text = self.get_text(url).await?;
        let body: AllowedMethodsBody = serde_json::from_str(&text)
            .map_err(|err| RequestError::new(FailureKind::MalformedResponse, err.to_string()))?;
        Ok(body.allowed_methods)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, RequestError> {
    let status = response.status();
    let text = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(service_error(status.as_u16(), &text));
    }
    Ok(text)
}

/// The service reports failures as `{"detail": ...}`. A string detail is
/// surfaced verbatim; any other shape falls back to the generic message.
fn service_error(status: u16, body: &str) -> RequestError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_ERROR_DETAIL.to_string());
    RequestError::new(FailureKind::Service { status }, detail)
}

// A trailing slash keeps `Url::join` from swallowing the last path segment
// when the service is mounted under a subpath.
fn parse_base_url(raw: &str) -> Result<url::Url, RequestError> {
    let mut normalized = raw.trim_end_matches('/').to_string();
    normalized.push('/');
    url::Url::parse(&normalized)
        .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
