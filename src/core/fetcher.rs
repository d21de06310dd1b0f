use crate::domain::model::LookupResult;
use crate::domain::ports::Fetcher;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// [`Fetcher`] backed by a shared reqwest client. Default headers only, one GET per call.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// 解析回應內容，頂層必須是 JSON object
pub fn parse_document(endpoint: &str, body: &[u8]) -> Result<LookupResult, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::parse(endpoint, format!("invalid JSON: {}", e)))?;

    match value {
        serde_json::Value::Object(document) => Ok(document),
        other => Err(FetchError::parse(
            endpoint,
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<LookupResult, FetchError> {
        tracing::debug!("Making API request to: {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| FetchError::transport(endpoint, e.to_string()))?;

        let status = response.status();
        tracing::debug!("API response status from {}: {}", endpoint, status);

        if !status.is_success() {
            return Err(FetchError::transport(
                endpoint,
                format!("unexpected HTTP status {}", status),
            ));
        }

        // 先完整讀取 body 再解析
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(endpoint, format!("failed to read body: {}", e)))?;

        parse_document(endpoint, &body)
    }
}
