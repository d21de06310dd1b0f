use crate::domain::model::LookupResult;
use crate::utils::error::FetchError;
use async_trait::async_trait;

/// Performs one request against a fully-qualified endpoint.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> std::result::Result<LookupResult, FetchError>;
}
