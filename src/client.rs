use reqwest::Client;

use crate::config::AppConfig;
use crate::errors::FetchError;
use crate::models::audit::{ParsedBatch, parse_batch};

/// Reads audit logs from the upstream API. One GET per call, no retry.
#[derive(Clone)]
pub struct AuditClient {
    http: Client,
    url: String,
}

impl AuditClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("caresync-audit/", env!("CARGO_PKG_VERSION")))
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self { http, url: config.api_url.clone() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<ParsedBatch, FetchError> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.text().await?;
        let batch = parse_batch(&body)?;
        for issue in &batch.rejected {
            log::warn!("Rejected audit record from {}: {issue}", self.url);
        }
        Ok(batch)
    }
}
