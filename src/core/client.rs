use crate::config::ClientConfig;
use crate::domain::model::{
    BadgeQuery, BadgeStatus, HistoryQuery, MintRequest, MintResult, ScanHistory, ScanRequest,
    ScanResult,
};
use crate::domain::ports::SolenceApi;
use crate::utils::error::{Result, SolenceError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Sent as `X-API-Key`; header names are case-insensitive on the wire.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the Solence API.
///
/// Configuration is fixed at construction. The API key, when present, is
/// installed as a default header so it rides along on every request.
pub struct SolenceClient {
    config: ClientConfig,
    client: Client,
}

impl SolenceClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.normalized();
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let mut value =
                HeaderValue::from_str(key).map_err(|e| SolenceError::ConfigError {
                    message: format!("API key is not a valid header value: {}", e),
                })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(
            "Solence client ready: url={}, authenticated={}",
            config.api_url,
            config.is_authenticated()
        );

        Ok(Self { config, client })
    }

    /// 不帶 API key 的預設客戶端
    pub fn anonymous() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::default().with_api_key(api_key))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.is_authenticated()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {} ({})", status, response.url().path());

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read error body for HTTP {}: {}", status.as_u16(), e);
                    String::new()
                }
            };
            tracing::warn!("Request failed with HTTP {}", status.as_u16());
            return Err(SolenceError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl SolenceApi for SolenceClient {
    async fn scan(&self, wallet: &str, is_public: bool) -> Result<ScanResult> {
        let url = self.endpoint("scan");
        tracing::debug!("POST {} (isPublic={})", url, is_public);

        let body = ScanRequest { wallet, is_public };
        self.send_json(self.client.post(url).json(&body)).await
    }

    async fn history(&self, wallet: &str, limit: u32, skip: u32) -> Result<ScanHistory> {
        let url = self.endpoint("scans");
        tracing::debug!("GET {} (limit={}, skip={})", url, limit, skip);

        let query = HistoryQuery {
            wallet,
            limit,
            skip,
        };
        self.send_json(self.client.get(url).query(&query)).await
    }

    async fn verify_badge(&self, wallet: &str) -> Result<BadgeStatus> {
        let url = self.endpoint("badge/verify");
        tracing::debug!("GET {}", url);

        self.send_json(self.client.get(url).query(&BadgeQuery { wallet }))
            .await
    }

    async fn mint_badge(&self, wallet: &str, scan_id: &str) -> Result<MintResult> {
        if !self.is_authenticated() {
            return Err(SolenceError::ConfigError {
                message: "API key required for badge minting".to_string(),
            });
        }

        let url = self.endpoint("badge/mint");
        tracing::debug!("POST {} (scanId={})", url, scan_id);

        let body = MintRequest { wallet, scan_id };
        self.send_json(self.client.post(url).json(&body)).await
    }
}
