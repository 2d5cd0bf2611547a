//! HTTP client for the hosted record store.
//!
//! Speaks a small REST dialect: `GET {base}` lists the collection,
//! `PUT {base}/{id}` rewrites one record. Failures are classified by
//! status code into the retryable/terminal taxonomy the write executor
//! runs on.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::RecordStore;
use crate::errors::StoreError;
use crate::models::RemoteRecord;

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire form of a stock record.
///
/// The hosted API capitalizes entity field names; `id` is the exception.
#[derive(Debug, Deserialize)]
struct StockRecordDto {
    id: String,
    #[serde(rename = "Ticker", default)]
    ticker: Option<String>,
    #[serde(rename = "Price", default)]
    price: Option<f64>,
}

/// List responses arrive either bare or wrapped in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Plain(Vec<StockRecordDto>),
    Data { data: Vec<StockRecordDto> },
    Results { results: Vec<StockRecordDto> },
}

impl ListResponse {
    fn into_records(self) -> Vec<StockRecordDto> {
        match self {
            Self::Plain(records) => records,
            Self::Data { data } => data,
            Self::Results { results } => results,
        }
    }
}

/// REST client for a hosted entity collection of stock records.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpRecordStore {
    /// Create a client for the collection rooted at `base_url`, e.g.
    /// `https://host/api/apps/{app}/entities/Stock`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Map a non-success response into the error taxonomy.
    async fn classify(response: Response) -> StoreError {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return StoreError::RateLimited { retry_after };
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            StoreError::Server {
                status: status.as_u16(),
                body,
            }
        } else {
            StoreError::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self) -> Result<Vec<RemoteRecord>, StoreError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("api_key", &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify(response).await);
        }

        let envelope: ListResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("unexpected list format: {e}")))?;

        let records: Vec<RemoteRecord> = envelope
            .into_records()
            .into_iter()
            .map(|dto| RemoteRecord {
                id: dto.id,
                ticker: dto.ticker.unwrap_or_default(),
                price: dto.price,
            })
            .collect();

        debug!("remote store listed {} records", records.len());
        Ok(records)
    }

    async fn update_price(&self, id: &str, price: f64) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.base_url, id);
        let response = self
            .client
            .put(&url)
            .header("api_key", &self.api_key)
            .json(&json!({ "Price": price }))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify(response).await);
        }

        Ok(())
    }
}
