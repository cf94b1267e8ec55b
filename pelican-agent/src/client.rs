//! Remote order feed client
//!
//! Thin reqwest wrapper around the two feed endpoints the agent uses:
//! fetching pending print jobs and acknowledging printed orders.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use shared::response::PendingJobs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized - check API_TOKEN")]
    Unauthorized,

    #[error("Feed returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client for the order-management feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
    token: String,
}

impl FeedClient {
    /// Create a new feed client with a static bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Fetch the pending print jobs.
    pub async fn fetch_pending(&self) -> ClientResult<PendingJobs> {
        let response = self
            .client
            .get(self.endpoint("print-jobs/pending"))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Mark an order as printed.
    pub async fn mark_printed(&self, order_id: i64) -> ClientResult<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("print-jobs/{}/mark-printed", order_id)))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Map non-success statuses to typed errors.
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }
}
