//! Collaborative recommender client
//!
//! The managed recommendation service is opaque: given a course code it
//! returns a ranked list of course codes, nothing, or fails. Every failure is
//! folded into [`RemoteOutcome::Failed`] so callers branch on one value.

use crate::config::PersonalizeConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Result of one collaborative recommendation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// Ranked course codes, never empty
    Items(Vec<String>),

    /// The service answered with no recommendations
    Empty,

    /// The service could not be reached or answered badly
    Failed(String),
}

impl RemoteOutcome {
    /// Build an outcome from a list of codes, mapping an empty list to `Empty`
    pub fn from_codes(codes: Vec<String>) -> Self {
        if codes.is_empty() {
            RemoteOutcome::Empty
        } else {
            RemoteOutcome::Items(codes)
        }
    }
}

/// Source of collaborative ("people also took") recommendations
#[async_trait]
pub trait CollaborativeRecommender: Send + Sync {
    /// Whether the recommender has what it needs to make calls
    fn is_configured(&self) -> bool;

    /// Recommend up to `num_results` course codes related to `course_code`
    async fn recommend(&self, course_code: &str, num_results: usize) -> RemoteOutcome;
}

/// Recommender used when no campaign is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRecommender;

#[async_trait]
impl CollaborativeRecommender for UnconfiguredRecommender {
    fn is_configured(&self) -> bool {
        false
    }

    async fn recommend(&self, _course_code: &str, _num_results: usize) -> RemoteOutcome {
        RemoteOutcome::Failed("Personalize campaign not configured".to_string())
    }
}

/// Recommender returning a fixed outcome, for tests and local runs
#[derive(Debug, Clone)]
pub struct FixedRecommender {
    outcome: RemoteOutcome,
}

impl FixedRecommender {
    /// Always answer with `outcome`
    pub fn new(outcome: RemoteOutcome) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl CollaborativeRecommender for FixedRecommender {
    fn is_configured(&self) -> bool {
        true
    }

    async fn recommend(&self, _course_code: &str, num_results: usize) -> RemoteOutcome {
        match &self.outcome {
            RemoteOutcome::Items(codes) => {
                RemoteOutcome::from_codes(codes.iter().take(num_results).cloned().collect())
            }
            other => other.clone(),
        }
    }
}

/// Errors talking to the recommendation endpoint
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection, timeout or body decoding failure
    #[error("Recommendation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Recommendation endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetRecommendationsRequest<'a> {
    campaign_arn: &'a str,
    item_id: &'a str,
    num_results: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRecommendationsResponse {
    #[serde(default)]
    item_list: Option<Vec<RecommendedItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedItem {
    #[serde(default)]
    item_id: Option<String>,
}

/// Recommender backed by an HTTP recommendation endpoint
///
/// Sends `{campaignArn, itemId, numResults}` and reads
/// `{itemList: [{itemId}]}`; items without an id are skipped.
#[derive(Debug, Clone)]
pub struct HttpRecommender {
    client: reqwest::Client,
    endpoint: String,
    campaign_arn: String,
}

impl HttpRecommender {
    /// Create a recommender for `endpoint` and `campaign_arn`
    pub fn new(
        endpoint: impl Into<String>,
        campaign_arn: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            campaign_arn: campaign_arn.into(),
        })
    }

    async fn fetch(&self, course_code: &str, num_results: usize) -> Result<Vec<String>, RemoteError> {
        let request = GetRecommendationsRequest {
            campaign_arn: &self.campaign_arn,
            item_id: course_code,
            num_results,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let body: GetRecommendationsResponse = response.json().await?;
        Ok(body
            .item_list
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.item_id)
            .collect())
    }
}

#[async_trait]
impl CollaborativeRecommender for HttpRecommender {
    fn is_configured(&self) -> bool {
        true
    }

    async fn recommend(&self, course_code: &str, num_results: usize) -> RemoteOutcome {
        match self.fetch(course_code, num_results).await {
            Ok(codes) => {
                debug!("Recommender returned {} items for {}", codes.len(), course_code);
                RemoteOutcome::from_codes(codes)
            }
            Err(e) => {
                warn!("Personalize recommendation error: {}", e);
                RemoteOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Build the recommender described by `config`
///
/// Falls back to [`UnconfiguredRecommender`] when the campaign or endpoint
/// is missing.
pub fn recommender_from_config(
    config: &PersonalizeConfig,
) -> Result<Arc<dyn CollaborativeRecommender>, RemoteError> {
    match (&config.endpoint, &config.campaign_arn) {
        (Some(endpoint), Some(campaign_arn)) if config.is_configured() => {
            let timeout = Duration::from_millis(config.timeout_ms);
            Ok(Arc::new(HttpRecommender::new(endpoint, campaign_arn, timeout)?))
        }
        _ => Ok(Arc::new(UnconfiguredRecommender)),
    }
}
