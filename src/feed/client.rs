//! CNEOS client: fetches close-approach rows from the JPL `cad.api`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::error::FeedError;
use crate::config::defaults::{DEFAULT_MAX_DISTANCE_AU, DEFAULT_WINDOW_DAYS, FEED_USER_AGENT};
use crate::config::FeedConfig;
use crate::types::RawApproachPayload;

// ============================================================================
// Query
// ============================================================================

/// Query parameters for one feed request; also the feed cache key.
///
/// Values are kept in their wire form so the query is hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeedQuery {
    pub date_min: String,
    pub date_max: String,
    pub dist_max: String,
    pub sort: String,
}

impl FeedQuery {
    /// Approaches from now until `window_days` ahead within `max_distance_au`, sorted by date.
    pub fn new(window_days: u32, max_distance_au: f64) -> Self {
        Self {
            date_min: "now".to_string(),
            date_max: format!("+{window_days}"),
            dist_max: max_distance_au.to_string(),
            sort: "date".to_string(),
        }
    }

    /// `(name, value)` pairs as sent on the query string.
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("date-min", self.date_min.as_str()),
            ("date-max", self.date_max.as_str()),
            ("dist-max", self.dist_max.as_str()),
            ("sort", self.sort.as_str()),
        ]
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS, DEFAULT_MAX_DISTANCE_AU)
    }
}

// ============================================================================
// Source Trait
// ============================================================================

/// Anything that can produce a raw close-approach payload for a query.
#[async_trait]
pub trait ApproachSource: Send + Sync {
    async fn fetch(&self, query: &FeedQuery) -> Result<RawApproachPayload, FeedError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client for the CNEOS close-approach endpoint.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FeedClient {
    /// Build a client. `timeout` of `None` keeps reqwest's default (no timeout).
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder().user_agent(FEED_USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::new(&config.endpoint, config.timeout_secs.map(Duration::from_secs))
    }
}

#[async_trait]
impl ApproachSource for FeedClient {
    async fn fetch(&self, query: &FeedQuery) -> Result<RawApproachPayload, FeedError> {
        debug!(endpoint = %self.endpoint, ?query, "Requesting close approaches");

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&query.params())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Network(format!(
                "{} returned status {}",
                self.endpoint, status
            )));
        }

        let body = resp.bytes().await?;
        let payload = parse_payload(&body)?;
        info!(rows = payload.len(), "Fetched close-approach data");
        Ok(payload)
    }
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Wire shape of a `cad.api` response. Every key is optional here so that
/// missing keys become `MalformedResponse` rather than serde errors.
#[derive(Debug, Deserialize)]
struct CadResponse {
    count: Option<serde_json::Value>,
    fields: Option<Vec<String>>,
    data: Option<Vec<Vec<serde_json::Value>>>,
}

/// Parse a `cad.api` body.
///
/// `count` arrives as a string-encoded integer. A zero count is a valid
/// empty result and does not require `fields` or `data`.
pub fn parse_payload(body: &[u8]) -> Result<RawApproachPayload, FeedError> {
    let resp: CadResponse = serde_json::from_slice(body)
        .map_err(|e| FeedError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let count = match resp.count {
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(_) => None,
        None => return Err(FeedError::MalformedResponse("missing 'count'".to_string())),
    }
    .ok_or_else(|| FeedError::MalformedResponse("'count' is not an integer".to_string()))?;

    if count == 0 {
        return Ok(RawApproachPayload::empty());
    }

    let fields = resp
        .fields
        .ok_or_else(|| FeedError::MalformedResponse("missing 'fields'".to_string()))?;
    let rows = resp
        .data
        .ok_or_else(|| FeedError::MalformedResponse("missing 'data'".to_string()))?;

    if rows.len() as u64 != count {
        debug!(count, rows = rows.len(), "cad.api count does not match row count");
    }

    Ok(RawApproachPayload { fields, rows })
}
