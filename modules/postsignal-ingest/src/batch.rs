use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use platform_payloads::{RedditListing, TwitterResponse, YouTubeListResponse};
use postsignal_common::{capabilities_of, Config, Platform, Post};

use crate::error::{IngestError, Result};
use crate::normalizers::{Normalizer, RedditNormalizer, TwitterNormalizer, YouTubeNormalizer};

/// Paging cursors exactly as the platform returned them. The ingestion layer hands these
/// back to the fetcher; nothing here interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_per_page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[error("missing native id")]
    MissingIdentity,
    /// The item is not the shape the platform documents (e.g. a string field sent as a number).
    #[error("malformed item")]
    Malformed,
}

/// A raw item that could not become a post. The rest of its batch is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    /// Index in the raw payload's item list.
    pub position: usize,
    pub reason: SkipReason,
    pub raw: Value,
}

/// The outcome of normalizing one raw response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBatch {
    pub platform: Platform,
    /// Surviving posts, in payload order.
    pub posts: Vec<Post>,
    pub skipped: Vec<SkippedItem>,
    pub paging: PageTokens,
}

impl NormalizedBatch {
    pub(crate) fn new(platform: Platform, paging: PageTokens) -> Self {
        Self {
            platform,
            posts: Vec::new(),
            skipped: Vec::new(),
            paging,
        }
    }

    /// Accept a post, stripping any metric its platform does not support.
    pub(crate) fn push(&mut self, mut post: Post) {
        let caps = capabilities_of(post.platform);
        post.metrics = post.metrics.gated(caps);
        for (field, raw) in post.metrics.malformed_fields() {
            debug!(
                platform = %post.platform,
                id = %post.native_id,
                field,
                raw,
                "malformed count defaulted to zero"
            );
        }
        self.posts.push(post);
    }

    pub(crate) fn skip<T: Serialize>(&mut self, position: usize, reason: SkipReason, item: &T) {
        warn!(platform = %self.platform, position, %reason, "dropping item");
        self.skipped.push(SkippedItem {
            position,
            reason,
            raw: serde_json::to_value(item).unwrap_or(Value::Null),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A raw response from any supported platform.
#[derive(Debug, Clone)]
pub enum RawBatch {
    Reddit(RedditListing),
    Twitter(TwitterResponse),
    YouTube(YouTubeListResponse),
}

impl RawBatch {
    pub fn platform(&self) -> Platform {
        match self {
            RawBatch::Reddit(_) => Platform::Reddit,
            RawBatch::Twitter(_) => Platform::Twitter,
            RawBatch::YouTube(_) => Platform::YouTube,
        }
    }

    /// Parse a JSON response body as the given platform's envelope. Unknown fields are
    /// ignored and items stay raw until normalization, so only a broken envelope is an error.
    pub fn from_json(platform: Platform, json: &str) -> Result<Self> {
        let payload = |source| IngestError::Payload { platform, source };
        Ok(match platform {
            Platform::Reddit => RawBatch::Reddit(serde_json::from_str(json).map_err(payload)?),
            Platform::Twitter => RawBatch::Twitter(serde_json::from_str(json).map_err(payload)?),
            Platform::YouTube => RawBatch::YouTube(serde_json::from_str(json).map_err(payload)?),
        })
    }

    pub fn normalize(self, config: &Config) -> NormalizedBatch {
        match self {
            RawBatch::Reddit(raw) => RedditNormalizer::new(config).normalize(raw),
            RawBatch::Twitter(raw) => TwitterNormalizer::new(config).normalize(raw),
            RawBatch::YouTube(raw) => YouTubeNormalizer::new(config).normalize(raw),
        }
    }
}

/// Normalize independent batches in parallel, one blocking task each. Results come back in
/// input order.
pub async fn normalize_concurrently(
    batches: Vec<RawBatch>,
    config: &Config,
) -> Result<Vec<NormalizedBatch>> {
    info!(batches = batches.len(), "normalizing batches");

    let (platforms, handles): (Vec<_>, Vec<_>) = batches
        .into_iter()
        .map(|batch| {
            let platform = batch.platform();
            let config = config.clone();
            let handle = tokio::task::spawn_blocking(move || batch.normalize(&config));
            (platform, handle)
        })
        .unzip();

    futures::future::join_all(handles)
        .await
        .into_iter()
        .zip(platforms)
        .map(|(joined, platform)| {
            joined.map_err(|e| IngestError::Task(format!("{platform} batch: {e}")))
        })
        .collect()
}
