use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::platform::{capabilities_of, Platform, PlatformCapabilities};
use crate::sentiment::Sentiment;

// --- Counts ---

/// Where a count's value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountOrigin {
    /// The platform reported a usable number.
    Reported,
    /// The field was absent or null; value is 0.
    Missing,
    /// The field was present but unparseable; value is 0 and the text is kept for audit.
    Malformed { raw: String },
}

/// An engagement count taken from a platform payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Count {
    pub value: i64,
    pub origin: CountOrigin,
}

impl Count {
    pub fn reported(value: i64) -> Self {
        Self {
            value,
            origin: CountOrigin::Reported,
        }
    }

    pub fn missing() -> Self {
        Self {
            value: 0,
            origin: CountOrigin::Missing,
        }
    }

    pub fn malformed(raw: impl Into<String>) -> Self {
        Self {
            value: 0,
            origin: CountOrigin::Malformed { raw: raw.into() },
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.origin, CountOrigin::Malformed { .. })
    }

    /// The unparsed upstream text, if the value could not be read.
    pub fn raw(&self) -> Option<&str> {
        match &self.origin {
            CountOrigin::Malformed { raw } => Some(raw),
            _ => None,
        }
    }
}

// --- Engagement ---

/// Capability-gated engagement metrics. A metric the originating platform does not
/// support is `None`; it is never a zero that could pass for a real count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<Count>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<Count>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<Count>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Count>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Count>,
}

impl EngagementMetrics {
    pub fn upvotes(upvotes: Count) -> Self {
        Self {
            upvotes: Some(upvotes),
            ..Self::default()
        }
    }

    pub fn retweets(retweets: Count) -> Self {
        Self {
            retweets: Some(retweets),
            ..Self::default()
        }
    }

    pub fn video(views: Count, likes: Count, comments: Count) -> Self {
        Self {
            views: Some(views),
            likes: Some(likes),
            comments: Some(comments),
            ..Self::default()
        }
    }

    /// Drop every metric the capability set does not allow.
    pub fn gated(self, caps: &PlatformCapabilities) -> Self {
        Self {
            upvotes: self.upvotes.filter(|_| caps.supports_upvotes),
            retweets: self.retweets.filter(|_| caps.supports_retweets),
            views: self.views.filter(|_| caps.supports_video_metrics),
            likes: self.likes.filter(|_| caps.supports_video_metrics),
            comments: self.comments.filter(|_| caps.supports_video_metrics),
        }
    }

    /// True when no metric outside the capability set is present.
    pub fn conforms_to(&self, caps: &PlatformCapabilities) -> bool {
        self.clone().gated(caps) == *self
    }

    /// Sum of interaction counts (upvotes, retweets, likes, comments). Views are not
    /// interactions and do not contribute.
    pub fn score(&self) -> f64 {
        [&self.upvotes, &self.retweets, &self.likes, &self.comments]
            .into_iter()
            .flatten()
            .map(|c| c.value as f64)
            .sum()
    }

    /// Fields that degraded to zero because upstream sent garbage, as (name, raw) pairs.
    pub fn malformed_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("upvotes", &self.upvotes),
            ("retweets", &self.retweets),
            ("views", &self.views),
            ("likes", &self.likes),
            ("comments", &self.comments),
        ]
        .into_iter()
        .filter_map(|(name, count)| count.as_ref()?.raw().map(|raw| (name, raw)))
        .collect()
    }
}

// --- Video metadata ---

/// Video-only metadata copied from the YouTube snippet and statistics blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// "none", "live" or "upcoming" as sent by YouTube.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_broadcast_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_audio_language: Option<String>,
    /// Opaque; YouTube no longer gives this field numeric meaning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// --- Canonical Post ---

/// A platform-agnostic post. Every normalizer produces these; every query runs over them.
///
/// Identity is `(platform, native_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Post {
    pub platform: Platform,
    #[builder(setter(into))]
    pub native_id: String,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[builder(setter(into))]
    pub content: String,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Only Reddit posts carry one.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub metrics: EngagementMetrics,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoDetails>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
}

impl Post {
    pub fn key(&self) -> (Platform, &str) {
        (self.platform, &self.native_id)
    }

    pub fn capabilities(&self) -> &'static PlatformCapabilities {
        capabilities_of(self.platform)
    }

    pub fn engagement_score(&self) -> f64 {
        self.metrics.score()
    }

    /// Attach the annotation produced by the sentiment component.
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentLabel;

    fn reddit_post() -> Post {
        Post::builder()
            .platform(Platform::Reddit)
            .native_id("abc123")
            .content("Snow emergency declared")
            .metrics(EngagementMetrics::upvotes(Count::reported(42)))
            .build()
    }

    #[test]
    fn builder_defaults_leave_optionals_absent() {
        let post = reddit_post();
        assert_eq!(post.key(), (Platform::Reddit, "abc123"));
        assert!(post.author.is_none());
        assert!(post.created_at.is_none());
        assert!(post.sentiment.is_none());
        assert!(post.video.is_none());
        assert!(post.mentions.is_empty());
    }

    #[test]
    fn gating_strips_unsupported_metrics() {
        let metrics = EngagementMetrics {
            upvotes: Some(Count::reported(5)),
            retweets: Some(Count::reported(7)),
            views: Some(Count::reported(100)),
            likes: None,
            comments: None,
        };
        let gated = metrics.gated(capabilities_of(Platform::Twitter));
        assert_eq!(gated, EngagementMetrics::retweets(Count::reported(7)));
    }

    #[test]
    fn conformity_check() {
        let post = reddit_post();
        assert!(post.metrics.conforms_to(post.capabilities()));
        assert!(!post.metrics.conforms_to(capabilities_of(Platform::YouTube)));
    }

    #[test]
    fn score_ignores_views() {
        let metrics = EngagementMetrics::video(
            Count::reported(10_000),
            Count::reported(30),
            Count::reported(12),
        );
        assert_eq!(metrics.score(), 42.0);
    }

    #[test]
    fn malformed_counts_keep_raw_text() {
        let metrics = EngagementMetrics::video(
            Count::malformed("12k"),
            Count::missing(),
            Count::reported(3),
        );
        assert_eq!(metrics.malformed_fields(), vec![("views", "12k")]);
        assert_eq!(metrics.views.as_ref().map(|c| c.value), Some(0));
        assert_eq!(metrics.likes.as_ref().and_then(Count::raw), None);
    }

    #[test]
    fn zero_is_not_missing() {
        assert_ne!(Count::reported(0), Count::missing());
        assert_eq!(Count::missing().value, 0);
    }

    #[test]
    fn sentiment_is_attached_after_ingestion() {
        let post = reddit_post().with_sentiment(Sentiment::new(SentimentLabel::Negative, -0.6));
        assert_eq!(post.sentiment.map(|s| s.label), Some(SentimentLabel::Negative));
    }

    #[test]
    fn unsupported_metrics_are_not_serialized() {
        let json = serde_json::to_value(reddit_post()).unwrap();
        let metrics = json.get("metrics").unwrap();
        assert!(metrics.get("upvotes").is_some());
        assert!(metrics.get("retweets").is_none());
        assert!(metrics.get("views").is_none());
    }
}
