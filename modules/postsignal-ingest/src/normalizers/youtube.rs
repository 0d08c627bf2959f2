// YouTube list response → canonical posts. Statistics arrive as decimal strings and
// may be hidden by the uploader, so every count goes through the lenient parser.

use serde_json::Value;
use tracing::info;

use platform_payloads::{YouTubeListResponse, YouTubeSnippet, YouTubeStatistics, YouTubeVideo};
use postsignal_common::{count_from_json, Config, EngagementMetrics, Platform, Post, VideoDetails};

use super::{decode_item, identity, parse_rfc3339, tags_for, Normalizer};
use crate::batch::{NormalizedBatch, PageTokens, SkipReason};

pub struct YouTubeNormalizer {
    extract_tags: bool,
}

impl YouTubeNormalizer {
    pub fn new(config: &Config) -> Self {
        Self {
            extract_tags: config.extract_tags,
        }
    }
}

impl Default for YouTubeNormalizer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Normalizer for YouTubeNormalizer {
    type Raw = YouTubeListResponse;

    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn normalize(&self, raw: YouTubeListResponse) -> NormalizedBatch {
        info!(items = raw.items.len(), "youtube: normalizing list response");

        let page_info = raw.page_info.unwrap_or_default();
        let mut batch = NormalizedBatch::new(
            Platform::YouTube,
            PageTokens {
                next: raw.next_page_token,
                previous: raw.prev_page_token,
                total_results: page_info.total_results,
                results_per_page: page_info.results_per_page,
            },
        );

        for (position, raw_item) in raw.items.iter().enumerate() {
            let Some(item) = decode_item::<YouTubeVideo>(&mut batch, position, raw_item) else {
                continue;
            };
            let video_id = item.id.as_ref().and_then(|id| id.video_id());
            let Some(native_id) = identity(video_id) else {
                batch.skip(position, SkipReason::MissingIdentity, raw_item);
                continue;
            };

            let snippet = item.snippet.unwrap_or_default();
            let stats = item.statistics.unwrap_or_default();
            let tags = tags_for(
                self.extract_tags,
                &[snippet.title.as_deref(), snippet.description.as_deref()],
            );
            let permalink = format!("https://www.youtube.com/watch?v={native_id}");

            batch.push(
                Post::builder()
                    .platform(Platform::YouTube)
                    .native_id(native_id)
                    .author(snippet.channel_title.clone())
                    .title(snippet.title.clone())
                    .content(snippet.description.clone().unwrap_or_default())
                    .created_at(parse_rfc3339(snippet.published_at.as_deref()))
                    .permalink(Some(permalink))
                    .metrics(metrics(&stats))
                    .video(Some(video_details(snippet, &stats)))
                    .mentions(tags.mentions)
                    .hashtags(tags.hashtags)
                    .build(),
            );
        }

        batch
    }
}

fn metrics(stats: &YouTubeStatistics) -> EngagementMetrics {
    EngagementMetrics::video(
        count_from_json(stats.view_count.as_ref()),
        count_from_json(stats.like_count.as_ref()),
        count_from_json(stats.comment_count.as_ref()),
    )
}

fn video_details(snippet: YouTubeSnippet, stats: &YouTubeStatistics) -> VideoDetails {
    VideoDetails {
        channel_id: snippet.channel_id,
        channel_title: snippet.channel_title,
        category_id: snippet.category_id,
        live_broadcast_content: snippet.live_broadcast_content,
        default_language: snippet.default_language,
        default_audio_language: snippet.default_audio_language,
        favorite_count: stats.favorite_count.as_ref().and_then(opaque_text),
        tags: snippet.tags.unwrap_or_default(),
    }
}

/// Keep a value as text without interpreting it.
fn opaque_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
