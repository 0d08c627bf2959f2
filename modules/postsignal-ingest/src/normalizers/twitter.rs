// Twitter/X v2 response → canonical posts. Retweets are the only metric kept.

use tracing::info;

use platform_payloads::{Tweet, TwitterResponse};
use postsignal_common::{count_from_json, Config, EngagementMetrics, Platform, Post};

use super::{decode_item, identity, parse_rfc3339, tags_for, Normalizer};
use crate::batch::{NormalizedBatch, PageTokens, SkipReason};

pub struct TwitterNormalizer {
    extract_tags: bool,
}

impl TwitterNormalizer {
    pub fn new(config: &Config) -> Self {
        Self {
            extract_tags: config.extract_tags,
        }
    }
}

impl Default for TwitterNormalizer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Normalizer for TwitterNormalizer {
    type Raw = TwitterResponse;

    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn normalize(&self, raw: TwitterResponse) -> NormalizedBatch {
        let TwitterResponse {
            data,
            includes,
            meta,
        } = raw;
        info!(items = data.len(), "twitter: normalizing response");

        let mut batch = NormalizedBatch::new(
            Platform::Twitter,
            PageTokens {
                next: meta.next_token,
                previous: meta.previous_token,
                total_results: meta.result_count,
                results_per_page: None,
            },
        );

        for (position, raw_tweet) in data.iter().enumerate() {
            let Some(tweet) = decode_item::<Tweet>(&mut batch, position, raw_tweet) else {
                continue;
            };
            let Some(native_id) = identity(tweet.id.as_deref()) else {
                batch.skip(position, SkipReason::MissingIdentity, raw_tweet);
                continue;
            };

            let user = tweet.author_id.as_deref().and_then(|id| includes.user(id));
            let username = user
                .as_ref()
                .and_then(|u| u.username.clone())
                .or_else(|| tweet.author_id.clone());
            let permalink = user
                .as_ref()
                .and_then(|u| u.username.as_deref())
                .map(|handle| format!("https://x.com/{handle}/status/{native_id}"));
            let retweets = count_from_json(
                tweet
                    .public_metrics
                    .as_ref()
                    .and_then(|m| m.retweet_count.as_ref()),
            );
            let tags = tags_for(self.extract_tags, &[tweet.text.as_deref()]);

            batch.push(
                Post::builder()
                    .platform(Platform::Twitter)
                    .native_id(native_id)
                    .author(username)
                    .author_display_name(user.and_then(|u| u.name))
                    .content(tweet.text.unwrap_or_default())
                    .created_at(parse_rfc3339(tweet.created_at.as_deref()))
                    .permalink(permalink)
                    .metrics(EngagementMetrics::retweets(retweets))
                    .mentions(tags.mentions)
                    .hashtags(tags.hashtags)
                    .build(),
            );
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> TwitterResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn author_falls_back_to_raw_id_without_expansion() {
        let raw = response(json!({
            "data": [{"id": "1", "text": "hello", "author_id": "42"}]
        }));
        let batch = TwitterNormalizer::default().normalize(raw);
        let post = &batch.posts[0];
        assert_eq!(post.author.as_deref(), Some("42"));
        assert!(post.author_display_name.is_none());
        assert!(post.permalink.is_none());
    }

    #[test]
    fn empty_search_has_no_data_array() {
        let raw = response(json!({"meta": {"result_count": 0}}));
        let batch = TwitterNormalizer::default().normalize(raw);
        assert!(batch.posts.is_empty());
        assert_eq!(batch.paging.total_results, Some(0));
    }
}
