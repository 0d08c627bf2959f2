// Reddit listing → canonical posts. Upvotes are the only metric Reddit contributes.

use tracing::info;

use platform_payloads::{RedditListing, RedditThing};
use postsignal_common::{count_from_json, Config, EngagementMetrics, Platform, Post};

use super::{decode_item, identity, parse_epoch_seconds, tags_for, Normalizer};
use crate::batch::{NormalizedBatch, PageTokens, SkipReason};
use crate::router;

const REDDIT_ORIGIN: &str = "https://www.reddit.com";

pub struct RedditNormalizer {
    extract_tags: bool,
}

impl RedditNormalizer {
    pub fn new(config: &Config) -> Self {
        Self {
            extract_tags: config.extract_tags,
        }
    }
}

impl Default for RedditNormalizer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Normalizer for RedditNormalizer {
    type Raw = RedditListing;

    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn normalize(&self, raw: RedditListing) -> NormalizedBatch {
        let data = raw.data;
        info!(items = data.children.len(), "reddit: normalizing listing");

        let mut batch = NormalizedBatch::new(
            Platform::Reddit,
            PageTokens {
                next: data.after,
                previous: data.before,
                ..PageTokens::default()
            },
        );

        for (position, raw_child) in data.children.iter().enumerate() {
            let Some(thing) = decode_item::<RedditThing>(&mut batch, position, raw_child) else {
                continue;
            };
            let p = thing.data;
            let Some(native_id) = identity(p.id.as_deref()) else {
                batch.skip(position, SkipReason::MissingIdentity, raw_child);
                continue;
            };

            let permalink = p.permalink.as_deref().map(absolute_permalink);
            let subreddit = p.subreddit.clone().or_else(|| {
                permalink
                    .as_deref()
                    .and_then(router::subreddit_from_target)
            });
            let tags = tags_for(
                self.extract_tags,
                &[p.title.as_deref(), p.selftext.as_deref()],
            );

            batch.push(
                Post::builder()
                    .platform(Platform::Reddit)
                    .native_id(native_id)
                    .author(p.author.filter(|a| a != "[deleted]"))
                    .title(p.title)
                    .content(p.selftext.unwrap_or_default())
                    .created_at(parse_epoch_seconds(p.created_utc.as_ref()))
                    .permalink(permalink)
                    .subreddit(subreddit)
                    .metrics(EngagementMetrics::upvotes(count_from_json(p.ups.as_ref())))
                    .mentions(tags.mentions)
                    .hashtags(tags.hashtags)
                    .build(),
            );
        }

        batch
    }
}

/// Reddit permalinks are site-relative.
fn absolute_permalink(permalink: &str) -> String {
    if permalink.starts_with('/') {
        format!("{REDDIT_ORIGIN}{permalink}")
    } else {
        permalink.to_string()
    }
}
