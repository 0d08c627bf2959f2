//! Raw response shapes for the platform REST APIs, exactly as the HTTP layer
//! deserializes them.
//!
//! Every field the APIs may omit is optional, unknown fields are ignored, and counts
//! are kept as raw JSON values because platforms disagree on whether numbers are
//! numbers or strings.

pub mod reddit;
pub mod twitter;
pub mod youtube;

pub use reddit::{RedditListing, RedditListingData, RedditPost, RedditThing};
pub use twitter::{Tweet, TweetPublicMetrics, TwitterIncludes, TwitterMeta, TwitterResponse, TwitterUser};
pub use youtube::{
    YouTubeListResponse, YouTubePageInfo, YouTubeSnippet, YouTubeStatistics, YouTubeVideo,
    YouTubeVideoId,
};
