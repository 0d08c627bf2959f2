pub mod platform;
pub mod post;
pub mod sentiment;

pub use platform::{
    capabilities_of, resolve, resolve_optional, Platform, PlatformCapabilities, UnknownPlatform,
};
pub use post::{Count, CountOrigin, EngagementMetrics, Post, VideoDetails};
pub use sentiment::{Sentiment, SentimentLabel};
