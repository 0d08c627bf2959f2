pub mod batch;
pub mod error;
pub mod normalizers;
pub mod router;
pub mod text_extract;

pub use batch::{normalize_concurrently, NormalizedBatch, PageTokens, RawBatch, SkipReason, SkippedItem};
pub use error::{IngestError, Result};
pub use normalizers::{Normalizer, RedditNormalizer, TwitterNormalizer, YouTubeNormalizer};
pub use router::detect_platform;
