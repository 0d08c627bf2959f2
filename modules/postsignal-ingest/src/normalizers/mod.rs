// Platform normalizers. Each one turns a single raw API response into canonical posts.
// Pure transformations: no I/O, no shared state.

mod reddit;
mod twitter;
mod youtube;

pub use reddit::RedditNormalizer;
pub use twitter::TwitterNormalizer;
pub use youtube::YouTubeNormalizer;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use postsignal_common::Platform;

use crate::batch::{NormalizedBatch, SkipReason};
use crate::text_extract::{self, Tags};

/// Translate one platform's raw response into canonical posts.
///
/// Items that do not decode or lack a native id are skipped and reported in the batch;
/// every other irregularity (missing fields, malformed counts) degrades instead of failing.
pub trait Normalizer {
    type Raw;

    fn platform(&self) -> Platform;

    fn normalize(&self, raw: Self::Raw) -> NormalizedBatch;
}

/// Decode one raw item into its payload shape. An item that does not fit is reported as
/// skipped and the rest of the batch carries on.
fn decode_item<T: DeserializeOwned>(
    batch: &mut NormalizedBatch,
    position: usize,
    raw: &Value,
) -> Option<T> {
    match T::deserialize(raw) {
        Ok(item) => Some(item),
        Err(error) => {
            debug!(platform = %batch.platform, position, %error, "item does not decode");
            batch.skip(position, SkipReason::Malformed, raw);
            None
        }
    }
}

/// A usable native id: present and not blank.
fn identity(id: Option<&str>) -> Option<String> {
    id.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

fn parse_rfc3339(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Epoch seconds sent as a JSON number or a numeric string.
fn parse_epoch_seconds(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    let secs = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn tags_for(enabled: bool, texts: &[Option<&str>]) -> Tags {
    if !enabled {
        return Tags::default();
    }
    let joined = texts.iter().flatten().copied().collect::<Vec<_>>().join("\n");
    text_extract::extract(&joined)
}
