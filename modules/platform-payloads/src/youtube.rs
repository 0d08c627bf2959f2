use serde::{Deserialize, Serialize};
use serde_json::Value;

/// YouTube Data API v3 list envelope (`videos.list` or `search.list`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeListResponse {
    pub kind: Option<String>,
    pub etag: Option<String>,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
    pub page_info: Option<YouTubePageInfo>,
    /// Each item is a [`YouTubeVideo`], kept raw and decoded one at a time.
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubePageInfo {
    pub total_results: Option<i64>,
    pub results_per_page: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideo {
    pub kind: Option<String>,
    pub etag: Option<String>,
    pub id: Option<YouTubeVideoId>,
    pub snippet: Option<YouTubeSnippet>,
    pub statistics: Option<YouTubeStatistics>,
}

/// `videos.list` sends the id as a bare string; `search.list` wraps it in a resource id.
/// Anything else lands in `Other` and has no video id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YouTubeVideoId {
    Plain(String),
    Resource {
        kind: Option<String>,
        #[serde(rename = "videoId")]
        video_id: Option<String>,
    },
    Other(Value),
}

impl YouTubeVideoId {
    pub fn video_id(&self) -> Option<&str> {
        match self {
            YouTubeVideoId::Plain(id) => Some(id),
            YouTubeVideoId::Resource { video_id, .. } => video_id.as_deref(),
            YouTubeVideoId::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeSnippet {
    /// RFC 3339.
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    /// Absent or null when the uploader set none.
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub live_broadcast_content: Option<String>,
    pub default_language: Option<String>,
    pub default_audio_language: Option<String>,
}

/// Counts arrive as decimal strings (`"1234"`) and are omitted when hidden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeStatistics {
    pub view_count: Option<Value>,
    pub like_count: Option<Value>,
    pub dislike_count: Option<Value>,
    pub favorite_count: Option<Value>,
    pub comment_count: Option<Value>,
}
