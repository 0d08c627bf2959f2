use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Twitter/X API v2 tweet lookup, timeline or recent-search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterResponse {
    /// Each entry is a [`Tweet`], kept raw and decoded one at a time. Absent when the query
    /// matched nothing.
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub includes: TwitterIncludes,
    #[serde(default)]
    pub meta: TwitterMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tweet {
    pub id: Option<String>,
    pub text: Option<String>,
    pub author_id: Option<String>,
    /// RFC 3339.
    pub created_at: Option<String>,
    pub lang: Option<String>,
    pub public_metrics: Option<TweetPublicMetrics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetPublicMetrics {
    pub retweet_count: Option<Value>,
    pub reply_count: Option<Value>,
    pub like_count: Option<Value>,
    pub quote_count: Option<Value>,
}

/// Expansions requested with `expansions=author_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterIncludes {
    /// [`TwitterUser`] records, kept raw.
    #[serde(default)]
    pub users: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterMeta {
    pub result_count: Option<i64>,
    pub next_token: Option<String>,
    pub previous_token: Option<String>,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

impl TwitterIncludes {
    /// Find the expanded user record for an author id. A record that does not decode counts
    /// as absent.
    pub fn user(&self, author_id: &str) -> Option<TwitterUser> {
        self.users
            .iter()
            .find(|u| u.get("id").and_then(Value::as_str) == Some(author_id))
            .and_then(|u| TwitterUser::deserialize(u).ok())
    }
}
