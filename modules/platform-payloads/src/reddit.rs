use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Reddit listing (`/r/{sub}/new.json`, `/search.json`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditListing {
    pub kind: Option<String>,
    #[serde(default)]
    pub data: RedditListingData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditListingData {
    /// Fullname of the last item; pass back as `after` for the next page.
    pub after: Option<String>,
    pub before: Option<String>,
    /// Each child is a [`RedditThing`], kept raw so one bad child does not sink the listing.
    #[serde(default)]
    pub children: Vec<Value>,
}

/// A `{ kind, data }` wrapper. Posts have kind `t3`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditThing {
    pub kind: Option<String>,
    #[serde(default)]
    pub data: RedditPost,
}

/// A single Reddit submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditPost {
    /// Base-36 id without the `t3_` prefix.
    pub id: Option<String>,
    /// Fullname, `t3_<id>`.
    pub name: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub ups: Option<Value>,
    pub num_comments: Option<Value>,
    /// Epoch seconds, usually a float.
    pub created_utc: Option<Value>,
    /// Site-relative, e.g. `/r/Minneapolis/comments/abc123/title/`.
    pub permalink: Option<String>,
    pub url: Option<String>,
}
