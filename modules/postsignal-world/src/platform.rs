use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Social Platform ---

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Twitter,
    YouTube,
}

impl Platform {
    /// Every supported platform, in declaration order.
    pub const ALL: [Platform; 3] = [Platform::Reddit, Platform::Twitter, Platform::YouTube];

    /// Canonical external identifier. Resolution matches against this, ignoring ASCII case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Twitter => "twitter",
            Platform::YouTube => "youtube",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit",
            Platform::Twitter => "Twitter/X",
            Platform::YouTube => "YouTube",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

/// Resolve an external identifier to a platform.
///
/// Case-insensitive exact match on the canonical id. No trimming, aliases or fuzzy matching:
/// `"Reddit"` resolves, `" reddit"` and `"x"` do not.
pub fn resolve(identifier: &str) -> Result<Platform, UnknownPlatform> {
    Platform::ALL
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(identifier))
        .ok_or_else(|| UnknownPlatform(identifier.to_string()))
}

/// Like [`resolve`], but an absent identifier is not an error: `None` maps to `Ok(None)`.
/// A present identifier that matches nothing still fails.
pub fn resolve_optional(identifier: Option<&str>) -> Result<Option<Platform>, UnknownPlatform> {
    identifier.map(resolve).transpose()
}

// --- Capabilities ---

/// Platform-specific features a platform exposes. Several flags may be true for a
/// platform; the current set happens to have exactly one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformCapabilities {
    pub supports_upvotes: bool,
    pub supports_retweets: bool,
    pub supports_video_metrics: bool,
}

/// Indexed by `Platform as usize`; order must follow the enum declaration.
static CAPABILITIES: [PlatformCapabilities; 3] = [
    // Reddit
    PlatformCapabilities {
        supports_upvotes: true,
        supports_retweets: false,
        supports_video_metrics: false,
    },
    // Twitter
    PlatformCapabilities {
        supports_upvotes: false,
        supports_retweets: true,
        supports_video_metrics: false,
    },
    // YouTube
    PlatformCapabilities {
        supports_upvotes: false,
        supports_retweets: false,
        supports_video_metrics: true,
    },
];

pub fn capabilities_of(platform: Platform) -> &'static PlatformCapabilities {
    &CAPABILITIES[platform as usize]
}
