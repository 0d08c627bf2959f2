// Platform detection from URLs and handles. String inspection only, no HTTP.

use postsignal_common::Platform;

/// Which platform a URL or bare reference belongs to.
///
/// "r/Minneapolis" and any reddit.com URL → Reddit, twitter.com / x.com → Twitter,
/// youtube.com / youtu.be → YouTube. Anything else is `None`.
pub fn detect_platform(target: &str) -> Option<Platform> {
    let trimmed = target.trim();
    if subreddit_reference(trimmed).is_some() {
        return Some(Platform::Reddit);
    }

    let host = host_of(&trimmed.to_lowercase())?;
    if host_matches(&host, "reddit.com") || host == "redd.it" {
        Some(Platform::Reddit)
    } else if host_matches(&host, "twitter.com") || host_matches(&host, "x.com") {
        Some(Platform::Twitter)
    } else if host_matches(&host, "youtube.com") || host == "youtu.be" {
        Some(Platform::YouTube)
    } else {
        None
    }
}

/// Subreddit name from "r/Name", "/r/Name/..." or a full reddit URL.
/// "https://www.reddit.com/r/Minneapolis/comments/abc/" → "Minneapolis"
pub fn subreddit_from_target(target: &str) -> Option<String> {
    let trimmed = target.trim();
    if let Some(sub) = subreddit_reference(trimmed) {
        return Some(sub.to_string());
    }
    let idx = trimmed.find("/r/")?;
    let name = trimmed[idx + 3..]
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    (!name.is_empty()).then(|| name.to_string())
}

/// Bare "r/Name" reference.
fn subreddit_reference(target: &str) -> Option<&str> {
    let sub = target.strip_prefix("r/")?.trim_end_matches('/');
    (!sub.is_empty() && !sub.contains([' ', '/'])).then_some(sub)
}

/// Host part of a lowercased URL, with or without a scheme.
fn host_of(lower: &str) -> Option<String> {
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(lower);
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    (!host.is_empty() && host.contains('.')).then(|| host.to_string())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_reddit() {
        assert_eq!(detect_platform("r/Minneapolis"), Some(Platform::Reddit));
        assert_eq!(
            detect_platform("https://www.reddit.com/r/Minneapolis/"),
            Some(Platform::Reddit)
        );
        assert_eq!(detect_platform("old.reddit.com/r/StPaul"), Some(Platform::Reddit));
    }

    #[test]
    fn detects_twitter_and_x() {
        assert_eq!(
            detect_platform("https://twitter.com/mplsmayor/status/1"),
            Some(Platform::Twitter)
        );
        assert_eq!(detect_platform("https://x.com/mplsmayor"), Some(Platform::Twitter));
        assert_eq!(detect_platform("https://mobile.twitter.com/a"), Some(Platform::Twitter));
    }

    #[test]
    fn detects_youtube() {
        assert_eq!(
            detect_platform("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(Platform::YouTube)
        );
        assert_eq!(detect_platform("https://youtu.be/dQw4w9WgXcQ"), Some(Platform::YouTube));
    }

    #[test]
    fn lookalike_hosts_are_not_platforms() {
        assert_eq!(detect_platform("https://box.com/file"), None);
        assert_eq!(detect_platform("https://notreddit.com/r/x"), None);
        assert_eq!(detect_platform("community garden cleanup"), None);
        assert_eq!(detect_platform(""), None);
    }

    #[test]
    fn subreddit_extraction() {
        assert_eq!(subreddit_from_target("r/Minneapolis"), Some("Minneapolis".into()));
        assert_eq!(
            subreddit_from_target("https://www.reddit.com/r/StPaul/comments/abc/title/"),
            Some("StPaul".into())
        );
        assert_eq!(subreddit_from_target("https://www.reddit.com/user/someone"), None);
    }
}
