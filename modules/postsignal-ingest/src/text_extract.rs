use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w@])@([\w.]+)").expect("valid regex"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w#&])#(\w+)").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
}

pub fn extract(text: &str) -> Tags {
    Tags {
        mentions: extract_mentions(text),
        hashtags: extract_hashtags(text),
    }
}

/// @mentions, lowercased, without the `@`, first occurrence order. Email addresses do not
/// count and a trailing period is sentence punctuation, not part of the handle.
pub fn extract_mentions(text: &str) -> Vec<String> {
    collect_unique(&MENTION_RE, text, |m| m.trim_end_matches('.'))
}

/// #hashtags, lowercased, without the `#`, first occurrence order. HTML entities like
/// `&#39;` are skipped.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    collect_unique(&HASHTAG_RE, text, |m| m)
}

fn collect_unique(re: &Regex, text: &str, clean: impl Fn(&str) -> &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.captures_iter(text)
        .filter_map(|c| {
            let name = clean(&c[1]).to_lowercase();
            (!name.is_empty() && seen.insert(name.clone())).then_some(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_mentions() {
        let text = "Hey @alice and @Bob.Smith, check this out @alice";
        assert_eq!(extract_mentions(text), vec!["alice", "bob.smith"]);
    }

    #[test]
    fn trailing_period_is_not_part_of_handle() {
        assert_eq!(extract_mentions("Thanks @metrotransit."), vec!["metrotransit"]);
    }

    #[test]
    fn emails_are_not_mentions() {
        assert!(extract_mentions("write to help@city.gov").is_empty());
    }

    #[test]
    fn extracts_hashtags() {
        let text = "Love #Minneapolis and #community vibes #Minneapolis";
        assert_eq!(extract_hashtags(text), vec!["minneapolis", "community"]);
    }

    #[test]
    fn html_entities_are_not_hashtags() {
        assert!(extract_hashtags("it&#39;s cold").is_empty());
    }

    #[test]
    fn empty_and_plain_text() {
        assert_eq!(extract(""), Tags::default());
        assert_eq!(extract("no tags here"), Tags::default());
    }
}
