//! Criteria construction and the in-memory executor, end to end over hand-built posts.
//!
//! No I/O: posts are constructed directly with the canonical builder.

use chrono::{DateTime, TimeZone, Utc};
use postsignal_common::*;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn reddit(id: &str, sub: &str, ups: i64, day: u32) -> Post {
    Post::builder()
        .platform(Platform::Reddit)
        .native_id(id)
        .author(Some("northloop".to_string()))
        .title(Some(format!("Post {id}")))
        .content("Light rail delays on the blue line")
        .created_at(Some(at(day, 12)))
        .subreddit(Some(sub.to_string()))
        .metrics(EngagementMetrics::upvotes(Count::reported(ups)))
        .build()
}

fn tweet(id: &str, retweets: i64, day: u32) -> Post {
    Post::builder()
        .platform(Platform::Twitter)
        .native_id(id)
        .author(Some("metrotransit".to_string()))
        .content("Blue line service restored")
        .created_at(Some(at(day, 9)))
        .metrics(EngagementMetrics::retweets(Count::reported(retweets)))
        .build()
}

fn video(id: &str, likes: i64, day: u32) -> Post {
    Post::builder()
        .platform(Platform::YouTube)
        .native_id(id)
        .author(Some("City Channel".to_string()))
        .title(Some("Council meeting".to_string()))
        .content("Full recording of the transit committee")
        .created_at(Some(at(day, 18)))
        .metrics(EngagementMetrics::video(
            Count::reported(likes * 100),
            Count::reported(likes),
            Count::reported(2),
        ))
        .build()
}

fn corpus() -> Vec<Post> {
    vec![
        reddit("r1", "Minneapolis", 120, 3),
        reddit("r2", "StPaul", 4, 5),
        tweet("t1", 40, 4),
        video("y1", 15, 2),
        video("y2", 300, 20),
    ]
}

fn ids<'a>(page: &SearchPage<&'a Post>) -> Vec<&'a str> {
    page.items.iter().map(|p| p.native_id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Builder round trip
// ---------------------------------------------------------------------------

#[test]
fn builder_round_trip_has_no_coercion() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let criteria = PostSearchCriteria::builder()
        .platforms([Platform::Reddit])
        .date_range(start, end)
        .min_engagement(10.0)
        .build();

    assert_eq!(
        criteria.platforms().map(|s| s.iter().copied().collect::<Vec<_>>()),
        Some(vec![Platform::Reddit])
    );
    assert_eq!(criteria.start_date(), Some(start));
    assert_eq!(criteria.end_date(), Some(end));
    assert_eq!(criteria.min_engagement(), Some(10.0));
    assert!(criteria.keyword().is_none());
    assert!(criteria.subreddit().is_none());
    assert!(validate(&criteria));
}

#[test]
fn builder_keeps_strings_verbatim() {
    let criteria = PostSearchCriteria::builder()
        .keyword("  Blue Line ")
        .author("MetroTransit")
        .build();
    assert_eq!(criteria.keyword(), Some("  Blue Line "));
    assert_eq!(criteria.author(), Some("MetroTransit"));
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn no_filters_returns_everything_newest_first() {
    let posts = corpus();
    let page = search(&posts, &PostSearchCriteria::builder().build()).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(ids(&page), vec!["y2", "r2", "t1", "r1", "y1"]);
}

#[test]
fn platform_filter() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder()
        .platforms([Platform::YouTube, Platform::Twitter])
        .build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|p| p.platform != Platform::Reddit));
}

#[test]
fn empty_platform_set_matches_nothing() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder().platforms(Vec::<Platform>::new()).build();
    assert_eq!(search(&posts, &criteria).unwrap().total, 0);
}

#[test]
fn date_range_is_inclusive() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder()
        .date_range(at(3, 12), at(4, 9))
        .build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(ids(&page), vec!["t1", "r1"]);
}

#[test]
fn keyword_matches_title_or_content_case_insensitively() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder().keyword("COUNCIL").build();
    assert_eq!(search(&posts, &criteria).unwrap().total, 2);

    let criteria = PostSearchCriteria::builder().keyword("light rail").build();
    assert_eq!(search(&posts, &criteria).unwrap().total, 2);
}

#[test]
fn subreddit_filter_excludes_non_reddit_posts() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder().subreddit("minneapolis").build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(ids(&page), vec!["r1"]);

    let criteria = PostSearchCriteria::builder()
        .platform(Platform::Twitter)
        .subreddit("minneapolis")
        .build();
    assert_eq!(search(&posts, &criteria).unwrap().total, 0);
}

#[test]
fn thresholds_require_the_metric() {
    let posts = corpus();

    let criteria = PostSearchCriteria::builder().min_upvotes(10).build();
    assert_eq!(ids(&search(&posts, &criteria).unwrap()), vec!["r1"]);

    let criteria = PostSearchCriteria::builder().min_likes(100).build();
    assert_eq!(ids(&search(&posts, &criteria).unwrap()), vec!["y2"]);

    // r1: 120, t1: 40, y1: 17, y2: 302, r2: 4
    let criteria = PostSearchCriteria::builder().min_engagement(17.0).build();
    assert_eq!(search(&posts, &criteria).unwrap().total, 4);
}

#[test]
fn sentiment_filters_skip_unannotated_posts() {
    let mut posts = corpus();
    posts[0] = posts[0]
        .clone()
        .with_sentiment(Sentiment::new(SentimentLabel::Negative, 0.9));
    posts[2] = posts[2]
        .clone()
        .with_sentiment(Sentiment::new(SentimentLabel::Positive, 0.4));

    let criteria = PostSearchCriteria::builder()
        .sentiment_labels([SentimentLabel::Positive, SentimentLabel::Neutral])
        .build();
    assert_eq!(ids(&search(&posts, &criteria).unwrap()), vec!["t1"]);

    let criteria = PostSearchCriteria::builder().min_sentiment_score(0.5).build();
    assert_eq!(ids(&search(&posts, &criteria).unwrap()), vec!["r1"]);
}

// ---------------------------------------------------------------------------
// Sorting and paging
// ---------------------------------------------------------------------------

#[test]
fn sort_by_upvotes_ascending_puts_missing_first() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder()
        .sort_by(SortField::Upvotes)
        .sort_direction(SortDirection::Asc)
        .build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(ids(&page), vec!["t1", "y1", "y2", "r2", "r1"]);
}

#[test]
fn sort_by_engagement_descending() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder()
        .sort_by(SortField::EngagementScore)
        .build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(ids(&page), vec!["y2", "r1", "t1", "y1", "r2"]);
}

#[test]
fn pagination_slices_after_sorting() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder().size(2).page(1).build();
    let page = search(&posts, &criteria).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(ids(&page), vec!["t1", "r1"]);
    assert!(page.has_next());

    let past_end = search(&posts, &criteria.to_builder().page(9).build()).unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 5);
}

#[test]
fn invalid_criteria_are_refused() {
    let posts = corpus();
    let criteria = PostSearchCriteria::builder().size(0).build();
    let err = search(&posts, &criteria).unwrap_err();
    assert_eq!(err.0, vec![CriteriaViolation::SizeOutOfRange { size: 0 }]);
}

#[test]
fn criteria_shared_across_threads() {
    let posts = std::sync::Arc::new(corpus());
    let criteria = std::sync::Arc::new(PostSearchCriteria::builder().min_upvotes(1).build());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let posts = posts.clone();
            let criteria = criteria.clone();
            std::thread::spawn(move || search(posts.iter(), &criteria).map(|p| p.total))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(2));
    }
}
