//! In-memory reference executor for [`PostSearchCriteria`].
//!
//! Filter semantics work like SQL: an unset filter is not applied; a set filter drops
//! posts that do not match, including posts that lack the filtered value entirely.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::criteria::{ensure_valid, InvalidCriteria, PostSearchCriteria, SortDirection, SortField};
use postsignal_world::{Count, Post};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    /// Matches before pagination.
    pub total: usize,
    pub page: i32,
    pub size: i32,
}

impl<T> SearchPage<T> {
    pub fn total_pages(&self) -> usize {
        match usize::try_from(self.size) {
            Ok(size) if size > 0 => self.total.div_ceil(size),
            _ => 0,
        }
    }

    pub fn has_next(&self) -> bool {
        usize::try_from(self.page).map_or(false, |page| page + 1 < self.total_pages())
    }
}

impl PostSearchCriteria {
    /// Whether a single post passes every filter. Pagination and sorting are not involved.
    pub fn matches(&self, post: &Post) -> bool {
        if !self.includes_platform(post.platform) {
            return false;
        }
        if let Some(start) = self.start_date() {
            if post.created_at.map_or(true, |at| at < start) {
                return false;
            }
        }
        if let Some(end) = self.end_date() {
            if post.created_at.map_or(true, |at| at > end) {
                return false;
            }
        }
        if let Some(keyword) = self.keyword() {
            let needle = keyword.to_lowercase();
            let in_title = post
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle));
            if !in_title && !post.content.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(author) = self.author() {
            if !post
                .author
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(author))
            {
                return false;
            }
        }
        if let Some(subreddit) = self.subreddit() {
            if !post
                .subreddit
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(subreddit))
            {
                return false;
            }
        }
        if let Some(min) = self.min_upvotes() {
            if count_value(&post.metrics.upvotes).map_or(true, |v| v < min) {
                return false;
            }
        }
        if let Some(min) = self.min_likes() {
            if count_value(&post.metrics.likes).map_or(true, |v| v < min) {
                return false;
            }
        }
        if let Some(min) = self.min_engagement() {
            if post.engagement_score() < min {
                return false;
            }
        }
        if let Some(labels) = self.sentiment_labels() {
            if !post.sentiment.is_some_and(|s| labels.contains(&s.label)) {
                return false;
            }
        }
        if let Some(min) = self.min_sentiment_score() {
            if !post.sentiment.is_some_and(|s| s.score >= min) {
                return false;
            }
        }
        true
    }
}

/// Validate, filter, sort and paginate. Posts missing the sort key rank lowest; ties keep
/// input order.
pub fn search<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    criteria: &PostSearchCriteria,
) -> Result<SearchPage<&'a Post>, InvalidCriteria> {
    ensure_valid(criteria)?;

    let mut matched: Vec<&Post> = posts.into_iter().filter(|p| criteria.matches(p)).collect();
    let total = matched.len();

    let field = criteria.sort_by();
    matched.sort_by(|a, b| {
        let ord = compare_by(field, a, b);
        match criteria.sort_direction() {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    // Both are non-negative once validated.
    let size = criteria.size() as usize;
    let offset = (criteria.page() as usize).saturating_mul(size);
    let items: Vec<&Post> = matched.into_iter().skip(offset).take(size).collect();

    debug!(
        total,
        returned = items.len(),
        page = criteria.page(),
        sort = %field,
        "search executed"
    );

    Ok(SearchPage {
        items,
        total,
        page: criteria.page(),
        size: criteria.size(),
    })
}

fn count_value(count: &Option<Count>) -> Option<i64> {
    count.as_ref().map(|c| c.value)
}

fn compare_by(field: SortField, a: &Post, b: &Post) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::EngagementScore => a.engagement_score().total_cmp(&b.engagement_score()),
        SortField::Upvotes => count_value(&a.metrics.upvotes).cmp(&count_value(&b.metrics.upvotes)),
        SortField::Likes => count_value(&a.metrics.likes).cmp(&count_value(&b.metrics.likes)),
        SortField::Views => count_value(&a.metrics.views).cmp(&count_value(&b.metrics.views)),
        SortField::SentimentScore => {
            let (a, b) = (a.sentiment.map(|s| s.score), b.sentiment.map(|s| s.score));
            match (a, b) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            }
        }
    }
}
