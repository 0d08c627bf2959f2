//! Search criteria: an immutable query description over the normalized corpus.
//!
//! Construction and validation are separate steps. The builder accepts any intermediate
//! state and `build()` never fails; callers run [`validate`] (or [`violations`] /
//! [`ensure_valid`]) on the finished criteria before executing a search.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use postsignal_world::{Platform, SentimentLabel};

pub const DEFAULT_PAGE_SIZE: i32 = 20;
pub const MAX_PAGE_SIZE: i32 = 1000;

// --- Sorting ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    EngagementScore,
    Upvotes,
    Likes,
    Views,
    SentimentScore,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::CreatedAt,
        SortField::EngagementScore,
        SortField::Upvotes,
        SortField::Likes,
        SortField::Views,
        SortField::SentimentScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::EngagementScore => "engagement_score",
            SortField::Upvotes => "upvotes",
            SortField::Likes => "likes",
            SortField::Views => "views",
            SortField::SentimentScore => "sentiment_score",
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl std::str::FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

// --- Criteria ---

/// What to select from the corpus, and how to shape the result.
///
/// Unset filters are not applied. Fields are read through accessors; a modified copy is
/// obtained with [`PostSearchCriteria::to_builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSearchCriteria {
    /// `None` means every platform. An empty set matches nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    platforms: Option<BTreeSet<Platform>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    /// Only Reddit posts have a subreddit; combining this with a platform filter that
    /// excludes Reddit is accepted and simply matches nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    subreddit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_upvotes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_likes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_engagement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_labels: Option<BTreeSet<SentimentLabel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_sentiment_score: Option<f64>,
    page: i32,
    size: i32,
    sort_by: SortField,
    sort_direction: SortDirection,
}

impl Default for PostSearchCriteria {
    fn default() -> Self {
        Self {
            platforms: None,
            start_date: None,
            end_date: None,
            keyword: None,
            author: None,
            subreddit: None,
            min_upvotes: None,
            min_likes: None,
            min_engagement: None,
            sentiment_labels: None,
            min_sentiment_score: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl PostSearchCriteria {
    pub fn builder() -> PostSearchCriteriaBuilder {
        PostSearchCriteriaBuilder::default()
    }

    /// Start a new builder seeded with these values.
    pub fn to_builder(&self) -> PostSearchCriteriaBuilder {
        PostSearchCriteriaBuilder {
            criteria: self.clone(),
        }
    }

    pub fn platforms(&self) -> Option<&BTreeSet<Platform>> {
        self.platforms.as_ref()
    }

    pub fn includes_platform(&self, platform: Platform) -> bool {
        self.platforms
            .as_ref()
            .map_or(true, |set| set.contains(&platform))
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn subreddit(&self) -> Option<&str> {
        self.subreddit.as_deref()
    }

    pub fn min_upvotes(&self) -> Option<i64> {
        self.min_upvotes
    }

    pub fn min_likes(&self) -> Option<i64> {
        self.min_likes
    }

    pub fn min_engagement(&self) -> Option<f64> {
        self.min_engagement
    }

    pub fn sentiment_labels(&self) -> Option<&BTreeSet<SentimentLabel>> {
        self.sentiment_labels.as_ref()
    }

    pub fn min_sentiment_score(&self) -> Option<f64> {
        self.min_sentiment_score
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }
}

/// Fluent, non-validating builder for [`PostSearchCriteria`]. Values are stored exactly as
/// given.
#[derive(Debug, Clone, Default)]
pub struct PostSearchCriteriaBuilder {
    criteria: PostSearchCriteria,
}

impl PostSearchCriteriaBuilder {
    /// Replace the platform filter with exactly these platforms.
    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.criteria.platforms = Some(platforms.into_iter().collect());
        self
    }

    /// Add one platform to the filter, creating it if unset.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.criteria
            .platforms
            .get_or_insert_with(BTreeSet::new)
            .insert(platform);
        self
    }

    /// Remove the platform filter (search every platform).
    pub fn any_platform(mut self) -> Self {
        self.criteria.platforms = None;
        self
    }

    pub fn date_range(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date(start).end_date(end)
    }

    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.criteria.start_date = Some(start);
        self
    }

    pub fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.criteria.end_date = Some(end);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.criteria.keyword = Some(keyword.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.criteria.author = Some(author.into());
        self
    }

    pub fn subreddit(mut self, subreddit: impl Into<String>) -> Self {
        self.criteria.subreddit = Some(subreddit.into());
        self
    }

    pub fn min_upvotes(mut self, min: i64) -> Self {
        self.criteria.min_upvotes = Some(min);
        self
    }

    pub fn min_likes(mut self, min: i64) -> Self {
        self.criteria.min_likes = Some(min);
        self
    }

    pub fn min_engagement(mut self, min: f64) -> Self {
        self.criteria.min_engagement = Some(min);
        self
    }

    pub fn sentiment_labels(mut self, labels: impl IntoIterator<Item = SentimentLabel>) -> Self {
        self.criteria.sentiment_labels = Some(labels.into_iter().collect());
        self
    }

    pub fn min_sentiment_score(mut self, min: f64) -> Self {
        self.criteria.min_sentiment_score = Some(min);
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.criteria.page = page;
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.criteria.size = size;
        self
    }

    pub fn sort_by(mut self, field: SortField) -> Self {
        self.criteria.sort_by = field;
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.criteria.sort_direction = direction;
        self
    }

    /// Finish construction. Never fails; run [`validate`] before searching.
    pub fn build(self) -> PostSearchCriteria {
        self.criteria
    }
}

// --- Validation ---

/// A single rule the criteria break. Carries enough to render a field-level message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CriteriaViolation {
    #[error("page must be >= 0, got {page}")]
    NegativePage { page: i32 },

    #[error("size must be between 1 and 1000, got {size}")]
    SizeOutOfRange { size: i32 },

    #[error("start date {start} is after end date {end}")]
    InvertedDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl CriteriaViolation {
    /// The criteria field a UI should attach the message to.
    pub fn field(&self) -> &'static str {
        match self {
            CriteriaViolation::NegativePage { .. } => "page",
            CriteriaViolation::SizeOutOfRange { .. } => "size",
            CriteriaViolation::InvertedDateRange { .. } => "start_date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid search criteria: {}", join_violations(.0))]
pub struct InvalidCriteria(pub Vec<CriteriaViolation>);

fn join_violations(violations: &[CriteriaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every rule the criteria break, in field order. Empty means valid.
///
/// Only three rules exist: non-negative page, size within `1..=1000`, and a start date
/// not after the end date when both are set.
pub fn violations(criteria: &PostSearchCriteria) -> Vec<CriteriaViolation> {
    let mut found = Vec::new();
    if criteria.page < 0 {
        found.push(CriteriaViolation::NegativePage {
            page: criteria.page,
        });
    }
    if !(1..=MAX_PAGE_SIZE).contains(&criteria.size) {
        found.push(CriteriaViolation::SizeOutOfRange {
            size: criteria.size,
        });
    }
    if let (Some(start), Some(end)) = (criteria.start_date, criteria.end_date) {
        if start > end {
            found.push(CriteriaViolation::InvertedDateRange { start, end });
        }
    }
    found
}

pub fn validate(criteria: &PostSearchCriteria) -> bool {
    violations(criteria).is_empty()
}

pub fn ensure_valid(criteria: &PostSearchCriteria) -> Result<(), InvalidCriteria> {
    let found = violations(criteria);
    if found.is_empty() {
        Ok(())
    } else {
        Err(InvalidCriteria(found))
    }
}
