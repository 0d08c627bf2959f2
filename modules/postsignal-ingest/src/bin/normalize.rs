use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use postsignal_common::{search, Config, Platform, SortDirection, SortField};
use postsignal_ingest::{detect_platform, normalize_concurrently, RawBatch};

#[derive(Parser)]
#[command(
    name = "postsignal-normalize",
    about = "Normalize saved platform API responses and query the resulting posts"
)]
struct Cli {
    /// Raw API response files (JSON), all from the same platform
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// reddit, twitter or youtube (case-insensitive)
    #[arg(long)]
    platform: Option<Platform>,

    /// URL the responses were fetched from; used to detect the platform when --platform is absent
    #[arg(long)]
    source_url: Option<String>,

    #[arg(long)]
    keyword: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    subreddit: Option<String>,

    #[arg(long)]
    min_engagement: Option<f64>,

    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    page: i32,

    /// Page size; defaults to POSTSIGNAL_DEFAULT_PAGE_SIZE
    #[arg(long)]
    size: Option<i32>,

    /// created_at, engagement_score, upvotes, likes, views or sentiment_score
    #[arg(long, default_value = "created_at")]
    sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_json);

    let cli = Cli::parse();

    let platform = cli
        .platform
        .or_else(|| cli.source_url.as_deref().and_then(detect_platform))
        .context("Cannot tell the platform: pass --platform or a recognizable --source-url")?;

    let mut raw = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let batch = RawBatch::from_json(platform, &body)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        raw.push(batch);
    }
    info!(%platform, files = raw.len(), "loaded raw responses");

    let batches = normalize_concurrently(raw, &config).await?;
    for (path, batch) in cli.files.iter().zip(&batches) {
        for skipped in &batch.skipped {
            warn!(
                file = %path.display(),
                position = skipped.position,
                reason = %skipped.reason,
                "item skipped"
            );
        }
    }

    let mut builder = config
        .criteria_builder()
        .platform(platform)
        .page(cli.page)
        .sort_by(cli.sort)
        .sort_direction(if cli.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        });
    if let Some(size) = cli.size {
        builder = builder.size(size);
    }
    if let Some(keyword) = cli.keyword {
        builder = builder.keyword(keyword);
    }
    if let Some(author) = cli.author {
        builder = builder.author(author);
    }
    if let Some(subreddit) = cli.subreddit {
        builder = builder.subreddit(subreddit);
    }
    if let Some(min) = cli.min_engagement {
        builder = builder.min_engagement(min);
    }
    let criteria = builder.build();

    let page = search(batches.iter().flat_map(|b| &b.posts), &criteria)?;
    let paging: Vec<_> = batches.iter().map(|b| &b.paging).collect();
    let output = json!({
        "platform": platform,
        "total": page.total,
        "page": page.page,
        "size": page.size,
        "total_pages": page.total_pages(),
        "items": page.items,
        "paging": paging,
        "skipped": batches.iter().map(|b| b.skipped.len()).sum::<usize>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
