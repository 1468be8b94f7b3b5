// Reddit source adapter — unauthenticated listing API over HTTP.
//
// Fetches up to `limit` posts for either the default hot/global feed or a
// free-text search, then normalizes each raw record into a Post with safe
// defaults for the fields Reddit likes to omit. Every call carries a
// cache-busting parameter and a no-cache header so the result always
// reflects current upstream state.

pub mod types;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Result, TrendError};
use crate::models::Post;
use types::{Listing, RawPost};

/// Default base URL for the public Reddit listing API.
pub const DEFAULT_REDDIT_URL: &str = "https://www.reddit.com";

/// Default maximum number of posts per fetch.
pub const DEFAULT_LIMIT: usize = 50;

/// Thin reqwest wrapper for the Reddit listing endpoints.
pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    /// Create a client pointing at the given base URL.
    ///
    /// Pass a different URL for testing or a read-through proxy.
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("smolder/0.1 (trend-dashboard)")
            .timeout(timeout)
            .build()
            .map_err(|e| TrendError::UpstreamFetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and normalize posts for a query (search scope) or, without
    /// one, the hot/global feed. Upstream order is preserved.
    pub async fn fetch_posts(&self, query: Option<&str>, limit: usize) -> Result<Vec<Post>> {
        let url = match query {
            Some(q) if !q.is_empty() => format!("{}/search.json", self.base_url),
            _ => format!("{}/r/all/hot.json", self.base_url),
        };

        let limit_s = limit.to_string();
        // Cache-bust param so intermediaries never serve a stale listing.
        let bust = Utc::now().timestamp_millis().to_string();
        let mut params: Vec<(&str, &str)> = vec![("limit", &limit_s), ("_t", &bust)];
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            params.push(("q", q));
            params.push(("sort", "new"));
        }

        debug!(url = %url, query = ?query, "fetching reddit listing");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| TrendError::UpstreamFetch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(TrendError::UpstreamFetch(format!(
                "reddit returned {status}"
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| TrendError::UpstreamFetch(format!("failed to decode listing: {e}")))?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| normalize(child.data))
            .collect();

        if posts.is_empty() {
            return Err(TrendError::EmptyResult);
        }

        info!(posts = posts.len(), "reddit fetch completed");
        Ok(posts)
    }
}

/// Normalize one raw record into a Post, substituting safe defaults for
/// anything Reddit left out.
fn normalize(raw: RawPost) -> Post {
    let upvotes = raw.ups.unwrap_or(0).max(0) as u64;
    let comments = raw.num_comments.unwrap_or(0).max(0) as u64;

    let permalink = raw.permalink.unwrap_or_default();
    let url = safe_url(&format!("https://reddit.com{permalink}"));

    let thumbnail = raw
        .thumbnail
        .filter(|t| t.starts_with("http"));

    // Prefer the playable video URL, then the resolved destination,
    // then whatever the post itself links to.
    let media_url = if raw.is_video {
        raw.media
            .and_then(|m| m.reddit_video)
            .and_then(|v| v.fallback_url)
            .or(raw.url_overridden_by_dest)
            .or(raw.url)
    } else {
        raw.url_overridden_by_dest.or(raw.url)
    };

    Post {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_else(|| "Untitled".to_string()),
        subreddit: raw.subreddit.unwrap_or_default(),
        author: raw.author.unwrap_or_else(|| "anonymous".to_string()),
        upvotes,
        comments,
        created_utc: raw
            .created_utc
            .map(|t| t as i64)
            .unwrap_or_else(|| Utc::now().timestamp()),
        url,
        thumbnail,
        media_url,
        is_video: raw.is_video,
        nsfw: raw.over_18,
        domain: raw.domain.unwrap_or_default(),
        subreddit_subscribers: raw.subreddit_subscribers.unwrap_or(0),
        engagement_score: Post::engagement(upvotes, comments),
    }
}

/// Round-trip a URL through the parser to guarantee it is well-formed,
/// falling back to the raw string when parsing fails.
fn safe_url(raw: &str) -> String {
    match reqwest::Url::parse(raw) {
        Ok(u) => u.to_string(),
        Err(_) => raw.to_string(),
    }
}
