// Core data model: normalized posts, topic drafts, and enriched topics.
//
// A Post is produced once by the Reddit adapter and never mutated
// afterward. Topics reference posts by index into the run's post slice
// rather than cloning them — everything is scoped to a single request.

use serde::Serialize;

/// One normalized Reddit post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub author: String,
    pub upvotes: u64,
    pub comments: u64,
    pub created_utc: i64,
    pub url: String,
    pub thumbnail: Option<String>,
    pub media_url: Option<String>,
    pub is_video: bool,
    pub nsfw: bool,
    pub domain: String,
    pub subreddit_subscribers: u64,
    /// upvotes + 2×comments, computed once at normalization.
    pub engagement_score: u64,
}

impl Post {
    /// The engagement formula, shared by post- and topic-level scoring.
    pub fn engagement(upvotes: u64, comments: u64) -> u64 {
        upvotes + 2 * comments
    }
}

/// Which clustering strategy produced a set of topics.
///
/// The strategy decides the breadth formula: the oracle path has reliable
/// subscriber counts to mix in, the keyword fallback weights community
/// diversity more heavily instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStrategy {
    Oracle,
    Keyword,
}

/// A named cluster fresh out of the categorizer, before metric enrichment.
///
/// `members` are indices into the run's post slice, in the order the
/// strategy emitted them. Membership is disjoint under the keyword
/// fallback; the oracle may emit overlapping memberships.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub title: String,
    pub description: String,
    pub members: Vec<usize>,
}

/// One point of the 7-day mention-intensity series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: u64,
}

/// A fully enriched topic, ready for ranking and response assembly.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub members: Vec<usize>,
    pub total_upvotes: u64,
    pub total_comments: u64,
    pub engagement_score: u64,
    pub mentions: u64,
    /// 0–100, community diversity of the discussion.
    pub breadth: u64,
    /// Synthetic placeholder delta, −5..=15 from the injected RNG.
    /// No historical data exists to compute a real one.
    pub day_over_day_change: i32,
    pub trend_series: Vec<TrendPoint>,
}
