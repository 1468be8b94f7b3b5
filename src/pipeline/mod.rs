// The trending pipeline — six stages run strictly in sequence.
//
// Source adapter → categorizer → metric calculator → trend synthesizer →
// ranker → response assembler. Each invocation is request-scoped and
// stateless: fresh posts in, one report out, nothing shared across
// concurrent runs. The two external calls are awaited sequentially under
// their client timeouts; cancellation drops the in-flight future and no
// partial topic list is ever emitted.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{ClusterStrategy, Post, Topic, TopicDraft, TrendPoint};
use crate::reddit::RedditClient;
use crate::scoring::{metrics, rank, trend};
use crate::topics::Categorizer;

/// Keyword-fallback topic cap, applied after engagement scoring.
const MAX_KEYWORD_TOPICS: usize = 12;

/// How many example posts each topic carries in the response.
const MAX_EXAMPLE_POSTS: usize = 8;

pub struct TrendingPipeline {
    reddit: RedditClient,
    categorizer: Categorizer,
}

impl TrendingPipeline {
    pub fn new(reddit: RedditClient, categorizer: Categorizer) -> Self {
        Self { reddit, categorizer }
    }

    /// Run the full pipeline for one request.
    ///
    /// The RNG drives day-over-day and trend jitter only; callers seed it
    /// per request (the server from OS entropy, tests from a fixed seed).
    pub async fn run(
        &self,
        query: Option<&str>,
        limit: usize,
        rng: &mut impl Rng,
    ) -> Result<TrendingReport> {
        let start = std::time::Instant::now();

        let posts = self.reddit.fetch_posts(query, limit).await?;
        let (drafts, strategy) = self.categorizer.cluster(&posts).await;

        let report = assemble(query, &posts, drafts, strategy, rng);
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            posts = report.total_posts,
            topics = report.topics.len(),
            strategy = ?strategy,
            "trending pipeline completed"
        );
        Ok(report)
    }
}

/// Score, synthesize, rank, and package topic drafts into the response.
///
/// Split out from `run` so the scoring half of the pipeline is testable
/// without a live post source.
pub fn assemble(
    query: Option<&str>,
    posts: &[Post],
    drafts: Vec<TopicDraft>,
    strategy: ClusterStrategy,
    rng: &mut impl Rng,
) -> TrendingReport {
    let mut topics: Vec<Topic> = drafts
        .into_iter()
        .map(|draft| {
            let mut topic = metrics::enrich(draft, posts, strategy, rng);
            topic.trend_series = trend::synthesize(topic.mentions, rng);
            topic
        })
        .collect();

    rank::rank(&mut topics);

    // The keyword clusterer emits a key per leading phrase, so bound its
    // output to the strongest topics. Oracle output is already small.
    if strategy == ClusterStrategy::Keyword && topics.len() > MAX_KEYWORD_TOPICS {
        debug!(dropped = topics.len() - MAX_KEYWORD_TOPICS, "capping keyword topics");
        topics.truncate(MAX_KEYWORD_TOPICS);
    }

    dedup_ids(&mut topics);

    TrendingReport {
        success: true,
        query: query
            .filter(|q| !q.is_empty())
            .unwrap_or("top trending")
            .to_string(),
        // Always the raw count from the source adapter — clustering may
        // drop or (under the oracle) duplicate memberships.
        total_posts: posts.len(),
        topics: topics.into_iter().map(|t| TopicPayload::new(t, posts)).collect(),
        last_updated: Utc::now().to_rfc3339(),
    }
}

/// Slugs collide when the categorizer emits same-named topics; suffix the
/// later ones so ids stay unique within a response.
fn dedup_ids(topics: &mut [Topic]) {
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for topic in topics.iter_mut() {
        let count = seen.entry(topic.id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            topic.id = format!("{}-{}", topic.id, count);
        }
    }
}

// --- Response payload ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingReport {
    pub success: bool,
    pub query: String,
    pub total_posts: usize,
    pub topics: Vec<TopicPayload>,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPayload {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub upvotes: u64,
    pub comments: u64,
    pub engagement_score: u64,
    pub mentions: u64,
    pub breadth: u64,
    pub day_over_day_change: i32,
    pub trend_series: Vec<TrendPoint>,
    /// Top member posts, in member order, for the dashboard detail view.
    pub posts: Vec<Post>,
}

impl TopicPayload {
    fn new(topic: Topic, posts: &[Post]) -> Self {
        let examples = topic
            .members
            .iter()
            .take(MAX_EXAMPLE_POSTS)
            .map(|&i| posts[i].clone())
            .collect();

        Self {
            id: topic.id,
            title: topic.title,
            subtitle: topic.description,
            upvotes: topic.total_upvotes,
            comments: topic.total_comments,
            engagement_score: topic.engagement_score,
            mentions: topic.mentions,
            breadth: topic.breadth,
            day_over_day_change: topic.day_over_day_change,
            trend_series: topic.trend_series,
            posts: examples,
        }
    }
}
