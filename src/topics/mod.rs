// Topic categorization — oracle-assisted clustering with a deterministic
// keyword fallback.
//
// The oracle path builds a numbered manifest of the first 40 posts, asks
// the categorization service for strict JSON, and validates the reply
// closed: any parse or schema failure downgrades the whole request to the
// keyword clusterer. Oracle failures are logged here and never propagate
// past this module.

pub mod keywords;
pub mod oracle;
pub mod traits;

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::TrendError;
use crate::models::{ClusterStrategy, Post, TopicDraft};
use keywords::KeywordClusterer;
use traits::CategoryOracle;

/// Manifest cap — the oracle only ever sees the first 40 posts.
const MAX_MANIFEST_POSTS: usize = 40;

pub struct Categorizer {
    oracle: Option<Arc<dyn CategoryOracle>>,
    fallback: KeywordClusterer,
}

impl Categorizer {
    pub fn new(oracle: Option<Arc<dyn CategoryOracle>>) -> Self {
        Self {
            oracle,
            fallback: KeywordClusterer::default(),
        }
    }

    /// Cluster posts into topic drafts.
    ///
    /// Infallible from the caller's perspective: when the oracle is
    /// missing or fails in any way, the deterministic fallback runs in
    /// full. The returned strategy tells the metric calculator which
    /// breadth formula applies.
    pub async fn cluster(&self, posts: &[Post]) -> (Vec<TopicDraft>, ClusterStrategy) {
        if let Some(oracle) = &self.oracle {
            match self.cluster_via_oracle(oracle.as_ref(), posts).await {
                Ok(drafts) => {
                    info!(topics = drafts.len(), "oracle categorization succeeded");
                    return (drafts, ClusterStrategy::Oracle);
                }
                Err(e) => {
                    warn!(error = %e, "oracle categorization failed, using keyword fallback");
                }
            }
        }

        let drafts = self.fallback.cluster(posts);
        info!(topics = drafts.len(), "keyword categorization completed");
        (drafts, ClusterStrategy::Keyword)
    }

    async fn cluster_via_oracle(
        &self,
        oracle: &dyn CategoryOracle,
        posts: &[Post],
    ) -> Result<Vec<TopicDraft>, TrendError> {
        let manifest_len = posts.len().min(MAX_MANIFEST_POSTS);
        let prompt = build_prompt(&posts[..manifest_len]);

        let text = oracle
            .complete(&prompt)
            .await
            .map_err(|e| TrendError::Oracle(e.to_string()))?;

        let reply = parse_oracle_reply(&text)?;
        debug!(topics = reply.topics.len(), "oracle reply parsed");

        // Post ids are 1-based into the manifest; anything outside [1, N]
        // is discarded, and topics left with no valid members are dropped.
        let drafts: Vec<TopicDraft> = reply
            .topics
            .into_iter()
            .filter_map(|topic| {
                let members: Vec<usize> = topic
                    .post_ids
                    .iter()
                    .filter(|&&id| id >= 1 && id as usize <= manifest_len)
                    .map(|&id| (id - 1) as usize)
                    .collect();
                if members.is_empty() {
                    None
                } else {
                    Some(TopicDraft {
                        title: topic.title,
                        description: topic.description,
                        members,
                    })
                }
            })
            .collect();

        if drafts.is_empty() {
            return Err(TrendError::Oracle("no valid topics in reply".to_string()));
        }
        Ok(drafts)
    }
}

/// Build the clustering prompt: strict-JSON instruction plus a numbered
/// manifest of titles, communities, and engagement counts.
fn build_prompt(posts: &[Post]) -> String {
    let manifest = posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {} (r/{}, {} upvotes, {} comments)",
                i + 1,
                p.title,
                p.subreddit,
                p.upvotes,
                p.comments
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Group these live Reddit posts into named trending topics.
Return strictly JSON, no markdown, with this shape:
{{"topics":[{{"title":"short topic name","description":"one-line description","postIds":[1,2]}}]}}

Posts:
{manifest}"#
    )
}

/// Schema for the oracle's reply. Strict: a missing or mistyped field
/// fails the whole response closed to the fallback, never partially
/// trusted.
#[derive(Debug, Deserialize)]
struct OracleReply {
    topics: Vec<OracleTopic>,
}

#[derive(Debug, Deserialize)]
struct OracleTopic {
    title: String,
    description: String,
    #[serde(rename = "postIds")]
    post_ids: Vec<i64>,
}

/// Parse the completion as JSON; if that fails, try the first balanced
/// `{...}` substring before giving up (models sometimes wrap the JSON in
/// prose or a code fence despite the instruction).
fn parse_oracle_reply(text: &str) -> Result<OracleReply, TrendError> {
    if let Ok(reply) = serde_json::from_str::<OracleReply>(text) {
        return Ok(reply);
    }

    let embedded = extract_json_object(text)
        .ok_or_else(|| TrendError::Oracle("reply contained no JSON object".to_string()))?;
    serde_json::from_str(embedded)
        .map_err(|e| TrendError::Oracle(format!("malformed reply JSON: {e}")))
}

/// Best-effort extraction of the first balanced `{...}` substring.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
