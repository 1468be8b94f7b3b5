use thiserror::Error;

/// Errors the trending pipeline can produce.
///
/// `Oracle` never crosses the categorizer boundary — an oracle failure
/// degrades to the keyword fallback and is logged there. The other two
/// variants surface to the web layer, which maps them to distinct
/// status codes (502 for transport failure, 404 for an empty result).
#[derive(Error, Debug)]
pub enum TrendError {
    #[error("failed to fetch posts from Reddit: {0}")]
    UpstreamFetch(String),

    #[error("no reddit posts found")]
    EmptyResult,

    #[error("categorization oracle failed: {0}")]
    Oracle(String),
}

pub type Result<T> = std::result::Result<T, TrendError>;
