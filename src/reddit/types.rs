// Serde types for the Reddit listing API.
//
// Reddit's JSON is loosely typed in practice — almost every field can be
// absent or null on promoted/removed posts, so everything optional here
// gets a safe default during normalization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: RawPost,
}

/// One raw post record as Reddit returns it.
#[derive(Debug, Deserialize)]
pub struct RawPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subreddit: Option<String>,
    pub author: Option<String>,
    pub ups: Option<i64>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<f64>,
    pub permalink: Option<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    pub url_overridden_by_dest: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub over_18: bool,
    pub domain: Option<String>,
    pub subreddit_subscribers: Option<u64>,
    pub media: Option<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    pub reddit_video: Option<RedditVideo>,
}

#[derive(Debug, Deserialize)]
pub struct RedditVideo {
    pub fallback_url: Option<String>,
}
