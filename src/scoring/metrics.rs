// Aggregate metrics per topic.
//
// Engagement is recomputed from raw upvote/comment totals, not summed
// from per-post scores. The breadth formula depends on the clustering
// strategy: the oracle path mixes in subscriber counts, the keyword
// fallback weights community diversity more heavily because subscriber
// counts are unreliable on search results.

use std::collections::HashSet;

use rand::Rng;

use crate::models::{ClusterStrategy, Post, Topic, TopicDraft};

/// Enrich a topic draft with aggregate metrics. The trend series is
/// filled separately by the trend synthesizer.
pub fn enrich(
    draft: TopicDraft,
    posts: &[Post],
    strategy: ClusterStrategy,
    rng: &mut impl Rng,
) -> Topic {
    let members: Vec<&Post> = draft.members.iter().map(|&i| &posts[i]).collect();

    let total_upvotes: u64 = members.iter().map(|p| p.upvotes).sum();
    let total_comments: u64 = members.iter().map(|p| p.comments).sum();
    let engagement_score = Post::engagement(total_upvotes, total_comments);

    let unique_communities = members
        .iter()
        .map(|p| p.subreddit.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let max_community_size = members
        .iter()
        .map(|p| p.subreddit_subscribers)
        .max()
        .unwrap_or(0);

    let mentions = 3 * members.len() as u64 + total_comments / 10;

    let breadth = match strategy {
        ClusterStrategy::Oracle => {
            (unique_communities * 10 + max_community_size / 100_000).min(100)
        }
        ClusterStrategy::Keyword => (unique_communities * 15).min(100),
    };

    // Placeholder delta — no historical data exists to compute a real one.
    let day_over_day_change = rng.random_range(-5..=15);

    Topic {
        id: slugify(&draft.title),
        title: draft.title,
        description: draft.description,
        members: draft.members,
        total_upvotes,
        total_comments,
        engagement_score,
        mentions,
        breadth,
        day_over_day_change,
        trend_series: Vec::new(),
    }
}

/// Lowercase URL-safe slug for a topic title.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "topic".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn post(subreddit: &str, upvotes: u64, comments: u64, subscribers: u64) -> Post {
        Post {
            id: format!("{subreddit}-{upvotes}"),
            title: "t".to_string(),
            subreddit: subreddit.to_string(),
            author: "anonymous".to_string(),
            upvotes,
            comments,
            created_utc: 1_735_689_600,
            url: "https://reddit.com/".to_string(),
            thumbnail: None,
            media_url: None,
            is_video: false,
            nsfw: false,
            domain: "reddit.com".to_string(),
            subreddit_subscribers: subscribers,
            engagement_score: Post::engagement(upvotes, comments),
        }
    }

    fn draft(members: Vec<usize>) -> TopicDraft {
        TopicDraft {
            title: "Test Topic".to_string(),
            description: "d".to_string(),
            members,
        }
    }

    #[test]
    fn test_aggregates_and_engagement_recomputed() {
        let posts = vec![
            post("news", 100, 20, 500_000),
            post("worldnews", 50, 5, 2_000_000),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let topic = enrich(draft(vec![0, 1]), &posts, ClusterStrategy::Oracle, &mut rng);

        assert_eq!(topic.total_upvotes, 150);
        assert_eq!(topic.total_comments, 25);
        assert_eq!(topic.engagement_score, 150 + 2 * 25);
        // mentions = 3×2 members + 25/10
        assert_eq!(topic.mentions, 8);
        // breadth = 2 communities × 10 + 2_000_000/100_000
        assert_eq!(topic.breadth, 40);
        assert_eq!(topic.id, "test-topic");
    }

    #[test]
    fn test_keyword_breadth_ignores_subscribers() {
        let posts = vec![
            post("a", 1, 0, 9_000_000),
            post("b", 1, 0, 9_000_000),
            post("a", 1, 0, 9_000_000),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let topic = enrich(draft(vec![0, 1, 2]), &posts, ClusterStrategy::Keyword, &mut rng);
        // 2 unique communities × 15
        assert_eq!(topic.breadth, 30);
    }

    #[test]
    fn test_breadth_clamped_to_100() {
        let posts: Vec<Post> = (0..12).map(|i| post(&format!("sub{i}"), 1, 0, 0)).collect();
        let members: Vec<usize> = (0..12).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let oracle = enrich(draft(members.clone()), &posts, ClusterStrategy::Oracle, &mut rng);
        let keyword = enrich(draft(members), &posts, ClusterStrategy::Keyword, &mut rng);
        assert_eq!(oracle.breadth, 100);
        assert_eq!(keyword.breadth, 100);
    }

    #[test]
    fn test_day_over_day_bounded_and_seeded() {
        let posts = vec![post("news", 10, 2, 0)];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let topic = enrich(draft(vec![0]), &posts, ClusterStrategy::Keyword, &mut rng);
            assert!((-5..=15).contains(&topic.day_over_day_change));
        }

        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let ta = enrich(draft(vec![0]), &posts, ClusterStrategy::Keyword, &mut a);
        let tb = enrich(draft(vec![0]), &posts, ClusterStrategy::Keyword, &mut b);
        assert_eq!(ta.day_over_day_change, tb.day_over_day_change);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("AI & Machine Learning!"), "ai-machine-learning");
        assert_eq!(slugify("---"), "topic");
    }
}
