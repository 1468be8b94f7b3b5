// Final ordering: engagement descending, ties broken by emission order.

use crate::models::Topic;

/// Stable sort by aggregate engagement, highest first. No truncation —
/// bounding already happened at the categorizer/metric stage.
pub fn rank(topics: &mut [Topic]) {
    topics.sort_by(|a, b| b.engagement_score.cmp(&a.engagement_score));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, engagement: u64) -> Topic {
        Topic {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            members: Vec::new(),
            total_upvotes: 0,
            total_comments: 0,
            engagement_score: engagement,
            mentions: 0,
            breadth: 0,
            day_over_day_change: 0,
            trend_series: Vec::new(),
        }
    }

    #[test]
    fn test_sorted_descending() {
        let mut topics = vec![topic("low", 10), topic("high", 500), topic("mid", 80)];
        rank(&mut topics);

        let ids: Vec<&str> = topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_preserve_emission_order() {
        let mut topics = vec![
            topic("first", 100),
            topic("second", 100),
            topic("third", 100),
        ];
        rank(&mut topics);

        let ids: Vec<&str> = topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
