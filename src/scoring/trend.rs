// Synthetic 7-day mention-intensity series.
//
// Decaying-backward shape: today is anchored at max(5, mentions/2) and
// earlier days decay linearly with a jitter drawn from the injected RNG.
// No real historical data backs this — it exists so the dashboard
// sparkline has a plausible trailing week.

use rand::Rng;

use crate::models::TrendPoint;

/// Number of points in every trend series.
pub const TREND_DAYS: u64 = 7;

/// Per-day linear decay applied going backward from today.
const DECAY_PER_DAY: f64 = 0.12;

/// Produce exactly 7 points, oldest first, last point labeled "Today".
///
/// All values are at least 1. Identical across runs for the same seed
/// and mentions count.
pub fn synthesize(mentions: u64, rng: &mut impl Rng) -> Vec<TrendPoint> {
    let base = (mentions / 2).max(5);

    (0..TREND_DAYS)
        .map(|i| {
            let days_back = TREND_DAYS - 1 - i;
            if days_back == 0 {
                return TrendPoint {
                    label: "Today".to_string(),
                    value: base,
                };
            }

            let jitter = rng.random_range(0.75..1.15);
            let decay = 1.0 - DECAY_PER_DAY * days_back as f64;
            let value = (base as f64 * jitter * decay).floor() as u64;

            TrendPoint {
                label: format!("{days_back}d ago"),
                value: value.max(1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seven_points_oldest_to_newest() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = synthesize(40, &mut rng);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "6d ago");
        assert_eq!(series[5].label, "1d ago");
        assert_eq!(series[6].label, "Today");
    }

    #[test]
    fn test_today_anchored_at_base_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = synthesize(40, &mut rng);
        assert_eq!(series[6].value, 20);
    }

    #[test]
    fn test_base_floored_at_five() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = synthesize(0, &mut rng);
        assert_eq!(series[6].value, 5);
    }

    #[test]
    fn test_all_values_at_least_one() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for point in synthesize(1, &mut rng) {
                assert!(point.value >= 1);
            }
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(synthesize(30, &mut a), synthesize(30, &mut b));
    }
}
