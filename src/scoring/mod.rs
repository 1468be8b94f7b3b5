// Topic scoring — metric aggregation, synthetic trend series, ranking.

pub mod metrics;
pub mod rank;
pub mod trend;
