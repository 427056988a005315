use crate::decimal::Decimal;

/// Running min/max/sum/count for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub count: u64,
    pub min: Decimal,
    pub max: Decimal,
    pub sum: Decimal,
}

impl Statistics {
    pub fn new(value: Decimal) -> Self {
        Statistics {
            count: 1,
            min: value,
            max: value,
            sum: value,
        }
    }

    #[inline]
    pub fn record(&mut self, value: Decimal) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &Statistics) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Real-valued average; not rounded.
    pub fn mean(&self) -> f64 {
        self.sum.scaled() as f64 / (self.count as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(scaled: i64) -> Decimal {
        Decimal::from_scaled(scaled)
    }

    #[test]
    fn record_tracks_extremes_and_totals() {
        let mut stats = Statistics::new(d(1000));
        stats.record(d(3000));
        stats.record(d(-150));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, d(-150));
        assert_eq!(stats.max, d(3000));
        assert_eq!(stats.sum, d(3850));
        assert!(stats.min <= stats.max);
    }

    #[test]
    fn merge_matches_recording_everything_in_one_place() {
        let values = [d(500), d(-2500), d(9999), d(0), d(1)];

        let mut whole = Statistics::new(values[0]);
        values[1..].iter().for_each(|v| whole.record(*v));

        let mut left = Statistics::new(values[0]);
        left.record(values[1]);
        let mut right = Statistics::new(values[2]);
        right.record(values[3]);
        right.record(values[4]);

        let mut left_then_right = left;
        left_then_right.merge(&right);
        let mut right_then_left = right;
        right_then_left.merge(&left);

        assert_eq!(left_then_right, whole);
        assert_eq!(right_then_left, whole);
    }

    #[test]
    fn mean_is_a_real_division() {
        let mut stats = Statistics::new(d(1000));
        stats.record(d(2000));
        stats.record(d(2000));
        assert!((stats.mean() - 50.0 / 3.0).abs() < 1e-12);
    }
}
