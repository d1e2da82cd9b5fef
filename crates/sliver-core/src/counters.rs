use serde::Serialize;

/// Once the defect rate reaches 20% the visual indicator is pegged at 100%.
const BAR_SCALE: f64 = 5.0;

/// Running tally for the inspection session.
///
/// Counters are monotonically non-decreasing and deliberately survive
/// stop/start cycles; only a process restart zeroes them.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SessionCounters {
    pub inspected: u64,
    pub good: u64,
    pub bad: u64,
}

impl SessionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_good(&mut self) {
        self.inspected += 1;
        self.good += 1;
    }

    pub fn record_defect(&mut self) {
        self.inspected += 1;
        self.bad += 1;
    }

    /// Defect rate in percent, rounded to one decimal place.
    pub fn defect_rate(&self) -> f64 {
        if self.inspected == 0 {
            return 0.0;
        }
        let raw = self.bad as f64 / self.inspected as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// Width of the proportional defect indicator, clamped to [0, 100].
    pub fn defect_bar_pct(&self) -> f64 {
        (self.defect_rate() * BAR_SCALE).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_zero_when_nothing_inspected() {
        let counters = SessionCounters::new();
        assert_eq!(counters.defect_rate(), 0.0);
        assert_eq!(counters.defect_bar_pct(), 0.0);
    }

    #[test]
    fn test_rate_rounds_to_one_decimal() {
        let mut counters = SessionCounters::new();
        counters.record_defect();
        counters.record_good();
        counters.record_good();
        // 1/3 = 33.333... -> 33.3
        assert_eq!(counters.defect_rate(), 33.3);
    }

    #[test]
    fn test_bar_pegs_at_twenty_percent_rate() {
        let mut counters = SessionCounters::new();
        counters.record_defect();
        counters.record_good();
        counters.record_good();
        counters.record_good();
        counters.record_good();
        // 20% rate scales to exactly 100
        assert_eq!(counters.defect_rate(), 20.0);
        assert_eq!(counters.defect_bar_pct(), 100.0);

        counters.record_defect();
        assert!(counters.defect_rate() > 20.0);
        assert_eq!(counters.defect_bar_pct(), 100.0);
    }

    #[test]
    fn test_counters_are_monotonic() {
        let mut counters = SessionCounters::new();
        counters.record_defect();
        counters.record_good();
        assert_eq!(counters.inspected, 2);
        assert_eq!(counters.good, 1);
        assert_eq!(counters.bad, 1);
    }
}
