use crate::decimal::Money;
use crate::ledger::monthly::{average_of, average_of_last, MonthlyTotal};
use crate::types::ProjectionMode;

/// number of recent buckets averaged by the default strategy
pub const RECENT_MONTHS: usize = 6;

/// strategy for estimating the monthly payment going forward
pub trait MonthlyEstimate {
    fn mode(&self) -> ProjectionMode;

    fn estimate(&self, buckets: &[MonthlyTotal]) -> Money;
}

/// fixed amount supplied by the caller
#[derive(Debug, Clone, Copy)]
pub struct ManualEstimate {
    pub monthly: Money,
}

impl MonthlyEstimate for ManualEstimate {
    fn mode(&self) -> ProjectionMode {
        ProjectionMode::Manual
    }

    fn estimate(&self, _buckets: &[MonthlyTotal]) -> Money {
        self.monthly
    }
}

/// total of the most recent bucket
#[derive(Debug, Clone, Copy)]
pub struct LastMonthEstimate;

impl MonthlyEstimate for LastMonthEstimate {
    fn mode(&self) -> ProjectionMode {
        ProjectionMode::LastMonth
    }

    fn estimate(&self, buckets: &[MonthlyTotal]) -> Money {
        buckets.last().map(|b| b.total).unwrap_or(Money::ZERO)
    }
}

/// mean of every bucket
#[derive(Debug, Clone, Copy)]
pub struct AllMonthsAverage;

impl MonthlyEstimate for AllMonthsAverage {
    fn mode(&self) -> ProjectionMode {
        ProjectionMode::AllMonthAverage
    }

    fn estimate(&self, buckets: &[MonthlyTotal]) -> Money {
        average_of(buckets)
    }
}

/// mean of the most recent buckets, up to `months`
#[derive(Debug, Clone, Copy)]
pub struct RecentMonthsAverage {
    pub months: usize,
}

impl Default for RecentMonthsAverage {
    fn default() -> Self {
        Self { months: RECENT_MONTHS }
    }
}

impl MonthlyEstimate for RecentMonthsAverage {
    fn mode(&self) -> ProjectionMode {
        ProjectionMode::LastSixMonthAverage
    }

    fn estimate(&self, buckets: &[MonthlyTotal]) -> Money {
        average_of_last(buckets, self.months)
    }
}

/// strategy for a mode; `manual` is only read by the manual strategy
pub fn strategy_for(mode: ProjectionMode, manual: Money) -> Box<dyn MonthlyEstimate> {
    match mode {
        ProjectionMode::Manual => Box::new(ManualEstimate { monthly: manual }),
        ProjectionMode::LastMonth => Box::new(LastMonthEstimate),
        ProjectionMode::AllMonthAverage => Box::new(AllMonthsAverage),
        ProjectionMode::LastSixMonthAverage => Box::new(RecentMonthsAverage::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn buckets(totals: &[i64]) -> Vec<MonthlyTotal> {
        totals
            .iter()
            .enumerate()
            .map(|(i, t)| MonthlyTotal {
                year: 2024,
                month: i as u32 + 1,
                total: Money::from_major(*t),
                date: NaiveDate::from_ymd_opt(2024, i as u32 + 1, 1).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_each_strategy() {
        let months = buckets(&[1_000, 1_000, 1_000, 2_000, 2_000, 2_000, 2_000, 3_000]);
        let manual = Money::from_major(777);

        let estimate = |mode| strategy_for(mode, manual).estimate(&months);

        assert_eq!(estimate(ProjectionMode::Manual), manual);
        assert_eq!(estimate(ProjectionMode::LastMonth), Money::from_major(3_000));
        // 14000 / 8
        assert_eq!(estimate(ProjectionMode::AllMonthAverage), Money::from_major(1_750));
        // 1000 + 2000 * 4 + 3000 = 12000 / 6
        assert_eq!(estimate(ProjectionMode::LastSixMonthAverage), Money::from_major(2_000));
    }

    #[test]
    fn test_no_buckets() {
        for mode in [
            ProjectionMode::LastMonth,
            ProjectionMode::AllMonthAverage,
            ProjectionMode::LastSixMonthAverage,
        ] {
            assert_eq!(strategy_for(mode, Money::from_major(5)).estimate(&[]), Money::ZERO);
        }
    }

    #[test]
    fn test_strategy_reports_its_mode() {
        for mode in ProjectionMode::ALL {
            assert_eq!(strategy_for(mode, Money::ZERO).mode(), mode);
        }
    }
}
