use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::ledger::monthly::{average_of, average_of_last};
use crate::ledger::{MonthlyTotal, Summary};
use crate::projection::strategy::RECENT_MONTHS;
use crate::types::LoanStatus;

/// headline figures shown next to the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub months_with_payments: usize,
    pub average_monthly_all: Money,
    pub average_monthly_recent: Money,
    /// manual monthly payment, when one is set
    pub monthly_goal: Option<Money>,
    pub progress: Rate,
    pub status: LoanStatus,
}

impl Kpis {
    pub fn compute(buckets: &[MonthlyTotal], summary: &Summary, manual_monthly: Money) -> Self {
        Self {
            months_with_payments: buckets.len(),
            average_monthly_all: average_of(buckets),
            average_monthly_recent: average_of_last(buckets, RECENT_MONTHS),
            monthly_goal: manual_monthly.is_positive().then_some(manual_monthly),
            progress: summary.progress(),
            status: summary.status(),
        }
    }
}
