use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::ledger::LedgerEntry;

/// total paid within one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    /// first day of the month
    pub date: NaiveDate,
}

impl MonthlyTotal {
    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// bucket dated entries by (year, month), ascending; undated entries are left out
pub fn aggregate_monthly(entries: &[LedgerEntry]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<(i32, u32), Money> = BTreeMap::new();

    for entry in entries {
        let Some(date) = entry.date() else {
            continue;
        };
        *buckets.entry((date.year(), date.month())).or_insert(Money::ZERO) += entry.amount();
    }

    buckets
        .into_iter()
        .filter_map(|((year, month), total)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|date| MonthlyTotal {
                year,
                month,
                total,
                date,
            })
        })
        .collect()
}

/// mean of all bucket totals, whole units
pub fn average_of(buckets: &[MonthlyTotal]) -> Money {
    Money::mean(buckets.iter().map(|b| b.total))
}

/// mean of the most recent `n` bucket totals (fewer if not available)
pub fn average_of_last(buckets: &[MonthlyTotal], n: usize) -> Money {
    let start = buckets.len().saturating_sub(n);
    average_of(&buckets[start..])
}
