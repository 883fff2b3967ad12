pub mod monthly;
pub mod summary;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::feed::PaymentRecord;

pub use monthly::{aggregate_monthly, MonthlyTotal};
pub use summary::{build_summary, Summary};

/// payment record with running totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub record: PaymentRecord,
    pub cumulative_paid: Money,
    pub remaining_balance: Money,
}

impl LedgerEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        self.record.date
    }

    pub fn amount(&self) -> Money {
        self.record.amount
    }
}

/// carry a running sum over records that are already in final order
pub fn build_ledger(records: &[PaymentRecord], total_principal: Money) -> Vec<LedgerEntry> {
    let mut cumulative = Money::ZERO;

    records
        .iter()
        .map(|record| {
            cumulative += record.amount;
            LedgerEntry {
                record: record.clone(),
                cumulative_paid: cumulative,
                remaining_balance: total_principal - cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::decimal::Money;
    use crate::feed::{PaymentRecord, RawRow};

    /// record built directly, bypassing the text parser
    pub fn record(date: Option<(i32, u32, u32)>, amount: i64) -> PaymentRecord {
        let date = date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        let date_text = date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "sin fecha".to_string());

        PaymentRecord {
            date,
            month_label: String::new(),
            amount: Money::from_major(amount),
            raw: RawRow {
                date_text,
                month_text: String::new(),
                amount_text: amount.to_string(),
            },
        }
    }
}
