use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::ledger::LedgerEntry;
use crate::types::LoanStatus;

/// whole-of-loan totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_principal: Money,
    pub total_paid: Money,
    /// principal minus paid, may be negative when overpaid
    pub remaining_balance: Money,
    pub last_payment: Option<LedgerEntry>,
}

impl Summary {
    pub fn status(&self) -> LoanStatus {
        if self.remaining_balance.is_positive() {
            LoanStatus::InProgress
        } else {
            LoanStatus::PaidOff
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.status() == LoanStatus::PaidOff
    }

    /// share of the principal already paid, in [0, 1]
    pub fn progress(&self) -> Rate {
        self.total_paid.share_of(self.total_principal)
    }

    pub fn display_remaining(&self) -> Money {
        self.remaining_balance.clamp_non_negative()
    }
}

/// totals over the whole ledger; last payment is the latest dated, positive entry
pub fn build_summary(entries: &[LedgerEntry], total_principal: Money) -> Summary {
    let total_paid: Money = entries.iter().map(|e| e.amount()).sum();

    let last_payment = entries
        .iter()
        .rev()
        .find(|e| e.date().is_some() && e.amount().is_positive())
        .cloned();

    Summary {
        total_principal,
        total_paid,
        remaining_balance: total_principal - total_paid,
        last_payment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::build_ledger;
    use crate::ledger::test_support::record;
    use chrono::NaiveDate;

    #[test]
    fn test_totals() {
        let principal = Money::from_major(3_000_000);
        let records = vec![
            record(Some((2024, 1, 1)), 500_000),
            record(None, 250_000),
            record(Some((2024, 2, 1)), 500_000),
        ];
        let summary = build_summary(&build_ledger(&records, principal), principal);

        assert_eq!(summary.total_paid, Money::from_major(1_250_000));
        assert_eq!(summary.remaining_balance, Money::from_major(1_750_000));
        assert_eq!(summary.status(), LoanStatus::InProgress);
    }

    #[test]
    fn test_last_payment_skips_undated_and_zero_rows() {
        let principal = Money::from_major(3_000_000);
        let records = vec![
            record(Some((2024, 1, 1)), 500_000),
            record(Some((2024, 2, 1)), 400_000),
            record(Some((2024, 3, 1)), 0),
            record(None, 100_000),
        ];
        let summary = build_summary(&build_ledger(&records, principal), principal);

        let last = summary.last_payment.unwrap();
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(last.amount(), Money::from_major(400_000));
    }

    #[test]
    fn test_no_last_payment() {
        let principal = Money::from_major(1_000);
        let records = vec![record(None, 100), record(Some((2024, 1, 1)), 0)];
        let summary = build_summary(&build_ledger(&records, principal), principal);
        assert!(summary.last_payment.is_none());
    }

    #[test]
    fn test_overpaid_balance_is_negative_but_displayed_as_zero() {
        let principal = Money::from_major(1_000);
        let records = vec![record(Some((2024, 1, 1)), 1_200)];
        let summary = build_summary(&build_ledger(&records, principal), principal);

        assert_eq!(summary.remaining_balance, Money::from_major(-200));
        assert_eq!(summary.display_remaining(), Money::ZERO);
        assert!(summary.is_paid_off());
        assert_eq!(summary.progress(), Rate::ONE);
    }
}
