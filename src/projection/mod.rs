pub mod kpi;
pub mod strategy;

use chrono::{Datelike, Months, NaiveDate};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::ledger::{MonthlyTotal, Summary};
use crate::types::{PaceNote, ProjectionMode};

pub use kpi::Kpis;
pub use strategy::{strategy_for, MonthlyEstimate};

/// how a projection came out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionOutcome {
    /// balance already at or below zero
    PaidOff,
    /// no usable estimate or no dated payment to anchor on
    Indeterminate,
    /// months remaining and payoff date computed
    Estimated,
}

/// payoff projection under one estimation strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub mode: ProjectionMode,
    pub monthly_estimate: Money,
    pub months_remaining: Option<u32>,
    /// first day of the projected payoff month
    pub payoff_date: Option<NaiveDate>,
    pub outcome: ProjectionOutcome,
}

impl ProjectionResult {
    fn paid_off(mode: ProjectionMode, monthly_estimate: Money) -> Self {
        Self {
            mode,
            monthly_estimate,
            months_remaining: Some(0),
            payoff_date: None,
            outcome: ProjectionOutcome::PaidOff,
        }
    }

    fn indeterminate(mode: ProjectionMode, monthly_estimate: Money) -> Self {
        Self {
            mode,
            monthly_estimate,
            months_remaining: None,
            payoff_date: None,
            outcome: ProjectionOutcome::Indeterminate,
        }
    }

    pub fn pace_note(&self) -> PaceNote {
        match (self.outcome, self.months_remaining) {
            (ProjectionOutcome::PaidOff, _) => PaceNote::PaidOff,
            (ProjectionOutcome::Estimated, Some(months)) if months <= 6 => PaceNote::AlmostThere,
            (ProjectionOutcome::Estimated, Some(months)) if months <= 18 => PaceNote::OnTrack,
            (ProjectionOutcome::Estimated, Some(_)) => PaceNote::LongRoad,
            _ => PaceNote::NotEnoughData,
        }
    }
}

/// payoff projection over monthly buckets and a summary
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// project with the strategy for `mode`
    pub fn project(
        buckets: &[MonthlyTotal],
        summary: &Summary,
        mode: ProjectionMode,
        manual_monthly: Money,
    ) -> ProjectionResult {
        let strategy = strategy_for(mode, manual_monthly);
        Self::project_with(buckets, summary, strategy.as_ref())
    }

    /// project with an explicit strategy
    pub fn project_with(
        buckets: &[MonthlyTotal],
        summary: &Summary,
        strategy: &dyn MonthlyEstimate,
    ) -> ProjectionResult {
        let mode = strategy.mode();
        let monthly = strategy.estimate(buckets);
        let balance = summary.remaining_balance;

        if !balance.is_positive() {
            return ProjectionResult::paid_off(mode, monthly);
        }

        let last_payment_date = summary.last_payment.as_ref().and_then(|e| e.date());
        let Some(last_payment_date) = last_payment_date else {
            return ProjectionResult::indeterminate(mode, monthly);
        };
        if !monthly.is_positive() {
            return ProjectionResult::indeterminate(mode, monthly);
        }

        let Some(months) = months_to_payoff(balance, monthly) else {
            debug!("months to payoff out of range for balance {} at {}/month", balance, monthly);
            return ProjectionResult::indeterminate(mode, monthly);
        };

        let anchor = buckets
            .last()
            .map(|b| b.date.max(last_payment_date))
            .unwrap_or(last_payment_date);

        let Some(payoff_date) = advance_months(anchor, months) else {
            return ProjectionResult::indeterminate(mode, monthly);
        };

        ProjectionResult {
            mode,
            monthly_estimate: monthly,
            months_remaining: Some(months),
            payoff_date: Some(payoff_date),
            outcome: ProjectionOutcome::Estimated,
        }
    }
}

/// ceil(balance / monthly); partial months count as a full month
pub fn months_to_payoff(balance: Money, monthly: Money) -> Option<u32> {
    if !monthly.is_positive() {
        return None;
    }
    (balance.as_decimal() / monthly.as_decimal())
        .ceil()
        .to_u32()
}

/// first day of the month `months` after the month of `date`
pub fn advance_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.checked_add_months(Months::new(months))
}
