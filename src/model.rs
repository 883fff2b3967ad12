use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::errors::{DashboardError, Result};
use crate::feed::{parse_feed, PaymentRecord};
use crate::ledger::{aggregate_monthly, build_ledger, build_summary, LedgerEntry, MonthlyTotal, Summary};
use crate::projection::{Kpis, ProjectionEngine, ProjectionResult};
use crate::query::distinct_years;
use crate::types::QueryParams;

/// everything derived from one feed load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub records: Vec<PaymentRecord>,
    pub ledger: Vec<LedgerEntry>,
    pub monthly: Vec<MonthlyTotal>,
    pub summary: Summary,
    /// years with dated payments, newest first
    pub years: Vec<i32>,
}

impl Model {
    /// build the model from parsed, ordered records
    pub fn from_records(records: Vec<PaymentRecord>, config: &DashboardConfig) -> Result<Self> {
        if records.is_empty() {
            return Err(DashboardError::EmptyFeed);
        }

        let ledger = build_ledger(&records, config.total_principal);
        let monthly = aggregate_monthly(&ledger);
        let summary = build_summary(&ledger, config.total_principal);
        let years = distinct_years(&records);

        Ok(Self {
            records,
            ledger,
            monthly,
            summary,
            years,
        })
    }

    pub fn projection(&self, params: &QueryParams) -> ProjectionResult {
        ProjectionEngine::project(&self.monthly, &self.summary, params.mode, params.manual_monthly)
    }

    pub fn kpis(&self, params: &QueryParams) -> Kpis {
        Kpis::compute(&self.monthly, &self.summary, params.manual_monthly)
    }
}

/// parse feed text and derive the full model; no state, no i/o
pub fn recompute(feed_text: &str, config: &DashboardConfig) -> Result<Model> {
    let records = parse_feed(feed_text, &config.columns)?;
    Model::from_records(records, config)
}
