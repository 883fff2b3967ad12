//! serializable view of a snapshot under one set of query parameters
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::ledger::{MonthlyTotal, Summary};
use crate::projection::{Kpis, ProjectionResult};
use crate::query::filter_ledger;
use crate::state::ModelSnapshot;
use crate::types::{PaceNote, QueryParams};

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardView {
    pub snapshot_id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub summary: SummaryView,
    pub kpis: Kpis,
    pub projection: ProjectionResult,
    pub pace_note: PaceNote,
    pub monthly: Vec<MonthlyTotal>,
    pub years: Vec<i32>,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryView {
    pub total_principal: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
    pub last_payment_date: Option<NaiveDate>,
    pub last_payment_amount: Option<Money>,
}

/// one ledger row, flattened
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryView {
    pub date: Option<NaiveDate>,
    pub date_text: String,
    pub month_label: String,
    pub amount: Money,
    pub cumulative_paid: Money,
    pub remaining_balance: Money,
}

impl SummaryView {
    pub fn from_summary(summary: &Summary) -> Self {
        SummaryView {
            total_principal: summary.total_principal,
            total_paid: summary.total_paid,
            remaining_balance: summary.remaining_balance,
            last_payment_date: summary.last_payment.as_ref().and_then(|e| e.date()),
            last_payment_amount: summary.last_payment.as_ref().map(|e| e.amount()),
        }
    }
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &ModelSnapshot, params: &QueryParams) -> Self {
        let model = &snapshot.model;
        let projection = model.projection(params);

        DashboardView {
            snapshot_id: snapshot.snapshot_id,
            loaded_at: snapshot.loaded_at,
            summary: SummaryView::from_summary(&model.summary),
            kpis: model.kpis(params),
            pace_note: projection.pace_note(),
            projection,
            monthly: model.monthly.clone(),
            years: model.years.clone(),
            entries: filter_ledger(model, params)
                .into_iter()
                .map(|e| EntryView {
                    date: e.date(),
                    date_text: e.record.raw.date_text.clone(),
                    month_label: e.record.month_label.clone(),
                    amount: e.amount(),
                    cumulative_paid: e.cumulative_paid,
                    remaining_balance: e.remaining_balance,
                })
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
