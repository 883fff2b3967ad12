use std::collections::BTreeSet;

use chrono::Datelike;

use crate::feed::PaymentRecord;
use crate::format;
use crate::ledger::LedgerEntry;
use crate::model::Model;
use crate::types::QueryParams;

/// years that have at least one dated record, newest first
pub fn distinct_years(records: &[PaymentRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().filter_map(|r| r.date.map(|d| d.year())).collect();
    years.into_iter().rev().collect()
}

/// ledger entries matching the year filter and free text search
pub fn filter_ledger<'a>(model: &'a Model, params: &QueryParams) -> Vec<&'a LedgerEntry> {
    let needle = params
        .search_text
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    model
        .ledger
        .iter()
        .filter(|entry| matches_year(entry, params.year_filter))
        .filter(|entry| needle.is_empty() || matches_text(entry, &needle))
        .collect()
}

fn matches_year(entry: &LedgerEntry, year: Option<i32>) -> bool {
    match (year, entry.date()) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(year), Some(date)) => date.year() == year,
    }
}

fn matches_text(entry: &LedgerEntry, needle: &str) -> bool {
    let haystacks = [
        format::record_date(&entry.record),
        entry.record.month_label.clone(),
        format::money(entry.amount()),
        format::money(entry.cumulative_paid),
    ];
    haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}
