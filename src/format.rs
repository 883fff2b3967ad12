//! display helpers for consumers of the model; the core never formats its own data

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::RoundingStrategy;

use crate::config::FeedColumns;
use crate::decimal::{Money, Rate};
use crate::feed::PaymentRecord;
use crate::types::ProjectionMode;

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// `$ 1.274.000`; negative amounts show as zero
pub fn money(amount: Money) -> String {
    let whole = amount.clamp_non_negative().round_whole();
    format!("$ {}", group_thousands(&whole.as_decimal().normalize().to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `DD/MM/YYYY`
pub fn date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// formatted date, or the raw feed text when the date did not parse
pub fn record_date(record: &PaymentRecord) -> String {
    record.date.map(date).unwrap_or_else(|| record.raw.date_text.clone())
}

/// `Abril 2026`
pub fn month_year(d: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[d.month0() as usize], d.year())
}

/// `DD/MM/YYYY HH:MM`
pub fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%d/%m/%Y %H:%M").to_string()
}

/// one decimal below 10%, whole percent otherwise
pub fn percent(rate: Rate) -> String {
    let pct = rate.as_percentage();
    if pct < rust_decimal::Decimal::TEN {
        format!("{:.1}", pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    } else {
        format!("{:.0}", pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

pub fn mode_label(mode: ProjectionMode) -> &'static str {
    match mode {
        ProjectionMode::Manual => "✍️ Manual",
        ProjectionMode::LastMonth => "🧾 Último mes",
        ProjectionMode::AllMonthAverage => "📊 Promedio total",
        ProjectionMode::LastSixMonthAverage => "📌 Promedio 6 meses",
    }
}

/// render records back into feed text the parser accepts
pub fn feed_text(records: &[PaymentRecord], columns: &FeedColumns) -> String {
    let clean = |s: &str| s.replace(['\t', '\r', '\n'], " ");

    let mut out = format!("{}\t{}\t{}\n", columns.date, columns.month, columns.amount);
    for record in records {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            clean(&record_date(record)),
            clean(&record.month_label),
            money(record.amount)
        ));
    }
    out
}
