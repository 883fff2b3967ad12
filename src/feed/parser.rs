use std::cmp::Ordering;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::FeedColumns;
use crate::decimal::Money;
use crate::errors::{DashboardError, Result};

/// verbatim field text of one feed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub date_text: String,
    pub month_text: String,
    pub amount_text: String,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.date_text.is_empty() && self.month_text.is_empty() && self.amount_text.is_empty()
    }
}

/// one parsed payment; `date` is absent when the date text is not a valid date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: Option<NaiveDate>,
    pub month_label: String,
    pub amount: Money,
    pub raw: RawRow,
}

impl PaymentRecord {
    pub fn from_raw(raw: RawRow) -> Self {
        let date = parse_date(&raw.date_text);
        let amount = parse_amount(&raw.amount_text);

        if date.is_none() && !raw.date_text.is_empty() {
            warn!("unparseable payment date '{}', row kept without date", raw.date_text);
        }

        Self {
            date,
            month_label: raw.month_text.clone(),
            amount,
            raw,
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

/// column positions of the required fields in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    date: usize,
    month: usize,
    amount: usize,
}

impl ColumnIndex {
    fn from_header(header: &str, columns: &FeedColumns) -> Result<Self> {
        let names: Vec<String> = header
            .split('\t')
            .map(|h| h.trim().to_lowercase())
            .collect();

        let find = |wanted: &str| {
            let wanted = wanted.trim().to_lowercase();
            names.iter().position(|name| *name == wanted)
        };

        match (find(&columns.date), find(&columns.month), find(&columns.amount)) {
            (Some(date), Some(month), Some(amount)) => Ok(Self { date, month, amount }),
            (date, month, amount) => {
                let missing = [
                    (date, &columns.date),
                    (month, &columns.month),
                    (amount, &columns.amount),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name.clone())
                .collect();
                Err(DashboardError::Schema { missing })
            }
        }
    }

    fn extract(&self, line: &str) -> RawRow {
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or("").to_string();

        RawRow {
            date_text: field(self.date),
            month_text: field(self.month),
            amount_text: field(self.amount),
        }
    }
}

/// parse tab separated feed text into records ordered by date
///
/// Blank lines and rows whose three fields are all empty are skipped. A feed
/// with no non-empty line at all is reported as empty; a header without the
/// required columns is a schema error. The caller decides whether zero data
/// rows is an error.
pub fn parse_feed(text: &str, columns: &FeedColumns) -> Result<Vec<PaymentRecord>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(DashboardError::EmptyFeed)?;
    let index = ColumnIndex::from_header(header, columns)?;

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let raw = index.extract(line);
        if raw.is_blank() {
            debug!("skipping blank feed row {}", line_no + 2);
            continue;
        }
        records.push(PaymentRecord::from_raw(raw));
    }

    sort_records(&mut records);
    Ok(records)
}

/// order records by date; dated rows first, undated rows by raw date text
///
/// Undated rows fall back to comparing the raw text, which is deterministic but
/// not necessarily chronological. That degraded order is kept as is.
pub fn sort_records(records: &mut [PaymentRecord]) {
    records.sort_by(compare_records);
}

fn compare_records(a: &PaymentRecord, b: &PaymentRecord) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.raw.date_text.cmp(&b.raw.date_text),
    }
}

/// parse `D/M/YY` or `D/M/YYYY`; two digit years are 20YY
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(day) || !all_digits(month) || !all_digits(year) {
        return None;
    }
    if day.len() > 2 || month.len() > 2 || !(year.len() == 2 || year.len() == 4) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// longest amount accepted, in significant digits; keeps ledger sums far from overflow
pub const MAX_AMOUNT_DIGITS: usize = 15;

/// parse a peso amount such as `$1.274.000`; anything non-numeric or longer
/// than `MAX_AMOUNT_DIGITS` is zero
pub fn parse_amount(text: &str) -> Money {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '.' | ','))
        .collect();

    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        if !cleaned.is_empty() {
            warn!("unparseable payment amount '{}', using 0", text);
        }
        return Money::ZERO;
    }

    let significant = cleaned.trim_start_matches('0');
    if significant.len() > MAX_AMOUNT_DIGITS {
        warn!("payment amount '{}' too large, using 0", text);
        return Money::ZERO;
    }

    match cleaned.parse::<Money>() {
        Ok(amount) => amount,
        Err(e) => {
            warn!("payment amount '{}' out of range ({}), using 0", text, e);
            Money::ZERO
        }
    }
}
