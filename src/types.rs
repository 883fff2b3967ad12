use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Money;

/// monthly payment estimation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectionMode {
    /// caller-supplied fixed monthly payment
    #[serde(rename = "manual")]
    Manual,
    /// total of the most recent monthly bucket
    #[serde(rename = "last_month")]
    LastMonth,
    /// mean of every monthly bucket
    #[serde(rename = "all_month_avg")]
    AllMonthAverage,
    /// mean of the most recent six monthly buckets
    #[default]
    #[serde(rename = "last_month_avg_6")]
    LastSixMonthAverage,
}

impl ProjectionMode {
    pub const ALL: [ProjectionMode; 4] = [
        ProjectionMode::Manual,
        ProjectionMode::LastMonth,
        ProjectionMode::AllMonthAverage,
        ProjectionMode::LastSixMonthAverage,
    ];

    /// key used in configuration and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ProjectionMode::Manual => "manual",
            ProjectionMode::LastMonth => "last_month",
            ProjectionMode::AllMonthAverage => "all_month_avg",
            ProjectionMode::LastSixMonthAverage => "last_month_avg_6",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProjectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProjectionMode::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<&str> = ProjectionMode::ALL.iter().map(|m| m.key()).collect();
                format!("unknown projection mode '{}', expected one of: {}", s, keys.join(", "))
            })
    }
}

/// overall loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// remaining balance still above zero
    InProgress,
    /// remaining balance at or below zero
    PaidOff,
}

/// short message describing how far off the payoff is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceNote {
    PaidOff,
    NotEnoughData,
    AlmostThere,
    OnTrack,
    LongRoad,
}

impl PaceNote {
    pub fn message(&self) -> &'static str {
        match self {
            PaceNote::PaidOff => "Listo. A celebrar con un tintico ☕🙂",
            PaceNote::NotEnoughData => {
                "No hay suficiente info para estimar. Si quieren, pongan una cuota mensual manual ✍️"
            }
            PaceNote::AlmostThere => "Ya falta poquito. Constancia y listo ✅",
            PaceNote::OnTrack => "Va bien. Mantener el ritmo ayuda mucho 💪",
            PaceNote::LongRoad => "Es un camino largo, pero va avanzando paso a paso 🧡",
        }
    }
}

/// parameters a consumer passes per query; never stored by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryParams {
    pub mode: ProjectionMode,
    pub manual_monthly: Money,
    pub search_text: Option<String>,
    pub year_filter: Option<i32>,
}

impl QueryParams {
    pub fn new(mode: ProjectionMode, manual_monthly: Money) -> Self {
        Self {
            mode,
            manual_monthly,
            search_text: None,
            year_filter: None,
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_filter = Some(year);
        self
    }
}
