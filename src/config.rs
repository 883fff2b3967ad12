use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{DashboardError, Result};
use crate::types::{ProjectionMode, QueryParams};

/// published payment sheet of the live dashboard
pub const DEFAULT_FEED_LOCATION: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTinGnSTDemqZR_djKekyP3ZJ5GVR0ynW8jf_3UJtM2sMa4OWTfycfDY5tcvG6nlY8nSyR-AXQZBQQt/pub?gid=1370966065&single=true&output=tsv";

/// dashboard configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub feed_location: String,
    pub total_principal: Money,
    #[serde(default)]
    pub default_projection_mode: ProjectionMode,
    #[serde(default)]
    pub default_manual_monthly_payment: Money,
    #[serde(default)]
    pub columns: FeedColumns,
}

/// header names of the three required feed columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedColumns {
    pub date: String,
    pub month: String,
    pub amount: String,
}

impl Default for FeedColumns {
    fn default() -> Self {
        Self {
            date: "fecha".to_string(),
            month: "mes".to_string(),
            amount: "valor".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_location: DEFAULT_FEED_LOCATION.to_string(),
            total_principal: Money::from_major(42_119_181),
            default_projection_mode: ProjectionMode::LastSixMonthAverage,
            default_manual_monthly_payment: Money::from_major(900_000),
            columns: FeedColumns::default(),
        }
    }
}

impl DashboardConfig {
    /// create configuration for a feed and principal, other values default
    pub fn new(feed_location: impl Into<String>, total_principal: Money) -> Self {
        Self {
            feed_location: feed_location.into(),
            total_principal,
            ..Self::default()
        }
    }

    pub fn with_projection_mode(mut self, mode: ProjectionMode) -> Self {
        self.default_projection_mode = mode;
        self
    }

    pub fn with_manual_monthly_payment(mut self, amount: Money) -> Self {
        self.default_manual_monthly_payment = amount;
        self
    }

    pub fn with_columns(mut self, columns: FeedColumns) -> Self {
        self.columns = columns;
        self
    }

    /// parse and validate a json configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// read and validate a json configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed_location.trim().is_empty() {
            return Err(DashboardError::InvalidConfiguration {
                message: "feed location must not be empty".to_string(),
            });
        }

        if !self.total_principal.is_positive() {
            return Err(DashboardError::InvalidConfiguration {
                message: format!("total principal must be positive, got {}", self.total_principal),
            });
        }

        if self.default_manual_monthly_payment.is_negative() {
            return Err(DashboardError::InvalidConfiguration {
                message: format!(
                    "manual monthly payment must not be negative, got {}",
                    self.default_manual_monthly_payment
                ),
            });
        }

        let columns = [&self.columns.date, &self.columns.month, &self.columns.amount];
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(DashboardError::InvalidConfiguration {
                message: "feed column names must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// query parameters seeded from the configured defaults
    pub fn default_query(&self) -> QueryParams {
        QueryParams::new(self.default_projection_mode, self.default_manual_monthly_payment)
    }
}
