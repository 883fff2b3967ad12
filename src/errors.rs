use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("could not fetch feed from {location}: {reason}")]
    Fetch {
        location: String,
        reason: String,
    },

    #[error("could not fetch feed from {location}: status {status}")]
    FetchStatus {
        location: String,
        status: u16,
    },

    #[error("feed header is missing required columns: {}", missing.join(", "))]
    Schema {
        missing: Vec<String>,
    },

    #[error("feed has no data rows")]
    EmptyFeed,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// coarse error class, one per terminal load failure type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Fetch,
    Schema,
    EmptyFeed,
    Configuration,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Fetch { .. } | DashboardError::FetchStatus { .. } => ErrorKind::Fetch,
            // a local feed file that cannot be read is a failed fetch too
            DashboardError::Io(_) => ErrorKind::Fetch,
            DashboardError::Schema { .. } => ErrorKind::Schema,
            DashboardError::EmptyFeed => ErrorKind::EmptyFeed,
            DashboardError::InvalidConfiguration { .. } | DashboardError::Json(_) => {
                ErrorKind::Configuration
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
