pub mod config;
pub mod dashboard;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod feed;
pub mod format;
pub mod ledger;
pub mod model;
pub mod progress;
pub mod projection;
pub mod query;
pub mod serialization;
pub mod state;
pub mod types;

// re-export key types
pub use config::{DashboardConfig, FeedColumns};
pub use dashboard::Dashboard;
pub use decimal::{Money, Rate};
pub use errors::{DashboardError, ErrorKind, Result};
pub use events::{Event, EventStore};
pub use feed::{FeedSource, FileFeed, HttpFeed, PaymentRecord, RawRow, StaticFeed};
pub use ledger::{LedgerEntry, MonthlyTotal, Summary};
pub use model::{recompute, Model};
pub use projection::{Kpis, ProjectionEngine, ProjectionOutcome, ProjectionResult};
pub use serialization::DashboardView;
pub use state::ModelSnapshot;
pub use types::{LoanStatus, PaceNote, ProjectionMode, QueryParams};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
