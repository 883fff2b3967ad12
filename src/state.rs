use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Model;

/// one successful load, held and replaced as a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub snapshot_id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub model: Model,
}

impl ModelSnapshot {
    pub fn capture(model: Model, loaded_at: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            loaded_at,
            model,
        }
    }

    pub fn record_count(&self) -> usize {
        self.model.records.len()
    }

    pub fn month_count(&self) -> usize {
        self.model.monthly.len()
    }
}
