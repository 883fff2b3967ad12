use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::{info, warn};

use crate::config::DashboardConfig;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::feed::{self, FeedSource};
use crate::model::{recompute, Model};
use crate::projection::ProjectionResult;
use crate::serialization::DashboardView;
use crate::state::ModelSnapshot;
use crate::types::QueryParams;

/// holds configuration, the feed source and the latest successful snapshot
pub struct Dashboard {
    config: DashboardConfig,
    source: Box<dyn FeedSource>,
    snapshot: Option<ModelSnapshot>,
    pub events: EventStore,
    time: SafeTimeProvider,
}

impl Dashboard {
    /// create a dashboard reading from an explicit source
    pub fn new(config: DashboardConfig, source: Box<dyn FeedSource>, time: SafeTimeProvider) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            source,
            snapshot: None,
            events: EventStore::new(),
            time,
        })
    }

    /// create a dashboard for the configured feed location, on the system clock
    pub fn from_config(config: DashboardConfig) -> Result<Self> {
        let source = feed::source_for(&config.feed_location);
        Self::new(config, source, SafeTimeProvider::new(TimeSource::System))
    }

    /// fetch and recompute; on success the snapshot is replaced wholesale,
    /// on failure the previous snapshot stays as it was
    pub fn reload(&mut self) -> Result<&ModelSnapshot> {
        let started = self.time.now();
        self.events.emit(Event::LoadStarted {
            location: self.source.location().to_string(),
            timestamp: started,
        });

        match self.load() {
            Ok(model) => {
                let snapshot = ModelSnapshot::capture(model, self.time.now());
                info!(
                    "loaded {} records in {} months from {}",
                    snapshot.record_count(),
                    snapshot.month_count(),
                    self.source.location()
                );
                self.events.emit(Event::LoadSucceeded {
                    snapshot_id: snapshot.snapshot_id,
                    records: snapshot.record_count(),
                    months: snapshot.month_count(),
                    timestamp: snapshot.loaded_at,
                });
                let snapshot = self.snapshot.insert(snapshot);
                Ok(&*snapshot)
            }
            Err(e) => {
                warn!("load from {} failed: {}", self.source.location(), e);
                self.events.emit(Event::LoadFailed {
                    kind: e.kind(),
                    reason: e.to_string(),
                    timestamp: self.time.now(),
                });
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<Model> {
        let text = self.source.fetch()?;
        recompute(&text, &self.config)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Option<&ModelSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn model(&self) -> Option<&Model> {
        self.snapshot.as_ref().map(|s| &s.model)
    }

    /// status of the latest load attempt
    pub fn status_message(&self) -> String {
        self.events
            .last()
            .map(|e| e.status_message())
            .unwrap_or_else(|| "Sin cargar".to_string())
    }

    /// query parameters seeded from configuration
    pub fn default_query(&self) -> QueryParams {
        self.config.default_query()
    }

    pub fn projection(&self, params: &QueryParams) -> Option<ProjectionResult> {
        self.model().map(|m| m.projection(params))
    }

    pub fn view(&self, params: &QueryParams) -> Option<DashboardView> {
        self.snapshot().map(|s| DashboardView::from_snapshot(s, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::errors::{DashboardError, ErrorKind};
    use crate::feed::StaticFeed;
    use crate::projection::ProjectionOutcome;
    use crate::types::ProjectionMode;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    const FEED: &str = "Fecha\tMes\tValor\n01/01/2024\tEnero\t$500.000\n01/02/2024\tFebrero\t$500.000\n";

    /// feed whose text can be swapped between reloads
    struct SwappableFeed {
        text: Arc<Mutex<Option<String>>>,
    }

    impl FeedSource for SwappableFeed {
        fn fetch(&self) -> Result<String> {
            let text = self.text.lock().map_err(|_| DashboardError::Fetch {
                location: "swap".to_string(),
                reason: "poisoned".to_string(),
            })?;
            text.clone().ok_or(DashboardError::FetchStatus {
                location: "swap".to_string(),
                status: 503,
            })
        }

        fn location(&self) -> &str {
            "swap"
        }
    }

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn config() -> DashboardConfig {
        DashboardConfig::new("memory", Money::from_major(3_000_000))
            .with_projection_mode(ProjectionMode::AllMonthAverage)
    }

    #[test]
    fn test_reload_publishes_snapshot() {
        let mut dashboard =
            Dashboard::new(config(), Box::new(StaticFeed::new(FEED)), test_time()).unwrap();
        assert!(dashboard.snapshot().is_none());
        assert_eq!(dashboard.status_message(), "Sin cargar");

        let snapshot = dashboard.reload().unwrap();
        assert_eq!(snapshot.record_count(), 2);
        assert_eq!(snapshot.loaded_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

        assert_eq!(dashboard.status_message(), "✅ Listo. Registros: 2. Meses con pago: 2.");

        let projection = dashboard.projection(&dashboard.default_query()).unwrap();
        assert_eq!(projection.months_remaining, Some(4));
        assert_eq!(projection.outcome, ProjectionOutcome::Estimated);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let text = Arc::new(Mutex::new(Some(FEED.to_string())));
        let source = SwappableFeed { text: Arc::clone(&text) };
        let mut dashboard = Dashboard::new(config(), Box::new(source), test_time()).unwrap();

        let first_id = dashboard.reload().unwrap().snapshot_id;

        // fetch failure
        *text.lock().unwrap() = None;
        let err = dashboard.reload().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(dashboard.snapshot().unwrap().snapshot_id, first_id);
        assert!(dashboard.status_message().contains("503"));

        // schema failure
        *text.lock().unwrap() = Some("Fecha\tValor\n01/01/2024\t$1\n".to_string());
        assert!(matches!(dashboard.reload(), Err(DashboardError::Schema { .. })));
        assert_eq!(dashboard.snapshot().unwrap().snapshot_id, first_id);
        assert_eq!(dashboard.model().unwrap().summary.total_paid, Money::from_major(1_000_000));

        // empty feed
        *text.lock().unwrap() = Some("Fecha\tMes\tValor\n".to_string());
        let err = dashboard.reload().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyFeed);
        assert_eq!(dashboard.snapshot().unwrap().snapshot_id, first_id);
    }

    #[test]
    fn test_successful_reload_replaces_snapshot() {
        let text = Arc::new(Mutex::new(Some(FEED.to_string())));
        let source = SwappableFeed { text: Arc::clone(&text) };
        let mut dashboard = Dashboard::new(config(), Box::new(source), test_time()).unwrap();

        let first_id = dashboard.reload().unwrap().snapshot_id;

        *text.lock().unwrap() = Some("Fecha\tMes\tValor\n01/03/2024\tMarzo\t$100\n".to_string());
        let second = dashboard.reload().unwrap();
        assert_ne!(second.snapshot_id, first_id);
        assert_eq!(second.record_count(), 1);

        // nothing from the first load survives
        let model = dashboard.model().unwrap();
        assert_eq!(model.summary.total_paid, Money::from_major(100));
        assert_eq!(model.monthly.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DashboardConfig::new("memory", Money::ZERO);
        let result = Dashboard::new(config, Box::new(StaticFeed::new(FEED)), test_time());
        assert!(result.is_err());
    }

    #[test]
    fn test_events_record_each_attempt() {
        let mut dashboard =
            Dashboard::new(config(), Box::new(StaticFeed::new("")), test_time()).unwrap();
        assert!(dashboard.reload().is_err());

        let events = dashboard.events.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::LoadStarted { .. }));
        assert!(matches!(events[1], Event::LoadFailed { kind: ErrorKind::EmptyFeed, .. }));

        // repeated reloads keep only the latest attempt
        for _ in 0..3 {
            assert!(dashboard.reload().is_err());
        }
        assert_eq!(dashboard.events.events().len(), 2);
    }
}
