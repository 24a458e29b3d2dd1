use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use shared_config::AppConfig;
use shared_database::{LatencyStrategy, StoreOperation};
use shared_models::{EntityKind, TimeOfDay};

use crate::clock::FixedClock;

/// The Monday used throughout the scheduling fixtures.
pub const FIXTURE_DAY: &str = "2024-06-10";

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("fixture dates are ISO formatted")
}

pub fn time(raw: &str) -> TimeOfDay {
    raw.parse().expect("fixture times are HH:MM")
}

pub fn fixture_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(date(FIXTURE_DAY)))
}

pub struct TestConfig {
    pub simulate_latency: bool,
    pub today: &'static str,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            simulate_latency: false,
            today: FIXTURE_DAY,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            simulate_latency: self.simulate_latency,
            latency_scale: 1.0,
            load_seed: true,
            pinned_today: Some(date(self.today)),
        }
    }
}

/// Latency hook that records every call instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingLatency {
    calls: Mutex<Vec<(EntityKind, StoreOperation)>>,
}

impl RecordingLatency {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(EntityKind, StoreOperation)> {
        self.calls.lock().expect("latency log poisoned").clone()
    }
}

#[async_trait]
impl LatencyStrategy for RecordingLatency {
    async fn pause(&self, entity: EntityKind, operation: StoreOperation) {
        self.calls
            .lock()
            .expect("latency log poisoned")
            .push((entity, operation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;

    #[test]
    fn recording_latency_keeps_call_order() {
        let latency = RecordingLatency::new();
        tokio_test::block_on(async {
            latency.pause(EntityKind::Doctor, StoreOperation::GetAll).await;
            latency.pause(EntityKind::Doctor, StoreOperation::Create).await;
        });
        assert_eq!(
            latency.calls(),
            vec![
                (EntityKind::Doctor, StoreOperation::GetAll),
                (EntityKind::Doctor, StoreOperation::Create),
            ]
        );
    }

    #[test]
    fn test_config_pins_the_fixture_day() {
        let config = TestConfig::default().to_app_config();
        assert_eq!(config.pinned_today, Some(date(FIXTURE_DAY)));
        assert_eq!(fixture_clock().today(), date(FIXTURE_DAY));
    }
}
