use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use shared_config::{AppConfig, MAX_LATENCY_SCALE};
use shared_models::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::GetAll => write!(f, "get_all"),
            StoreOperation::GetById => write!(f, "get_by_id"),
            StoreOperation::Create => write!(f, "create"),
            StoreOperation::Update => write!(f, "update"),
            StoreOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Hook awaited at the start of every store operation, standing in for the
/// round trip a real backend would cost.
#[async_trait]
pub trait LatencyStrategy: Send + Sync {
    async fn pause(&self, entity: EntityKind, operation: StoreOperation);
}

/// Returns immediately. The default for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl LatencyStrategy for NoLatency {
    async fn pause(&self, _entity: EntityKind, _operation: StoreOperation) {}
}

/// Sleeps for a fixed per-operation delay, scaled by a multiplier in
/// `0.0..=MAX_LATENCY_SCALE`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    scale: f64,
}

impl SimulatedLatency {
    pub fn new(scale: f64) -> Self {
        let clamped = if scale.is_nan() {
            0.0
        } else {
            scale.clamp(0.0, MAX_LATENCY_SCALE)
        };
        if clamped != scale {
            warn!("Latency scale {} out of range, using {}", scale, clamped);
        }
        Self { scale: clamped }
    }

    /// Unscaled delay for one operation on one entity kind.
    pub fn base_delay(entity: EntityKind, operation: StoreOperation) -> Duration {
        let millis = match (entity, operation) {
            (EntityKind::Appointment, StoreOperation::GetAll) => 300,
            (EntityKind::Appointment, StoreOperation::Create) => 400,
            (EntityKind::Appointment, StoreOperation::Update) => 350,
            (_, StoreOperation::GetAll) => 250,
            (_, StoreOperation::Create) => 300,
            (_, StoreOperation::Update) => 300,
            (_, StoreOperation::GetById) => 200,
            (_, StoreOperation::Delete) => 250,
        };
        Duration::from_millis(millis)
    }

    pub fn delay_for(&self, entity: EntityKind, operation: StoreOperation) -> Duration {
        Self::base_delay(entity, operation).mul_f64(self.scale)
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[async_trait]
impl LatencyStrategy for SimulatedLatency {
    async fn pause(&self, entity: EntityKind, operation: StoreOperation) {
        let delay = self.delay_for(entity, operation);
        debug!("Simulating {:?} latency for {} {}", delay, entity, operation);
        tokio::time::sleep(delay).await;
    }
}

pub fn latency_from_config(config: &AppConfig) -> Arc<dyn LatencyStrategy> {
    if config.is_latency_enabled() {
        Arc::new(SimulatedLatency::new(config.latency_scale))
    } else {
        Arc::new(NoLatency)
    }
}
