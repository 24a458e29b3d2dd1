use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::info;

use shared_config::AppConfig;

/// Source of "today" for date-scoped queries and booking defaults.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar day of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn clock_from_config(config: &AppConfig) -> Arc<dyn Clock> {
    match config.pinned_today {
        Some(day) => {
            info!("Pinning today to {}", day);
            Arc::new(FixedClock(day))
        }
        None => Arc::new(SystemClock),
    }
}
