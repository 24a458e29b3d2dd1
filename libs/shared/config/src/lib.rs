use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Largest accepted `CLINIC_LATENCY_SCALE`.
pub const MAX_LATENCY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub simulate_latency: bool,
    pub latency_scale: f64,
    pub load_seed: bool,
    pub pinned_today: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulate_latency: false,
            latency_scale: 1.0,
            load_seed: true,
            pinned_today: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            simulate_latency: read_var("CLINIC_SIMULATE_LATENCY", parse_bool)
                .unwrap_or(defaults.simulate_latency),
            latency_scale: read_var("CLINIC_LATENCY_SCALE", parse_latency_scale)
                .unwrap_or(defaults.latency_scale),
            load_seed: read_var("CLINIC_LOAD_SEED", parse_bool).unwrap_or(defaults.load_seed),
            pinned_today: read_var("CLINIC_TODAY", |raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
            }),
        };

        if config.simulate_latency && config.latency_scale == 0.0 {
            warn!("CLINIC_SIMULATE_LATENCY is on but CLINIC_LATENCY_SCALE is 0, delays are disabled");
        }

        config
    }

    pub fn is_latency_enabled(&self) -> bool {
        self.simulate_latency && self.latency_scale > 0.0
    }
}

/// Reads `name` and parses it. Unset variables are silent, unparsable ones warn
/// and fall back to the caller's default.
fn read_var<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("{} has unusable value '{}', using default", name, raw);
    }
    parsed
}

fn parse_latency_scale(raw: &str) -> Option<f64> {
    f64::from_str(raw)
        .ok()
        .filter(|scale| (0.0..=MAX_LATENCY_SCALE).contains(scale))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
