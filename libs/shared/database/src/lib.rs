pub mod latency;
pub mod memory;
pub mod seed;

pub use latency::{latency_from_config, LatencyStrategy, NoLatency, SimulatedLatency, StoreOperation};
pub use memory::{InMemoryTable, Record};
pub use seed::SeedError;
