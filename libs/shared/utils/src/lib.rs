pub mod clock;
pub mod test_utils;

pub use clock::{clock_from_config, Clock, FixedClock, SystemClock};
