pub mod entity;
pub mod error;
pub mod nullable;
pub mod time;

pub use entity::{EntityKind, RecordId};
pub use error::StoreError;
pub use time::{TimeOfDay, TimeOfDayError};
