pub mod models;
pub mod services;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;

pub use services::availability::{compute_available_slots, SlotBooking, SlotState, SlotTemplate};
