pub mod appointment;
pub mod booking;
pub mod calendar;
pub mod lifecycle;
pub mod query;

pub use appointment::AppointmentService;
pub use booking::AppointmentBookingService;
pub use calendar::CalendarService;
pub use lifecycle::AppointmentLifecycleService;
pub use query::AppointmentQueryService;
