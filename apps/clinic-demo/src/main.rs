use anyhow::Context;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::services::query::AppointmentSearchQuery;
use appointment_cell::{
    AppointmentBookingService, AppointmentQueryService, AppointmentService, AppointmentType,
    BookAppointmentRequest, CalendarService,
};
use doctor_cell::DoctorService;
use patient_cell::PatientService;
use shared_config::AppConfig;
use shared_database::latency_from_config;
use shared_utils::clock_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic scheduling demo");

    // Load configuration
    let config = AppConfig::from_env();
    let latency = latency_from_config(&config);
    let clock = clock_from_config(&config);

    let (patients, doctors, appointments) = if config.load_seed {
        (
            PatientService::seeded(latency.clone()).context("failed to load patient seed")?,
            DoctorService::seeded(latency.clone()).context("failed to load doctor seed")?,
            AppointmentService::seeded(latency.clone())
                .context("failed to load appointment seed")?,
        )
    } else {
        info!("Seed loading disabled, starting with empty stores");
        (
            PatientService::new(latency.clone()),
            DoctorService::new(latency.clone()),
            AppointmentService::new(latency),
        )
    };

    let mut booking = AppointmentBookingService::new(appointments, clock.clone());
    let query = AppointmentQueryService::new(clock.clone());
    let calendar = CalendarService::new(clock);
    let today = booking.today();

    let patient_rows = patients.list_patients().await;
    let doctor_rows = doctors.list_doctors().await;
    let appointment_rows = booking.store().list_appointments().await;

    info!("Schedule for {}", today);
    let listings = query.search_appointments(
        &AppointmentSearchQuery::default(),
        &appointment_rows,
        &patient_rows,
        &doctor_rows,
    );
    if listings.is_empty() {
        info!("  no appointments");
    }
    for listing in &listings {
        let appointment = &listing.appointment;
        info!(
            "  {}-{} {} with {} ({}, {}){}",
            appointment.start_time,
            appointment.end_time,
            listing.patient_label(),
            listing.doctor_label(),
            appointment.appointment_type,
            appointment.status,
            appointment
                .visible_notes()
                .map(|notes| format!(": {}", notes))
                .unwrap_or_default()
        );
    }

    let queue = query.walk_in_queue(&appointment_rows, &patient_rows, &doctor_rows);
    info!("Walk-in queue: {} waiting", queue.len());
    for listing in &queue {
        info!("  {} at {}", listing.patient_label(), listing.appointment.start_time);
    }

    for doctor in &doctor_rows {
        let slots = booking.available_slots(doctor.id, today).await;
        let times: Vec<String> = slots.iter().map(ToString::to_string).collect();
        info!(
            "{}: {} free slots [{}]",
            doctor.picker_label(),
            slots.len(),
            times.join(", ")
        );
    }

    let month = calendar.month_view(
        calendar.current_month(),
        &appointment_rows,
        &patient_rows,
        &doctor_rows,
    );
    let busy_days = month
        .days
        .iter()
        .filter(|day| day.in_current_month && day.total_appointments() > 0)
        .count();
    info!(
        "Calendar {}: {} days with appointments",
        month.month.format("%B %Y"),
        busy_days
    );

    // Sample booking against the first free slot of the first doctor
    let (Some(patient), Some(doctor)) = (patient_rows.first(), doctor_rows.first()) else {
        warn!("No patients or doctors on file, skipping sample booking");
        return Ok(());
    };
    let Some(start_time) = booking.available_slots(doctor.id, today).await.first().copied() else {
        warn!("{} is fully booked today, skipping sample booking", doctor.name);
        return Ok(());
    };

    let request = BookAppointmentRequest {
        patient_id: Some(patient.id),
        doctor_id: Some(doctor.id),
        date: None,
        start_time: Some(start_time),
        appointment_type: Some(AppointmentType::Consultation),
        notes: Some("Booked from the demo".to_string()),
    };
    match booking.book_appointment(request.clone()).await {
        Ok(appointment) => info!(
            "Booked appointment {} for {} with {} at {}",
            appointment.id, patient.name, doctor.name, appointment.start_time
        ),
        Err(e) => warn!("Sample booking failed: {}", e),
    }

    // Booking the same slot again must be refused
    if let Err(e) = booking.book_appointment(request).await {
        info!("Second booking refused as expected: {}", e);
    }

    Ok(())
}
