// libs/appointment-cell/src/services/appointment.rs
use std::sync::Arc;
use tracing::debug;

use shared_database::seed::{parse_seed, APPOINTMENTS_JSON};
use shared_database::{InMemoryTable, LatencyStrategy, SeedError};
use shared_models::{RecordId, StoreError};

use crate::models::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};

/// Raw appointment storage. Accepts any write, including ones that double-book
/// a doctor; slot rules live in the booking service.
pub struct AppointmentService {
    appointments: InMemoryTable<Appointment>,
}

impl AppointmentService {
    pub fn new(latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            appointments: InMemoryTable::new(latency),
        }
    }

    pub fn with_appointments(
        appointments: Vec<Appointment>,
        latency: Arc<dyn LatencyStrategy>,
    ) -> Self {
        Self {
            appointments: InMemoryTable::with_rows(appointments, latency),
        }
    }

    pub fn seeded(latency: Arc<dyn LatencyStrategy>) -> Result<Self, SeedError> {
        let appointments = parse_seed::<Appointment>(APPOINTMENTS_JSON)?;
        Ok(Self::with_appointments(appointments, latency))
    }

    pub async fn list_appointments(&self) -> Vec<Appointment> {
        debug!("Listing appointments");
        self.appointments.get_all().await
    }

    pub async fn get_appointment(&self, appointment_id: RecordId) -> Result<Appointment, StoreError> {
        debug!("Fetching appointment: {}", appointment_id);
        self.appointments.get_by_id(appointment_id).await
    }

    pub async fn create_appointment(
        &mut self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, StoreError> {
        debug!(
            "Storing appointment for patient {} with doctor {} on {} at {}",
            request.patient_id, request.doctor_id, request.date, request.start_time
        );
        self.appointments.create(request).await
    }

    pub async fn update_appointment(
        &mut self,
        appointment_id: RecordId,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, StoreError> {
        debug!("Updating appointment: {}", appointment_id);
        self.appointments.update(appointment_id, request).await
    }

    pub async fn delete_appointment(&mut self, appointment_id: RecordId) -> Result<Appointment, StoreError> {
        debug!("Deleting appointment: {}", appointment_id);
        self.appointments.delete(appointment_id).await
    }
}
