// libs/appointment-cell/src/services/booking.rs
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use doctor_cell::AvailabilityService;
use shared_models::{RecordId, TimeOfDay};
use shared_utils::Clock;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, AppointmentType, BookAppointmentRequest,
    CreateAppointmentRequest, RequiredField, UpdateAppointmentRequest,
};
use crate::services::appointment::AppointmentService;
use crate::services::lifecycle::AppointmentLifecycleService;

/// Applies the scheduling rules in front of the appointment store: required
/// fields, slot legality, no double-booking, derived end times and status
/// transitions.
pub struct AppointmentBookingService {
    appointments: AppointmentService,
    availability: AvailabilityService,
    lifecycle_service: AppointmentLifecycleService,
    clock: Arc<dyn Clock>,
}

impl AppointmentBookingService {
    pub fn new(appointments: AppointmentService, clock: Arc<dyn Clock>) -> Self {
        Self::with_availability(appointments, AvailabilityService::new(), clock)
    }

    pub fn with_availability(
        appointments: AppointmentService,
        availability: AvailabilityService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            availability,
            lifecycle_service: AppointmentLifecycleService::new(),
            clock,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &AppointmentService {
        &self.appointments
    }

    /// Direct store access, bypassing the booking rules.
    pub fn store_mut(&mut self) -> &mut AppointmentService {
        &mut self.appointments
    }

    pub fn availability(&self) -> &AvailabilityService {
        &self.availability
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Free slots for a doctor on a date against the current appointment set.
    pub async fn available_slots(&self, doctor_id: RecordId, date: NaiveDate) -> Vec<TimeOfDay> {
        let appointments = self.appointments.list_appointments().await;
        self.availability.compute_available_slots(doctor_id, date, &appointments)
    }

    /// Slots for a form that may not have a doctor or date picked yet.
    pub async fn slots_for_selection(
        &self,
        doctor_id: Option<RecordId>,
        date: Option<NaiveDate>,
    ) -> Vec<TimeOfDay> {
        let appointments = self.appointments.list_appointments().await;
        self.availability.slots_for_selection(doctor_id, date, &appointments)
    }

    pub async fn book_appointment(
        &mut self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let (patient_id, doctor_id, start_time, appointment_type) =
            required_fields(&request).map_err(|e| {
                warn!("Rejected booking: {}", e);
                e
            })?;

        let date = request.date.unwrap_or_else(|| self.clock.today());
        info!(
            "Booking {} for patient {} with doctor {} on {} at {}",
            appointment_type, patient_id, doctor_id, date, start_time
        );

        let end_time = self.validate_slot(doctor_id, date, start_time, None).await?;

        let appointment = self
            .appointments
            .create_appointment(CreateAppointmentRequest {
                patient_id,
                doctor_id,
                date,
                start_time,
                end_time,
                appointment_type,
                status: AppointmentStatus::Scheduled,
                notes: request.notes,
            })
            .await?;

        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    /// Partial edit through the booking rules. A new start time re-derives the
    /// end time; any caller-supplied end time is ignored.
    pub async fn edit_appointment(
        &mut self,
        appointment_id: RecordId,
        mut request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.appointments.get_appointment(appointment_id).await?;

        if let Some(new_status) = request.status {
            self.lifecycle_service
                .validate_status_transition(current.status, new_status)?;
        }

        request.end_time = None;
        if request.touches_slot() {
            let doctor_id = request.doctor_id.unwrap_or(current.doctor_id);
            let date = request.date.unwrap_or(current.date);
            let start_time = request.start_time.unwrap_or(current.start_time);

            let unchanged = doctor_id == current.doctor_id
                && date == current.date
                && start_time == current.start_time;
            if !unchanged {
                let end_time = self
                    .validate_slot(doctor_id, date, start_time, Some(appointment_id))
                    .await?;
                request.end_time = Some(end_time);
            }
        }

        let updated = self
            .appointments
            .update_appointment(appointment_id, request)
            .await?;
        info!("Appointment {} edited", appointment_id);
        Ok(updated)
    }

    pub async fn cancel_appointment(
        &mut self,
        appointment_id: RecordId,
    ) -> Result<Appointment, AppointmentError> {
        self.set_status(appointment_id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete_appointment(
        &mut self,
        appointment_id: RecordId,
    ) -> Result<Appointment, AppointmentError> {
        self.set_status(appointment_id, AppointmentStatus::Completed).await
    }

    async fn set_status(
        &mut self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.appointments.get_appointment(appointment_id).await?;
        if current.status == status {
            debug!("Appointment {} already {}", appointment_id, status);
            return Ok(current);
        }

        self.lifecycle_service
            .validate_status_transition(current.status, status)?;

        let updated = self
            .appointments
            .update_appointment(appointment_id, UpdateAppointmentRequest::status(status))
            .await?;
        info!("Appointment {} marked {}", appointment_id, status);
        Ok(updated)
    }

    /// Checks that `start_time` is a free template slot for the doctor on `date`
    /// and returns the derived end time. `exclude` skips the appointment being
    /// edited so it does not collide with itself.
    async fn validate_slot(
        &self,
        doctor_id: RecordId,
        date: NaiveDate,
        start_time: TimeOfDay,
        exclude: Option<RecordId>,
    ) -> Result<TimeOfDay, AppointmentError> {
        let end_time = start_time.add_thirty_minutes().map_err(|e| {
            warn!("Rejected slot {}: {}", start_time, e);
            AppointmentError::InvalidTime(e)
        })?;

        if !self.availability.template().contains(start_time) {
            warn!("Rejected slot {}: outside the daily template", start_time);
            return Err(AppointmentError::SlotNotInTemplate(start_time));
        }

        let mut appointments = self.appointments.list_appointments().await;
        if let Some(excluded) = exclude {
            appointments.retain(|a| a.id != excluded);
        }

        let available = self
            .availability
            .compute_available_slots(doctor_id, date, &appointments);
        if !available.contains(&start_time) {
            warn!(
                "Rejected slot {} on {}: doctor {} is already booked",
                start_time, date, doctor_id
            );
            return Err(AppointmentError::SlotNotAvailable {
                doctor_id,
                date,
                start_time,
            });
        }

        Ok(end_time)
    }
}

fn required_fields(
    request: &BookAppointmentRequest,
) -> Result<(RecordId, RecordId, TimeOfDay, AppointmentType), AppointmentError> {
    let missing = AppointmentError::MissingField;
    Ok((
        request.patient_id.ok_or(missing(RequiredField::Patient))?,
        request.doctor_id.ok_or(missing(RequiredField::Doctor))?,
        request.start_time.ok_or(missing(RequiredField::StartTime))?,
        request
            .appointment_type
            .ok_or(missing(RequiredField::AppointmentType))?,
    ))
}
