// Shared fixtures for appointment-cell integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use appointment_cell::{
    Appointment, AppointmentBookingService, AppointmentService, AppointmentStatus,
    AppointmentType, BookAppointmentRequest,
};
use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_database::NoLatency;
use shared_models::RecordId;
use shared_utils::test_utils::{date, fixture_clock, time, FIXTURE_DAY};

pub fn appointment(
    id: RecordId,
    patient_id: RecordId,
    doctor_id: RecordId,
    day: &str,
    start: &str,
) -> Appointment {
    let start_time = time(start);
    Appointment {
        id,
        patient_id,
        doctor_id,
        date: date(day),
        start_time,
        end_time: start_time.add_thirty_minutes().expect("fixture slots are aligned"),
        appointment_type: AppointmentType::Consultation,
        status: AppointmentStatus::Scheduled,
        notes: None,
    }
}

pub fn with_type(mut appointment: Appointment, appointment_type: AppointmentType) -> Appointment {
    appointment.appointment_type = appointment_type;
    appointment
}

pub fn with_status(mut appointment: Appointment, status: AppointmentStatus) -> Appointment {
    appointment.status = status;
    appointment
}

pub fn patient(id: RecordId, name: &str) -> Patient {
    Patient {
        id,
        name: name.to_string(),
        email: format!("patient{}@example.com", id),
        phone: "(555) 010-0000".to_string(),
        date_of_birth: None,
    }
}

pub fn doctor(id: RecordId, name: &str, color: &str) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: "General Practice".to_string(),
        color: color.to_string(),
    }
}

/// Booking service over `appointments` with today pinned to the fixture day.
pub fn booking_service(appointments: Vec<Appointment>) -> AppointmentBookingService {
    AppointmentBookingService::new(
        AppointmentService::with_appointments(appointments, Arc::new(NoLatency)),
        fixture_clock(),
    )
}

/// A fully filled booking form for the fixture day.
pub fn booking_form(patient_id: RecordId, doctor_id: RecordId, start: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient_id: Some(patient_id),
        doctor_id: Some(doctor_id),
        date: Some(date(FIXTURE_DAY)),
        start_time: Some(time(start)),
        appointment_type: Some(AppointmentType::Consultation),
        notes: None,
    }
}
