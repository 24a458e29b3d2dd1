// libs/appointment-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use doctor_cell::SlotBooking;
use shared_database::Record;
use shared_models::{EntityKind, RecordId, StoreError, TimeOfDay, TimeOfDayError};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked half-hour visit.
///
/// `patient_id` and `doctor_id` are soft references: nothing checks that the
/// patient or doctor exists, and readers fall back to an "Unknown" label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Notes worth showing: present and not blank.
    pub fn visible_notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn is_walk_in_waiting(&self) -> bool {
        self.appointment_type == AppointmentType::WalkIn
            && self.status == AppointmentStatus::Scheduled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentType {
    Consultation,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "Check-up")]
    CheckUp,
    Emergency,
    #[serde(rename = "Walk-in")]
    WalkIn,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 5] = [
        AppointmentType::Consultation,
        AppointmentType::FollowUp,
        AppointmentType::CheckUp,
        AppointmentType::Emergency,
        AppointmentType::WalkIn,
    ];
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Consultation => write!(f, "Consultation"),
            AppointmentType::FollowUp => write!(f, "Follow-up"),
            AppointmentType::CheckUp => write!(f, "Check-up"),
            AppointmentType::Emergency => write!(f, "Emergency"),
            AppointmentType::WalkIn => write!(f, "Walk-in"),
        }
    }
}

impl SlotBooking for Appointment {
    fn doctor_id(&self) -> RecordId {
        self.doctor_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    fn holds_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

// ==============================================================================
// STORE MODELS
// ==============================================================================

/// A complete appointment minus its id, as handed to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub status: Option<AppointmentStatus>,
    /// `Some(None)` clears the notes.
    #[serde(
        default,
        deserialize_with = "shared_models::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

impl UpdateAppointmentRequest {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn touches_slot(&self) -> bool {
        self.doctor_id.is_some() || self.date.is_some() || self.start_time.is_some()
    }
}

impl Record for Appointment {
    type Draft = CreateAppointmentRequest;
    type Patch = UpdateAppointmentRequest;

    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: CreateAppointmentRequest) -> Self {
        Self {
            id,
            patient_id: draft.patient_id,
            doctor_id: draft.doctor_id,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            appointment_type: draft.appointment_type,
            status: draft.status,
            notes: draft.notes,
        }
    }

    fn apply_patch(&mut self, patch: UpdateAppointmentRequest) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = patch.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(appointment_type) = patch.appointment_type {
            self.appointment_type = appointment_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

/// Booking form input. Everything is optional so that incomplete forms can be
/// reported field by field instead of failing to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Patient,
    Doctor,
    StartTime,
    AppointmentType,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Patient => write!(f, "patient"),
            RequiredField::Doctor => write!(f, "doctor"),
            RequiredField::StartTime => write!(f, "start time"),
            RequiredField::AppointmentType => write!(f, "appointment type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Please fill in all required fields (missing {0})")]
    MissingField(RequiredField),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(#[from] TimeOfDayError),

    #[error("{0} is not a bookable slot")]
    SlotNotInTemplate(TimeOfDay),

    #[error("Doctor {doctor_id} is already booked at {start_time} on {date}")]
    SlotNotAvailable {
        doctor_id: RecordId,
        date: NaiveDate,
        start_time: TimeOfDay,
    },

    #[error("Appointment cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
