// libs/appointment-cell/src/services/query.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_models::RecordId;
use shared_utils::Clock;

use crate::models::Appointment;

pub const UNKNOWN_PATIENT: &str = "Unknown Patient";
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    /// Day to show. `None` means today.
    pub date: Option<NaiveDate>,
    /// Case-insensitive fragment of the patient or doctor name.
    #[serde(default)]
    pub search: String,
}

/// An appointment joined with the names it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListing {
    pub appointment: Appointment,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
}

impl AppointmentListing {
    pub fn patient_label(&self) -> &str {
        self.patient_name.as_deref().unwrap_or(UNKNOWN_PATIENT)
    }

    pub fn doctor_label(&self) -> &str {
        self.doctor_name.as_deref().unwrap_or(UNKNOWN_DOCTOR)
    }
}

/// Id-to-record lookup over patient and doctor snapshots. When an id repeats,
/// the first record wins.
pub struct Directory<'a> {
    patients: HashMap<RecordId, &'a Patient>,
    doctors: HashMap<RecordId, &'a Doctor>,
}

impl<'a> Directory<'a> {
    pub fn new(patients: &'a [Patient], doctors: &'a [Doctor]) -> Self {
        let mut patient_index = HashMap::with_capacity(patients.len());
        for patient in patients {
            patient_index.entry(patient.id).or_insert(patient);
        }
        let mut doctor_index = HashMap::with_capacity(doctors.len());
        for doctor in doctors {
            doctor_index.entry(doctor.id).or_insert(doctor);
        }
        Self {
            patients: patient_index,
            doctors: doctor_index,
        }
    }

    pub fn patient(&self, patient_id: RecordId) -> Option<&'a Patient> {
        self.patients.get(&patient_id).copied()
    }

    pub fn doctor(&self, doctor_id: RecordId) -> Option<&'a Doctor> {
        self.doctors.get(&doctor_id).copied()
    }

    pub fn listing(&self, appointment: &Appointment) -> AppointmentListing {
        AppointmentListing {
            appointment: appointment.clone(),
            patient_name: self.patient(appointment.patient_id).map(|p| p.name.clone()),
            doctor_name: self.doctor(appointment.doctor_id).map(|d| d.name.clone()),
        }
    }

    /// Empty terms match everything. Otherwise the lowercase term must appear in
    /// the resolved patient or doctor name; unresolved references never match.
    pub fn matches_search(&self, appointment: &Appointment, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        let contains = |name: &str| name.to_lowercase().contains(&needle);

        self.patient(appointment.patient_id).is_some_and(|p| contains(&p.name))
            || self.doctor(appointment.doctor_id).is_some_and(|d| contains(&d.name))
    }
}

pub struct AppointmentQueryService {
    clock: Arc<dyn Clock>,
}

impl AppointmentQueryService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// The main list: one day (default today) narrowed by the search term, in
    /// store order.
    pub fn search_appointments(
        &self,
        query: &AppointmentSearchQuery,
        appointments: &[Appointment],
        patients: &[Patient],
        doctors: &[Doctor],
    ) -> Vec<AppointmentListing> {
        let day = query.date.unwrap_or_else(|| self.clock.today());
        let directory = Directory::new(patients, doctors);

        let listings: Vec<AppointmentListing> = appointments
            .iter()
            .filter(|a| a.date == day)
            .filter(|a| directory.matches_search(a, &query.search))
            .map(|a| directory.listing(a))
            .collect();

        debug!(
            "Appointment search for {} matching '{}' returned {} rows",
            day,
            query.search,
            listings.len()
        );
        listings
    }

    /// Walk-ins still waiting today. Ignores whatever day or search the main
    /// list is showing.
    pub fn walk_in_queue(
        &self,
        appointments: &[Appointment],
        patients: &[Patient],
        doctors: &[Doctor],
    ) -> Vec<AppointmentListing> {
        let today = self.clock.today();
        let directory = Directory::new(patients, doctors);

        appointments
            .iter()
            .filter(|a| a.date == today && a.is_walk_in_waiting())
            .map(|a| directory.listing(a))
            .collect()
    }
}
