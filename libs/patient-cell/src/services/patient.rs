use std::sync::Arc;
use tracing::debug;

use shared_database::seed::{parse_seed, PATIENTS_JSON};
use shared_database::{InMemoryTable, LatencyStrategy, SeedError};
use shared_models::{RecordId, StoreError};

use crate::models::{CreatePatientRequest, Patient, UpdatePatientRequest};

pub struct PatientService {
    patients: InMemoryTable<Patient>,
}

impl PatientService {
    pub fn new(latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            patients: InMemoryTable::new(latency),
        }
    }

    pub fn with_patients(patients: Vec<Patient>, latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            patients: InMemoryTable::with_rows(patients, latency),
        }
    }

    /// Service preloaded with the bundled patient directory.
    pub fn seeded(latency: Arc<dyn LatencyStrategy>) -> Result<Self, SeedError> {
        let patients = parse_seed::<Patient>(PATIENTS_JSON)?;
        Ok(Self::with_patients(patients, latency))
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        debug!("Listing patients");
        self.patients.get_all().await
    }

    pub async fn get_patient(&self, patient_id: RecordId) -> Result<Patient, StoreError> {
        debug!("Fetching patient: {}", patient_id);
        self.patients.get_by_id(patient_id).await
    }

    pub async fn create_patient(
        &mut self,
        request: CreatePatientRequest,
    ) -> Result<Patient, StoreError> {
        debug!("Creating patient record for: {}", request.email);
        self.patients.create(request).await
    }

    pub async fn update_patient(
        &mut self,
        patient_id: RecordId,
        request: UpdatePatientRequest,
    ) -> Result<Patient, StoreError> {
        debug!("Updating patient: {}", patient_id);
        self.patients.update(patient_id, request).await
    }

    /// Appointments that reference the patient are left untouched.
    pub async fn delete_patient(&mut self, patient_id: RecordId) -> Result<Patient, StoreError> {
        debug!("Deleting patient: {}", patient_id);
        self.patients.delete(patient_id).await
    }
}
