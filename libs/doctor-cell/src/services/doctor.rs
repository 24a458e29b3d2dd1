use std::sync::Arc;
use tracing::debug;

use shared_database::seed::{parse_seed, DOCTORS_JSON};
use shared_database::{InMemoryTable, LatencyStrategy, SeedError};
use shared_models::{RecordId, StoreError};

use crate::models::{CreateDoctorRequest, Doctor, UpdateDoctorRequest};

pub struct DoctorService {
    doctors: InMemoryTable<Doctor>,
}

impl DoctorService {
    pub fn new(latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            doctors: InMemoryTable::new(latency),
        }
    }

    pub fn with_doctors(doctors: Vec<Doctor>, latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            doctors: InMemoryTable::with_rows(doctors, latency),
        }
    }

    /// Service preloaded with the bundled doctor roster.
    pub fn seeded(latency: Arc<dyn LatencyStrategy>) -> Result<Self, SeedError> {
        let doctors = parse_seed::<Doctor>(DOCTORS_JSON)?;
        Ok(Self::with_doctors(doctors, latency))
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        debug!("Listing doctors");
        self.doctors.get_all().await
    }

    pub async fn get_doctor(&self, doctor_id: RecordId) -> Result<Doctor, StoreError> {
        debug!("Fetching doctor: {}", doctor_id);
        self.doctors.get_by_id(doctor_id).await
    }

    pub async fn create_doctor(
        &mut self,
        request: CreateDoctorRequest,
    ) -> Result<Doctor, StoreError> {
        debug!("Creating doctor: {} ({})", request.name, request.specialty);
        self.doctors.create(request).await
    }

    pub async fn update_doctor(
        &mut self,
        doctor_id: RecordId,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, StoreError> {
        debug!("Updating doctor: {}", doctor_id);
        self.doctors.update(doctor_id, request).await
    }

    pub async fn delete_doctor(&mut self, doctor_id: RecordId) -> Result<Doctor, StoreError> {
        debug!("Deleting doctor: {}", doctor_id);
        self.doctors.delete(doctor_id).await
    }
}
