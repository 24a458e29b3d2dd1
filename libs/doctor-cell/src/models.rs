use serde::{Deserialize, Serialize};

use shared_database::Record;
use shared_models::{EntityKind, RecordId};

/// Calendar color used when an appointment's doctor cannot be resolved.
pub const DEFAULT_DOCTOR_COLOR: &str = "doctor-color-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub specialty: String,
    /// Display tag the calendar uses to color this doctor's appointments.
    pub color: String,
}

impl Doctor {
    /// "Dr. Name - Specialty", as shown in doctor pickers.
    pub fn picker_label(&self) -> String {
        format!("{} - {}", self.name, self.specialty)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialty: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_DOCTOR_COLOR.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub color: Option<String>,
}

impl Record for Doctor {
    type Draft = CreateDoctorRequest;
    type Patch = UpdateDoctorRequest;

    const KIND: EntityKind = EntityKind::Doctor;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: CreateDoctorRequest) -> Self {
        Self {
            id,
            name: draft.name,
            specialty: draft.specialty,
            color: draft.color,
        }
    }

    fn apply_patch(&mut self, patch: UpdateDoctorRequest) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(specialty) = patch.specialty {
            self.specialty = specialty;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}
