use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_database::Record;
use shared_models::{EntityKind, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Patient {
    /// Whole years between the date of birth and `today`, if the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.and_then(|dob| today.years_since(dob))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `Some(None)` clears a recorded birth date.
    #[serde(
        default,
        deserialize_with = "shared_models::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
}

impl Record for Patient {
    type Draft = CreatePatientRequest;
    type Patch = UpdatePatientRequest;

    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: CreatePatientRequest) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            date_of_birth: draft.date_of_birth,
        }
    }

    fn apply_patch(&mut self, patch: UpdatePatientRequest) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
    }
}
