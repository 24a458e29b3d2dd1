use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier shared by every entity kind.
pub type RecordId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Patient,
    Doctor,
    Appointment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Patient => write!(f, "Patient"),
            EntityKind::Doctor => write!(f, "Doctor"),
            EntityKind::Appointment => write!(f, "Appointment"),
        }
    }
}
