//! Initial dataset compiled into the binary and loaded once per store.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use shared_models::{EntityKind, RecordId};

use crate::memory::Record;

pub const PATIENTS_JSON: &str = include_str!("../seed/patients.json");
pub const DOCTORS_JSON: &str = include_str!("../seed/doctors.json");
pub const APPOINTMENTS_JSON: &str = include_str!("../seed/appointments.json");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Malformed {entity} seed data: {source}")]
    Malformed {
        entity: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate {entity} id {id} in seed data")]
    DuplicateId { entity: EntityKind, id: RecordId },
}

/// Parses a JSON array of `R` and checks that ids are unique.
pub fn parse_seed<R>(raw: &str) -> Result<Vec<R>, SeedError>
where
    R: Record + DeserializeOwned,
{
    let rows: Vec<R> = serde_json::from_str(raw).map_err(|source| SeedError::Malformed {
        entity: R::KIND,
        source,
    })?;

    let mut seen = HashSet::with_capacity(rows.len());
    for row in &rows {
        if !seen.insert(row.id()) {
            return Err(SeedError::DuplicateId {
                entity: R::KIND,
                id: row.id(),
            });
        }
    }

    debug!("Parsed {} {} seed records", rows.len(), R::KIND);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    struct Row {
        #[serde(rename = "Id")]
        id: RecordId,
    }

    impl Record for Row {
        type Draft = ();
        type Patch = ();

        const KIND: EntityKind = EntityKind::Doctor;

        fn id(&self) -> RecordId {
            self.id
        }

        fn from_draft(id: RecordId, _: ()) -> Self {
            Self { id }
        }

        fn apply_patch(&mut self, _: ()) {}
    }

    #[test]
    fn embedded_files_are_json_arrays() {
        for raw in [PATIENTS_JSON, DOCTORS_JSON, APPOINTMENTS_JSON] {
            let value: serde_json::Value = serde_json::from_str(raw).unwrap();
            assert!(value.as_array().is_some_and(|rows| !rows.is_empty()));
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = parse_seed::<Row>(r#"[{"Id": 1}, {"Id": 1}]"#).unwrap_err();
        assert_matches!(err, SeedError::DuplicateId { id: 1, entity: EntityKind::Doctor });
    }

    #[test]
    fn reports_malformed_rows() {
        let err = parse_seed::<Row>(r#"[{"Id": "one"}]"#).unwrap_err();
        assert_matches!(err, SeedError::Malformed { .. });
        assert!(err.to_string().starts_with("Malformed Doctor seed data"));
    }
}
