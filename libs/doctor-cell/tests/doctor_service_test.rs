// libs/doctor-cell/tests/doctor_service_test.rs

use assert_matches::assert_matches;
use std::sync::Arc;

use doctor_cell::{CreateDoctorRequest, DoctorService, UpdateDoctorRequest, DEFAULT_DOCTOR_COLOR};
use shared_database::NoLatency;
use shared_models::{EntityKind, StoreError};

fn seeded() -> DoctorService {
    DoctorService::seeded(Arc::new(NoLatency)).expect("bundled roster parses")
}

#[tokio::test]
async fn roster_loads_with_color_tags() {
    let doctors = seeded().list_doctors().await;
    assert_eq!(doctors.len(), 4);
    assert_eq!(doctors[1].name, "Dr. Alan Smith");
    assert_eq!(doctors[1].picker_label(), "Dr. Alan Smith - Cardiology");
    assert!(doctors.iter().all(|d| d.color.starts_with("doctor-color-")));
}

#[tokio::test]
async fn create_uses_max_plus_one() {
    let mut service = seeded();
    service.delete_doctor(2).await.unwrap();

    let created = service
        .create_doctor(CreateDoctorRequest {
            name: "Dr. Nia Brooks".to_string(),
            specialty: "Neurology".to_string(),
            color: "doctor-color-5".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 5);
    assert_eq!(service.get_doctor(5).await.unwrap(), created);
}

#[test]
fn color_defaults_when_omitted_from_json() {
    let request: CreateDoctorRequest =
        serde_json::from_str(r#"{"name": "Dr. Lee", "specialty": "ENT"}"#).unwrap();
    assert_eq!(request.color, DEFAULT_DOCTOR_COLOR);
}

#[tokio::test]
async fn update_keeps_unpatched_fields() {
    let mut service = seeded();
    let updated = service
        .update_doctor(
            3,
            UpdateDoctorRequest {
                specialty: Some("Neonatology".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Dr. Sofia Romano");
    assert_eq!(updated.specialty, "Neonatology");
    assert_eq!(updated.color, "doctor-color-3");
}

#[tokio::test]
async fn missing_doctor_is_not_found_everywhere() {
    let mut service = seeded();

    assert_matches!(
        service.get_doctor(99).await,
        Err(StoreError::NotFound { entity: EntityKind::Doctor, id: 99 })
    );
    assert_matches!(
        service.update_doctor(99, UpdateDoctorRequest::default()).await,
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(service.delete_doctor(99).await, Err(StoreError::NotFound { .. }));
    assert_eq!(service.list_doctors().await.len(), 4);
}
