// libs/appointment-cell/tests/appointment_store_test.rs

mod common;

use assert_matches::assert_matches;
use std::sync::Arc;

use appointment_cell::{
    AppointmentService, AppointmentStatus, AppointmentType, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use shared_database::NoLatency;
use shared_models::{EntityKind, StoreError};
use shared_utils::test_utils::{date, time};

use common::appointment;

fn draft(doctor_id: u32, start: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id: 1,
        doctor_id,
        date: date("2024-06-10"),
        start_time: time(start),
        end_time: time(start).add_thirty_minutes().unwrap(),
        appointment_type: AppointmentType::CheckUp,
        status: AppointmentStatus::Scheduled,
        notes: Some("fasting".to_string()),
    }
}

#[tokio::test]
async fn seed_matches_the_stored_json_shape() {
    let service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();
    let all = service.list_appointments().await;
    assert_eq!(all.len(), 10);

    let json = serde_json::to_value(&all[1]).unwrap();
    assert_eq!(json["Id"], 2);
    assert_eq!(json["patientId"], 2);
    assert_eq!(json["doctorId"], 2);
    assert_eq!(json["date"], "2024-06-10");
    assert_eq!(json["startTime"], "10:30");
    assert_eq!(json["endTime"], "11:00");
    assert_eq!(json["type"], "Follow-up");
    assert_eq!(json["status"], "Scheduled");

    // Missing notes deserialize as None.
    assert_eq!(all[6].notes, None);
}

#[tokio::test]
async fn create_returns_draft_plus_next_id() {
    let mut service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();

    let created = service.create_appointment(draft(2, "15:00")).await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.appointment_type, AppointmentType::CheckUp);
    assert_eq!(created.notes.as_deref(), Some("fasting"));
    assert_eq!(service.get_appointment(11).await.unwrap(), created);
}

#[tokio::test]
async fn store_does_not_police_double_booking() {
    let mut service = AppointmentService::new(Arc::new(NoLatency));
    let first = service.create_appointment(draft(2, "09:00")).await.unwrap();
    let second = service.create_appointment(draft(2, "09:00")).await.unwrap();

    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(service.list_appointments().await.len(), 2);
}

#[tokio::test]
async fn update_is_a_shallow_merge() {
    let mut service = AppointmentService::with_appointments(
        vec![appointment(5, 1, 2, "2024-06-10", "11:00")],
        Arc::new(NoLatency),
    );

    let updated = service
        .update_appointment(
            5,
            UpdateAppointmentRequest {
                notes: Some(Some("bring referral".to_string())),
                appointment_type: Some(AppointmentType::FollowUp),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.notes.as_deref(), Some("bring referral"));
    assert_eq!(updated.appointment_type, AppointmentType::FollowUp);
    assert_eq!(updated.start_time, time("11:00"));
    assert_eq!(updated.doctor_id, 2);
    assert_eq!(updated.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn missing_appointment_fails_with_not_found() {
    let mut service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();

    let err = service.get_appointment(404).await.unwrap_err();
    assert_eq!(err.to_string(), "Appointment not found");
    assert_matches!(
        service
            .update_appointment(404, UpdateAppointmentRequest::default())
            .await,
        Err(StoreError::NotFound { entity: EntityKind::Appointment, id: 404 })
    );
    assert_matches!(service.delete_appointment(404).await, Err(StoreError::NotFound { .. }));
    assert_eq!(service.list_appointments().await.len(), 10);
}

#[tokio::test]
async fn delete_removes_and_returns_the_record() {
    let mut service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();

    let removed = service.delete_appointment(10).await.unwrap();
    assert_eq!(removed.start_time, time("17:30"));
    assert_matches!(service.get_appointment(10).await, Err(StoreError::NotFound { .. }));

    // The maximum was removed, so the next id reuses it.
    assert_eq!(service.create_appointment(draft(1, "09:00")).await.unwrap().id, 10);
}

#[tokio::test]
async fn mutating_a_returned_copy_leaves_the_store_alone() {
    let service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();
    let mut copy = service.get_appointment(1).await.unwrap();
    copy.status = AppointmentStatus::Cancelled;

    assert_eq!(
        service.get_appointment(1).await.unwrap().status,
        AppointmentStatus::Scheduled
    );
}

#[tokio::test]
async fn update_can_clear_notes() {
    let mut service = AppointmentService::seeded(Arc::new(NoLatency)).unwrap();
    assert!(service.get_appointment(1).await.unwrap().notes.is_some());

    let patch: UpdateAppointmentRequest = serde_json::from_str(r#"{"notes": null}"#).unwrap();
    let cleared = service.update_appointment(1, patch).await.unwrap();
    assert_eq!(cleared.notes, None);

    // Omitting the key leaves the notes untouched.
    let untouched = service
        .update_appointment(3, serde_json::from_str(r#"{"status": "Cancelled"}"#).unwrap())
        .await
        .unwrap();
    assert_eq!(untouched.notes.as_deref(), Some("Annual physical"));
}
