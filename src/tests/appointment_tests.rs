use std::sync::Arc;

use crate::core::errors::SalonError;
use crate::core::models::appointment::AppointmentStatus;
use crate::core::models::filters::AppointmentFilter;
use crate::core::models::input::{AppointmentInput, AppointmentUpdate};
use crate::core::models::page::PageRequest;
use crate::core::models::service::ServiceView;
use crate::tests::{
    create_admin, create_catalog_service, create_test_service_with_storage, days_from_today, register_user,
};
use chrono::NaiveDate;

fn booking(service: &ServiceView, date: NaiveDate, time: &str) -> AppointmentInput {
    AppointmentInput {
        service: service.service.name.clone(),
        service_id: Some(service.service.id.to_string()),
        date: date.to_string(),
        time: time.to_string(),
        notes: None,
    }
}

fn status_update(status: &str) -> AppointmentUpdate {
    AppointmentUpdate {
        status: Some(status.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let day = days_from_today(3);

    let first = service
        .create_appointment(&jane, booking(&haircut, day, "10:00"))
        .await
        .unwrap();
    assert_eq!(first.appointment.status, AppointmentStatus::Pending);
    assert_eq!(first.appointment.duration, 60);
    assert_eq!(first.appointment.price, 45.0);
    assert_eq!(first.end_time.to_string(), "11:00");
    assert_eq!(first.service_details.as_ref().map(|s| s.id), Some(haircut.service.id));

    let clash = service.create_appointment(&jane, booking(&haircut, day, "10:30")).await;
    match clash {
        Err(err @ SalonError::SlotUnavailable) => assert_eq!(err.to_string(), "Time slot is not available"),
        other => panic!("expected slot conflict, got {:?}", other.map(|v| v.appointment)),
    }

    service
        .create_appointment(&jane, booking(&haircut, day, "11:00"))
        .await
        .unwrap();
    service
        .create_appointment(&jane, booking(&haircut, day, "9:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_same_slot_on_another_day_is_free() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let john = register_user(&service, "John Smith", "john@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;

    service
        .create_appointment(&jane, booking(&haircut, days_from_today(3), "10:00"))
        .await
        .unwrap();
    service
        .create_appointment(&john, booking(&haircut, days_from_today(4), "10:00"))
        .await
        .unwrap();
    let same_slot = service
        .create_appointment(&john, booking(&haircut, days_from_today(3), "10:00"))
        .await;
    assert!(matches!(same_slot, Err(SalonError::SlotUnavailable)));
}

#[tokio::test]
async fn test_cancelled_appointment_frees_the_slot() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let day = days_from_today(2);

    let first = service
        .create_appointment(&jane, booking(&haircut, day, "14:00"))
        .await
        .unwrap();
    service
        .update_appointment(&admin, first.appointment.id, status_update("cancelled"))
        .await
        .unwrap();

    let rebooked = service
        .create_appointment(&jane, booking(&haircut, day, "14:30"))
        .await
        .unwrap();
    assert_eq!(rebooked.end_time.to_string(), "15:30");

    // Reviving the cancelled booking would now clash.
    let revived = service
        .update_appointment(&admin, first.appointment.id, status_update("confirmed"))
        .await;
    assert!(matches!(revived, Err(SalonError::SlotUnavailable)));
}

#[tokio::test]
async fn test_admin_confirms_and_completes_next_to_a_walk_in() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let john = register_user(&service, "John Smith", "john@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let day = days_from_today(2);

    let checked = service
        .create_appointment(&jane, booking(&haircut, day, "10:30"))
        .await
        .unwrap();
    let walk_in = AppointmentInput {
        service_id: None,
        ..booking(&haircut, day, "10:00")
    };
    service.create_appointment(&john, walk_in).await.unwrap();

    let confirmed = service
        .update_appointment(&admin, checked.appointment.id, status_update("confirmed"))
        .await
        .unwrap();
    assert_eq!(confirmed.appointment.status, AppointmentStatus::Confirmed);

    let completed = service
        .update_appointment(&admin, checked.appointment.id, status_update("completed"))
        .await
        .unwrap();
    assert_eq!(completed.appointment.status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_past_and_today_dates_are_rejected() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;

    for offset in [0, -1, -30] {
        let result = service
            .create_appointment(&jane, booking(&haircut, days_from_today(offset), "10:00"))
            .await;
        match result {
            Err(err @ SalonError::PastAppointmentDate) => {
                assert_eq!(err.to_string(), "Appointment date must be in the future")
            }
            other => panic!("expected past date error for {offset}, got {:?}", other.map(|v| v.appointment)),
        }
    }

    // Timestamps count by their UTC calendar day, so late today is still today.
    let late_today = AppointmentInput {
        date: format!("{}T23:59:59Z", days_from_today(0)),
        ..booking(&haircut, days_from_today(0), "10:00")
    };
    let result = service.create_appointment(&jane, late_today).await;
    assert!(matches!(result, Err(SalonError::PastAppointmentDate)));
}

#[tokio::test]
async fn test_unknown_service_id_is_rejected() {
    let (service, _storage) = create_test_service_with_storage();
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;

    let input = AppointmentInput {
        service: "Mystery Treatment".to_string(),
        service_id: Some(uuid::Uuid::new_v4().to_string()),
        date: days_from_today(5).to_string(),
        time: "12:00".to_string(),
        notes: None,
    };
    match service.create_appointment(&jane, input).await {
        Err(err @ SalonError::UnknownService(_)) => assert_eq!(err.to_string(), "Service not found"),
        other => panic!("expected unknown service, got {:?}", other.map(|v| v.appointment)),
    }
}

#[tokio::test]
async fn test_booking_without_service_id_skips_the_slot_check() {
    let (service, _storage) = create_test_service_with_storage();
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let input = AppointmentInput {
        service: "Consultation".to_string(),
        service_id: None,
        date: days_from_today(5).to_string(),
        time: "12:00".to_string(),
        notes: Some("  first visit  ".to_string()),
    };

    let first = service.create_appointment(&jane, input.clone()).await.unwrap();
    assert_eq!(first.appointment.duration, 60);
    assert_eq!(first.appointment.price, 0.0);
    assert_eq!(first.appointment.notes.as_deref(), Some("first visit"));
    assert!(first.service_details.is_none());
    assert_eq!(first.appointment.user_name, "Jane Doe");

    service.create_appointment(&jane, input).await.unwrap();
}

#[tokio::test]
async fn test_invalid_booking_fields_are_reported() {
    let (service, _storage) = create_test_service_with_storage();
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let input = AppointmentInput {
        service: "H".to_string(),
        service_id: Some("not-a-uuid".to_string()),
        date: "next tuesday".to_string(),
        time: "25:00".to_string(),
        notes: Some("x".repeat(501)),
    };

    match service.create_appointment(&jane, input).await {
        Err(SalonError::Validation(errors)) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["service", "serviceId", "date", "time", "notes"]);
        }
        other => panic!("expected validation error, got {:?}", other.map(|v| v.appointment)),
    }
}

#[tokio::test]
async fn test_only_admin_changes_status() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let booked = service
        .create_appointment(&jane, booking(&haircut, days_from_today(3), "10:00"))
        .await
        .unwrap();

    let own_change = service
        .update_appointment(&jane, booked.appointment.id, status_update("confirmed"))
        .await;
    match own_change {
        Err(err @ SalonError::StatusChangeForbidden) => {
            assert_eq!(err.to_string(), "Only admins can change appointment status")
        }
        other => panic!("expected forbidden, got {:?}", other.map(|v| v.appointment)),
    }

    let confirmed = service
        .update_appointment(&admin, booked.appointment.id, status_update("confirmed"))
        .await
        .unwrap();
    assert_eq!(confirmed.appointment.status, AppointmentStatus::Confirmed);

    let bad_status = service
        .update_appointment(&admin, booked.appointment.id, status_update("done"))
        .await;
    assert!(matches!(bad_status, Err(SalonError::Validation(_))));
}

#[tokio::test]
async fn test_owner_reschedules_but_others_cannot_touch() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let john = register_user(&service, "John Smith", "john@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let day = days_from_today(3);
    let janes = service
        .create_appointment(&jane, booking(&haircut, day, "10:00"))
        .await
        .unwrap();
    service
        .create_appointment(&john, booking(&haircut, day, "12:00"))
        .await
        .unwrap();

    let moved = service
        .update_appointment(
            &jane,
            janes.appointment.id,
            AppointmentUpdate {
                time: Some("10:30".to_string()),
                notes: Some("running late".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.appointment.time.to_string(), "10:30");
    assert_eq!(moved.end_time.to_string(), "11:30");

    let into_johns_slot = service
        .update_appointment(
            &jane,
            janes.appointment.id,
            AppointmentUpdate {
                time: Some("11:30".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(into_johns_slot, Err(SalonError::SlotUnavailable)));

    let peek = service.get_appointment(&john, janes.appointment.id).await;
    assert!(matches!(peek, Err(SalonError::NotAuthorized(_))));
    let edit = service
        .update_appointment(&john, janes.appointment.id, AppointmentUpdate::default())
        .await;
    assert!(matches!(edit, Err(SalonError::NotAuthorized(_))));
    let delete = service.delete_appointment(&john, janes.appointment.id).await;
    match delete {
        Err(err @ SalonError::NotAuthorized(_)) => {
            assert_eq!(err.to_string(), "Not authorized to delete this appointment")
        }
        other => panic!("expected forbidden, got {:?}", other),
    }

    service.delete_appointment(&jane, janes.appointment.id).await.unwrap();
    let gone = service.get_appointment(&admin, janes.appointment.id).await;
    assert!(matches!(gone, Err(SalonError::AppointmentNotFound(_))));
}

#[tokio::test]
async fn test_moving_to_a_past_date_is_rejected() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let booked = service
        .create_appointment(&jane, booking(&haircut, days_from_today(3), "10:00"))
        .await
        .unwrap();

    let result = service
        .update_appointment(
            &jane,
            booked.appointment.id,
            AppointmentUpdate {
                date: Some(days_from_today(-1).to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(SalonError::PastAppointmentDate)));
}

#[tokio::test]
async fn test_listings_are_in_calendar_order_and_scoped() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let john = register_user(&service, "John Smith", "john@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 30.0).await;

    service
        .create_appointment(&jane, booking(&haircut, days_from_today(4), "09:00"))
        .await
        .unwrap();
    service
        .create_appointment(&jane, booking(&haircut, days_from_today(2), "15:00"))
        .await
        .unwrap();
    service
        .create_appointment(&john, booking(&haircut, days_from_today(2), "09:30"))
        .await
        .unwrap();

    let all = service
        .list_appointments(&admin, &AppointmentFilter::default(), PageRequest::new(None, None, 10))
        .await
        .unwrap();
    let order: Vec<String> = all
        .items
        .iter()
        .map(|v| format!("{} {}", v.appointment.date, v.appointment.time))
        .collect();
    assert_eq!(
        order,
        vec![
            format!("{} 09:30", days_from_today(2)),
            format!("{} 15:00", days_from_today(2)),
            format!("{} 09:00", days_from_today(4)),
        ]
    );

    let janes = service
        .user_appointments(&jane, jane.id, AppointmentFilter::default(), PageRequest::new(None, None, 10))
        .await
        .unwrap();
    assert_eq!(janes.pagination.total, 2);
    assert!(janes.items.iter().all(|v| v.appointment.user_id == jane.id));

    let snooping = service
        .user_appointments(&john, jane.id, AppointmentFilter::default(), PageRequest::new(None, None, 10))
        .await;
    assert!(matches!(snooping, Err(SalonError::NotAuthorized(_))));

    let not_admin = service
        .list_appointments(&jane, &AppointmentFilter::default(), PageRequest::new(None, None, 10))
        .await;
    assert!(matches!(not_admin, Err(SalonError::RoleNotAuthorized(_))));
}

#[tokio::test]
async fn test_appointment_stats_count_revenue_from_completed() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let jane = register_user(&service, "Jane Doe", "jane@example.com").await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let day = days_from_today(1);

    let first = service
        .create_appointment(&jane, booking(&haircut, day, "09:00"))
        .await
        .unwrap();
    let second = service
        .create_appointment(&jane, booking(&haircut, day, "11:00"))
        .await
        .unwrap();
    service
        .create_appointment(&jane, booking(&haircut, days_from_today(20), "11:00"))
        .await
        .unwrap();
    service
        .update_appointment(&admin, first.appointment.id, status_update("completed"))
        .await
        .unwrap();
    service
        .update_appointment(&admin, second.appointment.id, status_update("cancelled"))
        .await
        .unwrap();

    let stats = service.appointment_stats(&admin).await.unwrap();
    assert_eq!(stats.total_appointments, 3);
    assert_eq!(stats.pending_appointments, 1);
    assert_eq!(stats.completed_appointments, 1);
    assert_eq!(stats.cancelled_appointments, 1);
    assert_eq!(stats.confirmed_appointments, 0);
    assert_eq!(stats.today_appointments, 0);
    assert_eq!(stats.weekly_appointments, 3);
    assert_eq!(stats.total_revenue, 45.0);
    assert_eq!(stats.avg_appointment_value, 45.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_one_slot_admit_exactly_one() {
    let (service, storage) = create_test_service_with_storage();
    let admin = create_admin(&storage).await;
    let haircut = create_catalog_service(&service, &admin, "Haircut", 60.0).await;
    let mut customers = Vec::new();
    for i in 0..8 {
        customers.push(register_user(&service, &format!("Customer {i}"), &format!("customer{i}@example.com")).await);
    }
    let service = Arc::new(service);
    let day = days_from_today(6);

    let attempts = customers.into_iter().map(|customer| {
        let service = Arc::clone(&service);
        let input = booking(&haircut, day, "10:00");
        tokio::spawn(async move { service.create_appointment(&customer, input).await })
    });
    let results = futures::future::join_all(attempts).await;

    let booked = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(SalonError::SlotUnavailable))))
        .count();
    assert_eq!(booked, 1);
    assert_eq!(rejected, 7);
}
