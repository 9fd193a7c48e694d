//! Zone soft-delete/restore and slot status scenarios against a real store

mod common;

use chrono::NaiveTime;
use parking_server::AppError;
use parking_server::auth::CurrentUser;
use parking_server::services::{SlotService, ZoneService};
use shared::models::{Role, SlotCreate, SlotStatus, SlotUpdate, ZoneCreate, ZoneUpdate};

fn north_annex() -> ZoneCreate {
    ZoneCreate {
        name: "North Annex".to_string(),
        description: None,
    }
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[tokio::test]
async fn north_annex_delete_and_restore() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);

    let zone = zones.create_zone(north_annex()).await.unwrap();
    assert!(!zone.is_deleted);
    assert_eq!(zone.description, "");

    let listed = zones.list_zones(false).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "North Annex");
    assert!(!listed[0].is_deleted);

    let deleted = zones.soft_delete_zone(&zone.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert!(zones.list_zones(false).await.unwrap().is_empty());

    let all = zones.list_zones(true).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_deleted);
    assert_eq!(zones.list_deleted_zones().await.unwrap().len(), 1);

    let restored = zones.restore_zone(&zone.id).await.unwrap();
    assert!(!restored.is_deleted);
    let listed = zones.list_zones(false).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "North Annex");
    assert!(zones.list_deleted_zones().await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_delete_and_restore_are_idempotent() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);
    let zone = zones.create_zone(north_annex()).await.unwrap();

    zones.soft_delete_zone(&zone.id).await.unwrap();
    let again = zones.soft_delete_zone(&zone.id).await.unwrap();
    assert!(again.is_deleted);

    zones.restore_zone(&zone.id).await.unwrap();
    let again = zones.restore_zone(&zone.id).await.unwrap();
    assert!(!again.is_deleted);
    assert_eq!(again.name, zone.name);
}

#[tokio::test]
async fn zone_delete_does_not_cascade_to_slots() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);
    let slots = SlotService::new(&server.state);

    let zone = zones.create_zone(north_annex()).await.unwrap();
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id.clone(),
        })
        .await
        .unwrap();

    zones.soft_delete_zone(&zone.id).await.unwrap();

    let still_there = slots.get_slot(&slot.id).await.unwrap();
    assert_eq!(still_there.zone, zone.id);
    assert_eq!(zones.list_zone_slots(&zone.id).await.unwrap().len(), 1);
    assert_eq!(slots.list_slots(Some(&zone.id)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rename_zone_keeps_untouched_fields() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);
    let zone = zones
        .create_zone(ZoneCreate {
            name: "Lot B".to_string(),
            description: Some("Behind the library".to_string()),
        })
        .await
        .unwrap();

    let renamed = zones
        .update_zone(
            &zone.id,
            ZoneUpdate {
                name: Some("  Lot B East ".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Lot B East");
    assert_eq!(renamed.description, "Behind the library");
}

#[tokio::test]
async fn missing_zone_is_not_found() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);
    let slots = SlotService::new(&server.state);

    assert!(matches!(
        zones.soft_delete_zone("zone:nope").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        zones
            .update_zone("nope", ZoneUpdate::default())
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        slots
            .create_slot(SlotCreate {
                number: "A-1".to_string(),
                zone: "zone:nope".to_string(),
            })
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        slots.delete_slot("slot:nope").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn blank_zone_name_is_rejected() {
    let server = common::test_server().await;
    let zones = ZoneService::new(&server.state);
    let result = zones
        .create_zone(ZoneCreate {
            name: "   ".to_string(),
            description: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn every_status_reads_back() {
    let server = common::test_server().await;
    let zone = ZoneService::new(&server.state)
        .create_zone(north_annex())
        .await
        .unwrap();
    let slots = SlotService::new(&server.state);
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(slot.status, SlotStatus::Available);

    // Any status may follow any other
    for status in [
        SlotStatus::Maintenance,
        SlotStatus::Occupied,
        SlotStatus::Reserved,
        SlotStatus::Available,
        SlotStatus::Occupied,
    ] {
        let updated = slots
            .update_slot(
                &slot.id,
                SlotUpdate {
                    number: None,
                    status: Some(status),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, status);
        assert!(updated.updated_at >= slot.updated_at);
        assert_eq!(slots.get_slot(&slot.id).await.unwrap().status, status);
    }
}

#[tokio::test]
async fn slot_delete_is_permanent() {
    let server = common::test_server().await;
    let zone = ZoneService::new(&server.state)
        .create_zone(north_annex())
        .await
        .unwrap();
    let slots = SlotService::new(&server.state);
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id,
        })
        .await
        .unwrap();

    slots.delete_slot(&slot.id).await.unwrap();
    assert!(matches!(
        slots.get_slot(&slot.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        slots.delete_slot(&slot.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn reservation_respects_window_and_availability() {
    let server = common::test_server().await;
    let student = server.register("Sam", Role::Student).await;
    let student = CurrentUser {
        id: student.id,
        role: Role::Student,
    };
    let zone = ZoneService::new(&server.state)
        .create_zone(north_annex())
        .await
        .unwrap();
    let slots = SlotService::new(&server.state);
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id,
        })
        .await
        .unwrap();

    match slots.reserve_slot_at(&slot.id, &student, at(8, 44)).await {
        Err(AppError::ReservationClosed(msg)) => assert_eq!(msg, "OPENS AT 08:45 AM"),
        other => panic!("expected ReservationClosed, got {other:?}"),
    }
    match slots.reserve_slot_at(&slot.id, &student, at(16, 30)).await {
        Err(AppError::ReservationClosed(msg)) => assert_eq!(msg, "CLOSED FOR TODAY"),
        other => panic!("expected ReservationClosed, got {other:?}"),
    }

    let reserved = slots
        .reserve_slot_at(&slot.id, &student, at(8, 45))
        .await
        .unwrap();
    assert_eq!(reserved.status, SlotStatus::Reserved);
    assert_eq!(reserved.assigned_to.as_deref(), Some(student.id.as_str()));

    // Already taken
    assert!(matches!(
        slots.reserve_slot_at(&slot.id, &student, at(12, 0)).await,
        Err(AppError::Validation(_))
    ));

    // Freeing the slot clears the assignee
    let freed = slots
        .update_slot(
            &slot.id,
            SlotUpdate {
                number: None,
                status: Some(SlotStatus::Available),
            },
        )
        .await
        .unwrap();
    assert_eq!(freed.assigned_to, None);
}

#[tokio::test]
async fn admins_cannot_reserve() {
    let server = common::test_server().await;
    let admin = server.admin("Ada").await;
    let admin = CurrentUser {
        id: admin.id,
        role: Role::Admin,
    };
    let slots = SlotService::new(&server.state);
    assert!(matches!(
        slots.reserve_slot_at("slot:any", &admin, at(10, 0)).await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn renumber_and_free_in_one_update() {
    let server = common::test_server().await;
    let student = server.register("Sam", Role::Student).await;
    let student = CurrentUser {
        id: student.id,
        role: Role::Student,
    };
    let zone = ZoneService::new(&server.state)
        .create_zone(north_annex())
        .await
        .unwrap();
    let slots = SlotService::new(&server.state);
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id,
        })
        .await
        .unwrap();
    slots
        .reserve_slot_at(&slot.id, &student, at(9, 0))
        .await
        .unwrap();

    // A bad number rejects the whole request
    assert!(matches!(
        slots
            .update_slot(
                &slot.id,
                SlotUpdate {
                    number: Some("   ".to_string()),
                    status: Some(SlotStatus::Available),
                },
            )
            .await,
        Err(AppError::Validation(_))
    ));
    let stored = slots.get_slot(&slot.id).await.unwrap();
    assert_eq!(stored.number, "A-7");
    assert_eq!(stored.status, SlotStatus::Reserved);

    let updated = slots
        .update_slot(
            &slot.id,
            SlotUpdate {
                number: Some(" A-8 ".to_string()),
                status: Some(SlotStatus::Available),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.number, "A-8");
    assert_eq!(updated.status, SlotStatus::Available);
    assert_eq!(updated.assigned_to, None);
    assert_eq!(slots.get_slot(&slot.id).await.unwrap(), updated);
}

#[tokio::test]
async fn rename_keeps_status_and_assignee() {
    let server = common::test_server().await;
    let student = server.register("Sam", Role::Student).await;
    let student = CurrentUser {
        id: student.id,
        role: Role::Student,
    };
    let zone = ZoneService::new(&server.state)
        .create_zone(north_annex())
        .await
        .unwrap();
    let slots = SlotService::new(&server.state);
    let slot = slots
        .create_slot(SlotCreate {
            number: "A-7".to_string(),
            zone: zone.id,
        })
        .await
        .unwrap();
    slots
        .reserve_slot_at(&slot.id, &student, at(9, 0))
        .await
        .unwrap();

    let renamed = slots
        .update_slot(
            &slot.id,
            SlotUpdate {
                number: Some("B-1".to_string()),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.number, "B-1");
    assert_eq!(renamed.status, SlotStatus::Reserved);
    assert_eq!(renamed.assigned_to.as_deref(), Some(student.id.as_str()));
}
