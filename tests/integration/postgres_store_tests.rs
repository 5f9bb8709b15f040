//! Store tests against a real PostgreSQL database
//!
//! Expects `DATABASE_URL` to point at a database the test user may migrate.
//! Run with: cargo test --test postgres_store_tests -- --ignored

use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use equipment_server::{
    models::{
        equipment::{CreateEquipment, EquipmentItem, Transition},
        EquipmentCategory, EquipmentStatus, ScanAction,
    },
    repository::Repository,
};

async fn connect() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Repository::new(pool)
}

/// Barcodes are unique per run so reruns against the same database don't collide
async fn insert_camera(repo: &Repository) -> EquipmentItem {
    repo.equipment
        .insert(&CreateEquipment {
            name: "Sony FX3".to_string(),
            barcode: format!("CAM-{}", Uuid::new_v4()),
            category: EquipmentCategory::Camera,
        })
        .await
        .expect("Failed to insert equipment")
}

fn scan(item: &EquipmentItem, action: ScanAction, expected: EquipmentStatus, user: &str) -> Transition {
    Transition {
        equipment_id: item.id,
        barcode: item.barcode.clone(),
        action,
        expected_status: expected,
        user_name: user.to_string(),
        at: Utc::now(),
    }
}

#[tokio::test]
#[ignore]
async fn checkout_then_return_writes_item_and_log_together() {
    let repo = connect().await;
    let item = insert_camera(&repo).await;

    let (checked_out, log) = repo
        .equipment
        .transition(&scan(&item, ScanAction::Checkout, EquipmentStatus::Available, "Ana"))
        .await
        .unwrap()
        .expect("checkout should apply");
    assert_eq!(checked_out.status, EquipmentStatus::CheckedOut);
    assert_eq!(checked_out.checked_out_by.as_deref(), Some("Ana"));
    assert!(checked_out.checked_out_at.is_some());
    assert_eq!(log.action, ScanAction::Checkout);
    assert_eq!(log.equipment_id, item.id);

    let (returned, _) = repo
        .equipment
        .transition(&scan(&item, ScanAction::Return, EquipmentStatus::CheckedOut, "Ana"))
        .await
        .unwrap()
        .expect("return should apply");
    assert_eq!(returned.status, EquipmentStatus::Available);
    assert!(returned.checked_out_by.is_none());
    assert!(returned.checked_out_at.is_none());

    let history = repo.logs.list_for_equipment(item.id, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, ScanAction::Return);
    assert_eq!(history[1].action, ScanAction::Checkout);
    assert_eq!(history[0].equipment_name.as_deref(), Some("Sony FX3"));
}

#[tokio::test]
#[ignore]
async fn stale_expected_status_writes_nothing() {
    let repo = connect().await;
    let item = insert_camera(&repo).await;

    // The row is available, so a return expecting checked_out must not apply
    let stale = scan(&item, ScanAction::Return, EquipmentStatus::CheckedOut, "Luis");
    assert!(repo.equipment.transition(&stale).await.unwrap().is_none());

    let current = repo
        .equipment
        .find_by_barcode(&item.barcode)
        .await
        .unwrap()
        .expect("item should exist");
    assert_eq!(current.status, EquipmentStatus::Available);
    assert!(current.checked_out_by.is_none());
    assert!(repo.logs.list_for_equipment(item.id, 10).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn only_one_of_two_racing_checkouts_applies() {
    let repo = connect().await;
    let item = insert_camera(&repo).await;

    let first = scan(&item, ScanAction::Checkout, EquipmentStatus::Available, "Ana");
    let second = scan(&item, ScanAction::Checkout, EquipmentStatus::Available, "Luis");
    let (a, b) = tokio::join!(repo.equipment.transition(&first), repo.equipment.transition(&second));

    let applied = [a.unwrap(), b.unwrap()].into_iter().flatten().count();
    assert_eq!(applied, 1);
    assert_eq!(repo.logs.list_for_equipment(item.id, 10).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn duplicate_barcode_is_rejected() {
    let repo = connect().await;
    let item = insert_camera(&repo).await;

    let err = repo
        .equipment
        .insert(&CreateEquipment {
            name: "Another camera".to_string(),
            barcode: item.barcode.clone(),
            category: EquipmentCategory::Camera,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, equipment_server::AppError::Duplicate(_)));
}
