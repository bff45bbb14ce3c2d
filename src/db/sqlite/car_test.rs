//! Tests for SqliteCarRepository.

use crate::db::{Car, Database, DbError, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_car(id: &str, reg: &str) -> Car {
    Car {
        id: id.to_string(),
        reg: reg.to_string(),
        make: Some("Ford".to_string()),
        model: Some("Focus".to_string()),
        paint_code: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn car_create_and_get_by_reg() {
    let db = setup_db().await;
    let cars = db.cars();

    cars.create(&make_car("car00001", "AB12CDE"))
        .await
        .expect("Create should succeed");

    let retrieved = cars.get_by_reg("AB12CDE").await.expect("Get should succeed");
    assert_eq!(retrieved.id, "car00001");
    assert_eq!(retrieved.reg, "AB12CDE");
    assert_eq!(retrieved.make, Some("Ford".to_string()));
    assert_eq!(retrieved.paint_code, None);
    assert!(!retrieved.created_at.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn car_create_generates_id_when_empty() {
    let db = setup_db().await;

    let created = db
        .cars()
        .create(&make_car("", "CD34EFG"))
        .await
        .expect("Create should succeed");

    assert_eq!(created.id.len(), 8);
}

#[tokio::test(flavor = "multi_thread")]
async fn car_duplicate_reg_is_already_exists() {
    let db = setup_db().await;
    let cars = db.cars();

    cars.create(&make_car("car00001", "AB12CDE")).await.unwrap();
    let result = cars.create(&make_car("car00002", "AB12CDE")).await;

    assert!(matches!(result, Err(DbError::AlreadyExists { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn car_get_unknown_reg_is_not_found() {
    let db = setup_db().await;

    let result = db.cars().get_by_reg("ZZ99ZZZ").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn car_update_paint_code_persists() {
    let db = setup_db().await;
    let cars = db.cars();

    cars.create(&make_car("car00001", "AB12CDE")).await.unwrap();

    let updated = cars
        .update_paint_code("AB12CDE", Some("PN4CV"))
        .await
        .expect("Update should succeed");
    assert_eq!(updated.paint_code, Some("PN4CV".to_string()));

    let read_back = cars.get_by_reg("AB12CDE").await.unwrap();
    assert_eq!(read_back.paint_code, Some("PN4CV".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn car_update_paint_code_clears_with_none() {
    let db = setup_db().await;
    let cars = db.cars();

    let mut car = make_car("car00001", "AB12CDE");
    car.paint_code = Some("PN4CV".to_string());
    cars.create(&car).await.unwrap();

    cars.update_paint_code("AB12CDE", None)
        .await
        .expect("Update should succeed");

    let read_back = cars.get_by_reg("AB12CDE").await.unwrap();
    assert_eq!(read_back.paint_code, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn car_update_unknown_reg_is_not_found() {
    let db = setup_db().await;

    let result = db.cars().update_paint_code("ZZ99ZZZ", Some("PN4CV")).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn car_list_orders_by_reg() {
    let db = setup_db().await;
    let cars = db.cars();

    cars.create(&make_car("car00002", "CD34EFG")).await.unwrap();
    cars.create(&make_car("car00001", "AB12CDE")).await.unwrap();

    let all = cars.list().await.expect("List should succeed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].reg, "AB12CDE");
    assert_eq!(all[1].reg, "CD34EFG");
}
