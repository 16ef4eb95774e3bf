use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;

async fn setup_pool() -> (SqlitePool, NamedTempFile) {
    let temp_db = NamedTempFile::new().unwrap();
    let db_url = format!("sqlite:{}", temp_db.path().display());
    let pool = SqlitePoolOptions::new().max_connections(1).connect(&db_url).await.unwrap();
    db::init_db(&pool).await.unwrap();
    (pool, temp_db)
}

async fn insert_category(pool: &SqlitePool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO categories (id, name) VALUES (?1, ?2)")
        .bind(id.to_string())
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

async fn insert_supplier(pool: &SqlitePool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO suppliers (id, name) VALUES (?1, ?2)")
        .bind(id.to_string())
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

async fn insert_product(pool: &SqlitePool, reference: &str, category: Uuid, supplier: Uuid) -> sqlx::Result<()> {
    sqlx::query(
        r#"INSERT INTO products
           (id, reference, name, added_date, status, price, stock_city, quantity, category_id, supplier_id)
           VALUES (?1, ?2, 'Test', '2024-01-01', 'Available', 1.0, 'Berlin', 1, ?3, ?4)"#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(reference)
    .bind(category.to_string())
    .bind(supplier.to_string())
    .execute(pool)
    .await
    .map(|_| ())
}

#[tokio::test]
async fn test_init_db_is_idempotent() {
    let (pool, _db) = setup_pool().await;
    // A second run must not fail on existing tables/indexes
    db::init_db(&pool).await.unwrap();

    for table in ["categories", "suppliers", "products"] {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        sqlx::query(&sql).fetch_one(&pool).await.unwrap();
    }
}

#[tokio::test]
async fn test_duplicate_reference_violates_unique_constraint() {
    let (pool, _db) = setup_pool().await;
    let category = insert_category(&pool, "Books").await;
    let supplier = insert_supplier(&pool, "Acme").await;

    insert_product(&pool, "REF-1", category, supplier).await.unwrap();
    let err = insert_product(&pool, "REF-1", category, supplier).await.unwrap_err();

    match AppError::from(err) {
        AppError::Conflict(msg) => assert!(msg.contains("UNIQUE")),
        other => panic!("expected Conflict, got {}", other),
    }
}

#[tokio::test]
async fn test_duplicate_supplier_name_violates_unique_constraint() {
    let (pool, _db) = setup_pool().await;
    insert_supplier(&pool, "Acme").await;

    let err = sqlx::query("INSERT INTO suppliers (id, name) VALUES (?1, 'Acme')")
        .bind(Uuid::new_v4().to_string())
        .execute(&pool)
        .await
        .unwrap_err();
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_product_requires_existing_category_and_supplier() {
    let (pool, _db) = setup_pool().await;
    let supplier = insert_supplier(&pool, "Acme").await;

    let err = insert_product(&pool, "REF-FK", Uuid::new_v4(), supplier).await.unwrap_err();
    match AppError::from(err) {
        AppError::BadRequest(msg) => assert!(msg.contains("FOREIGN KEY")),
        other => panic!("expected BadRequest, got {}", other),
    }
}
