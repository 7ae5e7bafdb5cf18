//! Shared test setup: in-memory database + app state

// Not every test file uses every helper
#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use store_server::core::{AppState, Config};
use store_server::ImageStore;

/// In-memory SQLite pool with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    store_server::db::MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// App state over an in-memory database. The image store points at a dummy
/// bucket — tests never exercise an actual upload.
pub async fn test_state() -> AppState {
    let pool = memory_pool().await;
    let config = Config {
        database_path: ":memory:".into(),
        http_port: 0,
        environment: "development".into(),
        storage_bucket: "test-bucket".into(),
        storage_public_base_url: "https://cdn.example.test".into(),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let images = ImageStore::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.storage_bucket.clone(),
        config.storage_public_base_url.clone(),
    );

    AppState::new(config, pool, images)
}

/// Insert a customer and return it
pub async fn seed_customer(pool: &SqlitePool, email: &str) -> shared::models::Customer {
    store_server::db::repository::customer::create(
        pool,
        shared::models::CustomerCreate {
            name: "Ana Pérez".into(),
            email: email.into(),
            phone: "+54 11 5555-0000".into(),
            address: "Av. Siempreviva 742".into(),
            city: "Buenos Aires".into(),
            state: "CABA".into(),
            zip_code: "C1414".into(),
            country: "Argentina".into(),
            notes: None,
        },
    )
    .await
    .unwrap()
}

/// Insert a product and return it
pub async fn seed_product(
    pool: &SqlitePool,
    name: &str,
    price: f64,
    stock: i64,
) -> shared::models::Product {
    store_server::db::repository::product::create(
        pool,
        shared::models::ProductCreate {
            name: name.into(),
            description: Some("test product".into()),
            price,
            stock,
            sizes: vec!["0-3m".into(), "3-6m".into()],
            image: None,
            category_id: None,
        },
    )
    .await
    .unwrap()
}
