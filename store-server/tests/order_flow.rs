//! Order placement workflow tests
//!
//! Covers the transactional invariants: frozen totals, non-negative stock,
//! all-or-nothing placement, and per-line progressive stock within one
//! request.

mod common;

use common::{memory_pool, seed_customer, seed_product};
use shared::models::{OrderCreate, OrderItemCreate, OrderStatus, ProductUpdate};
use store_server::db::repository::{order, product, RepoError};

fn request(customer_id: i64, items: Vec<(i64, i64)>) -> OrderCreate {
    OrderCreate {
        customer_id,
        items: items
            .into_iter()
            .map(|(product_id, quantity)| OrderItemCreate {
                product_id,
                quantity,
            })
            .collect(),
    }
}

#[tokio::test]
async fn order_total_is_sum_of_snapshot_prices() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;
    let pants = seed_product(&pool, "Pantalón", 49.99, 10).await;

    let order = order::create(
        &pool,
        request(customer.id, vec![(shirt.id, 3), (pants.id, 2)]),
    )
    .await
    .unwrap();

    assert_eq!(order.total, 399.98);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].price, 100.0);
    assert_eq!(order.items[1].price, 49.99);

    // Stock was decremented
    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 7);
}

#[tokio::test]
async fn item_price_is_frozen_against_later_price_changes() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 5).await;

    let placed = order::create(&pool, request(customer.id, vec![(shirt.id, 1)]))
        .await
        .unwrap();

    // Reprice the product after the order exists
    product::update(
        &pool,
        shirt.id,
        ProductUpdate {
            price: Some(150.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let fetched = order::find_by_id(&pool, placed.id).await.unwrap().unwrap();
    assert_eq!(fetched.total, 100.0);
    assert_eq!(fetched.items[0].price, 100.0);
}

#[tokio::test]
async fn overselling_fails_and_leaves_stock_unchanged() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 5).await;

    // Stock 5: ordering 3 works, ordering 3 again fails at the remaining 2
    let first = order::create(&pool, request(customer.id, vec![(shirt.id, 3)]))
        .await
        .unwrap();
    assert_eq!(first.total, 300.0);

    let after_first = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(after_first.stock, 2);

    let err = order::create(&pool, request(customer.id, vec![(shirt.id, 3)]))
        .await
        .unwrap_err();
    match err {
        RepoError::InsufficientStock(name) => assert_eq!(name, "Remera"),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let after_second = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(after_second.stock, 2);
}

#[tokio::test]
async fn failing_line_rolls_back_earlier_lines() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;
    let scarce = seed_product(&pool, "Bufanda", 20.0, 1).await;

    let err = order::create(
        &pool,
        request(customer.id, vec![(shirt.id, 4), (scarce.id, 2)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    // The first line's decrement was rolled back
    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 10);
    let scarce = product::find_by_id(&pool, scarce.id).await.unwrap().unwrap();
    assert_eq!(scarce.stock, 1);

    // And no order rows exist
    let orders = order::find_all(&pool).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn same_product_twice_sees_progressively_decremented_stock() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 5).await;

    // 3 + 3 > 5: the second line must fail even though each line alone fits
    let err = order::create(
        &pool,
        request(customer.id, vec![(shirt.id, 3), (shirt.id, 3)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 5);

    // 3 + 2 exactly drains it
    let order = order::create(
        &pool,
        request(customer.id, vec![(shirt.id, 3), (shirt.id, 2)]),
    )
    .await
    .unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, 500.0);

    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 0);
}

#[tokio::test]
async fn missing_product_fails_the_whole_order() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;

    let err = order::create(
        &pool,
        request(customer.id, vec![(shirt.id, 1), (424242, 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 10);
}

#[tokio::test]
async fn unknown_customer_is_rejected_before_stock_is_touched() {
    let pool = memory_pool().await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;

    let err = order::create(&pool, request(99999, vec![(shirt.id, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let shirt = product::find_by_id(&pool, shirt.id).await.unwrap().unwrap();
    assert_eq!(shirt.stock, 10);
}

#[tokio::test]
async fn zero_or_negative_quantity_is_rejected() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;

    for quantity in [0, -3] {
        let err = order::create(&pool, request(customer.id, vec![(shirt.id, quantity)]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}

#[tokio::test]
async fn orders_nest_customer_items_and_products() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;

    let placed = order::create(&pool, request(customer.id, vec![(shirt.id, 2)]))
        .await
        .unwrap();

    let fetched = order::find_by_id(&pool, placed.id).await.unwrap().unwrap();
    assert_eq!(fetched.customer.as_ref().unwrap().email, "ana@example.com");
    assert_eq!(fetched.items.len(), 1);
    let product = fetched.items[0].product.as_ref().unwrap();
    assert_eq!(product.name, "Remera");
    assert_eq!(product.sizes, vec!["0-3m".to_string(), "3-6m".to_string()]);
}

#[tokio::test]
async fn status_is_the_only_mutable_field() {
    let pool = memory_pool().await;
    let customer = seed_customer(&pool, "ana@example.com").await;
    let shirt = seed_product(&pool, "Remera", 100.0, 10).await;

    let placed = order::create(&pool, request(customer.id, vec![(shirt.id, 1)]))
        .await
        .unwrap();

    let updated = order::update_status(&pool, placed.id, OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.total, placed.total);

    let err = order::update_status(&pool, 123456, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
