//! Order Repository
//!
//! Order placement runs inside a single transaction: stock is validated and
//! decremented per line, unit prices are snapshotted onto the items, and the
//! order row plus its items are inserted together. Any failure drops the
//! transaction handle, which rolls everything back.

use super::{RepoError, RepoResult, product};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{Customer, Order, OrderCreate, OrderItem, OrderStatus, Product};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use std::collections::HashMap;

const ORDER_SELECT: &str = "SELECT id, customer_id, total, status, created_at FROM orders";

/// Place an order: validate stock, decrement it, snapshot prices, persist
/// order + items — all or nothing.
///
/// Lines are processed strictly in request order. Two lines for the same
/// product each see the stock value left by the previous line, so a request
/// that collectively oversells fails on the later line and the whole order
/// rolls back.
pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    if data.items.is_empty() {
        return Err(RepoError::Validation("Order has no items".into()));
    }
    for line in &data.items {
        if line.quantity <= 0 {
            return Err(RepoError::Validation(format!(
                "Quantity must be positive for product {}",
                line.product_id
            )));
        }
    }

    let mut tx = pool.begin().await?;

    let customer_id: Option<i64> = sqlx::query_scalar("SELECT id FROM customer WHERE id = ?")
        .bind(data.customer_id)
        .fetch_optional(&mut *tx)
        .await?;
    if customer_id.is_none() {
        return Err(RepoError::NotFound(format!(
            "Customer {} not found",
            data.customer_id
        )));
    }

    let now = now_millis();
    let order_id = snowflake_id();
    let mut total = Decimal::ZERO;
    let mut items: Vec<OrderItem> = Vec::with_capacity(data.items.len());

    for line in &data.items {
        // Read inside the transaction so the decremented value from an
        // earlier line of this same request is visible here
        let row: Option<(String, f64, i64)> =
            sqlx::query_as("SELECT name, price, stock FROM product WHERE id = ?")
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (name, price, stock) = match row {
            Some(row) => row,
            // A missing product fails the same way a short one does,
            // identified by the only handle we have for it
            None => return Err(RepoError::InsufficientStock(line.product_id.to_string())),
        };

        if stock < line.quantity {
            return Err(RepoError::InsufficientStock(name));
        }

        sqlx::query("UPDATE product SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3")
            .bind(line.quantity)
            .bind(now)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

        let unit = Decimal::from_f64(price)
            .ok_or_else(|| RepoError::Validation(format!("Product '{name}' has invalid price")))?;
        total += unit * Decimal::from(line.quantity);

        items.push(OrderItem {
            id: snowflake_id(),
            order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            price,
            product: None,
        });
    }

    let total = total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .ok_or_else(|| RepoError::Validation("Order total out of range".into()))?;

    sqlx::query(
        "INSERT INTO orders (id, customer_id, total, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(order_id)
    .bind(data.customer_id)
    .bind(total)
    .bind(OrderStatus::Pending)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &items {
        sqlx::query(
            "INSERT INTO order_item (id, order_id, product_id, quantity, price) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Order {
        id: order_id,
        customer_id: data.customer_id,
        total,
        status: OrderStatus::Pending,
        created_at: now,
        customer: None,
        items,
    })
}

/// Find all orders with customer, items and item products attached
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let mut orders: Vec<Order> =
        sqlx::query_as(&format!("{ORDER_SELECT} ORDER BY created_at DESC"))
            .fetch_all(pool)
            .await?;
    attach_relations(pool, &mut orders).await?;
    Ok(orders)
}

/// Find order by id with customer, items and item products attached
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order: Option<Order> = sqlx::query_as(&format!("{ORDER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(order) = order else {
        return Ok(None);
    };

    let mut orders = vec![order];
    attach_relations(pool, &mut orders).await?;
    Ok(orders.pop())
}

/// Transition an order's status — the only mutation orders accept
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Attach customers, items, and item products to a batch of orders
/// (three grouped queries, no N+1)
async fn attach_relations(pool: &SqlitePool, orders: &mut [Order]) -> RepoResult<()> {
    if orders.is_empty() {
        return Ok(());
    }

    // Customers
    let customer_ids = unique_ids(orders.iter().map(|o| o.customer_id));
    let sql = format!(
        "SELECT id, name, email, phone, address, city, state, zip_code, country, notes, \
         created_at, updated_at FROM customer WHERE id IN ({})",
        super::sql_placeholders(customer_ids.len())
    );
    let mut query = sqlx::query_as::<_, Customer>(&sql);
    for id in &customer_ids {
        query = query.bind(id);
    }
    let customers: Vec<Customer> = query.fetch_all(pool).await?;
    let customers: HashMap<i64, Customer> = customers.into_iter().map(|c| (c.id, c)).collect();

    // Items
    let order_ids = unique_ids(orders.iter().map(|o| o.id));
    let sql = format!(
        "SELECT id, order_id, product_id, quantity, price FROM order_item \
         WHERE order_id IN ({}) ORDER BY id",
        super::sql_placeholders(order_ids.len())
    );
    let mut query = sqlx::query_as::<_, OrderItem>(&sql);
    for id in &order_ids {
        query = query.bind(id);
    }
    let mut items: Vec<OrderItem> = query.fetch_all(pool).await?;

    // Item products
    let product_ids = unique_ids(items.iter().map(|i| i.product_id));
    if !product_ids.is_empty() {
        let sql = format!(
            "SELECT id, name, description, price, stock, sizes, image, category_id, \
             created_at, updated_at FROM product WHERE id IN ({})",
            super::sql_placeholders(product_ids.len())
        );
        let mut query = sqlx::query_as::<_, product::ProductRow>(&sql);
        for id in &product_ids {
            query = query.bind(id);
        }
        let products: Vec<Product> = query
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(product::ProductRow::into_product)
            .collect();
        let products: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();
        for item in items.iter_mut() {
            item.product = products.get(&item.product_id).cloned();
        }
    }

    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    for order in orders.iter_mut() {
        order.customer = customers.get(&order.customer_id).cloned();
        order.items = items_by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(())
}

fn unique_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
