//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate, Order};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, name, email, phone, address, city, state, zip_code, \
     country, notes, created_at, updated_at FROM customer";

/// Find all customers (no order history on list views)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let customers: Vec<Customer> =
        sqlx::query_as(&format!("{CUSTOMER_SELECT} ORDER BY created_at DESC"))
            .fetch_all(pool)
            .await?;
    Ok(customers)
}

/// Find customer by id with order history attached
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let customer = find_bare_by_id(pool, id).await?;
    let Some(mut customer) = customer else {
        return Ok(None);
    };

    let orders: Vec<Order> = sqlx::query_as(
        "SELECT id, customer_id, total, status, created_at FROM orders \
         WHERE customer_id = ? ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    customer.orders = orders;
    Ok(Some(customer))
}

/// Find customer by id without relation fan-out
pub(crate) async fn find_bare_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let customer: Option<Customer> = sqlx::query_as(&format!("{CUSTOMER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(customer)
}

/// Find customer by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Customer>> {
    let customer: Option<Customer> = sqlx::query_as(&format!("{CUSTOMER_SELECT} WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(customer)
}

/// Create a new customer
pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    // Check duplicate email before inserting, so the caller gets a clear
    // message instead of a raw constraint failure
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{}' is already registered",
            data.email
        )));
    }

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO customer (id, name, email, phone, address, city, state, zip_code, country, notes, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.zip_code)
    .bind(&data.country)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;

    find_bare_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

/// Update a customer (partial merge)
pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    // Check duplicate email if changing
    if let Some(ref new_email) = data.email {
        if let Some(existing) = find_by_email(pool, new_email).await? {
            if existing.id != id {
                return Err(RepoError::Duplicate(format!(
                    "Email '{new_email}' is already registered"
                )));
            }
        }
    }

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET \
         name = COALESCE(?1, name), \
         email = COALESCE(?2, email), \
         phone = COALESCE(?3, phone), \
         address = COALESCE(?4, address), \
         city = COALESCE(?5, city), \
         state = COALESCE(?6, state), \
         zip_code = COALESCE(?7, zip_code), \
         country = COALESCE(?8, country), \
         notes = COALESCE(?9, notes), \
         updated_at = ?10 \
         WHERE id = ?11",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.zip_code)
    .bind(&data.country)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_bare_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Hard delete a customer
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
