//! Category Repository

use super::{RepoError, RepoResult, product};
use shared::models::{Category, CategoryCreate, CategoryUpdate, Product};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Find all categories with their products attached
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let mut categories: Vec<Category> =
        sqlx::query_as("SELECT id, name, created_at, updated_at FROM category ORDER BY name")
            .fetch_all(pool)
            .await?;
    attach_products(pool, &mut categories).await?;
    Ok(categories)
}

/// Find category by id with its products attached
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = find_bare_by_id(pool, id).await?;
    let Some(mut category) = category else {
        return Ok(None);
    };
    category.products = product::find_by_category(pool, id).await?;
    Ok(Some(category))
}

/// Find category by id without relation fan-out
pub(crate) async fn find_bare_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category: Option<Category> =
        sqlx::query_as("SELECT id, name, created_at, updated_at FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

/// Find category by name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Category>> {
    let category: Option<Category> =
        sqlx::query_as("SELECT id, name, created_at, updated_at FROM category WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

/// Create a new category
pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    // Check duplicate name
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Category '{}' already exists",
            data.name
        )));
    }

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query("INSERT INTO category (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)")
        .bind(id)
        .bind(&data.name)
        .bind(now)
        .execute(pool)
        .await?;

    find_bare_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Update a category (partial merge)
pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), updated_at = ?2 WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Hard delete a category — products keep existing with a NULL category
/// (declarative ON DELETE SET NULL)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Attach products to a batch of categories (single query, grouped in memory)
async fn attach_products(pool: &SqlitePool, categories: &mut [Category]) -> RepoResult<()> {
    if categories.is_empty() {
        return Ok(());
    }

    let rows: Vec<product::ProductRow> = sqlx::query_as(
        "SELECT id, name, description, price, stock, sizes, image, category_id, \
         created_at, updated_at FROM product WHERE category_id IS NOT NULL \
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
    for row in rows {
        let product = row.into_product();
        if let Some(category_id) = product.category_id {
            by_category.entry(category_id).or_default().push(product);
        }
    }

    for category in categories.iter_mut() {
        category.products = by_category.remove(&category.id).unwrap_or_default();
    }
    Ok(())
}
