//! Product Repository

use super::{RepoError, RepoResult, category};
use shared::models::{Category, Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use std::collections::HashMap;

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, stock, sizes, image, \
     category_id, created_at, updated_at FROM product";

/// Raw product row — `sizes` is a JSON column, decoded in [`ProductRow::into_product`]
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub sizes: String,
    pub image: String,
    pub category_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProductRow {
    pub(crate) fn into_product(self) -> Product {
        let sizes: Vec<String> = serde_json::from_str(&self.sizes).unwrap_or_default();
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            sizes,
            image: self.image,
            category_id: self.category_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            category: None,
        }
    }
}

/// Find all products with their category attached
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let rows: Vec<ProductRow> =
        sqlx::query_as(&format!("{PRODUCT_SELECT} ORDER BY created_at DESC"))
            .fetch_all(pool)
            .await?;

    let mut products: Vec<Product> = rows.into_iter().map(ProductRow::into_product).collect();
    attach_categories(pool, &mut products).await?;
    Ok(products)
}

/// Find products assigned to one category (no nested category)
pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
        "{PRODUCT_SELECT} WHERE category_id = ? ORDER BY created_at DESC"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ProductRow::into_product).collect())
}

/// Find product by id with category attached
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("{PRODUCT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut product = row.into_product();
    if let Some(category_id) = product.category_id {
        product.category = category::find_bare_by_id(pool, category_id).await?;
    }
    Ok(Some(product))
}

/// Create a new product
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = now_millis();
    let id = snowflake_id();
    let sizes_json = serde_json::to_string(&data.sizes)
        .map_err(|e| RepoError::Validation(format!("Invalid sizes: {e}")))?;

    sqlx::query(
        "INSERT INTO product (id, name, description, price, stock, sizes, image, category_id, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.description.as_deref().unwrap_or(""))
    .bind(data.price)
    .bind(data.stock)
    .bind(&sizes_json)
    .bind(data.image.as_deref().unwrap_or(""))
    .bind(data.category_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update a product (partial merge — absent fields keep their value)
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let now = now_millis();
    let sizes_json = match &data.sizes {
        Some(sizes) => Some(
            serde_json::to_string(sizes)
                .map_err(|e| RepoError::Validation(format!("Invalid sizes: {e}")))?,
        ),
        None => None,
    };

    let rows = sqlx::query(
        "UPDATE product SET \
         name = COALESCE(?1, name), \
         description = COALESCE(?2, description), \
         price = COALESCE(?3, price), \
         stock = COALESCE(?4, stock), \
         sizes = COALESCE(?5, sizes), \
         image = COALESCE(?6, image), \
         category_id = COALESCE(?7, category_id), \
         updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(&sizes_json)
    .bind(&data.image)
    .bind(data.category_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Hard delete a product
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Attach categories to a batch of products (single grouped query, no N+1)
pub(crate) async fn attach_categories(
    pool: &SqlitePool,
    products: &mut [Product],
) -> RepoResult<()> {
    let ids: Vec<i64> = {
        let mut ids: Vec<i64> = products.iter().filter_map(|p| p.category_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };
    if ids.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "SELECT id, name, created_at, updated_at FROM category WHERE id IN ({})",
        super::sql_placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, Category>(&sql);
    for id in &ids {
        query = query.bind(id);
    }
    let categories: Vec<Category> = query.fetch_all(pool).await?;

    let by_id: HashMap<i64, Category> = categories.into_iter().map(|c| (c.id, c)).collect();
    for product in products.iter_mut() {
        product.category = product.category_id.and_then(|id| by_id.get(&id).cloned());
    }
    Ok(())
}
