//! Catalog snapshot
//!
//! An explicit, owned snapshot of the storefront catalog. The UI layer
//! holds one of these and decides when to refresh it — there is no hidden
//! global store.

use crate::{ClientResult, HttpClient};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
};

#[derive(serde::Deserialize)]
struct DeleteConfirmation {
    #[allow(dead_code)]
    deleted: bool,
}

/// Snapshot of products and categories
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Empty catalog; call [`refresh`](Self::refresh) to populate it
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the server's current data
    pub async fn refresh(&mut self, client: &HttpClient) -> ClientResult<()> {
        self.products = client.get("products").await?;
        self.categories = client.get("categories").await?;
        Ok(())
    }

    /// Look up a product in the snapshot
    pub fn product_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products assigned to a category
    pub fn products_in_category(&self, category_id: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .collect()
    }

    /// Products still in stock
    pub fn available_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.stock > 0).collect()
    }

    // ── Admin operations: proxy the call, keep the snapshot current ──

    pub async fn create_category(
        &mut self,
        client: &HttpClient,
        data: &CategoryCreate,
    ) -> ClientResult<Category> {
        let category: Category = client.post("categories", data).await?;
        self.categories.push(category.clone());
        Ok(category)
    }

    pub async fn update_category(
        &mut self,
        client: &HttpClient,
        id: i64,
        data: &CategoryUpdate,
    ) -> ClientResult<Category> {
        let category: Category = client.patch(&format!("categories/{id}"), data).await?;
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = category.clone();
        }
        Ok(category)
    }

    pub async fn delete_category(&mut self, client: &HttpClient, id: i64) -> ClientResult<()> {
        let _: DeleteConfirmation = client.delete(&format!("categories/{id}")).await?;
        self.categories.retain(|c| c.id != id);
        // The server orphans the category's products
        for product in self.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
                product.category = None;
            }
        }
        Ok(())
    }

    /// Create a product (multipart form, text fields only — the server
    /// owns image handling)
    pub async fn create_product(
        &mut self,
        client: &HttpClient,
        data: &ProductCreate,
    ) -> ClientResult<Product> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", data.name.clone())
            .text("price", data.price.to_string())
            .text("stock", data.stock.to_string());
        if let Some(ref description) = data.description {
            form = form.text("description", description.clone());
        }
        if let Some(category_id) = data.category_id {
            form = form.text("categoryId", category_id.to_string());
        }
        for size in &data.sizes {
            form = form.text("sizes", size.clone());
        }

        let product: Product = client.post_multipart("products", form).await?;
        self.products.push(product.clone());
        Ok(product)
    }

    pub async fn update_product(
        &mut self,
        client: &HttpClient,
        id: i64,
        data: &ProductUpdate,
    ) -> ClientResult<Product> {
        let product: Product = client.patch(&format!("products/{id}"), data).await?;
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
            *slot = product.clone();
        }
        Ok(product)
    }

    pub async fn delete_product(&mut self, client: &HttpClient, id: i64) -> ClientResult<()> {
        let _: DeleteConfirmation = client.delete(&format!("products/{id}")).await?;
        self.products.retain(|p| p.id != id);
        Ok(())
    }
}
