//! Product Model

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Product entity
///
/// `sizes` and the nested `category` are stored separately (JSON column /
/// foreign key) and populated by the repository, so this struct carries no
/// `FromRow` derive — the server maps its own row type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price in currency unit
    pub price: f64,
    /// Remaining stock, never negative
    pub stock: i64,
    /// Available size labels (one stock counter covers all sizes)
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Public URL of the product image, empty when none was uploaded
    pub image: String,
    pub category_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,

    /// Category, fetched for list/detail views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Public image URL (the server fills this in after uploading a file)
    pub image: Option<String>,
    pub category_id: Option<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub sizes: Option<Vec<String>>,
    pub image: Option<String>,
    pub category_id: Option<i64>,
}
