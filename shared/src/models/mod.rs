//! Entity models
//!
//! Each entity follows the same shape: the entity struct itself plus
//! `*Create` / `*Update` payloads. Database row mapping (`sqlx::FromRow`)
//! is feature-gated behind `db` so client crates stay free of sqlx.
//!
//! Wire naming is camelCase (`serde(rename_all)`) to match the admin
//! front-end and the public HTTP surface.

pub mod category;
pub mod customer;
pub mod order;
pub mod product;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, OrderStatusUpdate,
};
pub use product::{Product, ProductCreate, ProductUpdate};
