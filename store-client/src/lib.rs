//! Store Client - HTTP client and client-side state for the storefront
//!
//! Provides network calls to the store-server API plus the two pieces of
//! client state the storefront needs: a [`Catalog`] snapshot and a
//! [`Cart`]. Both are plain owned values passed around explicitly — there
//! are no ambient singletons.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;

pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Customer, CustomerCreate, CustomerUpdate, Order,
    OrderCreate, OrderItemCreate, OrderStatus, Product,
};
