//! Storefront backend
//!
//! # Architecture
//!
//! ```text
//! store-server/src/
//! ├── core/          # configuration, shared state
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── services/      # S3 image store
//! └── utils/         # logging, input validation
//! ```
//!
//! The HTTP surface is a plain CRUD backend (categories, customers,
//! products) plus the order placement workflow, which is the only
//! multi-step mutation: it validates and decrements stock, snapshots
//! prices, and persists the order atomically.

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use core::{AppState, Config};
pub use services::ImageStore;
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
