//! # stockroom-db: Storage Layer for Stockroom
//!
//! This crate provides product persistence for the Stockroom API.
//! It uses SQLite through sqlx, with an in-memory alternative for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  HTTP handler ──► ProductService                                       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  ProductStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/)  │    │  (embedded)  │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteProduct- │    │ 001_create_  │  │   │
//! │  │   │ Connection    │    │   Store        │    │  products    │  │   │
//! │  │   │ Management    │    │ InMemoryProd-  │    │              │  │   │
//! │  │   │               │    │   uctStore     │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               SQLite database file (DATABASE_PATH)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The [`ProductStore`] trait and its implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig, ProductStore};
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//!
//! let hits = db.products().find_by_name_containing_ignore_case("widget").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Store re-exports for convenience
pub use repository::memory::InMemoryProductStore;
pub use repository::product::SqliteProductStore;
pub use repository::ProductStore;
