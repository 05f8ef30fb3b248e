//! # stockroom-core: Pure Domain Model for Stockroom
//!
//! This crate holds the product inventory domain as plain data and pure
//! functions. Nothing in here touches a database or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    POST /products, GET /products/{id}, PUT, DELETE, search     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ProductService                               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │  Page<T>  │  │  (cents)  │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Storage Layer)                    │   │
//! │  │          ProductStore trait, SQLite + in-memory stores          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductInput, paging)
//! - [`money`] - Money type with integer cents
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Money, ProductInput};
//! use stockroom_core::validation::validate_product_input;
//!
//! let input = ProductInput {
//!     name: "Widget".to_string(),
//!     description: None,
//!     price: Money::from_cents(999),
//!     quantity: 5,
//! };
//! assert!(validate_product_input(&input).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a client may request.
///
/// ## Business Reason
/// Keeps a single list call from dragging the whole table over the wire.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Maximum product name length, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a name search fragment, in characters.
pub const MAX_SEARCH_LENGTH: usize = 100;
