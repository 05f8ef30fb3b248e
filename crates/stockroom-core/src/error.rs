//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors (not found, stock guard)         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  HTTP errors (in the api app)                                          │
//! │  └── ApiError         - What clients see (status + JSON body)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError → Client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These propagate untouched up to the HTTP boundary, which is the only
/// place they are turned into status codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product exists with the given id.
    #[error("Product not found with id: {0}")]
    ProductNotFound(ProductId),

    /// A quantity reduction asked for more stock than is available.
    ///
    /// ## When This Occurs
    /// ```text
    /// PUT /products/7 { quantity: 2 }   (stored quantity: 5)
    ///      │
    ///      ▼
    /// reduction = 5 - 2 = 3
    ///      │
    ///      ▼
    /// available (5) >= reduction (3)?  ── no ──► InsufficientStock
    /// ```
    #[error(
        "Insufficient stock for product ID {product_id}. Requested: {requested}, Available: {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary before a request reaches the service.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price with sub-cent digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
