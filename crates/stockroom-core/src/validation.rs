//! # Validation Module
//!
//! Input validation for Stockroom requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── Body / query / path deserialization                               │
//! │  └── Malformed JSON, missing fields, non-numeric ids                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty name, non-negative price and quantity                   │
//! │  └── Page size and search fragment bounds                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0), CHECK (quantity >= 0)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service layer assumes its input already passed these checks.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductInput;
use crate::{MAX_NAME_LENGTH, MAX_SEARCH_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates every field of a create / replace request.
///
/// ## Example
/// ```rust
/// use stockroom_core::{Money, ProductInput};
/// use stockroom_core::validation::validate_product_input;
///
/// let mut input = ProductInput {
///     name: "Widget".to_string(),
///     description: Some("Blue".to_string()),
///     price: Money::from_cents(999),
///     quantity: 5,
/// };
/// assert!(validate_product_input(&input).is_ok());
///
/// input.quantity = -1;
/// assert!(validate_product_input(&input).is_err());
/// ```
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price(input.price)?;
    validate_stock_quantity(input.quantity)?;
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX / 100,
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means out of stock
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Query Validators
// =============================================================================

/// Validates a name search fragment.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - At most 100 characters
///
/// ## Returns
/// The fragment unchanged; surrounding whitespace is part of the match.
pub fn validate_search_query(query: &str) -> ValidationResult<&str> {
    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(query)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "Widget".to_string(),
            description: None,
            price: Money::from_cents(999),
            quantity: 5,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(1_000_000).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_product_input() {
        assert!(validate_product_input(&input()).is_ok());

        let mut bad = input();
        bad.name = String::new();
        assert!(matches!(
            validate_product_input(&bad),
            Err(ValidationError::Required { .. })
        ));

        let mut bad = input();
        bad.price = Money::from_cents(-100);
        assert!(validate_product_input(&bad).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("").unwrap(), "");
        assert_eq!(validate_search_query(" wid").unwrap(), " wid");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
