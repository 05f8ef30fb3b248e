//! # Product Service
//!
//! Business operations over the product store.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update_product(id, input)                            │
//! │                                                                         │
//! │  store.find_by_id(id) ── None ──► CoreError::ProductNotFound           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  input.quantity < existing.quantity ?                                  │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  reduction = existing - input                                          │
//! │  existing.has_stock(reduction) ── no ──► CoreError::InsufficientStock  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.save(Some(id), input) ──► updated Product                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service trusts its input: field validation happens at the HTTP
//! boundary before these methods are called.

use std::sync::Arc;

use tracing::{debug, info};

use stockroom_core::{CoreError, Page, PageRequest, Product, ProductId, ProductInput};
use stockroom_db::ProductStore;

use super::ServiceResult;

/// Product operations backed by any [`ProductStore`].
///
/// Cloning shares the same store.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        ProductService { store }
    }

    /// Creates a product; the store assigns its id.
    pub async fn create_product(&self, input: ProductInput) -> ServiceResult<Product> {
        let product = self.store.save(None, &input).await?;
        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn get_all_products(&self) -> ServiceResult<Vec<Product>> {
        let products = self.store.find_all().await?;
        debug!(count = products.len(), "Listed all products");
        Ok(products)
    }

    pub async fn get_products_page(&self, request: PageRequest) -> ServiceResult<Page<Product>> {
        let page = self.store.find_page(&request).await?;
        debug!(
            page = page.number,
            returned = page.number_of_elements,
            total = page.total_elements,
            "Listed product page"
        );
        Ok(page)
    }

    /// Loads one product.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` when no product has this id.
    pub async fn get_product_by_id(&self, id: ProductId) -> ServiceResult<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    /// Replaces every editable field of a product.
    ///
    /// ## Errors
    /// - `CoreError::ProductNotFound` when no product has this id
    /// - `CoreError::InsufficientStock` when the reduction exceeds stock
    pub async fn update_product(&self, id: ProductId, input: ProductInput) -> ServiceResult<Product> {
        let existing = self.get_product_by_id(id).await?;

        if input.quantity < existing.quantity {
            let reduction = existing.quantity - input.quantity;

            // Availability is the value being replaced, so for non-negative
            // input this never fails. Kept as a guard, not a real stock check.
            if !existing.has_stock(reduction) {
                return Err(CoreError::InsufficientStock {
                    product_id: id,
                    requested: reduction,
                    available: existing.quantity,
                }
                .into());
            }
        }

        let product = self.store.save(Some(id), &input).await?;
        info!(
            id = product.id,
            quantity = product.quantity,
            "Product updated"
        );
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` when no product has this id.
    pub async fn delete_product(&self, id: ProductId) -> ServiceResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(CoreError::ProductNotFound(id).into());
        }

        self.store.delete_by_id(id).await?;
        info!(id = id, "Product deleted");
        Ok(())
    }

    /// Case-insensitive substring search on product names.
    pub async fn search_products_by_name(&self, fragment: &str) -> ServiceResult<Vec<Product>> {
        let products = self.store.find_by_name_containing_ignore_case(fragment).await?;
        debug!(fragment = %fragment, count = products.len(), "Searched products");
        Ok(products)
    }

    /// Whether a product has at least `required` units in stock.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` when no product has this id.
    pub async fn check_stock_availability(
        &self,
        id: ProductId,
        required: i64,
    ) -> ServiceResult<bool> {
        let product = self.get_product_by_id(id).await?;
        Ok(product.has_stock(required))
    }

    /// Whether the underlying store is answering.
    pub async fn is_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
