//! # Repository Module
//!
//! Storage abstraction for products plus its implementations.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ProductStore Seam                                    │
//! │                                                                         │
//! │  ProductService                                                        │
//! │       │                                                                 │
//! │       │  store.find_page(&request)                                     │
//! │       ▼                                                                 │
//! │  Arc<dyn ProductStore>                                                 │
//! │  ├── save(id, input)                                                   │
//! │  ├── find_all / find_page / find_by_id                                 │
//! │  ├── exists_by_id / delete_by_id                                       │
//! │  └── find_by_name_containing_ignore_case(fragment)                     │
//! │       │                                                                 │
//! │       ├──────────────────────────┐                                      │
//! │       ▼                          ▼                                      │
//! │  SqliteProductStore         InMemoryProductStore                       │
//! │  (sqlx, migrations)         (tokio RwLock + BTreeMap)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`SqliteProductStore`](product::SqliteProductStore) - durable, used in production
//! - [`InMemoryProductStore`](memory::InMemoryProductStore) - tests and `STORE_BACKEND=memory`

use async_trait::async_trait;
use stockroom_core::{Page, PageRequest, Product, ProductId, ProductInput};

use crate::error::DbResult;

pub mod memory;
pub mod product;

/// Persistence operations for products.
///
/// Every implementation must:
/// - hand out ids that are unique and never reused
/// - treat `save(Some(id), ..)` as a full replacement that keeps `created_at`
/// - make `delete_by_id` a no-op for unknown ids
/// - refuse a blank name, negative price or negative quantity with
///   `DbError::ConstraintViolation`, storing nothing
/// - order pages by the requested field, breaking ties by id in the same
///   direction, so paging is stable
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts (`id == None`) or replaces (`id == Some`) a product.
    ///
    /// Returns the stored record with its id and timestamps filled in.
    async fn save(&self, id: Option<ProductId>, input: &ProductInput) -> DbResult<Product>;

    /// Every product, in id order.
    async fn find_all(&self) -> DbResult<Vec<Product>>;

    /// One sorted page plus the total count.
    async fn find_page(&self, request: &PageRequest) -> DbResult<Page<Product>>;

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>>;

    async fn exists_by_id(&self, id: ProductId) -> DbResult<bool>;

    /// Removes a product. Unknown ids are ignored.
    async fn delete_by_id(&self, id: ProductId) -> DbResult<()>;

    /// Products whose name contains `fragment`, ignoring case, in id order.
    ///
    /// An empty fragment matches every product.
    async fn find_by_name_containing_ignore_case(&self, fragment: &str)
        -> DbResult<Vec<Product>>;

    /// Checks that the backing storage answers queries.
    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

// =============================================================================
// Shared Store Tests
// =============================================================================
