//! # SQLite Product Store
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert / replace through a single upsert
//! - Sorted, paged listing
//! - Case-insensitive name search (Unicode case folding, done in Rust)
//!
//! ## Paged Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Page Is Built                                  │
//! │                                                                         │
//! │  GET /products?paginated=true&page=1&size=10&sortBy=price&sortDir=desc │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SortField::Price ──► column "price_cents" (fixed whitelist)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... ORDER BY price_cents DESC, id DESC LIMIT 10 OFFSET 10      │
//! │  SELECT COUNT(*) FROM products                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Page { content, totalElements, totalPages, first, last, ... }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names never come from the client: the ORDER BY clause is built
//! from [`SortField`] through [`sort_column`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use stockroom_core::{Money, Page, PageRequest, Product, ProductId, ProductInput, SortField};

use crate::error::DbResult;
use crate::repository::ProductStore;

/// Columns selected for every product query, in [`ProductRow`] order.
const PRODUCT_COLUMNS: &str =
    "id, name, description, price_cents, quantity, created_at, updated_at";

/// Raw `products` row.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price_cents: i64,
    quantity: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Maps a sort field to its column.
fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Name => "name",
        SortField::Description => "description",
        SortField::Price => "price_cents",
        SortField::Quantity => "quantity",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    }
}

/// SQLite-backed [`ProductStore`].
///
/// ## Usage
/// ```rust,ignore
/// let store = db.products();
///
/// let saved = store.save(None, &input).await?;
/// let found = store.find_by_id(saved.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Creates a new SqliteProductStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductStore { pool }
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn insert(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, "Inserting product");

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, description, price_cents, quantity, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price.cents())
            .bind(input.quantity)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    /// Writes every field under `id`, creating the row if it is absent.
    ///
    /// `created_at` is only set on the insert branch.
    async fn replace(&self, id: ProductId, input: &ProductInput) -> DbResult<Product> {
        debug!(id = %id, name = %input.name, "Replacing product");

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (id, name, description, price_cents, quantity, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
             ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, \
                 description = excluded.description, \
                 price_cents = excluded.price_cents, \
                 quantity = excluded.quantity, \
                 updated_at = excluded.updated_at \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price.cents())
            .bind(input.quantity)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn save(&self, id: Option<ProductId>, input: &ProductInput) -> DbResult<Product> {
        match id {
            None => self.insert(input).await,
            Some(id) => self.replace(id, input).await,
        }
    }

    async fn find_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_page(&self, request: &PageRequest) -> DbResult<Page<Product>> {
        let sort = request.sort();
        let direction = sort.direction.as_sql();

        debug!(
            page = request.page(),
            size = request.size(),
            sort_by = %sort.field,
            direction = direction,
            "Listing product page"
        );

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             ORDER BY {column} {direction}, id {direction} \
             LIMIT ?1 OFFSET ?2",
            column = sort_column(sort.field),
        );

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(i64::from(request.size()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count().await?;
        let content = rows.into_iter().map(Product::from).collect();

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn exists_by_id(&self, id: ProductId) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    async fn delete_by_id(&self, id: ProductId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Deleted product");
        Ok(())
    }

    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> DbResult<Vec<Product>> {
        debug!(fragment = %fragment, "Searching products by name");

        // SQLite's lower() only folds ASCII, so matching happens here
        let needle = fragment.to_lowercase();
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let hits: Vec<Product> = rows
            .into_iter()
            .filter(|row| row.name.to_lowercase().contains(&needle))
            .map(Product::from)
            .collect();

        debug!(count = hits.len(), "Search returned products");
        Ok(hits)
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::conformance;

    async fn store() -> SqliteProductStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        conformance::save_assigns_increasing_ids(&store().await).await;
    }

    #[tokio::test]
    async fn test_replace_keeps_id_and_created_at() {
        conformance::replace_keeps_id_and_created_at(&store().await).await;
    }

    #[tokio::test]
    async fn test_missing_ids() {
        conformance::missing_ids(&store().await).await;
    }

    #[tokio::test]
    async fn test_delete_never_reuses_ids() {
        conformance::delete_removes_and_never_reuses_ids(&store().await).await;
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        conformance::find_all_in_id_order(&store().await).await;
    }

    #[tokio::test]
    async fn test_pages_and_metadata() {
        conformance::pages_and_metadata(&store().await).await;
    }

    #[tokio::test]
    async fn test_sorts_with_id_tie_break() {
        conformance::sorts_with_id_tie_break(&store().await).await;
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        conformance::search_ignores_case(&store().await).await;
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let store = store().await;
        store
            .save(None, &conformance::input("100% Cotton", 100, 1))
            .await
            .unwrap();
        store
            .save(None, &conformance::input("Cotton_Blend", 100, 1))
            .await
            .unwrap();

        assert_eq!(
            store.find_by_name_containing_ignore_case("%").await.unwrap().len(),
            1
        );
        assert_eq!(
            store.find_by_name_containing_ignore_case("_").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_search_folds_unicode() {
        conformance::search_folds_unicode(&store().await).await;
    }

    #[tokio::test]
    async fn test_rejects_rows_that_break_constraints() {
        conformance::rejects_rows_that_break_constraints(&store().await).await;
    }

    #[tokio::test]
    async fn test_ping_fails_after_close() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.products();
        store.ping().await.unwrap();

        db.close().await;
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_count() {
        let store = store().await;
        assert_eq!(store.count().await.unwrap(), 0);

        store
            .save(None, &conformance::input("Widget", 100, 1))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
