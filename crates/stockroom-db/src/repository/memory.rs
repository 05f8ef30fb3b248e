//! # In-Memory Product Store
//!
//! A [`ProductStore`] that keeps everything in a `BTreeMap` behind a tokio
//! `RwLock`. Used by service tests and by `STORE_BACKEND=memory`.
//!
//! Contents are lost when the process exits.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stockroom_core::{
    Page, PageRequest, Product, ProductId, ProductInput, SortDirection, SortField,
};

use crate::error::{DbError, DbResult};
use crate::repository::ProductStore;

#[derive(Debug)]
struct Inner {
    /// Next id to hand out. Only ever grows.
    next_id: ProductId,
    /// Keyed by id, so iteration is already in id order.
    rows: BTreeMap<ProductId, Product>,
}

/// Process-local product store.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        InMemoryProductStore {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirrors the CHECK constraints on the `products` table.
fn check_row(input: &ProductInput) -> DbResult<()> {
    let failed = if input.name.trim().is_empty() {
        "length(trim(name)) > 0"
    } else if input.price.is_negative() {
        "price_cents >= 0"
    } else if input.quantity < 0 {
        "quantity >= 0"
    } else {
        return Ok(());
    };

    Err(DbError::ConstraintViolation {
        message: format!("CHECK constraint failed: {failed}"),
    })
}

/// Orders two products by `field` ascending, ties broken by id.
fn compare_by(field: SortField, a: &Product, b: &Product) -> Ordering {
    let primary = match field {
        SortField::Id => Ordering::Equal,
        SortField::Name => a.name.cmp(&b.name),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn save(&self, id: Option<ProductId>, input: &ProductInput) -> DbResult<Product> {
        check_row(input)?;

        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let id = match id {
            Some(id) => id,
            None => inner.next_id,
        };
        inner.next_id = inner.next_id.max(id + 1);

        let created_at = inner.rows.get(&id).map_or(now, |existing| existing.created_at);

        let product = Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            quantity: input.quantity,
            created_at,
            updated_at: now,
        };
        inner.rows.insert(id, product.clone());

        Ok(product)
    }

    async fn find_all(&self) -> DbResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_page(&self, request: &PageRequest) -> DbResult<Page<Product>> {
        let inner = self.inner.read().await;
        let sort = request.sort();

        let mut all: Vec<&Product> = inner.rows.values().collect();
        all.sort_by(|a, b| {
            let ordering = compare_by(sort.field, a, b);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = all.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = all
            .into_iter()
            .skip(skip)
            .take(request.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: ProductId) -> DbResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: ProductId) -> DbResult<()> {
        let mut inner = self.inner.write().await;
        inner.rows.remove(&id);
        Ok(())
    }

    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> DbResult<Vec<Product>> {
        let needle = fragment.to_lowercase();
        let inner = self.inner.read().await;

        Ok(inner
            .rows
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
