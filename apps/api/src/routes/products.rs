//! # Product Routes
//!
//! HTTP handlers for `/products`.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    GET /products?paginated=true&size=20                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Query<ListProductsParams>  (defaults filled by serde)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sortBy ──► SortField (unknown name ──► 400)                           │
//! │  sortDir ──► SortDirection (anything but "desc" ──► asc)               │
//! │  page/size ──► PageRequest (size outside 1..=1000 ──► 400)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductService::get_products_page ──► 200 Page<Product>               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers only default parameters, validate input and pick status codes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockroom_core::validation::{validate_product_input, validate_search_query};
use stockroom_core::{
    Page, PageRequest, Product, ProductId, ProductInput, Sort, SortDirection, SortField,
    DEFAULT_PAGE_SIZE,
};

use crate::error::ApiResult;
use crate::AppState;

/// Product routes, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/search", get(search_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/stock", get(check_stock))
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Query string for `GET /products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    /// Return a page envelope instead of a bare list.
    #[serde(default)]
    pub paginated: bool,

    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub size: u32,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    SortField::Id.as_str().to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

impl Default for ListProductsParams {
    fn default() -> Self {
        ListProductsParams {
            paginated: false,
            page: 0,
            size: default_page_size(),
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

impl ListProductsParams {
    /// Turns the raw parameters into a validated page request.
    pub fn page_request(&self) -> ApiResult<PageRequest> {
        let field: SortField = self.sort_by.parse()?;
        let direction = SortDirection::parse_lenient(&self.sort_dir);

        Ok(PageRequest::new(
            self.page,
            self.size,
            Sort::new(field, direction),
        )?)
    }
}

/// Query string for `GET /products/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

/// Query string for `GET /products/{id}/stock`.
#[derive(Debug, Deserialize)]
pub struct StockParams {
    pub quantity: i64,
}

/// Body of `GET /products`: a bare list, or a page when `paginated=true`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProductListing {
    All(Vec<Product>),
    Paged(Page<Product>),
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;
    validate_product_input(&input)?;

    let product = state.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> ApiResult<Json<ProductListing>> {
    let Query(params) = params?;
    debug!(?params, "Listing products");

    if !params.paginated {
        let products = state.products.get_all_products().await?;
        return Ok(Json(ProductListing::All(products)));
    }

    let request = params.page_request()?;
    let page = state.products.get_products_page(request).await?;
    Ok(Json(ProductListing::Paged(page)))
}

async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let product = state.products.get_product_by_id(id).await?;
    Ok(Json(product))
}

async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    validate_product_input(&input)?;

    let product = state.products.update_product(id, input).await?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(params) = params?;
    let fragment = validate_search_query(&params.name)?;

    let products = state.products.search_products_by_name(fragment).await?;
    Ok(Json(products))
}

async fn check_stock(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    params: Result<Query<StockParams>, QueryRejection>,
) -> ApiResult<Json<bool>> {
    let Path(id) = id?;
    let Query(params) = params?;

    let available = state
        .products
        .check_stock_availability(id, params.quantity)
        .await?;
    Ok(Json(available))
}
