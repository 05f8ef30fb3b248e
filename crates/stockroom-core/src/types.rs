//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductInput   │   │    Product      │   │    Page<T>      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (store)     │──►│  content        │       │
//! │  │  description    │   │  name ...       │   │  number, size   │       │
//! │  │  price          │   │  quantity       │   │  totalElements  │       │
//! │  │  quantity       │   │  created/updated│   │  totalPages     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PageRequest    │──►│  Sort           │                             │
//! │  │  page, size     │   │  SortField      │                             │
//! │  └─────────────────┘   │  SortDirection  │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Product ids are integers handed out by the store on insert. They are never
//! reused, even after the product is deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PAGE_SIZE;

/// Store-assigned product identifier.
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// One inventory line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the store.
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Units currently in stock. Never negative.
    #[ts(type = "number")]
    pub quantity: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last saved.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether current stock covers `required` units.
    ///
    /// ## Example
    /// A product with quantity 3 has stock for 3 but not for 4.
    #[inline]
    pub fn has_stock(&self, required: i64) -> bool {
        self.quantity >= required
    }

    /// Returns the client-editable part of this product.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// The fields a client supplies when creating or replacing a product.
///
/// Any `id` in a request body is ignored: ids come from the store on create
/// and from the URL path on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[ts(type = "number")]
    pub price: Money,

    #[ts(type = "number")]
    pub quantity: i64,
}

// =============================================================================
// Sorting
// =============================================================================

/// Product fields a page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Description,
    Price,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Every field name clients may pass as `sortBy`.
    pub const NAMES: [&'static str; 7] = [
        "id",
        "name",
        "description",
        "price",
        "quantity",
        "createdAt",
        "updatedAt",
    ];

    /// The JSON / query-string name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Price => "price",
            SortField::Quantity => "quantity",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "description" => Ok(SortField::Description),
            "price" => Ok(SortField::Price),
            "quantity" => Ok(SortField::Quantity),
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(SortField::UpdatedAt),
            _ => Err(ValidationError::NotAllowed {
                field: "sortBy".to_string(),
                allowed: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ascending or descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a client-supplied direction.
    ///
    /// Only `desc` (any case) means descending; everything else, including
    /// garbage, falls back to ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Sort { field, direction }
    }
}

// =============================================================================
// Paging
// =============================================================================

/// A request for one zero-based page of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Builds a page request, rejecting sizes outside `1..=MAX_PAGE_SIZE`.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{PageRequest, Sort};
    ///
    /// let request = PageRequest::new(2, 10, Sort::default()).unwrap();
    /// assert_eq!(request.offset(), 20);
    ///
    /// assert!(PageRequest::new(0, 0, Sort::default()).is_err());
    /// ```
    pub fn new(page: u32, size: u32, sort: Sort) -> Result<Self, ValidationError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ValidationError::OutOfRange {
                field: "size".to_string(),
                min: 1,
                max: MAX_PAGE_SIZE as i64,
            });
        }
        Ok(PageRequest { page, size, sort })
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of records to skip before this page.
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the metadata clients need to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Records across all pages.
    pub total_elements: u64,
    /// Number of pages at this size.
    pub total_pages: u64,
    /// Records on this page (`content.len()`).
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Assembles a page from its content and the total record count.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size);
        let number = request.page();

        Page {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number,
            size: request.size(),
            total_elements,
            total_pages,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
