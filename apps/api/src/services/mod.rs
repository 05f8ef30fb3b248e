//! Service layer.
//!
//! Business operations sit here, between the HTTP routes and the store.

pub mod product_service;

pub use product_service::ProductService;

use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// Errors a service operation can end in.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A business rule said no.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed underneath.
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
