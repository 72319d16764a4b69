//! Service-level error taxonomy.

use crate::storage::StoreError;

/// Errors returned by [`VehicleService`](super::VehicleService) operations.
///
/// The transport layer maps these to response status codes; malformed input
/// never reaches the service and is rejected at the boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// A lookup or filter matched no vehicles. Zero matches on a filter is
    /// an error, not an empty success.
    #[error("no vehicles matched")]
    NotFound,
    /// A create collided with an identifier already in the store.
    #[error("vehicle identifier already exists")]
    AlreadyExists,
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::AlreadyExists { .. } => Self::AlreadyExists,
        }
    }
}
