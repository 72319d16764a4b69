//! Vehicle store trait and storage errors.
//!
//! Defines [`VehicleStore`], the innermost layer of the server: exclusive
//! owner of the identifier-to-vehicle mapping. All operations are
//! synchronous; implementations provide their own internal mutual exclusion.
//!
//! Wrapped in `Arc<dyn VehicleStore>` for sharing across async boundaries.

use std::collections::HashMap;

use motorpool_core::Vehicle;

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No vehicle is stored under the requested identifier.
    #[error("vehicle {id} not found")]
    NotFound { id: i32 },
    /// A vehicle with the given identifier is already stored.
    #[error("vehicle {id} already exists")]
    AlreadyExists { id: i32 },
}

/// Exclusive owner of the identifier-to-vehicle mapping.
///
/// Callers never observe the internal mapping itself: [`find_all`] hands out
/// a fresh copy on every call, and point lookups return owned clones. The
/// two-step read-modify-write sequences built on top of this trait
/// (`find_one` followed by `update`) are not atomic across the two calls.
///
/// [`find_all`]: VehicleStore::find_all
pub trait VehicleStore: Send + Sync + 'static {
    /// Returns a fresh copy of all entries, isolated from later mutations.
    fn find_all(&self) -> HashMap<i32, Vehicle>;

    /// Returns the vehicle stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no vehicle is stored under `id`.
    fn find_one(&self, id: i32) -> Result<Vehicle, StoreError>;

    /// Inserts a new vehicle keyed by its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the identifier is taken;
    /// the store is left unchanged in that case.
    fn create(&self, vehicle: Vehicle) -> Result<(), StoreError>;

    /// Inserts or replaces the vehicle at `id` unconditionally (upsert).
    ///
    /// Returns the previous record when one was replaced.
    fn update(&self, id: i32, vehicle: Vehicle) -> Option<Vehicle>;

    /// Removes the vehicle stored under `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no vehicle is stored under `id`.
    fn delete(&self, id: i32) -> Result<Vehicle, StoreError>;

    /// Number of stored vehicles.
    fn len(&self) -> usize;

    /// Whether the store holds no vehicles.
    fn is_empty(&self) -> bool;
}
