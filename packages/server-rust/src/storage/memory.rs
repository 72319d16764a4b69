//! In-memory [`VehicleStore`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking. Each
//! trait operation is individually serialized by `DashMap`'s internal
//! sharding; there is no cross-operation transaction.

use std::collections::HashMap;

use dashmap::DashMap;
use motorpool_core::Vehicle;

use crate::storage::store::{StoreError, VehicleStore};

/// In-memory vehicle storage backed by [`DashMap`].
///
/// Well-suited to the read-heavy filter workload: lookups and snapshots
/// take shard read locks only.
pub struct MemoryStore {
    vehicles: DashMap<i32, Vehicle>,
}

impl MemoryStore {
    /// Creates a new, empty `MemoryStore`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
        }
    }

    /// Creates a store pre-populated with the given vehicles, keyed by
    /// their own identifiers. Later duplicates replace earlier ones.
    #[must_use]
    pub fn with_vehicles<I>(vehicles: I) -> Self
    where
        I: IntoIterator<Item = Vehicle>,
    {
        let store = Self::new();
        for v in vehicles {
            store.vehicles.insert(v.id, v);
        }
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleStore for MemoryStore {
    fn find_all(&self) -> HashMap<i32, Vehicle> {
        self.vehicles
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    fn find_one(&self, id: i32) -> Result<Vehicle, StoreError> {
        self.vehicles
            .get(&id)
            .map(|v| v.clone())
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&self, vehicle: Vehicle) -> Result<(), StoreError> {
        match self.vehicles.entry(vehicle.id) {
            dashmap::Entry::Occupied(_) => Err(StoreError::AlreadyExists { id: vehicle.id }),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(vehicle);
                Ok(())
            }
        }
    }

    fn update(&self, id: i32, vehicle: Vehicle) -> Option<Vehicle> {
        self.vehicles.insert(id, vehicle)
    }

    fn delete(&self, id: i32) -> Result<Vehicle, StoreError> {
        self.vehicles
            .remove(&id)
            .map(|(_, v)| v)
            .ok_or(StoreError::NotFound { id })
    }

    fn len(&self) -> usize {
        self.vehicles.len()
    }

    fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
