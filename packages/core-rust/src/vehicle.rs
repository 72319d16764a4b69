//! Vehicle domain model.
//!
//! [`Vehicle`] is the sole entity of the catalog. The identifier is assigned
//! by the caller, must be unique across the store, and never changes after
//! creation. No attribute is validated on its own: empty strings, negative
//! numbers, and zero years are all legal values.

use serde::{Deserialize, Serialize};

/// Physical dimensions of a vehicle in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// A single vehicle record.
///
/// Owned exclusively by the store; callers always receive copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Caller-assigned unique identifier, immutable after creation.
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub fabrication_year: i32,
    /// Passenger capacity.
    pub capacity: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub dimensions: Dimensions,
}
