//! Flat JSON wire schema for vehicles.
//!
//! The HTTP API speaks a flattened representation: `fabrication_year` is
//! exposed as `year`, `capacity` as `passengers`, and the nested
//! [`Dimensions`] triple is spread into top-level `height`/`length`/`width`
//! fields. [`VehiclePayload`] is that representation; conversions to and
//! from the domain [`Vehicle`] are lossless.

use serde::{Deserialize, Serialize};

use crate::vehicle::{Dimensions, Vehicle};

/// Wire representation of a vehicle as it appears in request and response
/// bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePayload {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    #[serde(rename = "year")]
    pub fabrication_year: i32,
    #[serde(rename = "passengers")]
    pub capacity: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

impl From<Vehicle> for VehiclePayload {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand,
            model: v.model,
            registration: v.registration,
            color: v.color,
            fabrication_year: v.fabrication_year,
            capacity: v.capacity,
            max_speed: v.max_speed,
            fuel_type: v.fuel_type,
            transmission: v.transmission,
            weight: v.weight,
            height: v.dimensions.height,
            length: v.dimensions.length,
            width: v.dimensions.width,
        }
    }
}

impl From<VehiclePayload> for Vehicle {
    fn from(p: VehiclePayload) -> Self {
        Self {
            id: p.id,
            brand: p.brand,
            model: p.model,
            registration: p.registration,
            color: p.color,
            fabrication_year: p.fabrication_year,
            capacity: p.capacity,
            max_speed: p.max_speed,
            fuel_type: p.fuel_type,
            transmission: p.transmission,
            weight: p.weight,
            dimensions: Dimensions {
                height: p.height,
                length: p.length,
                width: p.width,
            },
        }
    }
}
