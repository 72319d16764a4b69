//! HTTP handler definitions for the Motorpool server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod health;
pub mod vehicles;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use vehicles::{
    create_batch_handler, create_handler, delete_handler, get_all_handler,
    get_average_capacity_handler, get_average_speed_handler, get_by_brand_years_handler,
    get_by_color_year_handler, get_by_dimensions_handler, get_by_fuel_type_handler,
    get_by_transmission_handler, get_by_weight_handler, update_fuel_type_handler,
    update_speed_handler,
};

use std::sync::Arc;
use std::time::Instant;

use crate::service::VehicleService;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The vehicle catalog service all endpoints dispatch through.
    pub service: Arc<dyn VehicleService>,
    /// Graceful shutdown controller with health state tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration (bind address, CORS, timeouts).
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
