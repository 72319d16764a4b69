//! Service layer: the vehicle catalog engine.
//!
//! Sits between the transport adapter and the storage layer:
//!
//! 1. **Errors** (`error`): typed failures the transport maps to status codes
//! 2. **Catalog** (`fleet`): filtering, aggregation, and update orchestration
//!    over store snapshots

pub mod error;
pub mod fleet;

pub use error::ServiceError;
pub use fleet::{FleetService, VehicleMap, VehicleService};
