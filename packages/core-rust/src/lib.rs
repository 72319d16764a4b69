//! Motorpool Core — vehicle domain model and wire schema.

pub mod vehicle;
pub mod wire;

pub use vehicle::{Dimensions, Vehicle};
pub use wire::VehiclePayload;

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
