//! Storage layer for the Motorpool server.
//!
//! Provides the store trait and its in-memory implementation:
//!
//! - [`VehicleStore`]: synchronous keyed storage, exclusive owner of all
//!   vehicle records
//! - [`MemoryStore`]: [`dashmap`]-backed implementation
//!
//! Higher layers consume snapshots via [`VehicleStore::find_all`] and write
//! back through [`VehicleStore::update`].

pub mod memory;
pub mod store;

pub use memory::*;
pub use store::*;
