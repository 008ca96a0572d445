//! # Vehicle Host
//!
//! Physics host implementations.
//!
//! Responsibilities:
//! - Deterministic mock host implementing `contracts::VehicleHost`
//! - Rig selector (vehicle / camera / mass-kit cycling, closest spawn)
//!
//! The real engine side of the `VehicleHost` trait lives in the host
//! application; this crate only ships what the harness needs to run
//! end to end without one.

pub mod mock_host;
pub mod selector;

pub use mock_host::MockVehicleHost;
pub use selector::{closest_spawn, RigSelector};

// Re-export contracts types callers wire the host with
pub use contracts::{RigConfig, SpawnPoint, VehicleHost, WheelMount};
