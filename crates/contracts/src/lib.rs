//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses harness simulation time (seconds, f64) as primary clock, zeroed at run start
//! - One tick = one fixed physics timestep supplied by the host

mod error;
mod friction;
mod host;
mod maneuver;
mod report;
mod vehicle;

pub use error::*;
pub use friction::*;
pub use host::VehicleHost;
pub use maneuver::*;
pub use report::*;
pub use vehicle::*;
