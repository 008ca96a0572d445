//! VehicleHost - physics host abstraction
//!
//! The sequencer never talks to a physics engine directly; everything it
//! needs from one is behind this trait. Implementations are synchronous and
//! are driven by the host's own fixed-timestep loop.

use crate::{FrictionSettings, HarnessError, Vec3, WeightVariant, WheelDiagnostics, WheelSlot};

/// Contract the maneuver sequencer consumes from the physics host.
///
/// One actuation target per wheel per tick; setters overwrite the previous
/// target. Readback reflects the state after the host's last integration
/// step. None of these methods may panic; fallible operations return
/// `Result`.
pub trait VehicleHost {
    /// Vehicle linear velocity (m/s).
    fn velocity(&self) -> Vec3;

    /// Body roll angle in degrees, raw 0-360 domain as the host reports it.
    fn roll_angle(&self) -> f64;

    /// Longitudinal mount offset of a wheel relative to the body origin
    /// (meters). Sign classifies the axle: >= 0 front, < 0 rear.
    fn wheel_longitudinal_offset(&self, slot: WheelSlot) -> f64;

    /// Current per-wheel force/slip diagnostics.
    fn wheel_diagnostics(&self, slot: WheelSlot) -> WheelDiagnostics;

    /// Set the motor torque target for one wheel (N·m).
    fn set_motor_torque(&mut self, slot: WheelSlot, torque: f64);

    /// Set the brake torque target for one wheel (N·m).
    fn set_brake_torque(&mut self, slot: WheelSlot, torque: f64);

    /// Set the steer angle target for one wheel (degrees).
    fn set_steer_angle(&mut self, slot: WheelSlot, degrees: f64);

    /// Reposition the vehicle at its designated spawn pose and zero all
    /// velocity. Fails when the rig has no spawn geometry; that is a fatal
    /// configuration error at run start.
    fn reset_pose(&mut self) -> Result<(), HarnessError>;

    /// Suspend physics for the body (no integration while asleep).
    fn sleep(&mut self);

    /// Re-activate the body after [`VehicleHost::sleep`]. Called back to
    /// back with it after a pose reset to avoid integrator artifacts from
    /// teleportation.
    fn wake(&mut self);

    /// Activate the mass component for the given weight variant.
    fn apply_weight_variant(&mut self, variant: WeightVariant);

    /// Push both friction curves to every wheel.
    fn apply_friction(&mut self, friction: &FrictionSettings);
}
