//! 台架切换器
//!
//! 原车辆切换面板中留存的纯数据逻辑：车辆列表循环、配重件与相机模式
//! 的显式 `next()` 循环、最近出生点选择。不含任何变换数学。

use contracts::{CameraMode, MassKit, SpawnPoint, Vec3};
use tracing::debug;

/// Pick the spawn point nearest to `position`.
///
/// Ties resolve to the earlier entry. The same rule drives the mock host's
/// pose reset.
pub fn closest_spawn(position: Vec3, spawns: &[SpawnPoint]) -> Option<&SpawnPoint> {
    spawns.iter().min_by(|a, b| {
        let da = a.position.distance(&position);
        let db = b.position.distance(&position);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Vehicle rig selector
///
/// Owns the vehicle list and the current camera/mass-kit cycle positions.
#[derive(Debug, Clone)]
pub struct RigSelector {
    /// Available vehicle rig names
    vehicles: Vec<String>,
    /// Index of the active rig
    active: usize,
    /// Chase camera mode
    camera: CameraMode,
    /// Add-on mass kit
    mass_kit: MassKit,
}

impl RigSelector {
    /// Create a selector over a vehicle list; an empty list is allowed and
    /// simply has no active rig.
    pub fn new(vehicles: Vec<String>) -> Self {
        Self {
            vehicles,
            active: 0,
            camera: CameraMode::default(),
            mass_kit: MassKit::default(),
        }
    }

    /// Name of the active rig, if any
    pub fn active_vehicle(&self) -> Option<&str> {
        self.vehicles.get(self.active).map(String::as_str)
    }

    /// Cycle to the next rig, modulo the list length
    pub fn next_vehicle(&mut self) -> Option<&str> {
        if self.vehicles.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.vehicles.len();
        debug!(active = self.active, "rig switched");
        self.vehicles.get(self.active).map(String::as_str)
    }

    /// Current camera mode
    pub fn camera(&self) -> CameraMode {
        self.camera
    }

    /// Advance the camera cycle (HELI → BEHIND → SIDE → HELI)
    pub fn cycle_camera(&mut self) -> CameraMode {
        self.camera = self.camera.next();
        self.camera
    }

    /// Current mass kit
    pub fn mass_kit(&self) -> MassKit {
        self.mass_kit
    }

    /// Advance the mass-kit cycle (Empty → BatteryPack → EngineBlock → Empty)
    pub fn cycle_mass_kit(&mut self) -> MassKit {
        self.mass_kit = self.mass_kit.next();
        self.mass_kit
    }
}
