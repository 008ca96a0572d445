//! # Config Loader
//!
//! Plan loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON plan files
//! - Validate plan legality (hard rules) and collect warnings (soft rules)
//! - Persist friction settings to an explicit path
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let plan = ConfigLoader::load_from_path(Path::new("plan.toml")).unwrap();
//! println!("configs: {}", plan.configs.len());
//! ```

mod error;
pub mod friction_store;
mod parser;
pub mod validator;

pub use contracts::ManeuverPlan;
pub use error::ConfigError;
pub use parser::ConfigFormat;
pub use validator::{collect_warnings, validate};

use std::path::Path;

/// Plan loader
///
/// Provides static methods to load a plan from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a plan from a file path
    ///
    /// Automatically detects format from the file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ManeuverPlan, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::load_from_str(&content, format)
    }

    /// Load a plan from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<ManeuverPlan, ConfigError> {
        let plan = parser::parse(content, format)?;
        validator::validate(&plan)?;
        Ok(plan)
    }

    /// Serialize a plan to a TOML string
    pub fn to_toml(plan: &ManeuverPlan) -> Result<String, ConfigError> {
        toml::to_string_pretty(plan)
            .map_err(|e| ConfigError::parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a plan to a JSON string
    pub fn to_json(plan: &ManeuverPlan) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(plan)
            .map_err(|e| ConfigError::parse(format!("JSON serialize error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[settings]
drive_force = 2500.0
rest_time = 4.0

[rig]
mass_ic = 1480.0
mass_ev = 1650.0

[[rig.spawn_points]]
name = "grid"
yaw = 90.0
[rig.spawn_points.position]
x = 10.0
y = 0.0
z = -3.0

[[rig.wheels]]
slot = "front_left"
longitudinal_offset = 1.25
[[rig.wheels]]
slot = "front_right"
longitudinal_offset = 1.25
[[rig.wheels]]
slot = "rear_left"
longitudinal_offset = -1.45
[[rig.wheels]]
slot = "rear_right"
longitudinal_offset = -1.45

[[configs]]
name = "slalom"
weight_variant = "ic"
init_speed = 80.0

[[configs.turns]]
angle = 15.0
duration = 1.5
"#;

    #[test]
    fn load_from_str_toml() {
        let plan = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(plan.settings.drive_force, 2500.0);
        assert_eq!(plan.rig.spawn_points[0].yaw, 90.0);
        assert_eq!(plan.configs[0].name, "slalom");
    }

    #[test]
    fn round_trip_toml() {
        let plan = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&plan).unwrap();
        let plan2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(plan, plan2);
    }

    #[test]
    fn round_trip_json() {
        let plan = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&plan).unwrap();
        let plan2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(plan, plan2);
    }

    #[test]
    fn validation_runs_after_parse() {
        // Duplicate output name must fail the load.
        let content = format!(
            "{MINIMAL_TOML}\n[[configs]]\nname = \"slalom\"\ninit_speed = 60.0\n"
        );
        let result = ConfigLoader::load_from_str(&content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duplicate output file name"));
    }

    #[test]
    fn load_from_path_detects_format_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, MINIMAL_TOML).unwrap();
        assert!(ConfigLoader::load_from_path(&path).is_ok());

        let err = ConfigLoader::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let err = ConfigLoader::load_from_path(&dir.path().join("plan.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }
}
