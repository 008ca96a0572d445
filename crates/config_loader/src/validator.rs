//! 计划校验模块
//!
//! 硬规则：
//! - 至少一条配置
//! - 每条配置 init_speed > 0 且有限
//! - 转向角有限，时长有限且 >= 0
//! - drive_force > 0，rest_time >= 0，rest_brake_torque > 0
//! - 摩擦曲线数值有限且 >= 0，stiffness > 0
//! - 车轮挂载四个槽位各恰好一个
//! - 解析后的 CSV 输出文件名全局唯一
//!
//! 软规则（告警）由 [`collect_warnings`] 收集。

use std::collections::HashSet;

use contracts::{FrictionCurve, ManeuverPlan, WheelSlot};

use crate::error::ConfigError;

/// 校验计划，返回第一个遇到的错误或 Ok(())
pub fn validate(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    validate_settings(plan)?;
    validate_friction(plan)?;
    validate_wheels(plan)?;
    validate_configs(plan)?;
    validate_csv_names(plan)?;
    Ok(())
}

fn validate_settings(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    let s = &plan.settings;
    if !(s.drive_force.is_finite() && s.drive_force > 0.0) {
        return Err(ConfigError::validation(
            "settings.drive_force",
            format!("must be > 0, got {}", s.drive_force),
        ));
    }
    if !(s.rest_time.is_finite() && s.rest_time >= 0.0) {
        return Err(ConfigError::validation(
            "settings.rest_time",
            format!("must be >= 0, got {}", s.rest_time),
        ));
    }
    if !(s.rest_brake_torque.is_finite() && s.rest_brake_torque > 0.0) {
        return Err(ConfigError::validation(
            "settings.rest_brake_torque",
            format!("must be > 0, got {}", s.rest_brake_torque),
        ));
    }
    Ok(())
}

fn validate_friction(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    validate_curve("friction.forward", &plan.friction.forward)?;
    validate_curve("friction.sideways", &plan.friction.sideways)?;
    Ok(())
}

fn validate_curve(field: &str, curve: &FrictionCurve) -> Result<(), ConfigError> {
    let values = [
        curve.extremum_slip,
        curve.extremum_value,
        curve.asymptote_slip,
        curve.asymptote_value,
    ];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ConfigError::validation(
            field,
            "curve values must be finite and >= 0",
        ));
    }
    if !(curve.stiffness.is_finite() && curve.stiffness > 0.0) {
        return Err(ConfigError::validation(
            format!("{field}.stiffness"),
            format!("must be > 0, got {}", curve.stiffness),
        ));
    }
    Ok(())
}

/// 四个槽位各恰好一个挂载
fn validate_wheels(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    for slot in WheelSlot::ALL {
        let count = plan.rig.wheels.iter().filter(|w| w.slot == slot).count();
        if count != 1 {
            return Err(ConfigError::validation(
                format!("rig.wheels[{}]", slot.label()),
                format!("slot must be mounted exactly once, found {count}"),
            ));
        }
    }
    Ok(())
}

fn validate_configs(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    if plan.configs.is_empty() {
        return Err(ConfigError::validation(
            "configs",
            "at least one configuration is required",
        ));
    }

    for (i, config) in plan.configs.iter().enumerate() {
        if !(config.init_speed.is_finite() && config.init_speed > 0.0) {
            return Err(ConfigError::validation(
                format!("configs[{i}].init_speed"),
                format!("must be > 0, got {}", config.init_speed),
            ));
        }
        for (j, turn) in config.turns.iter().enumerate() {
            if !turn.angle.is_finite() {
                return Err(ConfigError::validation(
                    format!("configs[{i}].turns[{j}].angle"),
                    "must be finite",
                ));
            }
            if !(turn.duration.is_finite() && turn.duration >= 0.0) {
                return Err(ConfigError::validation(
                    format!("configs[{i}].turns[{j}].duration"),
                    format!("must be >= 0, got {}", turn.duration),
                ));
            }
        }
    }
    Ok(())
}

/// 两条配置不得互相覆盖对方的输出文件
fn validate_csv_names(plan: &ManeuverPlan) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (i, config) in plan.configs.iter().enumerate() {
        let name = config.csv_file_name();
        if !seen.insert(name.clone()) {
            return Err(ConfigError::validation(
                format!("configs[{i}]"),
                format!("duplicate output file name '{name}'"),
            ));
        }
    }
    Ok(())
}

/// 收集非致命问题的告警
pub fn collect_warnings(plan: &ManeuverPlan) -> Vec<String> {
    let mut warnings = Vec::new();

    if plan.rig.spawn_points.is_empty() {
        warnings.push(
            "no spawn points configured - run start will fail with a missing rig error"
                .to_string(),
        );
    }

    if plan.settings.rest_time == 0.0 {
        warnings.push("settings.rest_time is 0 - runs end on the first rest tick".to_string());
    }

    for (i, config) in plan.configs.iter().enumerate() {
        if config.turns.is_empty() {
            warnings.push(format!(
                "configs[{i}] has no turn entries - the run rests immediately after accelerating"
            ));
        }
        if config.name.is_empty() {
            warnings.push(format!(
                "configs[{i}] is unnamed - output falls back to '{}'",
                config.csv_file_name()
            ));
        }
    }

    warnings
}
