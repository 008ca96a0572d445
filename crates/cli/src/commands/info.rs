//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::ManeuverPlan;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Plan info for JSON output
#[derive(Serialize)]
struct PlanInfo {
    settings: SettingsInfo,
    friction: FrictionInfo,
    rig: RigInfo,
    configs: Vec<ConfigInfo>,
}

#[derive(Serialize)]
struct SettingsInfo {
    drive_force: f64,
    rest_time: f64,
    rest_brake_torque: f64,
    output_dir: String,
}

#[derive(Serialize)]
struct FrictionInfo {
    forward_stiffness: f64,
    sideways_stiffness: f64,
}

#[derive(Serialize)]
struct RigInfo {
    spawn_points: Vec<String>,
    wheel_count: usize,
    mass_ic: f64,
    mass_ev: f64,
}

#[derive(Serialize)]
struct ConfigInfo {
    csv_file: String,
    weight_variant: String,
    init_speed: f64,
    turn_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    turns: Vec<TurnInfo>,
}

#[derive(Serialize)]
struct TurnInfo {
    angle: f64,
    duration: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(plan = %args.plan.display(), "Loading maneuver plan info");

    if !args.plan.exists() {
        return Err(CliError::plan_not_found(args.plan.display().to_string()).into());
    }

    let plan = config_loader::ConfigLoader::load_from_path(&args.plan)
        .with_context(|| format!("Failed to load plan from {}", args.plan.display()))?;

    if args.json {
        let info = build_plan_info(&plan, args);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize plan info")?;
        println!("{}", json);
    } else {
        print_plan_info(&plan, args);
    }

    Ok(())
}

fn build_plan_info(plan: &ManeuverPlan, args: &InfoArgs) -> PlanInfo {
    let configs = plan
        .configs
        .iter()
        .map(|c| ConfigInfo {
            csv_file: c.csv_file_name(),
            weight_variant: c.weight_variant.to_string(),
            init_speed: c.init_speed,
            turn_count: c.turns.len(),
            turns: if args.turns {
                c.turns
                    .iter()
                    .map(|t| TurnInfo {
                        angle: t.angle,
                        duration: t.duration,
                    })
                    .collect()
            } else {
                Vec::new()
            },
        })
        .collect();

    PlanInfo {
        settings: SettingsInfo {
            drive_force: plan.settings.drive_force,
            rest_time: plan.settings.rest_time,
            rest_brake_torque: plan.settings.rest_brake_torque,
            output_dir: plan.settings.output_dir.clone(),
        },
        friction: FrictionInfo {
            forward_stiffness: plan.friction.forward.stiffness,
            sideways_stiffness: plan.friction.sideways.stiffness,
        },
        rig: RigInfo {
            spawn_points: plan.rig.spawn_points.iter().map(|s| s.name.clone()).collect(),
            wheel_count: plan.rig.wheels.len(),
            mass_ic: plan.rig.mass_ic,
            mass_ev: plan.rig.mass_ev,
        },
        configs,
    }
}

fn print_plan_info(plan: &ManeuverPlan, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Drift Harness Maneuver Plan                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Harness settings
    println!("⚙️  Settings");
    println!("   ├─ Drive force: {} N", plan.settings.drive_force);
    println!("   ├─ Rest time: {} s", plan.settings.rest_time);
    println!(
        "   ├─ Rest brake torque: {} N·m",
        plan.settings.rest_brake_torque
    );
    println!("   └─ Output directory: {}", plan.settings.output_dir);

    // Friction
    println!("\n🛞 Friction");
    println!(
        "   ├─ Forward: extremum {}/{}, asymptote {}/{}, stiffness {}",
        plan.friction.forward.extremum_slip,
        plan.friction.forward.extremum_value,
        plan.friction.forward.asymptote_slip,
        plan.friction.forward.asymptote_value,
        plan.friction.forward.stiffness
    );
    println!(
        "   └─ Sideways: extremum {}/{}, asymptote {}/{}, stiffness {}",
        plan.friction.sideways.extremum_slip,
        plan.friction.sideways.extremum_value,
        plan.friction.sideways.asymptote_slip,
        plan.friction.sideways.asymptote_value,
        plan.friction.sideways.stiffness
    );

    // Rig
    println!("\n🚗 Rig");
    println!(
        "   ├─ Mass: {} kg (IC) / {} kg (EV)",
        plan.rig.mass_ic, plan.rig.mass_ev
    );
    println!("   ├─ Wheels: {}", plan.rig.wheels.len());
    if plan.rig.spawn_points.is_empty() {
        println!("   └─ Spawn points: (none)");
    } else {
        println!("   └─ Spawn points ({}):", plan.rig.spawn_points.len());
        for (i, spawn) in plan.rig.spawn_points.iter().enumerate() {
            let prefix = if i == plan.rig.spawn_points.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!(
                "        {} {} at ({}, {}, {}), yaw {}°",
                prefix, spawn.name, spawn.position.x, spawn.position.y, spawn.position.z, spawn.yaw
            );
        }
    }

    // Configurations
    println!("\n📋 Configurations ({})", plan.configs.len());
    for (i, config) in plan.configs.iter().enumerate() {
        let is_last = i == plan.configs.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} {} ({}, {} km/h)",
            prefix,
            config.csv_file_name(),
            config.weight_variant,
            config.init_speed
        );

        if args.turns && !config.turns.is_empty() {
            println!("   {}  🔄 Turns ({}):", child_prefix, config.turns.len());
            for (j, turn) in config.turns.iter().enumerate() {
                let turn_prefix = if j == config.turns.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                println!(
                    "   {}     {} {}° for {} s",
                    child_prefix, turn_prefix, turn.angle, turn.duration
                );
            }
        } else {
            println!("   {}  └─ {} turns", child_prefix, config.turns.len());
        }
    }

    println!();
}
