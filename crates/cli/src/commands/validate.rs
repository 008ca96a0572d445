//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    plan_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PlanSummary>,
}

#[derive(Serialize)]
struct PlanSummary {
    config_count: usize,
    turn_step_count: usize,
    spawn_point_count: usize,
    wheel_count: usize,
    output_dir: String,
    csv_files: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(plan = %args.plan.display(), "Validating maneuver plan");

    let result = validate_plan(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        let message = result
            .error
            .unwrap_or_else(|| "unknown validation failure".to_string());
        Err(CliError::plan_validation(message).into())
    }
}

fn validate_plan(args: &ValidateArgs) -> ValidationResult {
    let plan_path = args.plan.display().to_string();

    if !args.plan.exists() {
        return ValidationResult {
            valid: false,
            plan_path,
            error: Some(format!("File not found: {}", args.plan.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.plan) {
        Ok(plan) => {
            let warnings = config_loader::collect_warnings(&plan);
            let turn_step_count: usize = plan.configs.iter().map(|c| c.turns.len()).sum();

            ValidationResult {
                valid: true,
                plan_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(PlanSummary {
                    config_count: plan.configs.len(),
                    turn_step_count,
                    spawn_point_count: plan.rig.spawn_points.len(),
                    wheel_count: plan.rig.wheels.len(),
                    output_dir: plan.settings.output_dir.clone(),
                    csv_files: plan.configs.iter().map(|c| c.csv_file_name()).collect(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            plan_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Maneuver plan is valid: {}", result.plan_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Configurations: {}", summary.config_count);
            println!("  Turn steps: {}", summary.turn_step_count);
            println!("  Spawn points: {}", summary.spawn_point_count);
            println!("  Wheels: {}", summary.wheel_count);
            println!("  Output directory: {}", summary.output_dir);
            println!("  CSV files: {}", summary.csv_files.join(", "));
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Maneuver plan is invalid: {}", result.plan_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
