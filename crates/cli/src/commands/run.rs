//! `run` command implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::ManeuverPlan;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_harness(args: &RunArgs) -> Result<()> {
    info!(plan = %args.plan.display(), "Loading maneuver plan");

    if !args.plan.exists() {
        return Err(CliError::plan_not_found(args.plan.display().to_string()).into());
    }

    if args.tick_rate <= 0.0 || !args.tick_rate.is_finite() {
        return Err(
            CliError::plan_validation(format!("tick rate must be positive: {}", args.tick_rate))
                .into(),
        );
    }

    let mut plan = config_loader::ConfigLoader::load_from_path(&args.plan)
        .with_context(|| format!("Failed to load plan from {}", args.plan.display()))?;

    // Apply CLI overrides
    if let Some(ref dir) = args.output_dir {
        info!(output_dir = %dir, "Overriding output directory from CLI");
        plan.settings.output_dir = dir.clone();
    }
    if let Some(ref path) = args.friction {
        info!(path = %path.display(), "Loading friction settings override");
        plan.friction = config_loader::friction_store::load(path)
            .with_context(|| format!("Failed to load friction settings from {}", path.display()))?;
    }

    for warning in config_loader::collect_warnings(&plan) {
        warn!(warning = %warning, "Plan warning");
    }

    info!(
        configs = plan.configs.len(),
        spawn_points = plan.rig.spawn_points.len(),
        output_dir = %plan.settings.output_dir,
        "Maneuver plan loaded"
    );

    // Dry run - check the plan builds a host, then exit
    if args.dry_run {
        vehicle_host::MockVehicleHost::from_rig(&plan.rig)
            .context("Rig does not build a vehicle host")?;
        info!("Dry run mode - plan is valid, exiting");
        print_plan_summary(&plan);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        plan,
        tick_rate: args.tick_rate,
        paced: args.paced,
        max_ticks: if args.max_ticks == 0 {
            None
        } else {
            Some(args.max_ticks)
        },
        start_index: args.start_index,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_shutdown_watcher(Arc::clone(&shutdown));

    info!("Starting harness...");

    let stats = pipeline
        .run(shutdown)
        .await
        .context("Harness execution failed")?;

    info!(
        ticks = stats.ticks,
        runs_completed = stats.runs_completed,
        duration_secs = stats.duration.as_secs_f64(),
        tick_rate = format!("{:.2}", stats.ticks_per_second()),
        "Harness completed"
    );

    stats.print_summary();

    info!("Drift Harness finished");
    Ok(())
}

/// Set the shutdown flag on Ctrl+C or SIGTERM
fn spawn_shutdown_watcher(shutdown: Arc<AtomicBool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        warn!("Received shutdown signal, stopping harness...");
        shutdown.store(true, Ordering::SeqCst);
    });
}

/// Print plan summary for dry-run mode
fn print_plan_summary(plan: &ManeuverPlan) {
    println!("\n=== Maneuver Plan Summary ===\n");
    println!("Settings:");
    println!("  Drive force: {} N", plan.settings.drive_force);
    println!("  Rest time: {} s", plan.settings.rest_time);
    println!("  Output directory: {}", plan.settings.output_dir);
    println!("\nRig:");
    println!("  Spawn points: {}", plan.rig.spawn_points.len());
    println!("  Wheels: {}", plan.rig.wheels.len());
    println!(
        "  Mass: {} kg (IC) / {} kg (EV)",
        plan.rig.mass_ic, plan.rig.mass_ev
    );
    println!("\nConfigurations ({}):", plan.configs.len());
    for config in &plan.configs {
        println!(
            "  - {} ({}, {} km/h, {} turns)",
            config.csv_file_name(),
            config.weight_variant,
            config.init_speed,
            config.turns.len()
        );
    }
    println!();
}
