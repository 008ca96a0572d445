//! Harness orchestrator - wires the plan, vehicle host, and sequencer.
//!
//! Runs the maneuver schedule tick by tick: each iteration advances the
//! sequencer, then steps the vehicle host by the same timestep. Ticks run
//! flat out unless pacing against the wall clock was requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{ManeuverPlan, VehicleHost};
use observability::record_run_report;
use sequencer::{ManeuverSequencer, TickEvent};
use tracing::{debug, info, warn};
use vehicle_host::MockVehicleHost;

use super::PipelineStats;

/// Harness pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The maneuver plan to execute
    pub plan: ManeuverPlan,

    /// Simulation ticks per second
    pub tick_rate: f64,

    /// Pace ticks against the wall clock
    pub paced: bool,

    /// Maximum number of ticks (None = unlimited)
    pub max_ticks: Option<u64>,

    /// Configuration index to start the schedule at
    pub start_index: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main harness orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the maneuver schedule to completion
    pub async fn run(self, shutdown: Arc<AtomicBool>) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let plan = &self.config.plan;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Build the vehicle host from the rig description
        let mut host =
            MockVehicleHost::from_rig(&plan.rig).context("Failed to build vehicle host")?;
        host.apply_friction(&plan.friction);

        info!(
            wheels = plan.rig.wheels.len(),
            spawn_points = plan.rig.spawn_points.len(),
            "Vehicle host ready"
        );

        // Build the sequencer over the configuration schedule
        let mut sequencer =
            ManeuverSequencer::new(plan.configs.clone(), plan.settings.clone())
                .context("Failed to build sequencer")?;

        sequencer
            .start_at(&mut host, self.config.start_index)
            .context("Failed to start maneuver schedule")?;

        let dt = 1.0 / self.config.tick_rate;
        let mut interval = self
            .config
            .paced
            .then(|| tokio::time::interval(Duration::from_secs_f64(dt)));

        info!(
            tick_rate = self.config.tick_rate,
            paced = self.config.paced,
            max_ticks = ?self.config.max_ticks,
            start_index = self.config.start_index,
            "Harness running"
        );

        let mut stats = PipelineStats::default();

        loop {
            if shutdown.load(Ordering::SeqCst) {
                warn!(ticks = stats.ticks, "Harness interrupted");
                stats.interrupted = true;
                break;
            }

            let event = sequencer
                .tick(&mut host, dt)
                .context("Sequencer tick failed")?;
            host.step(dt);
            stats.ticks += 1;

            match event {
                TickEvent::RunEnded { report } => {
                    stats.runs_completed += 1;
                    record_run_report(&report);
                    stats.harness_metrics.update(&report);

                    info!(
                        config_index = report.config_index,
                        csv_path = %report.csv_path.display(),
                        samples = report.samples,
                        transitions = report.transitions,
                        peak_speed = format!("{:.2}", report.peak_speed),
                        "Maneuver run completed"
                    );
                }
                TickEvent::RunStarted { config_index } => {
                    info!(config_index, "Next maneuver run started");
                }
                TickEvent::TurnStarted => {
                    debug!(sim_time = sequencer.sim_time(), "Turn sequence started");
                }
                TickEvent::TurnAdvanced { turn_index } => {
                    debug!(turn_index, "Turn entry advanced");
                }
                TickEvent::RestStarted => {
                    debug!(sim_time = sequencer.sim_time(), "Rest phase started");
                }
                TickEvent::Halted => {
                    info!(ticks = stats.ticks, "Maneuver schedule exhausted");
                    stats.halted = true;
                    break;
                }
                TickEvent::None | TickEvent::Inactive => {}
            }

            if let Some(max) = self.config.max_ticks {
                if stats.ticks >= max {
                    info!(ticks = stats.ticks, "Reached tick limit");
                    break;
                }
            }

            if let Some(ref mut interval) = interval {
                interval.tick().await;
            }
        }

        stats.duration = start_time.elapsed();

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            runs_completed = stats.runs_completed,
            "Harness shutdown complete"
        );

        Ok(stats)
    }
}
