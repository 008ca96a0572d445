//! Plan File Run Demo
//!
//! Loads a maneuver plan from a TOML file and executes the full schedule
//! against the mock vehicle host.
//!
//! Run with: cargo run --bin plan_file_run [plan_path]

use std::path::PathBuf;

use config_loader::ConfigLoader;
use contracts::VehicleHost;
use sequencer::{ManeuverSequencer, TickEvent};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vehicle_host::MockVehicleHost;

const DT: f64 = 0.02;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let plan_path = resolve_plan_path();
    info!(path = %plan_path.display(), "Loading maneuver plan");

    let plan = ConfigLoader::load_from_path(plan_path.as_path())?;

    for warning in config_loader::collect_warnings(&plan) {
        warn!(warning = %warning, "Plan warning");
    }

    info!(
        configs = plan.configs.len(),
        output_dir = %plan.settings.output_dir,
        "Plan loaded"
    );

    let mut host = MockVehicleHost::from_rig(&plan.rig)?;
    host.apply_friction(&plan.friction);

    let mut sequencer = ManeuverSequencer::new(plan.configs, plan.settings)?;
    sequencer.start(&mut host)?;

    while sequencer.is_active() {
        let event = sequencer.tick(&mut host, DT)?;
        host.step(DT);

        if let TickEvent::RunEnded { report } = event {
            info!(
                csv = %report.csv_path.display(),
                samples = report.samples,
                peak_speed = format!("{:.1}", report.peak_speed),
                "Run completed"
            );
        }
    }

    info!("All maneuver runs finished");
    Ok(())
}

fn resolve_plan_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/plan.toml"))
}
