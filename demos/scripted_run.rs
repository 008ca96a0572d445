//! Scripted Run Demo
//!
//! Builds a maneuver plan in memory, drives it through the sequencer against
//! the built-in mock vehicle host, and prints every run report.
//!
//! Run with: cargo run --bin scripted_run

use contracts::{
    HarnessSettings, ManeuverConfig, RigConfig, SpawnPoint, TurnStep, Vec3, WeightVariant,
    WheelMount,
};
use sequencer::{ManeuverSequencer, TickEvent};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vehicle_host::MockVehicleHost;

const DT: f64 = 0.02;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Scripted Run Demo");

    let rig = RigConfig {
        spawn_points: vec![SpawnPoint {
            name: "skid_pad".to_string(),
            position: Vec3::ZERO,
            yaw: 0.0,
        }],
        wheels: WheelMount::standard_set(),
        mass_ic: 1500.0,
        mass_ev: 1700.0,
    };

    let settings = HarnessSettings {
        drive_force: 2000.0,
        rest_time: 2.0,
        rest_brake_torque: 1_000_000.0,
        output_dir: "Results".to_string(),
    };

    let configs = vec![
        ManeuverConfig {
            name: "slalom_ic".to_string(),
            weight_variant: WeightVariant::Ic,
            init_speed: 50.0,
            turns: vec![
                TurnStep {
                    angle: 15.0,
                    duration: 1.0,
                },
                TurnStep {
                    angle: -15.0,
                    duration: 1.0,
                },
            ],
        },
        ManeuverConfig {
            name: String::new(),
            weight_variant: WeightVariant::Ev,
            init_speed: 40.0,
            turns: vec![TurnStep {
                angle: 20.0,
                duration: 1.5,
            }],
        },
    ];

    let mut host = MockVehicleHost::from_rig(&rig)?;
    let mut sequencer = ManeuverSequencer::new(configs, settings)?;
    sequencer.start(&mut host)?;

    let mut aggregator = observability::HarnessMetricsAggregator::new();
    let mut ticks = 0u64;

    while sequencer.is_active() {
        let event = sequencer.tick(&mut host, DT)?;
        host.step(DT);
        ticks += 1;

        match event {
            TickEvent::RunEnded { report } => {
                info!(
                    config = %report.config_name,
                    csv = %report.csv_path.display(),
                    samples = report.samples,
                    transitions = report.transitions,
                    peak_speed = format!("{:.1}", report.peak_speed),
                    "Run completed"
                );
                aggregator.update(&report);
            }
            TickEvent::Halted => {
                info!(ticks, "Schedule exhausted");
            }
            _ => {}
        }
    }

    println!("\n{}", aggregator.summary());
    Ok(())
}
