//! Harness run statistics.

use std::time::Duration;

use observability::HarnessMetricsAggregator;

/// Statistics from a harness run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Total simulation ticks executed
    pub ticks: u64,

    /// Maneuver runs completed (telemetry exported)
    pub runs_completed: u64,

    /// Total wall-clock duration of the harness run
    pub duration: Duration,

    /// The schedule ran to completion
    pub halted: bool,

    /// The run was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Harness metrics aggregator
    pub harness_metrics: HarnessMetricsAggregator,
}

impl PipelineStats {
    /// Achieved wall-clock tick rate
    pub fn ticks_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Harness Statistics                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Ticks: {}", self.ticks);
        println!("   ├─ Tick rate: {:.2}/s", self.ticks_per_second());
        println!("   ├─ Runs completed: {}", self.runs_completed);
        if self.interrupted {
            println!("   └─ Outcome: interrupted");
        } else if self.halted {
            println!("   └─ Outcome: schedule completed");
        } else {
            println!("   └─ Outcome: stopped at tick limit");
        }

        println!("\n📈 {}", self.harness_metrics.summary());
    }
}
