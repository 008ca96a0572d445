//! 运行指标收集模块
//!
//! 基于 RunReport 收集和统计机动运行的指标。

use std::collections::HashMap;

use contracts::RunReport;
use metrics::{counter, gauge, histogram};

/// 从 RunReport 记录指标
///
/// 每次运行结束（REST→END）时调用此函数来记录指标。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_run_report;
///
/// if let TickEvent::RunEnded { report } = seq.tick(&mut host, dt)? {
///     record_run_report(&report);
/// }
/// ```
pub fn record_run_report(report: &RunReport) {
    counter!("drift_harness_runs_completed_total").increment(1);
    counter!("drift_harness_samples_recorded_total").increment(report.samples as u64);
    counter!("drift_harness_transitions_total").increment(report.transitions);

    gauge!("drift_harness_last_config_index").set(report.config_index as f64);

    histogram!("drift_harness_run_duration_seconds").record(report.sim_duration);
    histogram!("drift_harness_run_peak_speed_kmh").record(report.peak_speed);
    histogram!(
        "drift_harness_run_samples",
        "weight_variant" => report.weight_variant.tag()
    )
    .record(report.samples as f64);
}

/// 运行指标聚合器
///
/// 在内存中聚合 RunReport，便于进程结束时输出摘要。
#[derive(Debug, Clone, Default)]
pub struct HarnessMetricsAggregator {
    /// 完成的运行数
    pub total_runs: u64,

    /// 累计遥测采样数
    pub total_samples: u64,

    /// 累计相位转移数
    pub total_transitions: u64,

    /// 运行时长统计 (秒)
    pub duration_stats: RunningStats,

    /// 峰值速度统计 (km/h)
    pub peak_speed_stats: RunningStats,

    /// 各配置的完成次数（无名配置按推导文件名计）
    pub config_outcomes: HashMap<String, u64>,
}

impl HarnessMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, report: &RunReport) {
        self.total_runs += 1;
        self.total_samples += report.samples as u64;
        self.total_transitions += report.transitions;
        self.duration_stats.push(report.sim_duration);
        self.peak_speed_stats.push(report.peak_speed);

        let key = if report.config_name.is_empty() {
            format!("{}_{}", report.weight_variant.tag(), report.init_speed)
        } else {
            report.config_name.clone()
        };
        *self.config_outcomes.entry(key).or_insert(0) += 1;
    }

    /// 生成摘要报告
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_runs: self.total_runs,
            total_samples: self.total_samples,
            total_transitions: self.total_transitions,
            samples_per_run: if self.total_runs > 0 {
                self.total_samples as f64 / self.total_runs as f64
            } else {
                0.0
            },
            duration_seconds: StatsSummary::from(&self.duration_stats),
            peak_speed_kmh: StatsSummary::from(&self.peak_speed_stats),
            config_outcomes: self.config_outcomes.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_runs: u64,
    pub total_samples: u64,
    pub total_transitions: u64,
    pub samples_per_run: f64,
    pub duration_seconds: StatsSummary,
    pub peak_speed_kmh: StatsSummary,
    pub config_outcomes: HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Harness Metrics Summary ===")?;
        writeln!(f, "Runs completed: {}", self.total_runs)?;
        writeln!(
            f,
            "Samples recorded: {} ({:.1} per run)",
            self.total_samples, self.samples_per_run
        )?;
        writeln!(f, "Phase transitions: {}", self.total_transitions)?;
        writeln!(f, "Run duration (s): {}", self.duration_seconds)?;
        writeln!(f, "Peak speed (km/h): {}", self.peak_speed_kmh)?;

        if !self.config_outcomes.is_empty() {
            writeln!(f, "Per-config completions:")?;
            let mut entries: Vec<_> = self.config_outcomes.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (config, count) in entries {
                writeln!(f, "  {}: {}", config, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
