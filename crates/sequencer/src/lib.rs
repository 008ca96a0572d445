//! # Maneuver Sequencer
//!
//! 机动排序器：每个物理 tick 驱动一次的四态状态机。
//!
//! 负责：
//! - ACC → TURN → REST → END 相位推进
//! - 每 tick 写入车轮执行目标（驱动/制动扭矩、转向角）
//! - 每 tick 追加一条遥测采样
//! - REST→END 时导出 CSV 并产出 `RunReport`
//! - END 后自动推进到下一配置或停机
//!
//! ## 使用示例
//!
//! ```ignore
//! use sequencer::{ManeuverSequencer, TickEvent};
//!
//! let mut seq = ManeuverSequencer::new(plan.configs, plan.settings)?;
//! seq.start(&mut host)?;
//!
//! while seq.is_active() {
//!     if let TickEvent::RunEnded { report } = seq.tick(&mut host, dt)? {
//!         println!("{} samples -> {}", report.samples, report.csv_path.display());
//!     }
//!     host.step(dt);
//! }
//! ```

mod engine;
mod error;

pub use engine::{ManeuverSequencer, TickEvent};
pub use error::SequencerError;

// Re-export contracts types callers need alongside the sequencer
pub use contracts::{HarnessSettings, ManeuverConfig, Phase, RunReport, TurnStep};
