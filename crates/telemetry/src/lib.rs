//! # Telemetry
//!
//! 遥测汇模块。
//!
//! 负责：
//! - 逐 tick 追加标量时间序列（时间 / 速度 / 侧倾 / 四轮力与滑移）
//! - 导出前的序列长度完整性校验
//! - 15 列 CSV 落盘（含导出时侧倾归一化）

pub mod csv;
pub mod error;
pub mod log;

pub use contracts::TelemetrySample;
pub use csv::CSV_COLUMNS;
pub use error::TelemetryError;
pub use log::TelemetryLog;
