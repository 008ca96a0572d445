//! 车辆侧共享类型
//!
//! 描述车轮槽位、机动阶段、配重/相机循环枚举与每 tick 遥测采样。

use serde::{Deserialize, Serialize};

/// 机动阶段
///
/// 每个 fixed timestep 评估一次状态转移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// 直线加速，直到达到目标速度
    Acc,
    /// 按转向序列依次转向（仅后轴）
    Turn,
    /// 全力制动直至静止计时结束
    Rest,
    /// 单次运行结束：导出遥测并推进到下一配置或停机
    End,
}

impl Phase {
    /// 日志/指标用的稳定小写标签
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Acc => "acc",
            Phase::Turn => "turn",
            Phase::Rest => "rest",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 配重方案：内燃机 (IC) 或电动 (EV) 质量分布
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightVariant {
    /// 内燃机：发动机缸体质量生效
    #[default]
    Ic,
    /// 电动：电池包质量生效
    Ev,
}

impl WeightVariant {
    /// 显式循环切换（取代隐式 ++ 回绕）
    pub fn next(self) -> Self {
        match self {
            WeightVariant::Ic => WeightVariant::Ev,
            WeightVariant::Ev => WeightVariant::Ic,
        }
    }

    /// 文件名用的小写标记
    pub fn tag(&self) -> &'static str {
        match self {
            WeightVariant::Ic => "ic",
            WeightVariant::Ev => "ev",
        }
    }
}

impl std::fmt::Display for WeightVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightVariant::Ic => f.write_str("IC"),
            WeightVariant::Ev => f.write_str("EV"),
        }
    }
}

/// 跟车相机模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// 俯视航拍位
    #[default]
    Heli,
    /// 车后跟随位
    Behind,
    /// 侧面跟随位
    Side,
}

impl CameraMode {
    /// 显式循环：HELI → BEHIND → SIDE → HELI
    pub fn next(self) -> Self {
        match self {
            CameraMode::Heli => CameraMode::Behind,
            CameraMode::Behind => CameraMode::Side,
            CameraMode::Side => CameraMode::Heli,
        }
    }
}

/// 附加配重件（车辆切换器的三态循环）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassKit {
    /// 不挂载任何配重件
    #[default]
    Empty,
    /// 挂载电池包
    BatteryPack,
    /// 挂载发动机缸体
    EngineBlock,
}

impl MassKit {
    /// 显式循环：Empty → BatteryPack → EngineBlock → Empty
    pub fn next(self) -> Self {
        match self {
            MassKit::Empty => MassKit::BatteryPack,
            MassKit::BatteryPack => MassKit::EngineBlock,
            MassKit::EngineBlock => MassKit::Empty,
        }
    }
}

/// 车轮槽位，固定 FL / FR / RL / RR 顺序
///
/// CSV 列顺序与 [`WheelSlot::ALL`] 一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelSlot {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelSlot {
    /// 全部槽位，遥测列顺序
    pub const ALL: [WheelSlot; 4] = [
        WheelSlot::FrontLeft,
        WheelSlot::FrontRight,
        WheelSlot::RearLeft,
        WheelSlot::RearRight,
    ];

    /// 列标题用的短标签
    pub fn label(&self) -> &'static str {
        match self {
            WheelSlot::FrontLeft => "FL",
            WheelSlot::FrontRight => "FR",
            WheelSlot::RearLeft => "RL",
            WheelSlot::RearRight => "RR",
        }
    }

    /// 在 [`WheelSlot::ALL`] 中的下标
    pub fn index(&self) -> usize {
        match self {
            WheelSlot::FrontLeft => 0,
            WheelSlot::FrontRight => 1,
            WheelSlot::RearLeft => 2,
            WheelSlot::RearRight => 3,
        }
    }
}

/// 三维向量（米 / 米每秒）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 向量模长
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// 到另一点的欧氏距离
    pub fn distance(&self, other: &Vec3) -> f64 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z).magnitude()
    }
}

/// 单轮诊断读数（由物理宿主提供）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDiagnostics {
    /// 轮胎接地力 (N)
    pub force: f64,
    /// 纵向滑移率
    pub longitudinal_slip: f64,
    /// 横向滑移率
    pub lateral_slip: f64,
}

/// 每 tick 遥测采样
///
/// 运行激活期间每 tick 追加一条；各序列长度必须始终相等。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// 运行内仿真时间 (秒)
    pub time: f64,
    /// 车速 (km/h)
    pub speed: f64,
    /// 车身侧倾角 (度，宿主原始 0-360 域)
    pub roll: f64,
    /// 四轮诊断，FL / FR / RL / RR 顺序
    pub wheels: [WheelDiagnostics; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_variant_cycles_without_wraparound_arithmetic() {
        assert_eq!(WeightVariant::Ic.next(), WeightVariant::Ev);
        assert_eq!(WeightVariant::Ev.next(), WeightVariant::Ic);
    }

    #[test]
    fn camera_mode_cycles_through_all_three() {
        let start = CameraMode::Heli;
        let mut mode = start;
        mode = mode.next();
        assert_eq!(mode, CameraMode::Behind);
        mode = mode.next();
        assert_eq!(mode, CameraMode::Side);
        mode = mode.next();
        assert_eq!(mode, start);
    }

    #[test]
    fn mass_kit_cycles_through_all_three() {
        let mut kit = MassKit::Empty;
        kit = kit.next();
        assert_eq!(kit, MassKit::BatteryPack);
        kit = kit.next();
        assert_eq!(kit, MassKit::EngineBlock);
        kit = kit.next();
        assert_eq!(kit, MassKit::Empty);
    }

    #[test]
    fn wheel_slot_order_matches_column_layout() {
        let labels: Vec<&str> = WheelSlot::ALL.iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["FL", "FR", "RL", "RR"]);
        for (i, slot) in WheelSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn vec3_magnitude_and_distance() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
        assert!((v.distance(&Vec3::ZERO) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn sample_serde_uses_snake_case() {
        let sample = TelemetrySample {
            time: 0.02,
            speed: 12.5,
            roll: 359.0,
            wheels: [WheelDiagnostics::default(); 4],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"speed\":12.5"));
        assert!(json.contains("\"longitudinal_slip\""));
        let back: TelemetrySample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn phase_labels_are_stable() {
        assert_eq!(Phase::Acc.label(), "acc");
        assert_eq!(Phase::Turn.label(), "turn");
        assert_eq!(Phase::Rest.label(), "rest");
        assert_eq!(Phase::End.label(), "end");
    }
}
