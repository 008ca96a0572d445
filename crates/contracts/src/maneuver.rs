//! ManeuverPlan - Config Loader 输出
//!
//! 描述完整的试验计划：全局参数、摩擦设置、车辆台架几何、机动配置列表。

use serde::{Deserialize, Serialize};

use crate::{FrictionSettings, Vec3, WeightVariant, WheelSlot};

/// 完整试验计划
///
/// 由宿主应用以内存结构体传入排序器；文件装载属于 config_loader 层。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManeuverPlan {
    /// 全局参数
    #[serde(default)]
    pub settings: HarnessSettings,

    /// 轮胎摩擦设置
    #[serde(default)]
    pub friction: FrictionSettings,

    /// 车辆台架几何
    #[serde(default)]
    pub rig: RigConfig,

    /// 机动配置列表，按序执行
    pub configs: Vec<ManeuverConfig>,
}

/// 全局参数（原为引擎侧可调字段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessSettings {
    /// 加速阶段施加到每个车轮的驱动扭矩 (N·m)
    #[serde(default = "default_drive_force")]
    pub drive_force: f64,

    /// 静止阶段时长 (秒)
    #[serde(default = "default_rest_time")]
    pub rest_time: f64,

    /// 静止阶段的制动扭矩 (N·m)，视为最大制动
    #[serde(default = "default_rest_brake_torque")]
    pub rest_brake_torque: f64,

    /// 遥测 CSV 输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_drive_force() -> f64 {
    2000.0
}

fn default_rest_time() -> f64 {
    5.0
}

fn default_rest_brake_torque() -> f64 {
    1_000_000.0
}

fn default_output_dir() -> String {
    "Results".to_string()
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            drive_force: default_drive_force(),
            rest_time: default_rest_time(),
            rest_brake_torque: default_rest_brake_torque(),
            output_dir: default_output_dir(),
        }
    }
}

/// 单条机动配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManeuverConfig {
    /// 配置名（可为空；空名时输出文件名由配重与速度推导）
    #[serde(default)]
    pub name: String,

    /// 配重方案
    #[serde(default)]
    pub weight_variant: WeightVariant,

    /// 加速目标速度 (km/h)，达到后进入转向阶段
    pub init_speed: f64,

    /// 转向序列，按序执行
    #[serde(default)]
    pub turns: Vec<TurnStep>,
}

impl ManeuverConfig {
    /// 遥测导出文件名
    ///
    /// 命名规则：有名配置用 `<name>.csv`，
    /// 无名配置用 `<ic|ev>_<init_speed>.csv`。
    pub fn csv_file_name(&self) -> String {
        if self.name.is_empty() {
            format!("{}_{}.csv", self.weight_variant.tag(), self.init_speed)
        } else {
            format!("{}.csv", self.name)
        }
    }
}

/// 单步转向
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnStep {
    /// 转向角 (度)，施加于后轴车轮
    pub angle: f64,

    /// 保持时长 (秒)
    pub duration: f64,
}

/// 车辆台架几何
///
/// 出生点可以为空：运行启动时缺少出生点是致命配置错误，装载时仅告警。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigConfig {
    /// 候选出生点列表；复位时选距离最近者
    #[serde(default)]
    pub spawn_points: Vec<SpawnPoint>,

    /// 车轮挂载，四个槽位各恰好一个
    #[serde(default)]
    pub wheels: Vec<WheelMount>,

    /// IC 配重下整车质量 (kg)
    #[serde(default = "default_mass_ic")]
    pub mass_ic: f64,

    /// EV 配重下整车质量 (kg)
    #[serde(default = "default_mass_ev")]
    pub mass_ev: f64,
}

fn default_mass_ic() -> f64 {
    1500.0
}

fn default_mass_ev() -> f64 {
    1700.0
}

/// 出生点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// 名称（日志用，可为空）
    #[serde(default)]
    pub name: String,

    /// 位置 (米)
    pub position: Vec3,

    /// 朝向角 yaw (度)
    #[serde(default)]
    pub yaw: f64,
}

/// 车轮挂载
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelMount {
    /// 槽位
    pub slot: WheelSlot,

    /// 相对质心的纵向偏移 (米)；>= 0 为前轴，< 0 为后轴
    pub longitudinal_offset: f64,
}

impl WheelMount {
    /// 常规四轮布局（前轴 +1.25 m，后轴 -1.45 m）
    pub fn standard_set() -> Vec<WheelMount> {
        vec![
            WheelMount {
                slot: WheelSlot::FrontLeft,
                longitudinal_offset: 1.25,
            },
            WheelMount {
                slot: WheelSlot::FrontRight,
                longitudinal_offset: 1.25,
            },
            WheelMount {
                slot: WheelSlot::RearLeft,
                longitudinal_offset: -1.45,
            },
            WheelMount {
                slot: WheelSlot::RearRight,
                longitudinal_offset: -1.45,
            },
        ]
    }
}
