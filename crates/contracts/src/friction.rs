//! 轮胎摩擦曲线参数
//!
//! 参数透传给物理宿主的轮碰撞体，本 crate 不做任何曲线求解。

use serde::{Deserialize, Serialize};

/// 单方向摩擦曲线（纵向或横向）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionCurve {
    /// 极值点滑移率
    pub extremum_slip: f64,
    /// 极值点摩擦系数
    pub extremum_value: f64,
    /// 渐近点滑移率
    pub asymptote_slip: f64,
    /// 渐近点摩擦系数
    pub asymptote_value: f64,
    /// 刚度系数
    pub stiffness: f64,
}

impl FrictionCurve {
    pub fn new(
        extremum_slip: f64,
        extremum_value: f64,
        asymptote_slip: f64,
        asymptote_value: f64,
        stiffness: f64,
    ) -> Self {
        Self {
            extremum_slip,
            extremum_value,
            asymptote_slip,
            asymptote_value,
            stiffness,
        }
    }
}

/// 前向 + 侧向两条摩擦曲线
///
/// `Default` 为启动缺省值；[`FrictionSettings::factory_reset`] 为
/// 调参面板"恢复默认"按钮使用的出厂值，两组并不相同。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionSettings {
    /// 纵向（驱动/制动方向）曲线
    #[serde(default = "default_forward_curve")]
    pub forward: FrictionCurve,
    /// 横向（转向方向）曲线
    #[serde(default = "default_sideways_curve")]
    pub sideways: FrictionCurve,
}

fn default_forward_curve() -> FrictionCurve {
    FrictionCurve::new(0.3, 1.0, 0.2, 0.8, 1.0)
}

fn default_sideways_curve() -> FrictionCurve {
    FrictionCurve::new(0.05, 2.0, 0.02, 1.0, 1.0)
}

impl Default for FrictionSettings {
    fn default() -> Self {
        Self {
            forward: default_forward_curve(),
            sideways: default_sideways_curve(),
        }
    }
}

impl FrictionSettings {
    /// 出厂复位值
    pub fn factory_reset() -> Self {
        Self {
            forward: FrictionCurve::new(0.8, 1.0, 0.4, 0.8, 2.0),
            sideways: FrictionCurve::new(0.01, 1.0, 0.005, 0.8, 2.0),
        }
    }
}
