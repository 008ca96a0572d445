//! Mock 物理宿主
//!
//! 确定性闭式车辆模型，实现 [`VehicleHost`]。不是物理引擎：存在的目的
//! 是让排序器的每条路径（加速阈值、转向响应、制动静止、侧倾越过 300°）
//! 都能在测试、演示与 CLI 干跑中可复现地走到。

use contracts::{
    FrictionSettings, HarnessError, RigConfig, SpawnPoint, Vec3, VehicleHost, WeightVariant,
    WheelDiagnostics, WheelSlot,
};
use tracing::{debug, trace};

use crate::selector::closest_spawn;

/// 车轮半径 (米)
const WHEEL_RADIUS: f64 = 0.33;
/// 气动阻力系数 (N / (m/s)^2)
const DRAG_COEFF: f64 = 0.45;
/// 滚动阻力 (N)，仅在运动时计入
const ROLLING_RESISTANCE: f64 = 200.0;
/// 重力加速度 (m/s^2)
const GRAVITY: f64 = 9.81;
/// 质心高度 (米)，纵向载荷转移用
const CG_HEIGHT: f64 = 0.55;
/// 后轴转向引起的侧倾速率增益 (度每 度·m/s·s)
const ROLL_GAIN: f64 = 0.15;
/// 无转向输入时侧倾回零速率 (1/s)
const ROLL_DECAY: f64 = 1.2;

/// 确定性 mock 物理宿主
///
/// 内部以带符号侧倾角累积，[`VehicleHost::roll_angle`] 按宿主约定折回
/// 0-360 域，小幅负侧倾落在 350° 区间附近。
#[derive(Debug, Clone)]
pub struct MockVehicleHost {
    /// 车轮纵向偏移，按 [`WheelSlot::ALL`] 顺序
    offsets: [f64; 4],
    /// 当前驱动扭矩目标 (N·m)
    motor: [f64; 4],
    /// 当前制动扭矩目标 (N·m)
    brake: [f64; 4],
    /// 当前转向角目标 (度)
    steer: [f64; 4],
    /// 标量车速 (m/s)，本模型不倒车
    speed: f64,
    /// 上一积分步的纵向加速度 (m/s^2)，载荷转移用
    last_accel: f64,
    /// 车身位置 (米)
    position: Vec3,
    /// 朝向角 yaw (度)
    yaw: f64,
    /// 带符号侧倾角 (度)
    roll_signed: f64,
    /// 休眠时不积分
    asleep: bool,
    /// 当前生效整车质量 (kg)
    mass: f64,
    /// IC 配重质量 (kg)
    mass_ic: f64,
    /// EV 配重质量 (kg)
    mass_ev: f64,
    /// 轮胎摩擦设置，刚度缩放滑移输出
    friction: FrictionSettings,
    /// 候选出生点
    spawn_points: Vec<SpawnPoint>,
}

impl MockVehicleHost {
    /// 从台架几何构建；四个槽位缺一不可
    pub fn from_rig(rig: &RigConfig) -> Result<Self, HarnessError> {
        let mut offsets = [0.0; 4];
        for slot in WheelSlot::ALL {
            let mount = rig
                .wheels
                .iter()
                .find(|w| w.slot == slot)
                .ok_or_else(|| HarnessError::MissingWheel {
                    slot: slot.label().to_string(),
                })?;
            offsets[slot.index()] = mount.longitudinal_offset;
        }

        Ok(Self {
            offsets,
            motor: [0.0; 4],
            brake: [0.0; 4],
            steer: [0.0; 4],
            speed: 0.0,
            last_accel: 0.0,
            position: Vec3::ZERO,
            yaw: 0.0,
            roll_signed: 0.0,
            asleep: false,
            mass: rig.mass_ic,
            mass_ic: rig.mass_ic,
            mass_ev: rig.mass_ev,
            friction: FrictionSettings::default(),
            spawn_points: rig.spawn_points.clone(),
        })
    }

    /// 以当前执行目标推进一个积分步
    ///
    /// 休眠状态下不积分。闭式模型：平均驱动扭矩产生纵向力，制动与
    /// 阻力做减速，后轴转向驱动车身侧倾并向高 350° 区折回。
    pub fn step(&mut self, dt: f64) {
        if self.asleep {
            return;
        }

        let drive_force: f64 = self.motor.iter().sum::<f64>() / WHEEL_RADIUS;
        let brake_force: f64 = self.brake.iter().sum::<f64>() / WHEEL_RADIUS;
        let drag = DRAG_COEFF * self.speed * self.speed
            + if self.speed > 0.0 {
                ROLLING_RESISTANCE
            } else {
                0.0
            };

        let mut accel = (drive_force - drag) / self.mass;
        if self.speed > 0.0 {
            accel -= brake_force / self.mass;
        }

        self.speed = (self.speed + accel * dt).max(0.0);
        self.last_accel = if self.speed > 0.0 { accel } else { 0.0 };

        // Rear-axle steering rolls the body opposite to the steer sign;
        // without input the roll bleeds back toward level.
        let rear_steer = (self.steer[WheelSlot::RearLeft.index()]
            + self.steer[WheelSlot::RearRight.index()])
            / 2.0;
        if rear_steer != 0.0 {
            self.roll_signed -= rear_steer * self.speed * ROLL_GAIN * dt;
        } else {
            self.roll_signed -= self.roll_signed * (ROLL_DECAY * dt).min(1.0);
        }

        let yaw_rad = self.yaw.to_radians();
        self.position.x += self.speed * yaw_rad.cos() * dt;
        self.position.z += self.speed * yaw_rad.sin() * dt;

        trace!(
            speed = self.speed,
            accel,
            roll = self.roll_signed,
            "mock host stepped"
        );
    }

    fn wheelbase(&self) -> f64 {
        let front = (self.offsets[0] + self.offsets[1]) / 2.0;
        let rear = (self.offsets[2] + self.offsets[3]) / 2.0;
        (front - rear).abs().max(1.0)
    }

    /// 当前位置，测试与最近出生点断言用
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// 当前生效质量 (kg)
    pub fn active_mass(&self) -> f64 {
        self.mass
    }
}

impl VehicleHost for MockVehicleHost {
    fn velocity(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        Vec3::new(
            self.speed * yaw_rad.cos(),
            0.0,
            self.speed * yaw_rad.sin(),
        )
    }

    fn roll_angle(&self) -> f64 {
        // Raw 0-360 domain: -4.3 reads back as 355.7.
        self.roll_signed.rem_euclid(360.0)
    }

    fn wheel_longitudinal_offset(&self, slot: WheelSlot) -> f64 {
        self.offsets[slot.index()]
    }

    fn wheel_diagnostics(&self, slot: WheelSlot) -> WheelDiagnostics {
        let i = slot.index();
        let static_load = self.mass * GRAVITY / 4.0;
        let transfer = self.mass * self.last_accel * CG_HEIGHT / self.wheelbase() / 2.0;
        // Acceleration shifts load rearward, braking shifts it forward.
        let force = if self.offsets[i] >= 0.0 {
            (static_load - transfer).max(0.0)
        } else {
            (static_load + transfer).max(0.0)
        };

        let net_rim_force = (self.motor[i] - self.brake[i]) / WHEEL_RADIUS;
        let grip = (force * self.friction.forward.stiffness).max(1.0);
        let longitudinal_slip = (net_rim_force / grip).clamp(-1.0, 1.0);

        let lateral_drive = self.steer[i].to_radians().sin() * self.speed;
        let cornering = (10.0 * self.friction.sideways.stiffness).max(1e-3);
        let lateral_slip = (lateral_drive / cornering).clamp(-1.0, 1.0);

        WheelDiagnostics {
            force,
            longitudinal_slip,
            lateral_slip,
        }
    }

    fn set_motor_torque(&mut self, slot: WheelSlot, torque: f64) {
        self.motor[slot.index()] = torque;
    }

    fn set_brake_torque(&mut self, slot: WheelSlot, torque: f64) {
        self.brake[slot.index()] = torque;
    }

    fn set_steer_angle(&mut self, slot: WheelSlot, degrees: f64) {
        self.steer[slot.index()] = degrees;
    }

    fn reset_pose(&mut self) -> Result<(), HarnessError> {
        let spawn = closest_spawn(self.position, &self.spawn_points)
            .ok_or_else(|| HarnessError::missing_rig("spawn point"))?;

        debug!(spawn = %spawn.name, "pose reset");
        self.position = spawn.position;
        self.yaw = spawn.yaw;
        self.speed = 0.0;
        self.roll_signed = 0.0;
        self.last_accel = 0.0;
        self.motor = [0.0; 4];
        self.brake = [0.0; 4];
        self.steer = [0.0; 4];
        Ok(())
    }

    fn sleep(&mut self) {
        self.asleep = true;
        // No residual motion survives a sleep.
        self.speed = 0.0;
        self.last_accel = 0.0;
    }

    fn wake(&mut self) {
        self.asleep = false;
    }

    fn apply_weight_variant(&mut self, variant: WeightVariant) {
        self.mass = match variant {
            WeightVariant::Ic => self.mass_ic,
            WeightVariant::Ev => self.mass_ev,
        };
    }

    fn apply_friction(&mut self, friction: &FrictionSettings) {
        self.friction = *friction;
    }
}
