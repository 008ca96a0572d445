//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试（完整调度，无需真实物理主机）
//! - CSV 导出格式回归

#[cfg(test)]
mod contract_tests {
    use contracts::{ManeuverConfig, Phase, WeightVariant};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = Phase::Acc;
    }

    #[test]
    fn test_weight_variants_cycle() {
        assert_eq!(WeightVariant::Ic.next(), WeightVariant::Ev);
        assert_eq!(WeightVariant::Ev.next(), WeightVariant::Ic);
    }

    #[test]
    fn test_csv_file_name_fallback() {
        let named = ManeuverConfig {
            name: "slalom".to_string(),
            weight_variant: WeightVariant::Ic,
            init_speed: 50.0,
            turns: Vec::new(),
        };
        assert_eq!(named.csv_file_name(), "slalom.csv");

        let unnamed = ManeuverConfig {
            name: String::new(),
            weight_variant: WeightVariant::Ev,
            init_speed: 30.0,
            turns: Vec::new(),
        };
        assert_eq!(unnamed.csv_file_name(), "ev_30.csv");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;

    use contracts::{
        HarnessSettings, ManeuverConfig, RigConfig, RunReport, SpawnPoint, TurnStep, Vec3,
        VehicleHost, WeightVariant, WheelMount,
    };
    use sequencer::{ManeuverSequencer, TickEvent};
    use tempfile::tempdir;
    use vehicle_host::MockVehicleHost;

    const DT: f64 = 0.02;
    const TICK_CAP: u64 = 100_000;

    fn make_rig() -> RigConfig {
        RigConfig {
            spawn_points: vec![SpawnPoint {
                name: "pad".to_string(),
                position: Vec3::ZERO,
                yaw: 0.0,
            }],
            wheels: WheelMount::standard_set(),
            mass_ic: 1500.0,
            mass_ev: 1700.0,
        }
    }

    fn make_settings(output_dir: &Path) -> HarnessSettings {
        HarnessSettings {
            drive_force: 2000.0,
            rest_time: 0.5,
            rest_brake_torque: 1_000_000.0,
            output_dir: output_dir.to_string_lossy().into_owned(),
        }
    }

    fn make_config(name: &str, variant: WeightVariant, turns: Vec<TurnStep>) -> ManeuverConfig {
        ManeuverConfig {
            name: name.to_string(),
            weight_variant: variant,
            init_speed: 30.0,
            turns,
        }
    }

    fn turn(angle: f64, duration: f64) -> TurnStep {
        TurnStep { angle, duration }
    }

    /// 驱动完整调度：sequencer tick 与主机积分步交替，直到停机
    fn run_schedule(
        sequencer: &mut ManeuverSequencer,
        host: &mut MockVehicleHost,
    ) -> (Vec<RunReport>, u64) {
        let mut reports = Vec::new();

        for tick in 0..TICK_CAP {
            let event = sequencer.tick(host, DT).expect("tick failed");
            host.step(DT);

            match event {
                TickEvent::RunEnded { report } => reports.push(report),
                TickEvent::Halted => return (reports, tick + 1),
                _ => {}
            }
        }

        panic!("schedule did not halt within {} ticks", TICK_CAP);
    }

    #[test]
    fn test_e2e_schedule_exports_every_csv() {
        let dir = tempdir().unwrap();
        let rig = make_rig();
        let configs = vec![
            make_config("slalom", WeightVariant::Ic, vec![turn(10.0, 0.2)]),
            make_config("", WeightVariant::Ev, vec![turn(-8.0, 0.1), turn(8.0, 0.1)]),
        ];

        let mut host = MockVehicleHost::from_rig(&rig).unwrap();
        let mut sequencer =
            ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
        sequencer.start(&mut host).unwrap();

        let (reports, _ticks) = run_schedule(&mut sequencer, &mut host);

        assert_eq!(reports.len(), 2);
        assert!(!sequencer.is_active());
        assert!(dir.path().join("slalom.csv").exists());
        assert!(dir.path().join("ev_30.csv").exists());

        for report in &reports {
            assert!(report.samples > 0);
            assert!(report.peak_speed >= 30.0);
        }
    }

    #[test]
    fn test_transition_count_tracks_turn_entries() {
        // N 个转向条目产生 N+3 次相位转换；空列表也要经过 REST
        for n in 0..4usize {
            let dir = tempdir().unwrap();
            let turns = (0..n).map(|_| turn(5.0, 0.1)).collect();
            let configs = vec![make_config("probe", WeightVariant::Ic, turns)];

            let mut host = MockVehicleHost::from_rig(&make_rig()).unwrap();
            let mut sequencer =
                ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
            sequencer.start(&mut host).unwrap();

            let (reports, _) = run_schedule(&mut sequencer, &mut host);
            assert_eq!(reports.len(), 1);
            assert_eq!(
                reports[0].transitions,
                (n + 3) as u64,
                "n = {} turn entries",
                n
            );
        }
    }

    #[test]
    fn test_start_index_skips_earlier_configs() {
        let dir = tempdir().unwrap();
        let configs = vec![
            make_config("skipped", WeightVariant::Ic, vec![turn(10.0, 0.1)]),
            make_config("resumed", WeightVariant::Ev, vec![turn(10.0, 0.1)]),
        ];

        let mut host = MockVehicleHost::from_rig(&make_rig()).unwrap();
        let mut sequencer =
            ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
        sequencer.start_at(&mut host, 1).unwrap();

        let (reports, _) = run_schedule(&mut sequencer, &mut host);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].config_index, 1);
        assert!(!dir.path().join("skipped.csv").exists());
        assert!(dir.path().join("resumed.csv").exists());
    }

    #[test]
    fn test_exported_csv_layout() {
        let dir = tempdir().unwrap();
        let configs = vec![make_config("layout", WeightVariant::Ic, vec![turn(12.0, 0.2)])];

        let mut host = MockVehicleHost::from_rig(&make_rig()).unwrap();
        let mut sequencer =
            ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
        sequencer.start(&mut host).unwrap();

        let (reports, _) = run_schedule(&mut sequencer, &mut host);

        let content = fs::read_to_string(&reports[0].csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        // 表头 + 每个样本一行
        assert_eq!(lines.len(), reports[0].samples + 1);
        assert!(lines[0].starts_with("time(sec), speed(km/h), roll angle"));

        for line in &lines {
            assert!(line.ends_with(' '), "line missing trailing space: {line:?}");
            assert_eq!(line.split(", ").count(), 15, "bad column count: {line:?}");
        }
    }

    #[test]
    fn test_plan_file_drives_full_run() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("Results");
        let plan_path = dir.path().join("plan.toml");

        let plan_toml = format!(
            r#"
[settings]
drive_force = 2000.0
rest_time = 0.5
rest_brake_torque = 1000000.0
output_dir = "{}"

[rig]
mass_ic = 1500.0
mass_ev = 1700.0

[[rig.spawn_points]]
name = "pad"
position = {{ x = 0.0, y = 0.0, z = 0.0 }}
yaw = 0.0

[[rig.wheels]]
slot = "front_left"
longitudinal_offset = 1.25

[[rig.wheels]]
slot = "front_right"
longitudinal_offset = 1.25

[[rig.wheels]]
slot = "rear_left"
longitudinal_offset = -1.45

[[rig.wheels]]
slot = "rear_right"
longitudinal_offset = -1.45

[[configs]]
name = "loaded"
weight_variant = "ev"
init_speed = 30.0

[[configs.turns]]
angle = 15.0
duration = 0.2
"#,
            output_dir.display()
        );
        fs::write(&plan_path, plan_toml).unwrap();

        let plan = config_loader::ConfigLoader::load_from_path(&plan_path).unwrap();
        assert_eq!(plan.configs.len(), 1);

        let mut host = MockVehicleHost::from_rig(&plan.rig).unwrap();
        host.apply_friction(&plan.friction);

        let mut sequencer =
            ManeuverSequencer::new(plan.configs.clone(), plan.settings.clone()).unwrap();
        sequencer.start(&mut host).unwrap();

        let (reports, _) = run_schedule(&mut sequencer, &mut host);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].weight_variant, WeightVariant::Ev);
        assert!(output_dir.join("loaded.csv").exists());
    }

    #[test]
    fn test_run_reports_feed_metrics_aggregator() {
        let dir = tempdir().unwrap();
        let configs = vec![
            make_config("a", WeightVariant::Ic, vec![turn(10.0, 0.1)]),
            make_config("b", WeightVariant::Ev, vec![turn(10.0, 0.1)]),
        ];

        let mut host = MockVehicleHost::from_rig(&make_rig()).unwrap();
        let mut sequencer =
            ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
        sequencer.start(&mut host).unwrap();

        let (reports, _) = run_schedule(&mut sequencer, &mut host);

        let mut aggregator = observability::HarnessMetricsAggregator::new();
        for report in &reports {
            aggregator.update(report);
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_runs, 2);
        assert!(summary.samples_per_run > 0.0);
        assert_eq!(summary.config_outcomes.get("a"), Some(&1));
        assert_eq!(summary.config_outcomes.get("b"), Some(&1));
    }
}
