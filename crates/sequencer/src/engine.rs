//! Maneuver sequencer implementation.

use std::path::PathBuf;

use contracts::{
    HarnessSettings, ManeuverConfig, Phase, RunReport, TelemetrySample, VehicleHost,
    WheelDiagnostics, WheelSlot,
};
use telemetry::TelemetryLog;
use tracing::{debug, info, instrument, trace};

use crate::error::SequencerError;

/// Km/h per m/s
const SPEED_SCALE: f64 = 3.6;

/// Mutable per-run record, reset whenever a run starts
#[derive(Debug, Clone, Copy)]
struct RunState {
    /// Current phase
    phase: Phase,
    /// Elapsed sim time since run start (seconds)
    sim_time: f64,
    /// Elapsed time in the current turn entry
    turn_time: f64,
    /// Elapsed time in the rest phase
    rest_time: f64,
    /// Active configuration index
    config_index: usize,
    /// Active turn entry index
    turn_index: usize,
}

impl RunState {
    fn fresh(config_index: usize) -> Self {
        Self {
            phase: Phase::Acc,
            sim_time: 0.0,
            turn_time: 0.0,
            rest_time: 0.0,
            config_index,
            turn_index: 0,
        }
    }
}

/// Most significant event of one tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Nothing of note; the run continues in its current phase
    None,
    /// Target speed reached, turn sequence begins
    TurnStarted,
    /// The previous turn entry completed and the next one is active
    TurnAdvanced { turn_index: usize },
    /// Turn sequence exhausted, braking to rest
    RestStarted,
    /// Rest period elapsed; telemetry exported and the run is complete
    RunEnded { report: RunReport },
    /// The next configuration in the schedule started
    RunStarted { config_index: usize },
    /// Schedule exhausted; the sequencer is inactive
    Halted,
    /// The sequencer was not active when ticked
    Inactive,
}

/// Per-tick state machine driving a vehicle through scripted maneuvers
///
/// Owns the run state, the active configuration index, and the telemetry
/// log. Advanced once per fixed physics timestep via
/// [`ManeuverSequencer::tick`]; `&mut self` makes double-advancing within a
/// tick a compile error rather than a runtime hazard.
#[derive(Debug)]
pub struct ManeuverSequencer {
    /// Ordered configuration schedule
    configs: Vec<ManeuverConfig>,
    /// Global harness knobs
    settings: HarnessSettings,
    /// Per-run telemetry buffers
    telemetry: TelemetryLog,
    /// Current run state
    state: RunState,
    /// True while a run set is in progress
    active: bool,
    /// Phase transitions observed in the current run
    transitions: u64,
}

impl ManeuverSequencer {
    /// Create a sequencer over a non-empty configuration schedule
    pub fn new(
        configs: Vec<ManeuverConfig>,
        settings: HarnessSettings,
    ) -> Result<Self, SequencerError> {
        if configs.is_empty() {
            return Err(SequencerError::EmptySchedule);
        }

        Ok(Self {
            configs,
            settings,
            telemetry: TelemetryLog::new(),
            state: RunState::fresh(0),
            active: false,
            transitions: 0,
        })
    }

    /// Begin the schedule at configuration 0
    pub fn start<H: VehicleHost>(&mut self, host: &mut H) -> Result<(), SequencerError> {
        self.start_at(host, 0)
    }

    /// Begin a run at an arbitrary configuration index
    ///
    /// Safe to reissue at any time; it simply re-initializes the run state
    /// and clears the telemetry buffers (an external reset).
    pub fn start_at<H: VehicleHost>(
        &mut self,
        host: &mut H,
        index: usize,
    ) -> Result<(), SequencerError> {
        if index >= self.configs.len() {
            return Err(SequencerError::ConfigIndexOutOfRange {
                index,
                len: self.configs.len(),
            });
        }

        // Reposition at the spawn pose, then a sleep/wake cycle so the
        // integrator never sees the teleport as motion.
        host.reset_pose()?;
        host.sleep();
        host.wake();

        let config = &self.configs[index];
        host.apply_weight_variant(config.weight_variant);

        self.telemetry.clear();
        self.state = RunState::fresh(index);
        self.transitions = 0;
        self.active = true;

        info!(
            config_index = index,
            config_name = %config.name,
            weight_variant = %config.weight_variant,
            init_speed = config.init_speed,
            turns = config.turns.len(),
            "run started"
        );
        metrics::counter!("sequencer_runs_started_total").increment(1);

        Ok(())
    }

    /// Advance one fixed timestep
    ///
    /// Returns the most significant event of the tick. Host and telemetry
    /// failures propagate; no retries.
    #[instrument(
        level = "trace",
        name = "sequencer_tick",
        skip(self, host),
        fields(phase = %self.state.phase, config_index = self.state.config_index)
    )]
    pub fn tick<H: VehicleHost>(
        &mut self,
        host: &mut H,
        dt: f64,
    ) -> Result<TickEvent, SequencerError> {
        if !self.active {
            return Ok(TickEvent::Inactive);
        }

        metrics::counter!("sequencer_ticks_total").increment(1);

        if self.state.phase != Phase::End {
            self.record_sample(host);
        }

        let event = match self.state.phase {
            Phase::Acc => self.tick_acc(host),
            Phase::Turn => self.tick_turn(host, dt),
            Phase::Rest => self.tick_rest(host, dt)?,
            Phase::End => self.tick_end(host)?,
        };

        metrics::gauge!("sequencer_phase").set(phase_ordinal(self.state.phase));

        // Accumulate after dispatch: the first sample of a run sits at t=0,
        // and an auto-advanced run's first sample sits at t=dt.
        self.state.sim_time += dt;

        Ok(event)
    }

    /// True while the schedule has not been exhausted or halted
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Elapsed sim time in the current run (seconds)
    pub fn sim_time(&self) -> f64 {
        self.state.sim_time
    }

    /// Active configuration index
    pub fn config_index(&self) -> usize {
        self.state.config_index
    }

    /// Phase transitions observed in the current run (N turns give N+3)
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// The per-run telemetry log
    pub fn telemetry(&self) -> &TelemetryLog {
        &self.telemetry
    }

    fn config(&self) -> &ManeuverConfig {
        &self.configs[self.state.config_index]
    }

    fn record_sample<H: VehicleHost>(&mut self, host: &H) {
        let wheels: [WheelDiagnostics; 4] =
            std::array::from_fn(|i| host.wheel_diagnostics(WheelSlot::ALL[i]));
        let sample = TelemetrySample {
            time: self.state.sim_time,
            speed: host.velocity().magnitude() * SPEED_SCALE,
            roll: host.roll_angle(),
            wheels,
        };
        self.telemetry.record(&sample);
    }

    fn note_transition(&mut self, kind: &'static str) {
        self.transitions += 1;
        metrics::counter!("sequencer_transitions_total", "kind" => kind).increment(1);
        debug!(
            kind,
            config_index = self.state.config_index,
            transitions = self.transitions,
            sim_time = self.state.sim_time,
            "phase transition"
        );
    }

    fn tick_acc<H: VehicleHost>(&mut self, host: &mut H) -> TickEvent {
        let speed = host.velocity().magnitude() * SPEED_SCALE;
        if speed >= self.config().init_speed {
            for slot in WheelSlot::ALL {
                host.set_motor_torque(slot, 0.0);
                host.set_brake_torque(slot, 0.0);
                host.set_steer_angle(slot, 0.0);
            }
            self.state.phase = Phase::Turn;
            self.state.turn_time = 0.0;
            self.state.turn_index = 0;
            self.note_transition("acc_to_turn");
            return TickEvent::TurnStarted;
        }

        for slot in WheelSlot::ALL {
            host.set_steer_angle(slot, 0.0);
            host.set_brake_torque(slot, 0.0);
            host.set_motor_torque(slot, self.settings.drive_force);
        }
        trace!(speed, target = self.config().init_speed, "accelerating");
        TickEvent::None
    }

    fn tick_turn<H: VehicleHost>(&mut self, host: &mut H, dt: f64) -> TickEvent {
        let turns = &self.configs[self.state.config_index].turns;

        if turns.is_empty() {
            for slot in WheelSlot::ALL {
                host.set_motor_torque(slot, 0.0);
                host.set_brake_torque(slot, 0.0);
            }
            self.state.phase = Phase::Rest;
            self.state.rest_time = 0.0;
            self.note_transition("turn_to_rest");
            return TickEvent::RestStarted;
        }

        let turn_count = turns.len();
        let angle = turns[self.state.turn_index].angle;
        let duration = turns[self.state.turn_index].duration;

        // Rear-axle steering only; front wheels stay unsteered.
        for slot in WheelSlot::ALL {
            host.set_motor_torque(slot, 0.0);
            host.set_brake_torque(slot, 0.0);
            if host.wheel_longitudinal_offset(slot) < 0.0 {
                host.set_steer_angle(slot, angle);
            } else {
                host.set_steer_angle(slot, 0.0);
            }
        }

        let mut event = TickEvent::None;
        if self.state.turn_time >= duration {
            self.note_transition("turn_advanced");
            self.state.turn_index += 1;
            self.state.turn_time = 0.0;

            if self.state.turn_index >= turn_count {
                self.state.phase = Phase::Rest;
                self.state.rest_time = 0.0;
                self.note_transition("turn_to_rest");
                event = TickEvent::RestStarted;
            } else {
                event = TickEvent::TurnAdvanced {
                    turn_index: self.state.turn_index,
                };
            }
        }

        // Accumulation after the threshold check: a zero-duration entry
        // still consumes one tick.
        self.state.turn_time += dt;
        event
    }

    fn tick_rest<H: VehicleHost>(
        &mut self,
        host: &mut H,
        dt: f64,
    ) -> Result<TickEvent, SequencerError> {
        for slot in WheelSlot::ALL {
            host.set_motor_torque(slot, 0.0);
            host.set_steer_angle(slot, 0.0);
            host.set_brake_torque(slot, self.settings.rest_brake_torque);
        }

        let mut event = TickEvent::None;
        if self.state.rest_time >= self.settings.rest_time {
            // Export before the phase flip: a failed export leaves the
            // sequencer in REST, so the next tick retries instead of
            // discarding the run's telemetry. The report carries the
            // REST→END transition that is only recorded once the file
            // is on disk.
            let report = self.finish_run(self.transitions + 1)?;
            self.note_transition("rest_to_end");
            self.state.phase = Phase::End;
            event = TickEvent::RunEnded { report };
        }

        self.state.rest_time += dt;
        Ok(event)
    }

    fn tick_end<H: VehicleHost>(&mut self, host: &mut H) -> Result<TickEvent, SequencerError> {
        let next = self.state.config_index + 1;
        if next < self.configs.len() {
            self.start_at(host, next)?;
            Ok(TickEvent::RunStarted { config_index: next })
        } else {
            self.active = false;
            info!(runs = self.configs.len(), "schedule complete, halting");
            Ok(TickEvent::Halted)
        }
    }

    /// Export telemetry and build the completion report at REST→END
    ///
    /// `final_transitions` is the count including the REST→END flip the
    /// caller records only after the export succeeds.
    fn finish_run(&mut self, final_transitions: u64) -> Result<RunReport, SequencerError> {
        let config = &self.configs[self.state.config_index];
        let csv_path = self.csv_path(config);

        self.telemetry.export(&csv_path)?;

        let report = RunReport {
            config_index: self.state.config_index,
            config_name: config.name.clone(),
            weight_variant: config.weight_variant,
            init_speed: config.init_speed,
            samples: self.telemetry.len(),
            transitions: final_transitions,
            sim_duration: self.state.sim_time,
            peak_speed: self.telemetry.peak_speed().unwrap_or(0.0),
            csv_path: csv_path.clone(),
        };

        info!(
            config_index = report.config_index,
            config_name = %report.config_name,
            samples = report.samples,
            transitions = report.transitions,
            sim_duration = report.sim_duration,
            peak_speed = report.peak_speed,
            csv_path = %csv_path.display(),
            "run ended"
        );
        metrics::counter!("sequencer_runs_completed_total").increment(1);
        metrics::histogram!("sequencer_run_duration_seconds").record(report.sim_duration);

        Ok(report)
    }

    /// Output path: `<output_dir>/<name>.csv`, or the variant/speed fallback
    /// for unnamed configurations. Both branches keep the directory prefix.
    fn csv_path(&self, config: &ManeuverConfig) -> PathBuf {
        PathBuf::from(&self.settings.output_dir).join(config.csv_file_name())
    }
}

fn phase_ordinal(phase: Phase) -> f64 {
    match phase {
        Phase::Acc => 0.0,
        Phase::Turn => 1.0,
        Phase::Rest => 2.0,
        Phase::End => 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{FrictionSettings, HarnessError, TurnStep, Vec3, WeightVariant};
    use tempfile::tempdir;

    const DT: f64 = 0.02;

    /// Hand-scripted host: tests set the speed between ticks and inspect
    /// the actuation targets the sequencer wrote.
    struct ScriptedHost {
        speed_kmh: f64,
        roll: f64,
        motor: [f64; 4],
        brake: [f64; 4],
        steer: [f64; 4],
        resets: u32,
        sleeps: u32,
        wakes: u32,
        variant: Option<WeightVariant>,
        fail_reset: bool,
    }

    impl ScriptedHost {
        fn new() -> Self {
            Self {
                speed_kmh: 0.0,
                roll: 10.0,
                motor: [0.0; 4],
                brake: [0.0; 4],
                steer: [0.0; 4],
                resets: 0,
                sleeps: 0,
                wakes: 0,
                variant: None,
                fail_reset: false,
            }
        }
    }

    impl VehicleHost for ScriptedHost {
        fn velocity(&self) -> Vec3 {
            Vec3::new(self.speed_kmh / SPEED_SCALE, 0.0, 0.0)
        }

        fn roll_angle(&self) -> f64 {
            self.roll
        }

        fn wheel_longitudinal_offset(&self, slot: WheelSlot) -> f64 {
            match slot {
                WheelSlot::FrontLeft | WheelSlot::FrontRight => 1.25,
                WheelSlot::RearLeft | WheelSlot::RearRight => -1.45,
            }
        }

        fn wheel_diagnostics(&self, _slot: WheelSlot) -> WheelDiagnostics {
            WheelDiagnostics::default()
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
            if self.fail_reset {
                return Err(HarnessError::missing_rig("spawn point"));
            }
            self.resets += 1;
            self.speed_kmh = 0.0;
            Ok(())
        }

        fn sleep(&mut self) {
            self.sleeps += 1;
        }

        fn wake(&mut self) {
            self.wakes += 1;
        }

        fn apply_weight_variant(&mut self, variant: WeightVariant) {
            self.variant = Some(variant);
        }

        fn apply_friction(&mut self, _friction: &FrictionSettings) {}
    }

    fn make_config(name: &str, turns: Vec<TurnStep>) -> ManeuverConfig {
        ManeuverConfig {
            name: name.to_string(),
            weight_variant: WeightVariant::Ic,
            init_speed: 40.0,
            turns,
        }
    }

    fn make_settings(output_dir: &std::path::Path) -> HarnessSettings {
        HarnessSettings {
            drive_force: 2000.0,
            rest_time: 0.1,
            rest_brake_torque: 1_000_000.0,
            output_dir: output_dir.to_string_lossy().into_owned(),
        }
    }

    fn two_turns() -> Vec<TurnStep> {
        vec![
            TurnStep {
                angle: 15.0,
                duration: 0.04,
            },
            TurnStep {
                angle: -15.0,
                duration: 0.04,
            },
        ]
    }

    /// Tick until the given event fires, with a safety cap.
    fn run_until<H: VehicleHost>(
        seq: &mut ManeuverSequencer,
        host: &mut H,
        mut pred: impl FnMut(&TickEvent) -> bool,
    ) -> TickEvent {
        for _ in 0..10_000 {
            let event = seq.tick(host, DT).unwrap();
            if pred(&event) {
                return event;
            }
        }
        panic!("event never fired");
    }

    #[test]
    fn new_rejects_empty_schedule() {
        let dir = tempdir().unwrap();
        let err = ManeuverSequencer::new(vec![], make_settings(dir.path())).unwrap_err();
        assert!(matches!(err, SequencerError::EmptySchedule));
    }

    #[test]
    fn start_at_rejects_out_of_range_index() {
        let dir = tempdir().unwrap();
        let mut seq =
            ManeuverSequencer::new(vec![make_config("solo", vec![])], make_settings(dir.path()))
                .unwrap();
        let mut host = ScriptedHost::new();
        let err = seq.start_at(&mut host, 3).unwrap_err();
        assert!(matches!(
            err,
            SequencerError::ConfigIndexOutOfRange { index: 3, len: 1 }
        ));
    }

    #[test]
    fn start_resets_pose_with_sleep_wake_and_applies_variant() {
        let dir = tempdir().unwrap();
        let mut config = make_config("a", vec![]);
        config.weight_variant = WeightVariant::Ev;
        let mut seq = ManeuverSequencer::new(vec![config], make_settings(dir.path())).unwrap();
        let mut host = ScriptedHost::new();

        seq.start(&mut host).unwrap();

        assert!(seq.is_active());
        assert_eq!(seq.phase(), Phase::Acc);
        assert_eq!(host.resets, 1);
        assert_eq!(host.sleeps, 1);
        assert_eq!(host.wakes, 1);
        assert_eq!(host.variant, Some(WeightVariant::Ev));
    }

    #[test]
    fn start_propagates_missing_spawn_as_fatal() {
        let dir = tempdir().unwrap();
        let mut seq =
            ManeuverSequencer::new(vec![make_config("a", vec![])], make_settings(dir.path()))
                .unwrap();
        let mut host = ScriptedHost::new();
        host.fail_reset = true;

        let err = seq.start(&mut host).unwrap_err();
        assert!(matches!(
            err,
            SequencerError::Host(HarnessError::MissingRig { .. })
        ));
        assert!(!seq.is_active());
    }

    #[test]
    fn acc_drives_all_wheels_until_target_speed() {
        let dir = tempdir().unwrap();
        let mut seq = ManeuverSequencer::new(
            vec![make_config("a", two_turns())],
            make_settings(dir.path()),
        )
        .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();

        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::None);
        assert_eq!(host.motor, [2000.0; 4]);
        assert_eq!(host.brake, [0.0; 4]);
        assert_eq!(host.steer, [0.0; 4]);

        // Reaching the target flips to TURN and zeroes everything.
        host.speed_kmh = 40.0;
        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::TurnStarted);
        assert_eq!(seq.phase(), Phase::Turn);
        assert_eq!(host.motor, [0.0; 4]);
        assert_eq!(host.steer, [0.0; 4]);
        assert_eq!(seq.transition_count(), 1);
    }

    #[test]
    fn turn_steers_rear_axle_only() {
        let dir = tempdir().unwrap();
        let mut seq = ManeuverSequencer::new(
            vec![make_config("a", two_turns())],
            make_settings(dir.path()),
        )
        .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;
        run_until(&mut seq, &mut host, |e| *e == TickEvent::TurnStarted);

        seq.tick(&mut host, DT).unwrap();
        assert_eq!(host.steer[WheelSlot::FrontLeft.index()], 0.0);
        assert_eq!(host.steer[WheelSlot::FrontRight.index()], 0.0);
        assert_eq!(host.steer[WheelSlot::RearLeft.index()], 15.0);
        assert_eq!(host.steer[WheelSlot::RearRight.index()], 15.0);
        assert_eq!(host.motor, [0.0; 4]);
        assert_eq!(host.brake, [0.0; 4]);
    }

    #[test]
    fn turn_sequence_advances_then_rests() {
        let dir = tempdir().unwrap();
        let mut seq = ManeuverSequencer::new(
            vec![make_config("a", two_turns())],
            make_settings(dir.path()),
        )
        .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;
        run_until(&mut seq, &mut host, |e| *e == TickEvent::TurnStarted);

        let event = run_until(&mut seq, &mut host, |e| {
            matches!(e, TickEvent::TurnAdvanced { .. })
        });
        assert_eq!(event, TickEvent::TurnAdvanced { turn_index: 1 });

        run_until(&mut seq, &mut host, |e| *e == TickEvent::RestStarted);
        assert_eq!(seq.phase(), Phase::Rest);

        seq.tick(&mut host, DT).unwrap();
        assert_eq!(host.brake, [1_000_000.0; 4]);
        assert_eq!(host.motor, [0.0; 4]);
        assert_eq!(host.steer, [0.0; 4]);
    }

    #[test]
    fn empty_turn_list_rests_without_indexing() {
        let dir = tempdir().unwrap();
        let mut seq =
            ManeuverSequencer::new(vec![make_config("empty", vec![])], make_settings(dir.path()))
                .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;

        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::TurnStarted);
        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::RestStarted);
        assert_eq!(seq.phase(), Phase::Rest);
    }

    #[test]
    fn n_turns_produce_n_plus_three_transitions() {
        for n in 0..4u64 {
            let dir = tempdir().unwrap();
            let turns: Vec<TurnStep> = (0..n)
                .map(|i| TurnStep {
                    angle: 10.0 + i as f64,
                    duration: 0.04,
                })
                .collect();
            let mut seq =
                ManeuverSequencer::new(vec![make_config("prop", turns)], make_settings(dir.path()))
                    .unwrap();
            let mut host = ScriptedHost::new();
            seq.start(&mut host).unwrap();
            host.speed_kmh = 40.0;

            let event = run_until(&mut seq, &mut host, |e| {
                matches!(e, TickEvent::RunEnded { .. })
            });
            match event {
                TickEvent::RunEnded { report } => {
                    assert_eq!(report.transitions, n + 3, "n = {n}");
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn export_failure_stays_in_rest_and_retries_next_tick() {
        let dir = tempdir().unwrap();
        // A plain file where the output directory should go makes the
        // export fail until it is removed.
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, b"in the way").unwrap();

        let mut seq = ManeuverSequencer::new(
            vec![make_config("sticky", vec![])],
            make_settings(&blocker),
        )
        .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;

        let mut err = None;
        for _ in 0..10_000 {
            match seq.tick(&mut host, DT) {
                Ok(_) => {}
                Err(e) => {
                    err = Some(e);
                    break;
                }
            }
        }

        assert!(matches!(err, Some(SequencerError::Telemetry(_))));
        assert_eq!(seq.phase(), Phase::Rest);
        assert_eq!(seq.transition_count(), 2);
        assert!(seq.is_active());

        // Unblock the path; the next tick exports and completes the run.
        std::fs::remove_file(&blocker).unwrap();
        match seq.tick(&mut host, DT).unwrap() {
            TickEvent::RunEnded { report } => {
                assert_eq!(report.transitions, 3);
                assert!(report.csv_path.exists());
            }
            other => panic!("expected RunEnded, got {other:?}"),
        }
        assert_eq!(seq.phase(), Phase::End);
        assert_eq!(seq.transition_count(), 3);
    }

    #[test]
    fn one_entry_schedule_runs_once_then_halts() {
        let dir = tempdir().unwrap();
        let mut seq =
            ManeuverSequencer::new(vec![make_config("solo", vec![])], make_settings(dir.path()))
                .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;

        run_until(&mut seq, &mut host, |e| {
            matches!(e, TickEvent::RunEnded { .. })
        });
        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::Halted);
        assert!(!seq.is_active());
        assert_eq!(seq.tick(&mut host, DT).unwrap(), TickEvent::Inactive);
        assert!(dir.path().join("solo.csv").exists());
    }

    #[test]
    fn end_auto_advances_to_next_configuration() {
        let dir = tempdir().unwrap();
        let configs = vec![make_config("cfg0", vec![]), make_config("cfg1", vec![])];
        let mut seq = ManeuverSequencer::new(configs, make_settings(dir.path())).unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;

        run_until(&mut seq, &mut host, |e| {
            matches!(e, TickEvent::RunEnded { .. })
        });
        let event = seq.tick(&mut host, DT).unwrap();
        assert_eq!(event, TickEvent::RunStarted { config_index: 1 });
        assert_eq!(seq.config_index(), 1);
        assert_eq!(seq.phase(), Phase::Acc);
        assert_eq!(host.resets, 2);

        // The pose reset zeroed the speed; accelerate again for run 1.
        host.speed_kmh = 40.0;
        run_until(&mut seq, &mut host, |e| {
            matches!(e, TickEvent::RunEnded { .. })
        });
        assert_eq!(seq.tick(&mut host, DT).unwrap(), TickEvent::Halted);

        assert!(dir.path().join("cfg0.csv").exists());
        assert!(dir.path().join("cfg1.csv").exists());
    }

    #[test]
    fn unnamed_config_exports_variant_speed_file() {
        let dir = tempdir().unwrap();
        let mut config = make_config("", vec![]);
        config.weight_variant = WeightVariant::Ev;
        config.init_speed = 40.0;
        let mut seq = ManeuverSequencer::new(vec![config], make_settings(dir.path())).unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;

        let event = run_until(&mut seq, &mut host, |e| {
            matches!(e, TickEvent::RunEnded { .. })
        });
        match event {
            TickEvent::RunEnded { report } => {
                assert_eq!(report.csv_path, dir.path().join("ev_40.csv"));
            }
            _ => unreachable!(),
        }
        assert!(dir.path().join("ev_40.csv").exists());
    }

    #[test]
    fn samples_are_recorded_each_active_tick() {
        let dir = tempdir().unwrap();
        let mut seq =
            ManeuverSequencer::new(vec![make_config("a", vec![])], make_settings(dir.path()))
                .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();

        seq.tick(&mut host, DT).unwrap();
        seq.tick(&mut host, DT).unwrap();
        seq.tick(&mut host, DT).unwrap();

        assert_eq!(seq.telemetry().len(), 3);
        // First sample sits at t = 0, accumulation happens after dispatch.
        assert!((seq.sim_time() - 3.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn reissuing_start_resets_mid_run() {
        let dir = tempdir().unwrap();
        let mut seq = ManeuverSequencer::new(
            vec![make_config("a", two_turns())],
            make_settings(dir.path()),
        )
        .unwrap();
        let mut host = ScriptedHost::new();
        seq.start(&mut host).unwrap();
        host.speed_kmh = 40.0;
        run_until(&mut seq, &mut host, |e| *e == TickEvent::TurnStarted);
        assert!(!seq.telemetry().is_empty());

        seq.start(&mut host).unwrap();
        assert_eq!(seq.phase(), Phase::Acc);
        assert_eq!(seq.sim_time(), 0.0);
        assert_eq!(seq.transition_count(), 0);
        assert!(seq.telemetry().is_empty());
    }
}
