// tests/stepper_test.rs

use ft_sensor_sim::data_input::sample_row::SampleRow;
use ft_sensor_sim::sim::context::{
    BodyVelocity, JointQuery, Pose, RootState, SimContext, SimError, Simulator,
};
use ft_sensor_sim::sim::cycle::{CycleAction, CycleSchedule};
use ft_sensor_sim::sim::scene::SceneConfig;
use ft_sensor_sim::sim::sink::SeriesWriter;
use ft_sensor_sim::sim::sphere_world::{SphereWorld, SPHERE_BODY};
use ft_sensor_sim::sim::stepper::{run_simulator, StepperError};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    WritePose,
    WriteVelocity([f64; 6]),
    ResetBody,
    Step(u64),
    Update,
}

/// Records every call, returning the current step number as Fx.
struct ScriptedSimulator {
    steps: u64,
    max_steps: u64,
    fail_at: Option<u64>,
    calls: Vec<Call>,
}

impl ScriptedSimulator {
    fn new(max_steps: u64) -> Self {
        Self {
            steps: 0,
            max_steps,
            fail_at: None,
            calls: Vec::new(),
        }
    }
}

impl Simulator for ScriptedSimulator {
    fn is_running(&self) -> bool {
        self.steps < self.max_steps
    }

    fn physics_dt(&self) -> f64 {
        0.01
    }

    fn step(&mut self) -> Result<(), SimError> {
        if self.fail_at == Some(self.steps) {
            return Err(SimError::Backend("engine crashed".to_string()));
        }
        self.calls.push(Call::Step(self.steps));
        self.steps += 1;
        Ok(())
    }

    fn update_scene(&mut self, _dt: f64) {
        self.calls.push(Call::Update);
    }

    fn default_root_state(&self, body: &str) -> Result<RootState, SimError> {
        if body != "sphere" {
            return Err(SimError::UnknownBody(body.to_string()));
        }
        Ok(RootState {
            pose: Pose::from_position([0.0, 0.0, 1.0]),
            velocity: BodyVelocity::zero(),
        })
    }

    fn write_root_pose(&mut self, _body: &str, _pose: &Pose) -> Result<(), SimError> {
        self.calls.push(Call::WritePose);
        Ok(())
    }

    fn write_root_velocity(&mut self, _body: &str, v: &BodyVelocity) -> Result<(), SimError> {
        self.calls.push(Call::WriteVelocity([
            v.linear.x, v.linear.y, v.linear.z, v.angular.x, v.angular.y, v.angular.z,
        ]));
        Ok(())
    }

    fn reset_body(&mut self, _body: &str) -> Result<(), SimError> {
        self.calls.push(Call::ResetBody);
        Ok(())
    }

    fn joint_names(&self) -> Vec<String> {
        vec!["FixedJoint".to_string()]
    }

    fn measured_joint_forces(&self, query: &JointQuery) -> Result<Vec<SampleRow>, SimError> {
        assert_eq!(query, &JointQuery::by_name("FixedJoint"));
        Ok(vec![SampleRow::new([self.steps as f64, 0.0, 0.0], [0.0; 3])])
    }
}

#[test]
fn schedule_fires_reset_on_multiples_of_reset_period_only() {
    let schedule = CycleSchedule::default();
    for counter in (0..=400).step_by(5) {
        let expected = if counter % 400 == 0 {
            CycleAction::Reset
        } else {
            CycleAction::Sample
        };
        assert_eq!(schedule.action_for(counter), expected, "counter {counter}");
    }
}

#[test]
fn loop_resets_every_400_steps_and_samples_every_5() {
    let mut ctx = SimContext::new(ScriptedSimulator::new(801));
    let mut samples: Vec<SampleRow> = Vec::new();
    let stats = run_simulator(&mut ctx, &mut samples).unwrap();

    assert_eq!(stats.steps, 801);
    // Resets at steps 0, 400 and 800.
    assert_eq!(stats.resets, 3);
    // 79 samples per 400-step cycle: 5, 10, ..., 395.
    assert_eq!(stats.samples, 79 * 2);
    assert_eq!(samples.len(), 158);

    let sampled: Vec<f64> = samples.iter().map(|r| r.force[0]).collect();
    assert_eq!(sampled[0], 5.0);
    assert_eq!(sampled[78], 395.0);
    assert_eq!(sampled[79], 405.0);
    assert!(!sampled.contains(&400.0));
}

#[test]
fn reset_writes_default_pose_then_fixed_velocity_before_stepping() {
    let mut ctx = SimContext::new(ScriptedSimulator::new(2));
    let mut samples: Vec<SampleRow> = Vec::new();
    run_simulator(&mut ctx, &mut samples).unwrap();
    assert_eq!(
        ctx.simulator.calls,
        vec![
            Call::WritePose,
            Call::WriteVelocity([0.0, 0.0, 0.0, 1.0, -2.0, 3.0]),
            Call::ResetBody,
            Call::Step(0),
            Call::Update,
            Call::Step(1),
            Call::Update,
        ]
    );
    assert!(samples.is_empty());
}

#[test]
fn simulator_failure_stops_the_loop() {
    let mut sim = ScriptedSimulator::new(100);
    sim.fail_at = Some(7);
    let mut ctx = SimContext::new(sim);
    let err = run_simulator(&mut ctx, &mut Vec::<SampleRow>::new()).unwrap_err();
    assert!(matches!(err, StepperError::Sim(SimError::Backend(_))));
    assert_eq!(ctx.simulator.steps, 7);
}

#[test]
fn unknown_tracked_body_is_fatal() {
    let mut ctx = SimContext::new(ScriptedSimulator::new(10)).with_tracked_body("cube");
    let err = run_simulator(&mut ctx, &mut Vec::<SampleRow>::new()).unwrap_err();
    assert!(matches!(err, StepperError::Sim(SimError::UnknownBody(_))));
}

#[test]
fn sphere_world_run_records_parseable_series() {
    let mut scene = SceneConfig::default();
    scene.simulation.max_steps = Some(300);
    let mut ctx = SimContext::new(SphereWorld::new(scene))
        .with_schedule(CycleSchedule::new(400, 5).unwrap())
        .with_tracked_body(SPHERE_BODY);

    let mut writer = SeriesWriter::new(Vec::<u8>::new());
    let stats = run_simulator(&mut ctx, &mut writer).unwrap();
    assert_eq!(stats.resets, 1);
    assert_eq!(stats.samples, 59);

    let text = String::from_utf8(writer.into_inner()).unwrap();
    let table = ft_sensor_sim::data_input::series_parser::parse_series(&text, 6).unwrap();
    assert_eq!(table.nrows(), 59);
    // The sphere lands on the pad within 300 steps and presses it down.
    let min_fz = table.column(2).iter().cloned().fold(f64::INFINITY, f64::min);
    assert!(min_fz < 0.0);
}

#[test]
fn default_scene_loads_the_sensor_joint() {
    let mut scene = SceneConfig::default();
    scene.simulation.max_steps = Some(400);
    let mut ctx = SimContext::new(SphereWorld::new(scene)).with_tracked_body(SPHERE_BODY);

    let mut samples = Vec::<SampleRow>::new();
    let stats = run_simulator(&mut ctx, &mut samples).unwrap();
    assert_eq!(stats.samples, 79);

    let loaded = samples.iter().filter(|s| s.force[2] < 0.0).count();
    assert!(loaded > 0, "no sample loaded the pad");
    let last = samples.last().unwrap();
    assert!((last.force[2] + 98.1).abs() < 1.0, "Fz = {}", last.force[2]);
    // Contact point sits off the joint origin, so the load also twists it.
    assert!(last.torque[0].abs() > 1.0);

    let state = ctx.simulator.sphere_state();
    assert!(state.pose.position.y.abs() < 1e-9);
}
