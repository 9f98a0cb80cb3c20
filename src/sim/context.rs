// src/sim/context.rs

use nalgebra::{UnitQuaternion, Vector3};
use thiserror::Error;

use crate::constants::{DEFAULT_RESET_VELOCITY, DEFAULT_SENSOR_JOINT, DEFAULT_TRACKED_BODY};
use crate::data_input::sample_row::SampleRow;
use crate::sim::cycle::CycleSchedule;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Unknown body '{0}'")]
    UnknownBody(String),
    #[error("Unknown joint '{0}'")]
    UnknownJoint(String),
    #[error("Joint index {index} out of range ({count} joints)")]
    JointIndexOutOfRange { index: usize, count: usize },
    #[error("Simulation diverged at step {step}: non-finite body state")]
    Diverged { step: u64 },
    #[error("Simulator backend failure: {0}")]
    Backend(String),
}

/// Position plus orientation of a body root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn from_position(position: [f64; 3]) -> Self {
        Self {
            position: Vector3::from(position),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// Linear and angular velocity of a body root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyVelocity {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

impl BodyVelocity {
    pub fn zero() -> Self {
        Self {
            linear: Vector3::zeros(),
            angular: Vector3::zeros(),
        }
    }

    /// Linear (x, y, z) followed by angular (x, y, z).
    pub fn from_array(v: [f64; 6]) -> Self {
        Self {
            linear: Vector3::new(v[0], v[1], v[2]),
            angular: Vector3::new(v[3], v[4], v[5]),
        }
    }
}

/// Full root state: what a body returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootState {
    pub pose: Pose,
    pub velocity: BodyVelocity,
}

/// Selects which joints a wrench query reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JointQuery {
    All,
    ByName(Vec<String>),
    ByIndex(Vec<usize>),
}

impl JointQuery {
    pub fn by_name(name: &str) -> Self {
        JointQuery::ByName(vec![name.to_string()])
    }
}

/// The physics engine as seen by the stepper.
///
/// Implemented by the built-in `SphereWorld` and by test doubles; a host
/// engine binding would implement the same calls.
pub trait Simulator {
    /// False once the host wants the loop to stop.
    fn is_running(&self) -> bool;

    fn physics_dt(&self) -> f64;

    /// Advances physics by one `physics_dt`.
    fn step(&mut self) -> Result<(), SimError>;

    /// Advances scene bookkeeping (buffers, counters) by `dt`.
    fn update_scene(&mut self, dt: f64);

    fn default_root_state(&self, body: &str) -> Result<RootState, SimError>;

    fn write_root_pose(&mut self, body: &str, pose: &Pose) -> Result<(), SimError>;

    fn write_root_velocity(&mut self, body: &str, velocity: &BodyVelocity) -> Result<(), SimError>;

    /// Clears per-body internal buffers after its state was overwritten.
    fn reset_body(&mut self, body: &str) -> Result<(), SimError>;

    fn joint_names(&self) -> Vec<String>;

    /// Measured reaction wrench at each selected joint, in query order.
    fn measured_joint_forces(&self, query: &JointQuery) -> Result<Vec<SampleRow>, SimError>;
}

/// Everything the stepper needs, passed explicitly instead of global handles.
pub struct SimContext<S: Simulator> {
    pub simulator: S,
    pub tracked_body: String,
    pub sensor_joint: String,
    pub schedule: CycleSchedule,
    pub reset_velocity: BodyVelocity,
}

impl<S: Simulator> SimContext<S> {
    pub fn new(simulator: S) -> Self {
        Self {
            simulator,
            tracked_body: DEFAULT_TRACKED_BODY.to_string(),
            sensor_joint: DEFAULT_SENSOR_JOINT.to_string(),
            schedule: CycleSchedule::default(),
            reset_velocity: BodyVelocity::from_array(DEFAULT_RESET_VELOCITY),
        }
    }

    pub fn with_schedule(mut self, schedule: CycleSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_reset_velocity(mut self, velocity: BodyVelocity) -> Self {
        self.reset_velocity = velocity;
        self
    }

    pub fn with_sensor_joint(mut self, joint: &str) -> Self {
        self.sensor_joint = joint.to_string();
        self
    }

    pub fn with_tracked_body(mut self, body: &str) -> Self {
        self.tracked_body = body.to_string();
        self
    }
}

// src/sim/context.rs
