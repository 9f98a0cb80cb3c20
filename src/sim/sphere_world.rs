// src/sim/sphere_world.rs

use nalgebra::{UnitQuaternion, Vector3};

use crate::constants::GRAVITY_M_S2;
use crate::data_input::sample_row::SampleRow;
use crate::sim::context::{BodyVelocity, JointQuery, Pose, RootState, SimError, Simulator};
use crate::sim::scene::SceneConfig;

/// Name the tracked sphere answers to, besides its prim path.
pub const SPHERE_BODY: &str = "sphere";

#[derive(Debug, Clone, Copy, PartialEq)]
struct SphereState {
    position: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
    linear_velocity: Vector3<f64>,
    angular_velocity: Vector3<f64>,
}

impl SphereState {
    fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.linear_velocity.iter().all(|v| v.is_finite())
            && self.angular_velocity.iter().all(|v| v.is_finite())
    }
}

/// Penalty contact between the sphere and one surface.
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Force applied to the sphere.
    force: Vector3<f64>,
    /// World-space contact point on the surface.
    point: Vector3<f64>,
}

/// Minimal built-in backend: one frictionless sphere falling onto a sensor
/// pad above a ground plane.
///
/// The pad is an axis-aligned box held in place by a single fixed joint at
/// the sensor position. The measured joint wrench is the load the sphere
/// puts on the pad, with torque taken about the joint origin.
pub struct SphereWorld {
    config: SceneConfig,
    sphere: SphereState,
    default_state: RootState,
    joint_wrench: SampleRow,
    step_count: u64,
    sim_time: f64,
}

impl SphereWorld {
    pub fn new(config: SceneConfig) -> Self {
        let default_state = RootState {
            pose: Pose::from_position(config.sphere.position),
            velocity: BodyVelocity::zero(),
        };
        let sphere = SphereState {
            position: default_state.pose.position,
            orientation: default_state.pose.orientation,
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        };
        log::debug!(
            "SphereWorld: sphere r={} m={} at {:?}, sensor pad at {:?}",
            config.sphere.radius,
            config.sphere.mass,
            config.sphere.position,
            config.sensor.position
        );
        Self {
            config,
            sphere,
            default_state,
            joint_wrench: SampleRow::default(),
            step_count: 0,
            sim_time: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Current sphere root state.
    pub fn sphere_state(&self) -> RootState {
        RootState {
            pose: Pose {
                position: self.sphere.position,
                orientation: self.sphere.orientation,
            },
            velocity: BodyVelocity {
                linear: self.sphere.linear_velocity,
                angular: self.sphere.angular_velocity,
            },
        }
    }

    fn check_body(&self, body: &str) -> Result<(), SimError> {
        if body == SPHERE_BODY || body == self.config.sphere.prim_path {
            Ok(())
        } else {
            Err(SimError::UnknownBody(body.to_string()))
        }
    }

    fn penalty_force(&self, penetration: f64, normal: Vector3<f64>) -> Vector3<f64> {
        let normal_speed = self.sphere.linear_velocity.dot(&normal);
        let magnitude = self.config.contact.stiffness * penetration
            - self.config.contact.damping * normal_speed;
        normal * magnitude.max(0.0)
    }

    fn ground_contact(&self) -> Option<Contact> {
        let radius = self.config.sphere.radius;
        let height_above = self.sphere.position.z - self.config.ground.height;
        let penetration = radius - height_above;
        if penetration <= 0.0 {
            return None;
        }
        let normal = Vector3::z();
        let point = Vector3::new(
            self.sphere.position.x,
            self.sphere.position.y,
            self.config.ground.height,
        );
        Some(Contact {
            force: self.penalty_force(penetration, normal),
            point,
        })
    }

    fn pad_contact(&self) -> Option<Contact> {
        let radius = self.config.sphere.radius;
        let center = Vector3::from(self.config.sensor.position);
        let half = Vector3::from(self.config.sensor.pad_half_extents);
        let p = self.sphere.position;

        let closest = Vector3::new(
            p.x.clamp(center.x - half.x, center.x + half.x),
            p.y.clamp(center.y - half.y, center.y + half.y),
            p.z.clamp(center.z - half.z, center.z + half.z),
        );
        let offset = p - closest;
        let distance = offset.norm();

        let (normal, penetration, point) = if distance > 1e-9 {
            if distance >= radius {
                return None;
            }
            (offset / distance, radius - distance, closest)
        } else {
            // Center inside the pad: push out through the top face.
            let top = center.z + half.z;
            (Vector3::z(), radius + (top - p.z), Vector3::new(p.x, p.y, top))
        };

        Some(Contact {
            force: self.penalty_force(penetration, normal),
            point,
        })
    }

    fn pad_wrench(&self, contact: Option<&Contact>) -> SampleRow {
        match contact {
            Some(c) => {
                let load = -c.force;
                let lever = c.point - Vector3::from(self.config.sensor.position);
                let torque = lever.cross(&load);
                SampleRow::new([load.x, load.y, load.z], [torque.x, torque.y, torque.z])
            }
            None => SampleRow::default(),
        }
    }
}

impl Simulator for SphereWorld {
    fn is_running(&self) -> bool {
        self.config
            .simulation
            .max_steps
            .map_or(true, |limit| self.step_count < limit)
    }

    fn physics_dt(&self) -> f64 {
        self.config.simulation.dt
    }

    fn step(&mut self) -> Result<(), SimError> {
        let dt = self.config.simulation.dt;
        let ground = self.ground_contact();
        let pad = self.pad_contact();
        self.joint_wrench = self.pad_wrench(pad.as_ref());

        let mut force = Vector3::new(0.0, 0.0, -GRAVITY_M_S2 * self.config.sphere.mass);
        for contact in ground.iter().chain(pad.iter()) {
            force += contact.force;
        }

        // Semi-implicit Euler; contacts are frictionless so spin is unchanged.
        self.sphere.linear_velocity += force / self.config.sphere.mass * dt;
        self.sphere.position += self.sphere.linear_velocity * dt;
        let spin = UnitQuaternion::from_scaled_axis(self.sphere.angular_velocity * dt);
        self.sphere.orientation = spin * self.sphere.orientation;

        self.step_count += 1;
        if !self.sphere.is_finite() {
            return Err(SimError::Diverged {
                step: self.step_count,
            });
        }
        Ok(())
    }

    fn update_scene(&mut self, dt: f64) {
        self.sim_time += dt;
    }

    fn default_root_state(&self, body: &str) -> Result<RootState, SimError> {
        self.check_body(body)?;
        Ok(self.default_state)
    }

    fn write_root_pose(&mut self, body: &str, pose: &Pose) -> Result<(), SimError> {
        self.check_body(body)?;
        self.sphere.position = pose.position;
        self.sphere.orientation = pose.orientation;
        Ok(())
    }

    fn write_root_velocity(&mut self, body: &str, velocity: &BodyVelocity) -> Result<(), SimError> {
        self.check_body(body)?;
        self.sphere.linear_velocity = velocity.linear;
        self.sphere.angular_velocity = velocity.angular;
        Ok(())
    }

    fn reset_body(&mut self, body: &str) -> Result<(), SimError> {
        self.check_body(body)?;
        self.joint_wrench = SampleRow::default();
        Ok(())
    }

    fn joint_names(&self) -> Vec<String> {
        vec![self.config.sensor.joint_name.clone()]
    }

    fn measured_joint_forces(&self, query: &JointQuery) -> Result<Vec<SampleRow>, SimError> {
        let names = self.joint_names();
        match query {
            JointQuery::All => Ok(vec![self.joint_wrench; names.len()]),
            JointQuery::ByName(requested) => requested
                .iter()
                .map(|name| {
                    if names.contains(name) {
                        Ok(self.joint_wrench)
                    } else {
                        Err(SimError::UnknownJoint(name.clone()))
                    }
                })
                .collect(),
            JointQuery::ByIndex(indices) => indices
                .iter()
                .map(|&index| {
                    if index < names.len() {
                        Ok(self.joint_wrench)
                    } else {
                        Err(SimError::JointIndexOutOfRange {
                            index,
                            count: names.len(),
                        })
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_scene() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.sensor.position = [0.0, 0.0, 0.05];
        config.sphere.position = [0.0, 0.0, 0.5];
        config
    }

    #[test]
    fn sphere_falls_under_gravity() {
        let mut world = SphereWorld::new(centered_scene());
        world.step().unwrap();
        let state = world.sphere_state();
        assert!(state.velocity.linear.z < 0.0);
        assert!(state.pose.position.z < 0.5);
    }

    #[test]
    fn resting_sphere_loads_pad_with_its_weight() {
        let mut world = SphereWorld::new(centered_scene());
        for _ in 0..3000 {
            world.step().unwrap();
        }
        let wrench = world
            .measured_joint_forces(&JointQuery::by_name("FixedJoint"))
            .unwrap()[0];
        let weight = 10.0 * GRAVITY_M_S2;
        assert!((wrench.force[2] + weight).abs() < 1.0, "Fz = {}", wrench.force[2]);
        assert!(wrench.force[0].abs() < 1e-6);
        assert!(wrench.torque[0].abs() < 1e-6);
    }

    #[test]
    fn unknown_joint_and_body_are_errors() {
        let mut world = SphereWorld::new(SceneConfig::default());
        assert!(matches!(
            world.measured_joint_forces(&JointQuery::by_name("Nope")),
            Err(SimError::UnknownJoint(_))
        ));
        assert!(matches!(
            world.measured_joint_forces(&JointQuery::ByIndex(vec![1])),
            Err(SimError::JointIndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(matches!(
            world.write_root_velocity("cube", &BodyVelocity::zero()),
            Err(SimError::UnknownBody(_))
        ));
    }

    #[test]
    fn step_limit_stops_the_world() {
        let mut config = SceneConfig::default();
        config.simulation.max_steps = Some(2);
        let mut world = SphereWorld::new(config);
        assert!(world.is_running());
        world.step().unwrap();
        world.step().unwrap();
        assert!(!world.is_running());
    }

    #[test]
    fn written_state_is_applied() {
        let mut world = SphereWorld::new(SceneConfig::default());
        let pose = Pose::from_position([1.0, 2.0, 3.0]);
        world.write_root_pose("/World/sphere", &pose).unwrap();
        world
            .write_root_velocity(SPHERE_BODY, &BodyVelocity::from_array([0.0, 0.0, 0.0, 1.0, -2.0, 3.0]))
            .unwrap();
        let state = world.sphere_state();
        assert_eq!(state.pose.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(state.velocity.angular, Vector3::new(1.0, -2.0, 3.0));
    }
}

// src/sim/sphere_world.rs
