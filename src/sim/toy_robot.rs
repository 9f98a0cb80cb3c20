// src/sim/toy_robot.rs

use serde::Serialize;

/// Layout parameters of the stacked-cube robot.
#[derive(Debug, Clone, PartialEq)]
pub struct ToyRobotParams {
    pub root_path: String,
    pub cube_size: f64,
    pub cube_mass: f64,
    /// Gap between the ground and the base cube, and between anchors and faces.
    pub clearance: f64,
    pub drive: DriveParams,
}

impl Default for ToyRobotParams {
    fn default() -> Self {
        Self {
            root_path: "/World/Robot".to_string(),
            cube_size: 0.2,
            cube_mass: 1.0,
            clearance: 0.01,
            drive: DriveParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriveParams {
    pub drive_type: DriveType,
    pub stiffness: f64,
    pub damping: f64,
    pub max_force: f64,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            drive_type: DriveType::Force,
            stiffness: 1000.0,
            damping: 100.0,
            max_force: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveType {
    Force,
    Acceleration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JointAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cuboid {
    pub prim_path: String,
    pub position: [f64; 3],
    pub size: f64,
    pub mass: f64,
    pub color: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JointKind {
    Fixed,
    Revolute { axis: JointAxis, drive: DriveParams },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Joint {
    pub prim_path: String,
    pub parent: String,
    pub child: String,
    /// Anchor in the parent body's frame.
    pub parent_offset: [f64; 3],
    /// Anchor in the child body's frame.
    pub child_offset: [f64; 3],
    pub kind: JointKind,
}

/// Articulation root with its bodies and joints, ready to hand to a scene loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Articulation {
    pub root_path: String,
    pub bodies: Vec<Cuboid>,
    pub joints: Vec<Joint>,
}

impl Articulation {
    pub fn body(&self, name: &str) -> Option<&Cuboid> {
        let path = format!("{}/{}", self.root_path, name);
        self.bodies.iter().find(|b| b.prim_path == path)
    }

    pub fn joint(&self, name: &str) -> Option<&Joint> {
        let path = format!("{}/{}", self.root_path, name);
        self.joints.iter().find(|j| j.prim_path == path)
    }

    /// Joint names relative to the root, in creation order.
    pub fn joint_names(&self) -> Vec<String> {
        self.joints
            .iter()
            .filter_map(|j| j.prim_path.rsplit('/').next().map(str::to_string))
            .collect()
    }
}

fn create_fixed_joint(path: String, parent: &Cuboid, child: &Cuboid, offset: f64) -> Joint {
    Joint {
        prim_path: path,
        parent: parent.prim_path.clone(),
        child: child.prim_path.clone(),
        parent_offset: [0.0, 0.0, offset],
        child_offset: [0.0, 0.0, -offset],
        kind: JointKind::Fixed,
    }
}

fn create_revolute_joint(
    path: String,
    parent: &Cuboid,
    child: &Cuboid,
    offset: f64,
    axis: JointAxis,
    drive: DriveParams,
) -> Joint {
    Joint {
        prim_path: path,
        parent: parent.prim_path.clone(),
        child: child.prim_path.clone(),
        parent_offset: [0.0, 0.0, offset],
        child_offset: [0.0, 0.0, -offset],
        kind: JointKind::Revolute { axis, drive },
    }
}

/// Three cubes stacked on z: base (red), body1 (green), body2 (blue).
/// base-body1 is welded by `FixedJoint1`; body1-body2 turn about z on
/// `RevoluteJoint1` with a force drive.
pub fn build_toy_robot(params: &ToyRobotParams) -> Articulation {
    let size = params.cube_size;
    let offset = size / 2.0 + params.clearance;

    let base_z = offset;
    let body1_z = base_z + size;
    let body2_z = body1_z + size;

    let cube = |name: &str, z: f64, color: [f64; 3]| Cuboid {
        prim_path: format!("{}/{}", params.root_path, name),
        position: [0.0, 0.0, z],
        size,
        mass: params.cube_mass,
        color,
    };
    let base = cube("Base", base_z, [1.0, 0.0, 0.0]);
    let body1 = cube("Body1", body1_z, [0.0, 1.0, 0.0]);
    let body2 = cube("Body2", body2_z, [0.0, 0.0, 1.0]);

    let joints = vec![
        create_fixed_joint(
            format!("{}/FixedJoint1", params.root_path),
            &base,
            &body1,
            offset,
        ),
        create_revolute_joint(
            format!("{}/RevoluteJoint1", params.root_path),
            &body1,
            &body2,
            offset,
            JointAxis::Z,
            params.drive,
        ),
    ];

    log::debug!(
        "Built toy robot at {} with {} bodies and {} joints",
        params.root_path,
        3,
        joints.len()
    );

    Articulation {
        root_path: params.root_path.clone(),
        bodies: vec![base, body1, body2],
        joints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubes_are_stacked_one_size_apart() {
        let robot = build_toy_robot(&ToyRobotParams::default());
        let z: Vec<f64> = robot.bodies.iter().map(|b| b.position[2]).collect();
        assert!((z[0] - 0.11).abs() < 1e-12);
        assert!((z[1] - 0.31).abs() < 1e-12);
        assert!((z[2] - 0.51).abs() < 1e-12);
    }

    #[test]
    fn joints_link_neighbouring_cubes() {
        let robot = build_toy_robot(&ToyRobotParams::default());
        assert_eq!(robot.joint_names(), vec!["FixedJoint1", "RevoluteJoint1"]);

        let fixed = robot.joint("FixedJoint1").unwrap();
        assert_eq!(fixed.parent, "/World/Robot/Base");
        assert_eq!(fixed.child, "/World/Robot/Body1");
        assert_eq!(fixed.kind, JointKind::Fixed);
        assert!((fixed.parent_offset[2] - 0.11).abs() < 1e-12);
        assert!((fixed.child_offset[2] + 0.11).abs() < 1e-12);

        let revolute = robot.joint("RevoluteJoint1").unwrap();
        match &revolute.kind {
            JointKind::Revolute { axis, drive } => {
                assert_eq!(*axis, JointAxis::Z);
                assert_eq!(drive.stiffness, 1000.0);
                assert_eq!(drive.damping, 100.0);
                assert_eq!(drive.max_force, 1000.0);
            }
            other => panic!("unexpected joint kind {other:?}"),
        }
    }

    #[test]
    fn serializes_to_json() {
        let robot = build_toy_robot(&ToyRobotParams::default());
        let json = serde_json::to_string(&robot).unwrap();
        assert!(json.contains("\"type\":\"revolute\""));
        assert!(json.contains("\"drive_type\":\"force\""));
        assert!(robot.body("Body2").is_some());
    }
}

// src/sim/toy_robot.rs
