// src/sim/probe.rs

use crate::data_input::sample_row::SampleRow;
use crate::sim::context::{JointQuery, SimError, Simulator};

/// One joint wrench read three ways, for checking a backend's lookups agree.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub joint_name: String,
    pub joint_index: usize,
    pub all: Vec<SampleRow>,
    pub by_name: SampleRow,
    pub by_index: SampleRow,
}

impl ProbeReport {
    pub fn lookups_agree(&self) -> bool {
        self.by_name == self.by_index && self.all.get(self.joint_index) == Some(&self.by_name)
    }
}

/// Reads every joint, then `joint_name` by name and by its index in `joint_names()`.
pub fn probe_joint_forces<S: Simulator>(sim: &S, joint_name: &str) -> Result<ProbeReport, SimError> {
    let joint_index = sim
        .joint_names()
        .iter()
        .position(|name| name == joint_name)
        .ok_or_else(|| SimError::UnknownJoint(joint_name.to_string()))?;

    let all = sim.measured_joint_forces(&JointQuery::All)?;
    log::info!("All values");
    for (i, row) in all.iter().enumerate() {
        log::info!("  [{i}] {row}");
    }

    let by_name = first_reading(sim, &JointQuery::by_name(joint_name))?;
    log::info!("Measured joint force by name: {by_name}");

    let by_index = first_reading(sim, &JointQuery::ByIndex(vec![joint_index]))?;
    log::info!("Measured joint force by index {joint_index}: {by_index}");

    Ok(ProbeReport {
        joint_name: joint_name.to_string(),
        joint_index,
        all,
        by_name,
        by_index,
    })
}

fn first_reading<S: Simulator>(sim: &S, query: &JointQuery) -> Result<SampleRow, SimError> {
    sim.measured_joint_forces(query)?
        .into_iter()
        .next()
        .ok_or_else(|| SimError::Backend(format!("empty reading for {query:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::SceneConfig;
    use crate::sim::sphere_world::SphereWorld;

    #[test]
    fn sphere_world_lookups_agree() {
        let mut config = SceneConfig::default();
        config.sensor.position = [0.0, 0.0, 0.05];
        let mut world = SphereWorld::new(config);
        for _ in 0..120 {
            world.step().unwrap();
        }
        let report = probe_joint_forces(&world, "FixedJoint").unwrap();
        assert_eq!(report.joint_index, 0);
        assert!(report.lookups_agree());
    }

    #[test]
    fn missing_joint_is_reported() {
        let world = SphereWorld::new(SceneConfig::default());
        assert!(matches!(
            probe_joint_forces(&world, "FixedJoint1"),
            Err(SimError::UnknownJoint(_))
        ));
    }
}

// src/sim/probe.rs
