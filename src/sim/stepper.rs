// src/sim/stepper.rs

use std::io;
use thiserror::Error;

use crate::sim::context::{JointQuery, SimContext, SimError, Simulator};
use crate::sim::cycle::{CycleAction, CycleCounter};
use crate::sim::sink::SampleSink;

#[derive(Debug, Error)]
pub enum StepperError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("Failed to emit sample: {0}")]
    Sink(#[from] io::Error),
}

/// Totals reported once the loop stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepperStats {
    pub steps: u64,
    pub resets: u64,
    pub samples: u64,
}

/// Steps the simulation until the simulator stops running.
///
/// Each iteration resets the tracked body or samples the sensor joint
/// according to `ctx.schedule`, then advances the counter, physics and scene
/// by one `physics_dt`. The first simulator error ends the loop.
pub fn run_simulator<S, K>(ctx: &mut SimContext<S>, sink: &mut K) -> Result<StepperStats, StepperError>
where
    S: Simulator,
    K: SampleSink + ?Sized,
{
    let sim_dt = ctx.simulator.physics_dt();
    let query = JointQuery::by_name(&ctx.sensor_joint);
    let mut counter = CycleCounter::default();
    let mut stats = StepperStats::default();

    while ctx.simulator.is_running() {
        match ctx.schedule.action_for(counter.current()) {
            CycleAction::Reset => {
                log::info!("Resetting scene...");
                reset_tracked_body(ctx)?;
                counter.restart();
                stats.resets += 1;
            }
            CycleAction::Sample => {
                let readings = ctx.simulator.measured_joint_forces(&query)?;
                for reading in &readings {
                    sink.emit(stats.steps, reading)?;
                }
                stats.samples += 1;
            }
            CycleAction::Idle => {}
        }

        counter.advance();
        ctx.simulator.step()?;
        ctx.simulator.update_scene(sim_dt);
        stats.steps += 1;
    }

    log::info!(
        "Simulation stopped after {} steps ({} resets, {} samples)",
        stats.steps,
        stats.resets,
        stats.samples
    );
    Ok(stats)
}

fn reset_tracked_body<S: Simulator>(ctx: &mut SimContext<S>) -> Result<(), SimError> {
    let body = ctx.tracked_body.as_str();
    let default_state = ctx.simulator.default_root_state(body)?;
    ctx.simulator.write_root_pose(body, &default_state.pose)?;
    ctx.simulator.write_root_velocity(body, &ctx.reset_velocity)?;
    ctx.simulator.reset_body(body)
}

// src/sim/stepper.rs
