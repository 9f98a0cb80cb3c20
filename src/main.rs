// src/main.rs

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use ft_sensor_sim::constants::{DEFAULT_COLUMN_COUNT, FRAME_DELAY_MS};
use ft_sensor_sim::data_input::series_parser::load_series;
use ft_sensor_sim::plot_functions::plot_force_torque::{
    plot_force_torque_animation, plot_force_torque_stacked, AnimationOptions,
};
use ft_sensor_sim::sim::context::{BodyVelocity, SimContext, Simulator};
use ft_sensor_sim::sim::probe::probe_joint_forces;
use ft_sensor_sim::sim::scene::SceneConfig;
use ft_sensor_sim::sim::sink::{LogSink, SeriesWriter};
use ft_sensor_sim::sim::sphere_world::{SphereWorld, SPHERE_BODY};
use ft_sensor_sim::sim::stepper::run_simulator;
use ft_sensor_sim::sim::toy_robot::{build_toy_robot, ToyRobotParams};

#[derive(Parser)]
#[command(author, version = ft_sensor_sim::crate_version(), about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a recorded force/torque text file as stacked plots and animations.
    Plot {
        input_file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_COLUMN_COUNT)]
        cols: usize,
        #[arg(long = "frame-delay-ms", default_value_t = FRAME_DELAY_MS)]
        frame_delay_ms: u32,
        #[arg(long = "max-frames")]
        max_frames: Option<usize>,
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,
        /// Only write the static stacked PNGs.
        #[arg(long = "no-animation")]
        no_animation: bool,
    },
    /// Step the built-in sphere scene, sampling the sensor joint and resetting the sphere.
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        steps: Option<u64>,
        /// Also write every sample to this file in the plot input format.
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Print the stacked-cube articulation.
    Robot {
        #[arg(long)]
        json: bool,
    },
    /// Step the scene briefly, then read the sensor joint by name and by index.
    Probe {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 100)]
        steps: u64,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Plot {
            input_file,
            cols,
            frame_delay_ms,
            max_frames,
            output_dir,
            no_animation,
        } => {
            let root_name = input_file
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&output_dir)?;

            let table = load_series(&input_file, cols)?;
            if table.nrows() == 0 {
                log::warn!("No data rows in {}, nothing to plot.", input_file.display());
                return Ok(());
            }

            log::info!("--- Generating Stacked Force/Torque Plots ---");
            plot_force_torque_stacked(&table, &root_name, &output_dir)?;

            if !no_animation {
                log::info!("--- Generating Force/Torque Animations ---");
                let options = AnimationOptions {
                    frame_delay_ms,
                    max_frames,
                    output_dir,
                };
                plot_force_torque_animation(&table, &root_name, &options)?;
            }
        }
        Command::Simulate {
            config,
            steps,
            record,
        } => {
            let mut scene = load_scene(config)?;
            if steps.is_some() {
                scene.simulation.max_steps = steps;
            }
            let mut ctx = scene_context(scene)?;
            log::info!("[INFO]: Setup complete...");

            let stats = match record {
                Some(path) => {
                    let mut sinks = (LogSink, SeriesWriter::create(&path)?);
                    let stats = run_simulator(&mut ctx, &mut sinks)?;
                    log::info!(
                        "Recorded {} samples to {}",
                        sinks.1.rows_written(),
                        path.display()
                    );
                    stats
                }
                None => run_simulator(&mut ctx, &mut LogSink)?,
            };
            log::info!(
                "Simulated {:.2} s of physics",
                stats.steps as f64 * ctx.simulator.physics_dt()
            );
        }
        Command::Robot { json } => {
            let robot = build_toy_robot(&ToyRobotParams::default());
            if json {
                println!("{}", serde_json::to_string_pretty(&robot)?);
            } else {
                for body in &robot.bodies {
                    println!("{} at {:?} (size {}, mass {})", body.prim_path, body.position, body.size, body.mass);
                }
                for joint in &robot.joints {
                    println!("{} : {} -> {} ({:?})", joint.prim_path, joint.parent, joint.child, joint.kind);
                }
            }
        }
        Command::Probe { config, steps } => {
            let scene = load_scene(config)?;
            let joint_name = scene.sensor.joint_name.clone();
            let mut world = SphereWorld::new(scene);
            for _ in 0..steps {
                world.step()?;
            }
            let report = probe_joint_forces(&world, &joint_name)?;
            if !report.lookups_agree() {
                log::warn!("Joint lookups by name and by index disagree for '{joint_name}'");
            }
        }
    }

    Ok(())
}

fn load_scene(config: Option<PathBuf>) -> Result<SceneConfig, Box<dyn Error>> {
    Ok(match config {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    })
}

fn scene_context(scene: SceneConfig) -> Result<SimContext<SphereWorld>, Box<dyn Error>> {
    let schedule = scene.schedule()?;
    let reset_velocity = BodyVelocity::from_array(scene.stepper.reset_velocity);
    let joint_name = scene.sensor.joint_name.clone();
    log::info!(
        "Scene: sensor asset {}, camera {:?} -> {:?}, dt {} s",
        scene.sensor.usd_path.display(),
        scene.simulation.camera_eye,
        scene.simulation.camera_target,
        scene.simulation.dt
    );
    Ok(SimContext::new(SphereWorld::new(scene))
        .with_schedule(schedule)
        .with_reset_velocity(reset_velocity)
        .with_sensor_joint(&joint_name)
        .with_tracked_body(SPHERE_BODY))
}

// src/main.rs
