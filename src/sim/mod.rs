// src/sim/mod.rs

pub mod context;
pub mod cycle;
pub mod probe;
pub mod scene;
pub mod sink;
pub mod sphere_world;
pub mod stepper;
pub mod toy_robot;

// src/sim/mod.rs
