// src/plot_functions/mod.rs

pub mod plot_force_torque;

// src/plot_functions/mod.rs
