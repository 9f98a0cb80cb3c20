// src/lib.rs - Library interface for the stepper, parser and plotting modules

pub mod component_names;
pub mod constants;
pub mod data_input;
pub mod plot_framework;
pub mod plot_functions;
pub mod sim;
pub mod types;

// Expose crate version derived from vergen-generated env vars at compile time.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
