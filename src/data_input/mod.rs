// src/data_input/mod.rs

pub mod sample_row;
pub mod series_parser;

// src/data_input/mod.rs
