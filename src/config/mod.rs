//! Configuration management for the image-seeded Game of Life

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, OutputFormat, SeedConfig, Settings, SimulationConfig, ViewConfig,
};
