//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, FrontendKind, GridConfig, PacingConfig, Settings,
};
