//! Interactive Conway's Game of Life simulator
//!
//! This library provides the grid data model, the B3/S23 rule engine and an
//! interactive simulation loop that drives a renderer and an input source
//! (terminal or graphical window) until the user quits.

pub mod config;
pub mod error;
pub mod frontend;
pub mod life;
pub mod sim;

pub use config::Settings;
pub use error::LifeError;
pub use life::{Cell, Grid, RuleEngine};
pub use sim::{ControlEvent, InputSource, PacingMode, Renderer, SimControl, SimState, SimulationLoop};
