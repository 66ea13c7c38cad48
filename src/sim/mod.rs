//! Simulation loop, control state machine and front-end seams

pub mod control;
pub mod runner;

pub use control::{ControlEvent, SimControl, SimState};
pub use runner::{InputSource, PacingMode, Renderer, SimulationLoop};
