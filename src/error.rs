//! Error taxonomy for the Game of Life simulator

use thiserror::Error;

/// Errors produced by the grid and configuration contracts.
///
/// None of these occur mid-simulation: dimensions are fixed at creation and the
/// rule step is total over valid grids.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid timer interval {seconds}: must be a positive number of seconds")]
    InvalidTimerValue { seconds: f64 },
}
