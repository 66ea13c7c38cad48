//! Game of Life core: grid data model and rule application

pub mod grid;
pub mod rules;

pub use grid::{Cell, Grid};
pub use rules::RuleEngine;
