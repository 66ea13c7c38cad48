//! Display front-ends implementing the renderer and input-source seams

pub mod terminal;
#[cfg(feature = "gui")]
pub mod window;

pub use terminal::{TermInput, TermRenderer, TerminalSession};
#[cfg(feature = "gui")]
pub use window::run_window;
