//! Interactive simulation loop

use super::{ControlEvent, SimControl, SimState};
use crate::life::{Grid, RuleEngine};
use anyhow::Result;
use std::mem;
use std::time::{Duration, Instant};

/// Pacing policy between generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingMode {
    /// Advance automatically after the given base interval, scaled down by the
    /// current speed setting.
    FixedInterval(Duration),
    /// Block until the input source delivers an explicit acknowledgment.
    WaitForSignal,
}

/// Draws full frames of the current grid. Implementations must present each
/// frame atomically so a partially drawn frame is never visible.
pub trait Renderer {
    fn render(&mut self, grid: &Grid, control: &SimControl) -> Result<()>;
}

/// Delivers control events to the simulation loop.
pub trait InputSource {
    /// Collect events. With `Some(timeout)` the call waits up to `timeout` and
    /// may return an empty batch; with `None` it blocks until at least one
    /// event is available.
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Vec<ControlEvent>>;
}

/// Drives repeated rule applications against a renderer and an input source
/// until a quit event arrives.
///
/// Single-threaded and cooperative: the pacing wait inside
/// [`InputSource::poll`] is the only suspension point, and the grid is
/// exclusively owned by the loop for its whole lifetime.
pub struct SimulationLoop<R, I> {
    grid: Grid,
    scratch: Grid,
    control: SimControl,
    pacing: PacingMode,
    renderer: R,
    input: I,
}

impl<R: Renderer, I: InputSource> SimulationLoop<R, I> {
    pub fn new(grid: Grid, pacing: PacingMode, renderer: R, input: I) -> Self {
        let scratch = grid.cleared();
        Self {
            grid,
            scratch,
            control: SimControl::new(),
            pacing,
            renderer,
            input,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn control(&self) -> &SimControl {
        &self.control
    }

    /// Run until terminated. Renders the initial grid up front and a final
    /// frame after the quit event so the last generation stays visible.
    pub fn run(&mut self) -> Result<()> {
        self.renderer.render(&self.grid, &self.control)?;
        loop {
            match self.control.state() {
                SimState::Running => self.running_tick()?,
                SimState::Paused => self.paused_tick()?,
                SimState::Terminated => break,
            }
        }
        self.renderer.render(&self.grid, &self.control)?;
        Ok(())
    }

    fn running_tick(&mut self) -> Result<()> {
        match self.pacing {
            PacingMode::FixedInterval(base) => {
                let deadline = Instant::now() + self.control.interval(base);
                loop {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        break;
                    }
                    let events = self.input.poll(Some(remaining))?;
                    for event in events {
                        self.control.apply(event);
                    }
                    if self.control.state() != SimState::Running {
                        // Refresh the status display before pausing or exiting
                        return self.renderer.render(&self.grid, &self.control);
                    }
                }
                self.advance()
            }
            PacingMode::WaitForSignal => {
                let events = self.input.poll(None)?;
                let mut acknowledged = false;
                for event in events {
                    if event == ControlEvent::Advance {
                        acknowledged = true;
                    }
                    self.control.apply(event);
                }
                if self.control.state() == SimState::Running && acknowledged {
                    self.advance()
                } else {
                    self.renderer.render(&self.grid, &self.control)
                }
            }
        }
    }

    fn paused_tick(&mut self) -> Result<()> {
        let events = self.input.poll(None)?;
        let mut step_once = false;
        for event in events {
            if event == ControlEvent::SingleStep {
                step_once = true;
            }
            self.control.apply(event);
        }
        if step_once && self.control.state() == SimState::Paused {
            self.advance()
        } else {
            self.renderer.render(&self.grid, &self.control)
        }
    }

    /// Advance one generation through the double buffer and render it. The
    /// swap makes the new generation visible atomically.
    fn advance(&mut self) -> Result<()> {
        RuleEngine::step_into(&self.grid, &mut self.scratch);
        mem::swap(&mut self.grid, &mut self.scratch);
        self.control.record_step();
        self.renderer.render(&self.grid, &self.control)
    }
}
