//! Simulation control state machine

use std::time::Duration;

/// Discrete control events produced by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Terminate the simulation.
    Quit,
    /// Toggle between Running and Paused.
    TogglePause,
    /// While paused, advance exactly one generation.
    SingleStep,
    SpeedUp,
    SpeedDown,
    /// Acknowledgment signal used by wait-for-signal pacing.
    Advance,
}

/// Lifecycle state of the simulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimState {
    #[default]
    Running,
    Paused,
    /// Terminal state, no further transitions.
    Terminated,
}

/// Control state owned by the simulation loop: lifecycle state, speed and the
/// generation counter. Mutated only through input events and
/// [`SimControl::record_step`].
#[derive(Debug, Clone)]
pub struct SimControl {
    state: SimState,
    speed: u32,
    generation: u64,
}

impl Default for SimControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SimControl {
    pub fn new() -> Self {
        Self {
            state: SimState::Running,
            speed: 1,
            generation: 0,
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Speed multiplier applied to the base frame interval. 1 is the
    /// configured base rate, higher is faster, there is no upper bound.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Effective frame interval for fixed-interval pacing.
    pub fn interval(&self, base: Duration) -> Duration {
        base / self.speed
    }

    /// Mark one completed generation advance.
    pub fn record_step(&mut self) {
        self.generation += 1;
    }

    /// Apply a control event to the state machine.
    ///
    /// `SingleStep` and `Advance` do not change the lifecycle state; whether
    /// they trigger a generation advance is decided by the loop.
    pub fn apply(&mut self, event: ControlEvent) {
        if self.state == SimState::Terminated {
            return;
        }
        match event {
            ControlEvent::Quit => self.state = SimState::Terminated,
            ControlEvent::TogglePause => {
                self.state = match self.state {
                    SimState::Running => SimState::Paused,
                    SimState::Paused => SimState::Running,
                    SimState::Terminated => SimState::Terminated,
                };
            }
            ControlEvent::SpeedUp => self.speed = self.speed.saturating_add(1),
            ControlEvent::SpeedDown => self.speed = self.speed.saturating_sub(1).max(1),
            ControlEvent::SingleStep | ControlEvent::Advance => {}
        }
    }
}
