//! End-to-end tests for the interactive simulation loop, using a scripted
//! input source and a recording renderer in place of the terminal.

use anyhow::Result;
use conway_life::{
    Cell, ControlEvent, Grid, InputSource, PacingMode, Renderer, SimControl, SimState,
    SimulationLoop,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// One recorded frame: generation counter, living cells, lifecycle state.
type Frame = (u64, usize, SimState);

struct RecordingRenderer {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, grid: &Grid, control: &SimControl) -> Result<()> {
        self.frames
            .borrow_mut()
            .push((control.generation(), grid.living_count(), control.state()));
        Ok(())
    }
}

/// Replays scripted event batches; once the script is exhausted it quits, so
/// a buggy loop cannot hang the test. Honors the poll timeout by sleeping, as
/// a real input source would.
struct ScriptedInput {
    batches: VecDeque<Vec<ControlEvent>>,
}

impl ScriptedInput {
    fn new(batches: Vec<Vec<ControlEvent>>) -> Self {
        Self {
            batches: batches.into(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Vec<ControlEvent>> {
        if let Some(limit) = timeout {
            std::thread::sleep(limit.min(Duration::from_millis(5)));
        }
        Ok(self
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![ControlEvent::Quit]))
    }
}

fn vertical_blinker() -> Grid {
    let mut grid = Grid::dead(3, 3).unwrap();
    for y in 0..3 {
        grid.set(1, y, Cell::Alive).unwrap();
    }
    grid
}

fn run_scripted(
    grid: Grid,
    pacing: PacingMode,
    batches: Vec<Vec<ControlEvent>>,
) -> (SimulationLoop<RecordingRenderer, ScriptedInput>, Vec<Frame>) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let renderer = RecordingRenderer {
        frames: Rc::clone(&frames),
    };
    let mut sim = SimulationLoop::new(grid, pacing, renderer, ScriptedInput::new(batches));
    sim.run().unwrap();
    let recorded = frames.borrow().clone();
    (sim, recorded)
}

#[test]
fn quit_renders_a_final_frame_without_advancing() {
    let (sim, frames) = run_scripted(
        vertical_blinker(),
        PacingMode::WaitForSignal,
        vec![vec![ControlEvent::Quit]],
    );

    assert_eq!(sim.control().generation(), 0);
    assert!(frames.len() >= 2, "initial and final frames expected");
    assert_eq!(frames.first().unwrap().2, SimState::Running);
    assert_eq!(frames.last().unwrap(), &(0, 3, SimState::Terminated));
}

#[test]
fn wait_for_signal_advances_only_on_acknowledgment() {
    let start = vertical_blinker();
    let (sim, frames) = run_scripted(
        start.clone(),
        PacingMode::WaitForSignal,
        vec![
            vec![ControlEvent::Advance],
            vec![ControlEvent::Advance],
            vec![ControlEvent::Quit],
        ],
    );

    // Two acknowledged generations: the blinker is back in its start phase
    assert_eq!(sim.control().generation(), 2);
    assert_eq!(sim.grid(), &start);
    // Generations only ever move forward
    let generations: Vec<u64> = frames.iter().map(|f| f.0).collect();
    assert!(generations.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn pause_blocks_advance_until_single_step() {
    let (sim, frames) = run_scripted(
        vertical_blinker(),
        PacingMode::WaitForSignal,
        vec![
            vec![ControlEvent::TogglePause],
            vec![ControlEvent::SingleStep],
            vec![ControlEvent::TogglePause],
            vec![ControlEvent::Advance],
            vec![ControlEvent::Quit],
        ],
    );

    // One generation from the single step while paused, one after resuming
    assert_eq!(sim.control().generation(), 2);
    // The single step rendered a paused frame at generation 1
    assert!(frames.contains(&(1, 3, SimState::Paused)));
}

#[test]
fn paused_simulation_never_advances_without_a_step() {
    let (sim, frames) = run_scripted(
        vertical_blinker(),
        PacingMode::WaitForSignal,
        vec![
            vec![ControlEvent::TogglePause],
            vec![ControlEvent::SpeedUp],
            vec![ControlEvent::SpeedUp],
            vec![ControlEvent::Quit],
        ],
    );

    assert_eq!(sim.control().generation(), 0);
    assert_eq!(sim.control().speed(), 3);
    assert!(frames.iter().all(|frame| frame.0 == 0));
}

#[test]
fn fixed_interval_advances_without_acknowledgment() {
    let (sim, _frames) = run_scripted(
        vertical_blinker(),
        PacingMode::FixedInterval(Duration::from_millis(1)),
        vec![vec![], vec![ControlEvent::Quit]],
    );

    // The first tick advanced on the timer alone, then the quit arrived
    assert_eq!(sim.control().generation(), 1);
    assert_eq!(sim.control().state(), SimState::Terminated);
}

#[test]
fn dead_grid_stays_dead_through_the_loop() {
    let (sim, frames) = run_scripted(
        Grid::dead(5, 5).unwrap(),
        PacingMode::WaitForSignal,
        vec![
            vec![ControlEvent::Advance],
            vec![ControlEvent::Advance],
            vec![ControlEvent::Advance],
            vec![ControlEvent::Quit],
        ],
    );

    assert_eq!(sim.control().generation(), 3);
    assert!(sim.grid().is_empty());
    assert!(frames.iter().all(|frame| frame.1 == 0));
}
