//! Terminal renderer and input source built on crossterm

use crate::life::Grid;
use crate::sim::{ControlEvent, InputSource, PacingMode, Renderer, SimControl, SimState};
use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// RAII guard for the terminal session: raw mode plus alternate screen on
/// entry, both restored on drop so a panic or early return cannot leave the
/// shell in raw mode.
pub struct TerminalSession;

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Full-frame terminal renderer. Each frame is queued in full and flushed
/// once, so a partially drawn frame is never shown.
pub struct TermRenderer {
    out: Stdout,
    wait_mode: bool,
}

impl TermRenderer {
    pub fn new(pacing: PacingMode) -> Self {
        Self {
            out: io::stdout(),
            wait_mode: pacing == PacingMode::WaitForSignal,
        }
    }

    fn status_line(&self, control: &SimControl) -> String {
        let state = match control.state() {
            SimState::Running => "running",
            SimState::Paused => "paused",
            SimState::Terminated => "exiting",
        };
        let advance_hint = if self.wait_mode { "[enter] next  " } else { "" };
        format!(
            "gen {}  speed {}x  {}   {}[space] pause  [n] step  [+/-] speed  [q] quit",
            control.generation(),
            control.speed(),
            state,
            advance_hint,
        )
    }
}

impl Renderer for TermRenderer {
    fn render(&mut self, grid: &Grid, control: &SimControl) -> Result<()> {
        queue!(self.out, MoveTo(0, 0))?;

        let mut line = String::with_capacity(grid.width());
        for (x, _, cell) in grid.cells() {
            line.push(if cell.is_alive() { '█' } else { ' ' });
            if x + 1 == grid.width() {
                queue!(self.out, Print(&line), MoveToNextLine(1))?;
                line.clear();
            }
        }

        let status = self.status_line(control);
        queue!(
            self.out,
            Print(status),
            Clear(ClearType::UntilNewLine),
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keyboard input source mapping crossterm events to control events.
pub struct TermInput;

impl TermInput {
    pub fn new() -> Self {
        Self
    }

    fn map_event(event: Event) -> Option<ControlEvent> {
        let key = match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => key,
            _ => return None,
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(ControlEvent::Quit);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(ControlEvent::Quit),
            KeyCode::Char(' ') => Some(ControlEvent::TogglePause),
            KeyCode::Char('n') => Some(ControlEvent::SingleStep),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(ControlEvent::SpeedUp),
            KeyCode::Char('-') => Some(ControlEvent::SpeedDown),
            KeyCode::Enter => Some(ControlEvent::Advance),
            _ => None,
        }
    }
}

impl Default for TermInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TermInput {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Vec<ControlEvent>> {
        let mut events = Vec::new();
        match timeout {
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if !event::poll(remaining)? {
                        break;
                    }
                    if let Some(mapped) = Self::map_event(event::read()?) {
                        events.push(mapped);
                    }
                    if Instant::now() >= deadline {
                        break;
                    }
                }
            }
            None => {
                // Block until a key we understand arrives
                while events.is_empty() {
                    if let Some(mapped) = Self::map_event(event::read()?) {
                        events.push(mapped);
                    }
                }
            }
        }
        Ok(events)
    }
}
