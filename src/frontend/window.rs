//! Graphical window front-end built on eframe/egui
//!
//! One configurable front-end covering the full control set: pause,
//! single-step, speed adjust via scroll wheel, quit. The GUI toolkit owns the
//! event loop, so this embeds the shared [`SimControl`] state machine and
//! double-buffered rule step instead of [`crate::sim::SimulationLoop`].

use crate::life::{Grid, RuleEngine};
use crate::sim::{ControlEvent, SimControl, SimState};
use anyhow::{anyhow, Result};
use eframe::egui::{self, Color32, Rect};
use std::mem;
use std::time::{Duration, Instant};

const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 20);
const CELL_FILL: Color32 = Color32::from_rgb(125, 125, 125);

/// Open a window and run the simulation until the window closes or the user
/// quits. `base_interval` is the frame interval at speed 1.
pub fn run_window(grid: Grid, base_interval: Duration, cell_size: u32) -> Result<()> {
    let size = egui::vec2(
        grid.width() as f32 * cell_size as f32,
        grid.height() as f32 * cell_size as f32,
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_resizable(false),
        ..Default::default()
    };
    let app = WindowFrontend::new(grid, base_interval, cell_size as f32);
    eframe::run_native(
        "Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow!("window front-end failed: {e}"))
}

struct WindowFrontend {
    grid: Grid,
    scratch: Grid,
    control: SimControl,
    base_interval: Duration,
    cell_size: f32,
    last_step: Instant,
    step_pending: bool,
}

impl WindowFrontend {
    fn new(grid: Grid, base_interval: Duration, cell_size: f32) -> Self {
        let scratch = grid.cleared();
        Self {
            grid,
            scratch,
            control: SimControl::new(),
            base_interval,
            cell_size,
            last_step: Instant::now(),
            step_pending: false,
        }
    }

    fn collect_events(&self, ctx: &egui::Context) -> Vec<ControlEvent> {
        ctx.input(|input| {
            let mut events = Vec::new();
            if input.viewport().close_requested()
                || input.key_pressed(egui::Key::Q)
                || input.key_pressed(egui::Key::Escape)
            {
                events.push(ControlEvent::Quit);
            }
            if input.key_pressed(egui::Key::Space) || input.pointer.primary_clicked() {
                events.push(ControlEvent::TogglePause);
            }
            if input.key_pressed(egui::Key::N) || input.pointer.secondary_clicked() {
                events.push(ControlEvent::SingleStep);
            }
            let scroll = input.scroll_delta.y;
            if scroll > 0.0 {
                events.push(ControlEvent::SpeedUp);
            } else if scroll < 0.0 {
                events.push(ControlEvent::SpeedDown);
            }
            events
        })
    }

    fn advance(&mut self) {
        RuleEngine::step_into(&self.grid, &mut self.scratch);
        mem::swap(&mut self.grid, &mut self.scratch);
        self.control.record_step();
        self.last_step = Instant::now();
    }
}

impl eframe::App for WindowFrontend {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.collect_events(ctx) {
            if event == ControlEvent::SingleStep && self.control.state() == SimState::Paused {
                self.step_pending = true;
            }
            self.control.apply(event);
        }

        if self.control.state() == SimState::Terminated {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let interval = self.control.interval(self.base_interval);
        match self.control.state() {
            SimState::Running if self.last_step.elapsed() >= interval => self.advance(),
            SimState::Paused if self.step_pending => {
                self.advance();
                self.step_pending = false;
            }
            _ => {}
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let origin = ui.min_rect().min;
                let painter = ui.painter();
                let size = egui::vec2(self.cell_size, self.cell_size);
                for (x, y, cell) in self.grid.cells() {
                    if cell.is_alive() {
                        let min = origin
                            + egui::vec2(x as f32 * self.cell_size, y as f32 * self.cell_size);
                        painter.rect_filled(Rect::from_min_size(min, size), 0.0, CELL_FILL);
                    }
                }
            });

        if self.control.state() == SimState::Running {
            let wait = interval.saturating_sub(self.last_step.elapsed());
            ctx.request_repaint_after(wait);
        }
    }
}
