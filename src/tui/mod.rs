//! Ratatui-based surface viewer.
//!
//! Shows the projected surface with its color bar and blocks until the user
//! quits. Arrow keys rotate the camera; `r` resets it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::SurfaceData;
use crate::domain::{Camera, ROTATION_STEP_DEG};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::math::format_tick;
use crate::plot::{build_scene, projection::box_radius, Scene};

mod colorbar;
mod surface_chart;

pub use colorbar::{colorbar_rect, ColorBar, COLORBAR_COLUMN_WIDTH};
use surface_chart::SurfaceChart;

/// Start the viewer and block until it is closed.
pub fn run(data: &SurfaceData) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut viewer = Viewer::new(data);
    viewer.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_TERMINAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct Viewer<'a> {
    data: &'a SurfaceData,
    camera: Camera,
    scene: Scene,
}

impl<'a> Viewer<'a> {
    fn new(data: &'a SurfaceData) -> Self {
        let camera = Camera::default();
        let scene = build_scene(&data.mesh, &data.grid, data.heights, &camera);
        Self { data, camera, scene }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply a key press. Returns `true` when the viewer should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let before = self.camera;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.camera.rotate_azimuth(-ROTATION_STEP_DEG),
            KeyCode::Right => self.camera.rotate_azimuth(ROTATION_STEP_DEG),
            KeyCode::Up => self.camera.tilt(ROTATION_STEP_DEG),
            KeyCode::Down => self.camera.tilt(-ROTATION_STEP_DEG),
            KeyCode::Char('r') => self.camera = Camera::default(),
            _ => {}
        }
        if self.camera != before {
            self.scene = build_scene(&self.data.mesh, &self.data.grid, self.data.heights, &self.camera);
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("meshplot", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | {}", self.data.source.display())),
            ]),
            Line::from(Span::styled(self.status_line(), Style::default().fg(Color::Gray))),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn status_line(&self) -> String {
        format!(
            "n={} | z=[{}, {}] | elev={:.0}° azim={:.0}° | cells={}",
            self.data.n,
            format_tick(self.data.heights.min),
            format_tick(self.data.heights.max),
            self.camera.elevation_deg,
            self.camera.azimuth_deg,
            self.scene.patches.len(),
        )
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Surface").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(COLORBAR_COLUMN_WIDTH)])
            .split(inner);

        let chart = SurfaceChart {
            scene: &self.scene,
            // Leave room for labels just outside the box.
            extent: box_radius() * 1.25,
        };
        frame.render_widget(chart, chunks[0]);
        frame.render_widget(
            ColorBar {
                heights: self.data.heights,
            },
            chunks[1],
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ rotate  ↑/↓ tilt  r reset view  q quit";
        let p = Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::Gray))))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
