//! A draggable bottom sheet for the terminal.
//!
//! Drag the handle with the mouse, flick it, or use the keyboard to move the
//! sheet between its snap points. Set `RUST_LOG=debug` to trace snap
//! decisions.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::sheet::Lifecycle;
use crate::ui::{page::PageWidget, sheet_widget::SheetWidget};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Draggable bottom sheet for the terminal")]
struct Cli {
    /// Snap points as open fractions, ascending (e.g. `0.05,0.3,0.6,0.92`).
    #[arg(long, value_delimiter = ',')]
    snap_points: Option<Vec<f64>>,

    /// Snap point to start at (0 = closed).
    #[arg(long)]
    initial_snap: Option<usize>,

    /// Force the dark palette.
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Force the light palette.
    #[arg(long)]
    light: bool,

    /// Position units per terminal row.
    #[arg(long)]
    cell_height: Option<f64>,

    /// Frames per second while animating.
    #[arg(long)]
    fps: Option<u32>,

    /// Ring the terminal bell when a drag is released.
    #[arg(long)]
    haptics: bool,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over the config file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(points) = &self.snap_points {
            config.snap_points = points.clone();
        }
        if let Some(index) = self.initial_snap {
            config.initial_snap = index;
        }
        if self.dark {
            config.dark_mode = Some(true);
        } else if self.light {
            config.dark_mode = Some(false);
        }
        if let Some(height) = self.cell_height {
            config.set_cell_height(height);
        }
        if let Some(fps) = self.fps {
            config.set_fps(fps);
        }
        if self.haptics {
            config.haptics = true;
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(), // never pollute stdout
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = state.layout();
    let theme = state.theme();

    let backdrop = state
        .sheet
        .backdrop_visible()
        .then(|| state.sheet.feedback());
    frame.render_widget(
        PageWidget {
            lines: &state.page_lines,
            top: state.page_smooth.visible_top(),
            theme,
            backdrop,
        },
        layout.page_area,
    );

    state.hit_zones = SheetWidget {
        sheet: &state.sheet,
        content: &state.content,
        theme,
        scale: state.row_scale(),
    }
    .render_and_hit(layout.page_area, frame.buffer_mut());

    let hint = state.config.status_bar_hint();
    let message = state.status_message.as_deref().unwrap_or(&hint);
    let percent = state.open_percent * 100.0;
    let phase = if state.sheet.is_dragging() {
        "dragging"
    } else {
        match state.sheet.lifecycle() {
            Lifecycle::Closed => "closed",
            Lifecycle::Animating { .. } => "moving",
            Lifecycle::Resting(_) => "resting",
        }
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(format!(" {phase} {percent:>3.0}% │ ")),
        Span::raw(message),
    ]))
    .style(theme.status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut user_config = AppConfig::load();
    cli.apply(&mut user_config);
    // Fail on bad sheet settings before touching the terminal.
    user_config
        .sheet_config()
        .context("invalid sheet configuration")?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let frame_period = Duration::from_secs_f64(1.0 / f64::from(user_config.fps));
    let result = match AppState::new(user_config, Rect::new(0, 0, size.width, size.height)) {
        Ok(state) => run(&mut terminal, state, frame_period).await,
        Err(e) => Err(e),
    };

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    mut state: AppState,
    frame_period: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(frame_period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h),
                }
            }

            _ = frames.tick(), if state.needs_frame() => {
                state.on_frame();
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
