//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;

use crate::app::host::TerminalHost;
use crate::config::AppConfig;
use crate::core::host::ScrollLock;
use crate::core::sheet::{Sheet, SheetEvent};
use crate::ui::{
    layout::{AppLayout, RowScale},
    page,
    sheet_widget::{SheetContent, SheetHitZones},
    smooth_scroll::SmoothScroll,
    theme::Theme,
};

/// Top-level application state.
pub struct AppState {
    /// The bottom sheet itself.
    pub sheet: Sheet,
    /// Bell and colour-scheme access for the sheet.
    pub host: TerminalHost,
    /// Held by the sheet while it is open; the page checks it before scrolling.
    pub scroll_lock: ScrollLock,
    /// User configuration (bindings and sheet settings).
    pub config: AppConfig,
    /// Text inside the sheet.
    pub content: SheetContent,
    /// Demo page behind the sheet.
    pub page_lines: Vec<String>,
    /// Logical page scroll offset (first visible line).
    pub page_scroll: usize,
    pub page_smooth: SmoothScroll,
    /// Full terminal area, updated on resize.
    pub terminal_area: Rect,
    /// Hit zones from the last rendered frame.
    pub hit_zones: SheetHitZones,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Open fraction from the latest move notification, for the status bar.
    pub open_percent: f64,
    epoch: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, terminal_area: Rect) -> Result<Self> {
        let epoch = Instant::now();
        let host = TerminalHost::new(config.haptics);
        let scroll_lock = ScrollLock::new();
        let layout = AppLayout::from_area(terminal_area);
        let scale = RowScale {
            top: layout.page_area.y,
            cell_height: config.cell_height,
        };
        let sheet = Sheet::new(
            config.sheet_config()?,
            scale.viewport_height(layout.page_area),
            scroll_lock.clone(),
            &host,
            Duration::ZERO,
        )?;
        let sheet_config = sheet.config();
        tracing::debug!(
            snaps = ?sheet_config.snap_points().as_slice(),
            initial = sheet_config.initial_snap(),
            dark_mode = ?sheet_config.dark_mode(),
            spring = ?sheet_config.spring(),
            "sheet ready"
        );

        let open_percent = sheet.open_percent();

        Ok(Self {
            sheet,
            host,
            scroll_lock,
            config,
            content: SheetContent::default(),
            page_lines: page::demo_lines(),
            page_scroll: 0,
            page_smooth: SmoothScroll::new(0.35),
            terminal_area,
            hit_zones: SheetHitZones::default(),
            should_quit: false,
            status_message: None,
            open_percent,
            epoch,
        })
    }

    /// Time since startup; the sheet's clock.
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn row_scale(&self) -> RowScale {
        RowScale {
            top: self.layout().page_area.y,
            cell_height: self.config.cell_height,
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.sheet.is_dark())
    }

    /// True while something on screen is still moving.
    pub fn needs_frame(&self) -> bool {
        self.sheet.needs_frame() || self.page_smooth.is_animating()
    }

    /// Advance animations by one frame.
    pub fn on_frame(&mut self) {
        let now = self.now();
        self.sheet.on_frame(now);
        self.page_smooth.tick();
        self.apply_sheet_events();
    }

    /// Scroll the page by `delta` lines, unless the sheet holds the lock.
    pub fn scroll_page(&mut self, delta: isize) {
        if self.scroll_lock.is_locked() {
            tracing::trace!(
                delta,
                holders = self.scroll_lock.holders(),
                "page scroll blocked by sheet"
            );
            return;
        }
        let max = page::max_scroll(self.page_lines.len(), self.layout().page_area.height);
        self.page_scroll = self.page_scroll.saturating_add_signed(delta).min(max);
        self.page_smooth.set_target(self.page_scroll);
    }

    /// Drain sheet notifications into the status bar and log.
    pub fn apply_sheet_events(&mut self) {
        for event in self.sheet.drain_events() {
            match event {
                SheetEvent::Moved {
                    position,
                    open_percent,
                } => {
                    tracing::trace!(position, open_percent, "sheet moved");
                    self.open_percent = open_percent;
                }
                SheetEvent::SnapChanged(index) => {
                    tracing::debug!(index, "snap changed");
                }
                SheetEvent::Settled(index) => {
                    let fraction = self.sheet.snap_points().get(index).unwrap_or_default();
                    self.status_message = Some(format!(
                        "Snapped to point {index} ({:.0}% open)",
                        fraction * 100.0
                    ));
                }
                SheetEvent::Closed => {
                    tracing::info!("sheet closed");
                    self.status_message = Some("Sheet closed".into());
                }
                SheetEvent::FocusChanged(control) => {
                    tracing::trace!(?control, "focus changed");
                }
            }
        }
    }
}
