//! Colour palettes and text styles, light and dark.

use ratatui::style::{Color, Modifier, Style};

/// Light or dark palette for every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style(self) -> Style {
        if self.dark {
            Style::default().fg(Color::Gray).bg(Color::Rgb(24, 24, 27))
        } else {
            Style::default().fg(Color::Rgb(40, 40, 46)).bg(Color::Rgb(244, 244, 245))
        }
    }

    pub fn page_title_style(self) -> Style {
        self.page_style()
            .fg(if self.dark { Color::LightCyan } else { Color::Blue })
            .add_modifier(Modifier::BOLD)
    }

    /// Page text seen through the backdrop. `opacity` is the backdrop's.
    pub fn backdrop_style(self, base: Style, opacity: f64) -> Style {
        let dimmed = base.add_modifier(Modifier::DIM);
        if opacity < 0.5 {
            return dimmed;
        }
        let fg = if self.dark {
            Color::Rgb(70, 70, 76)
        } else {
            Color::Rgb(150, 150, 158)
        };
        dimmed.fg(fg)
    }

    // ── sheet ──────────────────────────────────────────────────
    pub fn sheet_style(self) -> Style {
        if self.dark {
            Style::default().fg(Color::White).bg(Color::Rgb(39, 39, 42))
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        }
    }

    /// Border colour standing in for the drop shadow; darker as `alpha` grows.
    pub fn shadow_border_style(self, alpha: f64) -> Style {
        let t = ((alpha - 0.15) / 0.25).clamp(0.0, 1.0);
        let (from, to) = if self.dark { (110.0, 200.0) } else { (200.0, 90.0) };
        let level = (from + (to - from) * t).round() as u8;
        self.sheet_style().fg(Color::Rgb(level, level, level))
    }

    pub fn handle_style(self) -> Style {
        let fg = if self.dark { Color::Gray } else { Color::DarkGray };
        self.sheet_style().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn snap_dot_style(self, active: bool) -> Style {
        if active {
            self.sheet_style()
                .fg(if self.dark { Color::LightBlue } else { Color::Blue })
                .add_modifier(Modifier::BOLD)
        } else {
            self.sheet_style().fg(Color::DarkGray)
        }
    }

    pub fn header_style(self) -> Style {
        self.sheet_style().add_modifier(Modifier::BOLD)
    }

    pub fn button_style(self, enabled: bool, focused: bool) -> Style {
        let mut style = if enabled {
            self.sheet_style().fg(if self.dark { Color::LightBlue } else { Color::Blue })
        } else {
            self.sheet_style().fg(Color::DarkGray)
        };
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    /// Body text; faded while the sheet is mostly closed.
    pub fn content_style(self, opacity: f64) -> Style {
        let style = self.sheet_style();
        if opacity < 0.75 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn footer_style(self) -> Style {
        self.sheet_style().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style(self) -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
