//! Layout helpers: split the terminal area into regions and convert
//! between terminal rows and sheet position units.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Page area (where the sheet lives) plus a bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page + sheet overlay
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// Maps terminal rows inside the page area to sheet position units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScale {
    /// First row of the page area.
    pub top: u16,
    /// Position units per row.
    pub cell_height: f64,
}

impl RowScale {
    pub fn viewport_height(self, area: Rect) -> f64 {
        f64::from(area.height) * self.cell_height
    }

    /// Pointer position of the middle of terminal row `row`.
    pub fn pointer_y(self, row: u16) -> f64 {
        (f64::from(row) - f64::from(self.top) + 0.5) * self.cell_height
    }

    /// Terminal row (possibly off-screen) holding the sheet's top edge.
    pub fn row_of(self, position: f64) -> i32 {
        i32::from(self.top) + (position / self.cell_height).round() as i32
    }
}
