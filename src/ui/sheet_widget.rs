//! The bottom sheet overlay.
//!
//! Draws the sheet from its current position down to the bottom of the page
//! area and reports where the drag handle and buttons ended up, so the
//! input handler can hit-test mouse events against the last frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::core::focus::Control;
use crate::core::sheet::Sheet;
use crate::ui::layout::RowScale;
use crate::ui::theme::Theme;

const HANDLE: &str = "━━━━━━";

/// Rows from the sheet's top edge that act as the drag handle
/// (border, snap dots, header).
const HANDLE_ROWS: u16 = 3;

/// Text shown inside the sheet.
#[derive(Debug, Clone)]
pub struct SheetContent {
    pub title: String,
    pub body: Vec<String>,
    pub footer: String,
}

impl Default for SheetContent {
    fn default() -> Self {
        Self {
            title: "Bottom sheet".into(),
            body: vec![
                "Drag the handle, or flick it, to move between snap points.".into(),
                "Arrow keys step one snap point; Esc closes.".into(),
                "Tab cycles the buttons while the sheet is open.".into(),
                "Click outside the sheet to dismiss it.".into(),
            ],
            footer: "Release quickly to flick past the nearest point.".into(),
        }
    }
}

/// Clickable regions of the last rendered frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetHitZones {
    pub sheet_area: Rect,
    pub handle_area: Rect,
    pub buttons: Vec<(Control, Rect)>,
}

impl SheetHitZones {
    pub fn on_handle(&self, col: u16, row: u16) -> bool {
        contains(self.handle_area, col, row)
    }

    pub fn on_sheet(&self, col: u16, row: u16) -> bool {
        contains(self.sheet_area, col, row)
    }

    pub fn button_at(&self, col: u16, row: u16) -> Option<Control> {
        self.buttons
            .iter()
            .find(|(_, rect)| contains(*rect, col, row))
            .map(|&(control, _)| control)
    }
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

pub struct SheetWidget<'a> {
    pub sheet: &'a Sheet,
    pub content: &'a SheetContent,
    pub theme: Theme,
    pub scale: RowScale,
}

impl SheetWidget<'_> {
    /// Render into `page` and return hit zones for mouse interaction.
    pub fn render_and_hit(self, page: Rect, buf: &mut Buffer) -> SheetHitZones {
        let bottom = i32::from(page.bottom());
        let top = self
            .scale
            .row_of(self.sheet.position())
            .clamp(i32::from(page.y), bottom);
        let height = (bottom - top) as u16;
        if height == 0 || page.width < 4 {
            return SheetHitZones::default();
        }
        let area = Rect::new(page.x, top as u16, page.width, height);
        let fx = self.sheet.feedback();
        let theme = self.theme;

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(theme.shadow_border_style(fx.shadow_alpha))
            .style(theme.sheet_style());
        let inner = block.inner(area);
        block.render(area, buf);

        // Handle bar sits on the top border.
        let handle_x = area.x + area.width.saturating_sub(HANDLE.chars().count() as u16) / 2;
        buf.set_string(handle_x, area.y, HANDLE, theme.handle_style());

        let mut rows = inner.rows();
        let mut next_row = || rows.next();

        if let Some(row) = next_row() {
            Paragraph::new(self.snap_dots(theme))
                .centered()
                .render(row, buf);
        }
        if let Some(row) = next_row() {
            Paragraph::new(Span::styled(self.content.title.as_str(), theme.header_style()))
                .centered()
                .render(row, buf);
        }
        let mut buttons = Vec::with_capacity(Control::ALL.len());
        if let Some(row) = next_row() {
            buttons = self.render_buttons(row, buf);
        }
        next_row();

        // Content slides in from below while the sheet opens.
        let offset = (fx.content_offset / self.scale.cell_height).round() as usize;
        let content_rows: Vec<Rect> = std::iter::from_fn(next_row).collect();
        if let Some((footer_row, body_rows)) = content_rows.split_last() {
            let mut lines = self.content.body.iter().map(|text| {
                Span::styled(text.as_str(), theme.content_style(fx.content_opacity))
            });
            for row in body_rows.iter().skip(offset) {
                match lines.next() {
                    Some(span) => Paragraph::new(span).render(inset(*row), buf),
                    None => break,
                }
            }
            Paragraph::new(Span::styled(self.content.footer.as_str(), theme.footer_style()))
                .render(inset(*footer_row), buf);
        }

        let handle_rows = HANDLE_ROWS.min(area.height);
        SheetHitZones {
            sheet_area: area,
            handle_area: Rect::new(area.x, area.y, area.width, handle_rows),
            buttons,
        }
    }

    fn snap_dots(&self, theme: Theme) -> Line<'static> {
        let active = self.sheet.snap_index();
        let spans: Vec<Span> = (0..self.sheet.snap_points().len())
            .flat_map(|i| {
                let dot = if i == active { "●" } else { "○" };
                [
                    Span::styled(dot, theme.snap_dot_style(i == active)),
                    Span::styled(" ", theme.sheet_style()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn render_buttons(&self, row: Rect, buf: &mut Buffer) -> Vec<(Control, Rect)> {
        let labels: Vec<String> = Control::ALL
            .iter()
            .map(|c| format!("[ {} ]", c.label()))
            .collect();
        let gap = 2u16;
        let total: u16 = labels.iter().map(|l| l.chars().count() as u16).sum::<u16>()
            + gap * (labels.len() as u16 - 1);
        let mut x = row.x + row.width.saturating_sub(total) / 2;

        let mut zones = Vec::with_capacity(labels.len());
        for (control, label) in Control::ALL.iter().copied().zip(labels) {
            let width = (label.chars().count() as u16).min(row.right().saturating_sub(x));
            if width == 0 {
                break;
            }
            let rect = Rect::new(x, row.y, width, 1);
            let style = self.theme.button_style(
                self.sheet.control_enabled(control),
                self.sheet.focused() == Some(control),
            );
            Paragraph::new(Span::styled(label, style)).render(rect, buf);
            zones.push((control, rect));
            x = x.saturating_add(width + gap);
        }
        zones
    }
}

/// Row with a two-column left margin.
fn inset(row: Rect) -> Rect {
    Rect::new(
        row.x.saturating_add(2),
        row.y,
        row.width.saturating_sub(2),
        row.height,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::host::{NullHost, ScrollLock};
    use crate::core::sheet::SheetConfig;
    use crate::core::snap::SnapPoints;
    use crate::core::spring::SpringParams;

    const SCALE: RowScale = RowScale {
        top: 0,
        cell_height: 16.0,
    };

    fn sheet(initial: usize) -> Sheet {
        let snaps = SnapPoints::new(vec![0.05, 0.3, 0.6, 0.92]).unwrap();
        let config = SheetConfig::new(snaps, initial, Some(false), SpringParams::DEFAULT).unwrap();
        Sheet::new(config, 800.0, ScrollLock::new(), &NullHost, Duration::ZERO).unwrap()
    }

    fn render(sheet: &Sheet) -> (Buffer, SheetHitZones) {
        let page = Rect::new(0, 0, 60, 50);
        let mut buf = Buffer::empty(page);
        let content = SheetContent::default();
        let zones = SheetWidget {
            sheet,
            content: &content,
            theme: Theme::new(false),
            scale: SCALE,
        }
        .render_and_hit(page, &mut buf);
        (buf, zones)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn sheet_starts_at_its_snap_row() {
        // 0.6 open on 800 units → top edge at 320 → row 20.
        let sheet = sheet(2);
        let (buf, zones) = render(&sheet);
        assert_eq!(zones.sheet_area, Rect::new(0, 20, 60, 30));
        assert_eq!(zones.handle_area, Rect::new(0, 20, 60, 3));
        assert!(row_text(&buf, 20).contains(HANDLE));
        assert!(row_text(&buf, 22).contains("Bottom sheet"));
    }

    #[test]
    fn buttons_are_hit_testable() {
        let sheet = sheet(2);
        let (buf, zones) = render(&sheet);
        assert_eq!(zones.buttons.len(), 3);
        let (control, rect) = zones.buttons[1];
        assert_eq!(control, Control::Half);
        assert_eq!(zones.button_at(rect.x, rect.y), Some(Control::Half));
        assert!(row_text(&buf, rect.y).contains("[ Open ]"));
        assert_eq!(zones.button_at(0, 0), None);
    }

    #[test]
    fn closed_sheet_only_shows_its_edge() {
        // 0.05 open → top edge at 760 → row 48 of 50.
        let sheet = sheet(0);
        let (_, zones) = render(&sheet);
        assert_eq!(zones.sheet_area.height, 2);
        assert!(zones.on_handle(10, 48));
        assert!(!zones.on_sheet(10, 47));
        assert!(zones.buttons.is_empty());
    }

    #[test]
    fn active_snap_dot_is_filled() {
        let sheet = sheet(1);
        let (buf, zones) = render(&sheet);
        let dots = row_text(&buf, zones.sheet_area.y + 1);
        assert_eq!(dots.matches('●').count(), 1);
        assert_eq!(dots.matches('○').count(), 3);
    }
}
