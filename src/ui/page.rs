//! The scrollable demo page that sits behind the sheet.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::feedback::VisualFeedback;
use crate::ui::theme::Theme;

const PARAGRAPH: &str = "The page behind the sheet keeps scrolling while the sheet is closed. \
Once the sheet rests above its first snap point the page is locked and dimmed \
until the sheet closes again.";

/// Builds the demo page text.
pub fn demo_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for section in 1..=12 {
        lines.push(format!("Section {section}"));
        lines.push(String::new());
        for sentence in PARAGRAPH.split(". ") {
            lines.push(format!("  {}", sentence.trim_end_matches('.')));
        }
        lines.push(String::new());
    }
    lines
}

/// Largest useful scroll offset for a page of `len` lines in `height` rows.
pub fn max_scroll(len: usize, height: u16) -> usize {
    len.saturating_sub(height as usize)
}

pub struct PageWidget<'a> {
    pub lines: &'a [String],
    pub top: usize,
    pub theme: Theme,
    /// Present while the backdrop covers the page.
    pub backdrop: Option<VisualFeedback>,
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = self.theme.page_style();
        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.top)
            .take(area.height as usize)
            .map(|text| {
                let style = if text.starts_with("Section") {
                    self.theme.page_title_style()
                } else {
                    base
                };
                match self.backdrop {
                    Some(fx) => {
                        let shown = if fx.blur { blur(text) } else { text.clone() };
                        Line::from(Span::styled(
                            shown,
                            self.theme.backdrop_style(style, fx.backdrop_opacity),
                        ))
                    }
                    None => Line::from(Span::styled(text.clone(), style)),
                }
            })
            .collect();

        Paragraph::new(lines).style(base).render(area, buf);
    }
}

/// Text smeared beyond recognition, keeping its shape.
fn blur(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { c } else { '░' })
        .collect()
}
