//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, AppConfig};
use crate::core::sheet::SheetKey;

use super::state::AppState;

/// Lines moved per wheel notch.
const WHEEL_LINES: isize = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if key.kind != KeyEventKind::Press {
        return;
    }

    let now = state.now();
    match key.code {
        KeyCode::Tab => {
            state.sheet.key(SheetKey::Tab { shift: false }, now);
            return;
        }
        KeyCode::BackTab => {
            state.sheet.key(SheetKey::Tab { shift: true }, now);
            return;
        }
        // Digits jump straight to a snap point.
        KeyCode::Char(c @ '0'..='9') if key.modifiers.is_empty() => {
            let index = c as usize - '0' as usize;
            state.sheet.snap_to(index, now);
            state.apply_sheet_events();
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;
    match action {
        Action::SnapUp => state.sheet.key(SheetKey::Up, now),
        Action::SnapDown => state.sheet.key(SheetKey::Down, now),
        Action::Close => state.sheet.key(SheetKey::Escape, now),
        Action::Activate => state.sheet.key(SheetKey::Activate, now),
        Action::ScrollPageUp => {
            let page = state.layout().page_area.height as isize;
            state.scroll_page(-page);
        }
        Action::ScrollPageDown => {
            let page = state.layout().page_area.height as isize;
            state.scroll_page(page);
        }
        Action::ToggleTheme => toggle_theme(state),
        Action::Quit => state.should_quit = true,
    }
    state.apply_sheet_events();
}

fn toggle_theme(state: &mut AppState) {
    let dark = !state.sheet.is_dark();
    state.sheet.set_dark(dark);
    state.config.dark_mode = Some(dark);
    if let Err(e) = AppConfig::save_dark_mode(dark) {
        tracing::warn!("failed to save config: {e:#}");
        state.status_message = Some(format!("Could not save theme: {e}"));
    }
}

/// Process a mouse event against the hit zones of the last frame.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let now = state.now();
    let pointer_y = state.row_scale().pointer_y(mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let zones = &state.hit_zones;
            if let Some(control) = zones.button_at(mouse.column, mouse.row) {
                state.sheet.press(control, now);
            } else if zones.on_handle(mouse.column, mouse.row) {
                state.sheet.drag_start(pointer_y, now);
            } else if !zones.on_sheet(mouse.column, mouse.row)
                && mouse.row < state.layout().status_area.y
            {
                state.sheet.backdrop_click(now);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.sheet.drag_move(pointer_y, now);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.sheet.drag_end(&mut state.host, now);
        }
        MouseEventKind::ScrollUp => state.scroll_page(-WHEEL_LINES),
        MouseEventKind::ScrollDown => state.scroll_page(WHEEL_LINES),
        _ => {}
    }
    state.apply_sheet_events();
}

/// Track a terminal resize: the page area becomes the sheet's new viewport.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = ratatui::layout::Rect::new(0, 0, width, height);
    let page_area = state.layout().page_area;
    let viewport = state.row_scale().viewport_height(page_area);
    match state.sheet.resize(viewport) {
        Ok(()) => tracing::debug!(
            viewport = state.sheet.viewport_height(),
            animating = state.sheet.is_animating(),
            "terminal resized to {width}x{height}"
        ),
        Err(e) => tracing::warn!("ignoring resize to {width}x{height}: {e}"),
    }
    let max = crate::ui::page::max_scroll(state.page_lines.len(), page_area.height);
    state.page_scroll = state.page_scroll.min(max);
    state.page_smooth.set_target(state.page_scroll);
    state.apply_sheet_events();
}
