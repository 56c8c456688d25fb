//! User configuration: sheet settings, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/sheet-tui/config.toml` (default `~/.config/sheet-tui/config.toml`).
//! Command-line flags override whatever the file says.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::error::ConfigError;
use crate::core::sheet::SheetConfig;
use crate::core::snap::SnapPoints;
use crate::core::spring::SpringParams;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SnapUp,
    SnapDown,
    Close,
    Activate,
    ScrollPageUp,
    ScrollPageDown,
    ToggleTheme,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::SnapUp,
        Action::SnapDown,
        Action::Close,
        Action::Activate,
        Action::ScrollPageUp,
        Action::ScrollPageDown,
        Action::ToggleTheme,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::SnapUp => "snap_up",
            Action::SnapDown => "snap_down",
            Action::Close => "close",
            Action::Activate => "activate",
            Action::ScrollPageUp => "scroll_page_up",
            Action::ScrollPageDown => "scroll_page_down",
            Action::ToggleTheme => "toggle_theme",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short display string for the status bar (e.g. `"↑"`, `"Esc"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Up"`, `"q"`, `"Esc"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: sheet parameters, host options, keybindings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Snap points as written; validated when the sheet is built.
    pub snap_points: Vec<f64>,
    pub initial_snap: usize,
    /// `None` follows the terminal's colour scheme.
    pub dark_mode: Option<bool>,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Position units per terminal row.
    pub cell_height: f64,
    /// Frame rate while the sheet is moving.
    pub fps: u32,
    /// Ring the terminal bell on drag release.
    pub haptics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let spring = SpringParams::DEFAULT;
        Self {
            bindings: Self::default_bindings(),
            snap_points: SnapPoints::DEFAULT.to_vec(),
            initial_snap: 0,
            dark_mode: None,
            stiffness: spring.stiffness(),
            damping: spring.damping(),
            mass: spring.mass(),
            cell_height: 16.0,
            fps: 60,
            haptics: false,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(SnapUp, vec![KeyBind::new(Up, n)]);
        m.insert(SnapDown, vec![KeyBind::new(Down, n)]);
        m.insert(Close, vec![KeyBind::new(Esc, n)]);
        m.insert(Activate, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(ScrollPageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollPageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char('j'), n)]);
        m.insert(ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: snap | {}: close | Tab: focus | {}: theme | {}: quit",
            self.short_binding(Action::SnapUp),
            self.short_binding(Action::SnapDown),
            self.short_binding(Action::Close),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::Quit),
        )
    }

    /// Validate the sheet-related settings.
    pub fn sheet_config(&self) -> Result<SheetConfig, ConfigError> {
        let snaps = SnapPoints::new(self.snap_points.clone())?;
        let spring = SpringParams::new(self.stiffness, self.damping, self.mass)?;
        SheetConfig::new(snaps, self.initial_snap, self.dark_mode, spring)
    }

    /// Position units per row, kept within 1..=256. Non-finite values are ignored.
    pub fn set_cell_height(&mut self, value: f64) {
        if value.is_finite() {
            self.cell_height = value.clamp(1.0, 256.0);
        }
    }

    pub fn set_fps(&mut self, value: u32) {
        self.fps = value.clamp(10, 240);
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Record a theme choice in the config file. Everything else keeps its
    /// saved value, so command-line overrides never leak into the file.
    pub fn save_dark_mode(dark: bool) -> anyhow::Result<()> {
        let path = config_path();
        let saved = std::fs::read_to_string(&path).ok();
        let contents = Self::with_dark_mode(saved.as_deref(), dark).serialise();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// The saved config (defaults when there is none) with `dark_mode` set.
    fn with_dark_mode(saved: Option<&str>, dark: bool) -> Self {
        let mut config = saved.map(Self::parse).unwrap_or_default();
        config.dark_mode = Some(dark);
        config
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "snap_points" => {
                    let points: Result<Vec<f64>, _> =
                        value.split(',').map(|p| p.trim().parse::<f64>()).collect();
                    match points {
                        Ok(points) => config.snap_points = points,
                        Err(err) => tracing::warn!("ignoring snap_points = {value}: {err}"),
                    }
                    continue;
                }
                "initial_snap" => {
                    if let Ok(v) = value.parse() {
                        config.initial_snap = v;
                    }
                    continue;
                }
                "dark_mode" => {
                    config.dark_mode = match value {
                        "true" => Some(true),
                        "false" => Some(false),
                        _ => None,
                    };
                    continue;
                }
                "stiffness" | "damping" | "mass" | "cell_height" => {
                    let Ok(v) = value.parse::<f64>() else {
                        tracing::warn!("ignoring {key} = {value}");
                        continue;
                    };
                    match key {
                        "stiffness" => config.stiffness = v,
                        "damping" => config.damping = v,
                        "mass" => config.mass = v,
                        _ => config.set_cell_height(v),
                    }
                    continue;
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.set_fps(v);
                    }
                    continue;
                }
                "haptics" => {
                    config.haptics = value == "true";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let snaps: Vec<String> = self.snap_points.iter().map(|p| p.to_string()).collect();
        let dark = match self.dark_mode {
            Some(true) => "true",
            Some(false) => "false",
            None => "auto",
        };
        let mut lines = vec![
            "# sheet-tui configuration".to_string(),
            String::new(),
            "# Sheet".to_string(),
            format!("snap_points = {}", snaps.join(", ")),
            format!("initial_snap = {}", self.initial_snap),
            format!("dark_mode = {dark}"),
            format!("stiffness = {}", self.stiffness),
            format!("damping = {}", self.damping),
            format!("mass = {}", self.mass),
            String::new(),
            "# Terminal".to_string(),
            format!("cell_height = {}", self.cell_height),
            format!("fps = {}", self.fps),
            format!("haptics = {}", self.haptics),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/sheet-tui/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("sheet-tui").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.snap_points = vec![0.05, 0.3, 0.6, 0.92];
        config.initial_snap = 1;
        config.dark_mode = Some(true);
        config.haptics = true;
        config.bindings.insert(
            Action::Quit,
            vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)],
        );
        assert_eq!(AppConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn theme_choice_keeps_other_saved_values() {
        let saved = "snap_points = 0.2, 0.7\nfps = 30\nhaptics = false\n";
        let config = AppConfig::with_dark_mode(Some(saved), true);
        assert_eq!(config.dark_mode, Some(true));
        assert_eq!(config.snap_points, vec![0.2, 0.7]);
        assert_eq!(config.fps, 30);
        assert!(!config.haptics);

        let fresh = AppConfig::with_dark_mode(None, false);
        assert_eq!(
            fresh,
            AppConfig {
                dark_mode: Some(false),
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn bad_lines_keep_defaults() {
        let config = AppConfig::parse(
            "snap_points = 0.2, oops\nfps = fast\nno equals sign\nnot_a_key = 3\ndamping = x\n",
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::parse("fps = 100000\ncell_height = 0\n");
        assert_eq!(config.fps, 240);
        assert_eq!(config.cell_height, 1.0);
    }

    #[test]
    fn invalid_sheet_settings_surface_as_errors() {
        let config = AppConfig::parse("snap_points = 0.5, 0.3\n");
        assert_eq!(
            config.sheet_config(),
            Err(ConfigError::SnapPointsNotAscending { index: 1 })
        );
        let config = AppConfig::parse("damping = 1.5\n");
        assert_eq!(config.sheet_config(), Err(ConfigError::InvalidDamping(1.5)));
        assert!(AppConfig::default().sheet_config().is_ok());
    }

    #[test]
    fn default_bindings_match_sheet_keys() {
        let config = AppConfig::default();
        let none = KeyModifiers::NONE;
        assert_eq!(config.match_key(key(KeyCode::Up, none)), Some(Action::SnapUp));
        assert_eq!(config.match_key(key(KeyCode::Esc, none)), Some(Action::Close));
        assert_eq!(config.match_key(key(KeyCode::Char('q'), none)), Some(Action::Quit));
        assert_eq!(config.match_key(key(KeyCode::Up, KeyModifiers::ALT)), None);
    }

    #[test]
    fn key_strings_parse() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyBind::parse("PgUp").map(|b| b.code), Some(KeyCode::PageUp));
        assert_eq!(KeyBind::parse("Space").map(|b| b.code), Some(KeyCode::Char(' ')));
        assert_eq!(KeyBind::parse("Q").map(|b| b.code), Some(KeyCode::Char('Q')));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
    }
}
