//! The bottom sheet state machine.
//!
//! A [`Sheet`] owns everything about one sheet instance: its snap index,
//! lifecycle, the single running animation, the drag session, focus and its
//! share of the background scroll lock. Hosts feed it input and frame
//! signals and drain [`SheetEvent`]s to drive rendering.

use std::time::Duration;

use super::drag::DragTracker;
use super::error::{ConfigError, Result};
use super::feedback::VisualFeedback;
use super::focus::{Control, FocusRing};
use super::host::{Host, ScrollLock, ScrollLockGuard};
use super::snap::SnapPoints;
use super::spring::{AnimationHandle, SpringParams, Tick, SETTLE_DISTANCE};

/// Length of the haptic pulse fired on every drag release.
pub const HAPTIC_PULSE: Duration = Duration::from_millis(10);

/// Delay between settling open and moving focus into the sheet.
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Construction-time settings; immutable for the life of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    snap_points: SnapPoints,
    initial_snap: usize,
    dark_mode: Option<bool>,
    spring: SpringParams,
}

impl SheetConfig {
    pub fn new(
        snap_points: SnapPoints,
        initial_snap: usize,
        dark_mode: Option<bool>,
        spring: SpringParams,
    ) -> Result<Self> {
        if initial_snap >= snap_points.len() {
            return Err(ConfigError::InitialSnapOutOfRange {
                index: initial_snap,
                len: snap_points.len(),
            });
        }
        Ok(Self {
            snap_points,
            initial_snap,
            dark_mode,
            spring,
        })
    }

    pub fn snap_points(&self) -> &SnapPoints {
        &self.snap_points
    }

    pub fn initial_snap(&self) -> usize {
        self.initial_snap
    }

    pub fn dark_mode(&self) -> Option<bool> {
        self.dark_mode
    }

    pub fn spring(&self) -> SpringParams {
        self.spring
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_points: SnapPoints::default(),
            initial_snap: 0,
            dark_mode: None,
            spring: SpringParams::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Closed,
    Animating { target: usize },
    Resting(usize),
}

/// Notifications for the host, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    Moved { position: f64, open_percent: f64 },
    SnapChanged(usize),
    Settled(usize),
    /// The sheet came to rest closed. Fired once per close.
    Closed,
    FocusChanged(Option<Control>),
}

/// Keys the sheet understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKey {
    Up,
    Down,
    Escape,
    Tab { shift: bool },
    Activate,
}

#[derive(Debug)]
pub struct Sheet {
    config: SheetConfig,
    viewport_height: f64,
    position: f64,
    snap_index: usize,
    lifecycle: Lifecycle,
    drag: DragTracker,
    animation: Option<AnimationHandle>,
    scroll_lock: ScrollLock,
    lock_guard: Option<ScrollLockGuard>,
    focus: FocusRing,
    focus_due: Option<Duration>,
    dark: bool,
    events: Vec<SheetEvent>,
}

impl Sheet {
    /// Mount a sheet at its initial snap point.
    pub fn new(
        config: SheetConfig,
        viewport_height: f64,
        scroll_lock: ScrollLock,
        host: &dyn Host,
        now: Duration,
    ) -> Result<Self> {
        check_viewport(viewport_height)?;
        let index = config.initial_snap;
        let position = config.snap_points.position_of(index, viewport_height);
        let dark = config.dark_mode.or_else(|| host.prefers_dark()).unwrap_or(false);
        let mut sheet = Self {
            config,
            viewport_height,
            position,
            snap_index: index,
            lifecycle: if index == 0 {
                Lifecycle::Closed
            } else {
                Lifecycle::Resting(index)
            },
            drag: DragTracker::default(),
            animation: None,
            scroll_lock,
            lock_guard: None,
            focus: FocusRing::default(),
            focus_due: None,
            dark,
            events: Vec::new(),
        };
        sheet.sync_scroll_lock();
        if index != 0 {
            sheet.focus_due = Some(now + FOCUS_DELAY);
        }
        tracing::debug!(index, position, dark, "sheet mounted");
        Ok(sheet)
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn snap_points(&self) -> &SnapPoints {
        &self.config.snap_points
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn open_percent(&self) -> f64 {
        1.0 - self.position / self.viewport_height
    }

    pub fn feedback(&self) -> VisualFeedback {
        VisualFeedback::from_open_percent(self.open_percent())
    }

    /// Current snap index; while animating, the destination.
    pub fn snap_index(&self) -> usize {
        self.snap_index
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// True while the sheet rests at, or is heading to, a non-closed point.
    pub fn is_open(&self) -> bool {
        self.occupied_index() != 0
    }

    pub fn backdrop_visible(&self) -> bool {
        self.is_open()
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    pub fn focused(&self) -> Option<Control> {
        self.focus.focused()
    }

    /// Snap index a control moves the sheet to.
    pub fn control_target(&self, control: Control) -> usize {
        let snaps = &self.config.snap_points;
        match control {
            Control::Closed => 0,
            Control::Half => snaps.half_index(),
            Control::Open => snaps.last_index(),
        }
    }

    /// A control is disabled when it targets the active index.
    pub fn control_enabled(&self, control: Control) -> bool {
        self.control_target(control) != self.snap_index
    }

    /// Whether the host should keep delivering frames.
    pub fn needs_frame(&self) -> bool {
        self.animation.is_some() || self.focus_due.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<SheetEvent> {
        std::mem::take(&mut self.events)
    }

    // ── drag ────────────────────────────────────────────────────

    /// Begin a drag at `pointer_y`. Ignored (returns `false`) while an
    /// animation is running.
    pub fn drag_start(&mut self, pointer_y: f64, now: Duration) -> bool {
        if self.animation.is_some() {
            tracing::trace!(pointer_y, "drag start ignored while animating");
            return false;
        }
        self.drag.begin(pointer_y, self.position, now);
        true
    }

    pub fn drag_move(&mut self, pointer_y: f64, now: Duration) {
        let snaps = &self.config.snap_points;
        if let Some(position) = self.drag.update(pointer_y, now, snaps, self.viewport_height) {
            self.set_position(position);
        }
    }

    /// Release the pointer: pick a snap point from position and velocity,
    /// pulse the haptics, and animate there.
    pub fn drag_end(&mut self, host: &mut dyn Host, now: Duration) {
        let Some(release) = self.drag.end() else {
            return;
        };
        let open_percent = 1.0 - release.position / self.viewport_height;
        let target = self.config.snap_points.resolve(open_percent, release.velocity);
        tracing::debug!(
            open_percent,
            velocity = release.velocity,
            from = self.snap_index,
            target,
            "drag released"
        );
        host.haptic_pulse(HAPTIC_PULSE);
        self.animate_to(target, release.velocity, now);
    }

    // ── keyboard & commands ─────────────────────────────────────

    pub fn key(&mut self, key: SheetKey, now: Duration) {
        match key {
            SheetKey::Up => {
                let next = (self.snap_index + 1).min(self.config.snap_points.last_index());
                self.animate_to(next, 0.0, now);
            }
            SheetKey::Down => {
                self.animate_to(self.snap_index.saturating_sub(1), 0.0, now);
            }
            SheetKey::Escape => self.close(now),
            SheetKey::Tab { shift } => {
                let trapped = self.is_open();
                let focused = self.focus.advance(shift, trapped);
                self.events.push(SheetEvent::FocusChanged(focused));
            }
            SheetKey::Activate => {
                if let Some(control) = self.focus.focused() {
                    self.press(control, now);
                }
            }
        }
    }

    /// Press one of the snap buttons. Disabled buttons do nothing.
    pub fn press(&mut self, control: Control, now: Duration) {
        if !self.control_enabled(control) {
            tracing::trace!(?control, "disabled control pressed");
            return;
        }
        self.animate_to(self.control_target(control), 0.0, now);
    }

    /// Move to `index` (clamped to the last snap point).
    pub fn snap_to(&mut self, index: usize, now: Duration) {
        let index = index.min(self.config.snap_points.last_index());
        self.animate_to(index, 0.0, now);
    }

    pub fn close(&mut self, now: Duration) {
        self.animate_to(0, 0.0, now);
    }

    /// Click on the backdrop; only meaningful while it is shown.
    pub fn backdrop_click(&mut self, now: Duration) {
        if self.backdrop_visible() {
            self.close(now);
        }
    }

    // ── viewport & frames ───────────────────────────────────────

    /// Track a new viewport height. At rest the sheet jumps to the same snap
    /// point; a running animation keeps its open fraction and retargets.
    pub fn resize(&mut self, viewport_height: f64) -> Result<()> {
        check_viewport(viewport_height)?;
        let factor = viewport_height / self.viewport_height;
        self.viewport_height = viewport_height;
        if self.drag.is_dragging() {
            return Ok(());
        }
        let position = match self.animation.as_mut() {
            Some(animation) => {
                animation.rescale(factor);
                tracing::trace!(
                    target = animation.target(),
                    velocity = animation.velocity(),
                    "animation rescaled"
                );
                animation.position()
            }
            None => self
                .config
                .snap_points
                .position_of(self.snap_index, viewport_height),
        };
        tracing::debug!(viewport_height, position, "viewport resized");
        self.set_position(position);
        Ok(())
    }

    /// Frame signal from the host.
    pub fn on_frame(&mut self, now: Duration) {
        self.advance_animation(now);
        if let Some(due) = self.focus_due {
            if now >= due {
                self.focus_due = None;
                if self.is_open() {
                    self.focus.focus_first();
                    self.events.push(SheetEvent::FocusChanged(self.focus.focused()));
                }
            }
        }
    }

    // ── internals ───────────────────────────────────────────────

    fn occupied_index(&self) -> usize {
        match self.lifecycle {
            Lifecycle::Closed => 0,
            Lifecycle::Resting(index) => index,
            Lifecycle::Animating { target } => target,
        }
    }

    fn animate_to(&mut self, index: usize, velocity: f64, now: Duration) {
        // The pointer owns the position until it lets go.
        if self.drag.is_dragging() {
            tracing::trace!(index, "snap request ignored while dragging");
            return;
        }
        let target = self.config.snap_points.position_of(index, self.viewport_height);
        if velocity == 0.0 && index == self.snap_index {
            let idle = match self.lifecycle {
                Lifecycle::Animating { .. } => true,
                _ => (self.position - target).abs() < SETTLE_DISTANCE,
            };
            if idle {
                return;
            }
        }

        if let Some(previous) = self.animation.take() {
            previous.cancel();
        }
        if index != self.snap_index {
            self.snap_index = index;
            self.events.push(SheetEvent::SnapChanged(index));
        }
        self.lifecycle = Lifecycle::Animating { target: index };
        self.focus_due = None;
        self.sync_scroll_lock();

        tracing::debug!(index, from = self.position, to = target, velocity, "animating");
        self.animation = Some(AnimationHandle::start(
            self.position,
            target,
            velocity,
            self.config.spring,
        ));
        self.advance_animation(now);
    }

    fn advance_animation(&mut self, now: Duration) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        match animation.tick_at(now) {
            None => {}
            Some(Tick::Moving(position)) => self.set_position(position),
            Some(Tick::Settled(position)) => {
                self.animation = None;
                self.set_position(position);
                self.settle(now);
            }
        }
    }

    fn settle(&mut self, now: Duration) {
        let index = self.snap_index;
        self.events.push(SheetEvent::Settled(index));
        if index == 0 {
            self.lifecycle = Lifecycle::Closed;
            self.events.push(SheetEvent::Closed);
            if self.focus.focused().is_some() {
                self.focus.focus(None);
                self.events.push(SheetEvent::FocusChanged(None));
            }
        } else {
            self.lifecycle = Lifecycle::Resting(index);
            self.focus_due = Some(now + FOCUS_DELAY);
        }
        self.sync_scroll_lock();
        tracing::debug!(index, position = self.position, "settled");
    }

    fn set_position(&mut self, position: f64) {
        self.position = position;
        self.events.push(SheetEvent::Moved {
            position,
            open_percent: self.open_percent(),
        });
    }

    fn sync_scroll_lock(&mut self) {
        if self.is_open() {
            if self.lock_guard.is_none() {
                self.lock_guard = Some(self.scroll_lock.acquire());
            }
        } else {
            self.lock_guard = None;
        }
    }
}

fn check_viewport(height: f64) -> Result<()> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::NullHost;
    use crate::core::spring::REFERENCE_FRAME;

    #[derive(Default)]
    struct RecordingHost {
        pulses: Vec<Duration>,
        dark: Option<bool>,
    }

    impl Host for RecordingHost {
        fn haptic_pulse(&mut self, duration: Duration) {
            self.pulses.push(duration);
        }

        fn prefers_dark(&self) -> Option<bool> {
            self.dark
        }
    }

    fn demo_config(initial: usize) -> SheetConfig {
        SheetConfig::new(
            SnapPoints::new(vec![0.05, 0.3, 0.6, 0.92]).unwrap(),
            initial,
            None,
            SpringParams::DEFAULT,
        )
        .unwrap()
    }

    fn demo_sheet(initial: usize, lock: &ScrollLock) -> Sheet {
        Sheet::new(demo_config(initial), 800.0, lock.clone(), &NullHost, Duration::ZERO).unwrap()
    }

    /// Deliver frames until the sheet stops asking; returns the final time.
    fn run_frames(sheet: &mut Sheet, mut now: Duration) -> Duration {
        for _ in 0..10_000 {
            if !sheet.needs_frame() {
                return now;
            }
            now += REFERENCE_FRAME;
            sheet.on_frame(now);
        }
        panic!("sheet never went idle");
    }

    fn count_closed(events: &[SheetEvent]) -> usize {
        events.iter().filter(|e| **e == SheetEvent::Closed).count()
    }

    #[test]
    fn rejects_out_of_range_initial_snap() {
        let err = SheetConfig::new(SnapPoints::default(), 3, None, SpringParams::DEFAULT);
        assert_eq!(err, Err(ConfigError::InitialSnapOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn rejects_bad_viewport() {
        let lock = ScrollLock::new();
        let res = Sheet::new(SheetConfig::default(), 0.0, lock, &NullHost, Duration::ZERO);
        assert!(matches!(res, Err(ConfigError::InvalidViewport(_))));
    }

    #[test]
    fn escape_closes_once() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        assert_eq!(sheet.position(), 560.0);
        assert_eq!(sheet.lifecycle(), Lifecycle::Resting(1));

        sheet.key(SheetKey::Escape, Duration::ZERO);
        assert_eq!(sheet.lifecycle(), Lifecycle::Animating { target: 0 });
        // A second Escape mid-flight changes nothing.
        sheet.key(SheetKey::Escape, Duration::from_millis(5));
        run_frames(&mut sheet, Duration::ZERO);

        assert_eq!(sheet.position(), 760.0);
        assert_eq!(sheet.lifecycle(), Lifecycle::Closed);
        assert_eq!(count_closed(&sheet.drain_events()), 1);
    }

    #[test]
    fn downward_flick_skips_past_nearest_point() {
        let lock = ScrollLock::new();
        let mut host = RecordingHost::default();
        let mut sheet = demo_sheet(1, &lock);

        assert!(sheet.drag_start(600.0, Duration::ZERO));
        sheet.drag_move(472.0, Duration::from_millis(100));
        sheet.drag_move(481.0, Duration::from_millis(110));
        assert_eq!(sheet.position(), 441.0);
        assert!(sheet.open_percent() < 0.45);

        sheet.drag_end(&mut host, Duration::from_millis(110));
        assert_eq!(sheet.snap_index(), 0);
        assert_eq!(host.pulses, vec![HAPTIC_PULSE]);

        run_frames(&mut sheet, Duration::from_millis(110));
        assert_eq!(sheet.position(), 760.0);
        assert_eq!(count_closed(&sheet.drain_events()), 1);
    }

    #[test]
    fn slow_release_returns_to_nearest() {
        let lock = ScrollLock::new();
        let mut host = RecordingHost::default();
        let mut sheet = demo_sheet(1, &lock);

        sheet.drag_start(600.0, Duration::ZERO);
        sheet.drag_move(560.0, Duration::from_millis(200));
        sheet.drag_move(561.0, Duration::from_millis(300));
        sheet.drag_end(&mut host, Duration::from_millis(300));
        assert_eq!(sheet.snap_index(), 1);
        run_frames(&mut sheet, Duration::from_millis(300));
        assert_eq!(sheet.position(), 560.0);
        assert_eq!(sheet.lifecycle(), Lifecycle::Resting(1));
        assert_eq!(host.pulses.len(), 1);
    }

    #[test]
    fn resize_at_rest_repositions_without_animation() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(2, &lock);
        assert_eq!(sheet.position(), 320.0);
        sheet.resize(1000.0).unwrap();
        assert_eq!(sheet.position(), 400.0);
        assert!(!sheet.is_animating());
        assert_eq!(sheet.lifecycle(), Lifecycle::Resting(2));
    }

    #[test]
    fn resize_mid_animation_keeps_open_fraction() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.snap_to(3, Duration::ZERO);
        let before = sheet.open_percent();
        sheet.resize(1600.0).unwrap();
        assert!((sheet.open_percent() - before).abs() < 1e-12);
        run_frames(&mut sheet, Duration::ZERO);
        assert_eq!(sheet.position(), 1600.0 * (1.0 - 0.92));
    }

    #[test]
    fn requesting_current_index_is_a_no_op() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(2, &lock);
        sheet.drain_events();
        sheet.snap_to(2, Duration::ZERO);
        assert!(!sheet.is_animating());
        assert_eq!(sheet.position(), 320.0);
        assert!(sheet.drain_events().is_empty());
    }

    #[test]
    fn drag_is_blocked_while_animating() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.key(SheetKey::Up, Duration::ZERO);
        assert!(sheet.is_animating());
        assert!(!sheet.drag_start(300.0, Duration::from_millis(1)));
        assert!(!sheet.is_dragging());
    }

    #[test]
    fn commands_are_ignored_while_dragging() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        assert!(sheet.drag_start(600.0, Duration::ZERO));
        sheet.drag_move(500.0, Duration::from_millis(10));
        let held = sheet.position();

        sheet.key(SheetKey::Escape, Duration::from_millis(20));
        sheet.key(SheetKey::Up, Duration::from_millis(20));
        sheet.snap_to(3, Duration::from_millis(20));
        sheet.backdrop_click(Duration::from_millis(20));
        assert!(!sheet.is_animating());
        assert!(sheet.is_dragging());

        let mut now = Duration::from_millis(20);
        for _ in 0..120 {
            now += REFERENCE_FRAME;
            sheet.on_frame(now);
            assert_eq!(sheet.position(), held);
        }
        assert_eq!(sheet.lifecycle(), Lifecycle::Resting(1));
        assert!(lock.is_locked());
        assert!(sheet.drain_events().iter().all(|e| *e != SheetEvent::Closed));
    }

    #[test]
    fn keyboard_steps_chain_from_destination_and_clamp() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.key(SheetKey::Up, Duration::ZERO);
        sheet.key(SheetKey::Up, Duration::from_millis(5));
        sheet.key(SheetKey::Up, Duration::from_millis(10));
        assert_eq!(sheet.snap_index(), 3);
        run_frames(&mut sheet, Duration::from_millis(10));
        assert_eq!(sheet.lifecycle(), Lifecycle::Resting(3));

        sheet.key(SheetKey::Down, Duration::from_secs(10));
        assert_eq!(sheet.snap_index(), 2);
    }

    #[test]
    fn new_animation_replaces_the_running_one() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.snap_to(3, Duration::ZERO);
        sheet.on_frame(REFERENCE_FRAME);
        sheet.snap_to(0, REFERENCE_FRAME * 2);
        run_frames(&mut sheet, REFERENCE_FRAME * 2);
        let events = sheet.drain_events();
        let settles: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SheetEvent::Settled(_)))
            .collect();
        assert_eq!(settles, vec![&SheetEvent::Settled(0)]);
        assert_eq!(sheet.position(), 760.0);
    }

    #[test]
    fn buttons_are_disabled_on_their_own_index() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(0, &lock);
        assert!(!sheet.control_enabled(Control::Closed));
        assert!(sheet.control_enabled(Control::Half));
        sheet.press(Control::Closed, Duration::ZERO);
        assert!(!sheet.is_animating());

        sheet.press(Control::Half, Duration::ZERO);
        assert_eq!(sheet.snap_index(), 2);
        sheet.press(Control::Open, Duration::ZERO);
        assert_eq!(sheet.snap_index(), 3);
    }

    #[test]
    fn programmatic_snaps_do_not_buzz() {
        let lock = ScrollLock::new();
        let mut host = RecordingHost::default();
        let mut sheet = demo_sheet(0, &lock);
        sheet.snap_to(2, Duration::ZERO);
        run_frames(&mut sheet, Duration::ZERO);
        sheet.drag_end(&mut host, Duration::from_secs(5));
        assert!(host.pulses.is_empty());
    }

    #[test]
    fn scroll_lock_is_shared_between_sheets() {
        let lock = ScrollLock::new();
        let mut a = demo_sheet(1, &lock);
        let mut b = demo_sheet(0, &lock);
        assert_eq!(lock.holders(), 1);

        b.snap_to(2, Duration::ZERO);
        assert_eq!(lock.holders(), 2);

        a.close(Duration::ZERO);
        run_frames(&mut a, Duration::ZERO);
        assert!(lock.is_locked());

        b.close(Duration::ZERO);
        assert!(!lock.is_locked());
        drop(b);
        assert!(!lock.is_locked());
    }

    #[test]
    fn focus_moves_into_sheet_after_opening() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        assert_eq!(sheet.focused(), None);
        sheet.on_frame(FOCUS_DELAY / 2);
        assert_eq!(sheet.focused(), None);
        sheet.on_frame(FOCUS_DELAY);
        assert_eq!(sheet.focused(), Some(Control::Closed));
        assert!(!sheet.needs_frame());

        sheet.key(SheetKey::Tab { shift: true }, FOCUS_DELAY);
        assert_eq!(sheet.focused(), Some(Control::Open));
        sheet.key(SheetKey::Tab { shift: false }, FOCUS_DELAY);
        assert_eq!(sheet.focused(), Some(Control::Closed));
    }

    #[test]
    fn closing_releases_focus() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.on_frame(FOCUS_DELAY);
        assert!(sheet.focused().is_some());
        sheet.key(SheetKey::Escape, FOCUS_DELAY);
        run_frames(&mut sheet, FOCUS_DELAY);
        assert_eq!(sheet.focused(), None);
        assert!(sheet
            .drain_events()
            .contains(&SheetEvent::FocusChanged(None)));
    }

    #[test]
    fn activate_presses_focused_control() {
        let lock = ScrollLock::new();
        let mut sheet = demo_sheet(1, &lock);
        sheet.on_frame(FOCUS_DELAY);
        sheet.key(SheetKey::Tab { shift: true }, FOCUS_DELAY);
        sheet.key(SheetKey::Activate, FOCUS_DELAY);
        assert_eq!(sheet.snap_index(), 3);
    }

    #[test]
    fn backdrop_click_only_when_shown() {
        let lock = ScrollLock::new();
        let mut closed = demo_sheet(0, &lock);
        closed.backdrop_click(Duration::ZERO);
        assert!(!closed.is_animating());

        let mut open = demo_sheet(2, &lock);
        open.backdrop_click(Duration::ZERO);
        assert_eq!(open.snap_index(), 0);
        assert!(!open.backdrop_visible());
    }

    #[test]
    fn dark_mode_prefers_config_then_host() {
        let lock = ScrollLock::new();
        let host = RecordingHost {
            dark: Some(true),
            ..Default::default()
        };
        let auto = Sheet::new(demo_config(0), 800.0, lock.clone(), &host, Duration::ZERO).unwrap();
        assert!(auto.is_dark());

        let forced = SheetConfig::new(
            SnapPoints::default(),
            0,
            Some(false),
            SpringParams::DEFAULT,
        )
        .unwrap();
        let light = Sheet::new(forced, 800.0, lock.clone(), &host, Duration::ZERO).unwrap();
        assert!(!light.is_dark());

        let unknown = Sheet::new(demo_config(0), 800.0, lock, &NullHost, Duration::ZERO).unwrap();
        assert!(!unknown.is_dark());
    }
}
