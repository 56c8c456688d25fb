//! Core motion controller – drag tracking, velocity, snapping, springs and
//! the sheet state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate. Positions
//! are plain `f64` units measured down from the top of the viewport; the
//! host decides what a unit is on screen.

pub mod drag;
pub mod error;
pub mod feedback;
pub mod focus;
pub mod host;
pub mod sheet;
pub mod snap;
pub mod spring;
pub mod velocity;
