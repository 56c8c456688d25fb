//! Rendering layer: everything that touches Ratatui widgets.
//!
//! Turns the sheet's state into cells on the terminal. No input handling
//! happens here.

pub mod layout;
pub mod page;
pub mod sheet_widget;
pub mod smooth_scroll;
pub mod theme;
