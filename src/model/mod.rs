//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies):
//! the popup state machine, the theme palette, and the fixed
//! appearance/timing constants.
//!
//! Everything Win32 lives in `platform::windows`.

pub mod constants;
pub mod popup_state;
pub mod theme;

pub use constants::*;
pub use popup_state::{HideToken, PopupModel, PopupState};
pub use theme::{Rgb, ThemeSnapshot};
