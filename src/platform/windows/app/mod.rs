//! Runtime state shared by the Win32 message handlers.

pub mod state;

pub use state::{RuntimeState, STATE};
