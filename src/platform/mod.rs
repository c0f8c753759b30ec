//! Platform-specific implementations.
//!
//! The clipboard listener, the layered popup window, the tray icon, theme
//! detection and window chrome hints are all Win32; the rest of the crate
//! never touches a handle.

#[cfg(target_os = "windows")]
pub mod windows;
