//! Fixed appearance and timing constants.
//!
//! The popup is deliberately not configurable; these values are the whole
//! of its tuning surface.

// === Identity ===

/// Name used for the startup shortcut file.
pub const APP_NAME: &str = "WordToast";

/// Tray icon tooltip.
pub const TRAY_TOOLTIP: &str = "Word Counter";

// === Popup geometry ===

/// Corner radius of the popup background, in pixels.
pub const CORNER_RADIUS: f32 = 12.0;

/// Inset from the right/bottom edges of the work area, in pixels.
pub const EDGE_MARGIN: i32 = 24;

/// Padding between the popup border and the label, in pixels (each side).
pub const PADDING_PX: i32 = 14;

/// Border stroke width, in pixels.
pub const BORDER_WIDTH: f32 = 1.0;

/// Label size in device-independent pixels (11 pt at 96 DPI).
pub const FONT_SIZE_DIP: f32 = 14.67;

// === Timing ===

/// How long the popup stays up after the most recent notification.
pub const AUTO_HIDE_MS: u32 = 1800;

/// Clipboard read attempts before giving up on a change event.
pub const CLIPBOARD_READ_ATTEMPTS: u32 = 3;

/// Delay between clipboard read attempts, in milliseconds.
pub const CLIPBOARD_RETRY_DELAY_MS: u64 = 60;

// === Fonts ===

/// Preferred label font on builds that ship Segoe UI Variable.
pub const FONT_VARIABLE: &str = "Segoe UI Variable Display";

/// Label font everywhere else.
pub const FONT_FALLBACK: &str = "Segoe UI";
