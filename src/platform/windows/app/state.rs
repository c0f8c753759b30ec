//! Windows runtime state.
//!
//! One thread-local cell holding everything the message handlers touch:
//! the two window handles, the popup/notifier model, the theme snapshot,
//! and the clipboard read currently in flight (if any).

use std::cell::RefCell;

use windows::Win32::Foundation::HWND;

use crate::clipboard::ReadInFlight;
use crate::model::popup_state::HideToken;
use crate::model::theme::ThemeSnapshot;
use crate::notifier::Notifier;

/// Everything the wndprocs need. Only ever touched from the UI thread.
pub struct RuntimeState {
    /// Message-only window owning the clipboard subscription.
    pub watcher_hwnd: HWND,
    /// The (single, reused) popup window.
    pub popup_hwnd: HWND,
    /// Popup state machine plus the clipboard-to-count wiring.
    pub notifier: Notifier,
    /// Colors and font, resolved once at startup.
    pub theme: ThemeSnapshot,
    /// Clipboard read currently being retried, if any. A new clipboard
    /// change replaces it: only the latest content matters.
    pub read: Option<ReadInFlight>,
    /// Token for the pending auto-hide, redeemed when the timer fires.
    pub hide_token: Option<HideToken>,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            watcher_hwnd: HWND::default(),
            popup_hwnd: HWND::default(),
            notifier: Notifier::new(),
            theme: ThemeSnapshot::default(),
            read: None,
            hide_token: None,
        }
    }
}

thread_local! {
    /// Global application state for the message loop thread.
    pub static STATE: RefCell<RuntimeState> = RefCell::new(RuntimeState::default());
}
