//! Popup state machine (pure Rust, no FFI).
//!
//! One popup exists for the lifetime of the process. `show_count` moves it
//! to `Visible` and hands back a [`HideToken`]; the auto-hide timer redeems
//! the token when it fires. A token minted by an older `show_count` no
//! longer hides anything, which is exactly the "a new notification restarts
//! the timer" rule: the window stays continuously visible across rapid
//! consecutive notifications instead of blinking.

use super::constants::EDGE_MARGIN;

/// Popup visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Hidden,
    Visible { words: usize },
}

/// Proof of a particular `show_count` call, redeemed on timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideToken(u64);

/// Popup lifecycle: Hidden -> show_count -> Visible -> expiry -> Hidden.
#[derive(Debug)]
pub struct PopupModel {
    state: PopupState,
    generation: u64,
}

impl PopupModel {
    pub fn new() -> Self {
        Self {
            state: PopupState::Hidden,
            generation: 0,
        }
    }

    /// Show (or refresh) the popup with a new count.
    ///
    /// Always succeeds; if the popup is already visible its content is
    /// replaced in place. The returned token invalidates every token
    /// handed out before it.
    pub fn show_count(&mut self, words: usize) -> HideToken {
        self.generation += 1;
        self.state = PopupState::Visible { words };
        HideToken(self.generation)
    }

    /// Auto-hide timer fired. Hides the popup only if `token` came from the
    /// most recent `show_count`; returns whether a transition happened.
    pub fn hide_expired(&mut self, token: HideToken) -> bool {
        if token.0 != self.generation || self.state == PopupState::Hidden {
            return false;
        }
        self.state = PopupState::Hidden;
        true
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, PopupState::Visible { .. })
    }

    /// Current label, or `None` while hidden.
    pub fn label(&self) -> Option<String> {
        match self.state {
            PopupState::Hidden => None,
            PopupState::Visible { words } => Some(count_label(words)),
        }
    }
}

impl Default for PopupModel {
    fn default() -> Self {
        Self::new()
    }
}

/// "1 word", "0 words", "2 words".
pub fn count_label(words: usize) -> String {
    format!("{} word{}", words, if words == 1 { "" } else { "s" })
}

/// Top-left origin that places a `width` x `height` popup in the
/// bottom-right corner of the work area, inset by the fixed margin.
/// Recomputed on every show so text-driven resizes stay anchored.
pub fn popup_origin(work_right: i32, work_bottom: i32, width: i32, height: i32) -> (i32, i32) {
    (
        work_right - width - EDGE_MARGIN,
        work_bottom - height - EDGE_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let popup = PopupModel::new();
        assert_eq!(popup.state(), PopupState::Hidden);
        assert!(popup.label().is_none());
    }

    #[test]
    fn show_then_expire_round_trip() {
        let mut popup = PopupModel::new();
        let token = popup.show_count(4);
        assert_eq!(popup.state(), PopupState::Visible { words: 4 });
        assert!(popup.hide_expired(token));
        assert_eq!(popup.state(), PopupState::Hidden);
    }

    #[test]
    fn stale_token_does_not_hide() {
        let mut popup = PopupModel::new();
        let first = popup.show_count(1);
        let second = popup.show_count(2);
        // The first notification's timer fires late; the popup must stay up.
        assert!(!popup.hide_expired(first));
        assert_eq!(popup.state(), PopupState::Visible { words: 2 });
        assert!(popup.hide_expired(second));
    }

    #[test]
    fn expiry_is_idempotent() {
        let mut popup = PopupModel::new();
        let token = popup.show_count(3);
        assert!(popup.hide_expired(token));
        assert!(!popup.hide_expired(token));
    }
}
