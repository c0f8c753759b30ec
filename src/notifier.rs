//! Wiring between the clipboard pipeline and the popup.
//!
//! One method, one rule: text that arrived from the clipboard either turns
//! into a visible word count or into nothing at all. Unavailable and
//! whitespace-only text are silently dropped; they are normal outcomes
//! (the user copied an image, or the read lost a race), not errors.

use crate::model::popup_state::{count_label, HideToken, PopupModel};
use crate::words::count_words;

/// What the platform layer must do after a notification fired: render
/// `label`, then hide the popup when the timer redeems `hide_token`.
#[derive(Debug)]
pub struct Notification {
    pub words: usize,
    pub label: String,
    pub hide_token: HideToken,
}

/// Drives the popup model from clipboard reads.
#[derive(Debug, Default)]
pub struct Notifier {
    popup: PopupModel,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            popup: PopupModel::new(),
        }
    }

    /// Feed the outcome of a clipboard read. Returns the notification to
    /// display, or `None` when the popup must not change.
    pub fn clipboard_text_arrived(&mut self, text: Option<&str>) -> Option<Notification> {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return None,
        };

        let words = count_words(text);
        let hide_token = self.popup.show_count(words);
        Some(Notification {
            words,
            label: count_label(words),
            hide_token,
        })
    }

    /// The auto-hide timer fired; returns whether the popup actually hid.
    pub fn hide_expired(&mut self, token: HideToken) -> bool {
        self.popup.hide_expired(token)
    }

    pub fn popup(&self) -> &PopupModel {
        &self.popup
    }
}
