//! End-to-end tests of the clipboard-to-popup pipeline, driven with a
//! scripted clipboard exactly the way the watcher drives the real one:
//! change signal -> retried read -> notifier -> popup model.

use wordtoast::model::popup_state::PopupState;
use wordtoast::{ClipboardAccess, ClipboardError, Notifier, ReadInFlight, ReadStep};

struct Scripted {
    results: Vec<Result<Option<String>, ClipboardError>>,
}

impl ClipboardAccess for Scripted {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        if self.results.is_empty() {
            Ok(None)
        } else {
            self.results.remove(0)
        }
    }
}

/// What the watcher does for one clipboard-change signal.
fn on_clipboard_change(clipboard: &mut Scripted) -> Option<String> {
    let mut read = ReadInFlight::new();
    loop {
        match read.step(clipboard) {
            ReadStep::Done(text) => return text,
            ReadStep::RetryAfter(_) => continue, // timer tick elided
        }
    }
}

#[test]
fn copied_sentence_shows_four_words_then_hides() {
    let mut clipboard = Scripted {
        results: vec![Ok(Some("The quick brown fox".into()))],
    };
    let mut notifier = Notifier::new();

    // Watcher fires, reader succeeds on the first attempt
    let text = on_clipboard_change(&mut clipboard);
    let notification = notifier
        .clipboard_text_arrived(text.as_deref())
        .expect("text should notify");

    assert_eq!(notification.words, 4);
    assert_eq!(notification.label, "4 words");
    assert_eq!(notifier.popup().state(), PopupState::Visible { words: 4 });

    // Auto-hide duration elapses with no further notifications
    assert!(notifier.hide_expired(notification.hide_token));
    assert_eq!(notifier.popup().state(), PopupState::Hidden);
}

#[test]
fn image_on_clipboard_changes_nothing() {
    // Non-text payload: every read attempt reports "no text format"
    let mut clipboard = Scripted { results: vec![] };
    let mut notifier = Notifier::new();

    let text = on_clipboard_change(&mut clipboard);
    assert_eq!(text, None);
    assert!(notifier.clipboard_text_arrived(text.as_deref()).is_none());
    assert_eq!(notifier.popup().state(), PopupState::Hidden);
}

#[test]
fn busy_clipboard_recovers_on_retry() {
    let mut clipboard = Scripted {
        results: vec![
            Err(ClipboardError::Busy),
            Err(ClipboardError::Busy),
            Ok(Some("one word? no: four".into())),
        ],
    };
    let mut notifier = Notifier::new();

    let text = on_clipboard_change(&mut clipboard);
    let notification = notifier
        .clipboard_text_arrived(text.as_deref())
        .expect("recovered text should notify");
    assert_eq!(notification.words, 4);
}

#[test]
fn whitespace_copy_does_not_disturb_a_visible_popup() {
    let mut notifier = Notifier::new();

    let first = notifier
        .clipboard_text_arrived(Some("hello world"))
        .expect("notify");
    assert!(notifier.popup().is_visible());

    // A whitespace-only copy arrives while the popup is up: no-op, the
    // existing popup keeps its content and its timer
    assert!(notifier.clipboard_text_arrived(Some("   \n")).is_none());
    assert_eq!(notifier.popup().state(), PopupState::Visible { words: 2 });

    assert!(notifier.hide_expired(first.hide_token));
}

#[test]
fn rapid_copies_keep_popup_visible_and_last_one_wins() {
    let mut notifier = Notifier::new();

    let first = notifier.clipboard_text_arrived(Some("one")).expect("notify");
    let second = notifier
        .clipboard_text_arrived(Some("two words"))
        .expect("notify");

    // First timer fires late: ignored, the popup never blinks
    assert!(!notifier.hide_expired(first.hide_token));
    assert_eq!(notifier.popup().state(), PopupState::Visible { words: 2 });

    assert!(notifier.hide_expired(second.hide_token));
    assert_eq!(notifier.popup().state(), PopupState::Hidden);
}
