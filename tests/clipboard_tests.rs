//! Tests for the retrying clipboard reader.

use std::time::Duration;

use wordtoast::{ClipboardAccess, ClipboardError, ReadInFlight, ReadStep};

/// Scripted clipboard that records how many reads were attempted.
struct Scripted {
    results: Vec<Result<Option<String>, ClipboardError>>,
    calls: usize,
}

impl Scripted {
    fn new(results: Vec<Result<Option<String>, ClipboardError>>) -> Self {
        Self { results, calls: 0 }
    }
}

impl ClipboardAccess for Scripted {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        self.calls += 1;
        if self.results.is_empty() {
            Err(ClipboardError::Busy)
        } else {
            self.results.remove(0)
        }
    }
}

/// Drive a read to completion, counting the retry waits on the way.
fn run_to_completion(
    read: &mut ReadInFlight,
    clipboard: &mut Scripted,
) -> (Option<String>, Vec<Duration>) {
    let mut waits = Vec::new();
    loop {
        match read.step(clipboard) {
            ReadStep::Done(text) => return (text, waits),
            ReadStep::RetryAfter(delay) => waits.push(delay),
        }
    }
}

// === Success paths ===

#[test]
fn text_on_first_attempt() {
    let mut clipboard = Scripted::new(vec![Ok(Some("The quick brown fox".into()))]);
    let mut read = ReadInFlight::new();

    let (text, waits) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text.as_deref(), Some("The quick brown fox"));
    assert_eq!(clipboard.calls, 1);
    assert!(waits.is_empty());
}

#[test]
fn busy_once_then_text() {
    let mut clipboard = Scripted::new(vec![Err(ClipboardError::Busy), Ok(Some("hi".into()))]);
    let mut read = ReadInFlight::new();

    let (text, waits) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text.as_deref(), Some("hi"));
    assert_eq!(clipboard.calls, 2);
    assert_eq!(waits, vec![Duration::from_millis(60)]);
}

#[test]
fn text_is_returned_verbatim() {
    let mut clipboard = Scripted::new(vec![Ok(Some("  padded \r\n".into()))]);
    let mut read = ReadInFlight::new();

    let (text, _) = run_to_completion(&mut read, &mut clipboard);
    // No trimming or normalization on the way through
    assert_eq!(text.as_deref(), Some("  padded \r\n"));
}

// === Exhaustion paths ===

#[test]
fn all_attempts_busy_yields_unavailable_after_exactly_three_tries() {
    let mut clipboard = Scripted::new(vec![
        Err(ClipboardError::Busy),
        Err(ClipboardError::Busy),
        Err(ClipboardError::Busy),
    ]);
    let mut read = ReadInFlight::new();

    let (text, waits) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text, None);
    assert_eq!(clipboard.calls, 3);
    // Two waits between three attempts; no trailing wait after the last
    assert_eq!(waits.len(), 2);
}

#[test]
fn non_text_clipboard_is_retried_then_unavailable() {
    // An image on the clipboard: every attempt sees "no text format"
    let mut clipboard = Scripted::new(vec![Ok(None), Ok(None), Ok(None)]);
    let mut read = ReadInFlight::new();

    let (text, _) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text, None);
    assert_eq!(clipboard.calls, 3);
}

#[test]
fn read_errors_do_not_escape() {
    let mut clipboard = Scripted::new(vec![
        Err(ClipboardError::Read("lock failed".into())),
        Err(ClipboardError::Busy),
        Err(ClipboardError::Read("lock failed".into())),
    ]);
    let mut read = ReadInFlight::new();

    // step() absorbs every failure; the worst outcome is Done(None)
    let (text, _) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text, None);
}

// === Custom budgets ===

#[test]
fn custom_attempt_budget_is_honored() {
    let mut clipboard = Scripted::new(vec![]);
    let mut read = ReadInFlight::with(5, Duration::from_millis(10));

    let (text, waits) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text, None);
    assert_eq!(clipboard.calls, 5);
    assert!(waits.iter().all(|d| *d == Duration::from_millis(10)));
}

#[test]
fn zero_attempts_still_reads_once() {
    let mut clipboard = Scripted::new(vec![Ok(Some("x".into()))]);
    let mut read = ReadInFlight::with(0, Duration::from_millis(10));

    let (text, _) = run_to_completion(&mut read, &mut clipboard);
    assert_eq!(text.as_deref(), Some("x"));
    assert_eq!(clipboard.calls, 1);
}
