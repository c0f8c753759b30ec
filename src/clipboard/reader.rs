//! Retrying clipboard text reader.
//!
//! `ReadInFlight` is polled rather than blocking: each `step` performs one
//! read attempt and either finishes or asks to be polled again after the
//! fixed delay. The caller owns the waiting (on Windows a `WM_TIMER` on the
//! watcher window), so the thread keeps processing messages between
//! attempts.

use std::time::Duration;

use thiserror::Error;

use crate::model::constants::{CLIPBOARD_READ_ATTEMPTS, CLIPBOARD_RETRY_DELAY_MS};

/// Why a single clipboard read attempt failed. Both variants are transient
/// and handled identically: consume an attempt, try again later.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is held by another process")]
    Busy,
    #[error("clipboard read failed: {0}")]
    Read(String),
}

/// One read of the OS clipboard.
///
/// `Ok(None)` means the clipboard currently holds no text format (an image,
/// files, nothing at all). That is retried too: right after a copy the text
/// format can lag behind the change notification.
pub trait ClipboardAccess {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;
}

/// Outcome of a single [`ReadInFlight::step`].
#[derive(Debug, PartialEq, Eq)]
pub enum ReadStep {
    /// Finished. `None` when no text could be obtained within the attempt
    /// budget; that is a normal outcome, not an error.
    Done(Option<String>),
    /// Poll again after this delay.
    RetryAfter(Duration),
}

/// A clipboard read in progress across retry attempts.
#[derive(Debug)]
pub struct ReadInFlight {
    remaining: u32,
    delay: Duration,
}

impl ReadInFlight {
    /// Read with the default budget (3 attempts, 60 ms apart).
    pub fn new() -> Self {
        Self::with(
            CLIPBOARD_READ_ATTEMPTS,
            Duration::from_millis(CLIPBOARD_RETRY_DELAY_MS),
        )
    }

    pub fn with(attempts: u32, delay: Duration) -> Self {
        Self {
            remaining: attempts.max(1),
            delay,
        }
    }

    /// Perform one attempt against `clipboard`.
    pub fn step(&mut self, clipboard: &mut dyn ClipboardAccess) -> ReadStep {
        self.remaining -= 1;
        match clipboard.read_text() {
            Ok(Some(text)) => ReadStep::Done(Some(text)),
            Ok(None) => self.retry_or_give_up(),
            Err(err) => {
                log::debug!("clipboard read attempt failed: {err}");
                self.retry_or_give_up()
            }
        }
    }

    fn retry_or_give_up(&self) -> ReadStep {
        if self.remaining == 0 {
            ReadStep::Done(None)
        } else {
            ReadStep::RetryAfter(self.delay)
        }
    }
}

impl Default for ReadInFlight {
    fn default() -> Self {
        Self::new()
    }
}
