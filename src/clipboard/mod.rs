//! Clipboard access abstraction and the retrying reader.
//!
//! The clipboard is a shared OS resource; the process that just wrote to it
//! may still hold it when we come to read. Reads therefore run through a
//! small retry engine that treats every failure as transient and comes back
//! empty-handed, never with an error.

pub mod reader;

pub use reader::{ClipboardAccess, ClipboardError, ReadInFlight, ReadStep};
