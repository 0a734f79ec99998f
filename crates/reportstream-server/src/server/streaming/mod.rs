//! Per-request stream plumbing.
//!
//! - [`coordinator`] drives one emission from the responder into the response
//!   body channel.
//! - [`tracker`] counts in-flight streams and owns the shutdown sequence.

pub mod coordinator;
pub mod tracker;
