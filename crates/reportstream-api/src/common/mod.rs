//! Shared types and error definitions used across the reportstream service.
//!
//! ## Submodules
//!
//! - [`content`] - Source texts streamed to clients and their formats.
//! - [`error`] - Centralized service error type and its HTTP mapping.
//! - [`feedback`] - Feedback variants and acknowledgments.
//! - [`hapak`] - Fixed category labels.
//! - [`report`] - Report records and the in-memory registry.
//! - [`types`] - Request payloads.

pub mod content;
pub mod error;
pub mod feedback;
pub mod hapak;
pub mod report;
pub mod types;

pub use error::{Error, Result};
