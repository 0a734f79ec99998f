//! Server-side components of the report streaming service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI and environment configuration.
//! - [`service`] - HTTP handlers, request extraction, and routing.
//! - [`streaming`] - Per-request frame coordination and in-flight tracking.
//! - [`telemetry`] - Log subscriber setup and optional metrics.

pub mod config;
pub mod service;
pub mod streaming;
pub mod telemetry;
