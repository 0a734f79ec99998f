//! HTTP surface of the report service.
//!
//! - [`extract`] - JSON body extraction with service-shaped rejections.
//! - [`handler`] - Shared service state and route handlers.
//! - [`router`] - Route table plus CORS and request tracing layers.

pub mod extract;
pub mod handler;
pub mod router;
