#![doc = include_str!("../README.md")]

mod common;
pub use common::*;
// Public re-export so downstream crates can access the core streaming types
// via `reportstream_api::reportstream`
pub use reportstream;
