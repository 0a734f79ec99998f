#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod frame;
#[cfg(feature = "futures")]
mod futures;
mod responder;
mod rotator;
mod section;
mod segment;

pub use crate::frame::*;
#[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::responder::*;
pub use crate::rotator::*;
pub use crate::section::*;
pub use crate::segment::*;
