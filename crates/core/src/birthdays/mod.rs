#![forbid(unsafe_code)]

mod calendar;
mod engine;
mod occurrence;

pub use calendar::*;
pub use engine::*;
pub use occurrence::*;
