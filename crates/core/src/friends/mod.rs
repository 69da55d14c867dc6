#![forbid(unsafe_code)]

mod resolve;
mod types;

pub use resolve::*;
pub use types::*;

#[cfg(test)]
mod tests;
