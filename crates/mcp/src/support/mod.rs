#![forbid(unsafe_code)]

mod ai;
mod args;
mod config;
mod jsonrpc;
mod seed;
mod session_log;
mod time;

pub(crate) use ai::*;
pub(crate) use args::*;
pub(crate) use config::*;
pub(crate) use jsonrpc::*;
pub(crate) use seed::*;
pub(crate) use session_log::*;
pub(crate) use time::*;
