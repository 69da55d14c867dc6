#![forbid(unsafe_code)]

mod install;
mod keys;
mod rows;
mod sql;

pub(super) use install::install_schema;
pub(super) use keys::*;
pub(super) use rows::*;
pub(super) use sql::*;
