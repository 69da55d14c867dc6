#![forbid(unsafe_code)]

mod birthdays;
mod definitions;
mod dispatch;
mod friends;
mod people;
mod render;
mod wishlist;

pub(crate) use definitions::tool_definitions;
pub(crate) use dispatch::dispatch_tool;
