#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod session;
pub mod status;
pub mod ui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
