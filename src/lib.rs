#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod app;
pub mod config;
pub mod database;
pub mod http;
pub mod schema;
pub mod stats;
pub mod telemetry;
pub mod types;
pub mod util;

pub use app::App;

pub(crate) mod internal;
