use thiserror::Error;

mod database;
mod http;
mod logging;
mod server;

pub use database::{Database, DbPoolConfig};
pub use http::Http;
pub use logging::{Logging, LoggingStyle};
pub use server::{Server, Stats};

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
