//! Prefetch probe server — HTTP fixture that reports prefetch and cookie counters as JSON.

pub mod config;
pub mod error;
pub mod handler;
pub mod server;

pub use config::{resolve_listen_addr, resolve_route, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{AppState, ProbeServer};
