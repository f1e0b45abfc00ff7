//! HTTP server module.
//!
//! Serves plain HTTP; TLS is expected to terminate at the ingress in front of
//! the container. The server drains connections gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;
pub mod static_files;

pub use server::{start_server, ServerError};
