//! Sample container: a demo web page showing the container's hostname and the
//! status of an external SQL API.
//!
//! The library exposes the router and its building blocks so the binary and
//! integration tests assemble the same application.

pub mod api;
pub mod config;
pub mod error;
pub mod hostname;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod status;
pub mod templates;

pub use error::{AppError, AppErrorResponse};
pub use routes::create_router;
pub use state::AppState;
