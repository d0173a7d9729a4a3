//! Dashboard HTTP layer.
//!
//! Serves the single-page dashboard at `/` and its JSON API under `/api/`.
//! Per-user state is keyed by the `X-Session-Id` header; the router is
//! composable so tests can drive it without a socket.

pub mod dashboard;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::dashboard_router;
pub use server::{start_server_on, DashboardServer, ServerError, ServerInfo};
pub use types::ApiContext;
