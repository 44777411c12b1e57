//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, CORS headers)
//!     → session.rs (resolve or mint the session token)
//!     → handler.rs (method check, rate limit, validate, deliver)
//!     → JSON response to client
//! ```

pub mod handler;
pub mod server;
pub mod session;

pub use server::{build_router, AppState, GatewayServer};
pub use session::{SessionToken, SESSION_COOKIE_NAME};
