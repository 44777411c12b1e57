//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → http/session.rs resolves the session token
//!     → rate_limit.rs (fixed-window admission per session)
//!     → Pass to parsing and validation
//! ```
//!
//! # Design Decisions
//! - Fail closed: a rejected admission terminates the request with 429
//! - No trust in client input; the token is only a counter key

pub mod rate_limit;

pub use rate_limit::{Admission, Clock, SessionRateLimiter, SystemClock};
