//! Registration domain types.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → RawSubmission (serde, all fields optional)
//!     → Submission::sanitize (trim, lower-case email)
//!     → validate.rs (field rule set)
//!     → WebhookPayload (accepted submissions only)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

pub mod validate;

pub use validate::{validate, ValidationError};

/// A submission exactly as the client sent it. Missing fields are treated
/// as empty after sanitation, matching the form's behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// A sanitized submission: fields trimmed, email lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub platform: String,
}

impl Submission {
    /// Normalize a raw submission into the form the validator expects.
    pub fn sanitize(raw: RawSubmission) -> Self {
        Self {
            name: raw.name.as_deref().unwrap_or("").trim().to_string(),
            email: raw
                .email
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_lowercase(),
            platform: raw.platform.as_deref().unwrap_or("").trim().to_string(),
        }
    }
}

/// The record forwarded to the automation webhook for an accepted
/// submission. Serialized form-encoded on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub name: String,
    pub email: String,
    pub platform: String,
    pub timestamp: String,
    pub ip: String,
    pub user_agent: String,
}

impl WebhookPayload {
    /// Assemble the outbound record for an accepted submission.
    ///
    /// `ip` and `user_agent` fall back to "unknown" when the request did
    /// not carry them.
    pub fn new(submission: Submission, ip: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            platform: submission.platform,
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ip: ip.unwrap_or_else(|| "unknown".to_string()),
            user_agent: user_agent.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
