//! Submission field validation.
//!
//! # Responsibilities
//! - Check every field rule and collect all failures (no short-circuit
//!   across fields)
//! - Produce the exact human-readable messages the form surfaces
//!
//! # Design Decisions
//! - Validation is a pure function: (Submission, ValidationConfig) → errors
//! - Error order is fixed: name, email sub-checks in declaration order,
//!   platform

use thiserror::Error;

use crate::config::ValidationConfig;
use crate::registration::Submission;

/// A single field rule violation. Display output is the message returned
/// to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email format")]
    EmailInvalidFormat,

    #[error("Email must contain exactly one @ symbol")]
    EmailMultipleAt,

    #[error("Email cannot contain consecutive dots")]
    EmailConsecutiveDots,

    #[error("Email cannot start or end with a dot")]
    EmailDotAtEdge,

    #[error("Temporary email addresses are not allowed")]
    EmailTempDomain,

    #[error("Invalid email domain")]
    EmailInvalidTld,

    #[error("Platform must be at least {min} characters")]
    PlatformTooShort { min: usize },
}

/// Check a sanitized submission against the configured rules.
///
/// All applicable rules run; the result collects every violation in a
/// fixed order. An empty result means the submission is accepted.
pub fn validate(submission: &Submission, config: &ValidationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if submission.name.len() < config.min_name_length {
        errors.push(ValidationError::NameTooShort {
            min: config.min_name_length,
        });
    }

    let email = submission.email.as_str();
    if email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else {
        if !is_well_formed(email) {
            errors.push(ValidationError::EmailInvalidFormat);
        }

        if email.matches('@').count() != 1 {
            errors.push(ValidationError::EmailMultipleAt);
        }

        if email.contains("..") {
            errors.push(ValidationError::EmailConsecutiveDots);
        }

        if email.starts_with('.') || email.ends_with('.') {
            errors.push(ValidationError::EmailDotAtEdge);
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 {
            let domain = parts[1];
            if config.temp_email_domains.iter().any(|d| d == domain) {
                errors.push(ValidationError::EmailTempDomain);
            }

            // TLD is everything after the final dot.
            let tld = domain.rsplit('.').next().unwrap_or("");
            if tld.len() < 2 {
                errors.push(ValidationError::EmailInvalidTld);
            }
        }
    }

    if submission.platform.len() < config.min_platform_length {
        errors.push(ValidationError::PlatformTooShort {
            min: config.min_platform_length,
        });
    }

    errors
}

/// RFC 5322-lite structural check: `local@domain`, restricted character
/// sets, and a dotted domain. Quoted local parts are out of scope.
fn is_well_formed(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    local_ok && domain_ok && domain.contains('.')
}
