//! Cookie-based session tokens.
//!
//! The token is an opaque UUID used only as the rate-limit key; it is not
//! signed and carries no identity.

use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "rg_session";

/// A session token resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub value: String,
    /// True when this request minted the token, meaning the response must
    /// carry a Set-Cookie header.
    pub is_new: bool,
}

/// Resolve the session token from the request's Cookie header, minting a
/// fresh one when absent.
pub fn resolve_session(headers: &HeaderMap) -> SessionToken {
    match cookie_value(headers, SESSION_COOKIE_NAME) {
        Some(value) => SessionToken { value, is_new: false },
        None => SessionToken {
            value: Uuid::new_v4().to_string(),
            is_new: true,
        },
    }
}

/// Build the Set-Cookie value for a freshly minted token.
pub fn format_set_cookie(token: &SessionToken) -> HeaderValue {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE_NAME, token.value
    );
    // UUIDs and the fixed attributes are always valid header characters.
    HeaderValue::from_str(&cookie).expect("session cookie is valid header value")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn reuses_existing_token() {
        let headers = headers_with_cookie("rg_session=abc-123");
        let token = resolve_session(&headers);
        assert_eq!(token.value, "abc-123");
        assert!(!token.is_new);
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; rg_session=abc-123; lang=en");
        assert_eq!(resolve_session(&headers).value, "abc-123");
    }

    #[test]
    fn mints_token_when_absent() {
        let token = resolve_session(&HeaderMap::new());
        assert!(token.is_new);
        assert!(Uuid::parse_str(&token.value).is_ok());
    }

    #[test]
    fn mints_token_when_cookie_empty() {
        let headers = headers_with_cookie("rg_session=");
        assert!(resolve_session(&headers).is_new);
    }

    #[test]
    fn set_cookie_carries_attributes() {
        let token = SessionToken {
            value: "abc-123".to_string(),
            is_new: true,
        };
        let value = format_set_cookie(&token);
        assert_eq!(
            value.to_str().unwrap(),
            "rg_session=abc-123; Path=/; HttpOnly; SameSite=Lax"
        );
    }
}
