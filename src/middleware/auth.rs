use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use subtle::ConstantTimeEq;

pub const INBOUND_USERNAME: &str = "twilio";
const REALM_HEADER: &str = r#"Basic realm="Authorization Required""#;

/// The single account allowed to call a Basic-auth protected route.
#[derive(Clone)]
pub struct BasicCredentials {
    inner: Arc<(String, String)>,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            inner: Arc::new((username.into(), password.into())),
        }
    }

    /// Checks a raw `Authorization` header value.
    pub fn verify(&self, header_value: &str) -> bool {
        let Some(encoded) = header_value.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };
        let Some((user, pass)) = decoded.split_once(':') else {
            return false;
        };

        let (expected_user, expected_pass) = &*self.inner;
        let user_ok: bool = user.as_bytes().ct_eq(expected_user.as_bytes()).into();
        let pass_ok: bool = pass.as_bytes().ct_eq(expected_pass.as_bytes()).into();
        user_ok & pass_ok
    }
}

pub async fn require_basic_auth(
    State(credentials): State<BasicCredentials>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| credentials.verify(v));

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "rejected unauthenticated request");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, REALM_HEADER)],
            Json(json!({"error":"unauthorized"})),
        )
            .into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
    }

    #[test]
    fn accepts_matching_credentials() {
        let creds = BasicCredentials::new("twilio", "s3cret");
        assert!(creds.verify(&basic("twilio", "s3cret")));
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = BasicCredentials::new("twilio", "a:b:c");
        assert!(creds.verify(&basic("twilio", "a:b:c")));
    }

    #[test]
    fn rejects_wrong_user_or_password() {
        let creds = BasicCredentials::new("twilio", "s3cret");
        assert!(!creds.verify(&basic("twilio", "wrong")));
        assert!(!creds.verify(&basic("admin", "s3cret")));
        assert!(!creds.verify(&basic("twilio", "")));
    }

    #[test]
    fn rejects_malformed_headers() {
        let creds = BasicCredentials::new("twilio", "s3cret");
        assert!(!creds.verify("Bearer abc"));
        assert!(!creds.verify("Basic not-base64!!"));
        assert!(!creds.verify(&format!("Basic {}", STANDARD.encode("no-colon"))));
    }
}
