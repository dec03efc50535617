use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, uri::Scheme, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Config;

/// HTTPS redirect and host allow-list. Disabled in development mode.
#[derive(Clone, Debug)]
pub struct SecureOptions {
    inner: Arc<Options>,
}

#[derive(Debug)]
struct Options {
    enabled: bool,
    allowed_hosts: Vec<String>,
}

impl SecureOptions {
    pub fn new(dev_mode: bool, allowed_hosts: Vec<String>) -> Self {
        Self {
            inner: Arc::new(Options {
                enabled: !dev_mode,
                allowed_hosts,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dev_mode, config.allowed_hosts.clone())
    }

    /// True when enforcement is on but no allow-list is set, so redirects are
    /// built from whatever `Host` the client sent.
    pub fn trusts_any_host(&self) -> bool {
        self.inner.enabled && self.inner.allowed_hosts.is_empty()
    }
}

pub async fn secure_middleware(
    State(options): State<SecureOptions>,
    req: Request,
    next: Next,
) -> Response {
    if !options.inner.enabled {
        return next.run(req).await;
    }

    let host = request_host(req.headers(), req.uri());

    let allowed = &options.inner.allowed_hosts;
    if !allowed.is_empty() {
        let bare = host.as_deref().map(strip_port).map(str::to_ascii_lowercase);
        if !bare.is_some_and(|h| allowed.contains(&h)) {
            tracing::warn!(host = ?host, "rejected request for unknown host");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Bad Host").into_response();
        }
    }

    if is_secure(&req) {
        return next.run(req).await;
    }

    let Some(host) = host else {
        return (StatusCode::BAD_REQUEST, "Missing Host").into_response();
    };
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("https://{}{}", host, path);
    tracing::debug!(location = %target, "redirecting to https");
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response()
}

fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
}

fn is_secure(req: &Request) -> bool {
    if req.uri().scheme() == Some(&Scheme::HTTPS) {
        return true;
    }
    req.headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}
