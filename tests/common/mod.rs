#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use stillalive::{build_router, config::Config, database, AppState};

pub const PASSWORD: &str = "hunter2";

/// App backed by a private in-memory database. `overrides` replace or extend
/// the development defaults.
pub async fn setup_app_with(overrides: &[(&str, &str)]) -> (Router, AppState) {
    let static_dir = format!("{}/static", env!("CARGO_MANIFEST_DIR"));
    let mut vars: HashMap<String, String> = [
        ("PORT", "0"),
        ("TWILIO_INBOUND_PASSWORD", PASSWORD),
        ("DATABASE_URL", "sqlite::memory:"),
        ("DB_MAX_CONNECTIONS", "1"),
        ("DEV_MODE", "1"),
        ("STATIC_DIR", static_dir.as_str()),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }

    let config = Config::from_lookup(|name| vars.get(name).cloned()).expect("config");
    let pool = database::connect(&config).await.expect("database");
    let state = AppState::new(pool, config).expect("state");
    (build_router(state.clone()), state)
}

pub async fn setup_app() -> (Router, AppState) {
    setup_app_with(&[]).await
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
}

pub fn sms_request(form_body: &str, authorization: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/inbound_sms")
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::from(form_body.to_string())).unwrap()
}

pub fn authorized_sms(text: &str) -> Request<Body> {
    let form = serde_urlencoded::to_string(&[("From", "+15550100"), ("Body", text)]).unwrap();
    sms_request(&form, Some(basic_auth("twilio", PASSWORD)))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The history section of a rendered home page, or "" when absent.
pub fn history_section(html: &str) -> &str {
    html.split(r#"id="history""#).nth(1).unwrap_or("")
}

/// The current-status section of a rendered home page, or "" when absent.
pub fn current_section(html: &str) -> &str {
    match html.split(r#"id="current-status""#).nth(1) {
        Some(rest) => rest.split("</section>").next().unwrap_or(""),
        None => "",
    }
}
