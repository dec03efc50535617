use axum::{
    extract::rejection::RawFormRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Form parse error: {0}")]
    FormParse(#[from] RawFormRejection),

    #[error("Form decode error: {0}")]
    FormDecode(#[from] serde_urlencoded::de::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Timestamp error: {0}")]
    Time(#[from] chrono::ParseError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::FormParse(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.body_text()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
