use axum::{
    extract::{rejection::RawFormRejection, RawForm, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::sms_dto::InboundSmsForm,
    error::{Error, Result},
    models::message::NewMessage,
    AppState,
};

#[axum::debug_handler]
pub async fn receive(
    State(state): State<AppState>,
    raw: std::result::Result<RawForm, RawFormRejection>,
) -> Result<StatusCode> {
    let RawForm(bytes) = raw?;
    let form = InboundSmsForm::from_urlencoded(&bytes)?;
    form.validate()?;
    let content = form
        .body
        .ok_or_else(|| Error::BadRequest("Expected a Body, didn't get one".into()))?;

    let message = state
        .message_service
        .create(NewMessage::received_now(content))
        .await?;

    info!(id = message.id, from = ?form.from, "Stored inbound SMS");
    Ok(StatusCode::OK)
}
