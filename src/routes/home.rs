use axum::{extract::State, response::Html};

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let page = state.status_service.home_page().await?;
    let html = state.views.render_home(&page)?;
    Ok(Html(html))
}
