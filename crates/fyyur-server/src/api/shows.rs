use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Form;
use serde::Serialize;
use std::sync::Arc;

use super::FlashResponse;
use crate::forms::ShowForm;
use fyyur_db::repository::shows;
use fyyur_db::repository::ShowListing;
use fyyur_db::AppState;

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowListing>,
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShowsResponse>, (StatusCode, String)> {
    let shows = shows::list(&state.db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?;
    Ok(Json(ShowsResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> (StatusCode, Json<FlashResponse>) {
    let failed = || {
        (
            StatusCode::OK,
            Json(FlashResponse::failed("An error occurred. Show could not be listed.")),
        )
    };

    let Some(new) = form.parse() else {
        tracing::warn!(?form, "malformed show submission");
        return failed();
    };

    match shows::create(&state.db, new).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(FlashResponse::ok("Show was successfully listed!")),
        ),
        Err(e) => {
            tracing::warn!(
                venue_id = new.venue_id,
                artist_id = new.artist_id,
                error = %e,
                "show submission rejected"
            );
            failed()
        }
    }
}
