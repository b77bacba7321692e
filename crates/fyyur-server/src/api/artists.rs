use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use axum_extra::extract::Form;
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::venues::SearchResponse;
use super::{DeleteResponse, FlashResponse};
use crate::forms::{ArtistForm, SearchForm};
use fyyur_db::entities::artist;
use fyyur_db::repository::artists::{self, ArtistProfile, ArtistSummary};
use fyyur_db::repository::search;
use fyyur_db::repository::{ArtistSubmission, ShowListing};
use fyyur_db::AppState;

#[derive(Debug, Serialize)]
pub struct ArtistResponse {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<artist::Model> for ArtistResponse {
    fn from(a: artist::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
            website: a.website,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
        }
    }
}

/// A show as seen from the artist page: where and when.
#[derive(Debug, Serialize)]
pub struct ArtistShowResponse {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl From<ShowListing> for ArtistShowResponse {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start_time: s.start_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistDetailResponse {
    #[serde(flatten)]
    pub artist: ArtistResponse,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistShowResponse>,
    pub upcoming_shows: Vec<ArtistShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<ArtistProfile> for ArtistDetailResponse {
    fn from(p: ArtistProfile) -> Self {
        let past: Vec<ArtistShowResponse> = p.shows.past.into_iter().map(Into::into).collect();
        let upcoming: Vec<ArtistShowResponse> =
            p.shows.upcoming.into_iter().map(Into::into).collect();
        Self {
            artist: p.artist.into(),
            genres: p.genres,
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past,
            upcoming_shows: upcoming,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistListResponse {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize)]
pub struct EditArtistResponse {
    pub id: i32,
    pub form: ArtistForm,
}

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArtistListResponse>, (StatusCode, String)> {
    let artists = artists::list(&state.db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?;
    Ok(Json(ArtistListResponse { artists }))
}

async fn run_search(
    state: &AppState,
    search_term: String,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let results = search::artists(&state.db, &search_term, Utc::now().naive_utc())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?;
    Ok(Json(SearchResponse {
        search_term,
        results,
    }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    run_search(&state, form.search_term).await
}

/// GET /artists/search?search_term=
pub async fn search_artists_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchForm>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    run_search(&state, params.search_term).await
}

/// GET /artists/{id}
pub async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetailResponse>, (StatusCode, String)> {
    let profile = artists::profile(&state.db, id, Utc::now().naive_utc())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?
        .ok_or((StatusCode::NOT_FOUND, "Artist not found".to_string()))?;
    Ok(Json(profile.into()))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> (StatusCode, Json<FlashResponse>) {
    let name = form.name.trim().to_string();
    match artists::create(&state.db, ArtistSubmission::from(form)).await {
        Ok(a) => (
            StatusCode::CREATED,
            Json(FlashResponse::ok(format!("Artist {} was successfully listed!", a.name))),
        ),
        Err(e) => {
            tracing::warn!(name = %name, error = %e, "artist submission rejected");
            (
                StatusCode::OK,
                Json(FlashResponse::failed(format!(
                    "An error occurred. Artist {name} could not be listed."
                ))),
            )
        }
    }
}

/// DELETE /artists/{id}
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Json<DeleteResponse> {
    let success = match artists::delete(&state.db, id).await {
        Ok(deleted) => deleted,
        Err(e) => {
            tracing::error!(artist_id = id, error = %e, "artist delete failed");
            false
        }
    };
    Json(DeleteResponse { success })
}

/// GET /artists/{id}/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditArtistResponse>, (StatusCode, String)> {
    let (record, genres) = artists::find_with_genres(&state.db, id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?
        .ok_or((StatusCode::NOT_FOUND, "Artist not found".to_string()))?;
    Ok(Json(EditArtistResponse {
        id,
        form: ArtistForm::from_record(record, genres),
    }))
}

/// POST /artists/{id}/edit
pub async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<ArtistForm>,
) -> Redirect {
    if let Err(e) = artists::update(&state.db, id, ArtistSubmission::from(form)).await {
        tracing::warn!(artist_id = id, error = %e, "artist update rejected");
    }
    Redirect::to(&format!("/artists/{id}"))
}
