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

use super::{DeleteResponse, FlashResponse};
use crate::forms::{SearchForm, VenueForm};
use fyyur_db::entities::venue;
use fyyur_db::repository::search::{self, SearchResults};
use fyyur_db::repository::venues::{self, Area, VenueProfile};
use fyyur_db::repository::{ShowListing, VenueSubmission};
use fyyur_db::AppState;

#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<venue::Model> for VenueResponse {
    fn from(v: venue::Model) -> Self {
        Self {
            id: v.id,
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            image_link: v.image_link,
            facebook_link: v.facebook_link,
            website: v.website,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

/// A show as seen from the venue page: who plays and when.
#[derive(Debug, Serialize)]
pub struct VenueShowResponse {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl From<ShowListing> for VenueShowResponse {
    fn from(s: ShowListing) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: s.start_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: VenueResponse,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShowResponse>,
    pub upcoming_shows: Vec<VenueShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<VenueProfile> for VenueDetailResponse {
    fn from(p: VenueProfile) -> Self {
        let past: Vec<VenueShowResponse> = p.shows.past.into_iter().map(Into::into).collect();
        let upcoming: Vec<VenueShowResponse> =
            p.shows.upcoming.into_iter().map(Into::into).collect();
        Self {
            venue: p.venue.into(),
            genres: p.genres,
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past,
            upcoming_shows: upcoming,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Debug, Serialize)]
pub struct EditVenueResponse {
    pub id: i32,
    pub form: VenueForm,
}

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AreasResponse>, (StatusCode, String)> {
    let areas = venues::list_by_area(&state.db, Utc::now().naive_utc())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?;
    Ok(Json(AreasResponse { areas }))
}

async fn run_search(
    state: &AppState,
    search_term: String,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let results = search::venues(&state.db, &search_term, Utc::now().naive_utc())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?;
    Ok(Json(SearchResponse {
        search_term,
        results,
    }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    run_search(&state, form.search_term).await
}

/// GET /venues/search?search_term=
pub async fn search_venues_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchForm>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    run_search(&state, params.search_term).await
}

/// GET /venues/{id}
pub async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetailResponse>, (StatusCode, String)> {
    let profile = venues::profile(&state.db, id, Utc::now().naive_utc())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?
        .ok_or((StatusCode::NOT_FOUND, "Venue not found".to_string()))?;
    Ok(Json(profile.into()))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> (StatusCode, Json<FlashResponse>) {
    let name = form.name.trim().to_string();
    match venues::create(&state.db, VenueSubmission::from(form)).await {
        Ok(v) => (
            StatusCode::CREATED,
            Json(FlashResponse::ok(format!("Venue {} was successfully listed!", v.name))),
        ),
        Err(e) => {
            tracing::warn!(name = %name, error = %e, "venue submission rejected");
            (
                StatusCode::OK,
                Json(FlashResponse::failed(format!(
                    "An error occurred. Venue {name} could not be listed."
                ))),
            )
        }
    }
}

/// DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Json<DeleteResponse> {
    let success = match venues::delete(&state.db, id).await {
        Ok(deleted) => deleted,
        Err(e) => {
            tracing::error!(venue_id = id, error = %e, "venue delete failed");
            false
        }
    };
    Json(DeleteResponse { success })
}

/// GET /venues/{id}/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditVenueResponse>, (StatusCode, String)> {
    let (record, genres) = venues::find_with_genres(&state.db, id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB error: {e}")))?
        .ok_or((StatusCode::NOT_FOUND, "Venue not found".to_string()))?;
    Ok(Json(EditVenueResponse {
        id,
        form: VenueForm::from_record(record, genres),
    }))
}

/// POST /venues/{id}/edit
///
/// Always lands back on the venue page; a failed update leaves the stored
/// venue untouched.
pub async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> Redirect {
    if let Err(e) = venues::update(&state.db, id, VenueSubmission::from(form)).await {
        tracing::warn!(venue_id = id, error = %e, "venue update rejected");
    }
    Redirect::to(&format!("/venues/{id}"))
}
