//! Venue CRUD and the venue index.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
    QuerySelect, RelationTrait, TransactionTrait,
};
use serde::Serialize;

use super::shows::{self, Partitioned, ShowListing};
use super::{genres, VenueSubmission};
use crate::entities::venue;
use crate::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone)]
pub struct VenueProfile {
    pub venue: venue::Model,
    pub genres: Vec<String>,
    pub shows: Partitioned<ShowListing>,
}

pub async fn create<C: TransactionTrait>(
    db: &C,
    submission: VenueSubmission,
) -> Result<venue::Model, RepoError> {
    let input = submission.normalize()?;
    let venue = db
        .transaction::<_, _, RepoError>(move |txn| Box::pin(async move { insert(txn, input).await }))
        .await?;
    tracing::info!(venue_id = venue.id, name = %venue.name, "venue listed");
    Ok(venue)
}

/// Inserts an already-normalized venue and its genre links.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    input: VenueSubmission,
) -> Result<venue::Model, RepoError> {
    let genres = genres::resolve(db, &input.genres).await?;

    let venue = venue::ActiveModel {
        name: Set(input.name),
        city: Set(input.city),
        state: Set(input.state),
        address: Set(input.address),
        phone: Set(input.phone),
        image_link: Set(input.image_link),
        facebook_link: Set(input.facebook_link),
        website: Set(input.website),
        seeking_talent: Set(input.seeking_talent),
        seeking_description: Set(input.seeking_description),
        ..Default::default()
    }
    .insert(db)
    .await?;

    genres::attach_to_venue(db, venue.id, &genres).await?;
    Ok(venue)
}

/// Overwrites every mutable field and replaces the whole genre set.
pub async fn update<C: TransactionTrait>(
    db: &C,
    id: i32,
    submission: VenueSubmission,
) -> Result<venue::Model, RepoError> {
    let input = submission.normalize()?;
    let venue = db
        .transaction::<_, _, RepoError>(move |txn| {
            Box::pin(async move {
                let existing = venue::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| RepoError::not_found("venue", id))?;
                let genres = genres::resolve(txn, &input.genres).await?;

                let mut active: venue::ActiveModel = existing.into();
                active.name = Set(input.name);
                active.city = Set(input.city);
                active.state = Set(input.state);
                active.address = Set(input.address);
                active.phone = Set(input.phone);
                active.image_link = Set(input.image_link);
                active.facebook_link = Set(input.facebook_link);
                active.website = Set(input.website);
                active.seeking_talent = Set(input.seeking_talent);
                active.seeking_description = Set(input.seeking_description);
                let updated = active.update(txn).await?;

                genres::detach_from_venue(txn, id).await?;
                genres::attach_to_venue(txn, id, &genres).await?;
                Ok(updated)
            })
        })
        .await?;
    tracing::info!(venue_id = venue.id, "venue updated");
    Ok(venue)
}

/// Deletes a venue; its shows go with it through the foreign key.
/// Returns `false` when no venue had that id.
pub async fn delete<C: TransactionTrait>(db: &C, id: i32) -> Result<bool, RepoError> {
    let deleted = db
        .transaction::<_, _, RepoError>(move |txn| {
            Box::pin(async move {
                genres::detach_from_venue(txn, id).await?;
                let res = venue::Entity::delete_by_id(id).exec(txn).await?;
                Ok(res.rows_affected > 0)
            })
        })
        .await?;
    if deleted {
        tracing::info!(venue_id = id, "venue deleted");
    }
    Ok(deleted)
}

pub async fn find_with_genres<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(venue::Model, Vec<String>)>, DbErr> {
    let Some(venue) = venue::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = genres::names_for_venue(db, id).await?;
    Ok(Some((venue, genres)))
}

/// A venue with its genres and its shows split around `now`.
pub async fn profile<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<VenueProfile>, DbErr> {
    let Some((venue, genres)) = find_with_genres(db, id).await? else {
        return Ok(None);
    };
    let listings = shows::for_venue(db, id).await?;
    Ok(Some(VenueProfile {
        venue,
        genres,
        shows: Partitioned::split(listings, now, |s| s.start_time),
    }))
}

/// All venues grouped by (city, state), each with its upcoming show count.
pub async fn list_by_area<C: ConnectionTrait>(
    db: &C,
    now: NaiveDateTime,
) -> Result<Vec<Area>, DbErr> {
    let select = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .column(venue::Column::City)
        .column(venue::Column::State);
    let rows: Vec<(i32, String, String, String, i64)> =
        shows::with_upcoming_count(select, venue::Relation::Show.def(), now)
            .group_by(venue::Column::Id)
            .group_by(venue::Column::Name)
            .group_by(venue::Column::City)
            .group_by(venue::Column::State)
            .order_by_asc(venue::Column::State)
            .order_by_asc(venue::Column::City)
            .order_by_asc(venue::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

    let mut areas: Vec<Area> = Vec::new();
    for (id, name, city, state, upcoming) in rows {
        let summary = VenueSummary {
            id,
            name,
            num_upcoming_shows: shows::count_to_u64(upcoming),
        };
        if let Some(area) = areas
            .last_mut()
            .filter(|a| a.city == city && a.state == state)
        {
            area.venues.push(summary);
        } else {
            areas.push(Area {
                city,
                state,
                venues: vec![summary],
            });
        }
    }
    Ok(areas)
}
