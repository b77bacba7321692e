//! Artist CRUD and the artist index.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};
use serde::Serialize;

use super::shows::{self, Partitioned, ShowListing};
use super::{genres, ArtistSubmission};
use crate::entities::artist;
use crate::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sea_orm::FromQueryResult)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ArtistProfile {
    pub artist: artist::Model,
    pub genres: Vec<String>,
    pub shows: Partitioned<ShowListing>,
}

pub async fn create<C: TransactionTrait>(
    db: &C,
    submission: ArtistSubmission,
) -> Result<artist::Model, RepoError> {
    let input = submission.normalize()?;
    let artist = db
        .transaction::<_, _, RepoError>(move |txn| Box::pin(async move { insert(txn, input).await }))
        .await?;
    tracing::info!(artist_id = artist.id, name = %artist.name, "artist listed");
    Ok(artist)
}

/// Inserts an already-normalized artist and its genre links.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    input: ArtistSubmission,
) -> Result<artist::Model, RepoError> {
    let genres = genres::resolve(db, &input.genres).await?;

    let artist = artist::ActiveModel {
        name: Set(input.name),
        city: Set(input.city),
        state: Set(input.state),
        phone: Set(input.phone),
        image_link: Set(input.image_link),
        facebook_link: Set(input.facebook_link),
        website: Set(input.website),
        seeking_venue: Set(input.seeking_venue),
        seeking_description: Set(input.seeking_description),
        ..Default::default()
    }
    .insert(db)
    .await?;

    genres::attach_to_artist(db, artist.id, &genres).await?;
    Ok(artist)
}

pub async fn update<C: TransactionTrait>(
    db: &C,
    id: i32,
    submission: ArtistSubmission,
) -> Result<artist::Model, RepoError> {
    let input = submission.normalize()?;
    let artist = db
        .transaction::<_, _, RepoError>(move |txn| {
            Box::pin(async move {
                let existing = artist::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| RepoError::not_found("artist", id))?;
                let genres = genres::resolve(txn, &input.genres).await?;

                let mut active: artist::ActiveModel = existing.into();
                active.name = Set(input.name);
                active.city = Set(input.city);
                active.state = Set(input.state);
                active.phone = Set(input.phone);
                active.image_link = Set(input.image_link);
                active.facebook_link = Set(input.facebook_link);
                active.website = Set(input.website);
                active.seeking_venue = Set(input.seeking_venue);
                active.seeking_description = Set(input.seeking_description);
                let updated = active.update(txn).await?;

                genres::detach_from_artist(txn, id).await?;
                genres::attach_to_artist(txn, id, &genres).await?;
                Ok(updated)
            })
        })
        .await?;
    tracing::info!(artist_id = artist.id, "artist updated");
    Ok(artist)
}

pub async fn delete<C: TransactionTrait>(db: &C, id: i32) -> Result<bool, RepoError> {
    let deleted = db
        .transaction::<_, _, RepoError>(move |txn| {
            Box::pin(async move {
                genres::detach_from_artist(txn, id).await?;
                let res = artist::Entity::delete_by_id(id).exec(txn).await?;
                Ok(res.rows_affected > 0)
            })
        })
        .await?;
    if deleted {
        tracing::info!(artist_id = id, "artist deleted");
    }
    Ok(deleted)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistSummary>, DbErr> {
    artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_model::<ArtistSummary>()
        .all(db)
        .await
}

pub async fn find_with_genres<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(artist::Model, Vec<String>)>, DbErr> {
    let Some(artist) = artist::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = genres::names_for_artist(db, id).await?;
    Ok(Some((artist, genres)))
}

pub async fn profile<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<ArtistProfile>, DbErr> {
    let Some((artist, genres)) = find_with_genres(db, id).await? else {
        return Ok(None);
    };
    let listings = shows::for_artist(db, id).await?;
    Ok(Some(ArtistProfile {
        artist,
        genres,
        shows: Partitioned::split(listings, now, |s| s.start_time),
    }))
}
