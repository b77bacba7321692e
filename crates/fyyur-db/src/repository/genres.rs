//! Genre resolution and the two genre association tables.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{artist_genre, genre, venue_genre};

/// Resolves each submitted name to a genre row, creating the ones that don't
/// exist yet. Output order follows input order; repeated names resolve to the
/// same row each time.
pub async fn resolve<C: ConnectionTrait>(db: &C, names: &[String]) -> Result<Vec<genre::Model>, DbErr> {
    let mut genres = Vec::with_capacity(names.len());
    for name in names {
        genres.push(upsert(db, name).await?);
    }
    Ok(genres)
}

/// Looks a genre up by exact name, inserting it first if needed.
///
/// The insert is `ON CONFLICT (name) DO NOTHING`, so two writers racing on
/// the same new name both end up reading the single surviving row.
pub async fn upsert<C: ConnectionTrait>(db: &C, name: &str) -> Result<genre::Model, DbErr> {
    genre::Entity::insert(genre::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(genre::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    genre::Entity::find()
        .filter(genre::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("genre {name:?}")))
}

pub async fn attach_to_venue<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    genres: &[genre::Model],
) -> Result<(), DbErr> {
    if genres.is_empty() {
        return Ok(());
    }
    venue_genre::Entity::insert_many(genres.iter().map(|g| venue_genre::ActiveModel {
        venue_id: Set(venue_id),
        genre_id: Set(g.id),
    }))
    .on_conflict(
        OnConflict::columns([venue_genre::Column::VenueId, venue_genre::Column::GenreId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(())
}

pub async fn detach_from_venue<C: ConnectionTrait>(db: &C, venue_id: i32) -> Result<u64, DbErr> {
    let res = venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(venue_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn names_for_venue<C: ConnectionTrait>(db: &C, venue_id: i32) -> Result<Vec<String>, DbErr> {
    let genres = genre::Entity::find()
        .inner_join(venue_genre::Entity)
        .filter(venue_genre::Column::VenueId.eq(venue_id))
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    Ok(genres.into_iter().map(|g| g.name).collect())
}

pub async fn attach_to_artist<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    genres: &[genre::Model],
) -> Result<(), DbErr> {
    if genres.is_empty() {
        return Ok(());
    }
    artist_genre::Entity::insert_many(genres.iter().map(|g| artist_genre::ActiveModel {
        artist_id: Set(artist_id),
        genre_id: Set(g.id),
    }))
    .on_conflict(
        OnConflict::columns([artist_genre::Column::ArtistId, artist_genre::Column::GenreId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(())
}

pub async fn detach_from_artist<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<u64, DbErr> {
    let res = artist_genre::Entity::delete_many()
        .filter(artist_genre::Column::ArtistId.eq(artist_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn names_for_artist<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<Vec<String>, DbErr> {
    let genres = genre::Entity::find()
        .inner_join(artist_genre::Entity)
        .filter(artist_genre::Column::ArtistId.eq(artist_id))
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    Ok(genres.into_iter().map(|g| g.name).collect())
}
