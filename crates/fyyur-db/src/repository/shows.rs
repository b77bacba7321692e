//! The show ledger.
//!
//! Shows are never updated in place: they are appended here and disappear
//! only when their venue or artist is deleted. Whether a show is past or
//! upcoming is decided at read time against the caller's `now`.

use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, RelationDef, RelationTrait, Select, TransactionTrait,
};
use sea_orm::JoinType;
use serde::Serialize;

use crate::entities::{artist, show, venue};
use crate::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    Past,
    Upcoming,
}

impl Timing {
    /// Strictly earlier than `now` is past; a show starting exactly at `now`
    /// is still upcoming.
    pub fn of(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        if start_time < now {
            Timing::Past
        } else {
            Timing::Upcoming
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

impl<T> Partitioned<T> {
    pub fn split<I, F>(items: I, now: NaiveDateTime, start_time: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> NaiveDateTime,
    {
        let mut out = Self::default();
        for item in items {
            match Timing::of(start_time(&item), now) {
                Timing::Past => out.past.push(item),
                Timing::Upcoming => out.upcoming.push(item),
            }
        }
        out
    }
}

/// A show joined with the display fields of both parents.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: NaiveDateTime,
}

fn listing_query() -> Select<show::Entity> {
    show::Entity::find()
        .select_only()
        .column_as(show::Column::VenueId, "venue_id")
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column_as(show::Column::ArtistId, "artist_id")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column_as(show::Column::StartTime, "start_time")
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .order_by_asc(show::Column::StartTime)
}

/// Every show with venue name, artist name and artist image.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, DbErr> {
    listing_query().into_model::<ShowListing>().all(db).await
}

pub async fn for_venue<C: ConnectionTrait>(db: &C, venue_id: i32) -> Result<Vec<ShowListing>, DbErr> {
    listing_query()
        .filter(show::Column::VenueId.eq(venue_id))
        .into_model::<ShowListing>()
        .all(db)
        .await
}

pub async fn for_artist<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<Vec<ShowListing>, DbErr> {
    listing_query()
        .filter(show::Column::ArtistId.eq(artist_id))
        .into_model::<ShowListing>()
        .all(db)
        .await
}

/// Books a show in its own transaction.
pub async fn create<C: TransactionTrait>(db: &C, new: NewShow) -> Result<show::Model, RepoError> {
    let show = db
        .transaction::<_, _, RepoError>(move |txn| Box::pin(async move { insert(txn, new).await }))
        .await?;
    tracing::info!(
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        start_time = %show.start_time,
        "show listed"
    );
    Ok(show)
}

/// Inserts a show after checking that both parents exist.
pub async fn insert<C: ConnectionTrait>(db: &C, new: NewShow) -> Result<show::Model, RepoError> {
    venue::Entity::find_by_id(new.venue_id)
        .one(db)
        .await?
        .ok_or_else(|| RepoError::not_found("venue", new.venue_id))?;
    artist::Entity::find_by_id(new.artist_id)
        .one(db)
        .await?
        .ok_or_else(|| RepoError::not_found("artist", new.artist_id))?;

    show::Entity::insert(show::ActiveModel {
        venue_id: Set(new.venue_id),
        artist_id: Set(new.artist_id),
        start_time: Set(new.start_time),
    })
    .exec_without_returning(db)
    .await?;

    Ok(show::Model {
        venue_id: new.venue_id,
        artist_id: new.artist_id,
        start_time: new.start_time,
    })
}

/// Left-joins `select` to the shows of each owner row that start strictly
/// after `now` and adds their count as the last selected column. The caller
/// groups by every other selected column.
pub fn with_upcoming_count<E: EntityTrait>(
    select: Select<E>,
    to_shows: RelationDef,
    now: NaiveDateTime,
) -> Select<E> {
    select
        .join(
            JoinType::LeftJoin,
            to_shows.on_condition(move |_owner, shows| {
                Expr::col((shows, show::Column::StartTime))
                    .gt(now)
                    .into_condition()
            }),
        )
        .column_as(
            Expr::col((show::Entity, show::Column::StartTime)).count(),
            "num_upcoming_shows",
        )
}

/// `COUNT(..)` comes back as a signed integer on every backend.
pub(crate) fn count_to_u64(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn listing(start_time: NaiveDateTime) -> ShowListing {
        ShowListing {
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_show_at_now_is_upcoming() {
        let now = at(20, 0);
        assert_eq!(Timing::of(now, now), Timing::Upcoming);
    }

    #[test]
    fn test_show_before_now_is_past() {
        let now = at(20, 0);
        assert_eq!(Timing::of(now - Duration::seconds(1), now), Timing::Past);
        assert_eq!(Timing::of(now + Duration::seconds(1), now), Timing::Upcoming);
    }

    #[test]
    fn test_split_keeps_order_within_each_side() {
        let now = at(12, 0);
        let shows = vec![
            listing(at(9, 0)),
            listing(at(13, 0)),
            listing(at(11, 0)),
            listing(now),
        ];
        let split = Partitioned::split(shows, now, |s| s.start_time);
        assert_eq!(
            split.past.iter().map(|s| s.start_time).collect::<Vec<_>>(),
            vec![at(9, 0), at(11, 0)]
        );
        assert_eq!(
            split.upcoming.iter().map(|s| s.start_time).collect::<Vec<_>>(),
            vec![at(13, 0), now]
        );
    }

    #[test]
    fn test_split_empty() {
        let split: Partitioned<ShowListing> = Partitioned::split(Vec::new(), at(0, 0), |s: &ShowListing| s.start_time);
        assert!(split.past.is_empty());
        assert!(split.upcoming.is_empty());
    }

    #[test]
    fn test_count_to_u64() {
        assert_eq!(count_to_u64(3), 3);
        assert_eq!(count_to_u64(-1), 0);
    }

    #[test]
    fn test_timing_serialization() {
        assert_eq!(serde_json::to_value(Timing::Past).unwrap(), "past");
        assert_eq!(serde_json::to_value(Timing::Upcoming).unwrap(), "upcoming");
    }
}
