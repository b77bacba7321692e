//! Case-insensitive substring search over venue and artist names.

use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use super::shows;
use crate::entities::{artist, venue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl From<Vec<SearchHit>> for SearchResults {
    fn from(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Lower-cased `%term%` with LIKE metacharacters escaped by `\`.
///
/// Only ASCII letters are folded, matching SQL `lower()` under SQLite and
/// the Postgres C collation, so both sides of the `LIKE` agree.
pub fn name_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn name_matches<T: IntoColumnRef>(column: T, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(name_pattern(term)).escape('\\'))
}

pub async fn venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults, DbErr> {
    let select = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .filter(name_matches((venue::Entity, venue::Column::Name), term));
    let rows: Vec<(i32, String, i64)> =
        shows::with_upcoming_count(select, venue::Relation::Show.def(), now)
            .group_by(venue::Column::Id)
            .group_by(venue::Column::Name)
            .order_by_asc(venue::Column::Id)
            .into_tuple()
            .all(db)
            .await?;
    Ok(hits(rows))
}

pub async fn artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults, DbErr> {
    let select = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .filter(name_matches((artist::Entity, artist::Column::Name), term));
    let rows: Vec<(i32, String, i64)> =
        shows::with_upcoming_count(select, artist::Relation::Show.def(), now)
            .group_by(artist::Column::Id)
            .group_by(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .into_tuple()
            .all(db)
            .await?;
    Ok(hits(rows))
}

fn hits(rows: Vec<(i32, String, i64)>) -> SearchResults {
    rows.into_iter()
        .map(|(id, name, n)| SearchHit {
            id,
            name,
            num_upcoming_shows: shows::count_to_u64(n),
        })
        .collect::<Vec<_>>()
        .into()
}
