// Shared test utilities for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fyyur_db::repository::{ArtistSubmission, VenueSubmission};
use fyyur_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// A migrated in-memory SQLite database. One pooled connection, so every
/// query sees the same database.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Fixed reference time for past/upcoming assertions.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 6, 15)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

pub fn venue_form(name: &str, address: &str) -> VenueSubmission {
    VenueSubmission {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: address.into(),
        seeking_talent: true,
        ..Default::default()
    }
}

pub fn artist_form(name: &str) -> ArtistSubmission {
    ArtistSubmission {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        seeking_venue: true,
        ..Default::default()
    }
}
