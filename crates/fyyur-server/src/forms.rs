//! Form bodies as browsers submit them.
//!
//! Bodies are `application/x-www-form-urlencoded` and decoded with
//! `axum_extra::extract::Form`, which understands repeated keys, so a
//! multi-select `genres` field arrives as a `Vec`. Checkboxes are only sent
//! when ticked, so their presence is the value.

use chrono::{DateTime, NaiveDateTime, Utc};
use fyyur_db::entities::{artist, venue};
use fyyur_db::repository::shows::NewShow;
use fyyur_db::repository::{ArtistSubmission, VenueSubmission};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

impl From<VenueForm> for VenueSubmission {
    fn from(f: VenueForm) -> Self {
        Self {
            name: f.name,
            city: f.city,
            state: f.state,
            address: f.address,
            phone: Some(f.phone),
            image_link: Some(f.image_link),
            facebook_link: Some(f.facebook_link),
            website: Some(f.website_link),
            seeking_talent: f.seeking_talent.is_some(),
            seeking_description: Some(f.seeking_description),
            genres: f.genres,
        }
    }
}

impl VenueForm {
    /// Pre-populates the edit form from a stored venue.
    pub fn from_record(v: venue::Model, genres: Vec<String>) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone.unwrap_or_default(),
            image_link: v.image_link.unwrap_or_default(),
            facebook_link: v.facebook_link.unwrap_or_default(),
            website_link: v.website.unwrap_or_default(),
            genres,
            seeking_talent: v.seeking_talent.then(|| "y".to_string()),
            seeking_description: v.seeking_description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

impl From<ArtistForm> for ArtistSubmission {
    fn from(f: ArtistForm) -> Self {
        Self {
            name: f.name,
            city: f.city,
            state: f.state,
            phone: Some(f.phone),
            image_link: Some(f.image_link),
            facebook_link: Some(f.facebook_link),
            website: Some(f.website_link),
            seeking_venue: f.seeking_venue.is_some(),
            seeking_description: Some(f.seeking_description),
            genres: f.genres,
        }
    }
}

impl ArtistForm {
    pub fn from_record(a: artist::Model, genres: Vec<String>) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone.unwrap_or_default(),
            image_link: a.image_link.unwrap_or_default(),
            facebook_link: a.facebook_link.unwrap_or_default(),
            website_link: a.website.unwrap_or_default(),
            genres,
            seeking_venue: a.seeking_venue.then(|| "y".to_string()),
            seeking_description: a.seeking_description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Parses the three fields; `None` if any of them is malformed.
    pub fn parse(&self) -> Option<NewShow> {
        Some(NewShow {
            artist_id: self.artist_id.trim().parse().ok()?,
            venue_id: self.venue_id.trim().parse().ok()?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Accepts RFC 3339 (converted to UTC) or a zone-less
/// `YYYY-MM-DD HH:MM[:SS]`, which is taken as UTC already.
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
