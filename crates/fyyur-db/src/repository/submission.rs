//! Venue and artist submissions, normalized before they touch the database.

use crate::RepoError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueSubmission {
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
    pub genres: Vec<String>,
}

impl VenueSubmission {
    /// Trims every field, rejects missing required fields and turns empty
    /// optional fields into `None`.
    pub fn normalize(self) -> Result<Self, RepoError> {
        Ok(Self {
            name: required("name", self.name)?,
            city: required("city", self.city)?,
            state: state_code(self.state)?,
            address: required("address", self.address)?,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
            genres: genre_names(self.genres),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistSubmission {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl ArtistSubmission {
    /// Same rules as [`VenueSubmission::normalize`], minus the address.
    pub fn normalize(self) -> Result<Self, RepoError> {
        Ok(Self {
            name: required("name", self.name)?,
            city: required("city", self.city)?,
            state: state_code(self.state)?,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
            genres: genre_names(self.genres),
        })
    }
}

fn required(field: &str, value: String) -> Result<String, RepoError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn state_code(value: String) -> Result<String, RepoError> {
    let code = required("state", value)?;
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RepoError::Validation(format!(
            "state must be a two-letter code, got {code:?}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

// Blank entries are dropped; repeats are kept as submitted.
fn genre_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> VenueSubmission {
        VenueSubmission {
            name: "  The Musical Hop ".into(),
            city: "San Francisco".into(),
            state: "ca".into(),
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            image_link: Some("".into()),
            facebook_link: Some("   ".into()),
            website: None,
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".into()),
            genres: vec!["Jazz".into(), " ".into(), "Reggae ".into()],
        }
    }

    #[test]
    fn test_venue_normalize_trims_and_nulls() {
        let v = venue().normalize().unwrap();
        assert_eq!(v.name, "The Musical Hop");
        assert_eq!(v.state, "CA");
        assert_eq!(v.phone.as_deref(), Some("123-123-1234"));
        assert!(v.image_link.is_none());
        assert!(v.facebook_link.is_none());
        assert!(v.website.is_none());
        assert_eq!(v.genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
    }

    #[test]
    fn test_venue_missing_name_rejected() {
        let mut v = venue();
        v.name = "   ".into();
        let err = v.normalize().unwrap_err();
        assert!(matches!(err, RepoError::Validation(ref m) if m == "name is required"));
    }

    #[test]
    fn test_venue_missing_address_rejected() {
        let mut v = venue();
        v.address = String::new();
        assert!(v.normalize().is_err());
    }

    #[test]
    fn test_state_must_be_two_letters() {
        let mut v = venue();
        v.state = "Calif".into();
        assert!(v.normalize().is_err());

        let mut v = venue();
        v.state = "C1".into();
        assert!(v.normalize().is_err());
    }

    #[test]
    fn test_duplicate_genres_are_kept() {
        let mut v = venue();
        v.genres = vec!["Jazz".into(), "Jazz".into()];
        assert_eq!(v.normalize().unwrap().genres.len(), 2);
    }

    #[test]
    fn test_artist_normalize() {
        let a = ArtistSubmission {
            name: "Guns N Petals".into(),
            city: " San Francisco ".into(),
            state: "CA".into(),
            phone: Some("".into()),
            seeking_venue: true,
            genres: vec!["Rock n Roll".into()],
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(a.city, "San Francisco");
        assert!(a.phone.is_none());
        assert!(a.seeking_venue);
    }

    #[test]
    fn test_artist_missing_city_rejected() {
        let a = ArtistSubmission {
            name: "Matt Quevedo".into(),
            state: "NY".into(),
            ..Default::default()
        };
        assert!(a.normalize().is_err());
    }
}
