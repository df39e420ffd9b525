use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage format for show start times.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY",
];

/// Everything a venue carries except its id. Create and update both take one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VenueProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    pub fn from_profile(id: i64, profile: VenueProfile) -> Self {
        Self {
            id,
            name: profile.name,
            city: profile.city,
            state: profile.state,
            address: profile.address,
            phone: profile.phone,
            website: profile.website,
            facebook_link: profile.facebook_link,
            image_link: profile.image_link,
            genres: profile.genres,
            seeking_talent: profile.seeking_talent,
            seeking_description: profile.seeking_description,
        }
    }

    pub fn profile(&self) -> VenueProfile {
        VenueProfile {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            image_link: self.image_link.clone(),
            genres: self.genres.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn from_profile(id: i64, profile: ArtistProfile) -> Self {
        Self {
            id,
            name: profile.name,
            city: profile.city,
            state: profile.state,
            phone: profile.phone,
            website: profile.website,
            facebook_link: profile.facebook_link,
            image_link: profile.image_link,
            genres: profile.genres,
            seeking_venue: profile.seeking_venue,
            seeking_description: profile.seeking_description,
        }
    }

    pub fn profile(&self) -> ArtistProfile {
        ArtistProfile {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            image_link: self.image_link.clone(),
            genres: self.genres.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

/// A booking of one artist at one venue. The three fields together are its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

/// A show joined with the venue and artist it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl ShowListing {
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.start_time > now
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowPartition {
    pub past: Vec<ShowListing>,
    pub upcoming: Vec<ShowListing>,
}

/// Split shows into past and upcoming relative to `now`.
///
/// A show starting exactly at `now` counts as past. Both halves come back
/// ordered by start time.
pub fn partition_shows(listings: Vec<ShowListing>, now: NaiveDateTime) -> ShowPartition {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) =
        listings.into_iter().partition(|s| s.is_upcoming(now));
    past.sort_by_key(|s| s.start_time);
    upcoming.sort_by_key(|s| s.start_time);
    ShowPartition { past, upcoming }
}

/// Wall-clock time used for past/upcoming decisions.
pub fn current_time() -> NaiveDateTime {
    Utc::now().naive_utc()
}
