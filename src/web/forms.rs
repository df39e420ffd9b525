//! Form decoding and validation for the create/edit pages.
//!
//! Submissions arrive as urlencoded key/value pairs. Keys may repeat
//! (`genres=Jazz&genres=Blues`), so the raw pairs are kept in order and the
//! typed forms pick what they need.

use crate::domain::*;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9()+. \-]{7,20}$").expect("phone regex is valid"));

/// Accepted layouts for a show's start time, tried in order.
const START_TIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value under any of `keys`, trimmed. Missing keys read as empty.
    pub fn text(&self, keys: &[&str]) -> String {
        keys.iter()
            .find_map(|key| self.get(key))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Every non-blank value under any of `keys`, in submission order, without repeats.
    pub fn all(&self, keys: &[&str]) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for (k, v) in &self.pairs {
            let v = v.trim();
            if keys.contains(&k.as_str()) && !v.is_empty() && !values.iter().any(|x| x == v) {
                values.push(v.to_string());
            }
        }
        values
    }

    /// Checkbox semantics: present means checked, unless explicitly "false".
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "off" | "0"),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collects field errors while a form is checked.
#[derive(Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn required(&mut self, field: &'static str, value: &str) -> String {
        if value.is_empty() {
            self.fail(field, format!("{} is required.", label(field)));
        }
        value.to_string()
    }

    fn state(&mut self, value: &str) -> String {
        let code = value.to_ascii_uppercase();
        if value.is_empty() {
            self.fail("state", "State is required.");
        } else if !STATES.contains(&code.as_str()) {
            self.fail("state", format!("'{value}' is not a valid state."));
        }
        code
    }

    fn genres(&mut self, values: &[String]) -> Vec<String> {
        if values.is_empty() {
            self.fail("genres", "Choose at least one genre.");
        }
        for genre in values {
            if !GENRES.contains(&genre.as_str()) {
                self.fail("genres", format!("'{genre}' is not a valid genre."));
            }
        }
        values.to_vec()
    }

    fn phone(&mut self, value: &str) -> Option<String> {
        let value = optional(value)?;
        let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
        if !PHONE_RE.is_match(&value) || digits < 7 {
            self.fail("phone", format!("'{value}' is not a valid phone number."));
        }
        Some(value)
    }

    fn link(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = optional(value)?;
        let valid = (value.starts_with("http://") || value.starts_with("https://"))
            && !value.contains(char::is_whitespace);
        if !valid {
            self.fail(field, format!("{} must be an http(s) URL.", label(field)));
        }
        Some(value)
    }

    fn id(&mut self, field: &'static str, value: &str) -> i64 {
        match value.parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ if value.is_empty() => {
                self.fail(field, format!("{} is required.", label(field)));
                0
            }
            _ => {
                self.fail(field, format!("{} must be a positive number.", label(field)));
                0
            }
        }
    }

    fn start_time(&mut self, value: &str) -> NaiveDateTime {
        match parse_start_time(value) {
            Some(time) => time,
            None => {
                if value.is_empty() {
                    self.fail("start_time", "Start time is required.");
                } else {
                    self.fail(
                        "start_time",
                        format!("'{value}' is not a valid start time (YYYY-MM-DD HH:MM:SS)."),
                    );
                }
                NaiveDateTime::default()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    START_TIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_form(data: &FormData) -> Self {
        Self {
            name: data.text(&["name"]),
            city: data.text(&["city"]),
            state: data.text(&["state"]),
            address: data.text(&["address"]),
            phone: data.text(&["phone"]),
            image_link: data.text(&["image_link"]),
            genres: data.all(&["genres", "genres[]"]),
            facebook_link: data.text(&["facebook_link"]),
            website_link: data.text(&["website_link", "website"]),
            seeking_talent: data.flag("seeking_talent"),
            seeking_description: data.text(&["seeking_description"]),
        }
    }

    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueProfile, Vec<FieldError>> {
        let mut checks = Checks::default();
        let profile = VenueProfile {
            name: checks.required("name", &self.name),
            city: checks.required("city", &self.city),
            state: checks.state(&self.state),
            address: checks.required("address", &self.address),
            phone: checks.phone(&self.phone),
            website: checks.link("website_link", &self.website_link),
            facebook_link: checks.link("facebook_link", &self.facebook_link),
            image_link: checks.link("image_link", &self.image_link),
            genres: checks.genres(&self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(&self.seeking_description),
        };
        checks.finish(profile)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_form(data: &FormData) -> Self {
        Self {
            name: data.text(&["name"]),
            city: data.text(&["city"]),
            state: data.text(&["state"]),
            phone: data.text(&["phone"]),
            image_link: data.text(&["image_link"]),
            genres: data.all(&["genres", "genres[]"]),
            facebook_link: data.text(&["facebook_link"]),
            website_link: data.text(&["website_link", "website"]),
            seeking_venue: data.flag("seeking_venue"),
            seeking_description: data.text(&["seeking_description"]),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistProfile, Vec<FieldError>> {
        let mut checks = Checks::default();
        let profile = ArtistProfile {
            name: checks.required("name", &self.name),
            city: checks.required("city", &self.city),
            state: checks.state(&self.state),
            phone: checks.phone(&self.phone),
            website: checks.link("website_link", &self.website_link),
            facebook_link: checks.link("facebook_link", &self.facebook_link),
            image_link: checks.link("image_link", &self.image_link),
            genres: checks.genres(&self.genres),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(&self.seeking_description),
        };
        checks.finish(profile)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Blank form with the start time defaulting to `now`.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn from_form(data: &FormData) -> Self {
        Self {
            artist_id: data.text(&["artist_id"]),
            venue_id: data.text(&["venue_id"]),
            start_time: data.text(&["start_time"]),
        }
    }

    pub fn validate(&self) -> Result<Show, Vec<FieldError>> {
        let mut checks = Checks::default();
        let show = Show {
            artist_id: checks.id("artist_id", &self.artist_id),
            venue_id: checks.id("venue_id", &self.venue_id),
            start_time: checks.start_time(&self.start_time),
        };
        checks.finish(show)
    }
}
