use crate::config::{DatabaseConfig, DatabaseLocation};
use crate::domain::*;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

/// Storage trait for persisting venues, artists and the shows that join them.
///
/// Every mutating call is atomic: it either applies completely or not at all.
#[async_trait]
pub trait Storage: Send + Sync {
    // Venue operations
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue>;
    async fn get_venue_by_id(&self, venue_id: i64) -> Result<Option<Venue>>;
    async fn update_venue(&self, venue_id: i64, profile: &VenueProfile) -> Result<Venue>;
    /// Deletes the venue and every show booked at it.
    async fn delete_venue(&self, venue_id: i64) -> Result<()>;
    async fn get_all_venues(&self) -> Result<Vec<Venue>>;
    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>>;
    /// Number of shows starting after `now`, keyed by venue id. Venues without any are absent.
    async fn upcoming_show_counts(&self, now: NaiveDateTime) -> Result<HashMap<i64, usize>>;

    // Artist operations
    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist>;
    async fn get_artist_by_id(&self, artist_id: i64) -> Result<Option<Artist>>;
    async fn update_artist(&self, artist_id: i64, profile: &ArtistProfile) -> Result<Artist>;
    /// Deletes the artist and every show they are booked for.
    async fn delete_artist(&self, artist_id: i64) -> Result<()>;
    async fn get_all_artists(&self) -> Result<Vec<Artist>>;
    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>>;
    /// Number of shows starting after `now`, keyed by artist id.
    async fn upcoming_artist_show_counts(
        &self,
        now: NaiveDateTime,
    ) -> Result<HashMap<i64, usize>>;

    // Show operations
    async fn create_show(&self, show: &Show) -> Result<()>;
    async fn get_all_shows(&self) -> Result<Vec<ShowListing>>;
    async fn get_shows_by_venue_id(&self, venue_id: i64) -> Result<Vec<ShowListing>>;
    async fn get_shows_by_artist_id(&self, artist_id: i64) -> Result<Vec<ShowListing>>;

    /// Remove every row (useful for development)
    async fn clear_all_data(&self) -> Result<()>;
}

/// Case-insensitive substring match shared by the storage implementations.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

pub(crate) fn venues_by_name(mut venues: Vec<Venue>) -> Vec<Venue> {
    venues.sort_by_key(|v| (v.name.to_lowercase(), v.id));
    venues
}

pub(crate) fn artists_by_name(mut artists: Vec<Artist>) -> Vec<Artist> {
    artists.sort_by_key(|a| (a.name.to_lowercase(), a.id));
    artists
}

/// Open the SQLite store named by the configuration, running migrations.
pub fn connect(config: &DatabaseConfig) -> Result<SqliteStorage> {
    match config.location()? {
        DatabaseLocation::Memory => SqliteStorage::open_in_memory(),
        DatabaseLocation::File(path) => SqliteStorage::open(path),
    }
}
