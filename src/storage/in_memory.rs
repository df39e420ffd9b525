use super::{artists_by_name, name_matches, venues_by_name, Storage};
use crate::domain::*;
use crate::error::{FyyurError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct Tables {
    venues: BTreeMap<i64, Venue>,
    artists: BTreeMap<i64, Artist>,
    shows: Vec<Show>,
    next_venue_id: i64,
    next_artist_id: i64,
}

impl Tables {
    fn listing(&self, show: &Show) -> Option<ShowListing> {
        let venue = self.venues.get(&show.venue_id)?;
        let artist = self.artists.get(&show.artist_id)?;
        Some(ShowListing {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: show.start_time,
        })
    }

    fn listings<F>(&self, keep: F) -> Vec<ShowListing>
    where
        F: Fn(&Show) -> bool,
    {
        let mut listings: Vec<ShowListing> = self
            .shows
            .iter()
            .filter(|s| keep(s))
            .filter_map(|s| self.listing(s))
            .collect();
        listings.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(a.venue_id.cmp(&b.venue_id))
                .then(a.artist_id.cmp(&b.artist_id))
        });
        listings
    }
}

/// In-memory storage implementation for development/testing
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| FyyurError::database("in-memory storage lock poisoned"))
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue> {
        let mut tables = self.lock()?;
        tables.next_venue_id += 1;
        let id = tables.next_venue_id;
        let venue = Venue::from_profile(id, profile.clone());
        tables.venues.insert(id, venue.clone());

        debug!("Created venue: {} with id {}", venue.name, id);
        Ok(venue)
    }

    async fn get_venue_by_id(&self, venue_id: i64) -> Result<Option<Venue>> {
        Ok(self.lock()?.venues.get(&venue_id).cloned())
    }

    async fn update_venue(&self, venue_id: i64, profile: &VenueProfile) -> Result<Venue> {
        let mut tables = self.lock()?;
        let slot = tables.venues.get_mut(&venue_id).ok_or(FyyurError::NotFound {
            entity: "venue",
            id: venue_id,
        })?;
        *slot = Venue::from_profile(venue_id, profile.clone());

        debug!("Updated venue: {} with id {}", slot.name, venue_id);
        Ok(slot.clone())
    }

    async fn delete_venue(&self, venue_id: i64) -> Result<()> {
        let mut tables = self.lock()?;
        if tables.venues.remove(&venue_id).is_none() {
            return Err(FyyurError::NotFound {
                entity: "venue",
                id: venue_id,
            });
        }
        tables.shows.retain(|s| s.venue_id != venue_id);

        debug!("Deleted venue {}", venue_id);
        Ok(())
    }

    async fn get_all_venues(&self) -> Result<Vec<Venue>> {
        let venues = self.lock()?.venues.values().cloned().collect();
        Ok(venues_by_name(venues))
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
        let venues = self
            .lock()?
            .venues
            .values()
            .filter(|v| name_matches(&v.name, term))
            .cloned()
            .collect();
        Ok(venues_by_name(venues))
    }

    async fn upcoming_show_counts(&self, now: NaiveDateTime) -> Result<HashMap<i64, usize>> {
        let tables = self.lock()?;
        let mut counts = HashMap::new();
        for show in tables.shows.iter().filter(|s| s.start_time > now) {
            *counts.entry(show.venue_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist> {
        let mut tables = self.lock()?;
        tables.next_artist_id += 1;
        let id = tables.next_artist_id;
        let artist = Artist::from_profile(id, profile.clone());
        tables.artists.insert(id, artist.clone());

        debug!("Created artist: {} with id {}", artist.name, id);
        Ok(artist)
    }

    async fn get_artist_by_id(&self, artist_id: i64) -> Result<Option<Artist>> {
        Ok(self.lock()?.artists.get(&artist_id).cloned())
    }

    async fn update_artist(&self, artist_id: i64, profile: &ArtistProfile) -> Result<Artist> {
        let mut tables = self.lock()?;
        let slot = tables.artists.get_mut(&artist_id).ok_or(FyyurError::NotFound {
            entity: "artist",
            id: artist_id,
        })?;
        *slot = Artist::from_profile(artist_id, profile.clone());

        debug!("Updated artist: {} with id {}", slot.name, artist_id);
        Ok(slot.clone())
    }

    async fn delete_artist(&self, artist_id: i64) -> Result<()> {
        let mut tables = self.lock()?;
        if tables.artists.remove(&artist_id).is_none() {
            return Err(FyyurError::NotFound {
                entity: "artist",
                id: artist_id,
            });
        }
        tables.shows.retain(|s| s.artist_id != artist_id);

        debug!("Deleted artist {}", artist_id);
        Ok(())
    }

    async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        let artists = self.lock()?.artists.values().cloned().collect();
        Ok(artists_by_name(artists))
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
        let artists = self
            .lock()?
            .artists
            .values()
            .filter(|a| name_matches(&a.name, term))
            .cloned()
            .collect();
        Ok(artists_by_name(artists))
    }

    async fn upcoming_artist_show_counts(
        &self,
        now: NaiveDateTime,
    ) -> Result<HashMap<i64, usize>> {
        let tables = self.lock()?;
        let mut counts = HashMap::new();
        for show in tables.shows.iter().filter(|s| s.start_time > now) {
            *counts.entry(show.artist_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn create_show(&self, show: &Show) -> Result<()> {
        let mut tables = self.lock()?;
        if !tables.venues.contains_key(&show.venue_id) {
            return Err(FyyurError::NotFound {
                entity: "venue",
                id: show.venue_id,
            });
        }
        if !tables.artists.contains_key(&show.artist_id) {
            return Err(FyyurError::NotFound {
                entity: "artist",
                id: show.artist_id,
            });
        }
        if tables.shows.contains(show) {
            return Err(FyyurError::database(format!(
                "show for venue {} and artist {} at {} already exists",
                show.venue_id, show.artist_id, show.start_time
            )));
        }
        tables.shows.push(show.clone());

        debug!(
            "Created show: venue {} artist {} at {}",
            show.venue_id, show.artist_id, show.start_time
        );
        Ok(())
    }

    async fn get_all_shows(&self) -> Result<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|_| true))
    }

    async fn get_shows_by_venue_id(&self, venue_id: i64) -> Result<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|s| s.venue_id == venue_id))
    }

    async fn get_shows_by_artist_id(&self, artist_id: i64) -> Result<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|s| s.artist_id == artist_id))
    }

    async fn clear_all_data(&self) -> Result<()> {
        let mut tables = self.lock()?;
        *tables = Tables::default();
        Ok(())
    }
}
