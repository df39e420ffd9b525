//! Read-side queries behind the listing, search and detail pages.
//!
//! Everything here composes `Storage` calls; nothing is persisted. Past and
//! upcoming are always decided against the `now` passed in by the caller.

use crate::domain::*;
use crate::error::Result;
use crate::storage::Storage;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub shows: ShowPartition,
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub shows: ShowPartition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
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

/// All venues grouped by area, areas ordered by state then city.
pub async fn venue_areas(storage: &dyn Storage, now: NaiveDateTime) -> Result<Vec<Area>> {
    let venues = storage.get_all_venues().await?;
    let counts = storage.upcoming_show_counts(now).await?;

    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(summary);
    }

    Ok(areas
        .into_iter()
        .map(|((state, city), venues)| Area {
            city,
            state,
            venues,
        })
        .collect())
}

pub async fn venue_detail(
    storage: &dyn Storage,
    venue_id: i64,
    now: NaiveDateTime,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = storage.get_venue_by_id(venue_id).await? else {
        return Ok(None);
    };
    let shows = storage.get_shows_by_venue_id(venue_id).await?;
    Ok(Some(VenueDetail {
        venue,
        shows: partition_shows(shows, now),
    }))
}

pub async fn artist_detail(
    storage: &dyn Storage,
    artist_id: i64,
    now: NaiveDateTime,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = storage.get_artist_by_id(artist_id).await? else {
        return Ok(None);
    };
    let shows = storage.get_shows_by_artist_id(artist_id).await?;
    Ok(Some(ArtistDetail {
        artist,
        shows: partition_shows(shows, now),
    }))
}

/// Every show, earliest first.
pub async fn show_listings(storage: &dyn Storage) -> Result<Vec<ShowListing>> {
    storage.get_all_shows().await
}

pub async fn search_venues(
    storage: &dyn Storage,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let venues = storage.search_venues(term.trim()).await?;
    let counts = storage.upcoming_show_counts(now).await?;
    let hits: Vec<SearchHit> = venues
        .into_iter()
        .map(|v| SearchHit {
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();
    Ok(hits.into())
}

pub async fn search_artists(
    storage: &dyn Storage,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let artists = storage.search_artists(term.trim()).await?;
    let counts = storage.upcoming_artist_show_counts(now).await?;
    let hits: Vec<SearchHit> = artists
        .into_iter()
        .map(|a| SearchHit {
            num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
            id: a.id,
            name: a.name,
        })
        .collect();
    Ok(hits.into())
}
