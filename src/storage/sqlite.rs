use super::{artists_by_name, name_matches, venues_by_name, Storage};
use crate::domain::*;
use crate::error::{FyyurError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, website, facebook_link, \
                             image_link, genres, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, website, facebook_link, image_link, \
                              genres, seeking_venue, seeking_description";

const SHOW_LISTING_SELECT: &str = "SELECT s.venue_id, v.name, v.image_link, s.artist_id, a.name, a.image_link, s.start_time
     FROM shows s
     JOIN venues v ON v.id = s.venue_id
     JOIN artists a ON a.id = s.artist_id";

const SHOW_LISTING_ORDER: &str = "ORDER BY s.start_time, s.venue_id, s.artist_id";

/// SQLite-backed storage. One connection, serialized behind a mutex; every
/// call runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the database file at `path` and run migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!("Opening SQLite database at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory SQLite database");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| FyyurError::database("SQLite connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| FyyurError::database(format!("SQLite task failed: {e}")))?
    }
}

/// Apply the embedded schema. Safe to run repeatedly.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let migration_sql_001 = include_str!("../../migrations/001_create_venues_artists_shows.sql");
    conn.execute_batch(migration_sql_001)
        .map_err(|e| FyyurError::database(format!("Failed to run base migration: {e}")))?;
    debug!("Database migrations applied");
    Ok(())
}

fn encode_genres(genres: &[String]) -> Result<String> {
    Ok(serde_json::to_string(genres)?)
}

fn decode_genres(idx: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn encode_time(time: &NaiveDateTime) -> String {
    time.format(START_TIME_FORMAT).to_string()
}

fn decode_time(idx: usize, raw: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
    let genres: String = row.get(9)?;
    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        website: row.get(6)?,
        facebook_link: row.get(7)?,
        image_link: row.get(8)?,
        genres: decode_genres(9, &genres)?,
        seeking_talent: row.get(10)?,
        seeking_description: row.get(11)?,
    })
}

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    let genres: String = row.get(8)?;
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        phone: row.get(4)?,
        website: row.get(5)?,
        facebook_link: row.get(6)?,
        image_link: row.get(7)?,
        genres: decode_genres(8, &genres)?,
        seeking_venue: row.get(9)?,
        seeking_description: row.get(10)?,
    })
}

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<ShowListing> {
    let start_time: String = row.get(6)?;
    Ok(ShowListing {
        venue_id: row.get(0)?,
        venue_name: row.get(1)?,
        venue_image_link: row.get(2)?,
        artist_id: row.get(3)?,
        artist_name: row.get(4)?,
        artist_image_link: row.get(5)?,
        start_time: decode_time(6, &start_time)?,
    })
}

// SQLite's lower() folds ASCII only, so name matching and ordering happen in Rust.
fn query_venues(conn: &Connection, term: &str) -> Result<Vec<Venue>> {
    let sql = format!("SELECT {VENUE_COLUMNS} FROM venues");
    let mut stmt = conn.prepare(&sql)?;
    let mut venues = Vec::new();
    for venue in stmt.query_map([], venue_from_row)? {
        let venue = venue?;
        if name_matches(&venue.name, term) {
            venues.push(venue);
        }
    }
    Ok(venues_by_name(venues))
}

fn query_artists(conn: &Connection, term: &str) -> Result<Vec<Artist>> {
    let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists");
    let mut stmt = conn.prepare(&sql)?;
    let mut artists = Vec::new();
    for artist in stmt.query_map([], artist_from_row)? {
        let artist = artist?;
        if name_matches(&artist.name, term) {
            artists.push(artist);
        }
    }
    Ok(artists_by_name(artists))
}

fn query_listings(conn: &Connection, filter: &str, id: Option<i64>) -> Result<Vec<ShowListing>> {
    let sql = format!("{SHOW_LISTING_SELECT} {filter} {SHOW_LISTING_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = match id {
        Some(id) => stmt.query_map(params![id], listing_from_row)?,
        None => stmt.query_map([], listing_from_row)?,
    };
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id], |_| Ok(()))
        .optional()?
        .is_some())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue> {
        let profile = profile.clone();
        self.call(move |conn| {
            let genres = encode_genres(&profile.genres)?;
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO venues (name, city, state, address, phone, website, facebook_link,
                                     image_link, genres, seeking_talent, seeking_description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    profile.name,
                    profile.city,
                    profile.state,
                    profile.address,
                    profile.phone,
                    profile.website,
                    profile.facebook_link,
                    profile.image_link,
                    genres,
                    profile.seeking_talent,
                    profile.seeking_description,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            info!("Created venue: {} with id {}", profile.name, id);
            Ok(Venue::from_profile(id, profile))
        })
        .await
    }

    async fn get_venue_by_id(&self, venue_id: i64) -> Result<Option<Venue>> {
        self.call(move |conn| {
            let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1");
            Ok(conn
                .query_row(&sql, params![venue_id], venue_from_row)
                .optional()?)
        })
        .await
    }

    async fn update_venue(&self, venue_id: i64, profile: &VenueProfile) -> Result<Venue> {
        let profile = profile.clone();
        self.call(move |conn| {
            let genres = encode_genres(&profile.genres)?;
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE venues SET name = ?1, city = ?2, state = ?3, address = ?4, phone = ?5,
                        website = ?6, facebook_link = ?7, image_link = ?8, genres = ?9,
                        seeking_talent = ?10, seeking_description = ?11
                 WHERE id = ?12",
                params![
                    profile.name,
                    profile.city,
                    profile.state,
                    profile.address,
                    profile.phone,
                    profile.website,
                    profile.facebook_link,
                    profile.image_link,
                    genres,
                    profile.seeking_talent,
                    profile.seeking_description,
                    venue_id,
                ],
            )?;
            if changed == 0 {
                return Err(FyyurError::NotFound {
                    entity: "venue",
                    id: venue_id,
                });
            }
            tx.commit()?;

            info!("Updated venue: {} with id {}", profile.name, venue_id);
            Ok(Venue::from_profile(venue_id, profile))
        })
        .await
    }

    async fn delete_venue(&self, venue_id: i64) -> Result<()> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            let shows = tx.execute("DELETE FROM shows WHERE venue_id = ?1", params![venue_id])?;
            let changed = tx.execute("DELETE FROM venues WHERE id = ?1", params![venue_id])?;
            if changed == 0 {
                return Err(FyyurError::NotFound {
                    entity: "venue",
                    id: venue_id,
                });
            }
            tx.commit()?;

            info!("Deleted venue {} and {} show(s)", venue_id, shows);
            Ok(())
        })
        .await
    }

    async fn get_all_venues(&self) -> Result<Vec<Venue>> {
        self.call(|conn| query_venues(conn, "")).await
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
        let term = term.to_string();
        self.call(move |conn| query_venues(conn, &term)).await
    }

    async fn upcoming_show_counts(&self, now: NaiveDateTime) -> Result<HashMap<i64, usize>> {
        let now = encode_time(&now);
        self.call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT venue_id, COUNT(*) FROM shows WHERE start_time > ?1 GROUP BY venue_id",
            )?;
            let rows = stmt.query_map(params![now], |row| {
                let venue_id: i64 = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((venue_id, count as usize))
            })?;
            Ok(rows.collect::<rusqlite::Result<HashMap<_, _>>>()?)
        })
        .await
    }

    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist> {
        let profile = profile.clone();
        self.call(move |conn| {
            let genres = encode_genres(&profile.genres)?;
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO artists (name, city, state, phone, website, facebook_link,
                                      image_link, genres, seeking_venue, seeking_description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    profile.name,
                    profile.city,
                    profile.state,
                    profile.phone,
                    profile.website,
                    profile.facebook_link,
                    profile.image_link,
                    genres,
                    profile.seeking_venue,
                    profile.seeking_description,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            info!("Created artist: {} with id {}", profile.name, id);
            Ok(Artist::from_profile(id, profile))
        })
        .await
    }

    async fn get_artist_by_id(&self, artist_id: i64) -> Result<Option<Artist>> {
        self.call(move |conn| {
            let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?1");
            Ok(conn
                .query_row(&sql, params![artist_id], artist_from_row)
                .optional()?)
        })
        .await
    }

    async fn update_artist(&self, artist_id: i64, profile: &ArtistProfile) -> Result<Artist> {
        let profile = profile.clone();
        self.call(move |conn| {
            let genres = encode_genres(&profile.genres)?;
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE artists SET name = ?1, city = ?2, state = ?3, phone = ?4, website = ?5,
                        facebook_link = ?6, image_link = ?7, genres = ?8, seeking_venue = ?9,
                        seeking_description = ?10
                 WHERE id = ?11",
                params![
                    profile.name,
                    profile.city,
                    profile.state,
                    profile.phone,
                    profile.website,
                    profile.facebook_link,
                    profile.image_link,
                    genres,
                    profile.seeking_venue,
                    profile.seeking_description,
                    artist_id,
                ],
            )?;
            if changed == 0 {
                return Err(FyyurError::NotFound {
                    entity: "artist",
                    id: artist_id,
                });
            }
            tx.commit()?;

            info!("Updated artist: {} with id {}", profile.name, artist_id);
            Ok(Artist::from_profile(artist_id, profile))
        })
        .await
    }

    async fn delete_artist(&self, artist_id: i64) -> Result<()> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            let shows = tx.execute("DELETE FROM shows WHERE artist_id = ?1", params![artist_id])?;
            let changed = tx.execute("DELETE FROM artists WHERE id = ?1", params![artist_id])?;
            if changed == 0 {
                return Err(FyyurError::NotFound {
                    entity: "artist",
                    id: artist_id,
                });
            }
            tx.commit()?;

            info!("Deleted artist {} and {} show(s)", artist_id, shows);
            Ok(())
        })
        .await
    }

    async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        self.call(|conn| query_artists(conn, "")).await
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
        let term = term.to_string();
        self.call(move |conn| query_artists(conn, &term)).await
    }

    async fn upcoming_artist_show_counts(
        &self,
        now: NaiveDateTime,
    ) -> Result<HashMap<i64, usize>> {
        let now = encode_time(&now);
        self.call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT artist_id, COUNT(*) FROM shows WHERE start_time > ?1 GROUP BY artist_id",
            )?;
            let rows = stmt.query_map(params![now], |row| {
                let artist_id: i64 = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((artist_id, count as usize))
            })?;
            Ok(rows.collect::<rusqlite::Result<HashMap<_, _>>>()?)
        })
        .await
    }

    async fn create_show(&self, show: &Show) -> Result<()> {
        let show = show.clone();
        self.call(move |conn| {
            let tx = conn.transaction()?;
            if !exists(&tx, "venues", show.venue_id)? {
                return Err(FyyurError::NotFound {
                    entity: "venue",
                    id: show.venue_id,
                });
            }
            if !exists(&tx, "artists", show.artist_id)? {
                return Err(FyyurError::NotFound {
                    entity: "artist",
                    id: show.artist_id,
                });
            }
            tx.execute(
                "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3)",
                params![show.venue_id, show.artist_id, encode_time(&show.start_time)],
            )?;
            tx.commit()?;

            info!(
                "Created show: venue {} artist {} at {}",
                show.venue_id, show.artist_id, show.start_time
            );
            Ok(())
        })
        .await
    }

    async fn get_all_shows(&self) -> Result<Vec<ShowListing>> {
        self.call(|conn| query_listings(conn, "", None)).await
    }

    async fn get_shows_by_venue_id(&self, venue_id: i64) -> Result<Vec<ShowListing>> {
        self.call(move |conn| query_listings(conn, "WHERE s.venue_id = ?1", Some(venue_id)))
            .await
    }

    async fn get_shows_by_artist_id(&self, artist_id: i64) -> Result<Vec<ShowListing>> {
        self.call(move |conn| query_listings(conn, "WHERE s.artist_id = ?1", Some(artist_id)))
            .await
    }

    async fn clear_all_data(&self) -> Result<()> {
        self.call(|conn| {
            let tx = conn.transaction()?;
            // Shows first (foreign key constraints)
            tx.execute("DELETE FROM shows", [])?;
            tx.execute("DELETE FROM artists", [])?;
            tx.execute("DELETE FROM venues", [])?;
            tx.execute(
                "DELETE FROM sqlite_sequence WHERE name IN ('venues', 'artists')",
                [],
            )?;
            tx.commit()?;

            info!("Cleared all data from database");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn venue(name: &str) -> VenueProfile {
        VenueProfile {
            name: name.to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            website: Some("https://www.theduelingpianos.com".to_string()),
            genres: vec!["Classical".to_string(), "R&B".to_string(), "Hip-Hop".to_string()],
            ..Default::default()
        }
    }

    fn artist(name: &str) -> ArtistProfile {
        ArtistProfile {
            name: name.to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            genres: vec!["Jazz".to_string()],
            seeking_venue: true,
            seeking_description: Some("Looking for shows in the city".to_string()),
            ..Default::default()
        }
    }

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn venue_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("fyyur.db");

        let created = {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap()
        };

        let storage = SqliteStorage::open(&path).unwrap();
        let loaded = storage.get_venue_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.genres, vec!["Classical", "R&B", "Hip-Hop"]);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let created = storage.create_artist(&artist("The Wild Sax Band")).await.unwrap();

        let mut profile = created.profile();
        profile.name = "The Wilder Sax Band".to_string();
        profile.seeking_venue = false;
        profile.seeking_description = None;
        profile.genres = vec!["Jazz".to_string(), "Classical".to_string()];
        storage.update_artist(created.id, &profile).await.unwrap();

        let loaded = storage.get_artist_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.profile(), profile);
    }

    #[tokio::test]
    async fn delete_missing_venue_is_not_found() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let err = storage.delete_venue(3).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.create_venue(&venue("100% Live")).await.unwrap();
        storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap();

        let hits = storage.search_venues("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% Live");

        let hits = storage.search_venues("pIaNo").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(storage.search_venues("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case_like_in_memory() {
        let sqlite = SqliteStorage::open_in_memory().unwrap();
        let memory = crate::storage::InMemoryStorage::new();
        for name in ["CAFÉ ÉTOILE", "Über Club", "The Musical Hop"] {
            sqlite.create_venue(&venue(name)).await.unwrap();
            memory.create_venue(&venue(name)).await.unwrap();
            sqlite.create_artist(&artist(name)).await.unwrap();
        }

        let hits = sqlite.search_venues("étoile").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "CAFÉ ÉTOILE");
        assert_eq!(memory.search_venues("étoile").await.unwrap().len(), 1);

        let hits = sqlite.search_artists("über").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Über Club");

        let names: Vec<String> = sqlite
            .get_all_venues()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        let in_memory: Vec<String> = memory
            .get_all_venues()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, in_memory);
    }

    #[tokio::test]
    async fn show_listings_join_names_and_order_by_time() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let hall = storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap();
        let sax = storage.create_artist(&artist("The Wild Sax Band")).await.unwrap();
        let petals = storage.create_artist(&artist("Guns N Petals")).await.unwrap();

        for (artist_id, time) in [
            (sax.id, "2035-04-15 20:00:00"),
            (petals.id, "2019-05-21 21:30:00"),
            (sax.id, "2035-04-01 20:00:00"),
        ] {
            storage
                .create_show(&Show {
                    venue_id: hall.id,
                    artist_id,
                    start_time: at(time),
                })
                .await
                .unwrap();
        }

        let shows = storage.get_shows_by_venue_id(hall.id).await.unwrap();
        let times: Vec<String> = shows.iter().map(|s| encode_time(&s.start_time)).collect();
        assert_eq!(
            times,
            vec!["2019-05-21 21:30:00", "2035-04-01 20:00:00", "2035-04-15 20:00:00"]
        );
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[0].venue_name, "The Dueling Pianos Bar");

        let by_artist = storage.get_shows_by_artist_id(sax.id).await.unwrap();
        assert_eq!(by_artist.len(), 2);

        let counts = storage
            .upcoming_show_counts(at("2024-01-01 00:00:00"))
            .await
            .unwrap();
        assert_eq!(counts.get(&hall.id), Some(&2));

        let counts = storage
            .upcoming_artist_show_counts(at("2024-01-01 00:00:00"))
            .await
            .unwrap();
        assert_eq!(counts.get(&sax.id), Some(&2));
        assert_eq!(counts.get(&petals.id), None);
    }

    #[tokio::test]
    async fn duplicate_and_dangling_shows_are_refused() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let hall = storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap();
        let sax = storage.create_artist(&artist("The Wild Sax Band")).await.unwrap();
        let show = Show {
            venue_id: hall.id,
            artist_id: sax.id,
            start_time: at("2035-04-01 20:00:00"),
        };

        storage.create_show(&show).await.unwrap();
        assert!(storage.create_show(&show).await.is_err());

        let dangling = Show {
            artist_id: sax.id + 100,
            ..show
        };
        assert!(storage.create_show(&dangling).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn deleting_an_artist_cascades_to_shows() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let hall = storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap();
        let sax = storage.create_artist(&artist("The Wild Sax Band")).await.unwrap();
        storage
            .create_show(&Show {
                venue_id: hall.id,
                artist_id: sax.id,
                start_time: crate::domain::current_time() + Duration::days(2),
            })
            .await
            .unwrap();

        storage.delete_artist(sax.id).await.unwrap();

        assert!(storage.get_all_shows().await.unwrap().is_empty());
        assert!(storage.get_artist_by_id(sax.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_resets_ids() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.create_venue(&venue("The Dueling Pianos Bar")).await.unwrap();
        storage.clear_all_data().await.unwrap();
        assert!(storage.get_all_venues().await.unwrap().is_empty());

        let again = storage.create_venue(&venue("The Musical Hop")).await.unwrap();
        assert_eq!(again.id, 1);
    }
}
