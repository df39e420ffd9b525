#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use fyyur::domain::{Artist, ArtistProfile, Show, ShowListing, Venue, VenueProfile};
use fyyur::storage::{SqliteStorage, Storage};
use fyyur::FyyurError;
use fyyur::web::flash::FLASH_COOKIE;
use fyyur::web::{app_router, AppState};
use reqwest::header::SET_COOKIE;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A server on an ephemeral port backed by a throwaway SQLite file.
pub struct TestApp {
    pub base: String,
    pub client: reqwest::Client,
    pub storage: Arc<SqliteStorage>,
    _dir: TempDir,
}

pub async fn spawn_app() -> Result<TestApp> {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(SqliteStorage::open(dir.path().join("fyyur.db"))?);
    let base = serve(storage.clone()).await?;

    Ok(TestApp {
        base,
        client: client()?,
        storage,
        _dir: dir,
    })
}

/// Serves the app over `storage` and returns its base URL.
pub async fn serve(storage: Arc<dyn Storage>) -> Result<String> {
    let app = app_router(AppState::new(storage), "static");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

pub fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// A store whose every call fails, as when the database file becomes unreadable.
pub struct BrokenStorage;

fn broken<T>() -> fyyur::Result<T> {
    Err(FyyurError::database("disk I/O error"))
}

#[async_trait]
impl Storage for BrokenStorage {
    async fn create_venue(&self, _: &VenueProfile) -> fyyur::Result<Venue> {
        broken()
    }
    async fn get_venue_by_id(&self, _: i64) -> fyyur::Result<Option<Venue>> {
        broken()
    }
    async fn update_venue(&self, _: i64, _: &VenueProfile) -> fyyur::Result<Venue> {
        broken()
    }
    async fn delete_venue(&self, _: i64) -> fyyur::Result<()> {
        broken()
    }
    async fn get_all_venues(&self) -> fyyur::Result<Vec<Venue>> {
        broken()
    }
    async fn search_venues(&self, _: &str) -> fyyur::Result<Vec<Venue>> {
        broken()
    }
    async fn upcoming_show_counts(&self, _: NaiveDateTime) -> fyyur::Result<HashMap<i64, usize>> {
        broken()
    }
    async fn create_artist(&self, _: &ArtistProfile) -> fyyur::Result<Artist> {
        broken()
    }
    async fn get_artist_by_id(&self, _: i64) -> fyyur::Result<Option<Artist>> {
        broken()
    }
    async fn update_artist(&self, _: i64, _: &ArtistProfile) -> fyyur::Result<Artist> {
        broken()
    }
    async fn delete_artist(&self, _: i64) -> fyyur::Result<()> {
        broken()
    }
    async fn get_all_artists(&self) -> fyyur::Result<Vec<Artist>> {
        broken()
    }
    async fn search_artists(&self, _: &str) -> fyyur::Result<Vec<Artist>> {
        broken()
    }
    async fn upcoming_artist_show_counts(
        &self,
        _: NaiveDateTime,
    ) -> fyyur::Result<HashMap<i64, usize>> {
        broken()
    }
    async fn create_show(&self, _: &Show) -> fyyur::Result<()> {
        broken()
    }
    async fn get_all_shows(&self) -> fyyur::Result<Vec<ShowListing>> {
        broken()
    }
    async fn get_shows_by_venue_id(&self, _: i64) -> fyyur::Result<Vec<ShowListing>> {
        broken()
    }
    async fn get_shows_by_artist_id(&self, _: i64) -> fyyur::Result<Vec<ShowListing>> {
        broken()
    }
    async fn clear_all_data(&self) -> fyyur::Result<()> {
        broken()
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }
}

pub fn venue(name: &str, city: &str, state: &str) -> VenueProfile {
    VenueProfile {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        genres: vec!["Jazz".to_string()],
        ..Default::default()
    }
}

pub fn artist(name: &str) -> ArtistProfile {
    ArtistProfile {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: vec!["Rock n Roll".to_string()],
        ..Default::default()
    }
}

pub fn show(venue_id: i64, artist_id: i64, start_time: chrono::NaiveDateTime) -> Show {
    Show {
        venue_id,
        artist_id,
        start_time,
    }
}

/// Trimmed text of every element matching `selector`.
pub fn texts(html: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).expect("valid selector");
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

pub fn flash_texts(html: &str) -> Vec<String> {
    texts(html, ".flash")
}

/// Value of the flash cookie set on `response`, if any.
pub fn flash_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookie| {
            let value = cookie.strip_prefix(&format!("{FLASH_COOKIE}="))?;
            Some(value.split(';').next().unwrap_or_default().to_string())
        })
}
