mod common;

use anyhow::Result;
use chrono::Duration;
use common::*;
use fyyur::domain::current_time;
use fyyur::storage::Storage;
use reqwest::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn artist_create_accepts_bracketed_genres() -> Result<()> {
    let app = spawn_app().await?;

    let response = app
        .post_form(
            "/artists/create",
            &[
                ("name", "Guns N Petals"),
                ("city", "San Francisco"),
                ("state", "CA"),
                ("phone", "326-123-5000"),
                ("genres[]", "Rock n Roll"),
                ("genres[]", "Punk"),
                ("website", "https://www.gunsnpetalsband.com"),
                ("seeking_venue", "y"),
                ("seeking_description", "Looking for shows in the Bay Area!"),
            ],
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await?;
    assert_eq!(
        flash_texts(&html),
        vec!["Artist Guns N Petals was successfully listed!"]
    );

    let artists = app.storage.get_all_artists().await?;
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].genres, vec!["Rock n Roll", "Punk"]);
    assert_eq!(
        artists[0].website.as_deref(),
        Some("https://www.gunsnpetalsband.com")
    );
    assert!(artists[0].seeking_venue);
    Ok(())
}

#[tokio::test]
async fn artist_detail_splits_past_and_upcoming() -> Result<()> {
    let app = spawn_app().await?;
    let hop = app
        .storage
        .create_venue(&venue("The Musical Hop", "San Francisco", "CA"))
        .await?;
    let square = app
        .storage
        .create_venue(&venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await?;
    let band = app.storage.create_artist(&artist("The Wild Sax Band")).await?;
    let now = current_time();
    app.storage
        .create_show(&show(hop.id, band.id, now - Duration::days(30)))
        .await?;
    app.storage
        .create_show(&show(square.id, band.id, now + Duration::days(7)))
        .await?;
    app.storage
        .create_show(&show(square.id, band.id, now + Duration::days(14)))
        .await?;

    let html = app
        .get(&format!("/artists/{}", band.id))
        .await?
        .text()
        .await?;
    assert_eq!(texts(&html, ".artist-name"), vec!["The Wild Sax Band"]);
    assert_eq!(
        texts(&html, "#upcoming-shows .show-venue"),
        vec!["Park Square Live Music & Coffee", "Park Square Live Music & Coffee"]
    );
    assert_eq!(texts(&html, "#past-shows .show-venue"), vec!["The Musical Hop"]);
    assert_eq!(texts(&html, "#upcoming-shows h2"), vec!["2 Upcoming Shows"]);
    assert_eq!(texts(&html, "#past-shows h2"), vec!["1 Past Show"]);
    Ok(())
}

#[tokio::test]
async fn artist_search_counts_upcoming_shows() -> Result<()> {
    let app = spawn_app().await?;
    let hop = app
        .storage
        .create_venue(&venue("The Musical Hop", "San Francisco", "CA"))
        .await?;
    let band = app.storage.create_artist(&artist("Guns N Petals")).await?;
    app.storage.create_artist(&artist("Matt Quevedo")).await?;
    app.storage.create_artist(&artist("The Wild Sax Band")).await?;
    app.storage
        .create_show(&show(hop.id, band.id, current_time() + Duration::days(2)))
        .await?;

    let html = app
        .post_form("/artists/search", &[("search_term", "A")])
        .await?
        .text()
        .await?;
    assert_eq!(texts(&html, ".result-count"), vec!["3"]);

    let html = app
        .post_form("/artists/search", &[("search_term", "band")])
        .await?
        .text()
        .await?;
    assert_eq!(texts(&html, ".search-result .item-name"), vec!["The Wild Sax Band"]);

    let html = app
        .post_form("/artists/search", &[("search_term", "petals")])
        .await?
        .text()
        .await?;
    assert_eq!(texts(&html, ".search-result .upcoming-count"), vec!["1 upcoming"]);
    assert!(html.contains(&format!("href=\"/artists/{}\"", band.id)));
    Ok(())
}

#[tokio::test]
async fn artist_edit_validation_keeps_record() -> Result<()> {
    let app = spawn_app().await?;
    let band = app.storage.create_artist(&artist("Guns N Petals")).await?;

    let response = app
        .post_form(
            &format!("/artists/{}/edit", band.id),
            &[
                ("name", "Guns N Roses"),
                ("city", "San Francisco"),
                ("state", "XX"),
                ("genres", "Rock n Roll"),
                ("facebook_link", "facebook.com/gnr"),
            ],
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text().await?;
    assert_eq!(
        texts(&html, ".field-error"),
        vec![
            "'XX' is not a valid state.",
            "Facebook link must be an http(s) URL."
        ]
    );

    let stored = app.storage.get_artist_by_id(band.id).await?.expect("still stored");
    assert_eq!(stored.name, "Guns N Petals");
    Ok(())
}

#[tokio::test]
async fn artist_edit_updates_record() -> Result<()> {
    let app = spawn_app().await?;
    let band = app.storage.create_artist(&artist("Guns N Petals")).await?;

    let response = app
        .post_form(
            &format!("/artists/{}/edit", band.id),
            &[
                ("name", "Guns N Petals"),
                ("city", "Oakland"),
                ("state", "CA"),
                ("genres", "Rock n Roll"),
            ],
        )
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(flash_cookie(&response).is_some());

    let stored = app.storage.get_artist_by_id(band.id).await?.expect("still stored");
    assert_eq!(stored.city, "Oakland");
    Ok(())
}

#[tokio::test]
async fn deleting_artist_cancels_their_shows() -> Result<()> {
    let app = spawn_app().await?;
    let hop = app
        .storage
        .create_venue(&venue("The Musical Hop", "San Francisco", "CA"))
        .await?;
    let band = app.storage.create_artist(&artist("Guns N Petals")).await?;
    app.storage
        .create_show(&show(hop.id, band.id, current_time() + Duration::days(2)))
        .await?;

    let response = app
        .client
        .delete(app.url(&format!("/artists/{}", band.id)))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.storage.get_all_artists().await?.is_empty());
    assert!(app.storage.get_shows_by_venue_id(hop.id).await?.is_empty());

    let response = app
        .client
        .delete(app.url(&format!("/artists/{}", band.id)))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn storage_failure_on_artist_delete_and_edit_is_flashed() -> Result<()> {
    let base = serve(Arc::new(BrokenStorage)).await?;
    let client = client()?;

    let response = client.post(format!("{base}/artists/7/delete")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await?;
    assert_eq!(
        flash_texts(&html),
        vec!["Something went wrong. Artist 7 could not be deleted."]
    );

    let response = client.get(format!("{base}/artists/7/edit")).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
