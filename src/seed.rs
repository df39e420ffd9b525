//! Demo records for a fresh database: three venues, three artists and a
//! handful of shows spread over the past and the future.

use crate::domain::*;
use crate::error::Result;
use crate::storage::Storage;
use chrono::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn genres(names: &[&str]) -> Vec<String> {
    names.iter().map(|g| g.to_string()).collect()
}

fn demo_venues() -> Vec<VenueProfile> {
    vec![
        VenueProfile {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: text("123-123-1234"),
            website: text("https://www.themusicalhop.com"),
            facebook_link: text("https://www.facebook.com/TheMusicalHop"),
            image_link: text("https://images.unsplash.com/photo-1543900694-133f37abaaa5?w=400"),
            genres: genres(&["Jazz", "Reggae", "Folk", "Classical", "R&B", "Hip-Hop"]),
            seeking_talent: true,
            seeking_description: text(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
        },
        VenueProfile {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: text("914-003-1132"),
            website: text("https://www.theduelingpianos.com"),
            facebook_link: text("https://www.facebook.com/theduelingpianos"),
            image_link: text("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?w=400"),
            genres: genres(&["Classical", "R&B", "Hip-Hop"]),
            seeking_talent: false,
            seeking_description: None,
        },
        VenueProfile {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: text("415-000-1234"),
            website: text("https://www.parksquarelivemusicandcoffee.com"),
            facebook_link: text("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            image_link: text("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?w=400"),
            genres: genres(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn demo_artists() -> Vec<ArtistProfile> {
    vec![
        ArtistProfile {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("326-123-5000"),
            website: text("https://www.gunsnpetalsband.com"),
            facebook_link: text("https://www.facebook.com/GunsNPetals"),
            image_link: text("https://images.unsplash.com/photo-1549213783-8284d0336c4f?w=300"),
            genres: genres(&["Rock n Roll"]),
            seeking_venue: true,
            seeking_description: text(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            ),
        },
        ArtistProfile {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: text("300-400-5000"),
            website: None,
            facebook_link: text("https://www.facebook.com/mattquevedo923251523"),
            image_link: text("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?w=334"),
            genres: genres(&["Jazz"]),
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistProfile {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("432-325-5432"),
            website: None,
            facebook_link: None,
            image_link: text("https://images.unsplash.com/photo-1558369981-f9ca78462e61?w=794"),
            genres: genres(&["Jazz", "Classical"]),
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// Insert the demo catalog. Show times are relative to `current_time()` so
/// both the past and upcoming sections have something in them.
pub async fn seed_demo_data(storage: &dyn Storage) -> Result<SeedSummary> {
    let mut venues = Vec::new();
    for profile in demo_venues() {
        venues.push(storage.create_venue(&profile).await?);
    }
    let mut artists = Vec::new();
    for profile in demo_artists() {
        artists.push(storage.create_artist(&profile).await?);
    }

    // (venue index, artist index, days from now, hour)
    let bookings: [(usize, usize, i64, u32); 5] = [
        (0, 0, -60, 21),
        (2, 1, -20, 20),
        (2, 2, 30, 20),
        (2, 2, 37, 20),
        (2, 2, 44, 20),
    ];
    let today = current_time().date();
    for (venue, artist, days, hour) in bookings {
        let start_time = (today + Duration::days(days))
            .and_hms_opt(hour, 0, 0)
            .unwrap_or_default();
        storage
            .create_show(&Show {
                venue_id: venues[venue].id,
                artist_id: artists[artist].id,
                start_time,
            })
            .await?;
    }

    let summary = SeedSummary {
        venues: venues.len(),
        artists: artists.len(),
        shows: bookings.len(),
    };
    info!(
        "Seeded {} venues, {} artists and {} shows",
        summary.venues, summary.artists, summary.shows
    );
    Ok(summary)
}
