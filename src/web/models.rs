//! Page-facing shapes: show cards with preformatted times and select options.

use crate::domain::{ShowListing, GENRES, STATES};
use chrono::NaiveDateTime;

/// Long form, used for tooltips: "Saturday April 1, 2035 at 8:00PM".
pub const FULL_DATE_FORMAT: &str = "%A %B %-d, %Y at %-I:%M%p";
/// Card form: "Sat Apr 1, 2035 8:00PM".
pub const MEDIUM_DATE_FORMAT: &str = "%a %b %-d, %Y %-I:%M%p";

#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
    pub start_time_full: String,
}

impl From<&ShowListing> for ShowCard {
    fn from(listing: &ShowListing) -> Self {
        Self {
            venue_id: listing.venue_id,
            venue_name: listing.venue_name.clone(),
            venue_image_link: listing.venue_image_link.clone().unwrap_or_default(),
            artist_id: listing.artist_id,
            artist_name: listing.artist_name.clone(),
            artist_image_link: listing.artist_image_link.clone().unwrap_or_default(),
            start_time: format_time(&listing.start_time, MEDIUM_DATE_FORMAT),
            start_time_full: format_time(&listing.start_time, FULL_DATE_FORMAT),
        }
    }
}

pub fn show_cards(listings: &[ShowListing]) -> Vec<ShowCard> {
    listings.iter().map(ShowCard::from).collect()
}

pub fn format_time(time: &NaiveDateTime, format: &str) -> String {
    time.format(format).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub selected: bool,
}

pub fn state_options(selected: &str) -> Vec<SelectOption> {
    STATES
        .iter()
        .map(|&value| SelectOption {
            value,
            selected: value.eq_ignore_ascii_case(selected),
        })
        .collect()
}

pub fn genre_options(selected: &[String]) -> Vec<SelectOption> {
    GENRES
        .iter()
        .map(|&value| SelectOption {
            value,
            selected: selected.iter().any(|g| g == value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::START_TIME_FORMAT;

    #[test]
    fn card_formats_times() {
        let listing = ShowListing {
            venue_id: 3,
            venue_name: "Park Square Live Music & Coffee".to_string(),
            venue_image_link: None,
            artist_id: 6,
            artist_name: "The Wild Sax Band".to_string(),
            artist_image_link: Some("https://images.example.com/sax.jpg".to_string()),
            start_time: NaiveDateTime::parse_from_str("2035-04-01 20:00:00", START_TIME_FORMAT)
                .unwrap(),
        };

        let card = ShowCard::from(&listing);
        assert_eq!(card.start_time, "Sun Apr 1, 2035 8:00PM");
        assert_eq!(card.start_time_full, "Sunday April 1, 2035 at 8:00PM");
        assert_eq!(card.venue_image_link, "");
        assert_eq!(card.artist_image_link, "https://images.example.com/sax.jpg");
    }

    #[test]
    fn options_mark_selection() {
        let states = state_options("ny");
        assert_eq!(states.iter().filter(|o| o.selected).count(), 1);
        assert!(states.iter().any(|o| o.value == "NY" && o.selected));

        let genres = genre_options(&["Jazz".to_string(), "Folk".to_string()]);
        let picked: Vec<&str> = genres.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(picked, vec!["Folk", "Jazz"]);
    }
}
