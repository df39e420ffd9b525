use askama::Template;

use crate::catalog::{Area, SearchResults};
use crate::domain::{Artist, Venue};
use crate::web::flash::FlashMessage;
use crate::web::forms::{ArtistForm, FieldError, ShowForm, VenueForm};
use crate::web::models::{SelectOption, ShowCard};

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub flashes: Vec<FlashMessage>,
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub flashes: Vec<FlashMessage>,
    pub artists: Vec<Artist>,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub flashes: Vec<FlashMessage>,
    pub shows: Vec<ShowCard>,
}

/// Shared by venue and artist search; `kind` is the path segment ("venues"/"artists").
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub flashes: Vec<FlashMessage>,
    pub kind: &'static str,
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct VenueDetailTemplate {
    pub flashes: Vec<FlashMessage>,
    pub venue: Venue,
    pub past_shows: Vec<ShowCard>,
    pub upcoming_shows: Vec<ShowCard>,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ArtistDetailTemplate {
    pub flashes: Vec<FlashMessage>,
    pub artist: Artist,
    pub past_shows: Vec<ShowCard>,
    pub upcoming_shows: Vec<ShowCard>,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormTemplate {
    pub flashes: Vec<FlashMessage>,
    pub heading: String,
    pub action: String,
    pub form: VenueForm,
    pub errors: Vec<FieldError>,
    pub state_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormTemplate {
    pub flashes: Vec<FlashMessage>,
    pub heading: String,
    pub action: String,
    pub form: ArtistForm,
    pub errors: Vec<FieldError>,
    pub state_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormTemplate {
    pub flashes: Vec<FlashMessage>,
    pub form: ShowForm,
    pub errors: Vec<FieldError>,
}
