use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::web::handlers::{self, artists, shows, venues};
use crate::web::state::AppState;

pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // Venues
        .route("/venues", get(venues::list_venues))
        .route(
            "/venues/search",
            get(venues::search_venues_query).post(venues::search_venues),
        )
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route(
            "/venues/:id",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route("/venues/:id/delete", post(venues::delete_venue))
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
        // Artists
        .route("/artists", get(artists::list_artists))
        .route(
            "/artists/search",
            get(artists::search_artists_query).post(artists::search_artists),
        )
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route(
            "/artists/:id",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route("/artists/:id/delete", post(artists::delete_artist))
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
        // Shows
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
