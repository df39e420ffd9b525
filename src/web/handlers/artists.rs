use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Form,
};
use tracing::{error, info, warn};

use super::{home_with, parse_id, record_not_found, SearchQuery};
use crate::catalog;
use crate::domain::current_time;
use crate::metrics::CatalogMetrics;
use crate::web::error::AppResult;
use crate::web::flash::{Flash, FlashMessage};
use crate::web::forms::{ArtistForm, FieldError, FormData};
use crate::web::models::{genre_options, show_cards, state_options};
use crate::web::state::AppState;
use crate::web::templates::{
    ArtistDetailTemplate, ArtistFormTemplate, ArtistsTemplate, SearchTemplate,
};

const ENTITY: &str = "artist";

fn form_page(
    flash: &Flash,
    status: StatusCode,
    heading: String,
    action: String,
    form: ArtistForm,
    errors: Vec<FieldError>,
) -> AppResult<Response> {
    let page = ArtistFormTemplate {
        flashes: flash.messages(),
        heading,
        action,
        state_options: state_options(&form.state),
        genre_options: genre_options(&form.genres),
        form,
        errors,
    };
    Ok(flash.page(status, page.render()?))
}

pub async fn list_artists(State(state): State<AppState>, flash: Flash) -> AppResult<Response> {
    let artists = state.storage.get_all_artists().await?;
    let page = ArtistsTemplate {
        flashes: flash.messages(),
        artists,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

async fn search(state: &AppState, flash: &Flash, search_term: String) -> AppResult<Response> {
    let results =
        catalog::search_artists(state.storage.as_ref(), &search_term, current_time()).await?;
    CatalogMetrics::record_search(ENTITY, results.count);
    info!("Artist search '{}' matched {}", search_term, results.count);
    let page = SearchTemplate {
        flashes: flash.messages(),
        kind: "artists",
        search_term,
        results,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn search_artists(
    State(state): State<AppState>,
    flash: Flash,
    Form(query): Form<SearchQuery>,
) -> AppResult<Response> {
    search(&state, &flash, query.search_term).await
}

pub async fn search_artists_query(
    State(state): State<AppState>,
    flash: Flash,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    search(&state, &flash, query.search_term).await
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(artist_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let detail = match catalog::artist_detail(state.storage.as_ref(), artist_id, current_time()).await
    {
        Ok(Some(detail)) => detail,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load artist {}: {}", artist_id, e);
            return record_not_found(&flash);
        }
    };
    let page = ArtistDetailTemplate {
        flashes: flash.messages(),
        past_shows: show_cards(&detail.shows.past),
        upcoming_shows: show_cards(&detail.shows.upcoming),
        artist: detail.artist,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn create_artist_form(flash: Flash) -> AppResult<Response> {
    form_page(
        &flash,
        StatusCode::OK,
        "List a new artist".to_string(),
        "/artists/create".to_string(),
        ArtistForm::default(),
        Vec::new(),
    )
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ArtistForm::from_form(&FormData::from(pairs));
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => {
            warn!("Rejected artist submission with {} field errors", errors.len());
            return form_page(
                &flash,
                StatusCode::UNPROCESSABLE_ENTITY,
                "List a new artist".to_string(),
                "/artists/create".to_string(),
                form,
                errors,
            );
        }
    };

    let message = match state.storage.create_artist(&profile).await {
        Ok(artist) => {
            CatalogMetrics::record_created(ENTITY);
            FlashMessage::success(format!("Artist {} was successfully listed!", artist.name))
        }
        Err(e) => {
            error!("Failed to create artist '{}': {}", profile.name, e);
            CatalogMetrics::record_failure(ENTITY, "create");
            FlashMessage::error(format!(
                "An error occurred. Artist {} could not be listed.",
                profile.name
            ))
        }
    };
    home_with(&flash, message)
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(artist_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let artist = match state.storage.get_artist_by_id(artist_id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load artist {} for deletion: {}", artist_id, e);
            CatalogMetrics::record_failure(ENTITY, "delete");
            return home_with(
                &flash,
                FlashMessage::error(format!(
                    "Something went wrong. Artist {} could not be deleted.",
                    artist_id
                )),
            );
        }
    };

    let message = match state.storage.delete_artist(artist_id).await {
        Ok(()) => {
            info!("Deleted artist {} ({})", artist.id, artist.name);
            CatalogMetrics::record_deleted(ENTITY);
            FlashMessage::success(format!("Artist {} was successfully deleted!", artist.name))
        }
        Err(e) => {
            error!("Failed to delete artist {}: {}", artist_id, e);
            CatalogMetrics::record_failure(ENTITY, "delete");
            FlashMessage::error(format!(
                "Something went wrong. Artist {} could not be deleted.",
                artist.name
            ))
        }
    };
    home_with(&flash, message)
}

pub async fn edit_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(artist_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let artist = match state.storage.get_artist_by_id(artist_id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load artist {} for editing: {}", artist_id, e);
            return record_not_found(&flash);
        }
    };
    form_page(
        &flash,
        StatusCode::OK,
        format!("Edit artist {}", artist.name),
        format!("/artists/{artist_id}/edit"),
        ArtistForm::from_artist(&artist),
        Vec::new(),
    )
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let Some(artist_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let form = ArtistForm::from_form(&FormData::from(pairs));
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => {
            return form_page(
                &flash,
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Edit artist {}", form.name),
                format!("/artists/{artist_id}/edit"),
                form,
                errors,
            );
        }
    };

    let message = match state.storage.update_artist(artist_id, &profile).await {
        Ok(artist) => {
            CatalogMetrics::record_updated(ENTITY);
            FlashMessage::success(format!("Artist {} was successfully updated!", artist.name))
        }
        Err(e) if e.is_not_found() => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to update artist {}: {}", artist_id, e);
            CatalogMetrics::record_failure(ENTITY, "update");
            FlashMessage::error(format!(
                "An error occurred. Artist {} could not be updated.",
                profile.name
            ))
        }
    };
    Ok(flash.redirect(&format!("/artists/{artist_id}"), message))
}
