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
use crate::web::forms::{FieldError, FormData, VenueForm};
use crate::web::models::{genre_options, show_cards, state_options};
use crate::web::state::AppState;
use crate::web::templates::{
    SearchTemplate, VenueDetailTemplate, VenueFormTemplate, VenuesTemplate,
};

const ENTITY: &str = "venue";

fn form_page(
    flash: &Flash,
    status: StatusCode,
    heading: String,
    action: String,
    form: VenueForm,
    errors: Vec<FieldError>,
) -> AppResult<Response> {
    let page = VenueFormTemplate {
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

pub async fn list_venues(State(state): State<AppState>, flash: Flash) -> AppResult<Response> {
    let areas = catalog::venue_areas(state.storage.as_ref(), current_time()).await?;
    let page = VenuesTemplate {
        flashes: flash.messages(),
        areas,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

async fn search(state: &AppState, flash: &Flash, search_term: String) -> AppResult<Response> {
    let results =
        catalog::search_venues(state.storage.as_ref(), &search_term, current_time()).await?;
    CatalogMetrics::record_search(ENTITY, results.count);
    info!("Venue search '{}' matched {}", search_term, results.count);
    let page = SearchTemplate {
        flashes: flash.messages(),
        kind: "venues",
        search_term,
        results,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn search_venues(
    State(state): State<AppState>,
    flash: Flash,
    Form(query): Form<SearchQuery>,
) -> AppResult<Response> {
    search(&state, &flash, query.search_term).await
}

pub async fn search_venues_query(
    State(state): State<AppState>,
    flash: Flash,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    search(&state, &flash, query.search_term).await
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(venue_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let detail = match catalog::venue_detail(state.storage.as_ref(), venue_id, current_time()).await
    {
        Ok(Some(detail)) => detail,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load venue {}: {}", venue_id, e);
            return record_not_found(&flash);
        }
    };
    let page = VenueDetailTemplate {
        flashes: flash.messages(),
        past_shows: show_cards(&detail.shows.past),
        upcoming_shows: show_cards(&detail.shows.upcoming),
        venue: detail.venue,
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn create_venue_form(flash: Flash) -> AppResult<Response> {
    form_page(
        &flash,
        StatusCode::OK,
        "List a new venue".to_string(),
        "/venues/create".to_string(),
        VenueForm::default(),
        Vec::new(),
    )
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = VenueForm::from_form(&FormData::from(pairs));
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => {
            warn!("Rejected venue submission with {} field errors", errors.len());
            return form_page(
                &flash,
                StatusCode::UNPROCESSABLE_ENTITY,
                "List a new venue".to_string(),
                "/venues/create".to_string(),
                form,
                errors,
            );
        }
    };

    let message = match state.storage.create_venue(&profile).await {
        Ok(venue) => {
            CatalogMetrics::record_created(ENTITY);
            FlashMessage::success(format!("Venue {} was successfully listed!", venue.name))
        }
        Err(e) => {
            error!("Failed to create venue '{}': {}", profile.name, e);
            CatalogMetrics::record_failure(ENTITY, "create");
            FlashMessage::error(format!(
                "An error occurred. Venue {} could not be listed.",
                profile.name
            ))
        }
    };
    home_with(&flash, message)
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(venue_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let venue = match state.storage.get_venue_by_id(venue_id).await {
        Ok(Some(venue)) => venue,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load venue {} for deletion: {}", venue_id, e);
            CatalogMetrics::record_failure(ENTITY, "delete");
            return home_with(
                &flash,
                FlashMessage::error(format!(
                    "Something went wrong. Venue {} could not be deleted.",
                    venue_id
                )),
            );
        }
    };

    let message = match state.storage.delete_venue(venue_id).await {
        Ok(()) => {
            info!("Deleted venue {} ({})", venue.id, venue.name);
            CatalogMetrics::record_deleted(ENTITY);
            FlashMessage::success(format!("Venue {} was successfully deleted!", venue.name))
        }
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            CatalogMetrics::record_failure(ENTITY, "delete");
            FlashMessage::error(format!(
                "Something went wrong. Venue {} could not be deleted.",
                venue.name
            ))
        }
    };
    home_with(&flash, message)
}

pub async fn edit_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let Some(venue_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let venue = match state.storage.get_venue_by_id(venue_id).await {
        Ok(Some(venue)) => venue,
        Ok(None) => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to load venue {} for editing: {}", venue_id, e);
            return record_not_found(&flash);
        }
    };
    form_page(
        &flash,
        StatusCode::OK,
        format!("Edit venue {}", venue.name),
        format!("/venues/{venue_id}/edit"),
        VenueForm::from_venue(&venue),
        Vec::new(),
    )
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let Some(venue_id) = parse_id(&raw_id) else {
        return record_not_found(&flash);
    };
    let form = VenueForm::from_form(&FormData::from(pairs));
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => {
            return form_page(
                &flash,
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Edit venue {}", form.name),
                format!("/venues/{venue_id}/edit"),
                form,
                errors,
            );
        }
    };

    let message = match state.storage.update_venue(venue_id, &profile).await {
        Ok(venue) => {
            CatalogMetrics::record_updated(ENTITY);
            FlashMessage::success(format!("Venue {} was successfully updated!", venue.name))
        }
        Err(e) if e.is_not_found() => return record_not_found(&flash),
        Err(e) => {
            error!("Failed to update venue {}: {}", venue_id, e);
            CatalogMetrics::record_failure(ENTITY, "update");
            FlashMessage::error(format!(
                "An error occurred. Venue {} could not be updated.",
                profile.name
            ))
        }
    };
    Ok(flash.redirect(&format!("/venues/{venue_id}"), message))
}
