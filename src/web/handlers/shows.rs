use askama::Template;
use axum::{extract::State, http::StatusCode, response::Response, Form};
use tracing::{error, warn};

use super::home_with;
use crate::catalog;
use crate::domain::current_time;
use crate::error::FyyurError;
use crate::metrics::CatalogMetrics;
use crate::web::error::AppResult;
use crate::web::flash::{Flash, FlashMessage};
use crate::web::forms::{FormData, ShowForm};
use crate::web::models::show_cards;
use crate::web::state::AppState;
use crate::web::templates::{ShowFormTemplate, ShowsTemplate};

const ENTITY: &str = "show";

pub async fn list_shows(State(state): State<AppState>, flash: Flash) -> AppResult<Response> {
    let listings = catalog::show_listings(state.storage.as_ref()).await?;
    let page = ShowsTemplate {
        flashes: flash.messages(),
        shows: show_cards(&listings),
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn create_show_form(flash: Flash) -> AppResult<Response> {
    let page = ShowFormTemplate {
        flashes: flash.messages(),
        form: ShowForm::starting_at(current_time()),
        errors: Vec::new(),
    };
    Ok(flash.page(StatusCode::OK, page.render()?))
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ShowForm::from_form(&FormData::from(pairs));
    let show = match form.validate() {
        Ok(show) => show,
        Err(errors) => {
            warn!("Rejected show submission with {} field errors", errors.len());
            let page = ShowFormTemplate {
                flashes: flash.messages(),
                form,
                errors,
            };
            return Ok(flash.page(StatusCode::UNPROCESSABLE_ENTITY, page.render()?));
        }
    };

    let message = match state.storage.create_show(&show).await {
        Ok(()) => {
            CatalogMetrics::record_created(ENTITY);
            FlashMessage::success("Show was successfully listed!")
        }
        Err(e @ FyyurError::NotFound { .. }) => {
            warn!("Show refused: {}", e);
            CatalogMetrics::record_failure(ENTITY, "create");
            FlashMessage::error(format!("An error occurred. Show could not be listed: {e}."))
        }
        Err(e) => {
            error!("Failed to create show {:?}: {}", show, e);
            CatalogMetrics::record_failure(ENTITY, "create");
            FlashMessage::error("An error occurred. Show could not be listed.")
        }
    };
    home_with(&flash, message)
}
